//! Gluten verdict for a single product.
//!
//! A pure function of the record's tags and name. Nothing is cached: ask
//! again and you get the same answer.

use std::fmt;

use crate::product::ProductRecord;

/// Allergen tag declaring gluten.
pub const GLUTEN_ALLERGEN: &str = "en:gluten";

/// Label tags that count as a gluten-free certification.
pub const GLUTEN_FREE_LABELS: [&str; 3] =
    ["en:gluten-free", "en:no-gluten", "en:certified-gluten-free"];

pub const CONTAINS_GLUTEN: &str = "Contains gluten";
pub const LISTED_GLUTEN_FREE: &str = "Gluten-free (according to this listing)";
pub const CERTIFIED_SUFFIX: &str = " — Certified Gluten-Free";
pub const MISMATCH_SUFFIX: &str =
    " — (Tag mismatch — labeled as gluten-free but flagged for gluten. Double-check!)";

/// How worried the user should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Safe,
}

/// The classifier's findings. `Display` gives the verdict string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub contains_gluten: bool,
    pub certified_gluten_free: bool,
    /// Name says "gluten free", tags say gluten, and no certification backs the name.
    pub name_mismatch: bool,
}

impl Verdict {
    pub fn severity(&self) -> Severity {
        if self.contains_gluten {
            Severity::Warning
        } else {
            Severity::Safe
        }
    }

    fn base(&self) -> &'static str {
        if self.contains_gluten {
            CONTAINS_GLUTEN
        } else {
            LISTED_GLUTEN_FREE
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base())?;
        // A certified product can still carry the gluten allergen tag.
        // Both are shown.
        if self.certified_gluten_free {
            f.write_str(CERTIFIED_SUFFIX)?;
        }
        if self.name_mismatch {
            f.write_str(MISMATCH_SUFFIX)?;
        }
        Ok(())
    }
}

/// Classify one product.
pub fn classify(product: &ProductRecord) -> Verdict {
    let contains_gluten = product.allergen_tags.iter().any(|t| t == GLUTEN_ALLERGEN);
    let certified_gluten_free = product
        .label_tags
        .iter()
        .any(|t| GLUTEN_FREE_LABELS.contains(&t.as_str()));
    // Only the name is checked, not the ingredients text.
    let named_gluten_free = product
        .name
        .as_deref()
        .is_some_and(|name| name.to_lowercase().contains("gluten free"));

    Verdict {
        contains_gluten,
        certified_gluten_free,
        name_mismatch: named_gluten_free && contains_gluten && !certified_gluten_free,
    }
}
