//! Startup banner and farewell.

use crate::consts::{AUTHOR, VERSION};

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub search_url: &'a str,
    pub product_url: &'a str,
    pub timeout_secs: u64,
}

/// The banner text.
pub fn banner(info: &BannerInfo) -> String {
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║       C ' E S T   L A   W H E A T     ║
   ║   it looks safe, but is it gluten?    ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   search    {}
   barcode   {}
   timeout   {}s

   type a product name, /scan for a barcode, /help for more
"#,
        VERSION, AUTHOR, info.search_url, info.product_url, info.timeout_secs,
    )
}

/// Print the startup banner.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner(info));
}

pub fn print_farewell() {
    println!("goodbye.");
}
