pub mod mock;
pub mod wedge;

use anyhow::Result;
use async_trait::async_trait;

/// How an acquisition ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// One decoded barcode, exactly as the reader produced it.
    Decoded(String),
    /// The user gave up, or the source ran dry.
    Cancelled,
}

/// Something that can produce a barcode: a hardware reader, piped input,
/// a test script.
///
/// `acquire` resolves once per scan. Misreads are the source's business and
/// are skipped without surfacing. A source releases whatever it holds both
/// when `acquire` returns and when the `acquire` future is dropped.
#[async_trait]
pub trait BarcodeSource: Send {
    async fn acquire(&mut self) -> Result<Scan>;
}
