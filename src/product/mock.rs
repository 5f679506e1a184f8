use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{Catalog, ProductRecord};

/// One scripted catalog answer.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer to a search.
    Products(Vec<ProductRecord>),
    /// Answer to a barcode lookup (`None` = unknown code).
    Product(Option<ProductRecord>),
    /// Transport failure with this message.
    Failure(String),
    /// Wait, then answer.
    Delayed(Duration, Box<Reply>),
}

impl Reply {
    pub fn delayed(delay: Duration, reply: Reply) -> Self {
        Self::Delayed(delay, Box::new(reply))
    }
}

/// A scripted catalog for tests. Returns pre-defined replies in order
/// and records every term or barcode it was asked for.
pub struct MockCatalog {
    replies: Vec<Reply>,
    index: AtomicUsize,
    requests: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Terms and barcodes received so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    async fn next_reply(&self, request: &str) -> Result<Reply> {
        self.requests.lock().unwrap().push(request.to_string());
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        let mut reply = self
            .replies
            .get(i)
            .cloned()
            .ok_or_else(|| anyhow!("MockCatalog: no more replies (called {} times)", i + 1))?;
        while let Reply::Delayed(delay, inner) = reply {
            tokio::time::sleep(delay).await;
            reply = *inner;
        }
        Ok(reply)
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn search(&self, term: &str) -> Result<Vec<ProductRecord>> {
        match self.next_reply(term).await? {
            Reply::Products(products) => Ok(products),
            Reply::Failure(msg) => Err(anyhow!(msg)),
            other => bail!("MockCatalog: search got a non-search reply: {other:?}"),
        }
    }

    async fn product(&self, barcode: &str) -> Result<Option<ProductRecord>> {
        match self.next_reply(barcode).await? {
            Reply::Product(product) => Ok(product),
            Reply::Failure(msg) => Err(anyhow!(msg)),
            other => bail!("MockCatalog: product got a non-product reply: {other:?}"),
        }
    }
}
