use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{BarcodeSource, Scan};

/// One scripted event from the fake camera.
#[derive(Debug, Clone)]
pub enum Frame {
    /// A successful decode.
    Code(String),
    /// A failed decode; swallowed silently.
    Misread,
    /// The user pressed cancel.
    Cancel,
    /// Nothing ever decodes. Only ends when the future is dropped.
    Stall,
}

/// A scripted barcode source for tests.
///
/// Counts how many acquisitions currently hold the "camera", so tests can
/// check it is released on success, on cancel, and when dropped mid-scan.
pub struct MockScanner {
    frames: VecDeque<Frame>,
    open: Arc<AtomicUsize>,
}

impl MockScanner {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
            open: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the count of open camera sessions.
    pub fn open_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.open)
    }
}

struct CameraGuard(Arc<AtomicUsize>);

impl CameraGuard {
    fn open(count: &Arc<AtomicUsize>) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(count))
    }
}

impl Drop for CameraGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BarcodeSource for MockScanner {
    async fn acquire(&mut self) -> Result<Scan> {
        let _camera = CameraGuard::open(&self.open);
        loop {
            match self.frames.pop_front() {
                Some(Frame::Code(code)) => return Ok(Scan::Decoded(code)),
                Some(Frame::Misread) => continue,
                Some(Frame::Cancel) => return Ok(Scan::Cancelled),
                Some(Frame::Stall) => std::future::pending::<()>().await,
                None => bail!("MockScanner: script exhausted"),
            }
        }
    }
}
