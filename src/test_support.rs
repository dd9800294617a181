//! Shared test support utilities
//!
//! Provides an in-memory `MockSink` implementing `RecordSink` for use in unit
//! tests.

use crate::error::SinkError;
use crate::port::RecordSink;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock sink that captures appended lines for testing.
///
/// Individual append calls (1-based) can be made to fail.
pub struct MockSink {
    lines: Mutex<Vec<Vec<u8>>>,
    calls: AtomicUsize,
    failing_calls: Mutex<HashSet<usize>>,
    closed: AtomicBool,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            failing_calls: Mutex::new(HashSet::new()),
            closed: AtomicBool::new(false),
        }
    }

    pub fn fail_on_call(&self, call: usize) {
        self.failing_calls.lock().unwrap().insert(call);
    }

    pub fn lines(&self) -> Vec<serde_json::Value> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .map(|line| serde_json::from_slice(line).unwrap())
            .collect()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl RecordSink for MockSink {
    fn append(
        &self,
        record: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<(), SinkError>> + Send + '_>> {
        Box::pin(async move {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.failing_calls.lock().unwrap().contains(&call) {
                return Err(SinkError::Write(std::io::Error::other("mock disk full")));
            }
            if self.closed.load(Ordering::SeqCst) {
                return Err(SinkError::Closed);
            }
            self.lines.lock().unwrap().push(record);
            Ok(())
        })
    }

    fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), SinkError>> + Send + '_>> {
        Box::pin(async move {
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        })
    }
}
