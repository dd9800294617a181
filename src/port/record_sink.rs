//! RecordSink trait for the durable destination of output lines.
//!
//! Sessions only see this trait, so tests can substitute an in-memory or
//! failing sink for the file-backed one.

use crate::error::SinkError;
use std::future::Future;
use std::pin::Pin;

/// Destination shared by every stream session.
///
/// This trait is dyn-compatible by using boxed futures.
pub trait RecordSink: Send + Sync {
    /// Append one serialized record followed by a newline.
    ///
    /// Concurrent calls never interleave the bytes of two records.
    fn append(
        &self,
        record: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<(), SinkError>> + Send + '_>>;

    /// Flush and release the destination. Later appends fail with
    /// [`SinkError::Closed`].
    fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), SinkError>> + Send + '_>>;
}
