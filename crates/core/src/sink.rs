//! Artifact sink abstraction.

/// Persists a finished artifact to a named location.
///
/// Writes are not retried by the caller; on failure the content is still
/// owned by the caller and can be written again.
pub trait Sink: Send + Sync {
    /// Write `content` to `path`.
    fn write(&self, path: &str, content: &str)
    -> impl Future<Output = std::io::Result<()>> + Send;
}
