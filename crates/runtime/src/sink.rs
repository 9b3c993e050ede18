//! Filesystem artifact sink.

use dcore::Sink;
use std::path::Path;

/// Writes artifacts to the local filesystem, creating parent directories
/// as needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSink;

impl Sink for FileSink {
    async fn write(&self, path: &str, content: &str) -> std::io::Result<()> {
        let path = Path::new(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await?;
        tracing::info!("wrote {} bytes to {}", content.len(), path.display());
        Ok(())
    }
}
