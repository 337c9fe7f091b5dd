use crate::error::AsrError;

/// Configured bounds for audio uploads
#[derive(Debug, Clone)]
pub struct UploadLimits {
    /// Accepted audio MIME types
    pub allowed_formats: Vec<String>,
    /// Size ceiling in bytes
    pub max_bytes: u64,
}

impl UploadLimits {
    /// Gate an upload before any remote call is attempted
    ///
    /// Checks only declared content type and byte length; the audio is
    /// already fully buffered so nothing is consumed here.
    pub fn validate(&self, content_type: &str, len: u64) -> crate::error::Result<()> {
        if !self.allowed_formats.iter().any(|f| f == content_type) {
            return Err(AsrError::InvalidFormat {
                content_type: content_type.to_owned(),
                allowed: self.allowed_formats.join(", "),
            });
        }

        if len > self.max_bytes {
            #[allow(clippy::cast_precision_loss)]
            return Err(AsrError::TooLarge {
                actual_mb: len as f64 / (1024.0 * 1024.0),
                max_mb: self.max_bytes / (1024 * 1024),
            });
        }

        if len == 0 {
            return Err(AsrError::EmptyUpload);
        }

        Ok(())
    }
}
