//! Turning uploaded files into transportable image payloads.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::ReadError;

/// MIME type used when the bytes do not identify a known image format.
pub const FALLBACK_MIME_TYPE: &str = "image/jpeg";

/// An image ready to be sent to an analyzer and shown in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Name of the source file, for logs and reports.
    pub file_name: String,
    /// Sniffed MIME type (e.g., "image/png").
    pub mime_type: String,
    /// Standard base64 of the raw bytes.
    pub base64: String,
}

impl EncodedImage {
    /// Encode raw bytes, sniffing the MIME type from their magic number.
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        let mime_type = infer::get(bytes)
            .map(|kind| kind.mime_type())
            .filter(|mime| mime.starts_with("image/"))
            .unwrap_or(FALLBACK_MIME_TYPE)
            .to_string();

        Self {
            file_name: file_name.into(),
            mime_type,
            base64: STANDARD.encode(bytes),
        }
    }

    /// A renderable `data:` URL holding the image inline.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64)
    }
}

/// Read a file and encode it.
pub async fn read_image(path: &Path) -> Result<EncodedImage, ReadError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.is_empty() {
        return Err(ReadError::Empty(path.to_path_buf()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(EncodedImage::from_bytes(file_name, &bytes))
}
