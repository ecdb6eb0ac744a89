use std::path::Path;

use reqwest::multipart::Part;

use crate::error::Result;

/// File attachment for the multipart endpoints (registration, profile
/// update). Always sent as the `file` part next to the scalar fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl UploadFile {
    /// Reads the file and guesses the mime type from the extension,
    /// falling back to `application/octet-stream`.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime_type =
            mime_for_extension(path.extension().and_then(|ext| ext.to_str())).to_string();
        Ok(Self {
            bytes,
            file_name,
            mime_type,
        })
    }

    pub(crate) fn into_part(self) -> Result<Part> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime_type)?;
        Ok(part)
    }
}

fn mime_for_extension(ext: Option<&str>) -> &'static str {
    match ext.map(|ext| ext.to_ascii_lowercase()).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::mime_for_extension;

    #[test]
    fn common_picture_extensions_map() {
        assert_eq!(mime_for_extension(Some("JPG")), "image/jpeg");
        assert_eq!(mime_for_extension(Some("png")), "image/png");
        assert_eq!(mime_for_extension(Some("heic")), "image/heic");
    }

    #[test]
    fn unknown_extensions_fall_back() {
        assert_eq!(mime_for_extension(Some("pdf")), "application/octet-stream");
        assert_eq!(mime_for_extension(None), "application/octet-stream");
    }
}
