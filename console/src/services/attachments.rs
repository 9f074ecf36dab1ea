//! Base64 data-URI transport of attached files.
//!
//! The backend stores CVs and leave evidence as `data:{mime};base64,{body}`
//! strings embedded in the JSON records, so files are encoded before they
//! are sent and decoded back into bytes for viewing.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;

use crate::errors::ConsoleError;

pub const DEFAULT_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Reads a file, deriving the MIME type from its extension.
    pub fn from_file(path: &Path) -> Result<Self, ConsoleError> {
        let bytes = fs::read(path)
            .map_err(|err| ConsoleError::Attachment(format!("{}: {err}", path.display())))?;
        Ok(Self::new(mime_for(path), bytes))
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, B64.encode(&self.bytes))
    }

    /// Accepts a full data URI or a bare base64 payload.
    pub fn from_data_uri(raw: &str) -> Result<Self, ConsoleError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConsoleError::Attachment("Sin archivo adjunto".to_string()));
        }

        let (mime, payload) = match raw.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest.split_once(',').ok_or_else(|| {
                    ConsoleError::Attachment("data URI sin contenido".to_string())
                })?;
                let mime = header
                    .strip_suffix(";base64")
                    .ok_or_else(|| ConsoleError::Attachment("data URI no está en base64".to_string()))?;
                let mime = if mime.is_empty() { DEFAULT_MIME } else { mime };
                (mime.to_string(), payload)
            }
            None => (DEFAULT_MIME.to_string(), raw),
        };

        let bytes = B64
            .decode(payload.trim())
            .map_err(|err| ConsoleError::Attachment(err.to_string()))?;
        Ok(Self { mime, bytes })
    }

    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "application/pdf" => "pdf",
            "image/png" => "png",
            "image/jpeg" => "jpg",
            _ => "bin",
        }
    }

    /// Writes the decoded file so an external viewer can open it.
    pub fn write_to(&self, path: &Path) -> Result<(), ConsoleError> {
        fs::write(path, &self.bytes)
            .map_err(|err| ConsoleError::Attachment(format!("{}: {err}", path.display())))
    }
}

pub fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => DEFAULT_MIME,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_pdf_as_data_uri() {
        let attachment = Attachment::new("application/pdf", b"%PDF-1.4".to_vec());
        assert_eq!(attachment.to_data_uri(), "data:application/pdf;base64,JVBERi0xLjQ=");
    }

    #[test]
    fn decodes_data_uri_and_bare_payload() {
        let decoded = Attachment::from_data_uri("data:application/pdf;base64,JVBERi0xLjQ=").unwrap();
        assert_eq!(decoded.mime, "application/pdf");
        assert_eq!(decoded.bytes, b"%PDF-1.4");
        assert_eq!(decoded.extension(), "pdf");

        let bare = Attachment::from_data_uri("JVBERi0xLjQ=").unwrap();
        assert_eq!(bare.mime, DEFAULT_MIME);
        assert_eq!(bare.bytes, b"%PDF-1.4");
    }

    #[test]
    fn rejects_missing_and_garbled_payloads() {
        assert!(Attachment::from_data_uri("  ").is_err());
        assert!(Attachment::from_data_uri("data:application/pdf,plain").is_err());
        assert!(Attachment::from_data_uri("data:application/pdf;base64,@@@").is_err());
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for(Path::new("cv.PDF")), "application/pdf");
        assert_eq!(mime_for(Path::new("reposo.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("notas.txt")), DEFAULT_MIME);
    }
}
