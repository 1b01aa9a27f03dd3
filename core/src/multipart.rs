//! `multipart/form-data` encoding for photo uploads.

use std::path::Path;

use mime::Mime;

use crate::error::ApiError;

/// A photo read from disk, ready to be attached to a multipart body.
#[derive(Debug, Clone)]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: Mime,
    pub data: Vec<u8>,
}

impl PhotoFile {
    pub fn new(file_name: impl Into<String>, content_type: Mime, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            data,
        }
    }

    /// Read `path` and infer the content type from its extension.
    pub fn read(path: &Path) -> Result<Self, ApiError> {
        let data = std::fs::read(path).map_err(|source| ApiError::Photo {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        Ok(Self::new(file_name, content_type_for(path), data))
    }
}

fn content_type_for(path: &Path) -> Mime {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// Incrementally built multipart body with a random boundary.
#[derive(Debug)]
pub struct Multipart {
    boundary: String,
    data: Vec<u8>,
}

impl Default for Multipart {
    fn default() -> Self {
        Self::new()
    }
}

impl Multipart {
    pub fn new() -> Self {
        Self::with_boundary(format!("----petfriends-{}", uuid::Uuid::new_v4()))
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            data: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.data
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.data.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.data.extend_from_slice(value.as_bytes());
        self.data.extend_from_slice(b"\r\n");
        self
    }

    pub fn file(mut self, name: &str, photo: &PhotoFile) -> Self {
        self.data
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.data.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{}\"\r\n",
                escape_quoted(&photo.file_name)
            )
            .as_bytes(),
        );
        self.data
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", photo.content_type).as_bytes());
        self.data.extend_from_slice(&photo.data);
        self.data.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Close the body; returns `(content_type, bytes)`.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        let content_type = self.content_type();
        self.data
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (content_type, self.data)
    }
}

/// Percent-encode the characters that would break a quoted header value,
/// the way browsers do for `filename="..."`.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
