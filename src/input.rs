use std::path::{Path, PathBuf};

use anyhow::Result;
use mime::Mime;
use normalize_path::NormalizePath;
use reqwest::Url;
use resolve_path::PathResolveExt;

use crate::error::ValidationError;

/// Upload limit enforced before any other check.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// A user-supplied query image, normalized. The enum guarantees exactly one
/// payload form per kind; a new selection replaces the previous one
/// wholesale.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageInput {
    File {
        bytes: Vec<u8>,
        mime: Mime,
        source: PathBuf,
    },
    Url {
        url: Url,
    },
}

impl ImageInput {
    /// Where the image came from, for previews and log lines.
    pub fn source_ref(&self) -> String {
        match self {
            ImageInput::File { source, .. } => source.display().to_string(),
            ImageInput::Url { url } => url.to_string(),
        }
    }
}

/// Validate an already-read local file. Pure: size first (an oversized input
/// is `TooLarge` no matter what it contains), then the MIME type guessed
/// from the extension must be `image/*`.
pub fn validate_file(source: &Path, bytes: Vec<u8>) -> Result<ImageInput, ValidationError> {
    if bytes.len() as u64 > MAX_IMAGE_BYTES {
        return Err(ValidationError::TooLarge(bytes.len() as u64));
    }

    let mime = mime_guess::from_path(source).first_or_octet_stream();
    if mime.type_() != mime::IMAGE {
        return Err(ValidationError::InvalidType(mime.to_string()));
    }

    Ok(ImageInput::File {
        bytes,
        mime,
        source: source.to_path_buf(),
    })
}

/// Validate a remote image URL. Pure: no network access happens here, only
/// parsing. Anything that is not an absolute http(s) URL is rejected.
pub fn validate_url(raw: &str) -> Result<ImageInput, ValidationError> {
    let raw = raw.trim();

    let url = Url::parse(raw).map_err(|_| ValidationError::MalformedUrl(raw.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(ImageInput::Url { url }),
        _ => Err(ValidationError::MalformedUrl(raw.to_string())),
    }
}

/// Read a local image and validate it. The path is resolved and normalized
/// the same way the config paths are.
pub fn read_file(path: &Path) -> Result<ImageInput> {
    let path = path.resolve().normalize();
    log::info!("Reading image {}", path.display());

    let bytes = std::fs::read(&path)?;

    Ok(validate_file(&path, bytes)?)
}
