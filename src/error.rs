use thiserror::Error;

/// Rejections produced while normalizing a user-supplied image. These are
/// inline errors: they never touch the network and leave the UI state alone.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The input is not an image MIME type
    #[error("please select a valid image file (JPG, PNG, WebP), got {0}")]
    InvalidType(String),

    /// The input exceeds the upload size limit
    #[error("image size should be less than 5MB ({0} bytes)")]
    TooLarge(u64),

    /// The input does not parse as an absolute http(s) URL
    #[error("not a valid image URL: {0}")]
    MalformedUrl(String),
}

/// A URL image that validated fine but could not actually be loaded when
/// building its preview. Clears the URL selection.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("could not load image from URL: {0}")]
pub struct PreviewLoadError(pub String);

/// Failures of the search request itself, surfaced through the Error UI
/// state.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A search is already in flight
    #[error("a search is already in progress")]
    Busy,

    /// No image has been selected yet
    #[error("please select an image first")]
    NothingSelected,

    /// The request never produced a response
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered non-2xx with a reported message
    #[error("{0}")]
    Api(String),

    /// The response body was not the JSON the API promises
    #[error("unexpected response from search API: {0}")]
    Decode(String),
}
