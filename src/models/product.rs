use serde::{Deserialize, Serialize};

/// A single product returned by the similar-products API. Immutable once
/// received; the similarity score is computed remotely, never locally.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Product {
    /// Catalogue id, not always present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub category: String,
    pub price: f64,
    /// Product thumbnail url
    pub image_url: String,
    /// Visual similarity to the query image, in [0, 1]. Only the search
    /// endpoint scores products; the plain catalogue omits the field.
    #[serde(default)]
    pub similarity_score: f32,
}
