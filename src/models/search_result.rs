use crate::input::ImageInput;
use crate::models::Product;

/// One completed search: the ranked products plus the image that produced
/// them. Owned exclusively by the result store and replaced atomically on
/// the next successful search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub products: Vec<Product>,
    pub origin: ImageInput,
}

impl SearchResult {
    pub fn new(products: Vec<Product>, origin: ImageInput) -> Self {
        Self { products, origin }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
