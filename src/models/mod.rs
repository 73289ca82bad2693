pub mod product;
pub mod search_result;

pub use product::Product;
pub use search_result::SearchResult;
