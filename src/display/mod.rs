use crate::core::UiState;
use crate::input::ImageInput;
use crate::models::Product;

pub mod products;

/// One line describing the selected query image.
pub fn preview(image: &ImageInput) -> String {
    format!("Query image: {}", image.source_ref())
}

/// Render the whole UI as a pure function of state plus the current product
/// view. The caller decides where the text goes.
pub fn render_state(state: &UiState, view: Option<Vec<&Product>>) -> String {
    match state {
        UiState::Idle => String::from("No search yet"),
        UiState::Loading => String::from("Searching for similar products..."),
        UiState::Error(message) => format!("Error: {}", message),
        UiState::NoResults => String::from("No similar products found"),
        UiState::Results => match view {
            Some(products) if !products.is_empty() => format!(
                "{}\n\n{}",
                products::format_count(products.len()),
                products::format(&products)
            ),
            // A filter can empty out a non-empty result set.
            _ => String::from("No products match the current filter"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, score: f32) -> Product {
        Product {
            name: name.to_string(),
            category: String::from("Footwear"),
            price: 49.99,
            image_url: String::from("https://cdn.example.com/p.jpg"),
            similarity_score: score,
            ..Default::default()
        }
    }

    #[test]
    fn test_results_rendering() {
        let sneakers = product("Canvas Sneakers", 0.914);
        let boots = product("Leather Boots", 0.5);

        let out = render_state(&UiState::Results, Some(vec![&sneakers, &boots]));
        assert!(out.contains("2 products"));
        assert!(out.contains("Canvas Sneakers"));
        // Rounded, not truncated.
        assert!(out.contains("91% match"));
        assert!(out.contains("50% match"));
        assert!(out.contains("$49.99"));
    }

    #[test]
    fn test_filtered_to_nothing() {
        let out = render_state(&UiState::Results, Some(vec![]));
        assert_eq!(out, "No products match the current filter");
    }

    #[test]
    fn test_terminal_states() {
        assert_eq!(
            render_state(&UiState::Error(String::from("boom")), None),
            "Error: boom"
        );
        assert_eq!(
            render_state(&UiState::NoResults, None),
            "No similar products found"
        );
        assert_eq!(render_state(&UiState::Idle, None), "No search yet");
    }

    #[test]
    fn test_preview_line() {
        let image = crate::input::validate_url("https://example.com/q.jpg").unwrap();
        assert_eq!(preview(&image), "Query image: https://example.com/q.jpg");
    }
}
