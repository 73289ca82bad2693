use crate::models::{Product, SearchResult};

/// Predicate over a single product, applied to derive filtered views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterCriterion {
    /// Keep products scoring strictly above the threshold
    MinSimilarity(f32),
}

impl FilterCriterion {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            FilterCriterion::MinSimilarity(threshold) => product.similarity_score > *threshold,
        }
    }
}

/// Holds the last completed search. Views are derived on demand and never
/// stored; the result itself is only ever replaced wholesale.
#[derive(Debug, Default)]
pub struct ResultStore {
    result: Option<SearchResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_result(&mut self, result: SearchResult) {
        self.result = Some(result);
    }

    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    /// The current view of the stored result. `None` means no search has
    /// completed yet, which is distinct from an empty result. A criterion
    /// filters the sequence without reordering it.
    pub fn current_view(&self, criterion: Option<FilterCriterion>) -> Option<Vec<&Product>> {
        let result = self.result.as_ref()?;

        let view = match criterion {
            None => result.products.iter().collect(),
            Some(criterion) => result
                .products
                .iter()
                .filter(|p| criterion.matches(p))
                .collect(),
        };

        Some(view)
    }
}
