use crate::models::Product;

/// One card per product, in ranked order.
pub fn format(products: &[&Product]) -> String {
    let mut ret = String::new();

    for product in products {
        let percent = (product.similarity_score * 100.0).round() as i64;

        ret.push_str(&format!(
            "{} [{}]\n  ${:.2} | {}% match\n  {}\n",
            product.name, product.category, product.price, percent, product.image_url
        ));
    }

    ret
}

pub fn format_count(count: usize) -> String {
    format!("{} products", count)
}
