//! Catalog listing.

use bloom_haven_core::catalog::{self, CatalogFilter, Category};

/// Print every package matching the filter with its option prices.
#[allow(clippy::print_stdout)]
pub fn print(category: Option<Category>, query: Option<String>) {
    let products = catalog::filter(&CatalogFilter { category, query });
    if products.is_empty() {
        tracing::warn!("No packages match");
        return;
    }

    for product in products {
        println!("{} [{}] /products/{}", product.name, product.category, product.slug);
        for option in &product.options {
            println!("  {:<32} {:>12}", option.label, option.total.to_string());
        }
        for choice in &product.workmanship {
            println!("  + {:<30} {:>12}", choice.label, choice.price.to_string());
        }
    }
}
