//! Catalog listing commands.

use anyhow::{Context as _, Result};
use rosba_catalog::{CatalogStore, CategoryFilter};
use serde::Serialize;

use super::ListArgs;
use crate::context::Context;

/// Run the list command.
pub async fn run(args: ListArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.build_store()?;

    if let Some(ref label) = args.category {
        store.set_filter(parse_filter(label)?);
    }
    if let Some(term) = args.search {
        store.set_search_term(term);
    }

    print_catalog(&store, ctx);
    Ok(())
}

/// Run the categories command.
pub async fn categories(ctx: &Context) -> Result<()> {
    let store = ctx.build_store()?;
    let counts = category_counts(&store);

    if ctx.output.is_json() {
        ctx.output.json(&counts);
        return Ok(());
    }

    ctx.output.header("Kategori");
    for entry in &counts {
        ctx.output.list_item(&format!("{} ({})", entry.label, entry.count));
    }

    Ok(())
}

/// Parse a `--category` value, listing the valid labels on failure.
pub fn parse_filter(label: &str) -> Result<CategoryFilter> {
    label.parse::<CategoryFilter>().with_context(|| {
        let valid: Vec<&str> = CategoryFilter::choices().iter().map(|c| c.label()).collect();
        format!("Valid categories: {}", valid.join(", "))
    })
}

/// Print the visible products as a table, or as JSON.
pub fn print_catalog(store: &CatalogStore, ctx: &Context) {
    let visible = store.visible_products();

    if ctx.output.is_json() {
        ctx.output.json(&visible);
        return;
    }

    let mut title = format!("Katalog {} - {}", ctx.config.store.name, store.filter());
    if !store.search_term().is_empty() {
        title.push_str(&format!(" - \"{}\"", store.search_term()));
    }
    ctx.output.header(&title);

    if visible.is_empty() {
        ctx.output.info("Tidak ada kitab yang cocok.");
        return;
    }

    ctx.output.product_table(&visible);
    ctx.output.info(&format!(
        "{} dari {} kitab ditampilkan",
        visible.len(),
        store.len()
    ));
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CategoryCount {
    pub label: &'static str,
    pub count: usize,
}

/// Number of records each filter value would show.
fn category_counts(store: &CatalogStore) -> Vec<CategoryCount> {
    CategoryFilter::choices()
        .into_iter()
        .map(|filter| CategoryCount {
            label: filter.label(),
            count: store
                .products()
                .iter()
                .filter(|p| filter.matches(&p.category))
                .count(),
        })
        .collect()
}
