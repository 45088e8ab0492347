//! Product detail command.

use anyhow::{Context as _, Result};
use rosba_catalog::{Product, ProductId};
use serde::Serialize;

use super::ShowArgs;
use crate::context::Context;
use crate::storefront;

/// Run the show command.
pub async fn run(args: ShowArgs, ctx: &Context) -> Result<()> {
    let store = ctx.build_store()?;
    let id = ProductId::new(args.id);
    let product = store
        .get(&id)
        .with_context(|| format!("Product not found: {}", id))?;

    print_detail(product, ctx)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductDetail<'a> {
    #[serde(flatten)]
    product: &'a Product,
    order_link: String,
}

/// Print the detail view with the WhatsApp order link.
pub fn print_detail(product: &Product, ctx: &Context) -> Result<()> {
    let order_link = storefront::order_link(&ctx.config.store, product)?;

    if ctx.output.is_json() {
        ctx.output.json(&ProductDetail {
            product,
            order_link: order_link.to_string(),
        });
        return Ok(());
    }

    ctx.output.product_detail(product);
    println!();
    ctx.output.kv("Pesan via WhatsApp", order_link.as_str());
    Ok(())
}
