//! Storefront contact links.

use anyhow::{Context as _, Result};
use reqwest::Url;
use rosba_catalog::Product;

use crate::config::StoreConfig;

const GREETING: &str = "Assalamu'alaikum Rosba Store";

/// WhatsApp link asking about stock in general.
pub fn inquiry_link(store: &StoreConfig) -> Result<Url> {
    whatsapp_link(
        &store.whatsapp_number,
        &format!("{}, saya ingin bertanya tentang stok kitab.", GREETING),
    )
}

/// WhatsApp link pre-filled with an order for `product`.
pub fn order_link(store: &StoreConfig, product: &Product) -> Result<Url> {
    whatsapp_link(
        &store.whatsapp_number,
        &format!("{}, saya berminat pesan: {}", GREETING, product.name),
    )
}

fn whatsapp_link(number: &str, text: &str) -> Result<Url> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        anyhow::bail!("store.whatsapp_number has no digits: {:?}", number);
    }
    Url::parse_with_params(&format!("https://wa.me/{}", digits), [("text", text)])
        .context("Failed to build WhatsApp link")
}
