//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rosba_catalog::{Product, ProductCategory};

const NAME_WIDTH: usize = 36;
const CATEGORY_WIDTH: usize = 14;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match render_json(value) {
            Ok(json) => println!("{}", json),
            Err(msg) => self.error(&msg),
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print products as a table: id, category, name, retail and wholesale price.
    pub fn product_table(&self, products: &[&Product]) {
        if self.json {
            return;
        }

        let id_width = products
            .iter()
            .map(|p| p.id.as_str().chars().count())
            .max()
            .unwrap_or(0)
            .max(2);
        let widths = [id_width, CATEGORY_WIDTH, NAME_WIDTH, 10, 10];

        self.table_row(&["ID", "KATEGORI", "NAMA", "ECERAN", "GROSIR"], &widths);
        for product in products {
            let name = truncate(&product.name, NAME_WIDTH);
            let category = truncate(product.category.label(), CATEGORY_WIDTH);
            let price = product.price.display();
            let wholesale = product.wholesale_price.display();
            self.table_row(
                &[product.id.as_str(), &category, &name, &price, &wholesale],
                &widths,
            );
        }
    }

    /// Print the detail view of one product.
    pub fn product_detail(&self, product: &Product) {
        if self.json {
            return;
        }

        println!();
        println!("  {}", style(category_badge(&product.category)).green().bold());
        println!("  {}", style(&product.name).bold());
        println!();
        self.kv("Harga Eceran", &product.price.display());
        self.kv(
            "Harga Grosir",
            &format!(
                "{} (MIN {} PCS)",
                product.wholesale_price.display(),
                product.min_wholesale
            ),
        );
        self.kv("Rating", &format!("{:.1}", product.rating));
        self.kv("Gambar", &image_summary(&product.image));
        if !product.description.is_empty() {
            println!();
            for line in product.description.lines() {
                println!("  {}", line);
            }
        }
    }

    /// Create a progress bar.
    pub fn progress(&self, len: u64, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        let bar_style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(bar_style);
        pb.set_message(msg.to_string());
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn render_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON output: {}", e))
}

/// Upper-cased category label, as shown above a product name.
pub fn category_badge(category: &ProductCategory) -> String {
    category.label().to_uppercase()
}

/// Shorten to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// Inline images are summarized instead of dumping the base64 payload.
fn image_summary(image: &str) -> String {
    match image.strip_prefix("data:") {
        Some(rest) => {
            let mime = rest.split(';').next().unwrap_or_default();
            format!("inline {} ({} bytes encoded)", mime, image.len())
        }
        None if image.is_empty() => "-".to_string(),
        None => image.to_string(),
    }
}
