//! Bulk upload: photos -> catalog entries.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use indicatif::ProgressBar;
use rosba_catalog::CatalogStore;
use rosba_enrich::{
    BatchReport, EnrichmentPipeline, GeminiAnalyzer, PipelineState, ProgressObserver,
};
use serde::Serialize;

use super::list::print_catalog;
use super::UploadArgs;
use crate::context::Context;

/// Extensions picked up when a directory is given.
const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "webp", "gif", "bmp", "heic", "heif"];

/// Run the upload command.
pub async fn run(args: UploadArgs, ctx: &Context) -> Result<()> {
    let files = expand_inputs(&args.files, ctx)?;
    if files.is_empty() {
        bail!("No image files found in: {}", args.files.join(", "));
    }

    let mut store = ctx.build_store()?;
    let mut pipeline = EnrichmentPipeline::new(ctx.build_analyzer()?);

    ctx.output.header("Upload Massal");
    ctx.output.kv("Files", &files.len().to_string());
    ctx.output.kv("Model", &pipeline.analyzer().config().model);

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt(format!("Analyze {} photo(s)?", files.len()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Upload cancelled");
            return Ok(());
        }
    }

    let report = run_batch(&mut pipeline, &mut store, &files, ctx).await;

    if let Some(ref path) = args.output {
        export_catalog(&store, &ctx.resolve_path(path), ctx)?;
    }

    if ctx.output.is_json() {
        ctx.output.json(&BatchSummary::from_report(&report, &store));
        return Ok(());
    }

    print_catalog(&store, ctx);
    Ok(())
}

/// Run one batch with a progress bar and print its report.
pub async fn run_batch(
    pipeline: &mut EnrichmentPipeline<GeminiAnalyzer>,
    store: &mut CatalogStore,
    files: &[PathBuf],
    ctx: &Context,
) -> BatchReport {
    let mut progress = BarProgress::new(ctx.output.progress(files.len() as u64, "Menganalisis..."));
    let report = pipeline.run(store, files, &mut progress).await;
    print_report(&report, ctx);
    report
}

/// Expand directories to the image files they contain, sorted by name.
/// Plain file arguments are kept as given; unreadable ones are reported by
/// the batch.
pub fn expand_inputs(inputs: &[String], ctx: &Context) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = ctx.resolve_path(input);
        if !path.is_dir() {
            files.push(path);
            continue;
        }

        let mut found = Vec::new();
        for entry in fs::read_dir(&path)
            .with_context(|| format!("Failed to read directory: {}", path.display()))?
        {
            let entry_path = entry?.path();
            if entry_path.is_file() && has_image_extension(&entry_path) {
                found.push(entry_path);
            }
        }
        found.sort();
        ctx.output
            .debug(&format!("{}: {} image(s)", path.display(), found.len()));
        files.extend(found);
    }

    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

/// Write the whole catalog as a JSON array.
pub fn export_catalog(store: &CatalogStore, path: &Path, ctx: &Context) -> Result<()> {
    let content = serde_json::to_string_pretty(store.products())?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write catalog: {}", path.display()))?;
    ctx.output.success(&format!(
        "Saved {} product(s) to {}",
        store.len(),
        path.display()
    ));
    Ok(())
}

fn print_report(report: &BatchReport, ctx: &Context) {
    for skipped in &report.skipped {
        ctx.output.warn(&format!(
            "Skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        ));
    }

    if report.is_noop() {
        ctx.output
            .warn(&format!("No products added from {} file(s)", report.total));
    } else {
        ctx.output.success(&format!(
            "{} of {} photo(s) added to the catalog",
            report.added.len(),
            report.total
        ));
    }
}

/// Drives an indicatif bar from pipeline progress events.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl ProgressObserver for BarProgress {
    fn on_start(&mut self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn on_state_change(&mut self, state: PipelineState) {
        if let PipelineState::Running { current, .. } = state {
            self.bar.set_position(current.saturating_sub(1) as u64);
        }
    }

    fn on_advance(&mut self, _current: usize, _total: usize, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.bar.set_message(format!("Menganalisis {}", name));
    }

    fn on_finish(&mut self, report: &BatchReport) {
        self.bar.set_position(report.total as u64);
        self.bar.finish_and_clear();
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchSummary {
    total: usize,
    added: Vec<String>,
    skipped: Vec<SkippedSummary>,
    catalog_size: usize,
}

#[derive(Debug, Serialize)]
struct SkippedSummary {
    path: String,
    reason: String,
}

impl BatchSummary {
    fn from_report(report: &BatchReport, store: &CatalogStore) -> Self {
        Self {
            total: report.total,
            added: report.added.iter().map(|id| id.to_string()).collect(),
            skipped: report
                .skipped
                .iter()
                .map(|s| SkippedSummary {
                    path: s.path.display().to_string(),
                    reason: s.reason.to_string(),
                })
                .collect(),
            catalog_size: store.len(),
        }
    }
}
