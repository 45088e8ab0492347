//! Interactive storefront session.
//!
//! One in-memory store lives for the whole session, so uploaded products stay
//! visible until the session ends.

use anyhow::{bail, Result};
use dialoguer::{Input, Select};
use rosba_catalog::{CatalogStore, CategoryFilter};
use rosba_enrich::{EnrichmentPipeline, GeminiAnalyzer};

use super::list::{parse_filter, print_catalog};
use super::show::print_detail;
use super::upload::{expand_inputs, export_catalog, run_batch};
use super::BrowseArgs;
use crate::context::Context;
use crate::storefront;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Search,
    Filter,
    Detail,
    Upload,
    ShowCatalog,
    Contact,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 7] = [
        MenuAction::Search,
        MenuAction::Filter,
        MenuAction::Detail,
        MenuAction::Upload,
        MenuAction::ShowCatalog,
        MenuAction::Contact,
        MenuAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuAction::Search => "Cari kitab",
            MenuAction::Filter => "Pilih kategori",
            MenuAction::Detail => "Lihat detail kitab",
            MenuAction::Upload => "Upload massal (foto)",
            MenuAction::ShowCatalog => "Tampilkan katalog",
            MenuAction::Contact => "Hubungi toko",
            MenuAction::Quit => "Keluar",
        }
    }
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("browse is interactive and does not support --json");
    }

    let mut store = ctx.build_store()?;
    if let Some(ref label) = args.category {
        store.set_filter(parse_filter(label)?);
    }

    let mut pipeline: Option<EnrichmentPipeline<GeminiAnalyzer>> = None;

    ctx.output.header(&format!(
        "{} - {}",
        ctx.config.store.name, ctx.config.store.location
    ));
    print_catalog(&store, ctx);

    let labels: Vec<&str> = MenuAction::ALL.iter().map(MenuAction::label).collect();
    loop {
        println!();
        let selection = Select::new()
            .with_prompt(format!(
                "Kategori: {} | Cari: {}",
                store.filter(),
                display_term(store.search_term())
            ))
            .items(&labels)
            .default(0)
            .interact()?;

        match MenuAction::ALL[selection] {
            MenuAction::Search => search(&mut store, ctx)?,
            MenuAction::Filter => choose_filter(&mut store, ctx)?,
            MenuAction::Detail => open_detail(&store, ctx)?,
            MenuAction::Upload => upload(&mut store, &mut pipeline, ctx).await?,
            MenuAction::ShowCatalog => print_catalog(&store, ctx),
            MenuAction::Contact => contact(ctx)?,
            MenuAction::Quit => break,
        }
    }

    if let Some(ref path) = args.output {
        export_catalog(&store, &ctx.resolve_path(path), ctx)?;
    }

    Ok(())
}

fn display_term(term: &str) -> &str {
    if term.is_empty() {
        "-"
    } else {
        term
    }
}

fn search(store: &mut CatalogStore, ctx: &Context) -> Result<()> {
    let term: String = Input::new()
        .with_prompt("Cari judul kitab (kosongkan untuk semua)")
        .allow_empty(true)
        .with_initial_text(store.search_term())
        .interact_text()?;

    // A non-empty term brings the catalog into view.
    if store.set_search_term(term.trim()) {
        print_catalog(store, ctx);
    }
    Ok(())
}

fn choose_filter(store: &mut CatalogStore, ctx: &Context) -> Result<()> {
    let choices = CategoryFilter::choices();
    let labels: Vec<&str> = choices.iter().map(CategoryFilter::label).collect();
    let current = choices
        .iter()
        .position(|c| *c == store.filter())
        .unwrap_or(choices.len() - 1);

    let selection = Select::new()
        .with_prompt("Kategori")
        .items(&labels)
        .default(current)
        .interact()?;

    store.set_filter(choices[selection]);
    print_catalog(store, ctx);
    Ok(())
}

fn open_detail(store: &CatalogStore, ctx: &Context) -> Result<()> {
    let visible = store.visible_products();
    if visible.is_empty() {
        ctx.output.info("Tidak ada kitab yang cocok.");
        return Ok(());
    }

    let items: Vec<String> = visible
        .iter()
        .map(|p| format!("{} ({})", p.name, p.price.display()))
        .collect();
    let selection = Select::new()
        .with_prompt("Pilih kitab")
        .items(&items)
        .default(0)
        .interact()?;

    print_detail(visible[selection], ctx)
}

async fn upload(
    store: &mut CatalogStore,
    pipeline: &mut Option<EnrichmentPipeline<GeminiAnalyzer>>,
    ctx: &Context,
) -> Result<()> {
    let input: String = Input::new()
        .with_prompt("File atau folder foto (pisahkan dengan spasi)")
        .allow_empty(true)
        .interact_text()?;

    let inputs: Vec<String> = input.split_whitespace().map(str::to_string).collect();
    if inputs.is_empty() {
        return Ok(());
    }

    let files = expand_inputs(&inputs, ctx)?;
    if files.is_empty() {
        ctx.output.warn("Tidak ada foto yang ditemukan.");
        return Ok(());
    }

    // The analyzer is only needed once the first batch runs.
    if pipeline.is_none() {
        *pipeline = Some(EnrichmentPipeline::new(ctx.build_analyzer()?));
    }

    if let Some(pipeline) = pipeline.as_mut() {
        let report = run_batch(pipeline, store, &files, ctx).await;
        if !report.is_noop() {
            print_catalog(store, ctx);
        }
    }
    Ok(())
}

fn contact(ctx: &Context) -> Result<()> {
    let store = &ctx.config.store;
    ctx.output.kv("WhatsApp", storefront::inquiry_link(store)?.as_str());
    ctx.output.kv("Instagram", &store.instagram_url);
    ctx.output.kv("Lokasi", &store.location);
    Ok(())
}
