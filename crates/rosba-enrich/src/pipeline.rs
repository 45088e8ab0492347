//! Batch enrichment: uploaded photos -> new catalog records.

use std::path::{Path, PathBuf};

use rosba_catalog::{CatalogStore, Product, ProductId};

use crate::analyzer::Analyzer;
use crate::error::{AnalyzeError, ReadError};
use crate::image::read_image;
use crate::normalize::normalize;
use crate::progress::ProgressObserver;

/// Where the pipeline is in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// No batch running.
    #[default]
    Idle,
    /// Working on file `current` (1-based) of `total`.
    Running { current: usize, total: usize },
}

/// Why a file produced no record.
#[derive(Debug, thiserror::Error)]
pub enum SkipReason {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
}

/// A file that was skipped, and why.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of one batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of files in the batch.
    pub total: usize,
    /// Ids of the records added to the catalog, in input order.
    pub added: Vec<ProductId>,
    /// Files that produced no record.
    pub skipped: Vec<SkippedFile>,
}

impl BatchReport {
    /// Whether the batch left the catalog unchanged.
    pub fn is_noop(&self) -> bool {
        self.added.is_empty()
    }
}

fn system_clock_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Runs upload batches against an [`Analyzer`].
///
/// Files are processed one at a time in input order: each file is read, then
/// analyzed, before the next file is touched. Records are collected for the
/// whole batch and prepended to the store as one block at the end. Failures
/// skip the file and never abort the batch.
///
/// `run` borrows the pipeline mutably, so a second batch cannot start while
/// one is running.
pub struct EnrichmentPipeline<A> {
    analyzer: A,
    state: PipelineState,
    clock: fn() -> i64,
    last_stamp: Option<i64>,
}

impl<A: Analyzer> EnrichmentPipeline<A> {
    /// Create an idle pipeline.
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer,
            state: PipelineState::Idle,
            clock: system_clock_ms,
            last_stamp: None,
        }
    }

    /// Replace the millisecond clock used to stamp record ids.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Current state.
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// The analyzer in use.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Process `files` and prepend every successfully analyzed record to `store`.
    pub async fn run<F: AsRef<Path>>(
        &mut self,
        store: &mut CatalogStore,
        files: &[F],
        progress: &mut dyn ProgressObserver,
    ) -> BatchReport {
        let total = files.len();
        if total == 0 {
            return BatchReport::default();
        }

        let stamp = self.next_batch_stamp(store, total);
        tracing::info!(total, stamp, analyzer = self.analyzer.name(), "starting upload batch");
        progress.on_start(total);

        let mut accumulated: Vec<Product> = Vec::new();
        let mut skipped = Vec::new();

        for (index, file) in files.iter().enumerate() {
            let path = file.as_ref();
            let current = index + 1;
            self.transition(PipelineState::Running { current, total }, progress);
            progress.on_advance(current, total, path);

            match self.process(path, ProductId::for_batch(stamp, index)).await {
                Ok(product) => {
                    tracing::debug!(path = %path.display(), id = %product.id, name = %product.name, "analyzed file");
                    accumulated.push(product);
                }
                Err(reason) => {
                    tracing::warn!(path = %path.display(), error = %reason, "skipping file");
                    skipped.push(SkippedFile {
                        path: path.to_path_buf(),
                        reason,
                    });
                }
            }
        }

        let added: Vec<ProductId> = accumulated.iter().map(|p| p.id.clone()).collect();
        if !accumulated.is_empty() {
            store.prepend_products(accumulated);
            tracing::info!(added = added.len(), skipped = skipped.len(), "committed upload batch");
        } else {
            tracing::info!(skipped = skipped.len(), "upload batch produced no records");
        }

        self.transition(PipelineState::Idle, progress);
        let report = BatchReport {
            total,
            added,
            skipped,
        };
        progress.on_finish(&report);
        report
    }

    fn transition(&mut self, state: PipelineState, progress: &mut dyn ProgressObserver) {
        self.state = state;
        progress.on_state_change(state);
    }

    async fn process(&self, path: &Path, id: ProductId) -> Result<Product, SkipReason> {
        let image = read_image(path).await?;
        let result = self.analyzer.analyze(&image).await?;
        Ok(normalize(result, id, image.data_url()))
    }

    /// Pick a stamp later than any this pipeline used before, and whose ids
    /// for this batch are all free in `store`.
    fn next_batch_stamp(&mut self, store: &CatalogStore, total: usize) -> i64 {
        let mut stamp = (self.clock)();
        if let Some(last) = self.last_stamp {
            stamp = stamp.max(last + 1);
        }
        while (0..total).any(|i| store.contains(&ProductId::for_batch(stamp, i))) {
            stamp += 1;
        }
        self.last_stamp = Some(stamp);
        stamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisResult;
    use crate::image::EncodedImage;
    use async_trait::async_trait;
    use rosba_catalog::{Category, Rupiah};
    use std::collections::HashSet;
    use std::sync::Mutex;

    const STAMP: i64 = 1_718_000_000_000;

    fn fixed_clock() -> i64 {
        STAMP
    }

    /// Succeeds for every file except those named in `fail`, and records call order.
    struct ScriptedAnalyzer {
        fail: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedAnalyzer {
        fn failing_on(fail: Vec<&'static str>) -> Self {
            Self {
                fail,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Analyzer for ScriptedAnalyzer {
        async fn analyze(&self, image: &EncodedImage) -> Result<AnalysisResult, AnalyzeError> {
            self.calls.lock().unwrap().push(image.file_name.clone());
            if self.fail.contains(&image.file_name.as_str()) {
                return Err(AnalyzeError::Http {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(AnalysisResult {
                name: Some(format!("Kitab {}", image.file_name)),
                category: Some("Fiqh".to_string()),
                ..Default::default()
            })
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        started: Option<usize>,
        advances: Vec<(usize, usize)>,
        states: Vec<PipelineState>,
        finished: Option<(usize, usize)>,
    }

    impl ProgressObserver for RecordingProgress {
        fn on_start(&mut self, total: usize) {
            self.started = Some(total);
        }

        fn on_state_change(&mut self, state: PipelineState) {
            self.states.push(state);
        }

        fn on_advance(&mut self, current: usize, total: usize, _path: &Path) {
            self.advances.push((current, total));
        }

        fn on_finish(&mut self, report: &BatchReport) {
            self.finished = Some((report.added.len(), report.skipped.len()));
        }
    }

    fn write_files(dir: &tempfile::TempDir, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = dir.path().join(name);
                std::fs::write(&path, b"\xFF\xD8\xFF\xE0fake-jpeg").unwrap();
                path
            })
            .collect()
    }

    fn pipeline(fail: Vec<&'static str>) -> EnrichmentPipeline<ScriptedAnalyzer> {
        EnrichmentPipeline::new(ScriptedAnalyzer::failing_on(fail)).with_clock(fixed_clock)
    }

    #[tokio::test]
    async fn test_failure_in_middle_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_files(&dir, &["1.jpg", "2.jpg", "3.jpg"]);
        let mut store = CatalogStore::with_seed();
        let mut pipeline = pipeline(vec!["2.jpg"]);

        let report = pipeline.run(&mut store, &files, &mut ()).await;

        assert_eq!(report.total, 3);
        assert_eq!(report.added.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, files[1]);
        assert!(matches!(report.skipped[0].reason, SkipReason::Analyze(_)));

        let names: Vec<&str> = store.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Kitab 1.jpg", "Kitab 3.jpg", "Kitab Fathul Qorib (Contoh)"]
        );
        assert_eq!(store.products()[0].id.as_str(), "1718000000000-0");
        assert_eq!(store.products()[1].id.as_str(), "1718000000000-2");
    }

    #[tokio::test]
    async fn test_progress_reaches_total_despite_failures() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_files(&dir, &["a.jpg", "b.jpg", "c.jpg", "d.jpg"]);
        let mut store = CatalogStore::new();
        let mut pipeline = pipeline(vec!["a.jpg", "c.jpg"]);
        let mut progress = RecordingProgress::default();

        let report = pipeline.run(&mut store, &files, &mut progress).await;

        assert_eq!(progress.started, Some(4));
        assert_eq!(progress.advances, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
        assert_eq!(progress.finished, Some((2, 2)));
        assert_eq!(pipeline.state(), PipelineState::Idle);

        let ids: HashSet<&ProductId> = report.added.iter().collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_observer_sees_each_state() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_files(&dir, &["1.jpg", "2.jpg", "3.jpg"]);
        let mut store = CatalogStore::new();
        let mut pipeline = pipeline(vec!["2.jpg"]);
        let mut progress = RecordingProgress::default();

        pipeline.run(&mut store, &files, &mut progress).await;

        assert_eq!(
            progress.states,
            vec![
                PipelineState::Running { current: 1, total: 3 },
                PipelineState::Running { current: 2, total: 3 },
                PipelineState::Running { current: 3, total: 3 },
                PipelineState::Idle,
            ]
        );
        assert_eq!(pipeline.state(), PipelineState::Idle);
    }

    #[tokio::test]
    async fn test_files_are_analyzed_sequentially_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_files(&dir, &["z.jpg", "a.jpg", "m.jpg"]);
        let mut store = CatalogStore::new();
        let mut pipeline = pipeline(vec![]);

        pipeline.run(&mut store, &files, &mut ()).await;

        assert_eq!(pipeline.analyzer().calls(), vec!["z.jpg", "a.jpg", "m.jpg"]);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = write_files(&dir, &["ok.jpg"]);
        files.insert(0, dir.path().join("missing.jpg"));
        let mut store = CatalogStore::new();
        let mut pipeline = pipeline(vec![]);

        let report = pipeline.run(&mut store, &files, &mut ()).await;

        assert_eq!(report.added.len(), 1);
        assert!(matches!(report.skipped[0].reason, SkipReason::Read(_)));
        // The missing file never reached the analyzer.
        assert_eq!(pipeline.analyzer().calls(), vec!["ok.jpg"]);
        assert_eq!(store.products()[0].id.as_str(), "1718000000000-1");
    }

    #[tokio::test]
    async fn test_all_failures_leave_catalog_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_files(&dir, &["x.jpg", "y.jpg"]);
        let mut store = CatalogStore::with_seed();
        let before = store.products().to_vec();
        let mut pipeline = pipeline(vec!["x.jpg", "y.jpg"]);

        let report = pipeline.run(&mut store, &files, &mut ()).await;

        assert!(report.is_noop());
        assert_eq!(store.products(), before.as_slice());
        assert_eq!(pipeline.state(), PipelineState::Idle);
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        let mut store = CatalogStore::with_seed();
        let mut pipeline = pipeline(vec![]);
        let mut progress = RecordingProgress::default();
        let files: Vec<PathBuf> = Vec::new();

        let report = pipeline.run(&mut store, &files, &mut progress).await;

        assert_eq!(report.total, 0);
        assert!(progress.started.is_none());
        assert!(progress.states.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_ids_stay_unique_across_batches() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_files(&dir, &["1.jpg", "2.jpg"]);
        let mut store = CatalogStore::new();
        let mut pipeline = pipeline(vec![]);

        pipeline.run(&mut store, &files, &mut ()).await;
        pipeline.run(&mut store, &files, &mut ()).await;

        let ids: HashSet<&str> = store.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 4);
        // The second batch is stamped one millisecond later and lands on top.
        assert_eq!(store.products()[0].id.as_str(), "1718000000001-0");
    }

    #[tokio::test]
    async fn test_records_use_defaults_and_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_files(&dir, &["cover.jpg"]);
        let mut store = CatalogStore::new();
        let mut pipeline = pipeline(vec![]);

        pipeline.run(&mut store, &files, &mut ()).await;

        let record = &store.products()[0];
        assert!(record.category.is(Category::Fiqh));
        assert_eq!(record.price, Rupiah::new(45000));
        assert_eq!(record.wholesale_price, Rupiah::new(36000));
        assert_eq!(record.min_wholesale, 10);
        assert!(record.image.starts_with("data:image/jpeg;base64,"));
    }
}
