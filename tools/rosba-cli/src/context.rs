//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use rosba_catalog::catalog::seed::load_products_file;
use rosba_catalog::CatalogStore;
use rosba_enrich::GeminiAnalyzer;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// `--catalog` override for the starting products.
    pub catalog_override: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        catalog_override: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve_against(&cwd, Path::new(path));
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        let catalog_override = catalog_override.map(|p| resolve_against(&cwd, Path::new(&p)));

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
            catalog_override,
        })
    }

    /// Build the in-memory store: `--catalog` file, else `[catalog] seed_file`,
    /// else the built-in sample.
    pub fn build_store(&self) -> Result<CatalogStore> {
        let seed_file = self.catalog_override.clone().or_else(|| {
            self.config
                .catalog
                .seed_file
                .as_deref()
                .map(|p| self.resolve_seed_path(p))
        });

        let Some(path) = seed_file else {
            return Ok(CatalogStore::with_seed());
        };

        tracing::debug!(path = %path.display(), "Loading catalog file");
        let products = load_products_file(&path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
        Ok(CatalogStore::from_products(products)?)
    }

    /// Build the Gemini analyzer from the `[analyzer]` section.
    pub fn build_analyzer(&self) -> Result<GeminiAnalyzer> {
        let config = self.config.analyzer.to_gemini_config()?;
        GeminiAnalyzer::new(config).context("Failed to create analyzer")
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_against(&self.cwd, Path::new(path))
    }

    /// Seed files named in a config file are relative to that file.
    fn resolve_seed_path(&self, path: &Path) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(&self.cwd);
        resolve_against(base, path)
    }
}

/// Find a config file in the directory tree, starting at `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path, config: CliConfig, config_path: Option<PathBuf>) -> Context {
        Context {
            config,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
            config_path,
            catalog_override: None,
        }
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".rosba.toml"), "").unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(found, dir.path().join(".rosba.toml"));
    }

    #[test]
    fn test_default_store_is_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), CliConfig::default(), None);

        let store = ctx.build_store().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.products()[0].id.as_str(), "sample-1");
    }

    #[test]
    fn test_seed_file_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("catalog.json"),
            r#"[{"id":"k-1","name":"Jurumiyah","category":"Nahwu","description":"",
                "price":20000,"wholesalePrice":16000,"minWholesale":10,"image":"","rating":5}]"#,
        )
        .unwrap();

        let mut config = CliConfig::default();
        config.catalog.seed_file = Some(PathBuf::from("catalog.json"));
        let ctx = context_in(
            Path::new("/"),
            config,
            Some(dir.path().join("rosba.toml")),
        );

        let store = ctx.build_store().unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.products()[0].name, "Jurumiyah");
    }

    #[test]
    fn test_missing_catalog_override_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_in(dir.path(), CliConfig::default(), None);
        ctx.catalog_override = Some(dir.path().join("missing.json"));

        let err = ctx.build_store().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load catalog"));
    }
}
