//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use reqwest::Url;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, LogFormat, CONFIG_FILE_NAMES};
use crate::context::{find_config_file, Context};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    config.analyzer.api_key = config.analyzer.api_key.as_deref().map(mask_secret);

    if ctx.output.is_json() {
        ctx.output.json(&config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("name", &config.store.name);
    ctx.output.kv("whatsapp_number", &config.store.whatsapp_number);
    ctx.output.kv("instagram_url", &config.store.instagram_url);
    ctx.output.kv("location", &config.store.location);

    ctx.output.info("");
    ctx.output.info("[analyzer]");
    ctx.output.kv("model", &config.analyzer.model);
    ctx.output.kv("endpoint", &config.analyzer.endpoint);
    let key_source = match config.analyzer.api_key {
        Some(ref masked) => masked.clone(),
        None if ctx.config.analyzer.resolve_api_key().is_some() => "(from environment)".to_string(),
        None => "(not set)".to_string(),
    };
    ctx.output.kv("api_key", &key_source);
    ctx.output.kv("timeout_secs", &config.analyzer.timeout_secs.to_string());

    ctx.output.info("");
    ctx.output.info("[catalog]");
    match config.catalog.seed_file {
        Some(ref path) => ctx.output.kv("seed_file", &path.display().to_string()),
        None => ctx.output.kv("seed_file", "(built-in sample)"),
    }

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("format", log_format_name(config.logging.format));
    ctx.output.kv("level", &config.logging.level);

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = match ctx.config_path {
        Some(ref path) => path.clone(),
        None => match find_config_file(&ctx.cwd) {
            Some(path) => path,
            None => bail!("No config file found. Run `rosba config init` to create one."),
        },
    };

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = generate_default_config(&ctx.config.store.name);
    fs::write(&config_path, content)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(ctx);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn check_config(ctx: &Context) -> (Vec<String>, Vec<String>) {
    let config = &ctx.config;
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if config.store.name.trim().is_empty() {
        errors.push("store.name is required".to_string());
    }

    if !config.store.whatsapp_number.chars().any(|c| c.is_ascii_digit()) {
        errors.push("store.whatsapp_number must contain digits".to_string());
    } else if config.store.whatsapp_number.starts_with('0') {
        warnings.push(
            "store.whatsapp_number should use the country code (e.g., 62...) instead of a leading 0"
                .to_string(),
        );
    }

    if Url::parse(&config.store.instagram_url).is_err() {
        errors.push(format!(
            "store.instagram_url '{}' is not a valid URL",
            config.store.instagram_url
        ));
    }

    if Url::parse(&config.analyzer.endpoint).is_err() {
        errors.push(format!(
            "analyzer.endpoint '{}' is not a valid URL",
            config.analyzer.endpoint
        ));
    }

    if config.analyzer.timeout_secs == 0 {
        errors.push("analyzer.timeout_secs must be greater than 0".to_string());
    }

    if config.analyzer.resolve_api_key().is_none() {
        warnings.push("No analyzer API key; `rosba upload` will fail".to_string());
    }

    if let Some(ref seed) = config.catalog.seed_file {
        let base = ctx
            .config_path
            .as_deref()
            .and_then(|p| p.parent())
            .map(PathBuf::from)
            .unwrap_or_else(|| ctx.cwd.clone());
        let path = if seed.is_absolute() {
            seed.clone()
        } else {
            base.join(seed)
        };
        if !path.is_file() {
            errors.push(format!("catalog.seed_file not found: {}", path.display()));
        }
    }

    if tracing_subscriber::EnvFilter::try_new(&config.logging.level).is_err() {
        errors.push(format!(
            "logging.level '{}' is not a valid filter",
            config.logging.level
        ));
    }

    (errors, warnings)
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "name"] => Ok(config.store.name.clone()),
        ["store", "whatsapp_number"] => Ok(config.store.whatsapp_number.clone()),
        ["store", "instagram_url"] => Ok(config.store.instagram_url.clone()),
        ["store", "location"] => Ok(config.store.location.clone()),
        ["analyzer", "model"] => Ok(config.analyzer.model.clone()),
        ["analyzer", "endpoint"] => Ok(config.analyzer.endpoint.clone()),
        ["analyzer", "api_key"] => Ok(config
            .analyzer
            .api_key
            .as_deref()
            .map(mask_secret)
            .unwrap_or_else(|| "null".to_string())),
        ["analyzer", "timeout_secs"] => Ok(config.analyzer.timeout_secs.to_string()),
        ["catalog", "seed_file"] => Ok(config
            .catalog
            .seed_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "null".to_string())),
        ["logging", "format"] => Ok(log_format_name(config.logging.format).to_string()),
        ["logging", "level"] => Ok(config.logging.level.clone()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "name"] => config.store.name = value.to_string(),
        ["store", "whatsapp_number"] => config.store.whatsapp_number = value.to_string(),
        ["store", "instagram_url"] => config.store.instagram_url = value.to_string(),
        ["store", "location"] => config.store.location = value.to_string(),
        ["analyzer", "model"] => config.analyzer.model = value.to_string(),
        ["analyzer", "endpoint"] => config.analyzer.endpoint = value.to_string(),
        ["analyzer", "api_key"] => config.analyzer.api_key = Some(value.to_string()),
        ["analyzer", "timeout_secs"] => config.analyzer.timeout_secs = value.parse()?,
        ["catalog", "seed_file"] => config.catalog.seed_file = Some(PathBuf::from(value)),
        ["logging", "format"] => {
            config.logging.format = match value {
                "human" => LogFormat::Human,
                "json" => LogFormat::Json,
                other => bail!("logging.format must be 'human' or 'json', got '{}'", other),
            }
        }
        ["logging", "level"] => config.logging.level = value.to_string(),
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn log_format_name(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Human => "human",
        LogFormat::Json => "json",
    }
}

/// Keep the last four characters of a secret.
fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{}", tail)
}
