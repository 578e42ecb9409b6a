//! Table Script Example
//!
//! Renders the initialization script of a two-column sample table:
//!
//! 1. Load the runtime configuration (`tessera.toml`, locale files, `TESSERA_*`)
//! 2. Resolve the option group template for the requested locale
//! 3. Apply per-table and per-column options on top of it
//! 4. Seed the configuration, compose the enabled extensions and print
//!
//! # Usage
//!
//! ```bash
//! cargo run --package table-script -- --locale fr_CA --group admin \
//!     --option feature.filterable=true --option plugin.scroller=true
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tessera::prelude::*;
use tessera::runtime::logging;
use tracing::{info, warn};

#[derive(Parser)]
#[command(about = "Render the initialization script of a sample table")]
struct Args {
    /// Configuration file (searched in the current and user config directories otherwise)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Locale used to pick locale specific configuration files
    #[arg(long, default_value = "en")]
    locale: String,
    /// Option group the table inherits from
    #[arg(long, default_value = "global")]
    group: String,
    /// Rebuild templates on every resolution
    #[arg(long)]
    dev: bool,
    /// Table option override, as `name=value`
    #[arg(long = "option", value_name = "NAME=VALUE")]
    options: Vec<String>,
    /// Print the resolved templates instead of the script
    #[arg(long)]
    debug_templates: bool,
}

fn parse_option(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("expected NAME=VALUE, got '{raw}'");
    };
    Ok((name.trim().to_string(), value.to_string()))
}

/// A select-filtered city column and a population column sorted descending.
fn add_sample_columns(table: &mut TableConfiguration) -> Result<()> {
    table.configure_column([
        ("title", "City"),
        ("property", "name"),
        ("filterable", "true"),
        ("filtertype", "select"),
        ("filtervalues", "['Paris','Lyon','Marseille']"),
    ])?;
    table.configure_column([
        ("title", "Population"),
        ("property", "population"),
        ("sortinitdirection", "desc"),
    ])?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.file(path);
    }
    let config = loader
        .load_locale(&args.locale)
        .context("failed to load the configuration")?;
    logging::init_from_config(&config.logging);

    let catalog = Arc::new(OptionCatalog::standard()?);
    let cache = ConfigurationTemplateCache::new(catalog.clone(), loader)
        .with_dev_mode(args.dev || config.dev_mode);
    let template = cache.resolve(&args.locale, &args.group)?;

    if args.debug_templates {
        println!("{}", serde_json::to_string_pretty(&cache.debug_snapshot())?);
        return Ok(());
    }

    let mut table = TableConfiguration::new("cities", &args.locale, &args.group, catalog, template);
    let overrides = args
        .options
        .iter()
        .map(|raw| parse_option(raw))
        .collect::<Result<Vec<_>>>()?;
    let report = table.configure(overrides)?;
    for err in &report.errors {
        warn!(error = %err, "Table option ignored");
    }

    add_sample_columns(&mut table)?;

    let mut config_map = MainConfigGenerator.generate(&table);
    let mut script = ScriptBuffer::new();
    let registry = ExtensionRegistry::discover();
    let extensions = registry.resolve_enabled(&table.enabled_extension_names(), &config.base_package);
    let composition = ExtensionComposer::process(&mut table, &extensions, &mut script, &mut config_map);
    for err in &composition.errors {
        warn!(error = %err, "Extension skipped");
    }
    info!(merged = ?composition.merged, "Extensions composed");

    println!("{}", script.render(table.id(), &config_map));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera::framework::ColumnFilteringGenerator;

    #[test]
    fn test_parse_option() {
        let (name, value) = parse_option(" feature.dom =lfrtip").unwrap();
        assert_eq!(name, "feature.dom");
        assert_eq!(value, "lfrtip");
        assert!(parse_option("feature.dom").is_err());
    }

    #[test]
    fn test_sample_filter_values_are_a_js_array() {
        let catalog = Arc::new(OptionCatalog::standard().unwrap());
        let mut table =
            TableConfiguration::new("cities", "en", "global", catalog, ConfigurationStore::new());
        add_sample_columns(&mut table).unwrap();

        let filtering = ColumnFilteringGenerator.generate(&table).unwrap().to_js();
        assert!(filtering.contains(r#""values":['Paris','Lyon','Marseille']"#));
    }
}
