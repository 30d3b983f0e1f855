use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use protoplug::model::config::AppConfig;
use protoplug::plugin::report::reports_to_toml;
use protoplug::{DirectiveError, DirectiveLine, PluginConfig, ScopeContext};

/// Resolve plugin directives found in build files.
#[derive(Debug, Parser)]
#[command(name = "protoplug", version, about)]
struct Cli {
    /// Extra config file layered over the defaults and the user config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abort on the first rejected directive.
    #[arg(long)]
    strict: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Build files to scan, in order.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Toml,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let _guard = init_logging(&config)?;

    tracing::info!(files = cli.files.len(), "protoplug starting");

    let strict = cli.strict || config.scan.strict;
    let plugins = scan_files(&cli.files, &config, strict)?;
    let reports: Vec<_> = plugins.values().map(PluginConfig::report).collect();

    match cli.format {
        Format::Text => {
            for report in &reports {
                println!("{report}");
            }
        }
        Format::Toml => print!("{}", reports_to_toml(&reports)?),
    }

    Ok(())
}

/// Initialize logging: a daily rolling file when configured, stderr otherwise.
/// `RUST_LOG` takes precedence over the configured filter.
fn init_logging(config: &AppConfig) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log.filter)
            .with_context(|| format!("invalid log filter {:?}", config.log.filter))?,
    };

    if config.log.to_file {
        let log_dir = AppConfig::log_dir();
        fs::create_dir_all(&log_dir)?;

        let file_appender = tracing_appender::rolling::daily(&log_dir, "protoplug.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_env_filter(filter)
            .init();
        return Ok(Some(guard));
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
    Ok(None)
}

fn scan_files(
    files: &[PathBuf],
    config: &AppConfig,
    strict: bool,
) -> Result<BTreeMap<String, PluginConfig>> {
    let mut plugins = BTreeMap::new();
    for path in files {
        let source =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        scan_source(path, &source, config, strict, &mut plugins)?;
    }
    Ok(plugins)
}

fn scan_source(
    path: &Path,
    source: &str,
    config: &AppConfig,
    strict: bool,
    plugins: &mut BTreeMap<String, PluginConfig>,
) -> Result<()> {
    let scope = ScopeContext::new(path.display().to_string());

    for (index, line) in source.lines().enumerate() {
        let lineno = index + 1;
        let applied = DirectiveLine::parse(line, &config.directive).and_then(|directive| {
            match directive {
                Some(directive) => apply_line(&directive, &scope, plugins),
                None => Ok(()),
            }
        });

        let Err(err) = applied else {
            continue;
        };
        if strict {
            return Err(err).with_context(|| format!("{}:{lineno}", path.display()));
        }
        tracing::warn!(
            file = %path.display(),
            line = lineno,
            kind = ?err.kind(),
            "skipping directive: {err}"
        );
    }

    Ok(())
}

/// A plugin gets a record on its first accepted directive.
fn apply_line(
    directive: &DirectiveLine<'_>,
    scope: &ScopeContext,
    plugins: &mut BTreeMap<String, PluginConfig>,
) -> Result<(), DirectiveError> {
    if let Some(plugin) = plugins.get_mut(directive.name) {
        return directive.apply_to(plugin, scope);
    }

    let mut plugin = PluginConfig::new(directive.name);
    directive.apply_to(&mut plugin, scope)?;
    plugins.insert(directive.name.to_string(), plugin);
    Ok(())
}
