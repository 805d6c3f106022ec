// Logging setup on tracing-subscriber.
//
// Workspace crates log through the `log` facade; `tracing_log::LogTracer`
// forwards those records into the subscriber installed by `init_logging`.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use sheetful_configs::LoggingSettings;
use tracing::Subscriber;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Dependencies whose info-level output drowns request logs.
const QUIET_TARGETS: &[&str] = &[
    "actix_server",
    "actix_web",
    "h2",
    "hyper",
    "hyper_util",
    "reqwest",
    "rustls",
    "tracing",
];

/// Encoding of the file sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One human-readable line per event
    Compact,
    /// JSON Lines with span lists
    Json,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") || s.eq_ignore_ascii_case("jsonl") {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// `EnvFilter` directives: base level, quiet dependencies at `warn`, then
/// per-target overrides, which win over both.
fn filter_directives(settings: &LoggingSettings) -> String {
    let mut targets: Vec<(&String, &String)> = settings.targets.iter().collect();
    targets.sort();

    std::iter::once(settings.level.clone())
        .chain(QUIET_TARGETS.iter().map(|target| format!("{}=warn", target)))
        .chain(targets.into_iter().map(|(target, level)| format!("{}={}", target, level)))
        .collect::<Vec<_>>()
        .join(",")
}

fn build_env_filter(settings: &LoggingSettings) -> anyhow::Result<EnvFilter> {
    let directives = filter_directives(settings);
    EnvFilter::try_new(&directives)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", directives, e))
}

/// Path of the server log inside `logs_path`.
pub fn server_log_path(settings: &LoggingSettings) -> PathBuf {
    Path::new(&settings.logs_path).join("server.log")
}

fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}

fn file_layer<S>(
    file: File,
    settings: &LoggingSettings,
) -> anyhow::Result<Box<dyn Layer<S> + Send + Sync>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let filter = build_env_filter(settings)?;
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(file)
        .with_target(true)
        .with_thread_names(true);

    Ok(match LogFormat::parse(&settings.format) {
        LogFormat::Json => layer
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_span_list(true)
            .with_filter(filter)
            .boxed(),
        LogFormat::Compact => layer.with_ansi(false).with_filter(filter).boxed(),
    })
}

/// Install the global subscriber: a file sink under `logs_path` plus an
/// optional ANSI console sink, each with its own filter.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    let path = server_log_path(settings);
    let file = open_log_file(&path)?;

    // Already installed in tests; keep going
    tracing_log::LogTracer::init().ok();

    let console_layer = if settings.log_to_console {
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_thread_names(true)
                .with_filter(build_env_filter(settings)?),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer(file, settings)?)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    tracing::trace!(
        level = %settings.level,
        console = settings.log_to_console,
        file = %path.display(),
        "logging initialized"
    );
    Ok(())
}
