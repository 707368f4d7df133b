use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    EnvFilter,
};

use crate::core::config::logging::{Console, Logging};

/// Installs the global tracing subscriber.
///
/// Console output goes to the configured stream, stderr by default, so
/// stdout stays reserved for program output. If file output is enabled a
/// daily rolling file is written as well; when that cannot be set up,
/// logging falls back to the console only. The returned guard flushes the
/// file writer on drop and must be held for the lifetime of the program.
///
/// # Errors
///
/// Returns an error if no global subscriber could be installed.
#[tracing::instrument(level = "debug")]
pub fn setup_logging(config: &Logging) -> Result<Option<WorkerGuard>> {
    if config.file_output {
        match try_setup_file_logging(config) {
            Ok(guard) => return Ok(Some(guard)),
            Err(e) => {
                eprintln!("Warning: Could not set up file logging ({e:#}), using console only");
            }
        }
    }
    setup_console_logging(config.console)?;
    Ok(None)
}

fn console_writer(console: Console) -> BoxMakeWriter {
    match console {
        Console::Stderr => BoxMakeWriter::new(std::io::stderr),
        Console::Stdout => BoxMakeWriter::new(std::io::stdout),
        Console::Off => BoxMakeWriter::new(std::io::sink),
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[tracing::instrument(level = "debug")]
fn setup_console_logging(console: Console) -> Result<()> {
    let subscriber = tracing_subscriber::registry().with(env_filter()).with(
        fmt::Layer::new()
            .with_writer(console_writer(console))
            .with_thread_names(true)
            .with_ansi(console != Console::Off),
    );

    tracing::subscriber::set_global_default(subscriber)
        .with_context(|| format!("Failed to set up {console} logging"))?;

    Ok(())
}

#[tracing::instrument(level = "debug")]
fn try_setup_file_logging(config: &Logging) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.directory).with_context(|| {
        format!(
            "Failed to create log directory '{}'",
            config.directory.display()
        )
    })?;
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::Layer::new()
                .with_writer(console_writer(config.console))
                .with_thread_names(true)
                .with_ansi(config.console != Console::Off),
        )
        .with(
            fmt::Layer::new()
                .with_writer(non_blocking)
                .with_thread_names(true)
                .with_line_number(true)
                .fmt_fields(fmt::format::PrettyFields::new())
                .with_ansi(false),
        );

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set up file logging")?;

    Ok(guard)
}
