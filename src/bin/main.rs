use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use bptrust::{
    core::{
        config::Config,
        form::{Field, MeasurementForm},
        store::MemoryStore,
    },
    logging::setup_logging,
    view::{Section, ViewModel},
};
use chrono::Local;
use itertools::Itertools;
use strum::IntoEnumIterator;
use tracing::info;

const DEFAULT_CONFIG: &str = "./bptrust.toml";

fn main() {
    if let Err(e) = run() {
        eprintln!("bptrust failed: {e:#}");
        std::process::exit(1);
    }
}

/// `bptrust [CONFIG] [SYSTOLIC DIASTOLIC HEART_RATE]`
fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, values) = match args.len() {
        0 => (PathBuf::from(DEFAULT_CONFIG), &args[..]),
        1 | 4 => (PathBuf::from(&args[0]), &args[1..]),
        3 => (PathBuf::from(DEFAULT_CONFIG), &args[..]),
        _ => bail!("Usage: bptrust [CONFIG] [SYSTOLIC DIASTOLIC HEART_RATE]"),
    };

    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("Failed to load config '{}'", config_path.display()))?;
    let _guard = setup_logging(&config.logging).context("Failed to set up logging")?;
    info!("Starting bptrust with config {}", config_path.display());

    let store = MemoryStore::with_measurements(
        config
            .store
            .initial_measurements(Local::now().naive_local()),
    );
    let mut view_model = ViewModel::new(store, config.appearance.clone());

    if !values.is_empty() {
        let mut form = MeasurementForm::new();
        for (field, text) in Field::iter().zip(values) {
            form.set(field, text)?;
        }
        view_model.submit(form);
    }

    for section in view_model.sections() {
        println!("{}", render(&section));
    }
    info!(
        "Listed {} measurements at version {}",
        view_model.data().len(),
        view_model.version()
    );
    Ok(())
}

fn render(section: &Section) -> String {
    let rows = section
        .rows
        .iter()
        .map(|row| {
            format!(
                "  {}  {:>9}  hr {:>3}  {}",
                row.time,
                row.pressure,
                row.heart_rate,
                row.color.to_hex()
            )
        })
        .join("\n");
    format!("{}\n{rows}", section.header)
}
