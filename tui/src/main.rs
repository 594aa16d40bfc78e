use std::{
    env,
    fs::OpenOptions,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use env_logger::{Env, Target};
use log::info;
use model::Booster;
use pricing::{AppConfig, Pipeline};

use crate::state::form::{FormState, SharedModel};

mod app;
mod state;
mod ui;

/// Sends log records to a file, the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref())?;

    init_logging(&config.log_file)?;
    info!("config resolved: {}", config.summary());

    let booster = Booster::load(&config.model_path)
        .with_context(|| format!("cannot load model '{}'", config.model_path.display()))?;
    let model: SharedModel = Arc::new(booster);
    let pipeline = Pipeline::new(model, config.output_scale)?;

    app::run::run(FormState::new(pipeline, config.form))
}
