//! slotgrid - slot inventory with grid navigation
//!
//! Headless host executable: replays scripted input against an inventory session

mod command_script;
mod config;
mod host;
mod input;

use anyhow::Result;
use command_script::CommandScriptPlayer;
use config::{HostConfig, DEFAULT_CONFIG_PATH};
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting slotgrid v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = HostConfig::load_from_path(&config_path);
    cli.apply(&mut config);

    if let Some(path) = &cli.write_config {
        config.save_to_path(path)?;
        info!("wrote host config to {}", path.display());
        return Ok(());
    }

    let script = cli
        .script
        .as_deref()
        .map(CommandScriptPlayer::from_path)
        .transpose()?;

    let summary = host::run(&config, script)?;
    let occupied = summary.slots.iter().filter(|v| v.label.is_some()).count();
    info!(
        steps = summary.steps,
        failed = summary.failed_steps,
        reloads = summary.reloads,
        exited = summary.exited,
        selected = summary.selected_slot,
        occupied,
        "session finished"
    );
    for message in &summary.notifications_on_screen {
        info!("still on screen: {message}");
    }
    Ok(())
}

#[derive(Debug, Default)]
struct CliOptions {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    save_dir: Option<PathBuf>,
    seed: Option<u64>,
    viewport_width: Option<u32>,
    no_sample: bool,
    event_log: Option<PathBuf>,
    write_config: Option<PathBuf>,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--script" => {
                    if let Some(path) = args.next() {
                        opts.script = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--script requires a file path");
                    }
                }
                "--save-dir" => {
                    if let Some(path) = args.next() {
                        opts.save_dir = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--save-dir requires a directory path");
                    }
                }
                "--seed" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u64>() {
                            Ok(value) => opts.seed = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--seed must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--seed requires an integer");
                    }
                }
                "--viewport-width" => {
                    if let Some(raw) = args.next() {
                        match raw.parse::<u32>() {
                            Ok(value) => opts.viewport_width = Some(value),
                            Err(err) => {
                                tracing::error!(%err, value = %raw, "--viewport-width must be an integer");
                            }
                        }
                    } else {
                        tracing::error!("--viewport-width requires an integer");
                    }
                }
                "--no-sample" => opts.no_sample = true,
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                "--write-config" => {
                    if let Some(path) = args.next() {
                        opts.write_config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--write-config requires a file path");
                    }
                }
                other => tracing::warn!("ignoring unknown argument {other}"),
            }
        }

        opts
    }

    /// Command-line values win over the config file.
    fn apply(&self, config: &mut HostConfig) {
        if let Some(dir) = &self.save_dir {
            config.save_dir = dir.clone();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.viewport_width {
            config.viewport_width = width;
        }
        if self.no_sample {
            config.sample_fill = false;
        }
        if let Some(path) = &self.event_log {
            config.event_log = Some(path.clone());
        }
    }
}
