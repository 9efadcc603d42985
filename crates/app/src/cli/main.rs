//! Fader CLI Application

use anyhow::Context;
use clap::{Parser, Subcommand};
use fader_core::domain::{AppConfig, BackendKind, ChannelVolume, MixerBackend, MixerRegistry};
use fader_infra::mixer::FakeBackend;
use serde::Serialize;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "fader")]
#[command(about = "Percentage volume control for hardware mixer channels", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Use the built-in demo backend instead of real hardware
    #[arg(long)]
    fake: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all channels with their volume and balance
    List {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the volume of one channel
    Get { channel: Option<String> },
    /// Set the volume of one channel (0..=100)
    Set { channel: String, percent: i32 },
    /// Print or set the balance of one channel (-100..=100)
    Balance {
        channel: String,
        #[arg(allow_negative_numbers = true)]
        value: Option<i32>,
    },
    /// Adjust the volume of one channel by a delta (default: lower by the
    /// configured nudge step)
    Nudge {
        channel: Option<String>,
        #[arg(allow_negative_numbers = true)]
        delta: Option<i32>,
    },
}

#[derive(Serialize)]
struct ChannelReport {
    name: String,
    volume: i32,
    balance: i32,
    stereo: bool,
}

impl From<&ChannelVolume> for ChannelReport {
    fn from(channel: &ChannelVolume) -> Self {
        Self {
            name: channel.name().to_string(),
            volume: channel.volume(),
            balance: channel.balance(),
            stereo: channel.is_stereo(),
        }
    }
}

#[cfg(feature = "alsa")]
fn hardware_backend() -> anyhow::Result<Box<dyn MixerBackend>> {
    Ok(Box::new(fader_infra::mixer::AlsaBackend::new()))
}

#[cfg(not(feature = "alsa"))]
fn hardware_backend() -> anyhow::Result<Box<dyn MixerBackend>> {
    Err(fader_core::domain::MixerError::BackendUnavailable(
        "built without ALSA support; use --fake or rebuild with `--features alsa`".to_string(),
    )
    .into())
}

fn select_backend(cli: &Cli, config: &AppConfig) -> anyhow::Result<Box<dyn MixerBackend>> {
    if cli.fake || config.backend == BackendKind::Fake {
        return Ok(Box::new(FakeBackend::demo()));
    }
    hardware_backend()
}

fn resolve<'a>(
    registry: &'a MixerRegistry,
    name: Option<&str>,
    config: &AppConfig,
) -> anyhow::Result<&'a Arc<ChannelVolume>> {
    let name = name
        .or(config.default_channel.as_deref())
        .context("no channel given and no default_channel configured")?;
    registry
        .find(name)
        .with_context(|| format!("channel '{}' not found", name))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    let config = AppConfig::load_or_default();
    let backend = select_backend(&cli, &config)?;
    let registry = MixerRegistry::discover(backend.as_ref())?;

    match cli.command {
        Command::List { json } => {
            let reports: Vec<ChannelReport> = registry
                .channels()
                .iter()
                .map(|c| ChannelReport::from(c.as_ref()))
                .collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in reports {
                    let kind = if report.stereo { "stereo" } else { "mono" };
                    println!(
                        "{:<20} volume {:>3}  balance {:>4}  ({})",
                        report.name, report.volume, report.balance, kind
                    );
                }
            }
        }
        Command::Get { channel } => {
            let channel = resolve(&registry, channel.as_deref(), &config)?;
            println!("{}", channel.volume());
        }
        Command::Set { channel, percent } => {
            let channel = resolve(&registry, Some(&channel), &config)?;
            channel.set_volume(percent);
            println!("{} volume {}", channel.name(), channel.volume());
        }
        Command::Balance { channel, value } => {
            let channel = resolve(&registry, Some(&channel), &config)?;
            match value {
                Some(balance) => {
                    channel.set_balance(balance);
                    println!("{} balance {}", channel.name(), channel.balance());
                }
                None => println!("{}", channel.balance()),
            }
        }
        Command::Nudge { channel, delta } => {
            let channel = resolve(&registry, channel.as_deref(), &config)?;
            let delta = delta.unwrap_or(-config.nudge_step);
            channel.set_volume(channel.volume() + delta);
            println!("{} volume {}", channel.name(), channel.volume());
        }
    }

    Ok(())
}
