pub mod doctor;

use crate::bus::MessageBus;
use crate::channels::BaseChannel;
use crate::channels::console::ConsoleChannel;
use crate::config::load_config;
use crate::router::Router;
use crate::scan::{self, ScanProfile, ScanRequest};
use crate::sticker;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "stickerbot")]
#[command(version = crate::VERSION)]
#[command(about = "Chat bot that turns images into stickers and runs network scans")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot (channels + command router)
    Run,
    /// Convert a single image file to a sticker
    Sticker {
        /// Input image (JPEG, PNG, GIF or WebP)
        input: PathBuf,
        /// Output path; defaults to the input with a .webp extension
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Keep a transparent background instead of compositing on white
        #[arg(long)]
        transparent: bool,
    },
    /// Scan a host and print the formatted report
    Scan {
        /// Hostname, IP address or CIDR range
        target: String,
        /// Scan profile: basic, quick, detailed, port, os or full
        #[arg(short, long, default_value = "basic")]
        profile: String,
    },
    /// Check the local environment (scanner binary, config, directories)
    Doctor,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_bot().await,
        Commands::Sticker {
            input,
            output,
            transparent,
        } => sticker_file(&input, output, transparent),
        Commands::Scan { target, profile } => scan_target(&target, &profile).await,
        Commands::Doctor => doctor::run(),
    }
}

async fn run_bot() -> Result<()> {
    let config = load_config(None)?;
    info!("Configuration loaded");

    let mut bus = MessageBus::default();
    let mut inbound_rx = bus
        .take_inbound_rx()
        .context("inbound receiver already taken")?;
    let mut outbound_rx = bus
        .take_outbound_rx()
        .context("outbound receiver already taken")?;

    let mut channels: Vec<Box<dyn BaseChannel>> = Vec::new();
    if config.channels.console.enabled {
        channels.push(Box::new(ConsoleChannel::new(bus.inbound_tx.clone())));
    }
    if channels.is_empty() {
        bail!("no channels enabled; enable at least one in the config");
    }
    for channel in &mut channels {
        channel
            .start()
            .await
            .with_context(|| format!("failed to start {} channel", channel.name()))?;
    }

    let router = Arc::new(Router::new(config));
    let outbound_tx = bus.outbound_tx.clone();

    // Outbound replies go to the channel the message came in on
    let dispatch_task = tokio::spawn(async move {
        while let Some(msg) = outbound_rx.recv().await {
            let Some(channel) = channels.iter().find(|c| c.name() == msg.channel) else {
                warn!("no channel registered for '{}', dropping reply", msg.channel);
                continue;
            };
            if let Err(e) = channel.send(&msg).await {
                warn!("{} channel send failed: {:#}", channel.name(), e);
            }
        }
    });

    // Commands run concurrently; a slow scan never blocks other users
    let inbound_task = tokio::spawn(async move {
        while let Some(msg) = inbound_rx.recv().await {
            let router = router.clone();
            let outbound_tx = outbound_tx.clone();
            tokio::spawn(async move {
                if let Err(e) = router.handle(&msg, &outbound_tx).await {
                    error!("message handling failed: {:#}", e);
                }
            });
        }
    });

    let cleanup_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(60 * 60));
        loop {
            interval.tick().await;
            match tokio::task::spawn_blocking(crate::utils::media::cleanup_stale_media).await {
                Ok(Ok(removed)) if removed > 0 => {
                    info!("cleaned up {} stale media files", removed);
                }
                Ok(Ok(_)) => {}
                Ok(Err(e)) => warn!("media cleanup failed: {:#}", e),
                Err(e) => warn!("media cleanup task panicked: {}", e),
            }
        }
    });

    info!("Bot is running. Press Ctrl+C to stop.");
    shutdown_signal().await?;
    info!("Shutting down");

    cleanup_task.abort();
    inbound_task.abort();
    dispatch_task.abort();
    Ok(())
}

async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            r = tokio::signal::ctrl_c() => r?,
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await?;
    Ok(())
}

fn sticker_file(input: &Path, output: Option<PathBuf>, transparent: bool) -> Result<()> {
    let config = load_config(None)?;
    let data = std::fs::read(input)
        .with_context(|| format!("failed to read input image: {}", input.display()))?;
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("png");
    let attachment = crate::bus::MediaAttachment {
        mime_type: crate::utils::media::mime_for_extension(ext).to_string(),
        data,
    };

    let options = config.sticker.options(transparent);
    let rendered = sticker::transcode(&attachment, &options)
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    let output = output.unwrap_or_else(|| input.with_extension("webp"));
    std::fs::write(&output, &rendered.data)
        .with_context(|| format!("failed to write sticker: {}", output.display()))?;
    println!(
        "Wrote {} ({} KB)",
        output.display(),
        rendered.data.len() / 1024
    );
    Ok(())
}

async fn scan_target(target: &str, profile: &str) -> Result<()> {
    let Some(profile) = ScanProfile::parse(profile) else {
        bail!("unknown profile '{profile}' (expected basic, quick, detailed, port, os or full)");
    };
    let request =
        ScanRequest::new(target, profile).map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    println!(
        "Scanning {} with the {} profile...",
        request.target(),
        request.profile.name()
    );
    let output = scan::runner::run_scan(&request)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    let report = scan::parser::parse(&output.stdout);
    let text = if report.ports.is_empty() {
        scan::report::format_raw_fallback(
            request.target(),
            request.profile.name(),
            output.duration_secs,
            &output.stdout,
        )
    } else {
        scan::report::format_report(
            &report,
            request.target(),
            request.profile.name(),
            output.duration_secs,
            &output.stdout,
        )
    };
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests;
