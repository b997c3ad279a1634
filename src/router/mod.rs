pub mod cooldown;
pub mod stats;

use crate::bus::{InboundMessage, OutboundMessage, StickerMetadata};
use crate::config::Config;
use crate::scan::{self, ScanProfile, ScanRequest};
use crate::sticker;
use anyhow::{Result, anyhow};
use chrono::Utc;
use cooldown::{ActionKind, CooldownTracker};
use stats::StatsStore;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A classified inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    Help,
    Info,
    Stats,
    Sticker { transparent: bool },
    Scan { profile: ScanProfile, target: String },
    /// Non-command text that merely mentions stickers; gets a soft hint.
    StickerHint,
}

impl Command {
    /// Classify trimmed, lowercased command text against the fixed command
    /// table. Returns `None` for text the bot does not react to.
    pub fn parse(body: &str) -> Option<Self> {
        let trimmed = body.trim();
        let lowered = trimmed.to_lowercase();

        match lowered.as_str() {
            "!ping" => return Some(Self::Ping),
            "!help" | "!menu" => return Some(Self::Help),
            "!info" | "!about" => return Some(Self::Info),
            "!stats" | "!statistik" => return Some(Self::Stats),
            "!sticker" | "!stiker" => return Some(Self::Sticker { transparent: false }),
            "!sticker bg" | "!stiker bg" => return Some(Self::Sticker { transparent: true }),
            _ => {}
        }

        if let Some(rest) = lowered.strip_prefix("!nmap")
            && (rest.is_empty() || rest.starts_with(char::is_whitespace))
        {
            let tokens: Vec<&str> = rest.split_whitespace().collect();
            let (profile, target_tokens) = match tokens.split_first() {
                Some((first, remainder)) => match ScanProfile::parse(first) {
                    // Second token is a profile name: the rest is the target
                    Some(profile) if !remainder.is_empty() => (profile, remainder),
                    // Otherwise everything after the command is the target
                    _ => (ScanProfile::default(), tokens.as_slice()),
                },
                None => (ScanProfile::default(), tokens.as_slice()),
            };
            return Some(Self::Scan {
                profile,
                target: target_tokens.join(" "),
            });
        }

        if !trimmed.starts_with('!') && lowered.contains("sticker") {
            return Some(Self::StickerHint);
        }

        None
    }
}

/// Dispatches classified commands to the sticker and scan pipelines,
/// applying per-user cooldown gating and keeping usage stats.
pub struct Router {
    config: Config,
    cooldowns: CooldownTracker,
    stats: StatsStore,
}

impl Router {
    pub fn new(config: Config) -> Self {
        let cooldowns = CooldownTracker::new(config.cooldowns.clone());
        Self {
            config,
            cooldowns,
            stats: StatsStore::new(),
        }
    }

    /// Process one inbound event, pushing replies onto the outbound queue
    /// as the pipelines progress. Pipeline failures become user-facing
    /// replies here; only a closed outbound queue is a hard error.
    pub async fn handle(
        &self,
        msg: &InboundMessage,
        outbound: &mpsc::Sender<OutboundMessage>,
    ) -> Result<()> {
        if msg.is_status_broadcast {
            return Ok(());
        }
        let Some(command) = Command::parse(&msg.body) else {
            return Ok(());
        };
        debug!("{} -> {:?}", msg.sender_id, command);
        self.stats.touch(&msg.sender_id);

        if matches!(
            command,
            Command::Ping | Command::Help | Command::Info | Command::Stats
        ) && let Err(e) = self.cooldowns.check(&msg.sender_id, ActionKind::General)
        {
            return self.reply(msg, outbound, e.user_message()).await;
        }

        match command {
            Command::Ping => {
                let latency_ms = (Utc::now() - msg.timestamp).num_milliseconds().max(0);
                self.reply(
                    msg,
                    outbound,
                    format!(
                        "🏓 Pong!\n⚡ Latency: {}ms\n🕒 Server time: {}",
                        latency_ms,
                        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
                    ),
                )
                .await
            }
            Command::Help => self.reply(msg, outbound, help_text()).await,
            Command::Info => self.reply(msg, outbound, info_text()).await,
            Command::Stats => {
                self.reply(msg, outbound, self.stats_text(&msg.sender_id))
                    .await
            }
            Command::StickerHint => {
                self.reply(
                    msg,
                    outbound,
                    "🎨 Want a sticker? Send an image with the caption *!sticker*, \
                     or type *!help* for the full menu!",
                )
                .await
            }
            Command::Sticker { transparent } => {
                self.handle_sticker(msg, outbound, transparent).await
            }
            Command::Scan { profile, target } => {
                self.handle_scan(msg, outbound, profile, &target).await
            }
        }
    }

    async fn handle_sticker(
        &self,
        msg: &InboundMessage,
        outbound: &mpsc::Sender<OutboundMessage>,
        transparent: bool,
    ) -> Result<()> {
        if let Err(e) = self.cooldowns.check(&msg.sender_id, ActionKind::Sticker) {
            return self.reply(msg, outbound, e.user_message()).await;
        }

        let Some(source) = msg.sticker_source() else {
            // Missing media is a usage problem, not an error
            return self.reply(msg, outbound, sticker_usage_text()).await;
        };

        self.reply(msg, outbound, "⏳ Processing image…").await?;

        let asset = source.clone();
        let options = self.config.sticker.options(transparent);
        // Decode/encode is CPU-bound; keep it off the async workers
        let result = tokio::task::spawn_blocking(move || sticker::transcode(&asset, &options))
            .await
            .map_err(|e| anyhow!("sticker task panicked: {e}"))?;

        match result {
            Ok(rendered) => {
                let metadata = StickerMetadata {
                    name: self.config.bot.name.clone(),
                    author: self.config.bot.author.clone(),
                    categories: self.config.bot.categories.clone(),
                };
                outbound
                    .send(OutboundMessage::sticker(
                        msg,
                        rendered.data,
                        rendered.mime_type,
                        metadata,
                    ))
                    .await
                    .map_err(|_| anyhow!("outbound queue closed"))?;
                self.stats.record_sticker(&msg.sender_id);
                info!("sticker created for {}", msg.sender_id);
                let note = if transparent {
                    " (transparent background)"
                } else {
                    ""
                };
                self.reply(msg, outbound, format!("✅ Sticker created!{}", note))
                    .await
            }
            Err(e) => {
                warn!("sticker transcode failed for {}: {}", msg.sender_id, e);
                self.reply(msg, outbound, e.user_message()).await
            }
        }
    }

    async fn handle_scan(
        &self,
        msg: &InboundMessage,
        outbound: &mpsc::Sender<OutboundMessage>,
        profile: ScanProfile,
        target: &str,
    ) -> Result<()> {
        if !self.config.scan.enabled {
            return self
                .reply(msg, outbound, "❌ Scanning is disabled on this bot.")
                .await;
        }
        if let Err(e) = self.cooldowns.check(&msg.sender_id, ActionKind::Scan) {
            return self.reply(msg, outbound, e.user_message()).await;
        }

        let request = match ScanRequest::new(target, profile) {
            Ok(request) => request,
            Err(e) => return self.reply(msg, outbound, e.user_message()).await,
        };

        self.reply(
            msg,
            outbound,
            format!(
                "🔍 Scanning {} with the *{}* profile… this can take a while.",
                request.target(),
                request.profile.name()
            ),
        )
        .await?;

        match scan::runner::run_scan(&request).await {
            Ok(output) => {
                let report = scan::parser::parse(&output.stdout);
                // Zero parsed ports despite output: degrade to a raw excerpt
                let mut text = if report.ports.is_empty() {
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
                if output.truncated {
                    text = scan::report::truncate_message(text + "\n(scanner output was capped)");
                }
                self.stats.record_scan(&msg.sender_id);
                info!(
                    "scan of {} ({}) finished in {}s",
                    request.target(),
                    request.profile.name(),
                    output.duration_secs
                );
                self.reply(msg, outbound, text).await
            }
            Err(e) => {
                warn!("scan of {} failed: {}", request.target(), e);
                self.reply(msg, outbound, e.user_message()).await
            }
        }
    }

    fn stats_text(&self, user: &str) -> String {
        // An entry exists for anyone who issued a command; only recorded
        // actions count as activity
        match self.stats.get(user) {
            Some(stats) if stats.stickers_made > 0 || stats.scans_run > 0 => format!(
                "📊 *Your stats*\n🎨 Stickers made: {}\n🔍 Scans run: {}\n🕒 Last active: {}",
                stats.stickers_made,
                stats.scans_run,
                stats.last_active.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            _ => "📊 No activity recorded yet. Make a sticker!".to_string(),
        }
    }

    async fn reply(
        &self,
        msg: &InboundMessage,
        outbound: &mpsc::Sender<OutboundMessage>,
        content: impl Into<String>,
    ) -> Result<()> {
        outbound
            .send(OutboundMessage::text(msg, content))
            .await
            .map_err(|_| anyhow!("outbound queue closed"))
    }
}

fn help_text() -> String {
    format!(
        "🎨 *{name}* 🎨\n\n\
         *Commands:*\n\
         📸 *!sticker* — reply to an image (or send one with this caption) to get a sticker\n\
         🌅 *!sticker bg* — sticker with a transparent background\n\
         🔍 *!nmap [profile] target* — scan a host (profiles: basic, quick, detailed, port, os, full)\n\
         📊 *!stats* — your usage stats\n\
         🏓 *!ping* — bot status and latency\n\
         ℹ️ *!info* — about this bot\n\
         ❓ *!help* — this menu\n\n\
         *Notes:*\n\
         - Images are resized to a square sticker canvas\n\
         - Output format: WebP\n\
         - Scans are rate limited per user",
        name = crate::BOT_NAME
    )
}

fn info_text() -> String {
    format!(
        "🤖 *{} v{}*\n\
         Turns images into stickers and runs network scans on request.\n\
         Type *!help* for the command list.",
        crate::BOT_NAME,
        crate::VERSION
    )
}

fn sticker_usage_text() -> &'static str {
    "❌ *How to make a sticker:*\n\n\
     1. *Send an image* to this chat\n\
     2. *Reply to the image* with the caption *!sticker*\n\
     3. Or send an image with the caption *!sticker*\n\n\
     🔹 Use *!sticker bg* for a transparent background\n\
     🔹 Type *!help* for the full menu"
}
