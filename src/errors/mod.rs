use thiserror::Error;

/// Typed error hierarchy for stickerbot.
///
/// Use at pipeline boundaries (sticker transcode, scan execution, command
/// dispatch). Internal/leaf functions can continue using `anyhow::Result` —
/// the `Internal` variant allows seamless conversion via the `?` operator.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("image is {bytes} bytes, outside the allowed {min}..={max} byte range")]
    SizeOutOfRange {
        bytes: usize,
        min: usize,
        max: usize,
    },

    #[error("image is {width}x{height} px, outside the allowed {min}..={max} px range")]
    DimensionOutOfRange {
        width: u32,
        height: u32,
        min: u32,
        max: u32,
    },

    #[error("image does not fit the {budget} byte budget at any quality")]
    ImageTooComplex { budget: usize },

    #[error("media download failed: {0}")]
    DownloadFailed(String),

    #[error("media download timed out after {0} seconds")]
    DownloadTimedOut(u64),

    #[error("scan timed out after {0} seconds")]
    ScanTimedOut(u64),

    #[error("scanner binary not found on PATH")]
    ScannerNotInstalled,

    #[error("scanner exited with status {status}: {stderr}")]
    ScannerFailed { status: i32, stderr: String },

    #[error("invalid command arguments: {0}")]
    InvalidCommandArguments(String),

    #[error("cooldown active: {remaining_secs}s remaining")]
    CooldownActive { remaining_secs: u64 },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BotError {
    /// Single user-facing reply for a failure: cause plus remedy.
    /// Every pipeline error is translated through here at the dispatch
    /// boundary — a failure always yields a reply, never silence.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedMediaType(_) => {
                "❌ That file is not an image. Send a JPEG, PNG, GIF or WebP image.".to_string()
            }
            Self::SizeOutOfRange { bytes, min, max } => format!(
                "❌ Image is {} KB — it must be between {} KB and {} MB.",
                bytes / 1024,
                min / 1024,
                max / (1024 * 1024)
            ),
            Self::DimensionOutOfRange {
                width,
                height,
                min,
                max,
            } => format!(
                "❌ Image is {}x{} px — each side must be between {} and {} px.",
                width, height, min, max
            ),
            Self::ImageTooComplex { .. } => {
                "❌ Could not compress this image into a sticker. Try a simpler or smaller image."
                    .to_string()
            }
            Self::DownloadFailed(_) => {
                "❌ Could not download the image. Make sure you sent a valid image and try again."
                    .to_string()
            }
            Self::DownloadTimedOut(secs) => format!(
                "❌ Downloading the image took longer than {}s. Try again with a smaller image.",
                secs
            ),
            Self::ScanTimedOut(secs) => format!(
                "⏱️ Scan timed out after {}s. Try a faster profile (e.g. *quick*).",
                secs
            ),
            Self::ScannerNotInstalled => {
                "❌ The scanner is not installed on the bot host, so !nmap is unavailable."
                    .to_string()
            }
            Self::ScannerFailed { stderr, .. } => {
                let detail = stderr.lines().next().unwrap_or("unknown error");
                format!("❌ Scan failed: {}", detail)
            }
            Self::InvalidCommandArguments(reason) => {
                format!("❌ {}. Type *!help* for usage.", reason)
            }
            Self::CooldownActive { remaining_secs } => format!(
                "🕒 Slow down! Wait {}s before using this command again.",
                remaining_secs
            ),
            Self::Internal(_) => {
                "❌ Something went wrong while processing your request. Please try again."
                    .to_string()
            }
        }
    }
}
