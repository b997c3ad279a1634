use crate::errors::BotError;
use crate::scan::ScanRequest;
use crate::utils::truncate_at_utf8_boundary;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, warn};

/// Scanner binary resolved on PATH.
pub const SCANNER_BIN: &str = "nmap";

/// Maximum captured stdout/stderr before truncation.
const MAX_OUTPUT_BYTES: usize = 256 * 1024;

/// The only environment the scanner child inherits. Everything else
/// (tokens, credentials, build metadata) stays in the bot process.
const SCANNER_ENV_VARS: &[&str] = &["PATH", "HOME", "LANG", "LC_ALL", "TZ", "TMPDIR"];

/// Scanner invocation with a scrubbed environment: `env_clear()` plus the
/// allowlist above.
fn scanner_command() -> Command {
    let mut cmd = Command::new(SCANNER_BIN);
    cmd.env_clear();
    for &var in SCANNER_ENV_VARS {
        if let Ok(val) = std::env::var(var) {
            cmd.env(var, val);
        }
    }
    cmd
}

#[derive(Debug)]
pub struct ScanOutput {
    pub stdout: String,
    pub duration_secs: u64,
    pub truncated: bool,
}

/// Whether the scanner binary is available. Used by `doctor` and to give
/// the first `!nmap` a precise failure instead of a spawn error.
pub fn scanner_available() -> bool {
    which::which(SCANNER_BIN).is_ok()
}

/// Run the scanner for a validated request.
///
/// The invocation is an argument vector — the target is one argv entry,
/// never interpolated into a shell string. The child is killed when the
/// profile timeout elapses.
pub async fn run_scan(request: &ScanRequest) -> Result<ScanOutput, BotError> {
    if !scanner_available() {
        return Err(BotError::ScannerNotInstalled);
    }

    let timeout = request.profile.timeout();
    let mut cmd = scanner_command();
    cmd.args(request.profile.args());
    cmd.arg(request.target());
    cmd.stdin(Stdio::null());
    cmd.kill_on_drop(true);

    debug!(
        "running scan: {} {:?} {} (timeout {}s)",
        SCANNER_BIN,
        request.profile.args(),
        request.target(),
        timeout.as_secs()
    );

    let started = Instant::now();
    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => {
            let duration_secs = started.elapsed().as_secs();
            if !output.status.success() {
                let stderr =
                    String::from_utf8_lossy(truncate_at_utf8_boundary(&output.stderr, 4096))
                        .to_string();
                warn!("scanner exited non-zero: {}", output.status);
                return Err(BotError::ScannerFailed {
                    status: output.status.code().unwrap_or(-1),
                    stderr,
                });
            }

            let truncated = output.stdout.len() > MAX_OUTPUT_BYTES;
            let stdout =
                String::from_utf8_lossy(truncate_at_utf8_boundary(&output.stdout, MAX_OUTPUT_BYTES))
                    .to_string();
            Ok(ScanOutput {
                stdout,
                duration_secs,
                truncated,
            })
        }
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(BotError::ScannerNotInstalled)
        }
        Ok(Err(e)) => Err(BotError::Internal(
            anyhow::Error::new(e).context("failed to spawn scanner"),
        )),
        Err(_) => {
            // kill_on_drop terminates the in-flight child
            warn!(
                "scan of {} timed out after {}s",
                request.target(),
                timeout.as_secs()
            );
            Err(BotError::ScanTimedOut(timeout.as_secs()))
        }
    }
}

#[cfg(test)]
mod tests;
