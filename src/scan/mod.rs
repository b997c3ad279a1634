pub mod parser;
pub mod report;
pub mod runner;

use crate::errors::BotError;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Maximum accepted target string length.
const MAX_TARGET_LEN: usize = 255;

/// Hostname/IP/CIDR shape allowlist. Combined with argv invocation (no
/// shell anywhere in the scan path) this closes the injection surface:
/// no whitespace, no shell metacharacters, no leading `-` (flag smuggling).
static TARGET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.:/\-]*$").unwrap());

/// Named preset of scanner flags and timeout, trading thoroughness for speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanProfile {
    Basic,
    Quick,
    Detailed,
    Port,
    Os,
    Full,
}

impl ScanProfile {
    /// Parse a profile token from command text. Unknown tokens are not an
    /// error at this layer — the router treats them as part of the target.
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "quick" => Some(Self::Quick),
            "detailed" => Some(Self::Detailed),
            "port" => Some(Self::Port),
            "os" => Some(Self::Os),
            "full" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Quick => "quick",
            Self::Detailed => "detailed",
            Self::Port => "port",
            Self::Os => "os",
            Self::Full => "full",
        }
    }

    /// Scanner argument vector for this profile. The target is appended as
    /// its own argv entry by the runner — never interpolated into a string.
    pub fn args(self) -> &'static [&'static str] {
        match self {
            Self::Basic => &["-T4", "-F"],
            Self::Quick => &["-T4", "--top-ports", "100"],
            Self::Detailed => &["-T4", "-sV", "-sC"],
            Self::Port => &["-T4", "-p-"],
            Self::Os => &["-T4", "-O"],
            Self::Full => &["-T4", "-A", "-p-"],
        }
    }

    pub fn timeout(self) -> Duration {
        match self {
            Self::Basic | Self::Quick => Duration::from_secs(60),
            Self::Detailed | Self::Port => Duration::from_secs(120),
            Self::Os => Duration::from_secs(180),
            Self::Full => Duration::from_secs(300),
        }
    }
}

impl Default for ScanProfile {
    fn default() -> Self {
        Self::Basic
    }
}

/// Validated scan request: a shape-checked target plus a profile.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    target: String,
    pub profile: ScanProfile,
}

impl ScanRequest {
    pub fn new(target: &str, profile: ScanProfile) -> Result<Self, BotError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(BotError::InvalidCommandArguments(
                "scan target is required".to_string(),
            ));
        }
        if target.len() > MAX_TARGET_LEN {
            return Err(BotError::InvalidCommandArguments(format!(
                "scan target exceeds {} characters",
                MAX_TARGET_LEN
            )));
        }
        if !TARGET_RE.is_match(target) {
            return Err(BotError::InvalidCommandArguments(
                "scan target must be a hostname, IP address or CIDR range".to_string(),
            ));
        }
        Ok(Self {
            target: target.to_string(),
            profile,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}
