use regex::Regex;
use std::sync::LazyLock;

static REPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Nmap scan report for (.+)$").unwrap());

/// Port-table row: `22/tcp open ssh OpenSSH 8.2`. The compound
/// `open|filtered` state must be tried before the plain states.
static ROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+/(?:tcp|udp))\s+(open\|filtered|open|filtered|closed)\s+(\S+)(?:\s+(.+))?$")
        .unwrap()
});

static NOT_SHOWN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Not shown:\s+(\d+)\s+(filtered|closed)").unwrap());

static OS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:OS details|Running):\s*(.+)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStatus {
    Up,
    Down,
    Unknown,
}

impl HostStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortState {
    Open,
    Filtered,
    Closed,
    OpenFiltered,
}

impl PortState {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "open" => Some(Self::Open),
            "filtered" => Some(Self::Filtered),
            "closed" => Some(Self::Closed),
            "open|filtered" => Some(Self::OpenFiltered),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Filtered => "filtered",
            Self::Closed => "closed",
            Self::OpenFiltered => "open|filtered",
        }
    }

    /// Any state containing "open", covering the compound state.
    pub fn counts_as_open(self) -> bool {
        matches!(self, Self::Open | Self::OpenFiltered)
    }
}

#[derive(Debug, Clone)]
pub struct PortEntry {
    pub port: String,
    pub state: PortState,
    pub service: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PortCounts {
    pub open: usize,
    pub filtered: usize,
    pub closed: usize,
    pub total_scanned: usize,
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub host: String,
    pub host_status: HostStatus,
    /// Insertion order = order encountered in the scanner output.
    pub ports: Vec<PortEntry>,
    pub counts: PortCounts,
    pub os_details: Option<String>,
}

impl ScanReport {
    /// Advisory consistency check. The scanner's table lists only
    /// non-default-state ports while the "Not shown" summary covers the
    /// rest, so the arithmetic can legitimately disagree depending on
    /// invocation flags. A mismatch is surfaced, never reconciled.
    pub fn is_consistent(&self) -> bool {
        self.counts.open + self.counts.filtered + self.counts.closed == self.counts.total_scanned
    }
}

/// Line-by-line parse state: outside or inside the port table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    SeekingHeader,
    InTable,
}

/// Parse raw scanner output into a structured report.
///
/// Single forward pass. Parsing never fails: unmatched text simply yields
/// an empty report, and the caller degrades to a raw excerpt when no ports
/// were extracted.
pub fn parse(raw: &str) -> ScanReport {
    let mut report = ScanReport {
        host: String::new(),
        host_status: HostStatus::Unknown,
        ports: Vec::new(),
        counts: PortCounts::default(),
        os_details: None,
    };
    let mut state = ParseState::SeekingHeader;

    for line in raw.lines() {
        let line = line.trim_end();

        if let Some(caps) = REPORT_RE.captures(line) {
            report.host = caps[1].trim().to_string();
            continue;
        }
        if line.starts_with("Host is up") {
            report.host_status = HostStatus::Up;
            continue;
        }
        if line.starts_with("Host seems down") || line.starts_with("Host is down") {
            report.host_status = HostStatus::Down;
            continue;
        }
        if let Some(caps) = NOT_SHOWN_RE.captures(line) {
            // Authoritative when individual ports are omitted from the table
            let count: usize = caps[1].parse().unwrap_or(0);
            match &caps[2] {
                "filtered" => report.counts.filtered = count,
                _ => report.counts.closed = count,
            }
            continue;
        }
        if let Some(caps) = OS_RE.captures(line) {
            report.os_details = Some(caps[1].trim().to_string());
            continue;
        }
        if line.contains("PORT") && line.contains("STATE") && line.contains("SERVICE") {
            state = ParseState::InTable;
            continue;
        }

        if state == ParseState::InTable {
            if let Some(caps) = ROW_RE.captures(line) {
                let Some(port_state) = PortState::parse(&caps[2]) else {
                    continue;
                };
                if port_state.counts_as_open() {
                    report.counts.open += 1;
                } else if port_state == PortState::Filtered {
                    report.counts.filtered += 1;
                } else {
                    report.counts.closed += 1;
                }
                report.ports.push(PortEntry {
                    port: caps[1].to_string(),
                    state: port_state,
                    service: caps[3].to_string(),
                    version: caps
                        .get(4)
                        .map(|m| m.as_str().trim().to_string())
                        .unwrap_or_default(),
                });
            } else if line.is_empty()
                || line.starts_with("Nmap done")
                || line.starts_with("Service detection performed")
            {
                state = ParseState::SeekingHeader;
            }
        }
    }

    report.counts.total_scanned =
        report.ports.len() + report.counts.filtered + report.counts.closed;

    // Fallback tolerant pass: any line mentioning the report marker
    if report.host.is_empty() {
        for line in raw.lines() {
            if let Some(rest) = line.split("scan report for ").nth(1) {
                report.host = rest.trim().to_string();
                break;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests;
