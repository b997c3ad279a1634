use crate::scan::parser::ScanReport;
use chrono::Utc;

/// Transport-imposed reply ceiling; longer reports are cut with an ellipsis.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Raw-excerpt cap, keeping degraded replies within message-size etiquette.
const MAX_EXCERPT_LINES: usize = 10;

/// Version strings can run long (full banner grabs); keep the table tidy.
const MAX_VERSION_CHARS: usize = 30;

/// Render a structured report into a human-readable reply.
pub fn format_report(
    report: &ScanReport,
    target: &str,
    profile: &str,
    duration_secs: u64,
    raw: &str,
) -> String {
    let mut out = String::new();
    push_header(&mut out, target, profile, duration_secs);

    let host = if report.host.is_empty() {
        "(not detected)"
    } else {
        &report.host
    };
    out.push_str(&format!(
        "📡 Host: {} — {}\n\n",
        host,
        report.host_status.label()
    ));

    out.push_str("🔓 *Open ports:*\n");
    let mut any_open = false;
    for entry in &report.ports {
        if !entry.state.counts_as_open() {
            continue;
        }
        any_open = true;
        let mut version: String = entry.version.chars().take(MAX_VERSION_CHARS).collect();
        if version.len() < entry.version.len() {
            version.push('…');
        }
        out.push_str(&format!(
            "  • {} {} {} {}\n",
            entry.port,
            entry.state.label(),
            entry.service,
            version
        ));
    }
    if !any_open {
        out.push_str("  (none)\n");
    }

    let c = &report.counts;
    out.push_str(&format!(
        "\n📊 {} open · {} filtered · {} closed · {} scanned\n",
        c.open, c.filtered, c.closed, c.total_scanned
    ));
    if report.is_consistent() {
        out.push_str("✅ Counts consistent\n");
    } else {
        out.push_str("⚠️ Count mismatch — check the raw excerpt below\n");
    }

    if let Some(os) = &report.os_details {
        out.push_str(&format!("🖥️ OS: {}\n", os));
    }

    let excerpt = interesting_lines(raw);
    if !excerpt.is_empty() {
        out.push_str("\n📄 *Raw highlights:*\n");
        for line in excerpt {
            out.push_str(line);
            out.push('\n');
        }
    }

    truncate_message(out)
}

/// Degrade-to-raw path: parsing produced no ports, so present a filtered
/// excerpt of the raw text instead of an empty structured report.
pub fn format_raw_fallback(target: &str, profile: &str, duration_secs: u64, raw: &str) -> String {
    let mut out = String::new();
    push_header(&mut out, target, profile, duration_secs);
    out.push_str("⚠️ Could not extract a structured report — raw scanner output:\n\n");

    let mut lines = interesting_lines(raw);
    if lines.is_empty() {
        lines = raw
            .lines()
            .filter(|l| !l.trim().is_empty())
            .take(MAX_EXCERPT_LINES)
            .collect();
    }
    if lines.is_empty() {
        out.push_str("(scanner produced no output)\n");
    } else {
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
    }

    truncate_message(out)
}

fn push_header(out: &mut String, target: &str, profile: &str, duration_secs: u64) {
    out.push_str("🔍 *Scan Report*\n");
    out.push_str(&format!("🎯 Target: {}\n", target));
    out.push_str(&format!("⚙️ Profile: {}\n", profile));
    out.push_str(&format!(
        "🕒 {}\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("⏱️ Duration: {}s\n\n", duration_secs));
}

/// Lines worth surfacing from raw output: report header, host state,
/// not-shown summary, port-table rows, scan-duration footer.
fn interesting_lines(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(str::trim_end)
        .filter(|line| {
            line.contains("scan report for")
                || line.starts_with("Host is up")
                || line.starts_with("Host seems down")
                || line.contains("Not shown:")
                || line.starts_with("Nmap done")
                || looks_like_port_row(line)
        })
        .take(MAX_EXCERPT_LINES)
        .collect()
}

fn looks_like_port_row(line: &str) -> bool {
    let mut parts = line.split_whitespace();
    let Some(first) = parts.next() else {
        return false;
    };
    let Some((num, proto)) = first.split_once('/') else {
        return false;
    };
    num.chars().all(|c| c.is_ascii_digit()) && (proto == "tcp" || proto == "udp")
}

/// Cap the reply at the transport limit, cutting on a char boundary and
/// appending an ellipsis marker.
pub fn truncate_message(text: String) -> String {
    if text.chars().count() <= MAX_MESSAGE_CHARS {
        return text;
    }
    let mut cut: String = text.chars().take(MAX_MESSAGE_CHARS - 1).collect();
    cut.push('…');
    cut
}
