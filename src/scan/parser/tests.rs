use super::*;

const BASIC_REPORT: &str = "\
Starting Nmap 7.94 ( https://nmap.org ) at 2024-05-01 10:00 UTC
Nmap scan report for 10.0.0.1
Host is up (0.0010s latency).
Not shown: 997 filtered ports
PORT    STATE SERVICE VERSION
22/tcp  open  ssh     OpenSSH 8.2
80/tcp  open  http    nginx 1.18.0
443/tcp open  https
Service detection performed.
Nmap done: 1 IP address (1 host up) scanned in 12.34 seconds
";

#[test]
fn test_parses_host_and_status() {
    let report = parse(BASIC_REPORT);
    assert_eq!(report.host, "10.0.0.1");
    assert_eq!(report.host_status, HostStatus::Up);
}

#[test]
fn test_parses_port_rows_in_order() {
    let report = parse(BASIC_REPORT);
    assert_eq!(report.ports.len(), 3);
    assert_eq!(report.ports[0].port, "22/tcp");
    assert_eq!(report.ports[0].state, PortState::Open);
    assert_eq!(report.ports[0].service, "ssh");
    assert_eq!(report.ports[0].version, "OpenSSH 8.2");
    assert_eq!(report.ports[2].port, "443/tcp");
    assert_eq!(report.ports[2].version, "");
}

#[test]
fn test_counts_from_rows_and_summary() {
    let report = parse(BASIC_REPORT);
    assert_eq!(report.counts.open, 3);
    assert_eq!(report.counts.filtered, 997);
    assert_eq!(report.counts.closed, 0);
    assert_eq!(report.counts.total_scanned, 1000);
    assert!(report.is_consistent());
}

#[test]
fn test_not_shown_without_table_rows() {
    let raw = "Nmap scan report for quiet.example\nHost is up.\nNot shown: 997 filtered ports\n";
    let report = parse(raw);
    assert_eq!(report.counts.filtered, 997);
    assert!(report.ports.is_empty());
}

#[test]
fn test_not_shown_modern_closed_format() {
    let raw = "Not shown: 995 closed tcp ports (conn-refused)\n";
    let report = parse(raw);
    assert_eq!(report.counts.closed, 995);
}

#[test]
fn test_rows_outside_table_ignored() {
    // No header line, so the row must not be picked up
    let raw = "Nmap scan report for 10.0.0.1\n22/tcp open ssh\n";
    let report = parse(raw);
    assert!(report.ports.is_empty());
}

#[test]
fn test_table_closes_on_done_marker() {
    let raw = "\
PORT STATE SERVICE
22/tcp open ssh
Nmap done: 1 IP address
80/tcp open http
";
    let report = parse(raw);
    assert_eq!(report.ports.len(), 1);
}

#[test]
fn test_open_filtered_counts_as_open() {
    let raw = "PORT STATE SERVICE\n53/udp open|filtered domain\n";
    let report = parse(raw);
    assert_eq!(report.ports[0].state, PortState::OpenFiltered);
    assert_eq!(report.counts.open, 1);
}

#[test]
fn test_explicit_closed_row() {
    let raw = "PORT STATE SERVICE\n25/tcp closed smtp\n";
    let report = parse(raw);
    assert_eq!(report.counts.closed, 1);
    assert_eq!(report.counts.open, 0);
}

#[test]
fn test_os_details() {
    let raw = "OS details: Linux 5.0 - 5.14\n";
    let report = parse(raw);
    assert_eq!(report.os_details.as_deref(), Some("Linux 5.0 - 5.14"));
}

#[test]
fn test_os_running_marker() {
    let raw = "Running: Linux 5.X\n";
    let report = parse(raw);
    assert_eq!(report.os_details.as_deref(), Some("Linux 5.X"));
}

#[test]
fn test_fallback_host_extraction() {
    // Indented header defeats the anchored primary pattern
    let raw = "  Nmap scan report for fallback.example\n";
    let report = parse(raw);
    assert_eq!(report.host, "fallback.example");
}

#[test]
fn test_empty_input_yields_empty_report() {
    let report = parse("");
    assert!(report.ports.is_empty());
    assert!(report.host.is_empty());
    assert_eq!(report.host_status, HostStatus::Unknown);
    assert_eq!(report.counts.total_scanned, 0);
}

#[test]
fn test_garbage_input_yields_empty_report() {
    let report = parse("complete nonsense\nnothing to see here\n");
    assert!(report.ports.is_empty());
}

#[test]
fn test_host_down() {
    let raw = "Nmap scan report for dead.example\nHost seems down. If it is really up...\n";
    let report = parse(raw);
    assert_eq!(report.host_status, HostStatus::Down);
}

#[test]
fn test_inconsistent_counts_detected() {
    // Summary overwrites the row-derived filtered count, creating a mismatch
    let raw = "\
PORT STATE SERVICE
22/tcp open ssh
8080/tcp filtered http-proxy
Not shown: 990 filtered ports
";
    let report = parse(raw);
    assert_eq!(report.counts.filtered, 990);
    assert_eq!(report.counts.total_scanned, 2 + 990);
    assert!(!report.is_consistent());
}
