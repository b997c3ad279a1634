use stickerbot::errors::BotError;
use stickerbot::scan::parser::{self, HostStatus, PortState};
use stickerbot::scan::report::{MAX_MESSAGE_CHARS, format_raw_fallback, format_report};
use stickerbot::scan::{ScanProfile, ScanRequest};

const TYPICAL_OUTPUT: &str = "\
Starting Nmap 7.94 ( https://nmap.org ) at 2026-08-24 12:00 UTC
Nmap scan report for example.com (93.184.216.34)
Host is up (0.012s latency).
Not shown: 998 closed tcp ports (reset)
PORT    STATE SERVICE VERSION
22/tcp  open  ssh     OpenSSH 8.9p1 Ubuntu
443/tcp open  https   nginx 1.18.0

Service detection performed.
Nmap done: 1 IP address (1 host up) scanned in 4.21 seconds
";

#[test]
fn typical_output_parses_end_to_end() {
    let report = parser::parse(TYPICAL_OUTPUT);

    assert_eq!(report.host, "example.com (93.184.216.34)");
    assert_eq!(report.host_status, HostStatus::Up);
    assert_eq!(report.ports.len(), 2);
    assert_eq!(report.ports[0].port, "22/tcp");
    assert_eq!(report.ports[0].state, PortState::Open);
    assert_eq!(report.ports[0].service, "ssh");
    assert_eq!(report.counts.open, 2);
    assert_eq!(report.counts.closed, 998);
    assert_eq!(report.counts.total_scanned, 1000);
    assert!(report.is_consistent());
}

#[test]
fn formatted_report_carries_the_essentials() {
    let report = parser::parse(TYPICAL_OUTPUT);
    let text = format_report(&report, "example.com", "basic", 4, TYPICAL_OUTPUT);

    assert!(text.contains("example.com"));
    assert!(text.contains("basic"));
    assert!(text.contains("22/tcp"));
    assert!(text.contains("OpenSSH"));
    assert!(text.contains("2 open"));
    assert!(text.contains("Counts consistent"));
    assert!(text.chars().count() <= MAX_MESSAGE_CHARS);
}

#[test]
fn unparseable_output_falls_back_to_raw_excerpt() {
    let raw = "some banner\ncompletely unexpected text\nnothing to see";
    let report = parser::parse(raw);
    assert!(report.ports.is_empty());

    let text = format_raw_fallback("example.com", "basic", 2, raw);
    assert!(text.contains("raw scanner output"));
    assert!(text.contains("completely unexpected text"));
}

#[test]
fn oversized_report_is_truncated() {
    let mut raw = String::from("Nmap scan report for example.com\nHost is up.\nPORT STATE SERVICE\n");
    for port in 1..=2000 {
        raw.push_str(&format!("{port}/tcp open service{port}\n"));
    }
    let report = parser::parse(&raw);
    let text = format_report(&report, "example.com", "port", 30, &raw);
    assert!(text.chars().count() <= MAX_MESSAGE_CHARS);
}

#[test]
fn target_validation_blocks_shell_shapes() {
    for bad in [
        "example.com; rm -rf /",
        "$(whoami)",
        "`id`",
        "host|cat /etc/passwd",
        "a b",
        "-iL /etc/hosts",
        "",
    ] {
        let err = ScanRequest::new(bad, ScanProfile::Basic).unwrap_err();
        assert!(
            matches!(err, BotError::InvalidCommandArguments(_)),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn target_validation_accepts_normal_shapes() {
    for good in [
        "example.com",
        "10.0.0.1",
        "2001:db8::1",
        "192.168.1.0/24",
        "sub-domain.example.org",
    ] {
        assert!(
            ScanRequest::new(good, ScanProfile::Basic).is_ok(),
            "{good:?} should be accepted"
        );
    }
}

#[test]
fn profiles_map_to_distinct_flag_sets() {
    let profiles = [
        ScanProfile::Basic,
        ScanProfile::Quick,
        ScanProfile::Detailed,
        ScanProfile::Port,
        ScanProfile::Os,
        ScanProfile::Full,
    ];
    for profile in profiles {
        assert!(profile.args().contains(&"-T4"));
        assert!(profile.timeout().as_secs() >= 60);
        // No profile smuggles the target into its fixed args
        assert!(profile.args().iter().all(|a| a.starts_with('-') || a.chars().all(char::is_numeric)));
    }
    assert_ne!(ScanProfile::Basic.args(), ScanProfile::Full.args());
}
