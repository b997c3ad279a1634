use super::*;

#[test]
fn test_parse_run() {
    let cli = Cli::try_parse_from(["stickerbot", "run"]).unwrap();
    assert!(matches!(cli.command, Commands::Run));
}

#[test]
fn test_parse_sticker_defaults() {
    let cli = Cli::try_parse_from(["stickerbot", "sticker", "photo.jpg"]).unwrap();
    match cli.command {
        Commands::Sticker {
            input,
            output,
            transparent,
        } => {
            assert_eq!(input, PathBuf::from("photo.jpg"));
            assert!(output.is_none());
            assert!(!transparent);
        }
        _ => panic!("expected sticker subcommand"),
    }
}

#[test]
fn test_parse_sticker_with_flags() {
    let cli = Cli::try_parse_from([
        "stickerbot",
        "sticker",
        "in.png",
        "--output",
        "out.webp",
        "--transparent",
    ])
    .unwrap();
    match cli.command {
        Commands::Sticker {
            output, transparent, ..
        } => {
            assert_eq!(output, Some(PathBuf::from("out.webp")));
            assert!(transparent);
        }
        _ => panic!("expected sticker subcommand"),
    }
}

#[test]
fn test_parse_scan_default_profile() {
    let cli = Cli::try_parse_from(["stickerbot", "scan", "example.com"]).unwrap();
    match cli.command {
        Commands::Scan { target, profile } => {
            assert_eq!(target, "example.com");
            assert_eq!(profile, "basic");
        }
        _ => panic!("expected scan subcommand"),
    }
}

#[test]
fn test_parse_scan_with_profile() {
    let cli =
        Cli::try_parse_from(["stickerbot", "scan", "10.0.0.1", "--profile", "quick"]).unwrap();
    match cli.command {
        Commands::Scan { profile, .. } => assert_eq!(profile, "quick"),
        _ => panic!("expected scan subcommand"),
    }
}

#[test]
fn test_missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["stickerbot"]).is_err());
}
