use anyhow::Result;

#[derive(Debug)]
enum CheckResult {
    Pass(String),
    Fail(String),
    Skip(String),
}

impl CheckResult {
    fn label(&self) -> &'static str {
        match self {
            Self::Pass(_) => "PASS",
            Self::Fail(_) => "FAIL",
            Self::Skip(_) => "SKIP",
        }
    }

    fn detail(&self) -> &str {
        match self {
            Self::Pass(s) | Self::Fail(s) | Self::Skip(s) => s,
        }
    }

    fn is_fail(&self) -> bool {
        matches!(self, Self::Fail(_))
    }
}

fn print_check(name: &str, result: &CheckResult) {
    println!("  {:<6} {:<24} {}", result.label(), name, result.detail());
}

fn check_home_dir() -> CheckResult {
    match crate::utils::get_bot_home() {
        Ok(path) => match std::fs::create_dir_all(&path) {
            Ok(()) => {
                let probe = path.join(".doctor_probe");
                match std::fs::write(&probe, "ok") {
                    Ok(()) => {
                        let _ = std::fs::remove_file(&probe);
                        CheckResult::Pass(format!("{} (writable)", path.display()))
                    }
                    Err(e) => {
                        CheckResult::Fail(format!("{} (not writable: {})", path.display(), e))
                    }
                }
            }
            Err(e) => CheckResult::Fail(format!("cannot create {}: {}", path.display(), e)),
        },
        Err(e) => CheckResult::Fail(format!("cannot determine home: {}", e)),
    }
}

fn check_config() -> CheckResult {
    let path = match crate::config::get_config_path() {
        Ok(path) => path,
        Err(e) => return CheckResult::Fail(format!("cannot determine path: {}", e)),
    };
    if !path.exists() {
        return CheckResult::Skip(format!("{} not found, using defaults", path.display()));
    }
    match crate::config::load_config(Some(&path)) {
        Ok(_) => CheckResult::Pass(format!("{}", path.display())),
        Err(e) => CheckResult::Fail(format!("{:#}", e)),
    }
}

fn check_scanner() -> CheckResult {
    match which::which(crate::scan::runner::SCANNER_BIN) {
        Ok(path) => CheckResult::Pass(format!("{}", path.display())),
        Err(_) => CheckResult::Fail(format!(
            "{} not found on PATH; !nmap commands will be refused",
            crate::scan::runner::SCANNER_BIN
        )),
    }
}

fn check_media_dir() -> CheckResult {
    match crate::utils::media::media_dir() {
        Ok(path) => CheckResult::Pass(format!("{}", path.display())),
        Err(e) => CheckResult::Fail(format!("{:#}", e)),
    }
}

/// Run environment checks and report them. Exits non-zero on any failure
/// so scripts can gate on the result.
pub fn run() -> Result<()> {
    println!("stickerbot doctor v{}\n", crate::VERSION);

    let checks = [
        ("home directory", check_home_dir()),
        ("config", check_config()),
        ("media directory", check_media_dir()),
        ("scanner binary", check_scanner()),
    ];

    for (name, result) in &checks {
        print_check(name, result);
    }

    let failures = checks.iter().filter(|(_, r)| r.is_fail()).count();
    println!();
    if failures > 0 {
        println!("{failures} check(s) failed");
        std::process::exit(1);
    }
    println!("All checks passed");
    Ok(())
}
