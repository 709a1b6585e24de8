use std::process::Command;

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fastauth-app"));
    command.env("RUST_LOG", "error").env_remove("FASTAUTH_WALLET__CONTRACT_ID");
    command
}

#[test]
fn check_mode_reports_placeholders() {
    let output = binary()
        .args(["--log-level", "error", "check"])
        .output()
        .expect("Failed to start fastauth-app binary");

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("network_id:  testnet"));
    assert!(stdout.contains("Placeholder values present"));
}

#[test]
fn mock_sign_in_once_succeeds() {
    let output = binary()
        .args([
            "--log-level",
            "error",
            "sign-in",
            "--mock",
            "--once",
            "--email",
            "  User@Example.com ",
            "--contract-id",
            "contract.near",
        ])
        .output()
        .expect("Failed to start fastauth-app binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Disconnected"));
}

#[test]
fn mock_sign_in_rejects_invalid_email() {
    let output = binary()
        .args([
            "--log-level",
            "error",
            "sign-in",
            "--mock",
            "--once",
            "--email",
            "not-an-email",
        ])
        .output()
        .expect("Failed to start fastauth-app binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter a valid email address"));
}

#[test]
fn init_writes_loadable_config() {
    let path = std::env::temp_dir().join(format!("fastauth-init-{}.yaml", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let output = binary()
        .args(["init", "--non-interactive", "--output"])
        .arg(&path)
        .output()
        .expect("Failed to start fastauth-app binary");
    assert!(output.status.success());

    let output = binary()
        .arg("--config")
        .arg(&path)
        .arg("check")
        .output()
        .expect("Failed to start fastauth-app binary");
    assert!(output.status.success());

    std::fs::remove_file(&path).unwrap();
}
