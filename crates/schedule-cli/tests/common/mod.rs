use std::path::Path;
use std::process::Output;

use tokio::process::Command;

/// Run the CLI binary against `api`, keeping credentials in `data_dir`.
pub async fn run_cli(args: &[&str], api: &str, data_dir: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_schedule"));
    cmd.args(args);
    cmd.env("SCHEDULE_API_URL", api);
    cmd.env("SCHEDULE_DATA_DIR", data_dir);
    cmd.env_remove("SCHEDULE_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().await.expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub async fn run_cli_success(args: &[&str], api: &str, data_dir: &Path) -> String {
    let output = run_cli(args, api, data_dir).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub async fn run_cli_failure(args: &[&str], api: &str, data_dir: &Path) -> String {
    let output = run_cli(args, api, data_dir).await;
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Write a credential file the way `schedule login` leaves it.
pub fn seed_credentials(data_dir: &Path, access: &str, refresh: &str) {
    std::fs::create_dir_all(data_dir).unwrap();
    let stored = serde_json::json!({
        "accessToken": access,
        "refreshToken": refresh,
    });
    std::fs::write(
        data_dir.join("credentials.json"),
        serde_json::to_string_pretty(&stored).unwrap(),
    )
    .unwrap();
}

/// Read back the stored credential map.
pub fn stored_credentials(data_dir: &Path) -> serde_json::Value {
    let path = data_dir.join("credentials.json");
    match std::fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => serde_json::from_str(&text).unwrap(),
        _ => serde_json::json!({}),
    }
}
