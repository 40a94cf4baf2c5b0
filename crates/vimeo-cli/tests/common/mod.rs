use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// SHA-256 of "hello". Any well-formed fingerprint will do: plain http
/// never consults it, but an empty set refuses to send.
pub const TEST_FINGERPRINT: &str =
    "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

/// Run the CLI with a custom HOME directory for isolated profile storage.
pub fn run_cli_with_env(args: &[&str], home: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vimeo"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    for var in [
        "VIMEO_API_URL",
        "VIMEO_CERT_FINGERPRINTS",
        "VIMEO_CLIENT_ID",
        "VIMEO_CLIENT_SECRET",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so the mock server keeps serving.
pub async fn run_cli(args: &[&str], home: &Path) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let home = home.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli_with_env(&args, &home)
    })
    .await
    .expect("CLI task panicked")
}

/// Run the CLI and expect success.
pub async fn run_cli_success(args: &[&str], home: &Path) -> String {
    let output = run_cli(args, home).await;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Where the CLI keeps its profile under `home`.
pub fn profile_path(home: &Path) -> PathBuf {
    home.join("data").join("vimeo").join("profile.json")
}

/// Read the stored profile as JSON.
pub fn read_profile(home: &Path) -> serde_json::Value {
    let json = std::fs::read_to_string(profile_path(home)).expect("profile not written");
    serde_json::from_str(&json).expect("profile is not JSON")
}
