use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Configuration YAML pointing the client at `endpoint`
#[allow(dead_code)]
pub fn config_yaml_for(endpoint: &str) -> String {
    format!(
        "agent:\n  endpoint: {}\n  agent_id: support-bot\n  request_timeout_seconds: 5\nui:\n  notice_ttl_seconds: 5\n  viewport_height: 10\n",
        endpoint
    )
}
