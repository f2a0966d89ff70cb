//! Integration tests for Configuration System

use super::test_utils::with_xdg_env;
use outreach::config::{ConfigLoader, ProviderType};
use outreach::types::Tone;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_global(config_home: &Path, content: &str) {
    let dir = config_home.join("outreach");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), content).unwrap();
}

fn write_workspace(workspace: &Path, name: &str, content: &str) {
    let dir = workspace.join("config");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_defaults_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.provider.provider_type, ProviderType::Gemini);
        assert_eq!(config.provider.model, "gemini-2.5-flash");
        assert_eq!(config.provider.timeout_secs, 120);
        assert_eq!(config.provider.api_key, None);
        assert_eq!(config.sender.tone, Tone::Professional);
        assert_eq!(config.sender.specific_focus, "Customer support automation");
        assert_eq!(config.bulk.delay_ms, 0);
        assert_eq!(config.logging.output, "stderr");
        assert!(config.validate().is_ok());
    });
}

#[test]
fn test_workspace_file_overrides_global_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_global(
            test_dir.path(),
            r#"
[sender]
sender_name = "Global Sender"
sender_portfolio = "global.dev"
tone = "Casual"
"#,
        );
        write_workspace(
            workspace.path(),
            "config.toml",
            r#"
[sender]
sender_name = "Workspace Sender"
"#,
        );

        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.sender.sender_name.as_deref(), Some("Workspace Sender"));
        assert_eq!(config.sender.sender_portfolio.as_deref(), Some("global.dev"));
        assert_eq!(config.sender.tone, Tone::Casual);
    });
}

#[test]
fn test_environment_file_overrides_base_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_workspace(workspace.path(), "config.toml", "[bulk]\ndelay_ms = 100\n");
        write_workspace(workspace.path(), "staging.toml", "[bulk]\ndelay_ms = 750\n");
        std::env::set_var("OUTREACH_ENV", "staging");

        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.bulk.delay_ms, 750);
    });
}

#[test]
fn test_environment_variables_override_files() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_workspace(
            workspace.path(),
            "config.toml",
            "[bulk]\ndelay_ms = 100\n\n[sender]\ntone = \"Direct\"\n",
        );
        std::env::set_var("OUTREACH__BULK__DELAY_MS", "250");
        std::env::set_var("OUTREACH__SENDER__TONE", "persuasive");

        let loaded = ConfigLoader::load(workspace.path());

        std::env::remove_var("OUTREACH__BULK__DELAY_MS");
        std::env::remove_var("OUTREACH__SENDER__TONE");

        let config = loaded.unwrap();
        assert_eq!(config.bulk.delay_ms, 250);
        assert_eq!(config.sender.tone, Tone::Persuasive);
    });
}

#[test]
fn test_api_key_fallback_order() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        std::env::set_var("API_KEY", "generic");
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("generic"));

        std::env::set_var("GEMINI_API_KEY", "gemini-specific");
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("gemini-specific"));

        std::env::set_var("OUTREACH_API_KEY", "outreach-specific");
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("outreach-specific"));
        assert_eq!(config.provider.api_key_status(), "configured");
    });
}

#[test]
fn test_api_key_from_file_wins_over_environment() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_workspace(
            workspace.path(),
            "config.toml",
            "[provider]\napi_key = \"from-file\"\n",
        );
        std::env::set_var("OUTREACH_API_KEY", "from-env");
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.provider.api_key.as_deref(), Some("from-file"));
    });
}

#[test]
fn test_load_from_file_fills_provider_default_model() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config_file = test_dir.path().join("custom.toml");
        fs::write(
            &config_file,
            r#"
[provider]
provider_type = "openai"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&config_file).unwrap();
        assert_eq!(config.provider.provider_type, ProviderType::OpenAI);
        assert_eq!(config.provider.model, "gpt-4o-mini");
        assert_eq!(config.provider.api_key_status(), "missing");
        assert_eq!(config.logging.format, "json");
        assert!(config.validate().is_ok());
    });
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        assert!(ConfigLoader::load_from_file(&test_dir.path().join("absent.toml")).is_err());
    });
}

#[test]
fn test_invalid_endpoint_fails_validation() {
    let test_dir = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        write_workspace(
            workspace.path(),
            "config.toml",
            "[provider]\nprovider_type = \"ollama\"\nendpoint = \"localhost:11434\"\n",
        );
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.provider.model, "llama3");
        assert_eq!(config.provider.api_key_status(), "not required");
        assert!(config.ensure_valid().is_err());
    });
}
