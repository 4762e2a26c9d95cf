//! Integration tests for configuration loading

use lexanon::anonymization::config::RecognizerKind;
use lexanon::anonymization::{AnonymizationEngine, ProcessingMode};
use lexanon::config::{load_config, load_config_from_str};
use lexanon::domain::LexanonError;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let file = write_config(
        r#"
[application]
log_level = "debug"

[anonymization]
default_mode = "enhanced"
recognizer = "none"
person_confidence = 0.7
organization_confidence = 0.6

[anonymization.remote]
enabled = false
url = "https://models.cabinet.example:11434"
model = "mistral:7b"
custom_prompt = "Extrais les noms."

[anonymization.audit]
enabled = false
json_format = false

[logging]
local_enabled = true
local_path = "/var/log/lexanon"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.anonymization.default_mode, ProcessingMode::Enhanced);
    assert_eq!(config.anonymization.recognizer, RecognizerKind::None);
    assert_eq!(config.anonymization.person_confidence, 0.7);
    assert_eq!(config.anonymization.organization_confidence, 0.6);
    assert!(!config.anonymization.remote.enabled);
    assert_eq!(config.anonymization.remote.model, "mistral:7b");
    assert_eq!(
        config.anonymization.remote.custom_prompt.as_deref(),
        Some("Extrais les noms.")
    );
    assert!(!config.anonymization.audit.json_format);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/var/log/lexanon");
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = load_config_from_str("").unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.anonymization.default_mode, ProcessingMode::Basic);
    assert_eq!(config.anonymization.recognizer, RecognizerKind::Heuristic);
    assert!(config.anonymization.pattern_library.is_none());
    assert!(config.anonymization.remote.enabled);
    assert_eq!(config.anonymization.remote.url, "http://localhost:11434");
    assert!(!config.anonymization.audit.enabled);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_legacy_mode_names() {
    let config = load_config_from_str("[anonymization]\ndefault_mode = \"advanced\"\n").unwrap();
    assert_eq!(config.anonymization.default_mode, ProcessingMode::Enhanced);

    let config = load_config_from_str("[anonymization]\ndefault_mode = \"ollama\"\n").unwrap();
    assert_eq!(config.anonymization.default_mode, ProcessingMode::Remote);
}

#[test]
fn test_env_var_substitution() {
    std::env::set_var("LEXANON_IT_OLLAMA_URL", "http://gpu-box:11434");
    let config = load_config_from_str(
        "[anonymization.remote]\nurl = \"${LEXANON_IT_OLLAMA_URL}\"\n",
    )
    .unwrap();
    std::env::remove_var("LEXANON_IT_OLLAMA_URL");

    assert_eq!(config.anonymization.remote.url, "http://gpu-box:11434");
}

#[test]
fn test_missing_env_var_is_reported() {
    std::env::remove_var("LEXANON_IT_UNSET_MODEL");
    let err = load_config_from_str("[anonymization.remote]\nmodel = \"${LEXANON_IT_UNSET_MODEL}\"\n")
        .unwrap_err();

    assert!(matches!(err, LexanonError::Configuration(_)));
    assert!(err.to_string().contains("LEXANON_IT_UNSET_MODEL"));
}

#[test]
fn test_env_overrides() {
    std::env::set_var("LEXANON_ANONYMIZATION_REMOTE_TIMEOUT_SECONDS", "5");
    std::env::set_var("LEXANON_ANONYMIZATION_AUDIT_JSON_FORMAT", "false");
    let config = load_config_from_str(
        "[anonymization.remote]\ntimeout_seconds = 60\n\n[anonymization.audit]\njson_format = true\n",
    );
    std::env::remove_var("LEXANON_ANONYMIZATION_REMOTE_TIMEOUT_SECONDS");
    std::env::remove_var("LEXANON_ANONYMIZATION_AUDIT_JSON_FORMAT");

    let config = config.unwrap();
    assert_eq!(config.anonymization.remote.timeout_seconds, 5);
    assert!(!config.anonymization.audit.json_format);
}

#[test]
fn test_invalid_values_are_rejected() {
    for content in [
        "[application]\nlog_level = \"verbose\"\n",
        "[anonymization]\ndefault_mode = \"turbo\"\n",
        "[anonymization]\nperson_confidence = 1.5\n",
        "[anonymization.remote]\nurl = \"ftp://localhost\"\n",
        "[anonymization.remote]\nurl = \"not a url\"\n",
        "[anonymization.remote]\nmodel = \"  \"\n",
        "[logging]\nlocal_enabled = true\nlocal_path = \"\"\n",
    ] {
        let result = load_config_from_str(content);
        assert!(
            matches!(result, Err(LexanonError::Configuration(_))),
            "accepted: {content}"
        );
    }
}

#[test]
fn test_missing_pattern_library_is_rejected() {
    let result = load_config_from_str(
        "[anonymization]\npattern_library = \"/nonexistent/rules.toml\"\n",
    );
    assert!(result.is_err());
}

#[tokio::test]
async fn test_custom_pattern_library() {
    let temp_dir = TempDir::new().unwrap();
    let rules_path = temp_dir.path().join("rules.toml");
    std::fs::write(
        &rules_path,
        r#"
[[rule]]
name = "case_number"
entity_type = "legal_reference"
replacement = "[Affaire]"
patterns = ['''\bAFF-[0-9]{4}\b''']
"#,
    )
    .unwrap();

    let content = format!(
        "[anonymization]\npattern_library = \"{}\"\n\n[anonymization.remote]\nenabled = false\n",
        rules_path.display()
    );
    let config = load_config_from_str(&content).unwrap();
    let engine = AnonymizationEngine::new(config.anonymization).unwrap();

    let text = "Affaire AFF-2024, contact jean@test.fr";
    let result = engine.process(text, ProcessingMode::Basic).await;

    // Only the custom library is loaded
    assert_eq!(result.entities.len(), 1);
    assert_eq!(result.entities[0].text, "AFF-2024");
    assert_eq!(
        engine.redact(text, &result.entities).unwrap(),
        "Affaire [Affaire], contact jean@test.fr"
    );
}

#[test]
fn test_broken_pattern_library_fails_engine_creation() {
    let temp_dir = TempDir::new().unwrap();
    let rules_path = temp_dir.path().join("rules.toml");
    std::fs::write(&rules_path, "[[rule]]\nname = \"x\"\n").unwrap();

    let content = format!(
        "[anonymization]\npattern_library = \"{}\"\n",
        rules_path.display()
    );
    let config = load_config_from_str(&content).unwrap();
    assert!(AnonymizationEngine::new(config.anonymization).is_err());
}
