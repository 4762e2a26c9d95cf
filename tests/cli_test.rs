//! End-to-end tests for the CLI commands on temporary files

use lexanon::anonymization::{Entity, EntitySource, EntityType, ProcessingMode, ProcessingResult, Span};
use lexanon::cli::commands::anonymize::AnonymizeArgs;
use lexanon::cli::commands::init::InitArgs;
use lexanon::cli::commands::process::ProcessArgs;
use lexanon::cli::commands::redact::RedactArgs;
use lexanon::cli::commands::validate::ValidateArgs;
use lexanon::cli::commands::{EXIT_CONFIG, EXIT_INPUT};
use lexanon::domain::EntityId;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DOCUMENT: &str = "  Attendu que Madame Sophie Laurent, joignable au 06 12 34 56 78,\n\
\n\
sollicite l'application de l'article 700.  \n";

/// Config path that does not exist, so commands run on defaults
fn no_config(dir: &TempDir) -> String {
    dir.path().join("absent.toml").to_string_lossy().to_string()
}

fn write_input(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("conclusions.txt");
    std::fs::write(&path, DOCUMENT).unwrap();
    path
}

fn read_result(path: &Path) -> ProcessingResult {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_process_then_redact() {
    let dir = TempDir::new().unwrap();
    let config = no_config(&dir);
    let input = write_input(&dir);
    let entities_path = dir.path().join("entities.json");

    let process = ProcessArgs {
        input: input.clone(),
        mode: Some(ProcessingMode::Enhanced),
        output: Some(entities_path.clone()),
    };
    assert_eq!(process.execute(&config).await.unwrap(), 0);

    let result = read_result(&entities_path);
    assert_eq!(result.stats.mode_used, ProcessingMode::Enhanced);
    let types: Vec<EntityType> = result.entities.iter().map(|e| e.entity_type).collect();
    assert!(types.contains(&EntityType::Person));
    assert!(types.contains(&EntityType::Phone));
    assert!(types.contains(&EntityType::LegalReference));

    let output = dir.path().join("out").join("conclusions.anon.txt");
    let redact = RedactArgs {
        input,
        entities: entities_path,
        edits: None,
        output: Some(output.clone()),
    };
    assert_eq!(redact.execute(&config).await.unwrap(), 0);

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "Attendu que Madame Personne A, joignable au 06 XX XX XX XX,\n\
\n\
sollicite l'application de l'[Référence Anonymisée].\n"
    );
}

#[tokio::test]
async fn test_redact_with_edits() {
    let dir = TempDir::new().unwrap();
    let config = no_config(&dir);
    let input = write_input(&dir);
    let entities_path = dir.path().join("entities.json");

    let process = ProcessArgs {
        input: input.clone(),
        mode: Some(ProcessingMode::Basic),
        output: Some(entities_path.clone()),
    };
    assert_eq!(process.execute(&config).await.unwrap(), 0);

    let result = read_result(&entities_path);
    let phone = result
        .entities
        .iter()
        .find(|e| e.entity_type == EntityType::Phone)
        .unwrap();
    let reference = result
        .entities
        .iter()
        .find(|e| e.entity_type == EntityType::LegalReference)
        .unwrap();

    let edits_path = dir.path().join("edits.json");
    std::fs::write(
        &edits_path,
        serde_json::json!([
            { "id": phone.id, "replacement": "[Téléphone]" },
            { "id": reference.id, "selected": false }
        ])
        .to_string(),
    )
    .unwrap();

    let output = dir.path().join("redacted.txt");
    let redact = RedactArgs {
        input,
        entities: entities_path,
        edits: Some(edits_path),
        output: Some(output.clone()),
    };
    assert_eq!(redact.execute(&config).await.unwrap(), 0);

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("joignable au [Téléphone],"));
    assert!(written.contains("l'article 700."));
}

#[tokio::test]
async fn test_redact_rejects_overlapping_entities() {
    let dir = TempDir::new().unwrap();
    let config = no_config(&dir);
    let input = dir.path().join("court.txt");
    std::fs::write(&input, "Jean Dupont").unwrap();

    let mut first = Entity::new(
        EntityType::Person,
        EntitySource::Manual,
        "Jean Dupont",
        Span::new(0, 11),
        "Personne A",
    );
    first.id = EntityId::new("first").unwrap();
    let mut second = first.clone();
    second.id = EntityId::new("second").unwrap();
    second.positions = vec![Span::new(5, 11)];

    let entities_path = dir.path().join("entities.json");
    std::fs::write(
        &entities_path,
        serde_json::to_string(&vec![first, second]).unwrap(),
    )
    .unwrap();

    let output = dir.path().join("redacted.txt");
    let redact = RedactArgs {
        input,
        entities: entities_path,
        edits: None,
        output: Some(output.clone()),
    };

    assert_eq!(redact.execute(&config).await.unwrap(), EXIT_INPUT);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_redact_rejects_unknown_edit_id() {
    let dir = TempDir::new().unwrap();
    let config = no_config(&dir);
    let input = write_input(&dir);

    let entities_path = dir.path().join("entities.json");
    std::fs::write(&entities_path, "[]").unwrap();
    let edits_path = dir.path().join("edits.json");
    std::fs::write(&edits_path, r#"[{"id":"missing","selected":false}]"#).unwrap();

    let redact = RedactArgs {
        input,
        entities: entities_path,
        edits: Some(edits_path),
        output: None,
    };
    assert_eq!(redact.execute(&config).await.unwrap(), EXIT_INPUT);
}

#[tokio::test]
async fn test_anonymize_writes_document_and_entities() {
    let dir = TempDir::new().unwrap();
    let config = no_config(&dir);
    let input = write_input(&dir);
    let output = dir.path().join("anon.txt");
    let entities_output = dir.path().join("anon.json");

    let anonymize = AnonymizeArgs {
        input,
        mode: None,
        output: output.clone(),
        entities_output: Some(entities_output.clone()),
    };
    assert_eq!(anonymize.execute(&config).await.unwrap(), 0);

    // Default mode is basic: the name stays
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("Attendu que Madame Sophie Laurent, joignable au 06 XX XX XX XX,"));

    let result = read_result(&entities_output);
    assert_eq!(result.stats.mode_used, ProcessingMode::Basic);
    assert_eq!(result.entities.len(), 2);
}

#[tokio::test]
async fn test_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let process = ProcessArgs {
        input: dir.path().join("nope.txt"),
        mode: None,
        output: None,
    };
    assert_eq!(process.execute(&no_config(&dir)).await.unwrap(), EXIT_INPUT);
}

#[tokio::test]
async fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("lexanon.toml");
    std::fs::write(&config_path, "[application]\nlog_level = \"chatty\"\n").unwrap();

    let process = ProcessArgs {
        input: write_input(&dir),
        mode: None,
        output: None,
    };
    let code = process
        .execute(&config_path.to_string_lossy())
        .await
        .unwrap();
    assert_eq!(code, EXIT_CONFIG);
}

#[tokio::test]
async fn test_init_then_validate() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("lexanon.toml").to_string_lossy().to_string();

    let init = InitArgs {
        output: config_path.clone(),
        with_examples: true,
        force: false,
    };
    assert_eq!(init.execute().await.unwrap(), 0);
    assert_eq!(init.execute().await.unwrap(), EXIT_CONFIG);

    let forced = InitArgs {
        output: config_path.clone(),
        with_examples: false,
        force: true,
    };
    assert_eq!(forced.execute().await.unwrap(), 0);

    assert_eq!(ValidateArgs {}.execute(&config_path).await.unwrap(), 0);
}
