//! Manifests loaded from disk drive a full bootstrap run.

use std::io::Write;

use serde_json::json;
use service_bootstrap::config::{load_manifest, ConfigError, ValidationError};
use service_bootstrap::lifecycle::EntryOutcome;
use service_bootstrap::registry::ServiceRegistry;

mod common;
use common::{Behavior, Journal, RecordingService};

const MANIFEST: &str = r#"
[settings]
label = "api"

[bootstrap]
database = true
legacy = false
mailer = "@acme/mailer"

[config.database]
url = "postgres://localhost/app"

[config.mailer]
relay = "smtp.local"
"#;

fn write_manifest(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_manifest_runs_in_file_order() {
    let file = write_manifest(MANIFEST);
    let manifest = load_manifest(file.path()).unwrap();

    let journal = Journal::default();
    let registry = ServiceRegistry::new();
    let database = RecordingService::new("database", &journal, Behavior::Succeed);
    let mailer = RecordingService::new("mailer", &journal, Behavior::Succeed);
    registry.set("database", database.clone());
    registry.set("mailer", mailer.clone());

    let report = manifest
        .bootstrapper()
        .service_locator(registry.locator())
        .run()
        .await
        .unwrap();

    let ids: Vec<&str> = report.outcomes.iter().map(EntryOutcome::id).collect();
    assert_eq!(ids, vec!["database", "legacy", "mailer"]);
    assert_eq!(journal.with_prefix("bootstrap:"), vec!["database", "mailer"]);
    assert_eq!(
        database.received(),
        vec![Some(json!({ "url": "postgres://localhost/app" }))]
    );
    assert_eq!(mailer.received(), vec![Some(json!({ "relay": "smtp.local" }))]);
}

#[test]
fn test_manifest_plan_shows_fallback() {
    let file = write_manifest(MANIFEST);
    let manifest = load_manifest(file.path()).unwrap();

    let plan = manifest.bootstrapper().plan().unwrap();

    assert_eq!(plan.len(), 3);
    assert!(!plan[1].active);
    assert_eq!(plan[2].config_key.as_deref(), Some("@acme/mailer"));
    assert_eq!(plan[2].fallback_key.as_deref(), Some("mailer"));
}

#[test]
fn test_invalid_manifest_lists_all_problems() {
    let file = write_manifest(
        r#"
        [settings]
        label = ""
        path_separator = "@"

        [bootstrap]
        mailer = ""
        "#,
    );

    match load_manifest(file.path()) {
        Err(ConfigError::Validation(errors)) => assert_eq!(
            errors,
            vec![
                ValidationError::EmptyLabel,
                ValidationError::SeparatorIsMarker('@'),
                ValidationError::BlankConfigPath("mailer".into()),
            ]
        ),
        other => panic!("expected validation errors, got {:?}", other.map(|_| ())),
    }
}
