use std::{fs, sync::Once};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use schemaform::{
    app::{Configurator, ConfiguratorError, FormOptions, StatusKind},
    catalog::{CatalogError, DirectoryCatalog, MemoryCatalog, SchemaCatalog},
    domain::SchemaRef,
    form::{FieldPath, FormCommand},
    io::{OutputDestination, OutputOptions},
};
use serde_json::{Value, json};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn dns_schema() -> Value {
    json!({
        "id": "dns-blocking",
        "name": "Advanced Blocking",
        "description": "Block domains per network group.",
        "fields": [
            {"name": "enableBlocking", "type": "boolean", "default": true},
            {"name": "blockingAnswerTtl", "type": "number", "default": 30},
            {"name": "blockListUrls", "type": "array"}
        ]
    })
}

fn catalog() -> MemoryCatalog {
    MemoryCatalog::new()
        .with_schema("zeta.json", json!({"id": "zeta", "name": "zeta logger", "fields": []}))
        .with_schema("dns.json", dns_schema())
        .with_schema("broken.json", json!({"name": "No Id"}))
        .with_schema("Auth.json", json!({"id": "auth", "name": "Auth", "fields": [
            {"name": "realm", "type": "string", "default": "home"}
        ]}))
}

fn loaded() -> Configurator<MemoryCatalog> {
    init_tracing();
    let mut configurator = Configurator::new(catalog());
    configurator.load_apps();
    configurator
}

#[test]
fn load_apps_filters_and_sorts_by_name() {
    let configurator = loaded();
    let names: Vec<&str> = configurator.apps().iter().map(|app| app.name.as_str()).collect();
    assert_eq!(names, ["Advanced Blocking", "Auth", "zeta logger"]);
    assert_eq!(configurator.apps()[0].schema_ref, SchemaRef::new("dns.json"));
}

#[test]
fn failing_catalog_yields_empty_list_and_error_status() {
    struct Offline;

    impl SchemaCatalog for Offline {
        fn list_schemas(&self) -> Result<Vec<SchemaRef>, CatalogError> {
            Err(CatalogError::UnknownRef(SchemaRef::new("config-files.json")))
        }

        fn load_schema(&self, reference: &SchemaRef) -> Result<schemaform::domain::AppSchema, CatalogError> {
            Err(CatalogError::UnknownRef(reference.clone()))
        }
    }

    let mut configurator = Configurator::new(Offline);
    assert!(configurator.load_apps().is_empty());
    assert_eq!(configurator.status().kind(), StatusKind::Error);
    assert_eq!(configurator.status().message(), "Error loading apps - please refresh");
}

#[test]
fn select_builds_a_session_from_defaults() {
    let mut configurator = loaded();
    assert!(configurator.select("dns-blocking"));
    let session = configurator.session().unwrap();
    assert_eq!(session.name(), "Advanced Blocking");
    assert_eq!(
        session.collect(),
        json!({"enableBlocking": true, "blockingAnswerTtl": 30})
    );
    assert_eq!(configurator.export_file_name().as_deref(), Some("dns-blocking-config.json"));
}

#[test]
fn empty_id_deselects_and_unknown_id_is_ignored() {
    let mut configurator = loaded();
    configurator.select("auth");
    assert!(configurator.select("nope"));
    assert_eq!(configurator.session().map(|session| session.id()), Some("auth"));
    assert!(!configurator.select(""));
    assert!(configurator.session().is_none());
}

#[test]
fn stale_selection_does_not_replace_newer_one() {
    let mut configurator = loaded();
    let first = configurator.begin_selection("dns-blocking").unwrap();
    let second = configurator.begin_selection("auth").unwrap();

    let auth = configurator.catalog().load_schema(second.schema_ref());
    assert!(configurator.complete_selection(second, auth));

    let dns = configurator.catalog().load_schema(first.schema_ref());
    assert!(!configurator.complete_selection(first, dns));
    assert_eq!(configurator.session().map(|session| session.id()), Some("auth"));
}

#[test]
fn failed_schema_load_reports_app_name() {
    let mut configurator = loaded();
    let ticket = configurator.begin_selection("zeta").unwrap();
    let failure = Err(CatalogError::UnknownRef(ticket.schema_ref().clone()));
    configurator.complete_selection(ticket, failure);
    assert!(configurator.session().is_none());
    assert_eq!(
        configurator.status().message(),
        "Failed to load configuration for zeta logger"
    );
}

#[test]
fn import_success_and_failure_set_status() {
    let mut configurator = loaded();
    configurator.select("dns-blocking");

    configurator
        .import_text("  {\"blockingAnswerTtl\": 120, \"blockListUrls\": \"a.txt, b.txt\"}  ")
        .unwrap();
    assert_eq!(configurator.status().kind(), StatusKind::Success);
    assert_eq!(configurator.status().message(), "Configuration imported successfully!");

    let err = configurator.import_text("{oops").unwrap_err();
    assert!(matches!(err, ConfiguratorError::Import(_)));
    assert_eq!(configurator.status().message(), "Invalid JSON. Please check your configuration.");

    let text = configurator.export_text().unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(&text).unwrap(),
        json!({"enableBlocking": true, "blockingAnswerTtl": 120, "blockListUrls": ["a.txt", "b.txt"]})
    );
    assert!(text.contains("\n  \"blockingAnswerTtl\": 120"));
}

#[test]
fn reset_restores_defaults() {
    let mut configurator = loaded();
    configurator.select("auth");
    configurator
        .apply(FormCommand::SetValue {
            path: FieldPath::root("realm"),
            value: "office".into(),
        })
        .unwrap();
    configurator
        .handle_key(&FieldPath::root("realm"), &KeyEvent::new(KeyCode::Char('!'), KeyModifiers::NONE))
        .unwrap();
    assert_eq!(configurator.session().unwrap().collect(), json!({"realm": "office!"}));
    configurator.reset();
    assert_eq!(configurator.session().unwrap().collect(), json!({"realm": "home"}));
}

#[test]
fn actions_without_selection_fail() {
    let mut configurator = loaded();
    assert!(matches!(configurator.import_text("{}"), Err(ConfiguratorError::NoSelection)));
    assert!(configurator.export_text().is_err());
    assert!(configurator.export_file_name().is_none());
}

#[test]
fn directory_catalog_drives_a_full_session() {
    init_tracing();
    let temp = tempfile::tempdir().unwrap();
    let dir = temp.path();
    fs::write(
        dir.join("config-files.json"),
        r#"{"configFiles": ["dns.json", "missing.json", "garbage.json"]}"#,
    )
    .unwrap();
    fs::write(dir.join("dns.json"), dns_schema().to_string()).unwrap();
    fs::write(dir.join("garbage.json"), "{ not json").unwrap();

    let mut configurator = Configurator::new(DirectoryCatalog::new(dir));
    assert_eq!(configurator.load_apps().len(), 1);
    assert!(configurator.select("dns-blocking"));

    let out = dir.join("out").join("dns-blocking-config.json");
    let written = configurator
        .export_to(&OutputOptions::default().with_destinations(vec![OutputDestination::directory(dir.join("out"))]))
        .unwrap();
    assert_eq!(written, vec![out.clone()]);
    let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written, json!({"enableBlocking": true, "blockingAnswerTtl": 30}));
    assert_eq!(configurator.status().kind(), StatusKind::Success);
}

#[test]
fn export_follows_configured_encoding() {
    init_tracing();
    let mut configurator = Configurator::with_options(catalog(), FormOptions::default().with_pretty(false));
    configurator.load_apps();
    configurator.select("auth");
    assert_eq!(configurator.export_text().unwrap(), r#"{"realm":"home"}"#);

    let temp = tempfile::tempdir().unwrap();
    let output = configurator
        .output_options()
        .with_destinations(vec![OutputDestination::directory(temp.path())]);
    let written = configurator.export_to(&output).unwrap();
    assert_eq!(written, vec![temp.path().join("auth-config.json")]);
    assert_eq!(fs::read_to_string(&written[0]).unwrap(), "{\"realm\":\"home\"}\n");
}
