//! Tests for the task-definition merge logic.

use paramsync::core::remote::SecretResolver;
use paramsync::core::taskdef::{reconcile, TaskDefinition};
use paramsync::core::vars::VarMap;
use paramsync::error::{Result, SyncError};

/// Resolver with a canned account, so references are deterministic.
struct FakeResolver;

impl SecretResolver for FakeResolver {
    async fn resolve(&self, name: &str) -> Result<String> {
        Ok(format!(
            "arn:aws:ssm:us-east-1:123456789012:parameter{}",
            name
        ))
    }
}

fn varmap(entries: &[(&str, &str)]) -> VarMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn doc(json: &str) -> TaskDefinition {
    serde_json::from_str(json).unwrap()
}

fn base_doc() -> TaskDefinition {
    doc(r#"{
        "family": "web",
        "containerDefinitions": [
            {
                "name": "sidecar",
                "environment": [{"name": "UNTOUCHED", "value": "1"}]
            },
            {
                "name": "app",
                "image": "app:latest",
                "environment": [{"name": "X", "value": "old"}],
                "secrets": [{"name": "S_EXISTING", "valueFrom": "arn:old"}]
            }
        ]
    }"#)
}

#[tokio::test]
async fn updates_existing_env_vars_and_appends_new_ones() {
    let merged = reconcile(
        base_doc(),
        "app",
        "",
        &varmap(&[("X", "new"), ("Y", "added")]),
        &VarMap::new(),
        false,
        &FakeResolver,
    )
    .await
    .unwrap();

    let app = &merged.container_definitions[1];
    let environment = app.environment.as_ref().unwrap();
    assert_eq!(environment.len(), 2);
    assert_eq!(environment[0].name, "X");
    assert_eq!(environment[0].value, "new");
    assert_eq!(environment[1].name, "Y");
    assert_eq!(environment[1].value, "added");
}

#[tokio::test]
async fn env_lookup_uses_the_prefixed_name() {
    // "X" exists unprefixed, so "/svc/X" must be a fresh row
    let merged = reconcile(
        base_doc(),
        "app",
        "/svc/",
        &varmap(&[("X", "new")]),
        &VarMap::new(),
        false,
        &FakeResolver,
    )
    .await
    .unwrap();

    let environment = merged.container_definitions[1].environment.as_ref().unwrap();
    assert_eq!(environment.len(), 2);
    assert_eq!(environment[0].name, "X");
    assert_eq!(environment[0].value, "old");
    assert_eq!(environment[1].name, "/svc/X");
    assert_eq!(environment[1].value, "new");
}

#[tokio::test]
async fn secrets_keep_the_plain_name_but_reference_the_prefixed_parameter() {
    let merged = reconcile(
        base_doc(),
        "app",
        "/svc/",
        &VarMap::new(),
        &varmap(&[("S1", "ignored-value")]),
        false,
        &FakeResolver,
    )
    .await
    .unwrap();

    let secrets = merged.container_definitions[1].secrets.as_ref().unwrap();
    assert_eq!(secrets.len(), 2);
    assert_eq!(secrets[1].name, "S1");
    assert_eq!(
        secrets[1].value_from,
        "arn:aws:ssm:us-east-1:123456789012:parameter/svc/S1"
    );

    // The literal value never enters the document
    let serialized = serde_json::to_string(&merged).unwrap();
    assert!(!serialized.contains("ignored-value"));
}

#[tokio::test]
async fn secret_lookup_matches_the_unprefixed_key() {
    let merged = reconcile(
        base_doc(),
        "app",
        "/svc/",
        &VarMap::new(),
        &varmap(&[("S_EXISTING", "whatever")]),
        false,
        &FakeResolver,
    )
    .await
    .unwrap();

    // Matched the existing row by plain name; valueFrom now prefixed
    let secrets = merged.container_definitions[1].secrets.as_ref().unwrap();
    assert_eq!(secrets.len(), 1);
    assert_eq!(secrets[0].name, "S_EXISTING");
    assert_eq!(
        secrets[0].value_from,
        "arn:aws:ssm:us-east-1:123456789012:parameter/svc/S_EXISTING"
    );
}

#[tokio::test]
async fn allow_removal_resets_both_lists_before_merging() {
    let merged = reconcile(
        base_doc(),
        "app",
        "",
        &varmap(&[("Y", "kept")]),
        &VarMap::new(),
        true,
        &FakeResolver,
    )
    .await
    .unwrap();

    let app = &merged.container_definitions[1];
    let environment = app.environment.as_ref().unwrap();
    assert_eq!(environment.len(), 1);
    assert_eq!(environment[0].name, "Y");
    assert_eq!(app.secrets.as_ref().unwrap().len(), 0);
}

#[tokio::test]
async fn absent_lists_are_initialized() {
    let bare = doc(r#"{"containerDefinitions": [{"name": "app"}]}"#);

    let merged = reconcile(
        bare,
        "app",
        "",
        &varmap(&[("A", "1")]),
        &VarMap::new(),
        false,
        &FakeResolver,
    )
    .await
    .unwrap();

    let app = &merged.container_definitions[0];
    assert_eq!(app.environment.as_ref().unwrap().len(), 1);
    assert_eq!(app.secrets.as_ref().unwrap().len(), 0);
}

#[tokio::test]
async fn reconcile_is_idempotent() {
    let env_vars = varmap(&[("X", "new"), ("Y", "added")]);
    let secrets = varmap(&[("S1", "v")]);

    let once = reconcile(
        base_doc(),
        "app",
        "/svc/",
        &env_vars,
        &secrets,
        false,
        &FakeResolver,
    )
    .await
    .unwrap();

    let twice = reconcile(
        once.clone(),
        "app",
        "/svc/",
        &env_vars,
        &secrets,
        false,
        &FakeResolver,
    )
    .await
    .unwrap();

    assert_eq!(once, twice);
}

#[tokio::test]
async fn other_containers_and_extra_fields_are_untouched() {
    let merged = reconcile(
        base_doc(),
        "app",
        "",
        &varmap(&[("X", "new")]),
        &VarMap::new(),
        false,
        &FakeResolver,
    )
    .await
    .unwrap();

    let sidecar = &merged.container_definitions[0];
    assert_eq!(sidecar.environment.as_ref().unwrap()[0].value, "1");
    assert!(sidecar.secrets.is_none());

    let out = serde_json::to_value(&merged).unwrap();
    assert_eq!(out["family"], "web");
    assert_eq!(out["containerDefinitions"][1]["image"], "app:latest");
}

#[tokio::test]
async fn missing_container_is_a_fatal_error() {
    let err = reconcile(
        base_doc(),
        "missing",
        "",
        &VarMap::new(),
        &VarMap::new(),
        false,
        &FakeResolver,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SyncError::ContainerNotFound(_)));
    assert!(err.to_string().contains("missing"));
}
