use baas_bootstrap::{bootstrap, BackendContext, BootstrapError, Publisher, PublishedHandle};
use baas_domain::backend::{HandleAcquisitionError, InitializationError};
use baas_domain::config::ClientConfig;
use baas_domain::model::{DocumentPath, ServiceKind};
use baas_local::LocalBackend;
use serde_json::json;

fn valid_config() -> ClientConfig {
    ClientConfig::builder()
        .api_key("k")
        .auth_domain("d")
        .project_id("p")
        .storage_bucket("b")
        .messaging_sender_id("m")
        .app_id("a")
        .build()
}

#[test]
fn valid_config_publishes_all_four_handles() {
    let publisher = Publisher::new();
    let backend = LocalBackend::new();

    let context = publisher
        .publish(&backend, &valid_config())
        .expect("bootstrap succeeds");

    assert!(publisher.is_published());
    assert!(publisher.client().is_ok());
    assert!(publisher.auth().is_ok());
    assert!(publisher.document_store().is_ok());
    assert!(publisher.object_store().is_ok());
    assert!(matches!(
        context.lookup("client"),
        Some(PublishedHandle::Client(_))
    ));
    assert!(matches!(
        context.lookup("authHandle"),
        Some(PublishedHandle::Auth(_))
    ));
    assert!(matches!(
        context.lookup("documentStoreHandle"),
        Some(PublishedHandle::DocumentStore(_))
    ));
    assert!(matches!(
        context.lookup("objectStoreHandle"),
        Some(PublishedHandle::ObjectStore(_))
    ));
}

#[test]
fn empty_api_key_publishes_nothing() {
    let publisher = Publisher::new();
    let backend = LocalBackend::new();
    let config = ClientConfig::builder()
        .api_key("")
        .auth_domain("d")
        .project_id("p")
        .storage_bucket("b")
        .messaging_sender_id("m")
        .app_id("a")
        .build();

    let err = publisher.publish(&backend, &config).unwrap_err();

    assert_eq!(
        err,
        BootstrapError::Initialization(InitializationError::MissingFields {
            fields: vec!["apiKey"]
        })
    );
    assert!(!publisher.is_published());
    for name in BackendContext::names() {
        let missing = match name {
            "client" => publisher.client().err().map(|err| err.name),
            "authHandle" => publisher.auth().err().map(|err| err.name),
            "documentStoreHandle" => publisher.document_store().err().map(|err| err.name),
            _ => publisher.object_store().err().map(|err| err.name),
        };
        assert_eq!(missing, Some(name));
    }
}

fn with_blank(index: usize) -> ClientConfig {
    let mut fields = ["k", "d", "p", "b", "m", "a"];
    fields[index] = "";
    let [api_key, auth_domain, project_id, storage_bucket, sender_id, app_id] = fields;
    ClientConfig::new(
        api_key,
        auth_domain,
        project_id,
        storage_bucket,
        sender_id,
        app_id,
    )
}

#[test]
fn each_missing_field_is_an_initialization_error() {
    for (index, field) in ClientConfig::FIELD_NAMES.into_iter().enumerate() {
        let publisher = Publisher::new();
        let err = publisher
            .publish(&LocalBackend::new(), &with_blank(index))
            .unwrap_err();
        assert_eq!(
            err,
            BootstrapError::Initialization(InitializationError::MissingFields {
                fields: vec![field]
            })
        );
        assert!(!publisher.is_published());
    }
}

#[test]
fn identical_republish_is_a_no_op() {
    let publisher = Publisher::new();
    let backend = LocalBackend::new();

    let first = publisher.publish(&backend, &valid_config()).unwrap();
    let first_client = first.client().clone();
    let second = publisher.publish(&backend, &valid_config()).unwrap();

    assert!(std::ptr::eq(first, second));
    assert!(std::sync::Arc::ptr_eq(&first_client, second.client()));
}

#[test]
fn differing_republish_is_an_initialization_error() {
    let publisher = Publisher::new();
    let backend = LocalBackend::new();
    publisher.publish(&backend, &valid_config()).unwrap();

    let changed = ClientConfig::new("k", "d", "p", "b", "m", "another-app");
    let err = publisher.publish(&backend, &changed).unwrap_err();

    assert_eq!(
        err,
        BootstrapError::Initialization(InitializationError::ConflictingConfiguration {
            existing_project: "p".into()
        })
    );
    assert_eq!(
        publisher.context().unwrap().fingerprint(),
        valid_config().fingerprint()
    );
}

#[test]
fn unavailable_library_is_an_initialization_error() {
    let publisher = Publisher::new();
    let backend = LocalBackend::builder().unavailable("script not loaded").build();

    let err = publisher.publish(&backend, &valid_config()).unwrap_err();

    assert!(matches!(
        err,
        BootstrapError::Initialization(InitializationError::LibraryUnavailable { .. })
    ));
    assert!(!publisher.is_published());
}

#[test]
fn missing_capability_withholds_every_handle() {
    let publisher = Publisher::new();
    let backend = LocalBackend::builder()
        .disable(ServiceKind::DocumentStore)
        .build();

    let err = publisher.publish(&backend, &valid_config()).unwrap_err();

    match err {
        BootstrapError::HandleAcquisition(inner) => {
            assert_eq!(inner.service(), ServiceKind::DocumentStore);
            assert!(matches!(inner, HandleAcquisitionError::Unavailable { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(publisher.auth().is_err());
    assert!(publisher.client().is_err());
}

#[tokio::test]
async fn injected_context_serves_dependents() {
    let backend = LocalBackend::new();
    let context = bootstrap(&backend, &valid_config()).expect("bootstrap succeeds");

    let session = context.auth().sign_in_anonymously().await.unwrap();
    assert_eq!(
        context.auth().current_user().await.unwrap(),
        Some(session.uid)
    );

    let path = DocumentPath::new("sites", "north-lot");
    context
        .document_store()
        .set_document(&path, json!({ "trees": 4 }))
        .await
        .unwrap();
    let doc = context.document_store().get_document(&path).await.unwrap();
    assert_eq!(doc.map(|doc| doc.data), Some(json!({ "trees": 4 })));

    let meta = context
        .object_store()
        .put_object("reports/north-lot.pdf", b"%PDF".to_vec(), None)
        .await
        .unwrap();
    assert_eq!(meta.bucket, "b");
}
