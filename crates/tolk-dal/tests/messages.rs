use futures::TryStreamExt as _;
use sqlx::Executor;
use tolk_dal::{
    Error,
    language::{CreateLanguage, LanguageRepositoryImpl},
    message::{CreateMessage, MessageRepositoryImpl, UpdateMessage},
    message_value::MessageValueRepositoryImpl,
    project::{CreateProject, ProjectRepositoryImpl},
};
use tolk_types::StoreMessageValue;

const TEST_DATA: &str = r#"
INSERT INTO projects (id, version, name, description)
VALUES (1, 1, 'Shop', 'Web shop texts');
INSERT INTO projects (id, version, name, description)
VALUES (2, 1, 'Blog', NULL);

INSERT INTO languages (id, version, code, name)
VALUES (1, 1, 'cs', 'Czech');
INSERT INTO languages (id, version, code, name)
VALUES (2, 1, 'en', 'English');

INSERT INTO project_languages (project_id, language_id) VALUES (1, 1);

INSERT INTO messages (id, project_id, name, description, type)
VALUES (1, 1, 'cart.title', 'Title of the cart page', 'text');
INSERT INTO messages (id, project_id, name, description, type)
VALUES (2, 1, 'cart.items', 'Number of items', 'plural');
"#;

async fn init_db() -> sqlx::Pool<sqlx::Sqlite> {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    conn.execute("PRAGMA foreign_keys = ON").await.unwrap();
    tolk_dal::migrate(&conn).await.unwrap();

    conn.execute_many(TEST_DATA)
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    conn
}

#[tokio::test]
async fn test_message_crud() {
    let conn = init_db().await;
    let repo = MessageRepositoryImpl::new(conn);

    let messages = repo.list(1, 100).await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].name, "cart.items");

    let message = repo
        .create(
            1,
            CreateMessage {
                name: "cart.empty".to_string(),
                description: None,
                kind: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(message.kind, "text");
    assert_eq!(message.project_id, 1);

    let updated = repo
        .update(
            1,
            message.id,
            UpdateMessage {
                description: Some("Shown for empty cart".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "cart.empty");
    assert_eq!(updated.description.as_deref(), Some("Shown for empty cart"));

    let err = repo.get(2, message.id).await.unwrap_err();
    assert!(matches!(err, Error::RecordNotFound(_)));

    repo.delete(1, message.id).await.unwrap();
    let err = repo.delete(1, message.id).await.unwrap_err();
    assert!(matches!(err, Error::RecordNotFound(_)));
}

#[tokio::test]
async fn test_duplicate_message_name() {
    let conn = init_db().await;
    let repo = MessageRepositoryImpl::new(conn);

    let payload = CreateMessage {
        name: "cart.title".to_string(),
        description: None,
        kind: None,
    };
    let err = repo.create(1, payload.clone()).await.unwrap_err();
    assert!(err.is_unique_violation());

    // same name is fine in other project
    repo.create(2, payload).await.unwrap();
}

#[tokio::test]
async fn test_value_upsert() {
    let conn = init_db().await;
    let repo = MessageValueRepositoryImpl::new(conn);

    let first = StoreMessageValue::new("Košík").validate_submission().unwrap();
    let stored = repo.upsert(1, 1, &first).await.unwrap();
    assert_eq!(stored.value, "Košík");
    assert!(stored.form.is_none());

    let second = StoreMessageValue::new("Nákupní košík")
        .validate_submission()
        .unwrap();
    let replaced = repo.upsert(1, 1, &second).await.unwrap();
    assert_eq!(replaced.id, stored.id);
    assert_eq!(replaced.value, "Nákupní košík");

    let values = repo.list_for_message(1).await.unwrap();
    assert_eq!(values.len(), 1);
}

#[tokio::test]
async fn test_value_forms_are_separate_slots() {
    let conn = init_db().await;
    let repo = MessageValueRepositoryImpl::new(conn);

    for (form, value) in [("one", "položka"), ("few", "položky"), ("other", "položek")] {
        let payload = StoreMessageValue::new(value)
            .with_form(form)
            .validate_submission()
            .unwrap();
        repo.upsert(2, 1, &payload).await.unwrap();
    }
    let plain = StoreMessageValue::new("položky").validate_submission().unwrap();
    repo.upsert(2, 1, &plain).await.unwrap();

    let payload = StoreMessageValue::new("Položky")
        .with_form("few")
        .validate_submission()
        .unwrap();
    repo.upsert(2, 1, &payload).await.unwrap();

    let values = repo.list_for_message(2).await.unwrap();
    assert_eq!(values.len(), 4);

    let few = repo.get(2, 1, Some("few")).await.unwrap();
    assert_eq!(few.value, "Položky");
    let no_form = repo.get(2, 1, None).await.unwrap();
    assert_eq!(no_form.value, "položky");
    assert!(repo.get(2, 2, None).await.is_err());
}

#[tokio::test]
async fn test_message_delete_cascades_values() {
    let conn = init_db().await;
    let payload = StoreMessageValue::new("Cart").validate_submission().unwrap();
    MessageValueRepositoryImpl::new(conn.clone())
        .upsert(1, 2, &payload)
        .await
        .unwrap();

    MessageRepositoryImpl::new(conn.clone())
        .delete(1, 1)
        .await
        .unwrap();

    let count: i64 = sqlx::query_scalar("select count(*) from message_values")
        .fetch_one(&conn)
        .await
        .unwrap();
    assert_eq!(0, count);
}

#[tokio::test]
async fn test_language_version_conflict() {
    let conn = init_db().await;
    let repo = LanguageRepositoryImpl::new(conn);

    let lang = repo
        .create(CreateLanguage {
            name: "German".to_string(),
            code: "de".to_string(),
            version: None,
        })
        .await
        .unwrap();
    assert_eq!(lang.version, 1);
    assert_eq!(repo.get_by_code("de").await.unwrap().id, lang.id);

    let update = CreateLanguage {
        name: "Deutsch".to_string(),
        code: "de".to_string(),
        version: Some(lang.version),
    };
    let updated = repo.update(lang.id, update.clone()).await.unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.name, "Deutsch");

    let err = repo.update(lang.id, update).await.unwrap_err();
    assert!(matches!(err, Error::FailedUpdate { .. }));

    assert!(matches!(
        repo.get_by_code("xx").await.unwrap_err(),
        Error::RecordNotFound(_)
    ));
}

#[tokio::test]
async fn test_project_languages() {
    let conn = init_db().await;
    let repo = ProjectRepositoryImpl::new(conn);

    let project = repo
        .create(CreateProject {
            name: "Docs".to_string(),
            description: None,
            version: None,
        })
        .await
        .unwrap();

    repo.attach_language(project.id, 2).await.unwrap();
    repo.attach_language(project.id, 2).await.unwrap();
    repo.attach_language(project.id, 1).await.unwrap();
    let langs = repo.languages(project.id).await.unwrap();
    let codes: Vec<_> = langs.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, ["cs", "en"]);

    assert!(matches!(
        repo.attach_language(project.id, 99).await.unwrap_err(),
        Error::RecordNotFound(_)
    ));

    repo.detach_language(project.id, 1).await.unwrap();
    assert_eq!(repo.languages(project.id).await.unwrap().len(), 1);
    assert!(repo.detach_language(project.id, 1).await.is_err());
}
