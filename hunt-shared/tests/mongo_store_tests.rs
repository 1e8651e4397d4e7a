/// Integration tests for the MongoDB backend
///
/// These tests require a running MongoDB server and are ignored by default.
/// Run with: cargo test --test mongo_store_tests -- --ignored --test-threads=1
///
/// The server address is taken from MONGO_ADDR (default: localhost). Each test
/// works in its own database, which is dropped afterwards.

use hunt_shared::db::client::{create_database, ensure_indexes, health_check, DatabaseConfig};
use hunt_shared::db::{DocumentStore, Filter, MongoStore, Sort};
use hunt_shared::error::ModelError;
use hunt_shared::id::RecordId;
use hunt_shared::models::hunt::{Hunt, HuntQuery, NewHunt};
use hunt_shared::models::task::{NewTask, Task, TaskQuery};
use std::env;

/// Helper to build a config pointing at a throwaway database
fn test_config(name: &str) -> DatabaseConfig {
    let addr = env::var("MONGO_ADDR").unwrap_or_else(|_| "localhost".to_string());
    DatabaseConfig {
        url: format!("mongodb://{}:27017", addr),
        database: format!("test_{}_{}", name, RecordId::new()),
        connect_timeout_seconds: 5,
        ..Default::default()
    }
}

async fn test_store(name: &str) -> MongoStore {
    let database = create_database(test_config(name))
        .await
        .expect("MongoDB must be reachable for ignored tests");
    MongoStore::new(database)
}

async fn cleanup(store: MongoStore) {
    store.database().drop().await.unwrap();
}

fn new_hunt(title: &str, host: &str, description: &str) -> NewHunt {
    NewHunt {
        title: title.to_string(),
        host_id: host.to_string(),
        description: description.to_string(),
        task: "Find it".to_string(),
    }
}

#[tokio::test]
#[ignore]
async fn test_connect_and_ping() {
    let store = test_store("ping").await;

    health_check(store.database()).await.unwrap();
    store.ping().await.unwrap();
    ensure_indexes(store.database()).await.unwrap();
    // Indexes are created idempotently
    ensure_indexes(store.database()).await.unwrap();

    cleanup(store).await;
}

#[tokio::test]
#[ignore]
async fn test_connect_to_unreachable_server_fails() {
    let config = DatabaseConfig {
        url: "mongodb://nonexistent.invalid:27017".to_string(),
        connect_timeout_seconds: 1,
        ..Default::default()
    };

    assert!(create_database(config).await.is_err());
}

#[tokio::test]
#[ignore]
async fn test_hunt_lifecycle() {
    let store = test_store("hunts").await;

    let bates = Hunt::create(&store, new_hunt("Bates", "1234", "A hunt for the Bates rock"))
        .await
        .unwrap();
    Hunt::create(&store, new_hunt("Tom Jones", "65d8f8d62b531fa812f0f498", "A hunt for the Morris bear"))
        .await
        .unwrap();
    Hunt::create(&store, new_hunt("Jim Jimson", "65d8f8d6e1283e6b2acd7503", "A hunt for Atlantis"))
        .await
        .unwrap();

    let hunt = Hunt::find_by_id(&store, &bates.to_hex()).await.unwrap();
    assert_eq!(hunt.id, bates);
    assert_eq!(hunt.host_id, "1234");

    let all = Hunt::list(&store, &HuntQuery::default()).await.unwrap();
    let titles: Vec<&str> = all.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Bates", "Jim Jimson", "Tom Jones"]);

    let query = HuntQuery {
        description: Some("HUNT FOR THE".to_string()),
        sortorder: Some("desc".to_string()),
        ..Default::default()
    };
    let matched = Hunt::list(&store, &query).await.unwrap();
    let titles: Vec<&str> = matched.iter().map(|h| h.title.as_str()).collect();
    assert_eq!(titles, vec!["Tom Jones", "Bates"]);

    let query = HuntQuery {
        hostid: Some("123".to_string()),
        ..Default::default()
    };
    assert!(Hunt::list(&store, &query).await.unwrap().is_empty());

    Hunt::delete(&store, &bates.to_hex()).await.unwrap();
    let err = Hunt::delete(&store, &bates.to_hex()).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound { .. }));

    cleanup(store).await;
}

#[tokio::test]
#[ignore]
async fn test_regex_characters_are_literal() {
    let store = test_store("regex").await;

    Hunt::create(&store, new_hunt("Cost (in $)", "", "")).await.unwrap();
    Hunt::create(&store, new_hunt("Costin", "", "")).await.unwrap();

    let query = HuntQuery {
        title: Some("(in $)".to_string()),
        ..Default::default()
    };
    let hunts = Hunt::list(&store, &query).await.unwrap();
    assert_eq!(hunts.len(), 1);
    assert_eq!(hunts[0].title, "Cost (in $)");

    cleanup(store).await;
}

#[tokio::test]
#[ignore]
async fn test_task_lifecycle() {
    let store = test_store("tasks").await;
    let hunt_id = RecordId::new().to_hex();

    for (description, position) in [("Third", 2), ("First", 0), ("Second", 1)] {
        Task::create(
            &store,
            NewTask {
                description: description.to_string(),
                position: Some(position),
                hunt_id: hunt_id.clone(),
                is_done: false,
            },
        )
        .await
        .unwrap();
    }

    let query = TaskQuery {
        hunt_id: Some(hunt_id.clone()),
        ..Default::default()
    };
    let tasks = Task::list(&store, &query).await.unwrap();
    let order: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(order, vec!["First", "Second", "Third"]);

    let query = TaskQuery {
        position: Some(1),
        ..Default::default()
    };
    let tasks = Task::list(&store, &query).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].description, "Second");

    let done = Task::mark_done(&store, &tasks[0].id.to_hex()).await.unwrap();
    assert!(done.is_done);
    assert_eq!(done.position, 1);

    Task::delete(&store, &done.id.to_hex()).await.unwrap();
    let err = Task::mark_done(&store, &done.id.to_hex()).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound { .. }));

    cleanup(store).await;
}

#[tokio::test]
#[ignore]
async fn test_raw_store_operations() {
    let store = test_store("raw").await;

    let mut doc = hunt_shared::db::Document::new();
    doc.insert("name".to_string(), serde_json::json!("raw"));
    doc.insert("count".to_string(), serde_json::json!(3));

    let id = store.insert_one("things", doc).await.unwrap();
    let found = store.find_one("things", id).await.unwrap().unwrap();
    assert_eq!(found.get("_id"), Some(&serde_json::json!(id.to_hex())));
    assert_eq!(found.get("count"), Some(&serde_json::json!(3)));

    let found = store
        .find("things", &Filter::equals("count", 3_i64), &Sort::ascending("name"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    assert_eq!(store.delete_one("things", id).await.unwrap(), 1);
    assert_eq!(store.delete_one("things", id).await.unwrap(), 0);
    assert!(store.find_one("things", id).await.unwrap().is_none());

    cleanup(store).await;
}
