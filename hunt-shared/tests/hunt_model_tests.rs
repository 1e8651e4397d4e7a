/// Integration tests for the Hunt operations
///
/// These run against the in-memory store, so no database is needed.
/// The MongoDB backend is exercised separately in mongo_store_tests.rs.

use hunt_shared::db::{DocumentStore, InMemoryStore};
use hunt_shared::error::ModelError;
use hunt_shared::id::RecordId;
use hunt_shared::models::hunt::{Hunt, HuntQuery, HuntSortField, NewHunt};

fn new_hunt(title: &str, host: &str, description: &str) -> NewHunt {
    NewHunt {
        title: title.to_string(),
        host_id: host.to_string(),
        description: description.to_string(),
        task: "Find it".to_string(),
    }
}

/// Seeds the same four hunts for every test
async fn seeded() -> (InMemoryStore, RecordId) {
    let store = InMemoryStore::new();
    for (title, host, description) in [
        ("Tom Jones", "65d8f8d62b531fa812f0f498", "A hunt for the Morris bear"),
        ("Jim Jimson", "65d8f8d6e1283e6b2acd7503", "A hunt for Atlantis"),
        ("Wilby Wonka", "65d8f8d690ea8ecf129e14c1", "A hunt for Nerd's Gummy Clusters"),
    ] {
        Hunt::create(&store, new_hunt(title, host, description))
            .await
            .unwrap();
    }
    let bates = Hunt::create(&store, new_hunt("Bates", "1234", "A hunt for the Bates rock"))
        .await
        .unwrap();
    (store, bates)
}

fn titles(hunts: &[Hunt]) -> Vec<&str> {
    hunts.iter().map(|h| h.title.as_str()).collect()
}

#[tokio::test]
async fn test_get_hunt_by_id() {
    let (store, bates) = seeded().await;

    let hunt = Hunt::find_by_id(&store, &bates.to_hex()).await.unwrap();
    assert_eq!(hunt.id, bates);
    assert_eq!(hunt.title, "Bates");
    assert_eq!(hunt.host_id, "1234");
    assert_eq!(hunt.description, "A hunt for the Bates rock");
    assert_eq!(hunt.task, "Find it");
}

#[tokio::test]
async fn test_get_hunt_with_bad_id() {
    let (store, _) = seeded().await;

    let err = Hunt::find_by_id(&store, "bad").await.unwrap_err();
    assert!(matches!(err, ModelError::MalformedIdentifier { .. }));
    assert_eq!(
        err.to_string(),
        "The requested hunt id wasn't a legal Mongo Object ID."
    );
}

#[tokio::test]
async fn test_get_hunt_with_nonexistent_id() {
    let (store, _) = seeded().await;

    let err = Hunt::find_by_id(&store, &RecordId::new().to_hex())
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::NotFound { .. }));
    assert_eq!(err.to_string(), "The requested hunt was not found");
}

#[tokio::test]
async fn test_list_without_filters_returns_everything() {
    let (store, _) = seeded().await;

    let hunts = Hunt::list(&store, &HuntQuery::default()).await.unwrap();
    assert_eq!(hunts.len(), store.count(Hunt::COLLECTION).unwrap());
    assert_eq!(hunts.len(), 4);
}

#[tokio::test]
async fn test_list_default_sort_is_title_ascending() {
    let (store, _) = seeded().await;

    let hunts = Hunt::list(&store, &HuntQuery::default()).await.unwrap();
    assert_eq!(
        titles(&hunts),
        vec!["Bates", "Jim Jimson", "Tom Jones", "Wilby Wonka"]
    );

    let desc = HuntQuery {
        sortorder: Some("desc".to_string()),
        ..Default::default()
    };
    let hunts = Hunt::list(&store, &desc).await.unwrap();
    assert_eq!(
        titles(&hunts),
        vec!["Wilby Wonka", "Tom Jones", "Jim Jimson", "Bates"]
    );
}

#[tokio::test]
async fn test_list_sorted_by_host() {
    let (store, _) = seeded().await;

    let query = HuntQuery {
        sortby: Some(HuntSortField::HostId),
        ..Default::default()
    };
    let hunts = Hunt::list(&store, &query).await.unwrap();
    assert_eq!(hunts[0].host_id, "1234");
}

#[tokio::test]
async fn test_list_filter_by_title_is_case_insensitive() {
    let (store, _) = seeded().await;

    let query = HuntQuery {
        title: Some("jim".to_string()),
        ..Default::default()
    };
    let hunts = Hunt::list(&store, &query).await.unwrap();
    assert_eq!(titles(&hunts), vec!["Jim Jimson"]);
}

#[tokio::test]
async fn test_list_filter_by_description_substring() {
    let (store, _) = seeded().await;

    let query = HuntQuery {
        description: Some("HUNT FOR THE".to_string()),
        ..Default::default()
    };
    let hunts = Hunt::list(&store, &query).await.unwrap();
    assert_eq!(titles(&hunts), vec!["Bates", "Tom Jones"]);
}

#[tokio::test]
async fn test_list_filter_by_host_is_exact() {
    let (store, _) = seeded().await;

    let exact = HuntQuery {
        hostid: Some("1234".to_string()),
        ..Default::default()
    };
    assert_eq!(titles(&Hunt::list(&store, &exact).await.unwrap()), vec!["Bates"]);

    let partial = HuntQuery {
        hostid: Some("123".to_string()),
        ..Default::default()
    };
    assert!(Hunt::list(&store, &partial).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_combined_filters() {
    let (store, _) = seeded().await;

    let query = HuntQuery {
        title: Some("o".to_string()),
        description: Some("bear".to_string()),
        ..Default::default()
    };
    let hunts = Hunt::list(&store, &query).await.unwrap();
    assert_eq!(titles(&hunts), vec!["Tom Jones"]);
}

#[tokio::test]
async fn test_create_hunt_round_trips() {
    let store = InMemoryStore::new();

    let id = Hunt::create(&store, new_hunt("Campus Crawl", "host-1", "Around the mall"))
        .await
        .unwrap();
    assert_eq!(store.count(Hunt::COLLECTION).unwrap(), 1);

    let hunt = Hunt::find_by_id(&store, &id.to_hex()).await.unwrap();
    assert_eq!(hunt.title, "Campus Crawl");
    assert_eq!(hunt.host_id, "host-1");
    assert_eq!(hunt.description, "Around the mall");
}

#[tokio::test]
async fn test_create_hunt_with_empty_title_inserts_nothing() {
    let store = InMemoryStore::new();

    let err = Hunt::create(&store, new_hunt("", "host-1", "No title"))
        .await
        .unwrap_err();
    match err {
        ModelError::Validation { field, .. } => assert_eq!(field, "title"),
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(store.count(Hunt::COLLECTION).unwrap(), 0);
}

#[tokio::test]
async fn test_create_hunt_with_empty_task_inserts_nothing() {
    let store = InMemoryStore::new();

    let data = NewHunt {
        task: String::new(),
        ..new_hunt("Titled", "h", "d")
    };
    let err = Hunt::create(&store, data).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation { .. }));
    assert_eq!(store.count(Hunt::COLLECTION).unwrap(), 0);
}

#[tokio::test]
async fn test_delete_hunt_twice() {
    let (store, bates) = seeded().await;

    Hunt::delete(&store, &bates.to_hex()).await.unwrap();
    assert_eq!(store.count(Hunt::COLLECTION).unwrap(), 3);

    let err = Hunt::delete(&store, &bates.to_hex()).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound { .. }));
    assert_eq!(store.count(Hunt::COLLECTION).unwrap(), 3);
}

#[tokio::test]
async fn test_delete_hunt_with_bad_id() {
    let (store, _) = seeded().await;

    let err = Hunt::delete(&store, "bad").await.unwrap_err();
    assert!(matches!(err, ModelError::MalformedIdentifier { .. }));
    assert_eq!(store.count(Hunt::COLLECTION).unwrap(), 4);
}

#[tokio::test]
async fn test_chris_and_sam_scenario() {
    let store = InMemoryStore::new();

    Hunt::create(&store, new_hunt("Chris", "", "")).await.unwrap();
    let sam = Hunt::create(&store, new_hunt("Sam", "Joe", "")).await.unwrap();

    let all = Hunt::list(&store, &HuntQuery::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let query = HuntQuery {
        title: Some("Sam".to_string()),
        ..Default::default()
    };
    let only_sam = Hunt::list(&store, &query).await.unwrap();
    assert_eq!(only_sam.len(), 1);
    assert_eq!(only_sam[0].id, sam);

    Hunt::delete(&store, &sam.to_hex()).await.unwrap();
    let err = Hunt::find_by_id(&store, &sam.to_hex()).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound { .. }));
}

#[tokio::test]
async fn test_store_is_usable_as_trait_object() {
    let store: std::sync::Arc<dyn DocumentStore> = std::sync::Arc::new(InMemoryStore::new());

    let id = Hunt::create(store.as_ref(), new_hunt("Dyn", "", "")).await.unwrap();
    let hunt = Hunt::find_by_id(store.as_ref(), &id.to_hex()).await.unwrap();
    assert_eq!(hunt.title, "Dyn");
}
