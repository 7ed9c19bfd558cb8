//! File-backed tests: what one handle writes, a fresh handle reads back.

use sweetshop_core::{seed_sweets, Sweet, SweetInput};
use sweetshop_db::{Database, DbConfig, INVENTORY_SLOT_KEY};
use tempfile::TempDir;

async fn open(dir: &TempDir) -> Database {
    let path = dir.path().join("sweetshop.db");
    Database::new(DbConfig::new(path)).await.unwrap()
}

#[tokio::test]
async fn changes_survive_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let db = open(&dir).await;
        let store = db.sweets();
        store
            .add(&SweetInput::new("Rasgulla", "Milk-Based", "12", "40"))
            .await
            .unwrap();
        assert!(store.purchase(1001, 5).await.success);
        assert!(store.delete_by_id(1002).await);
        db.close().await;
    }

    let db = open(&dir).await;
    let sweets = db.sweets().load().await;
    assert_eq!(
        sweets,
        vec![
            Sweet::new(1001, "Kaju Katli", "Nut-Based", 50.0, 15),
            Sweet::new(1003, "Gulab Jamun", "Milk-Based", 10.0, 50),
            Sweet::new(1004, "Rasgulla", "Milk-Based", 12.0, 40),
        ]
    );
}

#[tokio::test]
async fn ids_stay_unique_across_sessions() {
    let dir = TempDir::new().unwrap();

    let first = {
        let db = open(&dir).await;
        let id = db
            .sweets()
            .add(&SweetInput::new("Peda", "Milk-Based", "9", "3"))
            .await
            .unwrap()
            .id;
        db.close().await;
        id
    };

    let db = open(&dir).await;
    let second = db
        .sweets()
        .add(&SweetInput::new("Barfi", "Milk-Based", "15", "8"))
        .await
        .unwrap()
        .id;

    assert_eq!(first, 1004);
    assert_eq!(second, 1005);
}

#[tokio::test]
async fn corrupt_file_slot_is_reseeded_and_rewritten() {
    let dir = TempDir::new().unwrap();

    {
        let db = open(&dir).await;
        db.slots()
            .write(INVENTORY_SLOT_KEY, "[{\"id\":")
            .await
            .unwrap();
        db.close().await;
    }

    let db = open(&dir).await;
    assert_eq!(db.sweets().load().await, seed_sweets());

    let raw = db.slots().read(INVENTORY_SLOT_KEY).await.unwrap().unwrap();
    let stored: Vec<Sweet> = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, seed_sweets());
}

#[tokio::test]
async fn later_writer_wins_between_handles() {
    let dir = TempDir::new().unwrap();
    let tab_a = open(&dir).await.sweets();
    let tab_b = open(&dir).await.sweets();

    let snapshot_a = tab_a.load().await;
    let snapshot_b = tab_b.load().await;

    let mut from_a = snapshot_a.clone();
    from_a[0].quantity = 1;
    let mut from_b = snapshot_b.clone();
    from_b[2].quantity = 2;

    assert!(tab_a.save(&from_a).await);
    assert!(tab_b.save(&from_b).await);

    // The second save is based on a stale read and replaces the first.
    let reopened = open(&dir).await.sweets().load().await;
    assert_eq!(reopened, from_b);
    assert_eq!(reopened[0].quantity, 20);
}
