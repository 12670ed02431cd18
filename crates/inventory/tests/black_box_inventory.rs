//! Black-box scenarios against the public store API.

use stockpile_inventory::{
    AuditLog, InventoryError, InventoryStore, ItemName, LoadOutcome, Quantity,
};

fn low(store: &InventoryStore, threshold: i64) -> Vec<String> {
    store
        .check_low_stock(threshold)
        .into_iter()
        .map(ItemName::to_string)
        .collect()
}

#[test]
fn restock_sell_and_persist_session() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("inventory.json");
    let mut audit = AuditLog::new();

    let mut store = InventoryStore::new();
    store.add_audited("apple", 10, &mut audit).unwrap();
    store.add_audited("banana", -2, &mut audit).unwrap();
    store.add_audited("pear", 5, &mut audit).unwrap();
    assert!(store.add_audited("", 1, &mut audit).is_err());
    assert_eq!(audit.len(), 3);

    assert_eq!(store.remove("apple", 3).unwrap(), Some(Quantity::Whole(7)));
    assert!(matches!(
        store.remove("orange", 1),
        Err(InventoryError::NotFound { .. })
    ));

    assert_eq!(low(&store, 5), ["banana"]);
    assert_eq!(low(&store, 8), ["apple", "banana", "pear"]);

    store.save(&path).unwrap();

    let mut reopened = InventoryStore::new();
    assert_eq!(
        reopened.load(&path).unwrap(),
        LoadOutcome::Loaded { items: 3 }
    );
    assert_eq!(reopened, store);
    assert_eq!(reopened.quantity("banana"), Quantity::Whole(-2));
    reopened.report();
}

#[test]
fn sold_out_items_disappear_from_saved_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("inventory.json");

    let mut store = InventoryStore::new();
    store.add("apple", 2).unwrap();
    store.add("pear", 1).unwrap();
    store.remove("apple", 2).unwrap();
    store.save(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json, serde_json::json!({ "pear": 1 }));
}

#[test]
fn failed_load_never_clobbers_existing_stock() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("inventory.json");
    std::fs::write(&path, "[\"apple\", 3]").unwrap();

    let mut store = InventoryStore::new();
    store.add("apple", 4).unwrap();

    assert!(matches!(
        store.load(&path),
        Err(InventoryError::InvalidFormat { .. })
    ));
    assert_eq!(
        store.load(dir.path().join("absent.json")).unwrap(),
        LoadOutcome::NotFound
    );
    assert_eq!(store.quantity("apple"), Quantity::Whole(4));
    assert_eq!(store.len(), 1);
}
