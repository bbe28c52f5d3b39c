//! On-disk persistence: what one session saves, the next one loads.

use chrono::NaiveDate;
use nabidka_core::{ClientAddress, EntityId, LineItem, Persisted, Quote, QuoteItemTemplate, Record};
use nabidka_store::{Database, DbConfig, EntityStore, SlotStorage};

fn sample_quote() -> Quote {
    let mut quote = Quote {
        quote_number: "0007".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 6, 30),
        from_name: "Jan Novák".to_string(),
        to_name: "ACME s.r.o.".to_string(),
        tax_rate: 21.0,
        notes: "Poznámka".to_string(),
        ..Quote::default()
    };
    quote
        .line_items
        .push(LineItem::new(EntityId::from("li_a"), "Design", 2.0, 100.0));
    quote
        .set_logo("data:image/png;base64,iVBORw0KGgo=")
        .unwrap();
    quote
}

#[tokio::test]
async fn test_collections_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nabidka.db");

    let quote_id = {
        let mut store = EntityStore::open(DbConfig::new(&path)).await.unwrap();
        let id = store.save(Record::Draft(sample_quote())).await.unwrap();
        store
            .save(Record::Draft(ClientAddress {
                name: "ACME".to_string(),
                street: "Dlouhá".to_string(),
                house_number: "5".to_string(),
                city: "Praha".to_string(),
                postal_code: "110 00".to_string(),
                ..ClientAddress::default()
            }))
            .await
            .unwrap();
        store
            .save(Record::Draft(QuoteItemTemplate {
                description: "Hosting".to_string(),
                unit_price: 50.0,
            }))
            .await
            .unwrap();
        id
    };

    let store = EntityStore::open(DbConfig::new(&path)).await.unwrap();

    let quote = store.get::<Quote>(&quote_id).unwrap();
    assert_eq!(quote.fields, sample_quote());
    assert_eq!(store.addresses().len(), 1);
    assert_eq!(store.templates()[0].fields.unit_price, 50.0);
}

#[tokio::test]
async fn test_slot_payload_is_a_flat_json_array() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let slots = std::sync::Arc::new(db.slots());
    let mut store = EntityStore::init(slots.clone()).await;

    let id = store.save(Record::Draft(sample_quote())).await.unwrap();

    let payload = slots.read_slot("quotes").await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(json[0]["id"], id.as_str());
    assert_eq!(json[0]["quoteNumber"], "0007");
    assert_eq!(json[0]["lineItems"][0]["unitPrice"], 100.0);
    assert!(json[0]["logoUrl"].as_str().unwrap().starts_with("data:image/png"));
}

#[tokio::test]
async fn test_corrupt_sqlite_slot_loads_as_empty() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let slots = std::sync::Arc::new(db.slots());
    slots.write_slot("quotes", "{not json").await.unwrap();

    let mut store = EntityStore::init(slots.clone()).await;
    assert!(store.quotes().is_empty());

    // The next save overwrites the corrupt payload
    let id = store.save(Record::Draft(sample_quote())).await.unwrap();
    let reloaded = EntityStore::init(slots).await;
    assert_eq!(
        reloaded.quotes().as_slice(),
        &[Persisted::new(id, sample_quote())]
    );
}
