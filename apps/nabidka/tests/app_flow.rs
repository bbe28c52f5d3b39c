//! A whole session: address book, templates, a quote built from both,
//! export, and a restart that sees the same data.

use std::sync::Arc;

use chrono::NaiveDate;
use nabidka_app::commands::{address, export, quote, template};
use nabidka_app::state::{AppConfig, Session, View};
use nabidka_app::App;
use nabidka_assist::{Suggester, Suggestion, NOT_CONFIGURED_MESSAGE};
use nabidka_core::{ClientAddress, QuoteFilter, QuoteItemTemplate, Record};
use nabidka_store::{EntityStore, MemorySlots};

fn acme() -> ClientAddress {
    ClientAddress {
        name: "ACME s.r.o.".into(),
        street: "Dlouhá".into(),
        house_number: "5".into(),
        city: "Praha".into(),
        postal_code: "110 00".into(),
        ..ClientAddress::default()
    }
}

fn config_in(dir: &std::path::Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.database_path = Some(dir.join("data").join("nabidka.db"));
    config.export.output_dir = Some(dir.join("out"));
    config.export.settle_delay_ms = 0;
    config.sender.from_name = "Jan Novák".into();
    config
}

#[tokio::test]
async fn test_quote_built_from_address_book_and_templates() {
    let dir = tempfile::tempdir().unwrap();
    let app = App::from_parts(
        config_in(dir.path()),
        EntityStore::init(Arc::new(MemorySlots::new())).await,
        Arc::new(
            nabidka_assist::GeminiSuggester::new(nabidka_assist::AssistConfig::default()).unwrap(),
        ),
    );
    let store = app.store();
    let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

    let mut session = Session::new();
    session.manage_addresses();
    let address_id = address::save_address(store, Record::Draft(acme())).await.unwrap();
    session.manage_quote_items();
    template::save_template(
        store,
        Record::Draft(QuoteItemTemplate {
            description: "Správa webu".into(),
            unit_price: 1500.0,
        }),
    )
    .await
    .unwrap();
    session.back();

    session.new_quote();
    let mut record =
        quote::editor_quote(store, &session, &app.config().quote_defaults(), today).await;
    assert_eq!(record.fields().from_name, "Jan Novák");

    let address = store.read().await.get::<ClientAddress>(&address_id).unwrap();
    let templates = template::list_templates(store).await;
    {
        let quote = record.fields_mut();
        quote.apply_client_address(&address.fields);
        quote.remove_line_item(0).unwrap();
        let next_id = store.read().await.ids().next_id();
        quote.add_line_item_from_template(next_id, &templates[0].fields);
        quote.line_items[0].quantity = 2.0;
    }

    let id = quote::save_quote(store, &mut session, record).await.unwrap();
    assert_eq!(session.view(), View::Home);

    let rows = quote::list_quotes(store, &QuoteFilter::default()).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quote_number, "0001");
    assert_eq!(rows[0].to_name, "ACME s.r.o.");
    assert_eq!(rows[0].total, 3630.0);

    let path = export::export_quote(store, app.export(), &id, app.config().export_dir())
        .await
        .unwrap();
    assert!(path.ends_with("out/Nabidka-0001.pdf"));
    assert_eq!(app.export().registry().attached_count(), 0);

    let terms = app.assist().suggest_terms().await;
    assert_eq!(terms, Suggestion::NotConfigured);
    assert_eq!(terms.display_text(), NOT_CONFIGURED_MESSAGE);
}

#[tokio::test]
async fn test_data_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let id = {
        let app = App::open(config_in(dir.path())).await.unwrap();
        let mut session = Session::new();
        session.new_quote();
        let record = quote::editor_quote(
            app.store(),
            &session,
            &app.config().quote_defaults(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        )
        .await;
        quote::save_quote(app.store(), &mut session, record).await.unwrap()
    };

    let app = App::open(config_in(dir.path())).await.unwrap();
    let dto = quote::get_quote(app.store(), &id).await.unwrap();
    assert_eq!(dto.quote.from_name, "Jan Novák");
    assert_eq!(quote::next_quote_number(app.store()).await, "0002");
    assert_eq!(app.export().options().margin_in, 0.5);
}
