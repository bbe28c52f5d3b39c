//! End-to-end export: a realistic quote through the pipeline to a file.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use nabidka_core::{EntityId, LineItem, Quote};
use nabidka_export::{
    ExportError, ExportPipeline, PageRenderer, PreviewSurface, QuoteDocument, Renderer,
};

fn sample_quote() -> Quote {
    let mut quote = Quote {
        quote_number: "0013".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 5),
        from_name: "Jan Novák".to_string(),
        from_address: "Dlouhá 5\n110 00 Praha".to_string(),
        to_name: "Řemesla Čížek s.r.o.".to_string(),
        to_address: "Krátká 1\n602 00 Brno".to_string(),
        tax_rate: 21.0,
        notes: "Termín dodání do konce měsíce.".to_string(),
        terms: "Splatnost faktury je 14 dní.".to_string(),
        ..Quote::default()
    };
    quote
        .line_items
        .push(LineItem::new(EntityId::from("li_1"), "Návrh webu", 2.0, 100.0));
    quote
        .line_items
        .push(LineItem::new(EntityId::from("li_2"), "Úpravy", 1.0, 50.0));
    quote
}

#[test]
fn test_preview_carries_document_text() {
    let document = QuoteDocument::from_quote(&sample_quote());
    assert_eq!(document.total, "302,50\u{a0}Kč");

    let preview = PreviewSurface::mount(document, &PageRenderer).unwrap();
    let text = preview.capture().text();
    assert!(text.contains("Řemesla Čížek s.r.o."));
    assert!(text.contains("Návrh webu"));
    assert!(text.contains("OBCHODNÍ PODMÍNKY"));
    assert!(text.contains("Děkujeme za Váš zájem."));
}

#[tokio::test]
async fn test_export_writes_named_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = ExportPipeline::new().with_settle_delay(Duration::ZERO);

    let artifact = pipeline.export_quote(&sample_quote()).await.unwrap();
    let path = artifact.save_to(dir.path()).await.unwrap();

    assert_eq!(path.file_name().unwrap(), "Nabidka-0013.pdf");
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    assert!(String::from_utf8_lossy(&bytes).contains("/Type /Catalog"));
    assert_eq!(pipeline.registry().attached_count(), 0);
}

#[tokio::test]
async fn test_concurrent_exports_each_release_their_surface() {
    let pipeline = ExportPipeline::new().with_settle_delay(Duration::ZERO);

    let mut handles = Vec::new();
    for n in 0..4 {
        let pipeline = pipeline.clone();
        handles.push(tokio::spawn(async move {
            let mut quote = sample_quote();
            quote.quote_number = format!("{:04}", n + 1);
            pipeline.export_quote(&quote).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(pipeline.registry().created_count(), 4);
    assert_eq!(pipeline.registry().attached_count(), 0);
}

#[tokio::test]
async fn test_failures_have_distinct_messages() {
    struct Broken;
    impl Renderer for Broken {
        fn render(&self, _: &QuoteDocument) -> Result<nabidka_export::PrintArea, String> {
            Err("no layout".to_string())
        }
    }

    let unavailable = ExportPipeline::new()
        .with_converter(None)
        .export_quote(&sample_quote())
        .await
        .unwrap_err();
    let missing = ExportPipeline::new()
        .with_renderer(Arc::new(Broken))
        .export_quote(&sample_quote())
        .await
        .unwrap_err();

    assert!(matches!(unavailable, ExportError::ConverterUnavailable));
    assert!(matches!(missing, ExportError::CaptureTargetNotFound { .. }));
    assert_ne!(unavailable.user_message(), missing.user_message());
}
