//! Integration tests for JSON and Markdown rendering.

use chrono::{TimeZone, Utc};
use serde_json::Value;

use reqmodel::render::{to_json, to_markdown, JsonFormat, MarkdownRenderer, ReportOptions};
use reqmodel::{analyze_with_options, DomainModel, ExtractOptions};

fn sample_model() -> DomainModel {
    let options =
        ExtractOptions::new().with_timestamp(Utc.with_ymd_and_hms(2024, 3, 9, 8, 30, 0).unwrap());
    analyze_with_options(
        "orders",
        "Scope of this document\n\
         DEF An Order has orderId, orderDate and totalAmount.\n\
         REQ-1 Each customer must place an order.\n\
         REQ-2 The system shall notify the customer by email.",
        &options,
    )
}

#[test]
fn test_json_structure() {
    let json = to_json(&sample_model(), JsonFormat::Pretty).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["metadata"]["doc_id"], "orders");
    assert_eq!(value["metadata"]["version"], "0.1");
    assert_eq!(value["metadata"]["created_at"], "2024-03-09T08:30:00Z");

    let segments = value["segments"].as_array().unwrap();
    assert_eq!(segments.len(), 4);
    assert_eq!(segments[0]["segment_id"], "S1");
    assert_eq!(segments[0]["label"], "INFO");
    assert_eq!(segments[1]["label"], "DEF");

    let classes = value["classes"].as_array().unwrap();
    assert_eq!(classes[0]["name"], "Customer");
    assert_eq!(classes[1]["name"], "Order");
    assert_eq!(classes[1]["source_segments"], serde_json::json!(["S2", "S3"]));
    assert_eq!(classes[1]["attributes"][0]["name"], "orderId");
    assert_eq!(classes[1]["attributes"][0]["type"], "int");
    assert_eq!(classes[1]["attributes"][1]["type"], "Date");
    assert_eq!(classes[1]["attributes"][2]["type"], "decimal");

    let relation = &value["relations"][0];
    assert_eq!(relation["source"], "Customer");
    assert_eq!(relation["target"], "Order");
    assert_eq!(relation["label"], "place");
    assert_eq!(relation["type"], "association");
    assert_eq!(relation["cardinality"]["source"], "1");
    assert_eq!(relation["cardinality"]["target"], "0..*");

    assert_eq!(value["quality"]["num_segments"], 4);
    assert_eq!(value["quality"]["kept_segments"], 3);
    assert_eq!(value["quality"]["filter_ratio"], 0.75);
}

#[test]
fn test_json_round_trip() {
    let model = sample_model();
    let json = to_json(&model, JsonFormat::Compact).unwrap();
    assert!(!json.contains('\n'));

    let parsed: DomainModel = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, model);
}

#[test]
fn test_markdown_report() {
    let options = ReportOptions::new().with_frontmatter(true);
    let md = to_markdown(&sample_model(), &options).unwrap();

    assert!(md.starts_with("---\n"));
    assert!(md.contains("created_at: 2024-03-09T08:30:00+00:00"));
    assert!(md.contains("# Domain Model: orders"));
    assert!(md.contains("| Filter ratio | 0.7500 |"));
    assert!(md.contains("| orderDate | Date |"));
    assert!(md.contains("Sources: S2, S3"));
    assert!(md.contains("- Customer --place--> Order (1 -> 0..*) [S3]"));
}

#[test]
fn test_markdown_renderer_reuse() {
    let renderer = MarkdownRenderer::new(ReportOptions::new().with_segments(true));
    let model = sample_model();

    let first = renderer.render(&model).unwrap();
    let second = renderer.render(&model).unwrap();
    assert_eq!(first, second);
    assert!(first.contains("## Segments"));
    assert!(first.contains("| S3 | REQ | REQ-1 Each customer must place an order. |"));
}
