//! End-to-end crawl tests against a mock catalog site

use compat_harvester::config::{CatalogConfig, Config, CrawlerConfig, OutputConfig};
use compat_harvester::crawler::harvest;
use compat_harvester::{ExtractError, HarvestError};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a harvester config pointing at the mock server and a scratch dir
fn test_config(server: &MockServer, output_dir: &Path) -> Config {
    Config {
        catalog: CatalogConfig {
            root_url: server.uri(),
        },
        crawler: CrawlerConfig {
            max_concurrent_fetches: 4,
            ..CrawlerConfig::default()
        },
        output: OutputConfig {
            directory: output_dir.to_string_lossy().into_owned(),
        },
    }
}

/// One captioned navigation tile: the click handler sits on the
/// grandparent container of the caption span
fn caption_tile(label: &str, target: &str) -> String {
    format!(
        r#"<div onclick="window.location='{}'"><div><span class="caption">{}</span></div></div>"#,
        target, label
    )
}

fn caption_page(entries: &[(&str, &str)]) -> String {
    let tiles: String = entries
        .iter()
        .map(|(label, target)| caption_tile(label, target))
        .collect();
    format!("<html><body>{}</body></html>", tiles)
}

/// A plain anchor listing: the click handler sits on the anchor itself
fn anchor_page(entries: &[(&str, &str)]) -> String {
    let anchors: String = entries
        .iter()
        .map(|(label, target)| format!(r#"<a onclick="go('{}')">{}</a>"#, target, label))
        .collect();
    format!("<html><body>{}</body></html>", anchors)
}

/// A device feature page: one supported feature carrying one unsupported
/// sub-feature
fn feature_page() -> String {
    concat!(
        "<html><body>",
        r#"<div><div><h3>Navigation<img alt="Function is supported"></h3>"#,
        "<p>Turn-by-turn directions</p></div>",
        r#"<ul><li>Voice guidance<i>-</i><b>-</b><span>Spoken directions</span><img alt="Function is not supported"></li></ul>"#,
        "</div></body></html>"
    )
    .to_string()
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mounts the catalog skeleton down to one equipment node:
/// root -> Octavia -> 2015 -> Ambition
async fn mount_catalog_spine(server: &MockServer, equipment_page: String) {
    mount_page(server, "/", caption_page(&[("Octavia", "/octavia")])).await;
    mount_page(server, "/octavia", anchor_page(&[("2015", "/octavia/2015")])).await;
    mount_page(server, "/octavia/2015", equipment_page).await;
}

#[tokio::test]
async fn test_end_to_end_single_bundle() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    mount_catalog_spine(
        &server,
        caption_page(&[("Ambition", "/octavia/2015/ambition")]),
    )
    .await;

    // Two manufacturers, mounted in reverse-alphabetical order so the test
    // proves the output sort overrides discovery order.
    mount_page(
        &server,
        "/octavia/2015/ambition",
        caption_page(&[("Nokia", "/nokia"), ("Apple", "/apple")]),
    )
    .await;
    mount_page(&server, "/nokia", anchor_page(&[("Lumia 930", "/nokia/lumia")])).await;
    mount_page(&server, "/apple", anchor_page(&[("iPhone 6", "/apple/iphone6")])).await;
    mount_page(&server, "/nokia/lumia", feature_page()).await;
    mount_page(&server, "/apple/iphone6", feature_page()).await;

    let config = test_config(&server, out.path());
    harvest(config).await.expect("harvest failed");

    let bundle_path = out.path().join("Octavia/2015/Ambition.json");
    assert!(bundle_path.exists(), "expected {}", bundle_path.display());

    let content = std::fs::read_to_string(&bundle_path).unwrap();
    let devices: serde_json::Value = serde_json::from_str(&content).unwrap();

    let devices = devices.as_array().unwrap();
    assert_eq!(devices.len(), 2);
    // Sorted by manufacturer, not by discovery order
    assert_eq!(devices[0]["Manufacturer"], "Apple");
    assert_eq!(devices[0]["Model"], "iPhone 6");
    assert_eq!(devices[1]["Manufacturer"], "Nokia");

    let feature = &devices[0]["Features"][0];
    assert_eq!(feature["Name"], "Navigation");
    assert_eq!(feature["Supported"], true);
    assert_eq!(feature["SubFeatures"][0]["Supported"], false);
}

#[tokio::test]
async fn test_devices_sorted_by_manufacturer_then_model() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    mount_catalog_spine(
        &server,
        caption_page(&[("Ambition", "/octavia/2015/ambition")]),
    )
    .await;

    mount_page(
        &server,
        "/octavia/2015/ambition",
        caption_page(&[("Samsung", "/samsung"), ("Acme", "/acme")]),
    )
    .await;
    mount_page(
        &server,
        "/samsung",
        anchor_page(&[("Z", "/samsung/z"), ("A", "/samsung/a"), ("M", "/samsung/m")]),
    )
    .await;
    mount_page(&server, "/acme", anchor_page(&[("X", "/acme/x")])).await;
    for device in ["/samsung/z", "/samsung/a", "/samsung/m", "/acme/x"] {
        mount_page(&server, device, feature_page()).await;
    }

    let config = test_config(&server, out.path());
    harvest(config).await.expect("harvest failed");

    let content =
        std::fs::read_to_string(out.path().join("Octavia/2015/Ambition.json")).unwrap();
    let devices: serde_json::Value = serde_json::from_str(&content).unwrap();
    let keys: Vec<(String, String)> = devices
        .as_array()
        .unwrap()
        .iter()
        .map(|d| {
            (
                d["Manufacturer"].as_str().unwrap().to_string(),
                d["Model"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    assert_eq!(
        keys,
        vec![
            ("Acme".to_string(), "X".to_string()),
            ("Samsung".to_string(), "A".to_string()),
            ("Samsung".to_string(), "M".to_string()),
            ("Samsung".to_string(), "Z".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_one_bundle_per_equipment_node() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    mount_catalog_spine(
        &server,
        caption_page(&[
            ("Ambition", "/octavia/2015/ambition"),
            ("Style/Plus", "/octavia/2015/style"),
        ]),
    )
    .await;

    for equipment in ["/octavia/2015/ambition", "/octavia/2015/style"] {
        mount_page(&server, equipment, caption_page(&[("Nokia", "/nokia")])).await;
    }
    mount_page(&server, "/nokia", anchor_page(&[("Lumia 930", "/nokia/lumia")])).await;
    mount_page(&server, "/nokia/lumia", feature_page()).await;

    let config = test_config(&server, out.path());
    harvest(config).await.expect("harvest failed");

    assert!(out.path().join("Octavia/2015/Ambition.json").exists());
    // Labels are sanitized into path segments: slash -> underscore, spaces removed
    assert!(out.path().join("Octavia/2015/Style_Plus.json").exists());
}

#[tokio::test]
async fn test_failing_manufacturer_branch_discards_whole_bundle() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    mount_catalog_spine(
        &server,
        caption_page(&[("Ambition", "/octavia/2015/ambition")]),
    )
    .await;

    mount_page(
        &server,
        "/octavia/2015/ambition",
        caption_page(&[("Nokia", "/nokia"), ("Apple", "/apple")]),
    )
    .await;
    // Nokia's branch completes; Apple's device listing fails
    mount_page(&server, "/nokia", anchor_page(&[("Lumia 930", "/nokia/lumia")])).await;
    mount_page(&server, "/nokia/lumia", feature_page()).await;
    Mock::given(method("GET"))
        .and(path("/apple"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&server, out.path());
    let err = harvest(config).await.unwrap_err();

    assert!(matches!(err, HarvestError::HttpStatus { status: 500, .. }));
    // No partial artifact: the bundle file is written only after the full
    // bundle, including every manufacturer, is assembled.
    assert!(!out.path().join("Octavia/2015/Ambition.json").exists());
    assert!(std::fs::read_dir(out.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_missing_navigation_attribute_aborts_run() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    // The equipment caption has no click handler anywhere above it
    mount_catalog_spine(
        &server,
        "<html><body><div><div><span class=\"caption\">Ambition</span></div></div></body></html>"
            .to_string(),
    )
    .await;

    let config = test_config(&server, out.path());
    let err = harvest(config).await.unwrap_err();

    match err {
        HarvestError::Extraction { url, source } => {
            assert!(url.contains("/octavia/2015"));
            assert!(matches!(
                source,
                ExtractError::MissingNavigation { label } if label == "Ambition"
            ));
        }
        other => panic!("expected extraction error, got {other}"),
    }
    assert!(std::fs::read_dir(out.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_transport_diagnostic_names_failing_url() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = test_config(&server, out.path());
    let err = harvest(config).await.unwrap_err();

    assert!(matches!(err, HarvestError::HttpStatus { status: 404, .. }));
    assert!(err.to_string().contains(&server.uri()));
}

#[tokio::test]
async fn test_completed_bundles_survive_a_later_failure() {
    let server = MockServer::start().await;
    let out = tempfile::tempdir().unwrap();

    // Two model years: 2014 persists its bundle, 2015 fails on its
    // equipment listing. The 2014 artifact must remain on disk.
    mount_page(&server, "/", caption_page(&[("Octavia", "/octavia")])).await;
    mount_page(
        &server,
        "/octavia",
        anchor_page(&[("2014", "/octavia/2014"), ("2015", "/octavia/2015")]),
    )
    .await;
    mount_page(
        &server,
        "/octavia/2014",
        caption_page(&[("Ambition", "/octavia/2014/ambition")]),
    )
    .await;
    mount_page(
        &server,
        "/octavia/2014/ambition",
        caption_page(&[("Nokia", "/nokia")]),
    )
    .await;
    mount_page(&server, "/nokia", anchor_page(&[("Lumia 930", "/nokia/lumia")])).await;
    mount_page(&server, "/nokia/lumia", feature_page()).await;
    Mock::given(method("GET"))
        .and(path("/octavia/2015"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = test_config(&server, out.path());
    let err = harvest(config).await.unwrap_err();

    assert!(matches!(err, HarvestError::HttpStatus { status: 500, .. }));
    assert!(out.path().join("Octavia/2014/Ambition.json").exists());
}
