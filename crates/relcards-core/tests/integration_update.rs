//! Integration test: full run from apps.yaml to patched document, against a
//! local canned API and download host.

mod common;

use common::route_server::{self, Route};
use relcards_core::apps::load_apps;
use relcards_core::checksum::HttpHasher;
use relcards_core::config::{ApiAuth, Settings};
use relcards_core::patch::PatchOutcome;
use relcards_core::pipeline::{self, RunOptions};
use relcards_core::release::GithubReleases;
use std::time::Duration;
use tempfile::tempdir;

const TEMPLATE: &str = "<!doctype html>\n<main>\n  <!-- APPS_CARDS -->\n  placeholder\n  <!-- /APPS_CARDS -->\n</main>\n";

#[test]
fn update_renders_all_cards_into_document() {
    let downloads = route_server::start(vec![("/files/tool.dmg", Route::ok("hello\n"))]);
    let release_body = format!(
        r#"{{
            "tag_name": "v2.0.0",
            "html_url": "https://github.com/acme/tool/releases/tag/v2.0.0",
            "assets": [
                {{ "name": "tool.zip", "browser_download_url": "{base}/files/tool.zip" }},
                {{ "name": "tool.dmg", "browser_download_url": "{base}/files/tool.dmg" }}
            ]
        }}"#,
        base = downloads.base
    );
    let empty_body = r#"{"tag_name": "v0.1", "html_url": "https://github.com/acme/bare/releases/tag/v0.1", "assets": []}"#;
    let api = route_server::start(vec![
        ("/repos/acme/tool/releases/latest", Route::ok(release_body)),
        ("/repos/acme/bare/releases/latest", Route::ok(empty_body)),
    ]);

    let dir = tempdir().unwrap();
    let apps_path = dir.path().join("apps.yaml");
    std::fs::write(
        &apps_path,
        r#"
apps:
  - nome: Static App
    descricao: No repo here
    sistema: Web
    url_oficial: https://static.example.com/app
  - nome: Acme Tool
    descricao: Has releases
    sistema: macOS
    url_oficial: https://acme.example.com
    github_repo: acme/tool
    asset_contains: dmg
    compute_checksum: true
  - nome: Bare
    descricao: Release without assets
    sistema: Linux
    url_oficial: https://bare.example.com
    github_repo: acme/bare
  - nome: Missing
    descricao: Repo without releases
    sistema: Linux
    url_oficial: https://missing.example.com
    github_repo: acme/missing
"#,
    )
    .unwrap();
    let doc_path = dir.path().join("index.html");
    std::fs::write(&doc_path, TEMPLATE).unwrap();

    let settings = Settings {
        api_base: api.base.clone(),
        api_timeout_secs: 5,
        download_timeout_secs: 5,
        pace_delay_ms: 0,
        ..Settings::default()
    };
    let releases = GithubReleases::from_settings(&settings, ApiAuth::anonymous());
    let hasher = HttpHasher::from_settings(&settings);
    let opts = RunOptions {
        markers: settings.markers(),
        download_label: &settings.download_label,
        pace: settings.pace_delay(),
        dry_run: false,
    };

    let apps = load_apps(&apps_path).unwrap();
    let report = pipeline::run(&apps, &doc_path, &releases, &hasher, opts).unwrap();
    assert_eq!(report.outcome, PatchOutcome::Updated);
    assert_eq!(report.items.len(), 4);
    assert_eq!(report.failures().count(), 0);

    let cards: Vec<&str> = report.items.iter().map(|i| i.card()).collect();
    assert!(cards[0].contains("href=\"https://static.example.com/app\""));
    assert!(!cards[0].contains("SHA-256"));

    assert!(cards[1].contains(&format!("href=\"{}/files/tool.dmg\"", downloads.base)));
    assert!(cards[1].contains("<div class=\"tag\">v2.0.0</div>"));
    assert!(cards[1].contains(
        "<code>5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03</code>"
    ));

    assert!(cards[2].contains("href=\"https://github.com/acme/bare/releases/tag/v0.1\""));
    assert!(cards[3].contains("href=\"https://missing.example.com\""));

    let written = std::fs::read_to_string(&doc_path).unwrap();
    assert!(written.starts_with("<!doctype html>\n<main>\n  <!-- APPS_CARDS -->\n"));
    assert!(written.ends_with("\n<!-- /APPS_CARDS -->\n</main>\n"));
    assert!(!written.contains("placeholder"));

    let again = pipeline::run(&apps, &doc_path, &releases, &hasher, opts).unwrap();
    assert_eq!(again.outcome, PatchOutcome::Unchanged);
}

#[test]
fn unreachable_api_degrades_item_but_document_is_written() {
    let dir = tempdir().unwrap();
    let doc_path = dir.path().join("index.html");
    std::fs::write(&doc_path, TEMPLATE).unwrap();

    let releases = GithubReleases::new("http://127.0.0.1:9", ApiAuth::anonymous(), Duration::from_secs(2));
    let hasher = HttpHasher {
        limit: 1024,
        stall_timeout: Duration::from_secs(2),
    };
    let apps = relcards_core::apps::parse_apps(
        "apps:\n  - nome: Down\n    url_oficial: https://down.example.com\n    github_repo: o/down\n",
    )
    .unwrap();
    let settings = Settings::default();
    let opts = RunOptions {
        markers: settings.markers(),
        download_label: &settings.download_label,
        pace: Duration::ZERO,
        dry_run: false,
    };

    let report = pipeline::run(&apps, &doc_path, &releases, &hasher, opts).unwrap();
    assert_eq!(report.outcome, PatchOutcome::Updated);
    assert_eq!(report.failures().count(), 1);
    assert!(std::fs::read_to_string(&doc_path)
        .unwrap()
        .contains("href=\"https://down.example.com\""));
}
