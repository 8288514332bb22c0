use tokio::{
    io::{AsyncReadExt as _, AsyncWriteExt as _},
    net::TcpListener,
};

use crate::{
    Error, config::Config, load_summary, normalize::UNASSIGNED_PRIORITY, source, summarize,
    summary::{NOT_CREATED, STATUS_CATEGORIES, Summary},
};

const FIXTURE: &str = "src/tests/fixtures/email_assets.csv";

fn fixture_config() -> Config {
    Config {
        source: FIXTURE.to_owned(),
        ..Default::default()
    }
}

fn assert_consistent(summary: &Summary) {
    assert_eq!(
        summary.status_counts.keys().copied().collect::<Vec<_>>(),
        STATUS_CATEGORIES.iter().collect::<Vec<_>>()
    );
    assert_eq!(
        summary.status_counts.values().sum::<usize>(),
        summary.total_emails
    );
    for stats in [&summary.language_stats, &summary.priority_stats] {
        for key_stats in stats.values() {
            assert_eq!(key_stats.total, key_stats.statuses.values().sum::<usize>());
        }
        assert_eq!(
            stats.values().map(|s| s.total).sum::<usize>(),
            summary.total_emails
        );
    }
}

/// Serve one canned HTTP response on a local port.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = vec![0u8; 4096];
        let _ = stream.read(&mut request).await.unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });
    format!("http://{addr}/email_assets.csv")
}

#[tokio::test]
async fn test_fixture_summary() {
    let summary = load_summary(&fixture_config()).await.unwrap();
    assert_consistent(&summary);

    assert_eq!(summary.total_emails, 6);
    assert_eq!(summary.status_counts["Live"], 1);
    assert_eq!(summary.status_counts["In Review"], 1);
    assert_eq!(summary.status_counts["Approved"], 1);
    assert_eq!(summary.status_counts["Changes Requested"], 1);
    assert_eq!(summary.status_counts[NOT_CREATED], 2);
    assert_eq!(summary.status_counts["New Asset in Workflow"], 0);

    assert!(!summary.language_stats.contains_key("Backfill TBD"));
    assert!(!summary.language_stats.contains_key("Kelsey Craddock"));
    assert!(!summary.language_stats.contains_key("Unknown"));
    assert!(!summary.language_stats.contains_key("Italian"));
    assert_eq!(
        summary.languages_by_volume,
        ["English", "German", "French", "Spanish"]
    );
    assert_eq!(summary.language_stats["Spanish"].statuses[NOT_CREATED], 1);

    assert_eq!(
        summary.priorities_by_rank,
        ["P1", "P2", "P10", UNASSIGNED_PRIORITY]
    );
    let p1 = &summary.priority_stats["P1"];
    assert_eq!(p1.total, 2);
    assert_eq!(p1.statuses["Live"], 1);
    assert_eq!(p1.statuses[NOT_CREATED], 1);
    assert_eq!(summary.priority_stats[UNASSIGNED_PRIORITY].statuses["Approved"], 1);
}

#[tokio::test]
async fn test_summary_serializes_camel_case() {
    let summary = load_summary(&fixture_config()).await.unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["totalEmails"], 6);
    assert_eq!(json["statusCounts"]["Not Created"], 2);
    assert_eq!(json["languageStats"]["English"]["total"], 2);
    assert_eq!(json["prioritiesByRank"][0], "P1");
    assert!(json["generatedAt"].is_string());
}

#[test]
fn test_placeholder_row_yields_nothing() {
    let text = "h\nBackfill TBD,P1,,,,,,,,,New Asset in Workflow\n";
    let summary = summarize(text, &Config::default());
    assert_eq!(summary.total_emails, 0);
    assert!(summary.language_stats.is_empty());
    assert_consistent(&summary);
}

#[test]
fn test_quoted_empty_language_is_dropped() {
    let text = "h\n'',P1,,,,,,,,,Live\n' ',P2,,,,,,,,,Live\nEnglish,P3,,,,,,,,,Live\n";
    let summary = summarize(text, &Config::default());
    assert_eq!(summary.total_emails, 1);
    assert_eq!(summary.languages_by_volume, ["English"]);
    assert_consistent(&summary);
}

#[test]
fn test_custom_columns() {
    let config = Config {
        columns: crate::config::Columns {
            language: 2,
            priority: 0,
            status: 1,
        },
        min_columns: 3,
        ..Default::default()
    };
    let summary = summarize("p,s,l\nP3,Live,Dutch\n,Approved,Dutch\n", &config);
    assert_eq!(summary.total_emails, 2);
    assert_eq!(summary.language_stats["Dutch"].total, 2);
    assert_eq!(summary.priorities_by_rank, ["P3", UNASSIGNED_PRIORITY]);
}

#[tokio::test]
async fn test_missing_local_file() {
    let config = Config {
        source: "src/tests/fixtures/does_not_exist.csv".to_owned(),
        ..Default::default()
    };
    assert!(matches!(
        load_summary(&config).await,
        Err(Error::Load(source::Error::ReadLocal { .. }))
    ));
}

#[tokio::test]
async fn test_invalid_config_is_rejected_before_loading() {
    let config = Config {
        source: "src/tests/fixtures/does_not_exist.csv".to_owned(),
        min_columns: 2,
        ..Default::default()
    };
    assert!(matches!(load_summary(&config).await, Err(Error::Config(_))));
}

#[tokio::test]
async fn test_remote_export() {
    let url = serve_once(
        "200 OK",
        "h\nEnglish,P1,,,,,,,,,Live\nGerman,P2,,,,,,,,,Approved\n",
    )
    .await;
    let config = Config {
        source: url,
        ..Default::default()
    };
    let summary = load_summary(&config).await.unwrap();
    assert_eq!(summary.total_emails, 2);
    assert_consistent(&summary);
}

#[tokio::test]
async fn test_remote_error_status_aborts() {
    let url = serve_once("404 Not Found", "").await;
    let config = Config {
        source: url,
        ..Default::default()
    };
    match load_summary(&config).await {
        Err(Error::Load(source::Error::Status { status, .. })) => {
            assert_eq!(status, reqwest::StatusCode::NOT_FOUND)
        }
        other => panic!("expected status error, got {other:?}"),
    }
}
