use std::process::Output;

use assert_cmd::Command;
use axum::{routing::get, Router};
use tokio::net::TcpListener;

const BODY: &str = r#"{
    "Zeta": {"years": [2023, 2024], "total_spending": [1234567.891, -1234.5], "avg_spending": [30, 31.256]},
    "Alpha": {"years": [2023, 2024], "total_spending": [100, 0.5], "avg_spending": [10, 1000]}
}"#;

async fn spawn_endpoint() -> String {
    let app = Router::new().route(
        "/predict",
        get(|| async { ([("content-type", "application/json")], BODY) }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/predict")
}

/// Run the binary off the runtime so the endpoint keeps answering.
async fn run(url: String, args: Vec<String>) -> (Output, tempfile::TempDir) {
    tokio::task::spawn_blocking(move || {
        let dir = tempfile::tempdir().unwrap();
        let output = Command::cargo_bin("drug-spend-view")
            .expect("binary exists")
            .env("PREDICT_URL", url)
            .env("OUTPUTS_DIR", dir.path())
            .env("LOG_LEVEL", "warn")
            .args(args)
            .output()
            .unwrap();
        (output, dir)
    })
    .await
    .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn show_prints_every_drug_with_grouped_amounts() {
    let url = spawn_endpoint().await;
    let (output, _dir) = run(url, vec!["show".into()]).await;

    assert_eq!(
        stdout_lines(&output),
        [
            "",
            "Predictions for Zeta:",
            "Year 2023:",
            "  Predicted Total Spending: $1,234,567.89",
            "  Predicted Avg Spending per Beneficiary: $30.00",
            "Year 2024:",
            "  Predicted Total Spending: $-1,234.50",
            "  Predicted Avg Spending per Beneficiary: $31.26",
            "",
            "Predictions for Alpha:",
            "Year 2023:",
            "  Predicted Total Spending: $100.00",
            "  Predicted Avg Spending per Beneficiary: $10.00",
            "Year 2024:",
            "  Predicted Total Spending: $0.50",
            "  Predicted Avg Spending per Beneficiary: $1,000.00",
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn show_with_drug_prints_only_that_drug() {
    let url = spawn_endpoint().await;
    let (output, _dir) = run(url, vec!["show".into(), "--drug".into(), "Alpha".into()]).await;

    let lines = stdout_lines(&output);
    assert_eq!(lines[..2], ["", "Predictions for Alpha:"]);
    assert_eq!(lines.len(), 8);
    assert!(lines.iter().all(|line| !line.contains("Zeta")));
}

#[tokio::test(flavor = "multi_thread")]
async fn render_with_charts_writes_three_svgs() {
    let url = spawn_endpoint().await;
    let (output, dir) = run(url, vec!["render".into(), "--charts".into()]).await;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let html = std::fs::read_to_string(dir.path().join("predictions.html")).unwrap();
    assert_eq!(html.matches("<svg").count(), 3);
    assert_eq!(html.matches("data-drug=").count(), 4);
    assert!(!html.contains(r#"<div id="chart-container" hidden>"#));
}
