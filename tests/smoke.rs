use assert_cmd::Command;

#[test]
fn cli_help_runs() {
    let mut cmd = Command::cargo_bin("drug-spend-view").expect("binary exists");
    cmd.arg("--help").assert().success();
}

#[test]
fn render_writes_empty_page_when_endpoint_is_down() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("page.html");
    let mut cmd = Command::cargo_bin("drug-spend-view").expect("binary exists");
    cmd.env("PREDICT_URL", closed_port_url())
        .env("OUTPUTS_DIR", dir.path())
        .args(["render", "--out"])
        .arg(&out)
        .assert()
        .success();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains(r#"id="prediction-table-body""#));
    assert!(!html.contains("data-drug="));
}

#[test]
fn show_fails_when_endpoint_is_down() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("drug-spend-view").expect("binary exists");
    cmd.env("PREDICT_URL", closed_port_url())
        .env("OUTPUTS_DIR", dir.path())
        .arg("show")
        .assert()
        .failure();
}

fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/predict")
}
