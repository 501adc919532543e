//! Sweep-to-report tests: configuration file in, report files out

use link_sweep::config::load_config_with_hash;
use link_sweep::crawler::sweep;
use link_sweep::output::{write_reports, ReportSummary};
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_site() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                r#"<html><body>
                    <a href="/docs?page=1">Docs</a>
                    <a href="/gone">Gone</a>
                </body></html>"#,
                "text/html",
            ),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html><body>docs</body></html>", "text/html"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    server
}

fn write_config(base: &str, report_dir: &str, formats: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"
[crawler]
navigation-timeout-ms = 2000

[user-agent]
crawler-name = "ReportBot"
crawler-version = "0.1"
contact-url = "https://example.com/bot"
contact-email = "bot@example.com"

[output]
report-dir = "{report_dir}"
report-prefix = "site_check"
formats = {formats}

[[phase]]
name = "before_login"
seeds = ["{base}/"]
"#,
        base = base,
        report_dir = report_dir,
        formats = formats
    )
    .expect("write config");
    file
}

#[tokio::test]
async fn test_sweep_writes_all_reports() {
    let server = mock_site().await;
    let reports = TempDir::new().unwrap();
    let report_dir = reports.path().join("out");

    let file = write_config(
        &server.uri(),
        &report_dir.display().to_string(),
        r#"["csv", "json", "html"]"#,
    );
    let (config, hash) = load_config_with_hash(file.path()).expect("valid config");
    assert_eq!(hash.len(), 64);

    let observations = sweep(&config).await.expect("sweep succeeds");
    let paths = write_reports(
        report_dir.as_path(),
        &config.output.report_prefix,
        &config.output.formats,
        &observations,
    )
    .expect("reports written");

    assert_eq!(paths.len(), 3);
    for (path, ext) in paths.iter().zip(["csv", "json", "html"]) {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("site_check_"), "{}", name);
        assert!(name.ends_with(ext), "{}", name);
        // site_check_YYYYMMDD_HHMMSS.ext
        assert_eq!(name.len(), "site_check_".len() + 15 + 1 + ext.len());
    }

    let base = server.uri();
    let csv = fs::read_to_string(&paths[0]).unwrap();
    let expected = format!(
        "phase,url,status,error\n\
         before_login,{base}/,200,\n\
         before_login,{base}/docs,200,\n\
         before_login,{base}/gone,410,\n",
        base = base
    );
    assert_eq!(csv, expected);

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&paths[1]).unwrap()).unwrap();
    assert_eq!(json[2]["url"], format!("{}/gone", base));
    assert_eq!(json[2]["status"], 410);

    let html = fs::read_to_string(&paths[2]).unwrap();
    assert!(html.contains("<tr><td>3</td><td>1</td><td>33.33%</td></tr>"));
    assert!(html.contains("<span style='color:red'>410</span>"));
}

#[tokio::test]
async fn test_only_configured_formats_written() {
    let server = mock_site().await;
    let reports = TempDir::new().unwrap();

    let file = write_config(
        &server.uri(),
        &reports.path().display().to_string(),
        r#"["json"]"#,
    );
    let (config, _) = load_config_with_hash(file.path()).expect("valid config");
    let observations = sweep(&config).await.expect("sweep succeeds");

    let summary = ReportSummary::from_observations(&observations);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.broken, 1);

    let paths = write_reports(
        reports.path(),
        &config.output.report_prefix,
        &config.output.formats,
        &observations,
    )
    .unwrap();

    assert_eq!(paths.len(), 1);
    let entries = fs::read_dir(reports.path()).unwrap().count();
    assert_eq!(entries, 1);
}
