//! Integration tests for the sweeper
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full sweep cycle end-to-end.

use link_sweep::config::parse_config;
use link_sweep::crawler::sweep;
use link_sweep::state::{PageObservation, Phase};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a TOML configuration for the given server and phase sections
fn create_test_config(base_url: &str, extra: &str) -> String {
    format!(
        r#"
[crawler]
base-url = "{base}"
navigation-timeout-ms = 2000

[user-agent]
crawler-name = "TestBot"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"
contact-email = "test@example.com"

{extra}
"#,
        base = base_url,
        extra = extra
    )
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><body>{}</body></html>", body),
        "text/html",
    )
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn observed(observations: &[PageObservation]) -> Vec<(Option<Phase>, String, Option<u16>)> {
    observations
        .iter()
        .map(|o| (o.phase, o.url.clone(), o.status))
        .collect()
}

#[tokio::test]
async fn test_full_sweep_single_phase() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(&format!(
            r##"<a href="/about">About</a>
                <a href="/missing">Missing</a>
                <a href="https://elsewhere.example/page">External</a>
                <a href="mailto:team@example.com">Mail</a>
                <a href="#top">Top</a>
                <a href="{base}/about?ref=home#team">About again</a>"##,
            base = base
        )),
    )
    .await;
    mount_page(&mock_server, "/about", html(r#"<a href="/">Home</a>"#)).await;
    mount_page(&mock_server, "/missing", ResponseTemplate::new(404)).await;

    let toml = create_test_config(
        &base,
        &format!(
            "[[phase]]\nname = \"before_login\"\nseeds = [\"{}/\"]\n",
            base
        ),
    );
    let config = parse_config(&toml).expect("valid config");

    let observations = sweep(&config).await.expect("sweep succeeds");

    assert_eq!(
        observed(&observations),
        vec![
            (Some(Phase::BeforeLogin), format!("{}/", base), Some(200)),
            (Some(Phase::BeforeLogin), format!("{}/about", base), Some(200)),
            (Some(Phase::BeforeLogin), format!("{}/missing", base), Some(404)),
        ]
    );
    assert!(observations.iter().all(|o| o.error.is_none()));
}

#[tokio::test]
async fn test_redirect_recorded_under_requested_url() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(&mock_server, "/", html(r#"<a href="/old">Old</a>"#)).await;
    mount_page(
        &mock_server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", "/new/"),
    )
    .await;
    // Relative links on the redirected page resolve against its final URL
    mount_page(&mock_server, "/new/", html(r#"<a href="child">Child</a>"#)).await;
    mount_page(&mock_server, "/new/child", html("leaf")).await;

    let toml = create_test_config(
        &base,
        &format!(
            "[[phase]]\nname = \"before_login\"\nseeds = [\"{}/\"]\n",
            base
        ),
    );
    let config = parse_config(&toml).expect("valid config");
    let observations = sweep(&config).await.expect("sweep succeeds");

    let urls: Vec<&str> = observations.iter().map(|o| o.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/", base),
            format!("{}/old", base),
            format!("{}/new/child", base),
        ]
    );
}

#[tokio::test]
async fn test_max_depth_limits_expansion() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(&mock_server, "/", html(r#"<a href="/one">1</a>"#)).await;
    mount_page(&mock_server, "/one", html(r#"<a href="/two">2</a>"#)).await;
    mount_page(&mock_server, "/two", html(r#"<a href="/three">3</a>"#)).await;

    let toml = create_test_config(
        &base,
        &format!(
            "[[phase]]\nname = \"before_login\"\nseeds = [\"{}/\"]\n",
            base
        ),
    )
    .replace(
        "navigation-timeout-ms = 2000",
        "navigation-timeout-ms = 2000\nmax-depth = 1",
    );
    let config = parse_config(&toml).expect("valid config");
    let observations = sweep(&config).await.expect("sweep succeeds");

    assert_eq!(observations.len(), 2);
    assert_eq!(observations[1].url, format!("{}/one", base));
}

#[tokio::test]
async fn test_login_and_logout_phases() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(&mock_server, "/", html(r#"<a href="/account">Account</a>"#)).await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(303)
                .insert_header("location", "/account")
                .insert_header("set-cookie", "session=abc; Path=/"),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("cookie", "session=abc"))
        .respond_with(html(r#"<a href="/account/settings">Settings</a>"#))
        .with_priority(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/account", ResponseTemplate::new(401)).await;
    mount_page(&mock_server, "/account/settings", html("settings")).await;

    mount_page(
        &mock_server,
        "/logout",
        html("bye").insert_header("set-cookie", "session=gone; Path=/"),
    )
    .await;

    let toml = create_test_config(
        &base,
        &format!(
            r#"
[auth]
login-url = "{base}/login"
success-path = "/account"
logout-url = "{base}/logout"
email = "user@example.com"
password = "secret"

[[phase]]
name = "before_login"
seeds = ["{base}/"]

[[phase]]
name = "after_login"
seeds = ["{base}/account"]

[[phase]]
name = "after_logout"
seeds = ["{base}/account"]
"#,
            base = base
        ),
    )
    .replace(
        "navigation-timeout-ms = 2000",
        "navigation-timeout-ms = 2000\nshare-visited = false",
    );
    let config = parse_config(&toml).expect("valid config");

    let observations = sweep(&config).await.expect("sweep succeeds");

    assert_eq!(
        observed(&observations),
        vec![
            (Some(Phase::BeforeLogin), format!("{}/", base), Some(200)),
            (Some(Phase::BeforeLogin), format!("{}/account", base), Some(401)),
            (Some(Phase::AfterLogin), format!("{}/account", base), Some(200)),
            (
                Some(Phase::AfterLogin),
                format!("{}/account/settings", base),
                Some(200)
            ),
            (Some(Phase::AfterLogout), format!("{}/account", base), Some(401)),
        ]
    );
}

#[tokio::test]
async fn test_failed_login_aborts_sweep() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(&mock_server, "/", html("home")).await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let toml = create_test_config(
        &base,
        &format!(
            r#"
[auth]
login-url = "{base}/login"
email = "user@example.com"
password = "wrong"

[[phase]]
name = "before_login"
seeds = ["{base}/"]

[[phase]]
name = "after_login"
seeds = ["{base}/"]
"#,
            base = base
        ),
    );
    let config = parse_config(&toml).expect("valid config");

    let result = sweep(&config).await;
    assert!(matches!(result, Err(link_sweep::SweepError::Auth(_))));
}

#[tokio::test]
async fn test_unreachable_page_becomes_error_observation() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html(r#"<a href="/slow">Slow</a><a href="/fine">Fine</a>"#),
    )
    .await;
    mount_page(
        &mock_server,
        "/slow",
        html("late").set_delay(std::time::Duration::from_secs(3)),
    )
    .await;
    mount_page(&mock_server, "/fine", html("ok")).await;

    let toml = create_test_config(
        &base,
        &format!(
            "[[phase]]\nname = \"before_login\"\nseeds = [\"{}/\"]\n",
            base
        ),
    )
    .replace("navigation-timeout-ms = 2000", "navigation-timeout-ms = 300");
    let config = parse_config(&toml).expect("valid config");

    let observations = sweep(&config).await.expect("sweep continues past timeouts");

    assert_eq!(observations.len(), 3);
    let slow = &observations[1];
    assert_eq!(slow.url, format!("{}/slow", base));
    assert_eq!(slow.status, None);
    assert!(slow.error.is_some());
    assert_eq!(observations[2].status, Some(200));
}
