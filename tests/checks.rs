use std::io::Write;

use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use pagewatch::checker::PageChecker;
use pagewatch::config::CheckConfig;
use pagewatch::report::CheckKind;

const NAME: &str = "pablo sebastian gómez";
const LINK_FRAGMENT: &str = r#"href="https://github.com/pablosebastiangomez-dev""#;

/// Serves a fixed response on an ephemeral port and returns the page URL.
async fn serve_page(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().route("/", get(move || async move { (status, Html(body)) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/")
}

fn checker_for(target_url: String) -> PageChecker {
    let config = CheckConfig {
        target_url,
        expected_name: NAME.to_string(),
        expected_link_fragment: LINK_FRAGMENT.to_string(),
        timeout_seconds: 5,
    };
    PageChecker::new(config).unwrap()
}

#[tokio::test]
async fn all_checks_pass_against_a_well_formed_page() {
    let url = serve_page(
        StatusCode::OK,
        r#"<html><body><h1>Pablo Sebastian Gómez</h1><a href="https://github.com/pablosebastiangomez-dev">GitHub</a></body></html>"#,
    )
    .await;
    let checker = checker_for(url.clone());

    let report = checker.run_all().await;
    assert!(report.all_passed(), "report: {report:?}");
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.target_url, url);
    for outcome in &report.outcomes {
        assert!(outcome.response_time_ms.is_some());
    }
}

#[tokio::test]
async fn availability_requires_status_200_exactly() {
    let url = serve_page(StatusCode::NO_CONTENT, "").await;
    let checker = checker_for(url);

    let outcome = checker.check_availability().await;
    assert!(!outcome.successful);
    assert!(outcome.details.contains("Expected status 200"), "{}", outcome.details);
    assert!(outcome.details.contains("204"), "{}", outcome.details);
}

#[tokio::test]
async fn checks_stay_independent_when_the_page_returns_404() {
    // The 404 error page still carries the name, so the name check passes
    // even though availability failed.
    let url = serve_page(
        StatusCode::NOT_FOUND,
        "<html><body>Not found, but signed by Pablo Sebastian Gómez</body></html>",
    )
    .await;
    let checker = checker_for(url);

    let report = checker.run_all().await;
    assert_eq!(report.outcomes.len(), 3);
    assert!(!report.all_passed());

    let availability = &report.outcomes[0];
    assert_eq!(availability.kind, CheckKind::Availability);
    assert!(!availability.successful);
    assert!(availability.details.contains("404"), "{}", availability.details);

    let name = &report.outcomes[1];
    assert_eq!(name.kind, CheckKind::NamePresence);
    assert!(name.successful);

    let link = &report.outcomes[2];
    assert_eq!(link.kind, CheckKind::LinkPresence);
    assert!(!link.successful);
}

#[tokio::test]
async fn name_check_folds_body_case() {
    let url = serve_page(StatusCode::OK, "<html>PABLO SEBASTIAN GÓMEZ</html>").await;
    let checker = checker_for(url);

    let outcome = checker.check_name_presence().await;
    assert!(outcome.successful, "{}", outcome.details);
}

#[tokio::test]
async fn link_check_rejects_single_quoted_attribute() {
    let url = serve_page(
        StatusCode::OK,
        "<html>Pablo Sebastian Gómez <a href='https://github.com/pablosebastiangomez-dev'>GitHub</a></html>",
    )
    .await;
    let checker = checker_for(url);

    // Same URL, wrong quoting style: the literal match must fail while the
    // other two checks still pass.
    let report = checker.run_all().await;
    assert!(report.outcomes[0].successful);
    assert!(report.outcomes[1].successful);
    let link = &report.outcomes[2];
    assert!(!link.successful);
    assert!(link.details.contains("Did not find"), "{}", link.details);
}

#[tokio::test]
async fn connection_error_fails_the_check_without_panicking() {
    // Bind then drop, so the port is closed by the time the checker dials.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let checker = checker_for(format!("http://{addr}/"));

    let availability = checker.check_availability().await;
    assert!(!availability.successful);
    assert!(availability.details.starts_with("Error:"), "{}", availability.details);
    assert!(availability.response_time_ms.is_none());

    let name = checker.check_name_presence().await;
    assert!(!name.successful);
    assert!(name.details.starts_with("Error:"), "{}", name.details);
}

#[tokio::test]
async fn repeated_checks_against_an_unchanged_page_agree() {
    let url = serve_page(
        StatusCode::OK,
        r#"<html>Pablo Sebastian Gómez <a href="https://github.com/pablosebastiangomez-dev">x</a></html>"#,
    )
    .await;
    let checker = checker_for(url);

    let first = checker.run_all().await;
    let second = checker.run_all().await;
    for (a, b) in first.outcomes.iter().zip(second.outcomes.iter()) {
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.successful, b.successful);
        assert_eq!(a.details, b.details);
    }
}

#[tokio::test]
async fn config_file_overrides_and_defaults_compose() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"target_url = "http://127.0.0.1:1/""#).unwrap();
    writeln!(file, "timeout_seconds = 3").unwrap();

    let config = CheckConfig::load(Some(file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.target_url, "http://127.0.0.1:1/");
    assert_eq!(config.timeout_seconds, 3);
    assert_eq!(config.expected_name, NAME);
    assert_eq!(config.expected_link_fragment, LINK_FRAGMENT);
}

#[tokio::test]
async fn missing_explicit_config_file_is_an_error() {
    let result = CheckConfig::load(Some("/nonexistent/pagewatch.toml"));
    assert!(result.is_err());
}
