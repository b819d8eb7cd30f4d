//! The page checker: three independent predicates over one target URL.
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::CheckConfig;
use crate::report::{CheckKind, CheckOutcome, RunReport};

/// Returns true iff the lower-cased body contains the expected substring.
///
/// `expected_lowercase` must already be lower-cased by the caller; only the
/// body is case-folded, and nothing else (whitespace, accents, Unicode
/// composition) is normalized.
pub fn name_in_body(body: &str, expected_lowercase: &str) -> bool {
    body.to_lowercase().contains(expected_lowercase)
}

/// Returns true iff the raw body contains the literal fragment, quote
/// characters and attribute name included. Case-sensitive; a change in
/// quoting style or whitespace inside the attribute breaks the match.
pub fn fragment_in_body(body: &str, fragment: &str) -> bool {
    body.contains(fragment)
}

/// Verifies that a known static page is reachable and contains two expected
/// literal substrings. Every check performs its own fresh GET; checks share
/// no state and may run in any order.
pub struct PageChecker {
    client: reqwest::Client,
    config: CheckConfig,
}

impl PageChecker {
    pub fn new(config: CheckConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.max(1)))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Passes iff the target returns status code 200 exactly. Any other
    /// status, or any network fault, fails the check.
    pub async fn check_availability(&self) -> CheckOutcome {
        let start_time = Instant::now();
        let result = self.client.get(&self.config.target_url).send().await;
        let response_time_ms = start_time.elapsed().as_millis() as i32;

        let (successful, details, latency) = match result {
            Ok(response) => {
                let status = response.status();
                if status.as_u16() == 200 {
                    (true, status.to_string(), Some(response_time_ms))
                } else {
                    (
                        false,
                        format!("Expected status 200, got {status}"),
                        Some(response_time_ms),
                    )
                }
            }
            Err(e) => (false, describe_request_error(&e), None),
        };

        debug!(
            target_url = %self.config.target_url,
            successful,
            details = %details,
            "Availability check completed."
        );
        CheckOutcome::new(CheckKind::Availability, successful, details, latency)
    }

    /// Passes iff the lower-cased body contains the configured name
    /// substring. The body is used whatever the status code was, so an
    /// error page is searched like any other.
    pub async fn check_name_presence(&self) -> CheckOutcome {
        let (body, latency) = match self.fetch_body().await {
            Ok(fetched) => fetched,
            Err(e) => {
                return CheckOutcome::new(CheckKind::NamePresence, false, e, None);
            }
        };

        let expected = &self.config.expected_name;
        let (successful, details) = if name_in_body(&body, expected) {
            (true, format!("Found '{expected}' in lower-cased body"))
        } else {
            (
                false,
                format!(
                    "Did not find '{expected}' in lower-cased body ({} bytes)",
                    body.len()
                ),
            )
        };
        CheckOutcome::new(CheckKind::NamePresence, successful, details, Some(latency))
    }

    /// Passes iff the raw body contains the configured literal link
    /// fragment. Deliberately brittle: the match is exact, down to the
    /// quote characters.
    pub async fn check_link_presence(&self) -> CheckOutcome {
        let (body, latency) = match self.fetch_body().await {
            Ok(fetched) => fetched,
            Err(e) => {
                return CheckOutcome::new(CheckKind::LinkPresence, false, e, None);
            }
        };

        let fragment = &self.config.expected_link_fragment;
        let (successful, details) = if fragment_in_body(&body, fragment) {
            (true, format!("Found literal fragment '{fragment}'"))
        } else {
            (
                false,
                format!(
                    "Did not find literal fragment '{fragment}' in body ({} bytes)",
                    body.len()
                ),
            )
        };
        CheckOutcome::new(CheckKind::LinkPresence, successful, details, Some(latency))
    }

    /// Runs the three checks sequentially and never short-circuits: a
    /// failed check does not stop the ones after it.
    pub async fn run_all(&self) -> RunReport {
        let outcomes = vec![
            self.check_availability().await,
            self.check_name_presence().await,
            self.check_link_presence().await,
        ];
        RunReport {
            target_url: self.config.target_url.clone(),
            outcomes,
        }
    }

    async fn fetch_body(&self) -> Result<(String, i32), String> {
        let start_time = Instant::now();
        let result = self.client.get(&self.config.target_url).send().await;
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!(target_url = %self.config.target_url, error = %e, "Request failed.");
                return Err(describe_request_error(&e));
            }
        };
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(target_url = %self.config.target_url, error = %e, "Failed to read response body.");
                return Err(describe_request_error(&e));
            }
        };
        let response_time_ms = start_time.elapsed().as_millis() as i32;
        Ok((body, response_time_ms))
    }
}

fn describe_request_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Error: Request timed out".to_string()
    } else {
        format!("Error: {e}")
    }
}
