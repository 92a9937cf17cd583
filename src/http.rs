//! HTTP retry helper shared by the LLM client.

use reqwest::StatusCode;
use std::time::Duration;

/// Runs a request closure with exponential backoff.
///
/// Retries network errors, 429 Too Many Requests (honouring Retry-After)
/// and 5xx responses. Any other status is returned to the caller as-is so
/// it can parse the body, as is the final response once retries run out.
pub async fn request_with_retry<F, Fut>(
    mut task: F,
    max_retries: u32,
) -> Result<reqwest::Response, String>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    let mut delay = Duration::from_millis(1000);

    loop {
        attempt += 1;
        match task().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                }

                // Exhausted retries: hand the error response to the caller to parse
                if attempt > max_retries {
                    return Ok(response);
                }

                if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                    // Prefer the wait the server asked for
                    let retry_delay = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or(delay);

                    tracing::warn!(
                        %status,
                        ?retry_delay,
                        attempt,
                        max_retries,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(retry_delay).await;
                    delay = std::cmp::min(delay * 2, Duration::from_secs(60)); // Cap at 60s
                    continue;
                }

                // Other client errors (400, 401, 404) are likely permanent
                return Ok(response);
            }
            Err(e) => {
                if attempt > max_retries {
                    return Err(format!(
                        "Network request failed after {} attempts: {}",
                        max_retries, e
                    ));
                }
                tracing::warn!(error = %e, ?delay, attempt, max_retries, "network error, retrying");
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, Duration::from_secs(60));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn rate_limited_request_is_retried_until_it_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/draft"))
            .respond_with(
                ResponseTemplate::new(429).insert_header("retry-after", "0"),
            )
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/draft"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/draft", server.uri());
        let response = request_with_retry(|| client.get(&url).send(), 3)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/draft"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/draft", server.uri());
        let response = request_with_retry(|| client.get(&url).send(), 3)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn exhausted_retries_return_the_error_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/draft"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/draft", server.uri());
        let response = request_with_retry(|| client.get(&url).send(), 0)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn network_failure_surfaces_as_an_error_string() {
        // Nothing listens on this port, so the connection itself fails.
        let client = reqwest::Client::new();
        let err = request_with_retry(|| client.get("http://127.0.0.1:9/draft").send(), 0)
            .await
            .unwrap_err();

        assert!(err.contains("after 0 attempts"), "unexpected error: {err}");
    }
}
