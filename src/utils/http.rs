use reqwest;
use tracing::warn;

/// Build the HTTP client shared by the URL fetch and the downloads
pub fn build_client() -> reqwest::Client {
    match reqwest::Client::builder().user_agent(get_user_agent()).build() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Failed to build HTTP client, using defaults without a user agent");
            reqwest::Client::new()
        }
    }
}

/// Get standard user agent string
pub fn get_user_agent() -> &'static str {
    "figma-fetch"
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn client_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("User-Agent", get_user_agent()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let response = build_client().get(server.uri()).send().await.unwrap();
        assert!(response.status().is_success());
    }
}
