use pr_reviewer_server::{ServerConfig, run_server_with_handle};
use pr_reviewer_testing::ReviewerApiClient;

pub struct TestReviewerServer {
    port: u16,
    http_url: String,
    handle: actix_web::dev::ServerHandle,
}

impl TestReviewerServer {
    /// # Errors
    ///
    /// Returns an error if the server fails to start or no ports are available
    pub async fn start() -> anyhow::Result<Self> {
        let config = ServerConfig::new("127.0.0.1".to_string(), 0);

        let response = run_server_with_handle(&config)?;
        let port = response
            .addrs
            .first()
            .ok_or_else(|| anyhow::anyhow!("Expected at least one address"))?
            .port();
        let http_url = format!("http://127.0.0.1:{port}");

        wait_for_server_ready(&http_url).await?;

        Ok(Self {
            port,
            http_url,
            handle: response.handle,
        })
    }

    #[must_use]
    pub fn http_url(&self) -> &str {
        &self.http_url
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn client(&self) -> ReviewerApiClient {
        ReviewerApiClient::new(&self.http_url)
    }
}

impl Drop for TestReviewerServer {
    fn drop(&mut self) {
        let handle = self.handle.clone();
        tokio::spawn(async move {
            handle.stop(true).await;
        });
    }
}

async fn wait_for_server_ready(url: &str) -> anyhow::Result<()> {
    let client = ReviewerApiClient::new(url);

    for _ in 0..30 {
        if let Ok(true) = client.health().await {
            return Ok(());
        }
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    anyhow::bail!("Server failed to start within timeout")
}
