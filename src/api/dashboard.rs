use futures::future::try_join;

use crate::client::{ApiClient, ApiRequest, Result};
use crate::models::{DashboardSummary, RemittanceFile};

/// Fetch the aggregate counts behind the dashboard charts.
pub async fn summary(client: &ApiClient) -> Result<DashboardSummary> {
    client
        .send_json(&ApiRequest::get("/dashboard/summary"))
        .await
}

/// Everything the dashboard screen shows: the summary plus the recent file
/// list, fetched concurrently.
pub async fn overview(client: &ApiClient) -> Result<(DashboardSummary, Vec<RemittanceFile>)> {
    try_join(summary(client), super::files::list(client, None)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::store::MemoryStore;
    use mockito::Server;
    use std::sync::Arc;

    /// Test that overview combines both endpoints.
    #[tokio::test]
    async fn test_overview_fetches_both() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/dashboard/summary")
            .with_status(200)
            .with_body(
                r#"{
                    "total_files": 12,
                    "processed": 9,
                    "failed": 1,
                    "pending": 2,
                    "monthly": [{"month": "2026-07", "uploads": 4, "processed": 4}]
                }"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/files")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = ApiClient::new(
            &ApiConfig {
                base_url: server.url(),
                timeout_in_ms: 5_000,
            },
            Arc::new(MemoryStore::new()),
        )
        .expect("client should build");

        let (summary, files) = overview(&client).await.expect("overview");
        assert_eq!(summary.total_files, 12);
        assert_eq!(summary.monthly.len(), 1);
        assert!(files.is_empty());
    }
}
