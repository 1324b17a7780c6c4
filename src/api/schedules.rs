use crate::client::{ApiClient, ApiRequest, Result};
use crate::models::{NewSchedule, Schedule, ScheduleUpdate};

pub async fn list(client: &ApiClient) -> Result<Vec<Schedule>> {
    client.send_json(&ApiRequest::get("/schedules")).await
}

pub async fn create(client: &ApiClient, schedule: &NewSchedule) -> Result<Schedule> {
    let request = ApiRequest::post("/schedules").with_json(schedule)?;
    client.send_json(&request).await
}

pub async fn update(client: &ApiClient, id: &str, update: &ScheduleUpdate) -> Result<Schedule> {
    let request = ApiRequest::put(format!("/schedules/{}", id)).with_json(update)?;
    client.send_json(&request).await
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<()> {
    client
        .send_unit(&ApiRequest::delete(format!("/schedules/{}", id)))
        .await
}

/// Flip a schedule's active flag.
pub async fn set_active(client: &ApiClient, id: &str, active: bool) -> Result<Schedule> {
    update(
        client,
        id,
        &ScheduleUpdate {
            active: Some(active),
            ..Default::default()
        },
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::models::{RemittanceKind, ScheduleFrequency};
    use crate::store::MemoryStore;
    use mockito::Server;
    use std::sync::Arc;

    fn client_for(url: &str) -> ApiClient {
        ApiClient::new(
            &ApiConfig {
                base_url: url.to_string(),
                timeout_in_ms: 5_000,
            },
            Arc::new(MemoryStore::new()),
        )
        .expect("client should build")
    }

    const SCHEDULE_BODY: &str = r#"{
        "id": "s-1",
        "name": "monthly pf run",
        "kind": "pf",
        "frequency": "monthly",
        "day_of_month": 15,
        "active": true
    }"#;

    /// Test that create posts the new schedule and decodes the result.
    #[tokio::test]
    async fn test_create_schedule() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/schedules")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "name": "monthly pf run",
                "kind": "pf",
                "frequency": "monthly",
                "day_of_month": 15
            })))
            .with_status(200)
            .with_body(SCHEDULE_BODY)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let schedule = create(
            &client,
            &NewSchedule {
                name: "monthly pf run".to_string(),
                kind: RemittanceKind::Pf,
                frequency: ScheduleFrequency::Monthly,
                day_of_month: 15,
            },
        )
        .await
        .expect("create");
        m.assert_async().await;
        assert_eq!(schedule.id, "s-1");
        assert!(schedule.active);
    }

    /// Test that set_active only serializes the active field.
    #[tokio::test]
    async fn test_set_active_partial_update() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("PUT", "/schedules/s-1")
            .match_body(mockito::Matcher::Json(serde_json::json!({"active": false})))
            .with_status(200)
            .with_body(SCHEDULE_BODY)
            .create_async()
            .await;

        let client = client_for(&server.url());
        set_active(&client, "s-1", false).await.expect("update");
        m.assert_async().await;
    }

    /// Test that delete succeeds on an empty 204 response.
    #[tokio::test]
    async fn test_delete_schedule() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/schedules/s-1")
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server.url());
        delete(&client, "s-1").await.expect("delete");
    }
}
