use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client as HttpClient, Response};
use serde_json::Value;

use crate::config::{ClientConfig, TASK_CONTENT_TYPE};
use crate::error::{IceScrumError, Result};
use crate::mapper::map_task;
use crate::models::{NormalizedTask, RawTaskRecord};

/// Authenticated client bound to a single iceScrum project.
#[derive(Clone)]
pub struct IceScrumClient {
    http: HttpClient,
    config: ClientConfig,
}

impl IceScrumClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issues the task list request and fails on any non-success status.
    pub async fn check_access(&self) -> Result<()> {
        self.send_tasks_request().await.map(|_| ())
    }

    /// Fetches the raw task payloads in server order.
    ///
    /// Elements that are not task objects are logged and skipped so that one
    /// bad record does not hide the rest of the list.
    pub async fn fetch_raw_tasks(&self) -> Result<Vec<RawTaskRecord>> {
        let response = self.send_tasks_request().await?;
        let elements = response.json::<Vec<Value>>().await?;
        let total = elements.len();

        let records: Vec<RawTaskRecord> = elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| {
                match serde_json::from_value::<RawTaskRecord>(element) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        tracing::warn!(index, error = %err, "skipping malformed task payload");
                        None
                    }
                }
            })
            .collect();

        tracing::debug!(total, parsed = records.len(), "received iceScrum tasks");
        Ok(records)
    }

    /// Fetches and normalizes the project's full task list. An empty list is a valid result.
    pub async fn list_tasks(&self) -> Result<Vec<NormalizedTask>> {
        let records = self.fetch_raw_tasks().await?;
        Ok(records
            .into_iter()
            .map(|record| map_task(record, &self.config.base_url, &self.config.project_key))
            .collect())
    }

    async fn send_tasks_request(&self) -> Result<Response> {
        let url = self.config.tasks_url();
        tracing::debug!(%url, "requesting iceScrum task list");
        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, TASK_CONTENT_TYPE)
            .send()
            .await?;
        Self::ensure_success(response)
    }

    fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            tracing::debug!(%status, "iceScrum request rejected");
            Err(IceScrumError::from_status(status))
        }
    }
}

fn build_http_client(config: &ClientConfig) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    let mut auth_value = header_value(basic_credentials(&config.username, &config.password))?;
    auth_value.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth_value);

    headers.insert(USER_AGENT, header_value(config.user_agent.clone())?);

    HttpClient::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .danger_accept_invalid_certs(config.accept_invalid_certs)
        .build()
        .map_err(|err| IceScrumError::Other(err.to_string()))
}

fn basic_credentials(username: &str, password: &str) -> String {
    let encoded = BASE64_STANDARD.encode(format!("{username}:{password}"));
    format!("Basic {encoded}")
}

fn header_value(value: String) -> Result<HeaderValue> {
    HeaderValue::from_str(&value).map_err(|err| IceScrumError::Other(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Classification, TaskStatus};
    use mockito::{Matcher, Server, ServerGuard};
    use std::time::Duration;

    const TASKS_PATH: &str = "/ws/p/PROJ1/task/";

    fn client_for(server: &ServerGuard) -> IceScrumClient {
        let config = ClientConfig::new(server.url(), "PROJ1", "alice", "secret")
            .with_timeout(Duration::from_secs(5));
        IceScrumClient::new(config).expect("client should build")
    }

    #[test]
    fn basic_credentials_are_base64_encoded() {
        assert_eq!(basic_credentials("alice", "secret"), "Basic YWxpY2U6c2VjcmV0");
    }

    #[tokio::test]
    async fn list_tasks_sends_auth_and_content_type_and_keeps_order() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", TASKS_PATH)
            .match_header("content-type", "text/json")
            .match_header("authorization", "Basic YWxpY2U6c2VjcmV0")
            .match_query(Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"uid": 2, "name": "Second", "type": 11, "state": 2, "backlog": {"id": 1},
                     "lastUpdated": "2020-01-01T10:00:00Z", "creationDate": "2020-01-01T09:00:00Z"},
                    {"uid": 1, "name": "First", "type": 10, "state": 0, "backlog": {"id": 1},
                     "lastUpdated": "2020-01-01T10:00:00Z", "creationDate": "2020-01-01T09:00:00Z"}
                ]"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let tasks = client.list_tasks().await.expect("tasks should load");

        mock.assert_async().await;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id(), "T2");
        assert_eq!(tasks[0].classification(), Classification::Bug);
        assert_eq!(tasks[1].id(), "T1");
        assert_eq!(tasks[1].status(), TaskStatus::Open);
        assert_eq!(
            tasks[1].issue_url(),
            format!("{}/p/PROJ1-T1", server.url())
        );
    }

    #[tokio::test]
    async fn empty_array_is_a_valid_result() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", TASKS_PATH)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let tasks = client_for(&server).list_tasks().await.expect("empty list");
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn documented_statuses_are_classified() {
        let cases = [
            (503, "ServiceUnavailable"),
            (401, "Unauthorized"),
            (403, "Forbidden"),
            (404, "NotFound"),
            (500, "Server"),
        ];

        for (status, expected) in cases {
            let mut server = Server::new_async().await;
            let _mock = server
                .mock("GET", TASKS_PATH)
                .with_status(status)
                .with_body("nope")
                .create_async()
                .await;

            let err = client_for(&server)
                .list_tasks()
                .await
                .expect_err("non-success status must fail");
            let kind = match err {
                IceScrumError::ServiceUnavailable => "ServiceUnavailable",
                IceScrumError::Unauthorized => "Unauthorized",
                IceScrumError::Forbidden => "Forbidden",
                IceScrumError::NotFound => "NotFound",
                IceScrumError::Server { .. } => "Server",
                other => panic!("unexpected error for {status}: {other:?}"),
            };
            assert_eq!(kind, expected);
        }
    }

    #[tokio::test]
    async fn non_array_body_is_a_serialization_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", TASKS_PATH)
            .with_status(200)
            .with_body(r#"{"error": "not a list"}"#)
            .create_async()
            .await;

        let err = client_for(&server).list_tasks().await.expect_err("object body");
        assert!(matches!(err, IceScrumError::Serialization(_)));
    }

    #[tokio::test]
    async fn malformed_element_is_skipped() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", TASKS_PATH)
            .with_status(200)
            .with_body(r#"[{"name": "no uid"}, {"uid": 3, "type": 11, "state": 1, "backlog": {"id": 4}}]"#)
            .create_async()
            .await;

        let tasks = client_for(&server).list_tasks().await.expect("partial list");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id(), "T3");
    }

    #[tokio::test]
    async fn check_access_reports_status_without_parsing_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", TASKS_PATH)
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        client_for(&server)
            .check_access()
            .await
            .expect("status 200 is enough for the access check");
    }

    #[tokio::test]
    async fn slow_server_surfaces_as_timeout() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", TASKS_PATH)
            .with_status(200)
            .with_body_from_request(|_| {
                std::thread::sleep(Duration::from_millis(1500));
                b"[]".to_vec()
            })
            .create_async()
            .await;

        let config = ClientConfig::new(server.url(), "PROJ1", "alice", "secret")
            .with_timeout(Duration::from_millis(200));
        let err = IceScrumClient::new(config)
            .expect("client should build")
            .list_tasks()
            .await
            .expect_err("response slower than the timeout");
        assert!(matches!(err, IceScrumError::Timeout(_)), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn closed_port_surfaces_as_network_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("ephemeral port")
            .port();

        let config = ClientConfig::new(format!("http://127.0.0.1:{port}"), "PROJ1", "alice", "secret")
            .with_connect_timeout(Duration::from_secs(2));
        let err = IceScrumClient::new(config)
            .expect("client should build")
            .check_access()
            .await
            .expect_err("nothing listens on the port");
        assert!(matches!(err, IceScrumError::Network(_)), "unexpected error: {err:?}");
    }
}
