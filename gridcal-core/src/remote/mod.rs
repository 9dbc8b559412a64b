//! Client for the hosted backend.
//!
//! The backend exposes one table over a PostgREST-style interface:
//! `GET {url}/rest/v1/{table}?select=...` and `POST` with a JSON body.
//! Rows are returned as loose JSON and go through [`adapter`] before the rest
//! of the crate sees them.

pub mod adapter;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::config::BackendConfig;
use crate::error::{GridcalError, GridcalResult, RemoteCause};

const REST_PATH: &str = "rest/v1/";

/// Error body returned by the backend on failure.
#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
    code: Option<String>,
}

/// HTTP client for the backend table.
#[derive(Clone)]
pub struct RestBackend {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> GridcalResult<Self> {
        let endpoint = table_endpoint(&config.url, &config.table)?;
        Ok(RestBackend {
            http: reqwest::Client::new(),
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.endpoint.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// GET every row, optionally restricted to one team member.
    pub async fn select_rows(&self, team_member: Option<&str>) -> GridcalResult<Vec<Value>> {
        let mut query = vec![("select", "*".to_string())];
        if let Some(member) = team_member {
            query.push(("team_member", format!("eq.{}", member)));
        }

        log::debug!("GET {} {:?}", self.endpoint, query);
        let resp = self.request(reqwest::Method::GET).query(&query).send().await?;
        parse_response(resp).await
    }

    /// POST one row, returning the stored representation.
    pub async fn insert_row(&self, row: &Value) -> GridcalResult<Value> {
        log::debug!("POST {}", self.endpoint);
        let resp = self
            .request(reqwest::Method::POST)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let mut rows = parse_response(resp).await?;
        if rows.is_empty() {
            return Err(GridcalError::remote(RemoteCause::Other, "insert returned no rows"));
        }
        Ok(rows.swap_remove(0))
    }

    /// Whether any row carries this `team_member`.
    pub async fn team_member_exists(&self, name: &str) -> GridcalResult<bool> {
        let query = [
            ("select", "team_member".to_string()),
            ("team_member", format!("eq.{}", name)),
            ("limit", "1".to_string()),
        ];

        let resp = self.request(reqwest::Method::GET).query(&query).send().await?;
        let rows = parse_response(resp).await?;
        Ok(!rows.is_empty())
    }
}

/// `{url}/rest/v1/{table}`, tolerating a missing trailing slash on `url`.
fn table_endpoint(url: &str, table: &str) -> GridcalResult<Url> {
    let mut base = url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    Url::parse(&base)
        .and_then(|u| u.join(REST_PATH))
        .and_then(|u| u.join(table))
        .map_err(|e| GridcalError::Config(format!("Invalid backend url '{}': {}", url, e)))
}

async fn parse_response(resp: reqwest::Response) -> GridcalResult<Vec<Value>> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(classify_failure(status, &body))
}

/// Turn a failed response into a remote error with a best-effort cause.
fn classify_failure(status: StatusCode, body: &str) -> GridcalError {
    let parsed: Option<ErrorResponse> = serde_json::from_str(body).ok();
    let message = parsed
        .as_ref()
        .and_then(|e| e.message.clone())
        .unwrap_or_else(|| format!("HTTP {}", status));

    // Postgres reports row-level security denials as 42501, sometimes behind a 401
    let is_permission = parsed
        .as_ref()
        .and_then(|e| e.code.as_deref())
        .is_some_and(|code| code == "42501")
        || message.to_lowercase().contains("permission denied");

    let cause = if is_permission {
        RemoteCause::Permission
    } else {
        RemoteCause::from_status(status.as_u16())
    };

    GridcalError::remote(cause, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TABLE_PATH: &str = "/rest/v1/bookings";

    fn backend_for(server: &MockServer) -> RestBackend {
        RestBackend::new(&BackendConfig {
            url: server.uri(),
            api_key: "anon-key".into(),
            table: "bookings".into(),
        })
        .unwrap()
    }

    #[test]
    fn endpoint_joins_table() {
        let endpoint = table_endpoint("https://abc.supabase.co", "bookings").unwrap();
        assert_eq!(endpoint.as_str(), "https://abc.supabase.co/rest/v1/bookings");

        let endpoint = table_endpoint("https://abc.supabase.co/", "bookings").unwrap();
        assert_eq!(endpoint.as_str(), "https://abc.supabase.co/rest/v1/bookings");
    }

    #[test]
    fn endpoint_rejects_garbage() {
        assert!(matches!(
            table_endpoint("not a url", "bookings"),
            Err(GridcalError::Config(_))
        ));
    }

    #[test]
    fn rls_violation_is_permission() {
        let body = r#"{"code":"42501","message":"new row violates row-level security policy"}"#;
        match classify_failure(StatusCode::UNAUTHORIZED, body) {
            GridcalError::Remote { cause, message } => {
                assert_eq!(cause, RemoteCause::Permission);
                assert!(message.contains("row-level security"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_key_is_authentication() {
        let body = r#"{"message":"Invalid API key"}"#;
        match classify_failure(StatusCode::UNAUTHORIZED, body) {
            GridcalError::Remote { cause, .. } => assert_eq!(cause, RemoteCause::Authentication),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_body_falls_back_to_status() {
        match classify_failure(StatusCode::BAD_GATEWAY, "<html>") {
            GridcalError::Remote { cause, message } => {
                assert_eq!(cause, RemoteCause::Other);
                assert!(message.contains("502"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn select_rows_filters_by_member() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TABLE_PATH))
            .and(query_param("select", "*"))
            .and(query_param("team_member", "eq.alice"))
            .and(header("apikey", "anon-key"))
            .and(header("authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "product": "Standup", "start_time": "2024-03-10"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let rows = backend_for(&server).select_rows(Some("alice")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["product"], "Standup");
    }

    #[tokio::test]
    async fn insert_asks_for_the_stored_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TABLE_PATH))
            .and(header("Prefer", "return=representation"))
            .and(body_partial_json(json!({"product": "Standup"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([
                {"id": 7, "product": "Standup", "start_time": "2024-03-10"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let stored = backend_for(&server)
            .insert_row(&json!({"product": "Standup"}))
            .await
            .unwrap();
        assert_eq!(stored["id"], 7);
    }

    #[tokio::test]
    async fn empty_insert_response_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TABLE_PATH))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
            .mount(&server)
            .await;

        let result = backend_for(&server).insert_row(&json!({"product": "x"})).await;
        assert!(matches!(
            result,
            Err(GridcalError::Remote { cause: RemoteCause::Other, .. })
        ));
    }

    #[tokio::test]
    async fn team_member_lookup_checks_for_any_row() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TABLE_PATH))
            .and(query_param("team_member", "eq.alice"))
            .and(query_param("limit", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"team_member": "alice"}])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(TABLE_PATH))
            .and(query_param("team_member", "eq.mallory"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let backend = backend_for(&server);
        assert!(backend.team_member_exists("alice").await.unwrap());
        assert!(!backend.team_member_exists("mallory").await.unwrap());
    }

    #[tokio::test]
    async fn forbidden_response_is_a_permission_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TABLE_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "code": "42501",
                "message": "permission denied for table bookings"
            })))
            .mount(&server)
            .await;

        match backend_for(&server).insert_row(&json!({"product": "x"})).await {
            Err(GridcalError::Remote { cause, message }) => {
                assert_eq!(cause, RemoteCause::Permission);
                assert!(message.contains("permission denied"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
