//! Typed access to the superhero REST API.
//!
//! Drafts are validated with the same rules the server applies, so an
//! invalid draft never leaves the process.

use async_trait::async_trait;
use pagination::{Page, PageInfo, PageRequest};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use superhero_model::{Superhero, SuperheroDraft, SuperheroId, Violation, validate_draft};
use tracing::debug;

use crate::ClientError;

/// Path of the catalogue resource relative to the base URL.
pub const SCOPE: &str = "/api/superheroes";

/// Message reported locally for a blank search.
pub const EMPTY_QUERY_MESSAGE: &str = "Search query is required";

/// Catalogue operations as seen from a client.
#[async_trait]
pub trait SuperheroApi: Send + Sync {
    /// One page of records.
    async fn list(&self, request: PageRequest) -> Result<Page<Superhero>, ClientError>;

    /// One record.
    async fn get(&self, id: &SuperheroId) -> Result<Superhero, ClientError>;

    /// Create a record; the server assigns the id.
    async fn create(&self, draft: &SuperheroDraft) -> Result<Superhero, ClientError>;

    /// Replace every field of a record.
    async fn update(&self, id: &SuperheroId, draft: &SuperheroDraft)
    -> Result<Superhero, ClientError>;

    /// Remove a record.
    async fn delete(&self, id: &SuperheroId) -> Result<(), ClientError>;

    /// Records matching any term of `query`.
    async fn search(&self, query: &str) -> Result<Vec<Superhero>, ClientError>;
}

#[derive(Deserialize)]
struct ListBody {
    data: Vec<Superhero>,
    pagination: PageInfo,
}

#[derive(Deserialize)]
struct DataBody<T> {
    data: T,
}

#[derive(Deserialize)]
struct MessageBody {}

#[derive(Deserialize)]
struct FailureBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<Violation>,
}

fn ensure_valid(draft: &SuperheroDraft) -> Result<(), ClientError> {
    let violations = validate_draft(draft);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ClientError::Validation(violations))
    }
}

fn failure(status: StatusCode, body: &[u8]) -> ClientError {
    let parsed = serde_json::from_slice::<FailureBody>(body).ok();
    let (message, violations) = match parsed {
        Some(FailureBody { message, errors }) => (message, errors),
        None => (None, Vec::new()),
    };
    ClientError::Request {
        status: status.as_u16(),
        message: message
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16())),
        violations,
    }
}

/// [`SuperheroApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSuperheroApi {
    client: Client,
    base_url: String,
}

impl HttpSuperheroApi {
    /// Client for the server at `base_url`, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Reuse an existing reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{SCOPE}{path}", self.base_url)
    }

    async fn send<T>(&self, request: RequestBuilder) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            debug!(status = status.as_u16(), "catalogue request failed");
            return Err(failure(status, &body));
        }
        serde_json::from_slice(&body).map_err(|err| ClientError::Decode(err.to_string()))
    }
}

#[async_trait]
impl SuperheroApi for HttpSuperheroApi {
    async fn list(&self, request: PageRequest) -> Result<Page<Superhero>, ClientError> {
        let query = [
            ("page", request.page().to_string()),
            ("limit", request.limit().to_string()),
        ];
        let body: ListBody = self
            .send(self.client.get(self.url("")).query(&query))
            .await?;
        Ok(Page::new(body.data, body.pagination))
    }

    async fn get(&self, id: &SuperheroId) -> Result<Superhero, ClientError> {
        let body: DataBody<Superhero> = self
            .send(self.client.get(self.url(&format!("/{id}"))))
            .await?;
        Ok(body.data)
    }

    async fn create(&self, draft: &SuperheroDraft) -> Result<Superhero, ClientError> {
        ensure_valid(draft)?;
        let body: DataBody<Superhero> =
            self.send(self.client.post(self.url("")).json(draft)).await?;
        Ok(body.data)
    }

    async fn update(
        &self,
        id: &SuperheroId,
        draft: &SuperheroDraft,
    ) -> Result<Superhero, ClientError> {
        ensure_valid(draft)?;
        let body: DataBody<Superhero> = self
            .send(self.client.put(self.url(&format!("/{id}"))).json(draft))
            .await?;
        Ok(body.data)
    }

    async fn delete(&self, id: &SuperheroId) -> Result<(), ClientError> {
        let _: MessageBody = self
            .send(self.client.delete(self.url(&format!("/{id}"))))
            .await?;
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<Superhero>, ClientError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ClientError::Validation(vec![Violation::new(
                "q",
                EMPTY_QUERY_MESSAGE,
            )]));
        }
        let body: DataBody<Vec<Superhero>> = self
            .send(self.client.get(self.url("/search")).query(&[("q", trimmed)]))
            .await?;
        Ok(body.data)
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Nothing listens on port 9; any request that escapes validation fails
    // with a transport error instead.
    fn unreachable_api() -> HttpSuperheroApi {
        HttpSuperheroApi::new("http://127.0.0.1:9/")
    }

    #[rstest]
    fn trailing_slashes_are_dropped() {
        let api = unreachable_api();
        assert_eq!(api.base_url(), "http://127.0.0.1:9");
        assert_eq!(api.url("/search"), "http://127.0.0.1:9/api/superheroes/search");
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_draft_is_rejected_without_a_request() {
        let draft = SuperheroDraft::new("B", "", Vec::<String>::new());
        let err = unreachable_api()
            .create(&draft)
            .await
            .expect_err("draft is invalid");
        let ClientError::Validation(violations) = err else {
            panic!("expected a local validation failure, got {err:?}");
        };
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["nickname", "real_name", "superpowers"]);
    }

    #[rstest]
    #[tokio::test]
    async fn blank_search_is_rejected_locally() {
        let err = unreachable_api()
            .search("   ")
            .await
            .expect_err("blank query");
        assert_eq!(err.to_string(), "Search query is required");
    }

    #[rstest]
    fn failure_uses_envelope_message_and_errors() {
        let body = br#"{"success":false,"code":"invalid_request","message":"Nickname is required","errors":[{"field":"nickname","message":"Nickname is required"}]}"#;
        let err = failure(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.to_string(), "Nickname is required");
        assert_eq!(err.status(), Some(400));
        assert!(err.violations().iter().any(|v| v.is_for("nickname")));
    }

    #[rstest]
    #[case(b"<html>bad gateway</html>".as_slice())]
    #[case(br#"{"success":false}"#.as_slice())]
    fn failure_falls_back_to_generic_message(#[case] body: &[u8]) {
        let err = failure(StatusCode::BAD_GATEWAY, body);
        assert_eq!(err.to_string(), "Request failed with status 502");
        assert!(err.violations().is_empty());
    }
}
