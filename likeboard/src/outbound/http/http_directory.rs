//! Reqwest-backed user directory adapter.
//!
//! This adapter owns transport details only: URL building, timeout and HTTP
//! error mapping, and JSON decoding into domain users and records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};

use super::dto::{ReactionDto, UserDto, into_user_list};
use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{Reaction, ReactionId, ReactionKind, ReactionPayload, UserList, UserName};

/// User directory adapter talking JSON over HTTP to one service.
pub struct HttpUserDirectory {
    client: Client,
    base: Url,
}

impl HttpUserDirectory {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, UserDirectoryError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                UserDirectoryError::transport(format!(
                    "service url {} cannot be used as a base",
                    self.base
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn collection_url(
        &self,
        user: &UserName,
        kind: ReactionKind,
    ) -> Result<Url, UserDirectoryError> {
        self.endpoint(&["users", user.as_str(), kind.collection()])
    }

    fn record_url(
        &self,
        user: &UserName,
        kind: ReactionKind,
        id: ReactionId,
    ) -> Result<Url, UserDirectoryError> {
        let segment = id.to_string();
        self.endpoint(&["users", user.as_str(), kind.collection(), segment.as_str()])
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, UserDirectoryError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    async fn add(
        &self,
        user: &UserName,
        kind: ReactionKind,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        let url = self.collection_url(user, kind)?;
        let body = self.send(self.client.post(url).json(payload)).await?;
        parse_reaction(&body)
    }

    async fn delete(
        &self,
        user: &UserName,
        kind: ReactionKind,
        id: ReactionId,
    ) -> Result<(), UserDirectoryError> {
        let url = self.record_url(user, kind, id)?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn put(
        &self,
        user: &UserName,
        kind: ReactionKind,
        id: ReactionId,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        let url = self.record_url(user, kind, id)?;
        let body = self.send(self.client.put(url).json(payload)).await?;
        parse_reaction(&body)
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn fetch_users(&self) -> Result<UserList, UserDirectoryError> {
        let url = self.endpoint(&["users"])?;
        let body = self.send(self.client.get(url)).await?;
        parse_users(&body)
    }

    async fn add_user_like(
        &self,
        user: &UserName,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        self.add(user, ReactionKind::Like, payload).await
    }

    async fn add_user_dislike(
        &self,
        user: &UserName,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        self.add(user, ReactionKind::Dislike, payload).await
    }

    async fn delete_user_like(
        &self,
        user: &UserName,
        id: ReactionId,
    ) -> Result<(), UserDirectoryError> {
        self.delete(user, ReactionKind::Like, id).await
    }

    async fn delete_user_dislike(
        &self,
        user: &UserName,
        id: ReactionId,
    ) -> Result<(), UserDirectoryError> {
        self.delete(user, ReactionKind::Dislike, id).await
    }

    async fn put_user_like(
        &self,
        user: &UserName,
        id: ReactionId,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        self.put(user, ReactionKind::Like, id, payload).await
    }

    async fn put_user_dislike(
        &self,
        user: &UserName,
        id: ReactionId,
        payload: &ReactionPayload,
    ) -> Result<Reaction, UserDirectoryError> {
        self.put(user, ReactionKind::Dislike, id, payload).await
    }
}

fn parse_users(body: &[u8]) -> Result<UserList, UserDirectoryError> {
    let decoded: Vec<UserDto> = serde_json::from_slice(body).map_err(|error| {
        UserDirectoryError::decode(format!("invalid user list JSON: {error}"))
    })?;
    into_user_list(decoded).map_err(UserDirectoryError::decode)
}

fn parse_reaction(body: &[u8]) -> Result<Reaction, UserDirectoryError> {
    let decoded: ReactionDto = serde_json::from_slice(body)
        .map_err(|error| UserDirectoryError::decode(format!("invalid record JSON: {error}")))?;
    Ok(decoded.into_domain())
}

fn map_transport_error(error: reqwest::Error) -> UserDirectoryError {
    UserDirectoryError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> UserDirectoryError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        body_preview
    };

    match status {
        StatusCode::NOT_FOUND => UserDirectoryError::not_found(message),
        _ => UserDirectoryError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn directory() -> HttpUserDirectory {
        let base = Url::parse("http://users.example.test/api/").expect("valid url");
        HttpUserDirectory::new(base, Duration::from_secs(5)).expect("client builds")
    }

    #[rstest]
    fn builds_collection_and_record_urls(directory: HttpUserDirectory) {
        let user = UserName::new("Mary Ann").expect("valid name");

        let collection = directory
            .collection_url(&user, ReactionKind::Like)
            .expect("collection url");
        let record = directory
            .record_url(&user, ReactionKind::Dislike, ReactionId::new(7))
            .expect("record url");

        assert_eq!(
            collection.as_str(),
            "http://users.example.test/api/users/Mary%20Ann/likes"
        );
        assert_eq!(
            record.as_str(),
            "http://users.example.test/api/users/Mary%20Ann/dislikes/7"
        );
    }

    #[rstest]
    fn users_endpoint_ignores_missing_trailing_slash() {
        let base = Url::parse("http://users.example.test/api").expect("valid url");
        let directory =
            HttpUserDirectory::new(base, Duration::from_secs(5)).expect("client builds");

        let url = directory.endpoint(&["users"]).expect("users url");
        assert_eq!(url.as_str(), "http://users.example.test/api/users");
    }

    #[test]
    fn parses_user_list_payload() {
        let body = r#"[
            {"user": "carol", "likes": [{"id": 7, "topic": "jazz"}, {"id": 8}]},
            {"user": "dave", "dislikes": [{"id": 1, "topic": "rugby"}]}
        ]"#;

        let users = parse_users(body.as_bytes()).expect("JSON should decode");

        let carol = users.find("carol").expect("carol decoded");
        assert_eq!(carol.likes().len(), 2);
        assert_eq!(carol.likes()[0].payload()["topic"], "jazz");
        assert!(users.find("dave").is_some_and(|u| u.likes().is_empty()));
    }

    #[rstest]
    #[case::invalid_name(r#"[{"user": "a/b"}]"#)]
    #[case::duplicate_user(r#"[{"user": "carol"}, {"user": "carol"}]"#)]
    #[case::missing_record_id(r#"[{"user": "carol", "likes": [{"topic": "jazz"}]}]"#)]
    #[case::not_a_list(r#"{"user": "carol"}"#)]
    fn rejects_invalid_user_lists(#[case] body: &str) {
        let error = parse_users(body.as_bytes()).expect_err("decode should fail");
        assert!(
            matches!(error, UserDirectoryError::Decode { .. }),
            "expected Decode, got {error:?}"
        );
    }

    #[test]
    fn parses_created_record() {
        let reaction = parse_reaction(br#"{"id": 12, "topic": "opera"}"#).expect("decode");
        assert_eq!(reaction.id(), ReactionId::new(12));
        assert_eq!(reaction.payload()["topic"], "opera");
    }

    #[rstest]
    #[case::not_found(StatusCode::NOT_FOUND, "NotFound")]
    #[case::bad_request(StatusCode::BAD_REQUEST, "Status")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, "Status")]
    fn maps_http_statuses_to_port_errors(#[case] status: StatusCode, #[case] expected: &str) {
        let error = map_status_error(status, b"{\"error\": \"unavailable\"}");
        match expected {
            "NotFound" => assert!(
                matches!(error, UserDirectoryError::NotFound { .. }),
                "404 should map to NotFound"
            ),
            "Status" => assert!(
                matches!(error, UserDirectoryError::Status { status: code, .. } if code == status.as_u16()),
                "other statuses should keep their code"
            ),
            _ => panic!("unsupported test expectation: {expected}"),
        }
    }

    #[test]
    fn empty_error_body_falls_back_to_reason_phrase() {
        let error = map_status_error(StatusCode::SERVICE_UNAVAILABLE, b"");
        assert_eq!(
            error,
            UserDirectoryError::status(503_u16, "Service Unavailable")
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(400);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }
}
