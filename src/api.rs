use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{Config, PRIVACY_STATEMENT_PATH};
use crate::error::{ApiError, ValidationError};
use crate::session::{CredentialStorage, SessionStore};
use crate::types::{
    ChatRequest, ChatResponse, Credentials, DocumentQuery, DocumentUpload, Feedback,
    FeedbackList, FeedbackUpdate, HealthResponse, LogPage, LoginResponse, Message, MessagePage,
    NewFeedback, NewMessage, Outcome, PrivacyStatement, SearchResponse,
};

#[cfg(target_arch = "wasm32")]
mod http;
#[cfg(target_arch = "wasm32")]
pub use http::GlooTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Whether a request carries the session credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    None,
    /// Attach the credential when there is one.
    Optional,
    /// Refuse locally when there is no credential.
    Required,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// One request, one response. Implementations report a missing response as
/// `ApiError::Network` and hand every status code back unchanged.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

impl ErrorBody {
    /// The auth endpoints put their reason in `msg`; everything else uses `error`.
    fn detail(self, path: &str) -> Option<String> {
        if path.starts_with("/auth/") {
            self.msg.or(self.error)
        } else {
            self.error.or(self.msg)
        }
    }
}

pub struct ApiClient<T, S> {
    transport: T,
    session: SessionStore<S>,
    config: Config,
}

impl<T: Transport, S: CredentialStorage> ApiClient<T, S> {
    pub fn new(transport: T, session: SessionStore<S>, config: Config) -> Self {
        Self {
            transport,
            session,
            config,
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let credentials = credentials(username, password)?;
        let response: LoginResponse = self
            .call(Method::Post, "/auth/login", Some(to_body(&credentials)?), AuthRequirement::None)
            .await?;
        self.session.set(&response.access_token, Some(&credentials.username));
        log::info!("logged in as {}", credentials.username);
        Ok(())
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let credentials = credentials(username, password)?;
        let _: Value = self
            .call(Method::Post, "/auth/register", Some(to_body(&credentials)?), AuthRequirement::None)
            .await?;
        log::info!("registered {}", credentials.username);
        Ok(())
    }

    pub fn logout(&self) {
        self.session.clear();
        log::info!("logged out");
    }

    pub async fn list_messages(&self, page: u32) -> Result<MessagePage, ApiError> {
        let path = self.page_path("/messages", page);
        let mut listing: MessagePage = self
            .call(Method::Get, &path, None, AuthRequirement::Optional)
            .await?;
        listing.pagination = listing.pagination.normalized();
        Ok(listing)
    }

    pub async fn post_message(&self, message: &NewMessage) -> Result<Message, ApiError> {
        if message.content.trim().is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }
        self.call(Method::Post, "/messages", Some(to_body(message)?), AuthRequirement::Required)
            .await
    }

    pub async fn delete_message(&self, id: i64) -> Result<(), ApiError> {
        let _: Value = self
            .call(Method::Delete, &format!("/messages/{id}"), None, AuthRequirement::Required)
            .await?;
        Ok(())
    }

    pub async fn upload_document(&self, upload: &DocumentUpload) -> Result<(), ApiError> {
        if upload.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent.into());
        }
        let outcome: Outcome = self
            .call(
                Method::Post,
                "/api/upload-document",
                Some(to_body(upload)?),
                AuthRequirement::Optional,
            )
            .await?;
        accept(outcome.success, outcome.error)
    }

    pub async fn search_documents(&self, query: &DocumentQuery) -> Result<SearchResponse, ApiError> {
        if query.query.trim().is_empty() {
            return Err(ValidationError::EmptyQuery.into());
        }
        let response: SearchResponse = self
            .call(
                Method::Post,
                "/api/search-documents",
                Some(to_body(query)?),
                AuthRequirement::Optional,
            )
            .await?;
        accept(response.success, response.error.clone())?;
        Ok(response)
    }

    pub async fn delete_document(&self, id: i64) -> Result<(), ApiError> {
        let outcome: Outcome = self
            .call(
                Method::Delete,
                &format!("/api/documents/{id}"),
                None,
                AuthRequirement::Optional,
            )
            .await?;
        accept(outcome.success, outcome.error)
    }

    pub async fn chat_health(&self) -> Result<HealthResponse, ApiError> {
        self.call(Method::Get, "/ai-chat/health", None, AuthRequirement::Optional)
            .await
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.call(Method::Post, "/ai-chat/chat", Some(to_body(request)?), AuthRequirement::Optional)
            .await
    }

    pub async fn chat_logs(&self, page: u32) -> Result<LogPage, ApiError> {
        let path = self.page_path("/ai-chat/logs", page);
        let mut listing: LogPage = self
            .call(Method::Get, &path, None, AuthRequirement::Optional)
            .await?;
        listing.pagination = listing.pagination.normalized();
        Ok(listing)
    }

    pub async fn list_feedback(&self) -> Result<Vec<Feedback>, ApiError> {
        let list: FeedbackList = self
            .call(Method::Get, "/feedback", None, AuthRequirement::Required)
            .await?;
        Ok(list.feedback)
    }

    pub async fn submit_feedback(&self, feedback: &NewFeedback) -> Result<(), ApiError> {
        if feedback.prompt.trim().is_empty() || feedback.response.trim().is_empty() {
            return Err(ValidationError::IncompleteFeedback.into());
        }
        let _: Value = self
            .call(Method::Post, "/feedback", Some(to_body(feedback)?), AuthRequirement::Required)
            .await?;
        Ok(())
    }

    pub async fn set_feedback_active(&self, id: i64, is_active: bool) -> Result<(), ApiError> {
        let body = to_body(&FeedbackUpdate { is_active })?;
        let _: Value = self
            .call(Method::Put, &format!("/feedback/{id}"), Some(body), AuthRequirement::Required)
            .await?;
        Ok(())
    }

    pub async fn delete_feedback(&self, id: i64) -> Result<(), ApiError> {
        let _: Value = self
            .call(Method::Delete, &format!("/feedback/{id}"), None, AuthRequirement::Required)
            .await?;
        Ok(())
    }

    /// Static asset served by the web host itself, not the backend.
    pub async fn privacy_statement(&self) -> Result<PrivacyStatement, ApiError> {
        let request = ApiRequest {
            method: Method::Get,
            url: PRIVACY_STATEMENT_PATH.to_string(),
            body: None,
            authorization: None,
        };
        let response = self.transport.send(request).await?;
        decode(PRIVACY_STATEMENT_PATH, response)
    }

    fn page_path(&self, path: &str, page: u32) -> String {
        format!("{path}?page={}&per_page={}", page.max(1), self.config.page_size)
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        auth: AuthRequirement,
    ) -> Result<R, ApiError> {
        let authorization = match auth {
            AuthRequirement::None => None,
            AuthRequirement::Optional => self.session.bearer(),
            AuthRequirement::Required => {
                Some(self.session.bearer().ok_or(ValidationError::NotAuthenticated)?)
            }
        };
        let request = ApiRequest {
            method,
            url: self.config.endpoint(path),
            body,
            authorization,
        };

        log::debug!("{:?} {}", request.method, request.url);
        let response = self.transport.send(request).await.inspect_err(|error| {
            log::warn!("{method:?} {path}: no response: {error}");
        })?;
        decode(path, response)
    }
}

fn credentials(username: &str, password: &str) -> Result<Credentials, ValidationError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

fn to_body<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|error| ApiError::Decode(error.to_string()))
}

fn accept(success: bool, error: Option<String>) -> Result<(), ApiError> {
    if success {
        Ok(())
    } else {
        Err(ApiError::Rejected(
            error.unwrap_or_else(|| "Unknown error".to_string()),
        ))
    }
}

fn decode<R: DeserializeOwned>(path: &str, response: ApiResponse) -> Result<R, ApiError> {
    if !response.is_success() {
        let detail = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.detail(path));
        log::warn!("{path}: status {} ({detail:?})", response.status);
        return Err(ApiError::Backend {
            status: response.status,
            detail,
        });
    }

    let raw = if response.body.trim().is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(raw).map_err(|error| {
        log::warn!("{path}: failed to decode response: {error}");
        ApiError::Decode(error.to_string())
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::session::MemoryStorage;

    /// Replays canned responses and records every request it was given.
    #[derive(Default)]
    pub struct RecordingTransport {
        pub requests: RefCell<Vec<ApiRequest>>,
        responses: RefCell<VecDeque<Result<ApiResponse, ApiError>>>,
    }

    impl RecordingTransport {
        pub fn reply(self, status: u16, body: Value) -> Self {
            self.responses.borrow_mut().push_back(Ok(ApiResponse {
                status,
                body: body.to_string(),
            }));
            self
        }

        pub fn fail(self, message: &str) -> Self {
            self.responses
                .borrow_mut()
                .push_back(Err(ApiError::Network(message.to_string())));
            self
        }

        pub fn sent(&self) -> Vec<ApiRequest> {
            self.requests.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
            self.requests.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network("no canned response".to_string())))
        }
    }

    pub type TestClient = ApiClient<RecordingTransport, MemoryStorage>;

    pub fn client(transport: RecordingTransport) -> TestClient {
        let session = SessionStore::restore(MemoryStorage::default(), "token");
        ApiClient::new(transport, session, Config::default())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde_json::json;

    use super::testing::{client, RecordingTransport};
    use super::*;
    use crate::types::{ChatRole, ChatTurn};

    #[test]
    fn test_login_persists_and_attaches_credential() {
        let api = client(
            RecordingTransport::default()
                .reply(200, json!({"access_token": "tok-1"}))
                .reply(200, json!({"feedback": []})),
        );

        block_on(api.login(" alice ", "pw")).unwrap();
        assert!(api.is_authenticated());
        assert_eq!(api.session().username().as_deref(), Some("alice"));
        assert_eq!(api.session().storage().load("token").as_deref(), Some("tok-1"));

        block_on(api.list_feedback()).unwrap();
        let sent = api.transport().sent();
        assert_eq!(sent[0].url, "http://localhost:5000/auth/login");
        assert_eq!(sent[0].authorization, None);
        assert_eq!(sent[0].body, Some(json!({"username": "alice", "password": "pw"})));
        assert_eq!(sent[1].authorization.as_deref(), Some("Bearer tok-1"));
    }

    #[test]
    fn test_login_failure_surfaces_backend_msg() {
        let api = client(
            RecordingTransport::default().reply(401, json!({"msg": "Bad username or password"})),
        );
        let error = block_on(api.login("alice", "nope")).unwrap_err();
        assert_eq!(error.message_or("Login failed"), "Bad username or password");
        assert!(!api.is_authenticated());
    }

    #[test]
    fn test_auth_failure_prefers_msg_over_error() {
        let api = client(RecordingTransport::default().reply(
            400,
            json!({"error": "validation", "msg": "Username already exists"}),
        ));
        let error = block_on(api.register("alice", "pw")).unwrap_err();
        assert_eq!(error.message_or("Registration failed"), "Username already exists");
    }

    #[test]
    fn test_network_and_status_failures_are_distinct() {
        let api = client(
            RecordingTransport::default()
                .fail("Failed to fetch")
                .reply(500, json!({"error": "database is locked"})),
        );

        let network = block_on(api.chat_health()).unwrap_err();
        assert!(network.is_network());

        let backend = block_on(api.chat_health()).unwrap_err();
        assert_eq!(
            backend,
            ApiError::Backend {
                status: 500,
                detail: Some("database is locked".to_string())
            }
        );
        assert_ne!(network.reason(), backend.reason());
    }

    #[test]
    fn test_logout_stops_attaching_credential() {
        let api = client(
            RecordingTransport::default()
                .reply(200, json!({"access_token": "tok-1"}))
                .reply(200, json!({"messages": [], "pagination": {"page": 1, "per_page": 20, "total": 0, "pages": 0}})),
        );
        block_on(api.login("alice", "pw")).unwrap();
        api.logout();
        assert_eq!(api.session().storage().load("token"), None);

        block_on(api.list_messages(1)).unwrap();
        assert_eq!(api.transport().sent()[1].authorization, None);
    }

    #[test]
    fn test_required_auth_refuses_locally() {
        let api = client(RecordingTransport::default());
        let error = block_on(api.list_feedback()).unwrap_err();
        assert_eq!(error, ApiError::Validation(ValidationError::NotAuthenticated));
        assert!(api.transport().sent().is_empty());
    }

    #[test]
    fn test_empty_search_never_sends() {
        let api = client(RecordingTransport::default());
        let query = DocumentQuery {
            query: "   ".to_string(),
            include_private: true,
            top_k: 5,
        };
        let error = block_on(api.search_documents(&query)).unwrap_err();
        assert_eq!(error.to_string(), "Please enter a search query");
        assert!(api.transport().sent().is_empty());
    }

    #[test]
    fn test_rejected_outcome() {
        let api = client(
            RecordingTransport::default().reply(200, json!({"success": false, "error": "embedding failed"})),
        );
        let upload = DocumentUpload {
            content: "doc".to_string(),
            metadata: json!({}),
            is_private: false,
        };
        let error = block_on(api.upload_document(&upload)).unwrap_err();
        assert_eq!(error, ApiError::Rejected("embedding failed".to_string()));
    }

    #[test]
    fn test_paged_listing_query_and_normalization() {
        let api = client(RecordingTransport::default().reply(
            200,
            json!({
                "logs": [],
                "pagination": {"page": 1, "per_page": 20, "total": 0, "pages": 0, "has_next": true}
            }),
        ));
        let page = block_on(api.chat_logs(0)).unwrap();
        assert_eq!(
            api.transport().sent()[0].url,
            "http://localhost:5000/ai-chat/logs?page=1&per_page=20"
        );
        assert_eq!(page.pagination.pages, 0);
        assert!(!page.pagination.has_next);
        assert!(!page.pagination.has_prev);
    }

    #[test]
    fn test_chat_request_body() {
        let api = client(
            RecordingTransport::default().reply(200, json!({"response": "hi", "model": "llama3"})),
        );
        let request = ChatRequest {
            message: "again".to_string(),
            chat_history: vec![ChatTurn {
                role: ChatRole::User,
                content: "hello".to_string(),
            }],
        };
        let response = block_on(api.chat(&request)).unwrap();
        assert_eq!(response.model.as_deref(), Some("llama3"));
        assert_eq!(
            api.transport().sent()[0].body,
            Some(json!({"message": "again", "chat_history": [{"role": "user", "content": "hello"}]}))
        );
    }

    #[test]
    fn test_privacy_statement_is_same_origin() {
        let api = client(RecordingTransport::default().reply(200, json!({"content": "<p>x</p>"})));
        let statement = block_on(api.privacy_statement()).unwrap();
        assert_eq!(statement.content, "<p>x</p>");
        assert_eq!(api.transport().sent()[0].url, "/content/privacy_statement.json");
    }

    #[test]
    fn test_empty_body_decodes_as_unit() {
        let api = client(
            RecordingTransport::default()
                .reply(200, json!({"access_token": "t"}))
                .reply(204, Value::Null),
        );
        block_on(api.login("bob", "pw")).unwrap();
        block_on(api.delete_message(3)).unwrap();
        let sent = api.transport().sent();
        assert_eq!(sent[1].method, Method::Delete);
        assert_eq!(sent[1].url, "http://localhost:5000/messages/3");
    }
}
