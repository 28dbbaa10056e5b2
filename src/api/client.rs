use crate::api::ApiError;
use crate::session::Credentials;
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Header carrying the session token, as the server expects it.
pub(super) const AUTH_HEADER: &str = "Authorization-Access";

/// Per-request timeout. The client builder carries a longer backstop; this is
/// the value a stalled call is actually held to.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Error payload the server attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
}

/// Typed client for the board server.
///
/// Owns the HTTP connection pool, the server base URL, and the session
/// credentials injected once at construction. Cloning is cheap (the reqwest
/// client is internally reference-counted) so background tasks can carry
/// their own copy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    credentials: Credentials,
}

impl ApiClient {
    pub fn new(base: Url, credentials: Credentials) -> Result<Self, reqwest::Error> {
        // Connection pooling and keepalive tuned for a chatty single-host client
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Email of the signed-in account, if any.
    pub fn account_email(&self) -> Option<&str> {
        self.credentials.email()
    }

    /// True when a session token is available for authorized calls.
    pub fn has_session(&self) -> bool {
        self.credentials.is_signed_in()
    }

    /// Web URL of a recipe's detail page, for open-in-browser.
    pub fn recipe_page_url(&self, recipe_id: i64) -> String {
        format!("{}board/{}", self.base, recipe_id)
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::Malformed(format!("bad endpoint path {:?}: {}", path, e)))
    }

    /// Attach the session auth header, or fail when signed out.
    pub(super) fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let token = self.credentials.token().ok_or(ApiError::NoSession)?;
        Ok(request.header(AUTH_HEADER, token.expose_secret()))
    }

    /// Email query value for calls keyed on the account, or fail when signed out.
    pub(super) fn email_param(&self) -> Result<&str, ApiError> {
        self.credentials.email().ok_or(ApiError::NoSession)
    }

    /// Send a request with the per-request timeout and map non-2xx responses
    /// into the error taxonomy.
    ///
    /// A response carrying the server's `{ "code": ... }` payload becomes
    /// `ApiError::Server`; any other non-2xx becomes `ApiError::Status`.
    pub(super) async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let response = tokio::time::timeout(REQUEST_TIMEOUT, request.send())
            .await
            .map_err(|_| ApiError::Timeout)?
            .map_err(ApiError::Network)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // The error body is best-effort: an unreadable or codeless payload
        // degrades to a bare status error.
        match response.json::<ErrorBody>().await {
            Ok(body) => {
                tracing::debug!(status = status.as_u16(), code = %body.code, "Server error payload");
                Err(ApiError::Server { code: body.code })
            }
            Err(_) => Err(ApiError::Status(status.as_u16())),
        }
    }

    /// Send and decode a JSON body into `T`, mapping decode failures to
    /// `Malformed`.
    pub(super) async fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))
    }

    pub(super) fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
