//! HTTP transport for the ticket REST API.
//!
//! One client, one request path: every page used to carry its own copy of
//! the fetch helper; this module is the single source of truth. URLs are
//! resolved against the configured origin and never downgraded to an
//! insecure scheme when the origin is secure.

use async_trait::async_trait;
use reqwest::header;
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{FrontdeskError, Result};
use crate::types::{
    AssignRequest, AssignableUser, Ticket, TicketDraft, TicketId, TicketUpdate, UserId,
};

pub const TICKETS_PATH: &str = "/api/tickets";
pub const ADMIN_TICKETS_PATH: &str = "/api/tickets/admin/all";
pub const ADMIN_USERS_PATH: &str = "/api/tickets/admin/users";

/// The REST surface the rest of the crate talks to.
///
/// Stores, modals, and page controllers depend on this trait rather than on
/// `ApiClient` so tests can substitute a scripted implementation.
#[async_trait]
pub trait TicketApi: Send + Sync {
    /// `GET /api/tickets` — the current user's visible tickets.
    async fn list_tickets(&self) -> Result<Vec<Ticket>>;

    /// `GET /api/tickets/admin/all` — every ticket (admin only).
    async fn list_all_tickets(&self) -> Result<Vec<Ticket>>;

    /// `GET /api/tickets/admin/users` — users tickets can be assigned to.
    async fn list_assignable_users(&self) -> Result<Vec<AssignableUser>>;

    /// `POST /api/tickets` — returns the created ticket.
    async fn create_ticket(&self, draft: &TicketDraft) -> Result<Ticket>;

    /// `PUT /api/tickets/{id}` — returns the updated ticket.
    async fn update_ticket(&self, id: TicketId, update: &TicketUpdate) -> Result<Ticket>;

    /// `PUT /api/tickets/admin/assign/{id}` — returns the updated ticket.
    async fn assign_ticket(&self, id: TicketId, assigned_to: Option<UserId>) -> Result<Ticket>;

    /// `DELETE /api/tickets/{id}` — success body, if any, is discarded.
    async fn delete_ticket(&self, id: TicketId) -> Result<()>;
}

/// Reqwest-backed API client.
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for the given origin.
    ///
    /// Configures the HTTP client with a 30s connect timeout and 60s total
    /// timeout by default (see `ClientConfig`).
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        if base.cannot_be_a_base() {
            return Err(FrontdeskError::Config(format!(
                "base URL '{}' cannot serve as an origin",
                config.base_url
            )));
        }
        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| FrontdeskError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolve a request target against the configured origin.
    ///
    /// Path-only targets inherit the origin's scheme and authority. Absolute
    /// `http://` targets are upgraded to `https://` whenever the origin is
    /// secure; a secure page never issues an insecure call.
    pub fn resolve(&self, target: &str) -> Result<Url> {
        let mut url = if target.starts_with("http://") || target.starts_with("https://") {
            Url::parse(target)?
        } else {
            self.base.join(target)?
        };
        if self.base.scheme() == "https" && url.scheme() == "http" {
            url.set_scheme("https")
                .map_err(|_| FrontdeskError::Config(format!("cannot secure URL '{url}'")))?;
        }
        Ok(url)
    }

    /// Issue a request and return the raw success body.
    ///
    /// Error mapping follows the page contract: unreachable server →
    /// `Network`; status ≥ 400 → `Http` with the server's JSON `error` field
    /// verbatim when present, `"HTTP {status}"` otherwise, and the fixed
    /// markers `"Non-JSON response"` / `"Invalid JSON response"` when the
    /// error body is not usable JSON.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(StatusCode, bool, String)> {
        let url = self.resolve(path)?;
        let mut request = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FrontdeskError::Network(e.to_string()))?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("application/json"))
            .unwrap_or(false);
        let text = response
            .text()
            .await
            .map_err(|e| FrontdeskError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = if is_json {
                match serde_json::from_str::<Value>(&text) {
                    Ok(payload) => payload
                        .get("error")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
                    Err(_) => "Invalid JSON response".to_string(),
                }
            } else {
                "Non-JSON response".to_string()
            };
            return Err(FrontdeskError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok((status, is_json, text))
    }

    /// Issue a request and decode the JSON success body into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let (_, is_json, text) = self.execute(method, path, body).await?;
        if !is_json {
            return Err(FrontdeskError::Decode("Non-JSON response".to_string()));
        }
        let payload: Value = serde_json::from_str(&text)
            .map_err(|_| FrontdeskError::Decode("Invalid JSON response".to_string()))?;
        serde_json::from_value(payload).map_err(|e| FrontdeskError::Decode(e.to_string()))
    }

    /// Issue a request, discarding whatever success body the server sends.
    pub async fn request_discard(&self, method: Method, path: &str) -> Result<()> {
        self.execute(method, path, None).await.map(|_| ())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        self.request(Method::POST, path, Some(encode(body)?)).await
    }

    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        self.request(Method::PUT, path, Some(encode(body)?)).await
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.request_discard(Method::DELETE, path).await
    }
}

fn encode(body: &impl Serialize) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| FrontdeskError::Decode(format!("failed to encode request body: {e}")))
}

#[async_trait]
impl TicketApi for ApiClient {
    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        self.get(TICKETS_PATH).await
    }

    async fn list_all_tickets(&self) -> Result<Vec<Ticket>> {
        self.get(ADMIN_TICKETS_PATH).await
    }

    async fn list_assignable_users(&self) -> Result<Vec<AssignableUser>> {
        self.get(ADMIN_USERS_PATH).await
    }

    async fn create_ticket(&self, draft: &TicketDraft) -> Result<Ticket> {
        self.post(TICKETS_PATH, draft).await
    }

    async fn update_ticket(&self, id: TicketId, update: &TicketUpdate) -> Result<Ticket> {
        self.put(&format!("{TICKETS_PATH}/{id}"), update).await
    }

    async fn assign_ticket(&self, id: TicketId, assigned_to: Option<UserId>) -> Result<Ticket> {
        self.put(
            &format!("{TICKETS_PATH}/admin/assign/{id}"),
            &AssignRequest { assigned_to },
        )
        .await
    }

    async fn delete_ticket(&self, id: TicketId) -> Result<()> {
        self.delete(&format!("{TICKETS_PATH}/{id}")).await
    }
}
