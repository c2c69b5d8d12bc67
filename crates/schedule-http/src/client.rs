//! Authenticated API client with single refresh-and-retry.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use schedule_core::endpoints::{REFRESH, REGISTER, TOKEN};
use schedule_core::error::Error;
use schedule_core::traits::{Api, CredentialStore, NoopListener, SessionListener, Slot};
use schedule_core::{
    AccessToken, ApiUrl, CredentialPair, Credentials, RefreshToken, RequestDescriptor, Result,
    Role,
};

use crate::config::ClientConfig;
use crate::transport::{HttpTransport, RawResponse};

/// Request body for the token endpoint.
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access: String,
    refresh: String,
}

/// Request body for the refresh endpoint.
#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

/// Response from the refresh endpoint. The refresh token is not rotated.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// A client for the scheduling API that owns its credential pair.
///
/// Construct one per process and pass it to every call site. The client is
/// cheap to clone (it uses an internal `Arc`) and safe to share across
/// tasks: the credential pair sits behind an async `RwLock`, so a call never
/// observes a half-updated pair.
///
/// Every [`Api::call`] attaches the current access token. When the backend
/// answers 401 and a refresh token is held, the client refreshes once and
/// re-sends the request once. A failed refresh clears the credentials and
/// notifies the [`SessionListener`].
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use schedule_core::{Api, ApiUrl, Credentials, MemoryCredentialStore, Resource};
/// use schedule_http::{ApiClient, ClientConfig};
///
/// # async fn example() -> Result<(), schedule_core::Error> {
/// let config = ClientConfig::new(ApiUrl::new("https://schedule.example.edu/api")?);
/// let client = ApiClient::new(config, Arc::new(MemoryCredentialStore::new()))?;
/// client.login(Credentials::new("ivanov", "secret")).await?;
///
/// let rooms = client.list(Resource::Rooms).await?;
/// println!("{}", rooms);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: HttpTransport,
    store: Arc<dyn CredentialStore>,
    listener: Arc<dyn SessionListener>,
    tokens: RwLock<CredentialPair>,
}

impl ApiClient {
    /// Create a client, restoring any credentials held by `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the store
    /// cannot be read.
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        Self::with_listener(config, store, Arc::new(NoopListener))
    }

    /// Create a client that reports session expiry to `listener`.
    pub fn with_listener(
        config: ClientConfig,
        store: Arc<dyn CredentialStore>,
        listener: Arc<dyn SessionListener>,
    ) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        let tokens = store.load_pair()?;
        debug!(
            access = tokens.access.is_some(),
            refresh = tokens.refresh.is_some(),
            "Restored credentials"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                transport,
                store,
                listener,
                tokens: RwLock::new(tokens),
            }),
        })
    }

    /// Returns the API root this client talks to.
    pub fn base_url(&self) -> &ApiUrl {
        self.inner.transport.base()
    }

    /// Exchange username and password for a token pair and keep it.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection, a transport error, or a store error
    /// if the new tokens cannot be persisted.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: Credentials) -> Result<()> {
        info!("Logging in");

        let request = TokenRequest {
            username: credentials.username(),
            password: credentials.password(),
        };
        let body = self
            .inner
            .transport
            .post_json(TOKEN, &request)
            .await?
            .into_outcome()?;

        let response: TokenResponse =
            serde_json::from_value(body).map_err(|e| Error::Decode {
                message: e.to_string(),
            })?;

        let pair = CredentialPair::new(
            AccessToken::new(response.access),
            RefreshToken::new(response.refresh),
        );
        let mut tokens = self.inner.tokens.write().await;
        *tokens = pair;
        self.inner.store.save_pair(&tokens)?;
        // The role belongs to the previous user until detected again.
        self.inner.store.remove(Slot::UserRole)?;
        drop(tokens);

        debug!("Logged in successfully");
        Ok(())
    }

    /// Register a new account. No credentials are sent.
    ///
    /// Field-scoped validation errors are joined into one message.
    #[instrument(skip(self, body))]
    pub async fn register(&self, body: &Value) -> Result<Value> {
        info!("Registering account");
        self.inner
            .transport
            .post_json(REGISTER, body)
            .await?
            .into_validated_outcome()
    }

    /// Drop the credentials and the stored role.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        info!("Logging out");
        let mut tokens = self.inner.tokens.write().await;
        tokens.clear();
        self.inner.store.clear()
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// Returns `false` without any network call when no refresh token is
    /// held. On failure the held credentials are left untouched. The new
    /// access token is only kept if the refresh token it was obtained with
    /// is still held once the response arrives.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&self) -> bool {
        let Some(refresh) = self.inner.tokens.read().await.refresh.clone() else {
            debug!("No refresh token held");
            return false;
        };

        info!("Refreshing access token");

        let request = RefreshRequest {
            refresh: refresh.as_str(),
        };
        let body = match self.inner.transport.post_json(REFRESH, &request).await {
            Ok(response) if response.status.is_success() => response.body,
            Ok(response) => {
                warn!(status = %response.status, "Token refresh rejected");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                return false;
            }
        };

        let response: RefreshResponse = match serde_json::from_value(body) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Token refresh response has no access token");
                return false;
            }
        };

        let mut tokens = self.inner.tokens.write().await;
        if tokens.refresh.as_ref() != Some(&refresh) {
            debug!("Credentials changed during refresh, discarding new access token");
            return false;
        }
        tokens.access = Some(AccessToken::new(response.access));

        // Persisted under the lock so a concurrent logout cannot be undone.
        if let Err(e) = self.inner.store.save_pair(&tokens) {
            warn!(error = %e, "Failed to persist refreshed tokens");
        }

        debug!("Access token refreshed");
        true
    }

    /// Returns true if both credentials are held.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.tokens.read().await.is_complete()
    }

    /// Export the current access token.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It grants access to the account.
    pub async fn export_access_token(&self) -> Option<String> {
        let tokens = self.inner.tokens.read().await;
        tokens.access.as_ref().map(|t| t.as_str().to_string())
    }

    /// Export the current refresh token.
    ///
    /// # Security
    ///
    /// Handle the returned token securely. It can be used to obtain new access tokens.
    pub async fn export_refresh_token(&self) -> Option<String> {
        let tokens = self.inner.tokens.read().await;
        tokens.refresh.as_ref().map(|t| t.as_str().to_string())
    }

    /// Ask the backend for the current user's role and remember it.
    ///
    /// Any failure yields [`Role::Student`].
    #[instrument(skip(self))]
    pub async fn detect_role(&self) -> Role {
        let user = match self.current_user().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Could not detect role");
                return Role::Student;
            }
        };

        let Some(raw) = user.raw_role.as_deref() else {
            return Role::Student;
        };

        let role = Role::parse_lenient(raw);
        if let Err(e) = self.inner.store.set(Slot::UserRole, role.as_str()) {
            warn!(error = %e, "Failed to persist role");
        }
        role
    }

    /// The role remembered by the last [`ApiClient::detect_role`].
    pub fn stored_role(&self) -> Role {
        match self.inner.store.get(Slot::UserRole) {
            Ok(Some(raw)) => Role::parse_lenient(&raw),
            Ok(None) => Role::Student,
            Err(e) => {
                warn!(error = %e, "Failed to read stored role");
                Role::Student
            }
        }
    }

    /// Send with whatever access token is currently held.
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse> {
        let access = self.inner.tokens.read().await.access.clone();
        self.inner.transport.send(request, access.as_ref()).await
    }

    /// Clear every credential and tell the listener.
    async fn expire_session(&self) {
        warn!("Session expired");
        {
            let mut tokens = self.inner.tokens.write().await;
            tokens.clear();
            if let Err(e) = self.inner.store.clear() {
                warn!(error = %e, "Failed to clear credential store");
            }
        }
        self.inner.listener.session_expired();
    }
}

#[async_trait]
impl Api for ApiClient {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn call(&self, request: &RequestDescriptor) -> Result<Value> {
        let response = self.send(request).await?;
        if !response.is_unauthorized() {
            return response.into_outcome();
        }

        // Without a refresh token this fails before touching the network.
        if !self.refresh_access_token().await {
            self.expire_session().await;
            return Err(Error::SessionExpired);
        }

        // Exactly one retry; a second 401 is returned as-is.
        debug!("Retrying with refreshed access token");
        self.send(request).await?.into_outcome()
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", self.base_url())
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
