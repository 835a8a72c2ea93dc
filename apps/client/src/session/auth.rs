//! Auth session: bearer token persistence plus the current user.
//!
//! Lifecycle: created empty at startup, hydrated once from the store, cleared
//! on logout. Hydration is fail-closed: if the stored token cannot be turned
//! into a profile for any reason, the token is discarded.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api_client::{ApiClient, ApiError};
use crate::errors::AppError;
use crate::models::user::User;
use crate::session::store::{KeyValueStore, StoreError};

pub const TOKEN_KEY: &str = "token";

/// The slice of the remote API the session depends on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    fn set_token(&mut self, token: Option<String>);
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;
    async fn me(&self) -> Result<User, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;
}

#[async_trait]
impl AuthApi for ApiClient {
    fn set_token(&mut self, token: Option<String>) {
        ApiClient::set_token(self, token);
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        Ok(ApiClient::login(self, email, password).await?.access_token)
    }

    async fn me(&self) -> Result<User, ApiError> {
        ApiClient::me(self).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        ApiClient::logout(self).await
    }
}

pub struct AuthSession {
    store: Arc<dyn KeyValueStore>,
    token: Option<String>,
    user: Option<User>,
}

impl AuthSession {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            token: None,
            user: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[cfg(test)]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Restores the session from the stored token. Any profile-fetch failure
    /// discards the token and leaves the session unauthenticated.
    pub async fn hydrate<A: AuthApi + ?Sized>(&mut self, api: &mut A) -> Result<(), StoreError> {
        let Some(token) = self.store.get(TOKEN_KEY)? else {
            api.set_token(None);
            return Ok(());
        };

        api.set_token(Some(token.clone()));
        match api.me().await {
            Ok(user) => {
                info!("session restored for {}", user.email);
                self.token = Some(token);
                self.user = Some(user);
                Ok(())
            }
            Err(e) => {
                warn!("discarding stored token: profile fetch failed: {e}");
                self.clear(api)
            }
        }
    }

    /// Exchanges credentials for a token, persists it, then loads the profile.
    /// A token whose profile cannot be fetched is not kept.
    pub async fn login<A: AuthApi + ?Sized>(
        &mut self,
        api: &mut A,
        email: &str,
        password: &str,
    ) -> Result<&User, AppError> {
        let token = api.login(email, password).await?;
        api.set_token(Some(token.clone()));

        let user = match api.me().await {
            Ok(user) => user,
            Err(e) => {
                self.clear(api)?;
                return Err(e.into());
            }
        };

        self.store.set(TOKEN_KEY, &token)?;
        self.token = Some(token);
        info!("logged in as {}", user.email);
        Ok(self.user.insert(user))
    }

    /// Notifies the server (best effort), then forgets the token and user.
    pub async fn logout<A: AuthApi + ?Sized>(&mut self, api: &mut A) -> Result<(), StoreError> {
        if self.token.is_some() {
            if let Err(e) = api.logout().await {
                warn!("server logout failed, clearing local session anyway: {e}");
            }
        }
        self.clear(api)
    }

    /// Forgets the token and user without telling the server.
    pub fn clear<A: AuthApi + ?Sized>(&mut self, api: &mut A) -> Result<(), StoreError> {
        self.token = None;
        self.user = None;
        api.set_token(None);
        self.store.remove(TOKEN_KEY)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// In-memory stand-in for the remote auth endpoints.
    #[derive(Default)]
    pub struct FakeAuthApi {
        pub valid_token: Option<String>,
        pub password: String,
        pub current_token: Option<String>,
        pub fail_me_with_transport_error: bool,
        pub logout_calls: std::sync::atomic::AtomicUsize,
    }

    impl FakeAuthApi {
        pub fn accepting(token: &str, password: &str) -> Self {
            Self {
                valid_token: Some(token.to_string()),
                password: password.to_string(),
                ..Default::default()
            }
        }
    }

    pub fn user() -> User {
        User {
            id: 1,
            email: "asha@example.com".to_string(),
            name: "Asha".to_string(),
            city: None,
            profile_photo: None,
            cover_photo: None,
            lat: None,
            lon: None,
        }
    }

    #[async_trait]
    impl AuthApi for FakeAuthApi {
        fn set_token(&mut self, token: Option<String>) {
            self.current_token = token;
        }

        async fn login(&self, _email: &str, password: &str) -> Result<String, ApiError> {
            match &self.valid_token {
                Some(token) if password == self.password => Ok(token.clone()),
                _ => Err(ApiError {
                    message: "Incorrect email or password".to_string(),
                    status: Some(401),
                    payload: None,
                }),
            }
        }

        async fn me(&self) -> Result<User, ApiError> {
            if self.fail_me_with_transport_error {
                return Err(ApiError {
                    message: "request failed: connection refused".to_string(),
                    status: None,
                    payload: None,
                });
            }
            if self.current_token.is_some() && self.current_token == self.valid_token {
                Ok(user())
            } else {
                Err(ApiError {
                    message: "Could not validate credentials".to_string(),
                    status: Some(401),
                    payload: None,
                })
            }
        }

        async fn logout(&self) -> Result<(), ApiError> {
            self.logout_calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeAuthApi;
    use super::*;
    use crate::session::store::MemoryStore;

    fn store_with_token(token: Option<&str>) -> Arc<dyn KeyValueStore> {
        let store = MemoryStore::default();
        if let Some(token) = token {
            store.set(TOKEN_KEY, token).unwrap();
        }
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_hydrate_without_token_is_anonymous() {
        let mut api = FakeAuthApi::accepting("good", "pw");
        let mut session = AuthSession::new(store_with_token(None));
        session.hydrate(&mut api).await.unwrap();
        assert!(!session.is_authenticated());
        assert!(api.current_token.is_none());
    }

    #[tokio::test]
    async fn test_hydrate_restores_valid_token() {
        let store = store_with_token(Some("good"));
        let mut api = FakeAuthApi::accepting("good", "pw");
        let mut session = AuthSession::new(store.clone());
        session.hydrate(&mut api).await.unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().email, "asha@example.com");
        assert_eq!(api.current_token.as_deref(), Some("good"));
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn test_hydrate_discards_rejected_token() {
        let store = store_with_token(Some("expired"));
        let mut api = FakeAuthApi::accepting("good", "pw");
        let mut session = AuthSession::new(store.clone());
        session.hydrate(&mut api).await.unwrap();

        assert!(!session.is_authenticated());
        assert!(api.current_token.is_none());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_hydrate_fails_closed_on_transport_error() {
        let store = store_with_token(Some("good"));
        let mut api = FakeAuthApi::accepting("good", "pw");
        api.fail_me_with_transport_error = true;
        let mut session = AuthSession::new(store.clone());
        session.hydrate(&mut api).await.unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let store = store_with_token(None);
        let mut api = FakeAuthApi::accepting("fresh", "pw");
        let mut session = AuthSession::new(store.clone());

        let user = session.login(&mut api, "asha@example.com", "pw").await.unwrap();
        assert_eq!(user.name, "Asha");
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("fresh"));
        assert_eq!(session.token(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_login_wrong_password_stores_nothing() {
        let store = store_with_token(None);
        let mut api = FakeAuthApi::accepting("fresh", "pw");
        let mut session = AuthSession::new(store.clone());

        let err = session.login(&mut api, "asha@example.com", "nope").await.unwrap_err();
        assert!(matches!(err, AppError::Api(ref e) if e.status == Some(401)));
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_store_and_notifies_server() {
        let store = store_with_token(Some("good"));
        let mut api = FakeAuthApi::accepting("good", "pw");
        let mut session = AuthSession::new(store.clone());
        session.hydrate(&mut api).await.unwrap();

        session.logout(&mut api).await.unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(
            api.logout_calls.load(std::sync::atomic::Ordering::SeqCst),
            1
        );
    }
}
