use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth_service::account::errors::AuthError;
use auth_service::account::errors::FacebookError;
use auth_service::account::errors::MailerError;
use auth_service::account::models::EmailAddress;
use auth_service::account::models::FacebookProfile;
use auth_service::account::models::User;
use auth_service::account::models::UserId;
use auth_service::account::ports::FacebookClient;
use auth_service::account::ports::PasswordResetMailer;
use auth_service::account::ports::UserRepository;
use auth_service::account::service::AuthService;
use auth_service::account::service::TokenSettings;
use auth_service::inbound::http::router::create_router;
use auth_service::inbound::http::AuthHandler;
use auth_service::inbound::http::JsonErrorTranslator;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Facebook access token accepted by the stub Graph client.
pub const FACEBOOK_TOKEN: &str = "fb-valid-token";

/// Test application that spawns a real server over in-memory adapters
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub users: Arc<InMemoryUserRepository>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let users = Arc::new(InMemoryUserRepository::default());
        let mailer = Arc::new(RecordingMailer::default());
        let facebook = Arc::new(StubFacebookClient::with_profile(
            FACEBOOK_TOKEN,
            FacebookProfile {
                id: "fb-1001".to_string(),
                email: Some("grace@example.com".to_string()),
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
            },
        ));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&mailer),
            facebook,
            JWT_SECRET,
            TokenSettings {
                access_expiration_hours: 24,
                reset_expiration_minutes: 30,
            },
        ));
        let router = create_router(AuthHandler::new(
            auth_service,
            Arc::new(JsonErrorTranslator),
        ));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            users,
            mailer,
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn find(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|user| predicate(user))
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists(user.email.to_string()));
        }
        if let Some(facebook_id) = user.facebook_id.as_deref() {
            if users
                .values()
                .any(|u| u.facebook_id.as_deref() == Some(facebook_id))
            {
                return Err(AuthError::FacebookAccountAlreadyLinked(
                    facebook_id.to_string(),
                ));
            }
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        Ok(self.find(|user| &user.email == email))
    }

    async fn find_by_facebook_id(&self, facebook_id: &str) -> Result<Option<User>, AuthError> {
        Ok(self.find(|user| user.facebook_id.as_deref() == Some(facebook_id)))
    }

    async fn update_password(&self, id: &UserId, password_hash: String) -> Result<(), AuthError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| AuthError::DatabaseError(format!("User {} not found", id)))?;
        user.password_hash = Some(password_hash);
        user.updated_at = chrono::Utc::now();
        Ok(())
    }
}

/// Keeps every reset link instead of delivering it
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingMailer {
    pub fn last_link_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, link)| link.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl PasswordResetMailer for RecordingMailer {
    async fn send_reset_link(&self, to: &EmailAddress, link: &str) -> Result<(), MailerError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.as_str().to_string(), link.to_string()));
        Ok(())
    }
}

pub struct StubFacebookClient {
    profiles: HashMap<String, FacebookProfile>,
}

impl StubFacebookClient {
    pub fn with_profile(access_token: &str, profile: FacebookProfile) -> Self {
        Self {
            profiles: HashMap::from([(access_token.to_string(), profile)]),
        }
    }
}

#[async_trait]
impl FacebookClient for StubFacebookClient {
    async fn fetch_profile(&self, access_token: &str) -> Result<FacebookProfile, FacebookError> {
        self.profiles
            .get(access_token)
            .cloned()
            .ok_or_else(|| FacebookError::InvalidToken("Invalid OAuth access token.".to_string()))
    }
}
