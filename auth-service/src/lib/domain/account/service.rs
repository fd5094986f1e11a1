use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessClaims;
use auth::PasswordHasher;
use auth::ResetClaims;
use auth::TokenSigner;
use reqwest::Url;

use crate::account::errors::AuthError;
use crate::account::errors::FacebookError;
use crate::account::models::EmailAddress;
use crate::account::models::Password;
use crate::account::models::RegisterForm;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::ports::AuthServicePort;
use crate::account::ports::FacebookClient;
use crate::account::ports::PasswordResetMailer;
use crate::account::ports::UserRepository;

const TOKEN_PLACEHOLDER: &str = "{token}";

/// Lifetimes of the tokens issued by [`AuthService`].
#[derive(Debug, Clone, Copy)]
pub struct TokenSettings {
    pub access_expiration_hours: i64,
    pub reset_expiration_minutes: i64,
}

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR, M, FB>
where
    UR: UserRepository,
    M: PasswordResetMailer,
    FB: FacebookClient,
{
    repository: Arc<UR>,
    mailer: Arc<M>,
    facebook: Arc<FB>,
    password_hasher: PasswordHasher,
    token_signer: TokenSigner,
    settings: TokenSettings,
}

impl<UR, M, FB> AuthService<UR, M, FB>
where
    UR: UserRepository,
    M: PasswordResetMailer,
    FB: FacebookClient,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `mailer` - Password reset link delivery
    /// * `facebook` - Facebook profile lookup
    /// * `jwt_secret` - Secret for access and reset tokens
    /// * `settings` - Token lifetimes
    pub fn new(
        repository: Arc<UR>,
        mailer: Arc<M>,
        facebook: Arc<FB>,
        jwt_secret: &[u8],
        settings: TokenSettings,
    ) -> Self {
        Self {
            repository,
            mailer,
            facebook,
            password_hasher: PasswordHasher::new(),
            token_signer: TokenSigner::new(jwt_secret),
            settings,
        }
    }

    fn issue_access_token(&self, user: &User) -> Result<String, AuthError> {
        let claims = AccessClaims::new(
            user.id,
            user.email.as_str(),
            self.settings.access_expiration_hours,
        );
        Ok(self.token_signer.sign(&claims)?)
    }

    fn password_fingerprint(&self, user: &User) -> String {
        self.password_hasher
            .fingerprint(user.password_hash.as_deref().unwrap_or_default())
    }

    /// Decode a reset token into the account id it was issued for.
    fn reset_subject(&self, token: &str) -> Result<(UserId, String), AuthError> {
        let claims: ResetClaims = self.token_signer.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Rejected password reset token");
            AuthError::InvalidResetToken
        })?;

        if !claims.is_password_reset() {
            return Err(AuthError::InvalidResetToken);
        }

        let user_id = UserId::from_string(&claims.sub).map_err(|_| AuthError::InvalidResetToken)?;
        Ok((user_id, claims.pwd))
    }
}

#[async_trait]
impl<UR, M, FB> AuthServicePort for AuthService<UR, M, FB>
where
    UR: UserRepository,
    M: PasswordResetMailer,
    FB: FacebookClient,
{
    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let email =
            EmailAddress::new(email.to_string()).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Facebook-only accounts have no password to check against
        let stored_hash = user
            .password_hash
            .as_deref()
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.password_hasher.verify(password, stored_hash)? {
            tracing::info!(user_id = %user.id, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        self.issue_access_token(&user)
    }

    async fn register(&self, form: RegisterForm) -> Result<String, AuthError> {
        let email = EmailAddress::new(form.email)?;
        let password = Password::new(form.password)?;
        let first_name = required("firstName", form.first_name)?;
        let last_name = required("lastName", form.last_name)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists(email.to_string()));
        }

        let password_hash = self.password_hasher.hash(password.as_str())?;
        let user = User::new(first_name, last_name, email, Some(password_hash), None);
        let user = self.repository.create(user).await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.issue_access_token(&user)
    }

    async fn send_password_reset_link(&self, email: &str, link: &str) -> Result<(), AuthError> {
        let email = EmailAddress::new(email.to_string())?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AuthError::EmailNotFound(email.to_string()))?;

        let claims = ResetClaims::new(
            user.id,
            self.password_fingerprint(&user),
            self.settings.reset_expiration_minutes,
        );
        let token = self.token_signer.sign(&claims)?;
        let reset_link = build_reset_link(link, &token)?;

        self.mailer.send_reset_link(&user.email, &reset_link).await?;

        tracing::info!(user_id = %user.id, "Password reset link sent");
        Ok(())
    }

    async fn reset_password(&self, token: &str, password: &str) -> Result<(), AuthError> {
        let (user_id, fingerprint) = self.reset_subject(token)?;
        let password = Password::new(password.to_string())?;

        let user = self
            .repository
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        // A changed password means this token was already used
        if self.password_fingerprint(&user) != fingerprint {
            return Err(AuthError::InvalidResetToken);
        }

        let password_hash = self.password_hasher.hash(password.as_str())?;
        self.repository
            .update_password(&user.id, password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "Password reset");
        Ok(())
    }

    async fn register_facebook(&self, access_token: &str) -> Result<String, AuthError> {
        let profile = self.facebook.fetch_profile(access_token).await?;

        if let Some(user) = self.repository.find_by_facebook_id(&profile.id).await? {
            tracing::debug!(user_id = %user.id, "Facebook account already linked");
            return self.issue_access_token(&user);
        }

        let email = profile.email.ok_or(FacebookError::MissingEmail)?;
        let email = EmailAddress::new(email)?;
        let first_name = required("firstName", profile.first_name)?;
        let last_name = required("lastName", profile.last_name)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists(email.to_string()));
        }

        let user = User::new(first_name, last_name, email, None, Some(profile.id.clone()));
        let user = match self.repository.create(user).await {
            Ok(user) => user,
            Err(
                conflict @ (AuthError::FacebookAccountAlreadyLinked(_)
                | AuthError::EmailAlreadyExists(_)),
            ) => {
                // A concurrent request may have linked the same profile first
                return match self.repository.find_by_facebook_id(&profile.id).await? {
                    Some(linked) => {
                        tracing::debug!(user_id = %linked.id, "Facebook account linked concurrently");
                        self.issue_access_token(&linked)
                    }
                    None => Err(conflict),
                };
            }
            Err(e) => return Err(e),
        };

        tracing::info!(user_id = %user.id, "User registered through Facebook");

        self.issue_access_token(&user)
    }
}

fn required(field: &'static str, value: String) -> Result<String, AuthError> {
    let value = value.trim();
    if value.is_empty() {
        Err(AuthError::InvalidName(field))
    } else {
        Ok(value.to_string())
    }
}

/// Embed `token` into a caller-supplied link template.
///
/// `{token}` is replaced wherever it appears. Without it the token goes into
/// the query string, which hash-routed pages never read, so templates with a
/// fragment must carry the placeholder.
fn build_reset_link(template: &str, token: &str) -> Result<String, AuthError> {
    if template.contains(TOKEN_PLACEHOLDER) {
        let link = template.replace(TOKEN_PLACEHOLDER, token);
        Url::parse(&link).map_err(|e| AuthError::InvalidLink(e.to_string()))?;
        return Ok(link);
    }

    let mut url = Url::parse(template).map_err(|e| AuthError::InvalidLink(e.to_string()))?;
    if url.fragment().is_some() {
        return Err(AuthError::InvalidLink(format!(
            "a link with a fragment needs a {} placeholder",
            TOKEN_PLACEHOLDER
        )));
    }
    url.query_pairs_mut().append_pair("token", token);
    Ok(url.to_string())
}
