//! Unit tests for the account crate
//!
//! Use cases run against in-memory implementations of the repository,
//! mailer, and object-store ports.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::application::{
    AccountConfig, AuthenticateUseCase, CompleteResetInput, CompleteResetUseCase, LoginInput,
    LoginUseCase, LogoutUseCase, RegisterInput, RegisterOutput, RegisterUseCase,
    RequestResetUseCase, ResetStatus, SendVerificationUseCase, UploadProfileImageUseCase,
    VerifyEmailUseCase, VerifyLinkInput, VerifyOutcome,
};
use crate::domain::entity::{access_token::AccessToken, reset_token::ResetToken, user::User};
use crate::domain::mailer::Mailer;
use crate::domain::object_store::ObjectStore;
use crate::domain::repository::{AccessTokenRepository, ResetTokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AccountError, AccountResult};

// ============================================================================
// In-memory ports
// ============================================================================

#[derive(Clone, Default)]
struct MemStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
    tokens: Arc<Mutex<HashMap<Uuid, AccessToken>>>,
    resets: Arc<Mutex<HashMap<String, ResetToken>>>,
}

impl MemStore {
    fn user(&self, user_id: &UserId) -> User {
        self.users
            .lock()
            .unwrap()
            .get(user_id.as_uuid())
            .cloned()
            .expect("user exists")
    }

    fn backdate_reset_token(&self, email: &str, minutes: i64) {
        let mut resets = self.resets.lock().unwrap();
        let token = resets.get_mut(email).expect("reset token exists");
        token.created_at = token.created_at - chrono::Duration::minutes(minutes);
    }

    fn change_email(&self, user_id: &UserId, new_email: &str) {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(user_id.as_uuid()).expect("user exists");
        user.email = Email::new(new_email).unwrap();
    }
}

impl UserRepository for MemStore {
    async fn create(&self, user: &User) -> AccountResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AccountError::validation(
                "email",
                "The email has already been taken.",
            ));
        }
        users.insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(user_id.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AccountResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AccountResult<()> {
        self.users
            .lock()
            .unwrap()
            .insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }
}

impl AccessTokenRepository for MemStore {
    async fn create(&self, token: &AccessToken) -> AccountResult<()> {
        self.tokens
            .lock()
            .unwrap()
            .insert(token.token_id, token.clone());
        Ok(())
    }

    async fn find_by_id(&self, token_id: Uuid) -> AccountResult<Option<AccessToken>> {
        Ok(self.tokens.lock().unwrap().get(&token_id).cloned())
    }

    async fn update(&self, token: &AccessToken) -> AccountResult<()> {
        // Like SQL UPDATE, a revoked record is not resurrected
        if let Some(existing) = self.tokens.lock().unwrap().get_mut(&token.token_id) {
            *existing = token.clone();
        }
        Ok(())
    }

    async fn delete(&self, token_id: Uuid) -> AccountResult<()> {
        self.tokens.lock().unwrap().remove(&token_id);
        Ok(())
    }
}

impl ResetTokenRepository for MemStore {
    async fn upsert(&self, token: &ResetToken) -> AccountResult<()> {
        self.resets
            .lock()
            .unwrap()
            .insert(token.email.as_str().to_string(), token.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<ResetToken>> {
        Ok(self.resets.lock().unwrap().get(email.as_str()).cloned())
    }

    async fn delete_for_email(&self, email: &Email) -> AccountResult<()> {
        self.resets.lock().unwrap().remove(email.as_str());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct MemMailer {
    /// (to, verify_url)
    verifications: Arc<Mutex<Vec<(String, String)>>>,
    /// (to, cleartext token)
    resets: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemMailer {
    fn last_verify_url(&self) -> String {
        self.verifications
            .lock()
            .unwrap()
            .last()
            .expect("a verification mail was sent")
            .1
            .clone()
    }

    fn last_reset_token(&self) -> String {
        self.resets
            .lock()
            .unwrap()
            .last()
            .expect("a reset mail was sent")
            .1
            .clone()
    }

    fn reset_count(&self) -> usize {
        self.resets.lock().unwrap().len()
    }
}

impl Mailer for MemMailer {
    async fn send_verification(
        &self,
        to: &Email,
        _name: &str,
        verify_url: &str,
    ) -> AccountResult<()> {
        self.verifications
            .lock()
            .unwrap()
            .push((to.as_str().to_string(), verify_url.to_string()));
        Ok(())
    }

    async fn send_password_reset(&self, to: &Email, _name: &str, token: &str) -> AccountResult<()> {
        self.resets
            .lock()
            .unwrap()
            .push((to.as_str().to_string(), token.to_string()));
        Ok(())
    }
}

#[derive(Clone, Default)]
struct MemObjectStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl ObjectStore for MemObjectStore {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> AccountResult<()> {
        self.objects.lock().unwrap().insert(path.to_string(), bytes);
        Ok(())
    }

    async fn delete(&self, path: &str) -> AccountResult<()> {
        self.objects.lock().unwrap().remove(path);
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

struct Harness {
    store: MemStore,
    mailer: MemMailer,
    objects: MemObjectStore,
    config: Arc<AccountConfig>,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: MemStore::default(),
            mailer: MemMailer::default(),
            objects: MemObjectStore::default(),
            config: Arc::new(AccountConfig::with_random_key()),
        }
    }

    fn register_use_case(&self) -> RegisterUseCase<MemStore, MemStore, MemMailer> {
        RegisterUseCase::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.mailer.clone()),
            self.config.clone(),
        )
    }

    fn login_use_case(&self) -> LoginUseCase<MemStore, MemStore> {
        LoginUseCase::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            self.config.clone(),
        )
    }

    fn authenticate_use_case(&self) -> AuthenticateUseCase<MemStore, MemStore> {
        AuthenticateUseCase::new(Arc::new(self.store.clone()), Arc::new(self.store.clone()))
    }

    fn verify_use_case(&self) -> VerifyEmailUseCase<MemStore> {
        VerifyEmailUseCase::new(Arc::new(self.store.clone()), self.config.clone())
    }

    fn request_reset_use_case(&self) -> RequestResetUseCase<MemStore, MemStore, MemMailer> {
        RequestResetUseCase::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.mailer.clone()),
        )
    }

    fn complete_reset_use_case(&self) -> CompleteResetUseCase<MemStore, MemStore> {
        CompleteResetUseCase::new(
            Arc::new(self.store.clone()),
            Arc::new(self.store.clone()),
            self.config.clone(),
        )
    }

    async fn register(&self, email: &str) -> RegisterOutput {
        self.register_use_case()
            .execute(register_input(email))
            .await
            .expect("registration succeeds")
    }
}

fn register_input(email: &str) -> RegisterInput {
    RegisterInput {
        name: "Test User".to_string(),
        email: email.to_string(),
        contact_number: Some("07911123456".to_string()),
        password: "correct horse battery".to_string(),
        password_confirmation: "correct horse battery".to_string(),
    }
}

/// Decode a mailed verification URL back into link parts
fn parse_verify_url(url: &str) -> VerifyLinkInput {
    let (path, query) = url.split_once('?').expect("link has a query");

    let mut segments = path.rsplitn(3, '/');
    let hash = segments.next().unwrap().to_string();
    let user_id: Uuid = segments.next().unwrap().parse().expect("uuid segment");

    let mut expires = 0;
    let mut signature = String::new();
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap();
        match key {
            "expires" => expires = value.parse().unwrap(),
            "signature" => signature = value.to_string(),
            _ => {}
        }
    }

    VerifyLinkInput {
        user_id,
        hash,
        expires,
        signature,
    }
}

fn assert_unauthenticated(result: AccountResult<crate::application::Authenticated>) {
    match result {
        Err(AccountError::Unauthenticated) => {}
        other => panic!("expected Unauthenticated, got {:?}", other.map(|a| a.user)),
    }
}

// ============================================================================
// Registration & tokens
// ============================================================================

#[tokio::test]
async fn register_token_authenticates_the_new_user() {
    let h = Harness::new();
    let output = h.register("user@example.com").await;

    let auth = h
        .authenticate_use_case()
        .execute(&output.access_token)
        .await
        .expect("token authenticates");

    assert_eq!(auth.user.user_id, output.user.user_id);
}

#[tokio::test]
async fn register_token_authenticates_only_its_owner() {
    let h = Harness::new();
    let alice = h.register("alice@example.com").await;
    let bob = h.register("bob@example.com").await;

    let auth = h
        .authenticate_use_case()
        .execute(&alice.access_token)
        .await
        .unwrap();

    assert_eq!(auth.user.user_id, alice.user.user_id);
    assert_ne!(auth.user.user_id, bob.user.user_id);
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let h = Harness::new();
    h.register("user@example.com").await;

    let err = h
        .register_use_case()
        .execute(register_input("user@example.com"))
        .await
        .unwrap_err();

    match err {
        AccountError::Validation { field, .. } => assert_eq!(field, "email"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn register_field_validation() {
    let h = Harness::new();

    // Bad UK-shaped phone number
    let mut input = register_input("a@example.com");
    input.contact_number = Some("0791112345".to_string());
    let err = h.register_use_case().execute(input).await.unwrap_err();
    assert!(matches!(
        err,
        AccountError::Validation {
            field: "contact_number",
            ..
        }
    ));

    // Missing phone number
    let mut input = register_input("a@example.com");
    input.contact_number = None;
    let err = h.register_use_case().execute(input).await.unwrap_err();
    assert!(matches!(
        err,
        AccountError::Validation {
            field: "contact_number",
            ..
        }
    ));

    // Mismatched confirmation
    let mut input = register_input("a@example.com");
    input.password_confirmation = "something else entirely".to_string();
    let err = h.register_use_case().execute(input).await.unwrap_err();
    assert!(matches!(
        err,
        AccountError::Validation {
            field: "password",
            ..
        }
    ));

    // Short password
    let mut input = register_input("a@example.com");
    input.password = "short".to_string();
    input.password_confirmation = "short".to_string();
    let err = h.register_use_case().execute(input).await.unwrap_err();
    assert!(matches!(
        err,
        AccountError::Validation {
            field: "password",
            ..
        }
    ));

    // Nothing was persisted along the way
    assert!(h.store.users.lock().unwrap().is_empty());
}

#[tokio::test]
async fn authenticate_never_resolves_foreign_strings() {
    let h = Harness::new();
    let output = h.register("user@example.com").await;

    let use_case = h.authenticate_use_case();

    assert_unauthenticated(use_case.execute("").await);
    assert_unauthenticated(use_case.execute("garbage").await);
    assert_unauthenticated(use_case.execute("no|uuid-here").await);

    // Well-formed but unknown token id
    let unknown = format!("{}|{}", Uuid::new_v4(), platform::crypto::random_secret(32));
    assert_unauthenticated(use_case.execute(&unknown).await);

    // Right id, wrong secret
    let (token_id, _) =
        crate::domain::entity::access_token::split_cleartext(&output.access_token).unwrap();
    let wrong_secret = format!("{}|{}", token_id, platform::crypto::random_secret(32));
    assert_unauthenticated(use_case.execute(&wrong_secret).await);

    // Random strings, no separator at all
    for _ in 0..16 {
        let random = platform::crypto::random_secret(32);
        assert_unauthenticated(use_case.execute(&random).await);
    }
}

#[tokio::test]
async fn logout_revokes_exactly_the_presented_token() {
    let h = Harness::new();
    let registered = h.register("user@example.com").await;

    // A second, concurrent session
    let second = h
        .login_use_case()
        .execute(LoginInput {
            email: "user@example.com".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap();

    let (first_id, _) =
        crate::domain::entity::access_token::split_cleartext(&registered.access_token).unwrap();

    LogoutUseCase::new(Arc::new(h.store.clone()))
        .execute(first_id)
        .await
        .unwrap();

    // Revoked token is dead, the other session still works
    assert_unauthenticated(h.authenticate_use_case().execute(&registered.access_token).await);
    assert!(
        h.authenticate_use_case()
            .execute(&second.access_token)
            .await
            .is_ok()
    );

    // Revoking again is a no-op
    assert!(
        LogoutUseCase::new(Arc::new(h.store.clone()))
            .execute(first_id)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn login_failures_are_uniform() {
    let h = Harness::new();
    h.register("user@example.com").await;

    let wrong_password = h
        .login_use_case()
        .execute(LoginInput {
            email: "user@example.com".to_string(),
            password: "not the password".to_string(),
        })
        .await
        .unwrap_err();

    let unknown_email = h
        .login_use_case()
        .execute(LoginInput {
            email: "nobody@example.com".to_string(),
            password: "not the password".to_string(),
        })
        .await
        .unwrap_err();

    // Same field, same message: the response cannot distinguish the cases
    assert_eq!(format!("{}", wrong_password), format!("{}", unknown_email));
}

// ============================================================================
// Email verification
// ============================================================================

#[tokio::test]
async fn verification_link_verifies_once() {
    let h = Harness::new();
    let output = h.register("user@example.com").await;

    let link = parse_verify_url(&h.mailer.last_verify_url());

    let outcome = h.verify_use_case().execute(link).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Verified);

    let user = h.store.user(&output.user.user_id);
    assert!(user.has_verified_email());
    let verified_at = user.email_verified_at;

    // Second visit: terminal no-op, timestamp untouched
    let link = parse_verify_url(&h.mailer.last_verify_url());
    let outcome = h.verify_use_case().execute(link).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::AlreadyVerified);
    assert_eq!(h.store.user(&output.user.user_id).email_verified_at, verified_at);
}

#[tokio::test]
async fn verification_link_breaks_when_email_changes() {
    let h = Harness::new();
    let output = h.register("user@example.com").await;
    let link = parse_verify_url(&h.mailer.last_verify_url());

    h.store.change_email(&output.user.user_id, "changed@example.com");

    let outcome = h.verify_use_case().execute(link).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Mismatch);
    assert!(!h.store.user(&output.user.user_id).has_verified_email());
}

#[tokio::test]
async fn verification_unknown_user_and_tampered_signature() {
    let h = Harness::new();
    h.register("user@example.com").await;
    let link = parse_verify_url(&h.mailer.last_verify_url());

    let unknown = VerifyLinkInput {
        user_id: Uuid::new_v4(),
        ..link
    };
    let outcome = h.verify_use_case().execute(unknown).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::UserNotFound);

    let mut tampered = parse_verify_url(&h.mailer.last_verify_url());
    tampered.signature = "0".repeat(tampered.signature.len());
    let outcome = h.verify_use_case().execute(tampered).await.unwrap();
    assert_eq!(outcome, VerifyOutcome::Mismatch);
}

#[tokio::test]
async fn resend_verification_after_verified_is_rejected() {
    let h = Harness::new();
    let output = h.register("user@example.com").await;

    let link = parse_verify_url(&h.mailer.last_verify_url());
    h.verify_use_case().execute(link).await.unwrap();

    let send = SendVerificationUseCase::new(Arc::new(h.mailer.clone()), h.config.clone());
    let err = send
        .execute(&h.store.user(&output.user.user_id))
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::AlreadyVerified));
}

// ============================================================================
// Password reset
// ============================================================================

#[tokio::test]
async fn request_reset_is_uniform_for_unknown_email() {
    let h = Harness::new();
    h.register("user@example.com").await;

    // Both calls succeed identically from the caller's point of view
    h.request_reset_use_case()
        .execute("user@example.com".to_string())
        .await
        .unwrap();
    h.request_reset_use_case()
        .execute("nobody@example.com".to_string())
        .await
        .unwrap();

    // Only the registered address got mail
    assert_eq!(h.mailer.reset_count(), 1);
}

#[tokio::test]
async fn reset_happy_path_rotates_credentials() {
    let h = Harness::new();
    let output = h.register("user@example.com").await;
    let remember_before = h.store.user(&output.user.user_id).remember_token.clone();

    h.request_reset_use_case()
        .execute("user@example.com".to_string())
        .await
        .unwrap();
    let token = h.mailer.last_reset_token();

    let status = h
        .complete_reset_use_case()
        .execute(CompleteResetInput {
            email: "user@example.com".to_string(),
            token: token.clone(),
            password: "a brand new password".to_string(),
            password_confirmation: "a brand new password".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(status, ResetStatus::Success);

    // Old password is dead, new one works
    assert!(
        h.login_use_case()
            .execute(LoginInput {
                email: "user@example.com".to_string(),
                password: "correct horse battery".to_string(),
            })
            .await
            .is_err()
    );
    assert!(
        h.login_use_case()
            .execute(LoginInput {
                email: "user@example.com".to_string(),
                password: "a brand new password".to_string(),
            })
            .await
            .is_ok()
    );

    // Long-lived session marker was rotated
    assert_ne!(
        h.store.user(&output.user.user_id).remember_token,
        remember_before
    );
}

#[tokio::test]
async fn reset_token_is_single_use() {
    let h = Harness::new();
    h.register("user@example.com").await;

    h.request_reset_use_case()
        .execute("user@example.com".to_string())
        .await
        .unwrap();
    let token = h.mailer.last_reset_token();

    let input = |password: &str| CompleteResetInput {
        email: "user@example.com".to_string(),
        token: token.clone(),
        password: password.to_string(),
        password_confirmation: password.to_string(),
    };

    let status = h
        .complete_reset_use_case()
        .execute(input("a brand new password"))
        .await
        .unwrap();
    assert_eq!(status, ResetStatus::Success);

    // Replay after success
    let status = h
        .complete_reset_use_case()
        .execute(input("yet another password"))
        .await
        .unwrap();
    assert_eq!(status, ResetStatus::InvalidToken);
}

#[tokio::test]
async fn reset_token_expires_at_sixty_minutes() {
    let h = Harness::new();
    h.register("user@example.com").await;

    h.request_reset_use_case()
        .execute("user@example.com".to_string())
        .await
        .unwrap();
    let token = h.mailer.last_reset_token();

    h.store.backdate_reset_token("user@example.com", 60);

    let status = h
        .complete_reset_use_case()
        .execute(CompleteResetInput {
            email: "user@example.com".to_string(),
            token,
            password: "a brand new password".to_string(),
            password_confirmation: "a brand new password".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(status, ResetStatus::InvalidToken);
}

#[tokio::test]
async fn reset_token_valid_before_sixty_minutes() {
    let h = Harness::new();
    h.register("user@example.com").await;

    h.request_reset_use_case()
        .execute("user@example.com".to_string())
        .await
        .unwrap();
    let token = h.mailer.last_reset_token();

    h.store.backdate_reset_token("user@example.com", 59);

    let status = h
        .complete_reset_use_case()
        .execute(CompleteResetInput {
            email: "user@example.com".to_string(),
            token,
            password: "a brand new password".to_string(),
            password_confirmation: "a brand new password".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(status, ResetStatus::Success);
}

#[tokio::test]
async fn reset_latest_request_supersedes() {
    let h = Harness::new();
    h.register("user@example.com").await;

    h.request_reset_use_case()
        .execute("user@example.com".to_string())
        .await
        .unwrap();
    let first = h.mailer.last_reset_token();

    h.request_reset_use_case()
        .execute("user@example.com".to_string())
        .await
        .unwrap();
    let second = h.mailer.last_reset_token();

    let input = |token: &str| CompleteResetInput {
        email: "user@example.com".to_string(),
        token: token.to_string(),
        password: "a brand new password".to_string(),
        password_confirmation: "a brand new password".to_string(),
    };

    let status = h.complete_reset_use_case().execute(input(&first)).await.unwrap();
    assert_eq!(status, ResetStatus::InvalidToken);

    let status = h.complete_reset_use_case().execute(input(&second)).await.unwrap();
    assert_eq!(status, ResetStatus::Success);
}

#[tokio::test]
async fn reset_unknown_user() {
    let h = Harness::new();

    let status = h
        .complete_reset_use_case()
        .execute(CompleteResetInput {
            email: "nobody@example.com".to_string(),
            token: "whatever".to_string(),
            password: "a brand new password".to_string(),
            password_confirmation: "a brand new password".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(status, ResetStatus::InvalidUser);
}

// ============================================================================
// Profile image
// ============================================================================

fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([180, 40, 40]));
    let mut out = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .expect("encode sample png");
    out
}

#[tokio::test]
async fn profile_image_is_normalized_and_replaces_previous() {
    use image::GenericImageView;

    let h = Harness::new();
    let output = h.register("user@example.com").await;

    let use_case = UploadProfileImageUseCase::new(
        Arc::new(h.store.clone()),
        Arc::new(h.objects.clone()),
        h.config.clone(),
    );

    let user = use_case
        .execute(h.store.user(&output.user.user_id), sample_png(320, 240))
        .await
        .unwrap();

    let first_path = user.profile_image.clone().expect("image path set");
    assert!(first_path.starts_with("profile-images/"));
    assert!(first_path.ends_with(".jpg"));

    // Stored object is a 250x250 JPEG regardless of the input shape
    let stored = h
        .objects
        .objects
        .lock()
        .unwrap()
        .get(&first_path)
        .cloned()
        .expect("object stored");
    let decoded = image::load_from_memory(&stored).unwrap();
    assert_eq!(decoded.dimensions(), (250, 250));
    assert_eq!(image::guess_format(&stored).unwrap(), image::ImageFormat::Jpeg);

    // Second upload deletes the first object
    let user = use_case
        .execute(user, sample_png(600, 600))
        .await
        .unwrap();
    let second_path = user.profile_image.clone().unwrap();
    assert_ne!(second_path, first_path);

    let objects = h.objects.objects.lock().unwrap();
    assert!(!objects.contains_key(&first_path));
    assert!(objects.contains_key(&second_path));
}

#[tokio::test]
async fn profile_image_rejects_garbage_and_oversize() {
    let h = Harness::new();
    let output = h.register("user@example.com").await;

    let use_case = UploadProfileImageUseCase::new(
        Arc::new(h.store.clone()),
        Arc::new(h.objects.clone()),
        h.config.clone(),
    );

    let err = use_case
        .execute(h.store.user(&output.user.user_id), b"not an image".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, AccountError::ImageProcessing(_)));

    let oversize = vec![0u8; h.config.profile_image_max_bytes + 1];
    let err = use_case
        .execute(h.store.user(&output.user.user_id), oversize)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AccountError::Validation { field: "image", .. }
    ));

    // Neither attempt stored anything or touched the user
    assert!(h.objects.objects.lock().unwrap().is_empty());
    assert!(h.store.user(&output.user.user_id).profile_image.is_none());
}
