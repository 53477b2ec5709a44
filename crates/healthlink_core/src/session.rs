//! The session lifecycle state machine.
//!
//! A session starts in `Bootstrapping`, restores itself from durable storage
//! exactly once, and from then on moves between `Anonymous` and
//! `Authenticated` through login, registration, logout and profile refresh.
//! Navigation is never decided here; operations return an [`AuthOutcome`]
//! and the caller reacts to it.

use crate::{
    api::{ApiError, AuthApi},
    store::SessionStore,
};
use healthlink_api::{request as req, response as res};

const LOGIN_FALLBACK: &str = "Login failed";
const REGISTER_FALLBACK: &str = "Registration failed";
const REFRESH_FALLBACK: &str = "Failed to load user profile";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Restoring from durable storage; no redirect decisions yet.
    Bootstrapping,
    Anonymous,
    Authenticated(res::User),
}

/// Result value of login/register/refresh, normalized so callers never see
/// an error type, only a display-ready message.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl AuthOutcome {
    fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
        }
    }
}

/// The single per-client session. Owns the store it persists to.
#[derive(Debug)]
pub struct Session<S: SessionStore> {
    store: S,
    state: SessionState,
    token: Option<String>,
    refreshing: bool,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::Bootstrapping,
            token: None,
            refreshing: false,
        }
    }

    /// Restores the persisted session. Runs once; later calls are no-ops.
    pub fn bootstrap(&mut self) {
        if self.state != SessionState::Bootstrapping {
            return;
        }
        match self.store.load() {
            Some((token, user)) => {
                tracing::info!("Restored session for {}", user.email);
                self.token = Some(token);
                self.state = SessionState::Authenticated(user);
            }
            None => {
                tracing::info!("No persisted session");
                self.state = SessionState::Anonymous;
            }
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&res::User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// True only while bootstrapping or during an explicit profile refresh.
    pub fn loading(&self) -> bool {
        self.refreshing || self.state == SessionState::Bootstrapping
    }

    pub async fn login(&mut self, api: &impl AuthApi, email: &str, password: &str) -> AuthOutcome {
        let login = req::Login {
            email: email.into(),
            password: password.into(),
        };
        let result = api.login(&login).await;
        self.apply_login(result)
    }

    /// Folds a login response into the session. Split out of [`Self::login`]
    /// so callers that drive the request themselves (the Leptos context,
    /// which cannot hold the session borrowed across an await) share the
    /// same transition and message normalization.
    pub fn apply_login(&mut self, result: Result<res::AuthResponse, ApiError>) -> AuthOutcome {
        match result {
            Ok(auth) => {
                self.establish(auth);
                AuthOutcome::ok()
            }
            Err(err) => {
                tracing::warn!("Login failed: {err}");
                AuthOutcome::failed(err.user_message(LOGIN_FALLBACK))
            }
        }
    }

    pub async fn register(
        &mut self,
        api: &impl AuthApi,
        register: req::Register<'_>,
    ) -> AuthOutcome {
        let result = api.register(&register).await;
        self.apply_register(result)
    }

    pub fn apply_register(&mut self, result: Result<res::AuthResponse, ApiError>) -> AuthOutcome {
        match result {
            Ok(auth) => {
                self.establish(auth);
                AuthOutcome::ok()
            }
            Err(err) => {
                tracing::warn!("Registration failed: {err}");
                AuthOutcome::failed(err.user_message(REGISTER_FALLBACK))
            }
        }
    }

    /// Persists and adopts a fresh token/user pair, atomically from the
    /// caller's perspective.
    pub fn establish(&mut self, auth: res::AuthResponse) {
        self.store.save(&auth.token, &auth.user);
        self.token = Some(auth.token);
        self.state = SessionState::Authenticated(auth.user);
    }

    /// Clears the store and the in-memory session. Idempotent.
    pub fn logout(&mut self) {
        self.store.clear();
        self.token = None;
        self.state = SessionState::Anonymous;
    }

    /// Re-fetches the authoritative profile and re-persists it.
    ///
    /// Any failure forces a full logout rather than leaving a half-stale
    /// authenticated state.
    pub async fn refresh_profile(&mut self, api: &impl AuthApi) -> AuthOutcome {
        self.begin_refresh();
        let result = api.me().await;
        self.apply_refresh(result)
    }

    /// Marks the explicit-refresh loading window. Ordinary navigation never
    /// sets this.
    pub fn begin_refresh(&mut self) {
        self.refreshing = true;
    }

    pub fn apply_refresh(&mut self, result: Result<res::User, ApiError>) -> AuthOutcome {
        self.refreshing = false;
        match (result, self.token.clone()) {
            (Ok(user), Some(token)) => {
                self.store.save(&token, &user);
                self.state = SessionState::Authenticated(user);
                AuthOutcome::ok()
            }
            (Ok(_), None) => {
                // the token vanished mid-flight, e.g. a 401 on a concurrent
                // request cleared the store
                self.logout();
                AuthOutcome::failed(REFRESH_FALLBACK.to_string())
            }
            (Err(err), _) => {
                tracing::warn!("Profile refresh failed, logging out: {err}");
                self.logout();
                AuthOutcome::failed(err.user_message(REFRESH_FALLBACK))
            }
        }
    }

    /// Re-reads durable storage and drops the in-memory user if the token
    /// is gone. Called by the session context after the HTTP layer signals
    /// an invalidated session.
    pub fn reconcile_with_store(&mut self) {
        if self.state == SessionState::Bootstrapping {
            return;
        }
        if self.store.load().is_none() {
            self.token = None;
            self.state = SessionState::Anonymous;
        }
    }
}

/// Clears durable storage without touching any in-memory session.
///
/// This is the only session mutation available to the HTTP layer, which
/// cannot reach the in-memory state; the session context observes the empty
/// store on its own schedule via [`Session::reconcile_with_store`].
pub fn invalidate(store: &impl SessionStore) {
    tracing::warn!("Session invalidated, clearing durable storage");
    store.clear();
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        guard::{authorize, RouteDecision},
        store::MemoryStore,
    };
    use futures::executor::block_on;
    use healthlink_api::response::{Profile, Role};
    use std::cell::RefCell;

    fn profile(first: &str) -> Profile {
        Profile {
            first_name: first.to_string(),
            last_name: "Tester".to_string(),
            date_of_birth: None,
            phone_number: None,
            bio: None,
            medical_license_number: None,
            specialties: None,
            hospital_affiliations: None,
            average_rating: None,
            num_reviews: None,
            managed_hospital_id: None,
            managed_pharmacy_id: None,
        }
    }

    fn user(role: Role) -> res::User {
        res::User {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            role,
            profile: profile("A"),
        }
    }

    /// Stub backend: each endpoint yields its queued responses in order.
    #[derive(Default)]
    struct StubApi {
        login: RefCell<Vec<Result<res::AuthResponse, ApiError>>>,
        register: RefCell<Vec<Result<res::AuthResponse, ApiError>>>,
        me: RefCell<Vec<Result<res::User, ApiError>>>,
    }

    impl StubApi {
        fn with_login(result: Result<res::AuthResponse, ApiError>) -> Self {
            let api = Self::default();
            api.login.borrow_mut().push(result);
            api
        }

        fn with_register(result: Result<res::AuthResponse, ApiError>) -> Self {
            let api = Self::default();
            api.register.borrow_mut().push(result);
            api
        }

        fn with_me(result: Result<res::User, ApiError>) -> Self {
            let api = Self::default();
            api.me.borrow_mut().push(result);
            api
        }
    }

    fn register_request() -> req::Register<'static> {
        req::Register {
            email: "a@b.com".into(),
            password: "pw".into(),
            role: Role::Patient,
            profile: req::RegisterProfile {
                first_name: "A".into(),
                last_name: "Tester".into(),
                date_of_birth: None,
                phone_number: None,
                medical_license_number: None,
                specialties: None,
                hospital_affiliations: None,
                managed_hospital_id: None,
                managed_pharmacy_id: None,
            },
        }
    }

    impl AuthApi for StubApi {
        async fn login(&self, _login: &req::Login<'_>) -> Result<res::AuthResponse, ApiError> {
            self.login.borrow_mut().remove(0)
        }

        async fn register(
            &self,
            _register: &req::Register<'_>,
        ) -> Result<res::AuthResponse, ApiError> {
            self.register.borrow_mut().remove(0)
        }

        async fn me(&self) -> Result<res::User, ApiError> {
            self.me.borrow_mut().remove(0)
        }
    }

    fn auth_response(token: &str, role: Role) -> res::AuthResponse {
        res::AuthResponse {
            token: token.to_string(),
            user: user(role),
        }
    }

    #[test]
    fn bootstrap_restores_persisted_session() {
        let store = MemoryStore::new();
        store.save("t1", &user(Role::Patient));

        let mut session = Session::new(store);
        assert!(session.loading());
        session.bootstrap();

        assert!(!session.loading());
        assert_eq!(session.user(), Some(&user(Role::Patient)));
    }

    #[test]
    fn bootstrap_with_corrupt_user_lands_anonymous_and_clears() {
        let store = MemoryStore::new();
        store.set(healthlink_api::TOKEN_STORAGE_KEY, "t1");
        store.set(healthlink_api::USER_STORAGE_KEY, "{corrupt");

        let mut session = Session::new(store.clone());
        session.bootstrap();

        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(store.is_empty());
    }

    #[test]
    fn bootstrap_runs_once() {
        let store = MemoryStore::new();
        let mut session = Session::new(store.clone());
        session.bootstrap();
        assert_eq!(session.state(), &SessionState::Anonymous);

        // a session persisted after bootstrap must not be picked up
        store.save("t2", &user(Role::Doctor));
        session.bootstrap();
        assert_eq!(session.state(), &SessionState::Anonymous);
    }

    #[test]
    fn login_success_persists_and_authenticates() {
        let store = MemoryStore::new();
        let mut session = Session::new(store.clone());
        session.bootstrap();

        let api = StubApi::with_login(Ok(auth_response("t1", Role::Patient)));
        let outcome = block_on(session.login(&api, "a@b.com", "pw"));

        assert!(outcome.success);
        assert_eq!(
            store.get(healthlink_api::TOKEN_STORAGE_KEY).as_deref(),
            Some("t1")
        );
        assert_eq!(session.user(), Some(&user(Role::Patient)));
    }

    #[test]
    fn login_failure_surfaces_backend_message() {
        let store = MemoryStore::new();
        let mut session = Session::new(store.clone());
        session.bootstrap();

        let api = StubApi::with_login(Err(ApiError::Api {
            status: 400,
            message: "Invalid credentials".to_string(),
        }));
        let outcome = block_on(session.login(&api, "a@b.com", "pw"));

        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Invalid credentials"));
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(store.is_empty());
    }

    #[test]
    fn login_network_failure_uses_generic_message() {
        let store = MemoryStore::new();
        let mut session = Session::new(store);
        session.bootstrap();

        let api = StubApi::with_login(Err(ApiError::Network("fetch failed".to_string())));
        let outcome = block_on(session.login(&api, "a@b.com", "pw"));

        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Login failed"));
    }

    #[test]
    fn register_success_persists_and_authenticates() {
        let store = MemoryStore::new();
        let mut session = Session::new(store.clone());
        session.bootstrap();

        let api = StubApi::with_register(Ok(auth_response("t1", Role::Patient)));
        let outcome = block_on(session.register(&api, register_request()));

        assert!(outcome.success);
        assert_eq!(
            store.get(healthlink_api::TOKEN_STORAGE_KEY).as_deref(),
            Some("t1")
        );
        assert_eq!(session.user(), Some(&user(Role::Patient)));
    }

    #[test]
    fn register_validation_failure_surfaces_joined_messages() {
        let store = MemoryStore::new();
        let mut session = Session::new(store.clone());
        session.bootstrap();

        // the HTTP layer has already joined the backend's validation array
        // into one display message
        let api = StubApi::with_register(Err(ApiError::Api {
            status: 400,
            message: "Email is invalid, Password must be at least 6 characters".to_string(),
        }));
        let outcome = block_on(session.register(&api, register_request()));

        assert!(!outcome.success);
        assert_eq!(
            outcome.message.as_deref(),
            Some("Email is invalid, Password must be at least 6 characters")
        );
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(store.is_empty());
    }

    #[test]
    fn register_network_failure_uses_generic_message() {
        let store = MemoryStore::new();
        let mut session = Session::new(store);
        session.bootstrap();

        let api = StubApi::with_register(Err(ApiError::Network("fetch failed".to_string())));
        let outcome = block_on(session.register(&api, register_request()));

        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("Registration failed"));
    }

    #[test]
    fn unauthorized_response_clears_store_and_guard_redirects_to_login() {
        let store = MemoryStore::new();
        store.save("t1", &user(Role::Patient));
        let mut session = Session::new(store.clone());
        session.bootstrap();
        assert!(session.user().is_some());

        // a protected-resource call came back 401: the HTTP layer may only
        // clear durable storage
        invalidate(&store);
        assert!(store.is_empty());

        // the context reconciles on its own schedule, and the guard then
        // sends the user to login
        session.reconcile_with_store();
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert_eq!(
            authorize(session.state(), session.loading(), &[]),
            RouteDecision::RedirectToLogin
        );
    }

    #[test]
    fn failed_refresh_forces_logout() {
        let store = MemoryStore::new();
        store.save("t1", &user(Role::Doctor));
        let mut session = Session::new(store.clone());
        session.bootstrap();

        let api = StubApi::with_me(Err(ApiError::Unauthorized));
        let outcome = block_on(session.refresh_profile(&api));

        assert!(!outcome.success);
        assert_eq!(session.state(), &SessionState::Anonymous);
        assert!(store.is_empty());
        assert!(!session.loading());
    }

    #[test]
    fn successful_refresh_reconciles_stale_profile() {
        let store = MemoryStore::new();
        store.save("t1", &user(Role::Doctor));
        let mut session = Session::new(store.clone());
        session.bootstrap();

        let mut fresh = user(Role::Doctor);
        fresh.profile.average_rating = Some(4.5);
        let api = StubApi::with_me(Ok(fresh.clone()));
        let outcome = block_on(session.refresh_profile(&api));

        assert!(outcome.success);
        assert_eq!(session.user(), Some(&fresh));
        // the fresh profile is re-persisted under the same token
        assert_eq!(store.load(), Some(("t1".to_string(), fresh)));
    }

    #[test]
    fn logout_is_idempotent() {
        let store = MemoryStore::new();
        store.save("t1", &user(Role::Patient));
        let mut session = Session::new(store.clone());
        session.bootstrap();

        session.logout();
        assert!(store.is_empty());
        assert_eq!(session.state(), &SessionState::Anonymous);

        session.logout();
        assert!(store.is_empty());
        assert_eq!(session.state(), &SessionState::Anonymous);
    }
}
