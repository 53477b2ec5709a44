//! Session context for authentication.
//!
//! Thin reactive shell over [`healthlink_core::Session`]: the core owns the
//! state machine, this wrapper mirrors the user and loading flag into
//! signals so views re-render on transitions.

use super::client::Client;
use crate::storage::BrowserStorage;
use healthlink_api::{request as req, response as res};
use healthlink_core::{authorize, AuthApi, AuthOutcome, RouteDecision, SessionState};
use leptos::prelude::*;
use send_wrapper::SendWrapper;
use std::{cell::RefCell, rc::Rc};

type CoreSession = healthlink_core::Session<BrowserStorage>;

#[derive(Clone, Copy)]
pub struct Session {
    inner: StoredValue<SendWrapper<Rc<RefCell<CoreSession>>>>,
    user: RwSignal<Option<res::User>>,
    loading: RwSignal<bool>,
}

impl Session {
    pub fn new() -> Self {
        let mut core = CoreSession::new(BrowserStorage);
        // localStorage reads are synchronous, so the session leaves
        // `Bootstrapping` before anything renders
        core.bootstrap();
        let user = RwSignal::new(core.user().cloned());
        let loading = RwSignal::new(core.loading());
        Self {
            inner: StoredValue::new(SendWrapper::new(Rc::new(RefCell::new(core)))),
            user,
            loading,
        }
    }

    fn with_core<R>(&self, f: impl FnOnce(&mut CoreSession) -> R) -> R {
        self.inner.with_value(|core| f(&mut core.borrow_mut()))
    }

    fn sync(&self) {
        let (user, loading) = self.with_core(|core| (core.user().cloned(), core.loading()));
        self.user.set(user);
        self.loading.set(loading);
    }

    pub fn user(&self) -> Option<res::User> {
        self.user.get()
    }

    pub fn role(&self) -> Option<res::Role> {
        self.user.with(|user| user.as_ref().map(|user| user.role))
    }

    pub fn logged_in(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn loading(&self) -> bool {
        self.loading.get()
    }

    /// Route-guard decision for the current render.
    pub fn authorize(&self, required_roles: &[res::Role]) -> RouteDecision {
        let state = match self.user.get() {
            Some(user) => SessionState::Authenticated(user),
            None => SessionState::Anonymous,
        };
        authorize(&state, self.loading.get(), required_roles)
    }

    /// Never fails; the outcome carries a display-ready message instead.
    /// Navigation on success is the caller's decision.
    pub async fn login(&self, client: &Client, email: &str, password: &str) -> AuthOutcome {
        let login = req::Login {
            email: email.into(),
            password: password.into(),
        };
        let result = client.login(&login).await;
        let outcome = self.with_core(|core| core.apply_login(result));
        self.sync();
        outcome
    }

    pub async fn register(&self, client: &Client, register: req::Register<'_>) -> AuthOutcome {
        let result = client.register(&register).await;
        let outcome = self.with_core(|core| core.apply_register(result));
        self.sync();
        outcome
    }

    pub fn logout(&self) {
        self.with_core(|core| core.logout());
        self.sync();
    }

    /// Re-fetches the authoritative profile; a failure forces a logout.
    pub async fn refresh_profile(&self, client: &Client) -> AuthOutcome {
        self.with_core(|core| core.begin_refresh());
        self.loading.set(true);
        let result = client.me().await;
        let outcome = self.with_core(|core| core.apply_refresh(result));
        self.sync();
        outcome
    }

    /// Re-reads durable storage after the HTTP layer signalled an
    /// invalidated session; the next guard evaluation then redirects.
    pub fn reconcile(&self) {
        self.with_core(|core| core.reconcile_with_store());
        self.sync();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
