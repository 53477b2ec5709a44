//! Provides the session lifecycle and route authorization logic of the
//! HealthLink Connect client, free of any UI framework so the behavior can
//! be driven and tested without a browser.

pub mod api;
pub mod guard;
pub mod session;
pub mod store;

pub use self::{
    api::{ApiError, AuthApi},
    guard::{authorize, RouteDecision},
    session::{AuthOutcome, Session, SessionState},
    store::{MemoryStore, SessionStore},
};
