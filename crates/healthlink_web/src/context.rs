pub mod client;
pub mod session;

use self::{
    client::{Client, ClientBuilder},
    session::Session,
};

pub fn initialise_context(backend_addr: &'static str) {
    tracing::trace!("initialising context");

    leptos_meta::provide_meta_context();
    leptos::context::provide_context(Session::new());
    leptos::context::provide_context(ClientBuilder::new(backend_addr));
}

pub fn get_client() -> Client {
    leptos::prelude::expect_context::<ClientBuilder>().build(get_session())
}

pub fn get_session() -> Session {
    leptos::prelude::expect_context::<Session>()
}
