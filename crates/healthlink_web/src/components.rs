//! Custom components.

pub mod dashboards;

use crate::{
    context::get_session,
    error::WebResult,
    paths, utils,
};
use healthlink_api::response::Role;
use healthlink_core::RouteDecision;
use leptos::prelude::*;
use leptos_router::{components::*, NavigateOptions};

#[component]
pub fn Navbar() -> impl IntoView {
    let navigate = leptos_router::hooks::use_navigate();

    let navbar_links = move || {
        let navigate = navigate.clone();
        let view = if get_session().logged_in() {
            view! {
                <A href=paths::DASHBOARD>"Dashboard"</A>
                <A href=paths::MY_APPOINTMENTS>"My appointments"</A>
                <A href=paths::NOTIFICATIONS>"Notifications"</A>
                <span class="is-flex is-flex-grow-1"></span>
                <button class="button is-link p-3" on:click=move |_ev| {
                    get_session().logout();
                    navigate(paths::LOGIN, NavigateOptions::default());
                }>"Log out"</button>
            }
            .into_any()
        } else {
            view! {
                <span class="is-flex is-flex-grow-1"></span>
                <A exact=true href=paths::REGISTER>"Register"</A>
                <A exact=true href=paths::LOGIN>"Log in"</A>
            }
            .into_any()
        };
        view
    };

    view! {
        <nav class="navbar is-flex is-vcentered">
            <A exact=true href="/">"Home"</A>
            <A href=paths::HOSPITALS>"Hospitals"</A>
            <A href=paths::DOCTORS>"Doctors"</A>
            <A href=paths::SPECIALTIES>"Specialties"</A>
            <A href=paths::PHARMACIES>"Pharmacies"</A>
            {navbar_links}
        </nav>
    }
}

/// Gates a protected view on the session state.
///
/// Evaluated on every render, so a session cleared behind the view's back
/// (e.g. by a 401) redirects on the next render. Redirects replace history
/// so the back button cannot loop into the blocked page. An empty `roles`
/// set admits any authenticated user.
#[component]
pub fn RouteGuard(#[prop(optional)] roles: Vec<Role>, children: ChildrenFn) -> impl IntoView {
    move || match get_session().authorize(&roles) {
        RouteDecision::Loading => utils::loading_fallback("Loading...").into_any(),
        RouteDecision::Allow => children().into_any(),
        RouteDecision::RedirectToLogin => {
            tracing::info!("Not authenticated, redirecting to login");
            replace_with(paths::LOGIN)
        }
        RouteDecision::RedirectToUnauthorized => {
            tracing::info!("Role not allowed, redirecting to unauthorized");
            replace_with(paths::UNAUTHORIZED)
        }
    }
}

fn replace_with(path: &'static str) -> AnyView {
    let options = NavigateOptions {
        replace: true,
        ..Default::default()
    };
    view! { <Redirect path=path options/> }.into_any()
}

#[component]
pub fn ResourceView<T, F, V>(resource: Resource<WebResult<T>>, view: F) -> impl IntoView
where
    T: Clone + 'static + Send + Sync,
    F: Fn(Option<T>) -> V + Copy + 'static + Send + Sync,
    V: IntoView + 'static,
{
    let resource_view = move || match resource.get() {
        Some(Ok(res)) => Ok(view(Some(res)).into_view()),
        Some(Err(err)) => Err(err),
        None => Ok(view(None).into_view()),
    };
    view! {
        <Suspense fallback={move || view(None)}>
            <ErrorBoundary fallback={utils::errors_fallback}>
                {resource_view}
            </ErrorBoundary>
        </Suspense>
    }
}

#[component]
pub fn ActionView<T, V>(action: Action<T, WebResult<V>>) -> impl IntoView
where
    T: 'static + Send + Sync,
    V: IntoView + Clone + 'static + Send + Sync,
{
    view! {
        <ErrorBoundary fallback={utils::errors_fallback}>
            <div>
                {move || action.value().get()}
            </div>
        </ErrorBoundary>
    }
}
