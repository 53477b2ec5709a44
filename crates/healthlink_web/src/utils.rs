//! Various utility functions.

use crate::{
    context::{self, client::Client},
    error::{WebError, WebResult},
};
pub use crate::client_resource;
use healthlink_core::ApiError;
use leptos::prelude::*;
use leptos_router::params::Params;
use serde::{de::DeserializeOwned, Serialize};
use std::{fmt::Debug, future::Future};

/// Generic loading fallback view.
pub fn loading_fallback(text: &'static str) -> impl IntoView {
    view! { <div>{text}</div> }.into_view()
}

/// Generic error fallback view.
pub fn errors_fallback(errors: ArcRwSignal<Errors>) -> impl IntoView {
    let errors = errors.get_untracked().into_iter().collect::<Vec<_>>();
    if errors.len() == 1 {
        let (_, error) = &errors[0];
        view! {
            <div class="notification is-danger">{format!("{error}")}</div>
        }
        .into_any()
    } else {
        let errors = errors
            .into_iter()
            .map(|(_, err)| {
                view! { <li>{format!("Error: {err}")}</li> }
            })
            .collect_view();

        view! {
            <div class="notification is-danger">
                <div>"Errors"</div>
                <ul>
                    {errors}
                </ul>
            </div>
        }
        .into_any()
    }
}

/// Resource over a client call.
#[macro_export]
macro_rules! client_resource {
    ($($f:tt)*) => {
        $crate::utils::client_resource(
            move |client| async move { send_wrapper::SendWrapper::new(client.$($f)*).await }
        )
    };
}

pub fn client_resource<T, A, F>(f: A) -> Resource<WebResult<T>>
where
    T: Debug + Clone + Serialize + DeserializeOwned + 'static + Send + Sync,
    A: Fn(Client) -> F + 'static + Send + Sync,
    F: Future<Output = Result<T, ApiError>> + 'static + Send,
{
    Resource::new(
        || (),
        move |()| {
            let client = context::get_client();
            let data = f(client);
            async move { WebResult::Ok(data.await?) }
        },
    )
}

pub fn params<T>() -> WebResult<T>
where
    T: Params + Clone + PartialEq + 'static + Send + Sync,
{
    leptos_router::hooks::use_params()
        .get()
        .map_err(WebError::from)
}
