//! The URL paths for each page and form handler.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}/edit', use [format_endpoint].

use std::fmt::Display;

/// The home page listing transactions.
pub const ROOT: &str = "/";
/// The page for displaying the logged in user's transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions/view";
/// The page for displaying the logged in user's transactions matching a search query.
pub const TRANSACTIONS_SEARCH: &str = "/transactions/search";
/// The page and form handler for creating a new transaction.
pub const ADD_TRANSACTION: &str = "/transactions/add";
/// The page and form handler for editing an existing transaction.
pub const EDIT_TRANSACTION: &str = "/transactions/{transaction_id}/edit";
/// The form handler for deleting a transaction.
pub const DELETE_TRANSACTION: &str = "/transactions/{transaction_id}/delete";
/// The page and form handler for registering a new user.
pub const REGISTER: &str = "/users/register";
/// The page and form handler for logging in.
pub const LOG_IN: &str = "/users/login";
/// The route for logging out the current user.
pub const LOG_OUT: &str = "/users/logout";
/// The route for static files.
pub const STATIC: &str = "/static";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Only the first parameter, e.g., '{transaction_id}', is replaced.
/// If there is no parameter, `endpoint_path` is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, id: impl Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
