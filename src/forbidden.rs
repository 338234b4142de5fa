//! The page to display when a logged in user requests another user's data.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub fn get_403_forbidden_response(description: &str) -> Response {
    let page = error_view(
        "Forbidden",
        "403",
        description,
        "Check the link or go back to your own transactions.",
    );

    (StatusCode::FORBIDDEN, Html(page.into_string())).into_response()
}
