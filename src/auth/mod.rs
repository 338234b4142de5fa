//! Caller identity: registration, log-in and log-out, the session cookie, and
//! the middleware that protects routes.

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod register;
mod token;

pub(crate) use cookie::DEFAULT_COOKIE_DURATION;
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{AuthState, auth_guard, get_caller};
pub use register::{get_register_page, register_user};

#[cfg(test)]
pub(crate) use cookie::{COOKIE_TOKEN, set_auth_cookie};
