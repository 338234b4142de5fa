//! The registration page for creating a new user account.
use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error, PasswordHash, ValidatedPassword,
    auth::cookie::set_auth_cookie,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE, base,
        form_error_message, log_in_register, password_input, username_input,
    },
    internal_server_error::InternalServerError,
    user::create_user,
};

/// The minimum number of characters the password should have to be considered valid on the client side (server-side validation is done on top of this validation).
const PASSWORD_INPUT_MIN_LENGTH: u8 = 14;

fn confirm_password_input(min_length: u8, error_message: Option<&str>) -> Markup {
    html! {
        div
        {
            label
                for="confirm-password"
                class=(FORM_LABEL_STYLE)
            {
                "Confirm Password"
            }

            input
                type="password"
                name="confirm_password"
                id="confirm-password"
                placeholder="••••••••"
                class=(FORM_TEXT_INPUT_STYLE)
                required
                minlength=(min_length)
            ;

            @if let Some(error_message) = error_message
            {
                (form_error_message(error_message))
            }
        }

    }
}

/// The error messages to show next to each part of the registration form.
#[derive(Default)]
struct RegistrationErrors<'a> {
    username: Option<&'a str>,
    password: Option<&'a str>,
    confirm_password: Option<&'a str>,
}

fn registration_page(username: &str, errors: RegistrationErrors) -> Markup {
    let form = html! {
        form
            method="post"
            action=(endpoints::REGISTER)
            class="space-y-4 md:space-y-6"
        {
            @if let Some(error_message) = errors.username {
                (form_error_message(error_message))
            }

            (username_input(username))
            (password_input(PASSWORD_INPUT_MIN_LENGTH, errors.password))
            (confirm_password_input(PASSWORD_INPUT_MIN_LENGTH, errors.confirm_password))

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                "Create Account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? "

                a href=(endpoints::LOG_IN) tabindex="0" class=(LINK_STYLE)
                {
                  "Log in here"
                }
            }
        }
    };

    let content = log_in_register("Create Account", &form);
    base("Register", &[], &content)
}

/// Display the registration page.
pub async fn get_register_page() -> Response {
    registration_page("", RegistrationErrors::default()).into_response()
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection for storing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<RegistrationState> for Key {
    fn from_ref(state: &RegistrationState) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Create a new user and log them in.
///
/// The form is shown again with an error message if the username is blank or
/// taken, the password is too weak, or the passwords do not match.
pub async fn register_user(
    State(state): State<RegistrationState>,
    jar: PrivateCookieJar,
    Form(user_data): Form<RegisterForm>,
) -> Response {
    let username = user_data.username.trim();

    if username.is_empty() {
        return registration_page(
            username,
            RegistrationErrors {
                username: Some("Username is required."),
                ..Default::default()
            },
        )
        .into_response();
    }

    let validated_password = match ValidatedPassword::new(&user_data.password, &[username]) {
        Ok(password) => password,
        Err(error) => {
            return registration_page(
                username,
                RegistrationErrors {
                    password: Some(&error.to_string()),
                    ..Default::default()
                },
            )
            .into_response();
        }
    };

    if user_data.password != user_data.confirm_password {
        return registration_page(
            username,
            RegistrationErrors {
                confirm_password: Some("Passwords do not match"),
                ..Default::default()
            },
        )
        .into_response();
    }

    let password_hash = match PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(error) => {
            tracing::error!("an error occurred while hashing a password: {error}");
            return InternalServerError::default().into_response();
        }
    };

    let user = match state.db_connection.lock() {
        Ok(connection) => create_user(username, password_hash, &connection),
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            Err(Error::DatabaseLockError)
        }
    };

    let user = match user {
        Ok(user) => user,
        Err(Error::DuplicateUsername(_)) => {
            return registration_page(
                username,
                RegistrationErrors {
                    username: Some("That username is already taken."),
                    ..Default::default()
                },
            )
            .into_response();
        }
        Err(error) => {
            tracing::error!("An unhandled error occurred while inserting a new user: {error}");
            return InternalServerError::default().into_response();
        }
    };

    tracing::info!("registered user {} ({})", user.id, user.username);

    match set_auth_cookie(jar, user.id, state.cookie_duration) {
        Ok(jar) => (jar, Redirect::to(endpoints::TRANSACTIONS_VIEW)).into_response(),
        Err(error) => {
            tracing::error!("An error occurred while setting the auth cookie: {error}");
            InternalServerError::default().into_response()
        }
    }
}

#[cfg(test)]
mod register_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode};
    use axum_extra::extract::PrivateCookieJar;
    use rusqlite::Connection;

    use crate::{
        PasswordHash,
        app_state::create_cookie_key,
        auth::cookie::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION},
        db::initialize,
        endpoints,
        test_utils::{
            assert_form_error_message, assert_form_input, assert_form_submit_button,
            assert_valid_html, get_header, must_get_form, parse_html_document,
        },
        user::{create_user, get_user_by_username},
    };

    use super::{RegisterForm, RegistrationState, get_register_page, register_user};

    const PASSWORD: &str = "averysafeandsecurepassword";

    fn get_test_state() -> RegistrationState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        RegistrationState {
            cookie_key: create_cookie_key("foobar"),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    fn register_form(username: &str, password: &str, confirm_password: &str) -> RegisterForm {
        RegisterForm {
            username: username.to_owned(),
            password: password.to_owned(),
            confirm_password: confirm_password.to_owned(),
        }
    }

    #[tokio::test]
    async fn render_register_page() {
        let response = get_register_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_eq!(form.value().attr("action"), Some(endpoints::REGISTER));
        assert_form_input(&form, "username", "text");
        assert_form_input(&form, "password", "password");
        assert_form_input(&form, "confirm_password", "password");
        assert_form_submit_button(&form);
    }

    #[tokio::test]
    async fn register_creates_user_and_logs_in() {
        let state = get_test_state();
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = register_user(
            State(state.clone()),
            jar,
            Form(register_form("alice", PASSWORD, PASSWORD)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(get_header(&response, "location"), endpoints::TRANSACTIONS_VIEW);
        assert!(get_header(&response, "set-cookie").starts_with(COOKIE_TOKEN));
        let user = get_user_by_username("alice", &state.db_connection.lock().unwrap()).unwrap();
        assert!(user.password_hash.verify(PASSWORD).unwrap());
    }

    #[tokio::test]
    async fn register_rejects_invalid_forms() {
        let cases = [
            (register_form("  ", PASSWORD, PASSWORD), "Username is required."),
            (
                register_form("alice", PASSWORD, "adifferentsafepassword"),
                "Passwords do not match",
            ),
            (
                register_form("taken", PASSWORD, PASSWORD),
                "That username is already taken.",
            ),
        ];

        for (form, want_error) in cases {
            let state = get_test_state();
            create_user(
                "taken",
                PasswordHash::new_unchecked("hunter2"),
                &state.db_connection.lock().unwrap(),
            )
            .unwrap();
            let jar = PrivateCookieJar::new(state.cookie_key.clone());

            let response = register_user(State(state), jar, Form(form)).await;

            assert_eq!(response.status(), StatusCode::OK);
            assert!(response.headers().get("set-cookie").is_none());
            let document = parse_html_document(response).await;
            let form = must_get_form(&document);
            assert_form_error_message(&form, want_error);
        }
    }

    #[tokio::test]
    async fn register_rejects_weak_password() {
        let state = get_test_state();
        let jar = PrivateCookieJar::new(state.cookie_key.clone());

        let response = register_user(
            State(state.clone()),
            jar,
            Form(register_form("alice", "password", "password")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            get_user_by_username("alice", &state.db_connection.lock().unwrap()).is_err(),
            "weak password should not create a user"
        );
    }
}
