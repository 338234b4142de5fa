//! Defines the route handlers for the page for adding a new transaction.

use axum::{
    Extension, Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles, form_error_message,
    },
    navigation::NavBar,
    timezone::local_today,
    transaction::{
        TransactionState, TransactionStore,
        form::{TransactionForm, transaction_form_fields},
    },
    user::UserID,
};

const SAVE_ERROR_MESSAGE: &str = "Error saving transaction!";

fn add_transaction_view(
    values: &TransactionForm,
    default_date: Date,
    error_message: Option<&str>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::ADD_TRANSACTION).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                method="post"
                action=(endpoints::ADD_TRANSACTION)
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add Transaction" }

                @if let Some(error_message) = error_message {
                    (form_error_message(error_message))
                }

                (transaction_form_fields(values, default_date))

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Add Transaction"
                }
            }
        }
    };

    base("Add Transaction", &[dollar_input_styles()], &content)
}

fn today(local_timezone: &str) -> Result<Date, Error> {
    local_today(local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {local_timezone}");
        Error::InvalidTimezoneError(local_timezone.to_owned())
    })
}

/// Renders the page for adding a transaction.
///
/// The date defaults to today in the server's local timezone.
pub async fn get_add_transaction_page<S>(
    State(state): State<TransactionState<S>>,
) -> Result<Response, Error>
where
    S: TransactionStore + Send + Sync,
{
    let today = today(&state.local_timezone)?;

    Ok(add_transaction_view(&TransactionForm::default(), today, None).into_response())
}

/// Handles the submitted form for adding a transaction owned by the caller.
///
/// Redirects to the transactions page on success. The form is shown again
/// with the submitted values and an error message if a field is missing or
/// invalid, or if the transaction could not be saved.
pub async fn create_transaction<S>(
    State(state): State<TransactionState<S>>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<TransactionForm>,
) -> Response
where
    S: TransactionStore + Send + Sync,
{
    let today = match today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_response(),
    };

    match state.transaction_service.add(user_id, &form) {
        Ok(transaction) => {
            tracing::info!("user {user_id} added transaction {}", transaction.id);
            Redirect::to(endpoints::TRANSACTIONS_VIEW).into_response()
        }
        Err(Error::Validation(error)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            add_transaction_view(&form, today, Some(error.message())),
        )
            .into_response(),
        Err(error) if error.is_storage_fault() => (
            StatusCode::INTERNAL_SERVER_ERROR,
            add_transaction_view(&form, today, Some(SAVE_ERROR_MESSAGE)),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}
