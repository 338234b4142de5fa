//! Defines the route handlers for the page for editing a transaction.

use axum::{
    Extension, Form,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, dollar_input_styles, form_error_message,
    },
    internal_server_error::InternalServerError,
    navigation::NavBar,
    timezone::local_today,
    transaction::{
        TransactionState, TransactionStore,
        core::{TransactionId, parse_transaction_id},
        form::{TransactionForm, transaction_form_fields},
    },
    user::UserID,
};

const FETCH_ERROR_MESSAGE: &str = "Error fetching transaction data.";
const UPDATE_ERROR_MESSAGE: &str = "Error updating transaction!";

fn edit_transaction_view(
    transaction_id: TransactionId,
    values: &TransactionForm,
    default_date: Date,
    error_message: Option<&str>,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_TRANSACTION).into_html();
    let edit_endpoint = format_endpoint(endpoints::EDIT_TRANSACTION, transaction_id);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                method="post"
                action=(edit_endpoint)
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Edit Transaction" }

                @if let Some(error_message) = error_message {
                    (form_error_message(error_message))
                }

                (transaction_form_fields(values, default_date))

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    "Save Changes"
                }
            }
        }
    };

    base("Edit Transaction", &[dollar_input_styles()], &content)
}

fn today(local_timezone: &str) -> Result<Date, Error> {
    local_today(local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {local_timezone}");
        Error::InvalidTimezoneError(local_timezone.to_owned())
    })
}

/// Renders the page for editing one of the caller's transactions.
///
/// The form is pre-filled with the transaction's current values.
pub async fn get_edit_transaction_page<S>(
    State(state): State<TransactionState<S>>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<String>,
) -> Result<Response, Error>
where
    S: TransactionStore + Send + Sync,
{
    let transaction_id = parse_transaction_id(&transaction_id)?;
    let today = today(&state.local_timezone)?;

    let transaction = match state
        .transaction_service
        .get_for_edit(user_id, transaction_id)
    {
        Ok(transaction) => transaction,
        Err(error) if error.is_storage_fault() => {
            tracing::error!("Failed to retrieve transaction {transaction_id}: {error}");
            return Ok(InternalServerError::new(FETCH_ERROR_MESSAGE).into_response());
        }
        Err(error) => return Err(error),
    };

    let values = TransactionForm::from_transaction(&transaction);

    Ok(edit_transaction_view(transaction_id, &values, today, None).into_response())
}

/// Handles the submitted form for editing one of the caller's transactions.
///
/// All four fields are replaced. Redirects to the transactions page on
/// success. The form is shown again with an error message if a field is
/// missing or invalid.
pub async fn update_transaction<S>(
    State(state): State<TransactionState<S>>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<String>,
    Form(form): Form<TransactionForm>,
) -> Result<Response, Error>
where
    S: TransactionStore + Send + Sync,
{
    let transaction_id = parse_transaction_id(&transaction_id)?;
    let today = today(&state.local_timezone)?;

    match state.transaction_service.edit(user_id, transaction_id, &form) {
        Ok(_) => {
            tracing::info!("user {user_id} updated transaction {transaction_id}");
            Ok(Redirect::to(endpoints::TRANSACTIONS_VIEW).into_response())
        }
        Err(Error::Validation(error)) => Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            edit_transaction_view(transaction_id, &form, today, Some(error.message())),
        )
            .into_response()),
        Err(error) if error.is_storage_fault() => {
            Ok(InternalServerError::new(UPDATE_ERROR_MESSAGE).into_response())
        }
        Err(error) => Err(error),
    }
}
