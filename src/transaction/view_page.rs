//! Defines the route handlers for the page that lists and searches the
//! caller's transactions.

use axum::{
    Extension,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    endpoints,
    html::{FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, base},
    internal_server_error::InternalServerError,
    navigation::NavBar,
    transaction::{TransactionRow, TransactionState, TransactionStore, table::transaction_table},
    user::UserID,
};

const LOAD_ERROR_MESSAGE: &str = "Could not load your transactions. Please try again later.";

/// The query string for the search page.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// The free-text query, e.g. "coffee".
    pub query: Option<String>,
}

fn transactions_view(rows: &[TransactionRow], query: &str, active_endpoint: &str) -> Markup {
    let nav_bar = NavBar::new(active_endpoint).into_html();
    let table = transaction_table(rows, true);

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex flex-col gap-4 w-full max-w-4xl mb-4"
            {
                div class="flex justify-between items-center"
                {
                    h2 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::ADD_TRANSACTION) class=(LINK_STYLE) { "Add Transaction" }
                }

                form
                    method="get"
                    action=(endpoints::TRANSACTIONS_SEARCH)
                    role="search"
                    class="flex gap-2"
                {
                    label for="query" class="sr-only" { "Search transactions" }

                    input
                        type="search"
                        name="query"
                        id="query"
                        placeholder="Search by description or category"
                        value=(query)
                        class=(FORM_TEXT_INPUT_STYLE);

                    button
                        type="submit"
                        class="px-4 py-2 bg-blue-500 dark:bg-blue-600 hover:bg-blue-600 text-white rounded"
                    {
                        "Search"
                    }
                }
            }

            (table)
        }
    };

    base("Transactions", &[], &content)
}

/// Render the caller's transactions, newest first.
pub async fn get_transactions_page<S>(
    State(state): State<TransactionState<S>>,
    Extension(user_id): Extension<UserID>,
) -> Response
where
    S: TransactionStore + Send + Sync,
{
    match state.transaction_service.view(user_id) {
        Ok(rows) => transactions_view(&rows, "", endpoints::TRANSACTIONS_VIEW).into_response(),
        Err(error) => {
            tracing::error!("could not list transactions for user {user_id}: {error}");
            InternalServerError::new(LOAD_ERROR_MESSAGE).into_response()
        }
    }
}

/// Render the caller's transactions that match the query string, closest
/// match first.
///
/// The query is echoed back in the search box. A blank query lists the same
/// rows as [get_transactions_page].
pub async fn search_transactions<S>(
    State(state): State<TransactionState<S>>,
    Extension(user_id): Extension<UserID>,
    Query(search): Query<SearchQuery>,
) -> Response
where
    S: TransactionStore + Send + Sync,
{
    let query = search.query.unwrap_or_default();

    match state.transaction_service.search(user_id, Some(&query)) {
        Ok(rows) => {
            transactions_view(&rows, &query, endpoints::TRANSACTIONS_SEARCH).into_response()
        }
        Err(error) => {
            tracing::error!("could not search transactions for user {user_id}: {error}");
            InternalServerError::new(LOAD_ERROR_MESSAGE).into_response()
        }
    }
}
