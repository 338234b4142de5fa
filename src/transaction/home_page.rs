//! Defines the route handler for the home page.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use maud::{Markup, html};

use crate::{
    Error,
    auth::get_caller,
    endpoints,
    html::{PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    transaction::{TransactionRow, TransactionState, TransactionStore, table::transaction_table},
};

fn home_view(rows: &[TransactionRow], is_logged_in: bool) -> Markup {
    let nav_bar = if is_logged_in {
        NavBar::new(endpoints::ROOT)
    } else {
        NavBar::anonymous()
    };

    let content = html! {
        (nav_bar.into_html())

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Recent Transactions" }

            (transaction_table(rows, is_logged_in))
        }
    };

    base("Home", &[], &content)
}

/// Render the home page listing transactions, newest first.
///
/// A logged in caller sees their own transactions. Visitors who have not
/// logged in see every user's transactions without the edit and delete actions.
pub async fn get_home_page<S>(
    State(state): State<TransactionState<S>>,
    jar: PrivateCookieJar,
) -> Result<Response, Error>
where
    S: TransactionStore + Send + Sync,
{
    let caller = get_caller(&jar);
    let transactions = state.transaction_service.list(caller)?;
    let rows: Vec<TransactionRow> = transactions.into_iter().map(TransactionRow::from).collect();

    Ok(home_view(&rows, caller.is_some()).into_response())
}
