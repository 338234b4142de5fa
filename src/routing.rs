//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    extract::FromRef,
    middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        AuthState, auth_guard, get_log_in_page, get_log_out, get_register_page, post_log_in,
        register_user,
    },
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        SQLiteTransactionStore, create_transaction, delete_transaction, get_add_transaction_page,
        get_edit_transaction_page, get_home_page, get_transactions_page, search_transactions,
        update_transaction,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let auth_state = AuthState::from_ref(&state);

    let unprotected_routes = Router::new()
        .route(
            endpoints::ROOT,
            get(get_home_page::<SQLiteTransactionStore>),
        )
        .route(
            endpoints::LOG_IN,
            get(get_log_in_page).post(post_log_in),
        )
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(
            endpoints::REGISTER,
            get(get_register_page).post(register_user),
        );

    let protected_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_VIEW,
            get(get_transactions_page::<SQLiteTransactionStore>),
        )
        .route(
            endpoints::TRANSACTIONS_SEARCH,
            get(search_transactions::<SQLiteTransactionStore>),
        )
        .route(
            endpoints::ADD_TRANSACTION,
            get(get_add_transaction_page::<SQLiteTransactionStore>)
                .post(create_transaction::<SQLiteTransactionStore>),
        )
        .route(
            endpoints::EDIT_TRANSACTION,
            get(get_edit_transaction_page::<SQLiteTransactionStore>)
                .post(update_transaction::<SQLiteTransactionStore>),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            post(delete_transaction::<SQLiteTransactionStore>),
        )
        .route_layer(middleware::from_fn_with_state(auth_state, auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::{TestResponse, TestServer};
    use rusqlite::Connection;
    use scraper::{Html, Selector};

    use crate::{
        AppState, PasswordHash, ValidatedPassword,
        endpoints::{self, format_endpoint},
        user::create_user,
    };

    use super::build_router;

    const PASSWORD: &str = "averysafeandsecurepassword";

    fn get_test_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            "a very secret secret",
            "Etc/UTC",
        )
        .unwrap();

        {
            let connection = state.db_connection.lock().unwrap();
            let password = ValidatedPassword::new(PASSWORD, &[]).unwrap();
            create_user("alice", PasswordHash::new(password, 4).unwrap(), &connection).unwrap();
            create_user("bob", PasswordHash::new_unchecked("hunter2"), &connection).unwrap();
        }

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    async fn log_in(server: &TestServer) -> TestResponse {
        let response = server
            .post(endpoints::LOG_IN)
            .form(&[("username", "alice"), ("password", PASSWORD)])
            .await;
        response.assert_status_see_other();

        response
    }

    #[track_caller]
    fn assert_redirects_to(response: &TestResponse, endpoint: &str) {
        response.assert_status_see_other();
        assert_eq!(
            response.header("location").to_str().unwrap(),
            endpoint,
            "want redirect to {endpoint}"
        );
    }

    fn transaction_ids(html: &str) -> Vec<String> {
        Html::parse_document(html)
            .select(&Selector::parse("tbody tr[data-transaction-id]").unwrap())
            .filter_map(|row| row.value().attr("data-transaction-id").map(str::to_owned))
            .collect()
    }

    #[tokio::test]
    async fn protected_routes_redirect_to_log_in() {
        let server = get_test_server();
        let edit = format_endpoint(endpoints::EDIT_TRANSACTION, 1);
        let delete = format_endpoint(endpoints::DELETE_TRANSACTION, 1);

        for path in [
            endpoints::TRANSACTIONS_VIEW,
            endpoints::TRANSACTIONS_SEARCH,
            endpoints::ADD_TRANSACTION,
            edit.as_str(),
        ] {
            let response = server.get(path).await;
            assert_redirects_to(&response, endpoints::LOG_IN);
        }

        for path in [endpoints::ADD_TRANSACTION, edit.as_str(), delete.as_str()] {
            let response = server.post(path).await;
            assert_redirects_to(&response, endpoints::LOG_IN);
        }
    }

    #[tokio::test]
    async fn public_pages_are_served() {
        let server = get_test_server();

        for path in [endpoints::ROOT, endpoints::LOG_IN, endpoints::REGISTER] {
            server.get(path).await.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let server = get_test_server();

        server
            .get("/this/does/not/exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn log_in_add_edit_and_delete_transaction() {
        let server = get_test_server();
        let cookies = log_in(&server).await.cookies();

        let response = server
            .post(endpoints::ADD_TRANSACTION)
            .add_cookies(cookies.clone())
            .form(&[
                ("description", "Coffee"),
                ("amount", "-4.5"),
                ("category", "Expense"),
                ("date", "2024-05-01"),
            ])
            .await;
        assert_redirects_to(&response, endpoints::TRANSACTIONS_VIEW);

        let view = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_cookies(cookies.clone())
            .await;
        view.assert_status_ok();
        let html = view.text();
        assert!(html.contains("Coffee"));
        let ids = transaction_ids(&html);
        assert_eq!(ids.len(), 1);
        let id = &ids[0];

        let response = server
            .post(&format_endpoint(endpoints::EDIT_TRANSACTION, id))
            .add_cookies(cookies.clone())
            .form(&[
                ("description", "Latte"),
                ("amount", "-5.5"),
                ("category", "Expense"),
                ("date", "2024-05-02"),
            ])
            .await;
        assert_redirects_to(&response, endpoints::TRANSACTIONS_VIEW);

        let search = server
            .get(endpoints::TRANSACTIONS_SEARCH)
            .add_query_param("query", "latte")
            .add_cookies(cookies.clone())
            .await;
        search.assert_status_ok();
        assert_eq!(transaction_ids(&search.text()), [id.clone()]);

        let response = server
            .post(&format_endpoint(endpoints::DELETE_TRANSACTION, id))
            .add_cookies(cookies.clone())
            .await;
        assert_redirects_to(&response, endpoints::TRANSACTIONS_VIEW);

        let view = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_cookies(cookies)
            .await;
        assert!(transaction_ids(&view.text()).is_empty());
    }

    #[tokio::test]
    async fn add_with_missing_field_returns_422() {
        let server = get_test_server();
        let cookies = log_in(&server).await.cookies();

        server
            .post(endpoints::ADD_TRANSACTION)
            .add_cookies(cookies)
            .form(&[("description", "Coffee"), ("category", "Expense")])
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn anonymous_home_page_lists_logged_in_users_transactions() {
        let server = get_test_server();
        let cookies = log_in(&server).await.cookies();
        server
            .post(endpoints::ADD_TRANSACTION)
            .add_cookies(cookies)
            .form(&[
                ("description", "Coffee"),
                ("amount", "-4.5"),
                ("category", "Expense"),
                ("date", "2024-05-01"),
            ])
            .await
            .assert_status_see_other();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        assert!(response.text().contains("Coffee"));
    }

    #[tokio::test]
    async fn log_out_ends_session() {
        let server = get_test_server();
        let cookies = log_in(&server).await.cookies();

        let response = server
            .get(endpoints::LOG_OUT)
            .add_cookies(cookies)
            .await;
        assert_redirects_to(&response, endpoints::LOG_IN);

        let response = server
            .get(endpoints::TRANSACTIONS_VIEW)
            .add_cookies(response.cookies())
            .await;
        assert_redirects_to(&response, endpoints::LOG_IN);
    }
}
