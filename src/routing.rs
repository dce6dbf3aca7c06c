//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState,
    bill::{
        create_bill_endpoint, get_bill_payment_fields, get_edit_bill_dialog, get_new_bill_dialog,
        update_bill_endpoint,
    },
    chart_of_accounts::{
        create_account_endpoint, get_edit_account_dialog, get_new_account_dialog,
        update_account_endpoint,
    },
    dashboard::{get_dashboard_content, get_dashboard_page},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    payment_method::{
        create_payment_method_endpoint, get_edit_payment_method_dialog,
        get_new_payment_method_dialog, update_payment_method_endpoint,
    },
    transaction::{
        create_transaction_endpoint, get_edit_transaction_dialog, get_new_transaction_dialog,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // Fragments requested by htmx.
    let fragment_routes = Router::new()
        .route(endpoints::DASHBOARD_CONTENT, get(get_dashboard_content))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_dialog),
        )
        .route(
            endpoints::EDIT_TRANSACTION_VIEW,
            get(get_edit_transaction_dialog),
        )
        .route(endpoints::NEW_BILL_VIEW, get(get_new_bill_dialog))
        .route(endpoints::EDIT_BILL_VIEW, get(get_edit_bill_dialog))
        .route(endpoints::BILL_PAYMENT_FIELDS, get(get_bill_payment_fields))
        .route(endpoints::NEW_ACCOUNT_VIEW, get(get_new_account_dialog))
        .route(endpoints::EDIT_ACCOUNT_VIEW, get(get_edit_account_dialog))
        .route(
            endpoints::NEW_PAYMENT_METHOD_VIEW,
            get(get_new_payment_method_dialog),
        )
        .route(
            endpoints::EDIT_PAYMENT_METHOD_VIEW,
            get(get_edit_payment_method_dialog),
        );

    let api_routes = Router::new()
        .route(endpoints::TRANSACTIONS_API, post(create_transaction_endpoint))
        .route(endpoints::TRANSACTION_API, put(update_transaction_endpoint))
        .route(endpoints::BILLS_API, post(create_bill_endpoint))
        .route(endpoints::BILL_API, put(update_bill_endpoint))
        .route(endpoints::ACCOUNTS_API, post(create_account_endpoint))
        .route(endpoints::ACCOUNT_API, put(update_account_endpoint))
        .route(
            endpoints::PAYMENT_METHODS_API,
            post(create_payment_method_endpoint),
        )
        .route(
            endpoints::PAYMENT_METHOD_API,
            put(update_payment_method_endpoint),
        );

    page_routes
        .merge(fragment_routes)
        .merge(api_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
