//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/bills/{bill_id}/edit', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard shell with its tabs.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The content region of the dashboard, re-fetched on filter changes and saves.
pub const DASHBOARD_CONTENT: &str = "/dashboard/content";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The dialog for creating a transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The dialog for editing a transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transactions/{transaction_id}/edit";
/// The dialog for creating a bill.
pub const NEW_BILL_VIEW: &str = "/bills/new";
/// The dialog for editing a bill.
pub const EDIT_BILL_VIEW: &str = "/bills/{bill_id}/edit";
/// The payment inputs of the bill dialog, shown only for paid bills.
pub const BILL_PAYMENT_FIELDS: &str = "/bills/payment-fields";
/// The dialog for creating a chart of accounts entry.
pub const NEW_ACCOUNT_VIEW: &str = "/accounts/new";
/// The dialog for editing a chart of accounts entry.
pub const EDIT_ACCOUNT_VIEW: &str = "/accounts/{account_id}/edit";
/// The dialog for creating a payment method.
pub const NEW_PAYMENT_METHOD_VIEW: &str = "/payment-methods/new";
/// The dialog for editing a payment method.
pub const EDIT_PAYMENT_METHOD_VIEW: &str = "/payment-methods/{payment_method_id}/edit";

/// The route to create transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to update a single transaction.
pub const TRANSACTION_API: &str = "/api/transactions/{transaction_id}";
/// The route to create bills.
pub const BILLS_API: &str = "/api/bills";
/// The route to update a single bill.
pub const BILL_API: &str = "/api/bills/{bill_id}";
/// The route to create chart of accounts entries.
pub const ACCOUNTS_API: &str = "/api/accounts";
/// The route to update a single chart of accounts entry.
pub const ACCOUNT_API: &str = "/api/accounts/{account_id}";
/// The route to create payment methods.
pub const PAYMENT_METHODS_API: &str = "/api/payment-methods";
/// The route to update a single payment method.
pub const PAYMENT_METHOD_API: &str = "/api/payment-methods/{payment_method_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/bills/{bill_id}', '{bill_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// unchanged `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
