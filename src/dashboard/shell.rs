//! The dashboard's loaded state: the active tab, the filter and the collections.

use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    Error,
    bill::{Bill, get_bills},
    chart_of_accounts::{ChartOfAccount, get_all_accounts},
    filter::RecordFilter,
    payment_method::{PaymentMethod, get_all_payment_methods},
    transaction::{Transaction, get_transactions},
};

/// The sections of the dashboard.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Overview,
    Transactions,
    Bills,
    Accounts,
    PaymentMethods,
}

impl Tab {
    /// Every tab in display order.
    pub const ALL: [Tab; 5] = [
        Tab::Overview,
        Tab::Transactions,
        Tab::Bills,
        Tab::Accounts,
        Tab::PaymentMethods,
    ];

    /// The value of the `tab` query parameter.
    pub fn code(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Transactions => "transactions",
            Tab::Bills => "bills",
            Tab::Accounts => "accounts",
            Tab::PaymentMethods => "payment_methods",
        }
    }

    /// Parse a `tab` query parameter, falling back to the overview.
    pub fn from_code(code: &str) -> Tab {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.code() == code)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Visão Geral",
            Tab::Transactions => "Transações",
            Tab::Bills => "Contas a Pagar",
            Tab::Accounts => "Plano de Contas",
            Tab::PaymentMethods => "Formas de Pagamento",
        }
    }

    /// Whether the filter applies to the records shown in this tab.
    pub fn is_filtered(self) -> bool {
        matches!(self, Tab::Overview | Tab::Transactions | Tab::Bills)
    }
}

/// The `tab` query parameter.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TabQuery {
    pub tab: String,
}

/// The query string of a dashboard URL for `tab` and `filter`.
pub fn dashboard_query(tab: Tab, filter: &RecordFilter) -> String {
    let filter_query = filter.to_query_string();

    if filter_query.is_empty() {
        format!("tab={}", tab.code())
    } else {
        format!("tab={}&{filter_query}", tab.code())
    }
}

/// A collection that could not be loaded and the message to show for it.
#[derive(Debug, PartialEq)]
pub struct LoadFailure {
    pub message: &'static str,
    pub error: Error,
}

/// Everything the dashboard views render, loaded once per request.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardShell {
    pub tab: Tab,
    pub filter: RecordFilter,
    pub transactions: Vec<Transaction>,
    pub bills: Vec<Bill>,
    pub accounts: Vec<ChartOfAccount>,
    pub payment_methods: Vec<PaymentMethod>,
}

impl DashboardShell {
    /// Load the collections, applying `filter` to transactions and bills.
    ///
    /// # Errors
    /// Returns the first collection that failed to load.
    pub fn load(
        tab: Tab,
        filter: RecordFilter,
        connection: &Connection,
    ) -> Result<Self, LoadFailure> {
        let transactions = get_transactions(&filter, connection).map_err(|error| LoadFailure {
            message: "Erro ao buscar transações",
            error,
        })?;
        let bills = get_bills(&filter, connection).map_err(|error| LoadFailure {
            message: "Erro ao buscar contas",
            error,
        })?;
        let accounts = get_all_accounts(connection).map_err(|error| LoadFailure {
            message: "Erro ao buscar plano de contas",
            error,
        })?;
        let payment_methods = get_all_payment_methods(connection).map_err(|error| LoadFailure {
            message: "Erro ao buscar formas de pagamento",
            error,
        })?;

        Ok(Self {
            tab,
            filter,
            transactions,
            bills,
            accounts,
            payment_methods,
        })
    }
}

#[cfg(test)]
mod shell_tests {
    use rusqlite::Connection;

    use crate::{filter::RecordFilter, test_utils::get_test_connection};

    use super::{DashboardShell, Tab, dashboard_query};

    #[test]
    fn unknown_tab_falls_back_to_overview() {
        assert_eq!(Tab::from_code("bills"), Tab::Bills);
        assert_eq!(Tab::from_code("payment_methods"), Tab::PaymentMethods);
        assert_eq!(Tab::from_code("nope"), Tab::Overview);
        assert_eq!(Tab::from_code(""), Tab::Overview);
    }

    #[test]
    fn query_includes_tab_and_filter() {
        let filter = RecordFilter {
            search: "luz".to_owned(),
            ..Default::default()
        };

        assert_eq!(
            dashboard_query(Tab::Bills, &filter),
            "tab=bills&search=luz"
        );
        assert_eq!(
            dashboard_query(Tab::Overview, &RecordFilter::default()),
            "tab=overview"
        );
    }

    #[test]
    fn load_reports_failing_collection() {
        // No tables, so the first query fails.
        let connection = Connection::open_in_memory().unwrap();

        let failure =
            DashboardShell::load(Tab::Overview, RecordFilter::default(), &connection).unwrap_err();

        assert_eq!(failure.message, "Erro ao buscar transações");
    }

    #[test]
    fn load_keeps_tab_and_filter() {
        let connection = get_test_connection();
        let filter = RecordFilter {
            category: "vendas".to_owned(),
            ..Default::default()
        };

        let shell = DashboardShell::load(Tab::Transactions, filter.clone(), &connection).unwrap();

        assert_eq!(shell.tab, Tab::Transactions);
        assert_eq!(shell.filter, filter);
        assert!(shell.transactions.is_empty());
        assert!(shell.bills.is_empty());
    }
}
