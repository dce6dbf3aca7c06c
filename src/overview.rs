//! Summary metrics over the loaded transactions and bills.

use maud::{Markup, html};

use crate::{bill::Bill, html::format_currency, transaction::Transaction};

/// Totals shown on the overview tab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewMetrics {
    pub transaction_count: usize,
    /// Bills that have not been paid yet.
    pub unpaid_bill_count: usize,
    /// Sum of all bill amounts, paid or not.
    pub bill_total: f64,
    pub income_total: f64,
    pub expense_total: f64,
    /// Income minus expenses.
    pub net: f64,
}

/// Compute the overview metrics from collections that were already loaded.
pub fn compute_overview(transactions: &[Transaction], bills: &[Bill]) -> OverviewMetrics {
    let income_total = transactions
        .iter()
        .filter(|transaction| transaction.is_income())
        .map(|transaction| transaction.amount)
        .sum::<f64>();
    let expense_total = transactions
        .iter()
        .filter(|transaction| transaction.is_expense())
        .map(|transaction| transaction.amount)
        .sum::<f64>();

    OverviewMetrics {
        transaction_count: transactions.len(),
        unpaid_bill_count: bills.iter().filter(|bill| !bill.paid).count(),
        bill_total: bills.iter().map(|bill| bill.amount).sum(),
        income_total,
        expense_total,
        net: income_total - expense_total,
    }
}

pub fn overview_view(metrics: &OverviewMetrics) -> Markup {
    let net_style = if metrics.net < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        section class="w-full grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 gap-4"
        {
            (metric_card("Total de Transações", &metrics.transaction_count.to_string(), ""))
            (metric_card("Contas a Pagar", &metrics.unpaid_bill_count.to_string(), ""))
            (metric_card("Total em Contas", &format_currency(metrics.bill_total), ""))
            (metric_card(
                "Receitas",
                &format_currency(metrics.income_total),
                "text-green-600 dark:text-green-400",
            ))
            (metric_card(
                "Despesas",
                &format_currency(metrics.expense_total),
                "text-red-600 dark:text-red-400",
            ))
            (metric_card("Saldo", &format_currency(metrics.net), net_style))
        }
    }
}

fn metric_card(title: &str, value: &str, value_style: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                dark:border-gray-700 rounded-lg p-4 shadow-md"
            aria-label=(format!("{title}: {value}"))
        {
            h3 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-2" { (title) }
            div class={ "text-3xl font-bold " (value_style) } { (value) }
        }
    }
}

#[cfg(test)]
mod overview_tests {
    use scraper::{Html, Selector};
    use time::OffsetDateTime;

    use crate::{bill::Bill, transaction::Transaction};

    use super::{OverviewMetrics, compute_overview, overview_view};

    fn bill(amount: f64, paid: bool) -> Bill {
        Bill {
            id: 1,
            description: "Conta".to_owned(),
            amount,
            category: "outros".to_owned(),
            due_date: OffsetDateTime::UNIX_EPOCH,
            paid,
            paid_date: None,
            actual_amount: None,
            interest_amount: None,
            payment_method_id: None,
            account_id: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn transaction(amount: f64, transaction_type: &str) -> Transaction {
        Transaction {
            id: 1,
            description: "Transação".to_owned(),
            amount,
            transaction_type: transaction_type.to_owned(),
            category: "vendas".to_owned(),
            date: OffsetDateTime::UNIX_EPOCH,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn card_values(metrics: &OverviewMetrics) -> Vec<(String, String)> {
        let html = Html::parse_fragment(&overview_view(metrics).into_string());

        html.select(&Selector::parse("section > div").unwrap())
            .map(|card| {
                let title = card
                    .select(&Selector::parse("h3").unwrap())
                    .next()
                    .unwrap()
                    .text()
                    .collect::<String>();
                let value = card
                    .select(&Selector::parse("div").unwrap())
                    .next()
                    .unwrap()
                    .text()
                    .collect::<String>();
                (title, value)
            })
            .collect()
    }

    #[test]
    fn counts_unpaid_bills_and_sums_all_bills() {
        let bills = [bill(100.0, false), bill(50.0, true)];

        let metrics = compute_overview(&[], &bills);

        assert_eq!(metrics.unpaid_bill_count, 1);
        assert_eq!(metrics.bill_total, 150.0);

        let cards = card_values(&metrics);
        assert!(cards.contains(&("Contas a Pagar".to_owned(), "1".to_owned())));
        assert!(cards.contains(&("Total em Contas".to_owned(), "R$ 150.00".to_owned())));
    }

    #[test]
    fn splits_income_and_expenses() {
        let transactions = [
            transaction(300.0, "income"),
            transaction(120.0, "expense"),
            transaction(200.0, "expense"),
        ];

        let metrics = compute_overview(&transactions, &[]);

        assert_eq!(
            metrics,
            OverviewMetrics {
                transaction_count: 3,
                unpaid_bill_count: 0,
                bill_total: 0.0,
                income_total: 300.0,
                expense_total: 320.0,
                net: -20.0,
            }
        );
        let cards = card_values(&metrics);
        assert!(cards.contains(&("Saldo".to_owned(), "-R$ 20.00".to_owned())));
    }

    #[test]
    fn empty_collections_give_zeroes() {
        assert_eq!(compute_overview(&[], &[]), OverviewMetrics::default());
    }
}
