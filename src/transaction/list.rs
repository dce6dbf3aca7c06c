//! The transaction list shown on the dashboard.

use maud::Markup;

use crate::{
    endpoints::{self, format_endpoint},
    html::{format_currency, format_date},
    labels::{category_label, transaction_type_label},
    record_table::{Column, project, table_view},
    transaction::Transaction,
};

pub fn transaction_list_view(transactions: &[Transaction]) -> Markup {
    let columns = vec![
        Column::new("date", "Data", |transaction: &Transaction| {
            format_date(transaction.date)
        }),
        Column::new("description", "Descrição", |transaction: &Transaction| {
            transaction.description.clone()
        }),
        Column::new("amount", "Valor", |transaction: &Transaction| {
            format_currency(transaction.amount)
        }),
        Column::new("type", "Tipo", |transaction: &Transaction| {
            transaction_type_label(&transaction.transaction_type).to_owned()
        }),
        Column::new("category", "Categoria", |transaction: &Transaction| {
            category_label(&transaction.category).to_owned()
        }),
    ];

    let rows = project(transactions, &columns, |transaction| {
        format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id)
    });

    table_view(&columns, &rows)
}
