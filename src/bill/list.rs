//! The bill list shown on the dashboard.

use std::collections::HashMap;

use maud::Markup;

use crate::{
    bill::Bill,
    endpoints::{self, format_endpoint},
    html::{format_currency, format_date},
    labels::{MISSING_VALUE, bill_status_label, category_label},
    payment_method::{PaymentMethod, PaymentMethodId},
    record_table::{Column, project, table_view},
};

pub fn bill_list_view(bills: &[Bill], payment_methods: &[PaymentMethod]) -> Markup {
    let payment_method_names: HashMap<PaymentMethodId, &str> = payment_methods
        .iter()
        .map(|payment_method| (payment_method.id, payment_method.name.as_str()))
        .collect();

    let columns = vec![
        Column::new("due_date", "Vencimento", |bill: &Bill| format_date(bill.due_date)),
        Column::new("description", "Descrição", |bill: &Bill| bill.description.clone()),
        Column::new("amount", "Valor", |bill: &Bill| format_currency(bill.amount)),
        Column::new("paid", "Status", |bill: &Bill| bill_status_label(bill.paid).to_owned()),
        Column::new("category", "Categoria", |bill: &Bill| {
            category_label(&bill.category).to_owned()
        }),
        Column::new("payment_method_id", "Forma de Pagamento", |bill: &Bill| {
            bill.payment_method_id
                .and_then(|id| payment_method_names.get(&id))
                .copied()
                .unwrap_or(MISSING_VALUE)
                .to_owned()
        }),
    ];

    let rows = project(bills, &columns, |bill| {
        format_endpoint(endpoints::EDIT_BILL_VIEW, bill.id)
    });

    table_view(&columns, &rows)
}
