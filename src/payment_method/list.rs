//! The payment method list shown on the dashboard.

use maud::{Markup, html};

use crate::{
    endpoints::{self, format_endpoint},
    labels::{MISSING_VALUE, active_label},
    payment_method::PaymentMethod,
    record_table::{Column, project, table_view},
};

fn columns() -> Vec<Column<'static, PaymentMethod>> {
    vec![
        Column::new("name", "Nome", |payment_method: &PaymentMethod| {
            payment_method.name.clone()
        }),
        Column::new("description", "Descrição", |payment_method: &PaymentMethod| {
            payment_method
                .description
                .clone()
                .unwrap_or_else(|| MISSING_VALUE.to_owned())
        }),
        Column::new("active", "Status", |payment_method: &PaymentMethod| {
            active_label(payment_method.active).to_owned()
        }),
    ]
}

pub fn payment_method_list_view(payment_methods: &[PaymentMethod]) -> Markup {
    let columns = columns();
    let rows = project(payment_methods, &columns, |payment_method| {
        format_endpoint(endpoints::EDIT_PAYMENT_METHOD_VIEW, payment_method.id)
    });

    html! { (table_view(&columns, &rows)) }
}
