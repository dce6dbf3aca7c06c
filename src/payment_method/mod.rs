//! Payment methods referenced by paid bills.

mod db;
mod domain;
mod form;
mod list;

pub use db::{
    create_payment_method, create_payment_method_table, get_all_payment_methods,
    get_payment_method, update_payment_method,
};
pub use domain::{PaymentMethod, PaymentMethodId, PaymentMethodInput};
pub use form::{
    create_payment_method_endpoint, get_edit_payment_method_dialog,
    get_new_payment_method_dialog, update_payment_method_endpoint,
};
pub use list::payment_method_list_view;
