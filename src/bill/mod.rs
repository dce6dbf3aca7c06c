//! Bills to pay and their payment details.

mod db;
mod domain;
mod form;
mod list;

pub use db::{create_bill, create_bill_table, get_bill, get_bills, update_bill};
pub use domain::{Bill, BillId};
pub use form::{
    create_bill_endpoint, get_bill_payment_fields, get_edit_bill_dialog, get_new_bill_dialog,
    update_bill_endpoint,
};
pub use list::bill_list_view;
