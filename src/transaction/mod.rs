//! Income and expense transactions.

mod db;
mod domain;
mod form;
mod list;

pub use db::{
    create_transaction, create_transaction_table, get_transaction, get_transactions,
    update_transaction,
};
pub use domain::{Transaction, TransactionId, TransactionInput};
pub use form::{
    create_transaction_endpoint, get_edit_transaction_dialog, get_new_transaction_dialog,
    update_transaction_endpoint,
};
pub use list::transaction_list_view;
