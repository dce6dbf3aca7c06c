//! The chart of accounts, a tree of ledger accounts.

mod db;
mod domain;
mod form;
mod list;

pub use db::{
    create_account, create_chart_of_accounts_table, creates_parent_cycle, get_account,
    get_all_accounts, update_account,
};
pub use domain::{AccountId, AccountInput, ChartOfAccount};
pub use form::{
    create_account_endpoint, get_edit_account_dialog, get_new_account_dialog,
    update_account_endpoint,
};
pub use list::chart_of_accounts_list_view;
