//! The dashboard: a tab bar, a filter and the records of the selected tab.

mod handlers;
mod shell;

pub use handlers::{get_dashboard_content, get_dashboard_page};
pub use shell::{Tab, dashboard_query};
