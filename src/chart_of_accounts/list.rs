//! The chart of accounts list shown on the dashboard.

use std::collections::HashMap;

use maud::Markup;

use crate::{
    chart_of_accounts::{AccountId, ChartOfAccount},
    endpoints::{self, format_endpoint},
    labels::{MISSING_VALUE, account_type_label, active_label},
    record_table::{Column, project, table_view},
};

pub fn chart_of_accounts_list_view(accounts: &[ChartOfAccount]) -> Markup {
    let names_by_id: HashMap<AccountId, String> = accounts
        .iter()
        .map(|account| (account.id, account.display_name()))
        .collect();

    let columns = vec![
        Column::new("code", "Código", |account: &ChartOfAccount| account.code.clone()),
        Column::new("name", "Nome", |account: &ChartOfAccount| account.name.clone()),
        Column::new("type", "Tipo", |account: &ChartOfAccount| {
            account_type_label(&account.account_type).to_owned()
        }),
        Column::new("parent_id", "Conta Pai", |account: &ChartOfAccount| {
            account
                .parent_id
                .and_then(|parent_id| names_by_id.get(&parent_id).cloned())
                .unwrap_or_else(|| MISSING_VALUE.to_owned())
        }),
        Column::new("active", "Status", |account: &ChartOfAccount| {
            active_label(account.active).to_owned()
        }),
    ];

    let rows = project(accounts, &columns, |account| {
        format_endpoint(endpoints::EDIT_ACCOUNT_VIEW, account.id)
    });

    table_view(&columns, &rows)
}

#[cfg(test)]
mod chart_of_accounts_list_tests {
    use scraper::{Html, Selector};
    use time::OffsetDateTime;

    use crate::chart_of_accounts::ChartOfAccount;

    use super::chart_of_accounts_list_view;

    fn account(id: i64, code: &str, parent_id: Option<i64>) -> ChartOfAccount {
        ChartOfAccount {
            id,
            code: code.to_owned(),
            name: format!("Conta {code}"),
            account_type: "passivo".to_owned(),
            parent_id,
            active: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn renders_parent_name_and_type_label() {
        let accounts = [account(1, "2", None), account(2, "2.1", Some(1))];

        let html = Html::parse_fragment(&chart_of_accounts_list_view(&accounts).into_string());

        let rows = html
            .select(&Selector::parse("tbody tr").unwrap())
            .map(|row| {
                row.select(&Selector::parse("td").unwrap())
                    .map(|cell| cell.text().collect::<String>().trim().to_owned())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        assert_eq!(rows[0][2], "Passivo");
        assert_eq!(rows[0][3], "—");
        assert_eq!(rows[1][3], "2 - Conta 2");
    }
}
