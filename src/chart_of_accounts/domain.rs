//! Core chart of accounts domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    database_id::DatabaseId,
    labels::ACCOUNT_TYPES,
    validation::{Validate, ValidationErrors, checkbox, one_of, optional_id, required},
};

/// Database identifier for a chart of accounts entry.
pub type AccountId = DatabaseId;

pub const CODE_REQUIRED: &str = "Código é obrigatório";
pub const NAME_REQUIRED: &str = "Nome é obrigatório";
pub const TYPE_REQUIRED: &str = "Tipo é obrigatório";
pub const PARENT_CYCLE: &str = "A conta pai não pode ser a própria conta nem uma subconta dela";

/// An entry of the chart of accounts, e.g. "1.1 - Caixa".
///
/// Accounts form a tree through `parent_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOfAccount {
    pub id: AccountId,
    pub code: String,
    pub name: String,
    /// One of "ativo", "passivo", "receita" or "despesa".
    pub account_type: String,
    pub parent_id: Option<AccountId>,
    pub active: bool,
    pub created_at: OffsetDateTime,
}

impl ChartOfAccount {
    /// The code and name shown in selects and lists, e.g. "1.1 - Caixa".
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}

/// A validated account ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountInput {
    pub code: String,
    pub name: String,
    pub account_type: String,
    pub parent_id: Option<AccountId>,
    pub active: bool,
}

/// Form data for account creation and editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountFormData {
    pub code: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub parent_id: String,
    pub active: String,
}

impl From<&ChartOfAccount> for AccountFormData {
    fn from(account: &ChartOfAccount) -> Self {
        Self {
            code: account.code.clone(),
            name: account.name.clone(),
            account_type: account.account_type.clone(),
            parent_id: account
                .parent_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            active: if account.active { "on" } else { "" }.to_owned(),
        }
    }
}

impl Validate for AccountFormData {
    type Output = AccountInput;

    fn validate(&self) -> Result<AccountInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let code = required(&self.code, "code", CODE_REQUIRED, &mut errors);
        let name = required(&self.name, "name", NAME_REQUIRED, &mut errors);
        let account_type = one_of(
            &self.account_type,
            &ACCOUNT_TYPES,
            "type",
            TYPE_REQUIRED,
            &mut errors,
        );
        let parent_id = optional_id(&self.parent_id, "parent_id", &mut errors);

        match (code, name, account_type, parent_id) {
            (Some(code), Some(name), Some(account_type), Some(parent_id)) => Ok(AccountInput {
                code,
                name,
                account_type,
                parent_id,
                active: checkbox(&self.active),
            }),
            _ => Err(errors),
        }
    }
}
