//! Core transaction domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    database_id::DatabaseId,
    labels::{TRANSACTION_CATEGORIES, TRANSACTION_TYPES},
    validation::{
        Validate, ValidationErrors, date_input_value, one_of, positive_amount, required,
        required_date,
    },
};

/// Database identifier for a transaction.
pub type TransactionId = DatabaseId;

pub const DESCRIPTION_REQUIRED: &str = "Descrição é obrigatória";
pub const CATEGORY_REQUIRED: &str = "Categoria é obrigatória";
pub const DATE_REQUIRED: &str = "Data é obrigatória";
pub const TYPE_REQUIRED: &str = "Tipo é obrigatório";

/// Money that came in or went out on a given day.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Always positive, the direction is given by `transaction_type`.
    pub amount: f64,
    /// Either "income" or "expense".
    pub transaction_type: String,
    pub category: String,
    /// Midnight UTC of the calendar day.
    pub date: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.transaction_type == "income"
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == "expense"
    }
}

/// A validated transaction ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub description: String,
    pub amount: f64,
    pub transaction_type: String,
    pub category: String,
    pub date: OffsetDateTime,
}

/// Form data for transaction creation and editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionFormData {
    pub description: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub category: String,
    pub date: String,
}

impl From<&Transaction> for TransactionFormData {
    fn from(transaction: &Transaction) -> Self {
        Self {
            description: transaction.description.clone(),
            amount: transaction.amount.to_string(),
            transaction_type: transaction.transaction_type.clone(),
            category: transaction.category.clone(),
            date: date_input_value(transaction.date),
        }
    }
}

impl Validate for TransactionFormData {
    type Output = TransactionInput;

    fn validate(&self) -> Result<TransactionInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let description = required(
            &self.description,
            "description",
            DESCRIPTION_REQUIRED,
            &mut errors,
        );
        let amount = positive_amount(&self.amount, "amount", &mut errors);
        let transaction_type = one_of(
            &self.transaction_type,
            &TRANSACTION_TYPES,
            "type",
            TYPE_REQUIRED,
            &mut errors,
        );
        let category = one_of(
            &self.category,
            &TRANSACTION_CATEGORIES,
            "category",
            CATEGORY_REQUIRED,
            &mut errors,
        );
        let date = required_date(&self.date, "date", DATE_REQUIRED, &mut errors);

        match (description, amount, transaction_type, category, date) {
            (
                Some(description),
                Some(amount),
                Some(transaction_type),
                Some(category),
                Some(date),
            ) => Ok(TransactionInput {
                description,
                amount,
                transaction_type,
                category,
                date,
            }),
            _ => Err(errors),
        }
    }
}
