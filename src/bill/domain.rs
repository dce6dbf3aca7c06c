//! Core bill domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    chart_of_accounts::AccountId,
    database_id::DatabaseId,
    labels::BILL_CATEGORIES,
    payment_method::PaymentMethodId,
    validation::{
        Validate, ValidationErrors, checkbox, date_input_value, one_of, optional_amount,
        optional_date, optional_id, positive_amount, required, required_date,
    },
};

/// Database identifier for a bill.
pub type BillId = DatabaseId;

pub const DESCRIPTION_REQUIRED: &str = "Descrição é obrigatória";
pub const CATEGORY_REQUIRED: &str = "Categoria é obrigatória";
pub const DUE_DATE_REQUIRED: &str = "Data de vencimento é obrigatória";

/// An amount owed by a due date, e.g. rent or the electricity bill.
///
/// The payment fields are only set when `paid` is true.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    pub id: BillId,
    pub description: String,
    pub amount: f64,
    pub category: String,
    /// Midnight UTC of the calendar day.
    pub due_date: OffsetDateTime,
    pub paid: bool,
    pub paid_date: Option<OffsetDateTime>,
    /// What was actually paid, if it differs from `amount`.
    pub actual_amount: Option<f64>,
    pub interest_amount: Option<f64>,
    pub payment_method_id: Option<PaymentMethodId>,
    pub account_id: Option<AccountId>,
    pub created_at: OffsetDateTime,
}

/// The payment details of a paid bill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillPayment {
    pub paid_date: Option<OffsetDateTime>,
    pub payment_method_id: Option<PaymentMethodId>,
    pub actual_amount: Option<f64>,
    pub interest_amount: Option<f64>,
}

/// A validated bill ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct BillInput {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub due_date: OffsetDateTime,
    pub account_id: Option<AccountId>,
    /// `None` for unpaid bills.
    pub payment: Option<BillPayment>,
}

/// Form data for bill creation and editing.
///
/// The payment fields are only submitted while the paid checkbox is ticked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillFormData {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub due_date: String,
    pub account_id: String,
    pub paid: String,
    pub paid_date: String,
    pub payment_method_id: String,
    pub actual_amount: String,
    pub interest_amount: String,
}

impl BillFormData {
    pub fn is_paid(&self) -> bool {
        checkbox(&self.paid)
    }
}

impl From<&Bill> for BillFormData {
    fn from(bill: &Bill) -> Self {
        Self {
            description: bill.description.clone(),
            amount: bill.amount.to_string(),
            category: bill.category.clone(),
            due_date: date_input_value(bill.due_date),
            account_id: optional_to_string(bill.account_id),
            paid: if bill.paid { "on" } else { "" }.to_owned(),
            paid_date: bill.paid_date.map(date_input_value).unwrap_or_default(),
            payment_method_id: optional_to_string(bill.payment_method_id),
            actual_amount: optional_to_string(bill.actual_amount),
            interest_amount: optional_to_string(bill.interest_amount),
        }
    }
}

fn optional_to_string<T: ToString>(value: Option<T>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

impl Validate for BillFormData {
    type Output = BillInput;

    fn validate(&self) -> Result<BillInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let description = required(
            &self.description,
            "description",
            DESCRIPTION_REQUIRED,
            &mut errors,
        );
        let amount = positive_amount(&self.amount, "amount", &mut errors);
        let category = one_of(
            &self.category,
            &BILL_CATEGORIES,
            "category",
            CATEGORY_REQUIRED,
            &mut errors,
        );
        let due_date = required_date(&self.due_date, "due_date", DUE_DATE_REQUIRED, &mut errors);
        let account_id = optional_id(&self.account_id, "account_id", &mut errors);

        // Unpaid bills drop whatever payment details were sent.
        let payment = if self.is_paid() {
            let paid_date = optional_date(&self.paid_date, "paid_date", &mut errors);
            let payment_method_id =
                optional_id(&self.payment_method_id, "payment_method_id", &mut errors);
            let actual_amount = optional_amount(&self.actual_amount, "actual_amount", &mut errors);
            let interest_amount =
                optional_amount(&self.interest_amount, "interest_amount", &mut errors);

            match (paid_date, payment_method_id, actual_amount, interest_amount) {
                (
                    Some(paid_date),
                    Some(payment_method_id),
                    Some(actual_amount),
                    Some(interest_amount),
                ) => Some(Some(BillPayment {
                    paid_date,
                    payment_method_id,
                    actual_amount,
                    interest_amount,
                })),
                _ => None,
            }
        } else {
            Some(None)
        };

        match (description, amount, category, due_date, account_id, payment) {
            (
                Some(description),
                Some(amount),
                Some(category),
                Some(due_date),
                Some(account_id),
                Some(payment),
            ) => Ok(BillInput {
                description,
                amount,
                category,
                due_date,
                account_id,
                payment,
            }),
            _ => Err(errors),
        }
    }
}
