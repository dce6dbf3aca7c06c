//! Core payment method domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    database_id::DatabaseId,
    validation::{Validate, ValidationErrors, checkbox, optional_string, required},
};

/// Database identifier for a payment method.
pub type PaymentMethodId = DatabaseId;

pub const NAME_REQUIRED: &str = "Nome é obrigatório";

/// A way of paying bills, e.g. "PIX" or "Boleto".
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    pub name: String,
    pub description: Option<String>,
    /// Inactive payment methods are kept for old bills but hidden from new ones.
    pub active: bool,
    pub created_at: OffsetDateTime,
}

/// A validated payment method ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethodInput {
    pub name: String,
    pub description: Option<String>,
    pub active: bool,
}

/// Form data for payment method creation and editing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentMethodFormData {
    pub name: String,
    pub description: String,
    pub active: String,
}

impl From<&PaymentMethod> for PaymentMethodFormData {
    fn from(payment_method: &PaymentMethod) -> Self {
        Self {
            name: payment_method.name.clone(),
            description: payment_method.description.clone().unwrap_or_default(),
            active: if payment_method.active { "on" } else { "" }.to_owned(),
        }
    }
}

impl Validate for PaymentMethodFormData {
    type Output = PaymentMethodInput;

    fn validate(&self) -> Result<PaymentMethodInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match required(&self.name, "name", NAME_REQUIRED, &mut errors) {
            Some(name) => Ok(PaymentMethodInput {
                name,
                description: optional_string(&self.description),
                active: checkbox(&self.active),
            }),
            None => Err(errors),
        }
    }
}
