//! Field rules shared by the record forms.
//!
//! Form payloads arrive as raw strings. Each entity's form data implements
//! [Validate], which coerces the strings into a typed record or collects a
//! message per offending field. Nothing is written unless validation passes.

use std::collections::BTreeMap;

use time::{
    OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::database_id::DatabaseId;

/// Messages shown next to form fields.
pub const AMOUNT_REQUIRED: &str = "Valor é obrigatório";
pub const AMOUNT_INVALID: &str = "Valor inválido";
pub const AMOUNT_NOT_POSITIVE: &str = "Valor deve ser maior que zero";
pub const DATE_INVALID: &str = "Data inválida";
pub const SELECTION_INVALID: &str = "Seleção inválida";

const DATE_INPUT_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Field-keyed validation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`. The first message for a field wins.
    pub fn insert(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_owned());
    }

    /// The message for `field`, if it failed validation.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// The names of the fields that failed validation.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

/// Coerce a raw form payload into a typed record.
pub trait Validate {
    type Output;

    /// # Errors
    /// Returns the messages for every field that failed validation.
    fn validate(&self) -> Result<Self::Output, ValidationErrors>;
}

/// A non-empty, trimmed string.
pub fn required(
    value: &str,
    field: &'static str,
    message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let value = value.trim();

    if value.is_empty() {
        errors.insert(field, message);
        None
    } else {
        Some(value.to_owned())
    }
}

/// A trimmed string, or `None` if empty.
pub fn optional_string(value: &str) -> Option<String> {
    let value = value.trim();

    (!value.is_empty()).then(|| value.to_owned())
}

/// A required value that must be one of `allowed`.
pub fn one_of(
    value: &str,
    allowed: &[&str],
    field: &'static str,
    required_message: &str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    let value = required(value, field, required_message, errors)?;

    if allowed.contains(&value.as_str()) {
        Some(value)
    } else {
        errors.insert(field, SELECTION_INVALID);
        None
    }
}

/// A required amount greater than zero.
pub fn positive_amount(
    value: &str,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    let value = required(value, field, AMOUNT_REQUIRED, errors)?;

    match parse_number(&value) {
        Some(amount) if amount > 0.0 => Some(amount),
        Some(_) => {
            errors.insert(field, AMOUNT_NOT_POSITIVE);
            None
        }
        None => {
            errors.insert(field, AMOUNT_INVALID);
            None
        }
    }
}

/// An amount that may be left empty.
///
/// The outer `Option` is `None` when the value is invalid, the inner one when
/// the field was left empty.
pub fn optional_amount(
    value: &str,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<Option<f64>> {
    let Some(value) = optional_string(value) else {
        return Some(None);
    };

    match parse_number(&value) {
        Some(amount) => Some(Some(amount)),
        None => {
            errors.insert(field, AMOUNT_INVALID);
            None
        }
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// A required `YYYY-MM-DD` date, normalized to midnight UTC.
pub fn required_date(
    value: &str,
    field: &'static str,
    required_message: &str,
    errors: &mut ValidationErrors,
) -> Option<OffsetDateTime> {
    let value = required(value, field, required_message, errors)?;

    parse_date_input(&value).or_else(|| {
        errors.insert(field, DATE_INVALID);
        None
    })
}

/// A `YYYY-MM-DD` date that may be left empty.
///
/// Uses the same nesting convention as [optional_amount].
pub fn optional_date(
    value: &str,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<Option<OffsetDateTime>> {
    let Some(value) = optional_string(value) else {
        return Some(None);
    };

    match parse_date_input(&value) {
        Some(date) => Some(Some(date)),
        None => {
            errors.insert(field, DATE_INVALID);
            None
        }
    }
}

/// An ID picked from a select, or `None` if nothing was picked.
///
/// Uses the same nesting convention as [optional_amount].
pub fn optional_id(
    value: &str,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<Option<DatabaseId>> {
    let Some(value) = optional_string(value) else {
        return Some(None);
    };

    match value.parse::<DatabaseId>() {
        Ok(id) => Some(Some(id)),
        Err(_) => {
            errors.insert(field, SELECTION_INVALID);
            None
        }
    }
}

/// Checkbox values: browsers send "on" for a checked box and nothing otherwise.
pub fn checkbox(value: &str) -> bool {
    matches!(value.trim(), "on" | "true" | "1")
}

fn parse_date_input(value: &str) -> Option<OffsetDateTime> {
    time::Date::parse(value, DATE_INPUT_FORMAT)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// Format `timestamp` as the value of a date input, e.g. "2024-03-05".
pub fn date_input_value(timestamp: OffsetDateTime) -> String {
    let date = timestamp.to_offset(time::UtcOffset::UTC).date();

    date.format(DATE_INPUT_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod validation_tests {
    use time::macros::datetime;

    use super::{
        AMOUNT_INVALID, AMOUNT_NOT_POSITIVE, AMOUNT_REQUIRED, DATE_INVALID, SELECTION_INVALID,
        ValidationErrors, checkbox, date_input_value, one_of, optional_amount, optional_id,
        optional_string, positive_amount, required, required_date,
    };

    #[test]
    fn required_trims_and_rejects_blank() {
        let mut errors = ValidationErrors::new();

        assert_eq!(
            required("  Aluguel ", "description", "Descrição é obrigatória", &mut errors),
            Some("Aluguel".to_owned())
        );
        assert_eq!(
            required("   ", "category", "Categoria é obrigatória", &mut errors),
            None
        );
        assert_eq!(errors.get("category"), Some("Categoria é obrigatória"));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["category"]);
    }

    #[test]
    fn positive_amount_messages() {
        let mut errors = ValidationErrors::new();

        assert_eq!(positive_amount("12.5", "a", &mut errors), Some(12.5));
        assert_eq!(positive_amount("", "b", &mut errors), None);
        assert_eq!(positive_amount("abc", "c", &mut errors), None);
        assert_eq!(positive_amount("0", "d", &mut errors), None);
        assert_eq!(positive_amount("NaN", "e", &mut errors), None);

        assert_eq!(errors.get("a"), None);
        assert_eq!(errors.get("b"), Some(AMOUNT_REQUIRED));
        assert_eq!(errors.get("c"), Some(AMOUNT_INVALID));
        assert_eq!(errors.get("d"), Some(AMOUNT_NOT_POSITIVE));
        assert_eq!(errors.get("e"), Some(AMOUNT_INVALID));
    }

    #[test]
    fn optional_amount_treats_empty_as_null() {
        let mut errors = ValidationErrors::new();

        assert_eq!(optional_amount("", "actual_amount", &mut errors), Some(None));
        assert_eq!(
            optional_amount("10.25", "actual_amount", &mut errors),
            Some(Some(10.25))
        );
        assert_eq!(optional_amount("x", "interest_amount", &mut errors), None);
        assert_eq!(errors.get("interest_amount"), Some(AMOUNT_INVALID));
    }

    #[test]
    fn required_date_normalizes_to_midnight_utc() {
        let mut errors = ValidationErrors::new();

        let date = required_date("2024-03-05", "date", "Data é obrigatória", &mut errors);

        assert_eq!(date, Some(datetime!(2024-03-05 00:00 UTC)));
        assert_eq!(errors, ValidationErrors::new());
    }

    #[test]
    fn required_date_rejects_bad_input() {
        let mut errors = ValidationErrors::new();

        assert_eq!(
            required_date("05/03/2024", "due_date", "x", &mut errors),
            None
        );
        assert_eq!(errors.get("due_date"), Some(DATE_INVALID));
    }

    #[test]
    fn one_of_rejects_unknown_codes() {
        let mut errors = ValidationErrors::new();

        assert_eq!(
            one_of("income", &["income", "expense"], "type", "Tipo é obrigatório", &mut errors),
            Some("income".to_owned())
        );
        assert_eq!(
            one_of("gift", &["income", "expense"], "type", "Tipo é obrigatório", &mut errors),
            None
        );
        assert_eq!(errors.get("type"), Some(SELECTION_INVALID));
    }

    #[test]
    fn optional_values_become_null_when_empty() {
        let mut errors = ValidationErrors::new();

        assert_eq!(optional_string("  "), None);
        assert_eq!(optional_id("", "parent_id", &mut errors), Some(None));
        assert_eq!(optional_id("7", "parent_id", &mut errors), Some(Some(7)));
        assert_eq!(optional_id("seven", "account_id", &mut errors), None);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["account_id"]);
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();

        errors.insert("amount", "first");
        errors.insert("amount", "second");

        assert_eq!(errors.get("amount"), Some("first"));
    }

    #[test]
    fn checkbox_values() {
        assert!(checkbox("on"));
        assert!(checkbox("true"));
        assert!(!checkbox(""));
        assert!(!checkbox("off"));
    }

    #[test]
    fn date_input_value_uses_utc_day() {
        assert_eq!(date_input_value(datetime!(2024-12-31 00:00 UTC)), "2024-12-31");
    }
}
