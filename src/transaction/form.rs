//! Dialogs and endpoints for creating and editing transactions.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    labels::{TRANSACTION_CATEGORIES, TRANSACTION_TYPES, category_label, transaction_type_label},
    record_form::{
        DialogText, FormMode, FormRoutes, InputField, RadioField, SelectField, code_options,
        dialog_view, saved_response,
    },
    timezone::local_today,
    transaction::{
        TransactionId, create_transaction, domain::TransactionFormData, get_transaction,
        update_transaction,
    },
    validation::{Validate, ValidationErrors, date_input_value},
};

/// The state needed for the transaction dialogs and endpoints.
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// Used to prefill the date of new transactions with today's date.
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

const ROUTES: FormRoutes = FormRoutes {
    collection: endpoints::TRANSACTIONS_API,
    item: endpoints::TRANSACTION_API,
};

const TEXT: DialogText = DialogText {
    create_title: "Nova Transação",
    edit_title: "Editar Transação",
    create_submit: "Criar Transação",
    edit_submit: "Salvar Transação",
};

/// Render the empty transaction dialog with the date set to today.
pub async fn get_new_transaction_dialog(State(state): State<TransactionFormState>) -> Response {
    let Some(today) = local_today(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let form_data = TransactionFormData {
        date: date_input_value(today.midnight().assume_utc()),
        ..Default::default()
    };

    transaction_dialog(FormMode::Create, &form_data, &ValidationErrors::new()).into_response()
}

/// Render the transaction dialog prefilled with a stored transaction.
pub async fn get_edit_transaction_dialog(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionFormState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match get_transaction(transaction_id, &connection) {
        Ok(transaction) => transaction_dialog(
            FormMode::Edit(transaction_id),
            &TransactionFormData::from(&transaction),
            &ValidationErrors::new(),
        )
        .into_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// Handle the create transaction form submission.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionFormState>,
    Form(form_data): Form<TransactionFormData>,
) -> Response {
    save_transaction(FormMode::Create, &state, &form_data)
}

/// Handle the edit transaction form submission.
pub async fn update_transaction_endpoint(
    Path(transaction_id): Path<TransactionId>,
    State(state): State<TransactionFormState>,
    Form(form_data): Form<TransactionFormData>,
) -> Response {
    save_transaction(FormMode::Edit(transaction_id), &state, &form_data)
}

fn save_transaction(
    mode: FormMode,
    state: &TransactionFormState,
    form_data: &TransactionFormData,
) -> Response {
    let failure_message = match mode {
        FormMode::Create => "Erro ao criar transação",
        FormMode::Edit(_) => "Erro ao atualizar transação",
    };

    let input = match form_data.validate() {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(
                "Rejected transaction form, invalid fields: {:?}",
                errors.fields().collect::<Vec<_>>()
            );
            return transaction_dialog(mode, form_data, &errors).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response_with_message(failure_message);
        }
    };

    let result = match mode {
        FormMode::Create => {
            create_transaction(&input, &connection).map(|transaction| transaction.id)
        }
        FormMode::Edit(transaction_id) => {
            update_transaction(transaction_id, &input, &connection).map(|()| transaction_id)
        }
    };

    match result {
        Ok(transaction_id) => {
            tracing::info!("Saved transaction {transaction_id} ({mode:?})");
            saved_response()
        }
        Err(error) => {
            tracing::error!("Could not save transaction ({mode:?}): {error}");
            error.into_alert_response_with_message(failure_message)
        }
    }
}

fn transaction_dialog(
    mode: FormMode,
    form_data: &TransactionFormData,
    errors: &ValidationErrors,
) -> Markup {
    let fields = html! {
        (InputField {
            name: "description",
            label: "Descrição",
            input_type: "text",
            value: &form_data.description,
            required: true,
            error: errors.get("description"),
        }.into_html())

        (InputField {
            name: "amount",
            label: "Valor",
            input_type: "number",
            value: &form_data.amount,
            required: true,
            error: errors.get("amount"),
        }.into_html())

        (RadioField {
            name: "type",
            legend: "Tipo",
            options: code_options(&TRANSACTION_TYPES, transaction_type_label),
            selected: &form_data.transaction_type,
            error: errors.get("type"),
        }.into_html())

        (SelectField {
            name: "category",
            label: "Categoria",
            placeholder: "Selecione a categoria",
            options: code_options(&TRANSACTION_CATEGORIES, category_label),
            selected: &form_data.category,
            required: true,
            error: errors.get("category"),
        }.into_html())

        (InputField {
            name: "date",
            label: "Data",
            input_type: "date",
            value: &form_data.date,
            required: true,
            error: errors.get("date"),
        }.into_html())
    };

    dialog_view(mode, &ROUTES, &TEXT, fields)
}
