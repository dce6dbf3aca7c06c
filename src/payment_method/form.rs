//! Dialogs and endpoints for creating and editing payment methods.

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
    payment_method::{
        PaymentMethodId, create_payment_method,
        domain::{PaymentMethodFormData, PaymentMethodInput},
        get_payment_method, update_payment_method,
    },
    record_form::{
        DialogText, FormMode, FormRoutes, InputField, checkbox_field, dialog_view, saved_response,
    },
    validation::{Validate, ValidationErrors, checkbox},
};

/// The state needed for the payment method dialogs and endpoints.
#[derive(Debug, Clone)]
pub struct PaymentMethodFormState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for PaymentMethodFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

const ROUTES: FormRoutes = FormRoutes {
    collection: endpoints::PAYMENT_METHODS_API,
    item: endpoints::PAYMENT_METHOD_API,
};

const TEXT: DialogText = DialogText {
    create_title: "Nova Forma de Pagamento",
    edit_title: "Editar Forma de Pagamento",
    create_submit: "Criar Forma de Pagamento",
    edit_submit: "Salvar Forma de Pagamento",
};

/// Render the empty payment method dialog.
pub async fn get_new_payment_method_dialog() -> Markup {
    payment_method_dialog(
        FormMode::Create,
        &PaymentMethodFormData::default(),
        &ValidationErrors::new(),
    )
}

/// Render the payment method dialog prefilled with a stored payment method.
pub async fn get_edit_payment_method_dialog(
    Path(payment_method_id): Path<PaymentMethodId>,
    State(state): State<PaymentMethodFormState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match get_payment_method(payment_method_id, &connection) {
        Ok(payment_method) => payment_method_dialog(
            FormMode::Edit(payment_method_id),
            &PaymentMethodFormData::from(&payment_method),
            &ValidationErrors::new(),
        )
        .into_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve payment method {payment_method_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// Handle the create payment method form submission.
pub async fn create_payment_method_endpoint(
    State(state): State<PaymentMethodFormState>,
    Form(form_data): Form<PaymentMethodFormData>,
) -> Response {
    let input = match form_data.validate() {
        // New payment methods start active.
        Ok(input) => PaymentMethodInput {
            active: true,
            ..input
        },
        Err(errors) => {
            tracing::debug!(
                "Rejected payment method form, invalid fields: {:?}",
                errors.fields().collect::<Vec<_>>()
            );
            return payment_method_dialog(FormMode::Create, &form_data, &errors).into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError
                .into_alert_response_with_message("Erro ao criar forma de pagamento");
        }
    };

    match create_payment_method(&input, &connection) {
        Ok(payment_method) => {
            tracing::info!("Created payment method {}", payment_method.id);
            saved_response()
        }
        Err(error) => {
            tracing::error!("Could not create payment method: {error}");
            error.into_alert_response_with_message("Erro ao criar forma de pagamento")
        }
    }
}

/// Handle the edit payment method form submission.
pub async fn update_payment_method_endpoint(
    Path(payment_method_id): Path<PaymentMethodId>,
    State(state): State<PaymentMethodFormState>,
    Form(form_data): Form<PaymentMethodFormData>,
) -> Response {
    let input = match form_data.validate() {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(
                "Rejected payment method form, invalid fields: {:?}",
                errors.fields().collect::<Vec<_>>()
            );
            return payment_method_dialog(FormMode::Edit(payment_method_id), &form_data, &errors)
                .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError
                .into_alert_response_with_message("Erro ao atualizar forma de pagamento");
        }
    };

    match update_payment_method(payment_method_id, &input, &connection) {
        Ok(()) => {
            tracing::info!("Updated payment method {payment_method_id}");
            saved_response()
        }
        Err(error) => {
            tracing::error!("Could not update payment method {payment_method_id}: {error}");
            error.into_alert_response_with_message("Erro ao atualizar forma de pagamento")
        }
    }
}

fn payment_method_dialog(
    mode: FormMode,
    form_data: &PaymentMethodFormData,
    errors: &ValidationErrors,
) -> Markup {
    let fields = html! {
        (InputField {
            name: "name",
            label: "Nome",
            input_type: "text",
            value: &form_data.name,
            required: true,
            error: errors.get("name"),
        }.into_html())

        (InputField {
            name: "description",
            label: "Descrição",
            input_type: "text",
            value: &form_data.description,
            required: false,
            error: errors.get("description"),
        }.into_html())

        @if let FormMode::Edit(_) = mode {
            (checkbox_field("active", "Ativa", checkbox(&form_data.active)))
        }
    };

    dialog_view(mode, &ROUTES, &TEXT, fields)
}
