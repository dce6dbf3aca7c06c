//! Dialogs and endpoints for creating and editing bills.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    bill::{BillId, create_bill, domain::BillFormData, get_bill, update_bill},
    chart_of_accounts::{ChartOfAccount, get_all_accounts},
    endpoints,
    html::FORM_CHECKBOX_STYLE,
    labels::{BILL_CATEGORIES, category_label},
    payment_method::{PaymentMethod, get_all_payment_methods},
    record_form::{
        DialogText, FormMode, FormRoutes, InputField, SelectField, code_options, dialog_view,
        saved_response,
    },
    timezone::local_today,
    validation::{Validate, ValidationErrors, checkbox, date_input_value},
};

/// The element the payment inputs are swapped into.
const PAYMENT_FIELDS_ID: &str = "payment-fields";

/// The state needed for the bill dialogs and endpoints.
#[derive(Debug, Clone)]
pub struct BillFormState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// Used to prefill the due date of new bills with today's date.
    pub local_timezone: String,
}

impl FromRef<AppState> for BillFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

const ROUTES: FormRoutes = FormRoutes {
    collection: endpoints::BILLS_API,
    item: endpoints::BILL_API,
};

const TEXT: DialogText = DialogText {
    create_title: "Nova Conta",
    edit_title: "Editar Conta",
    create_submit: "Criar Conta",
    edit_submit: "Salvar Conta",
};

/// The records offered by the bill dialog's selects.
struct BillOptions {
    payment_methods: Vec<PaymentMethod>,
    accounts: Vec<ChartOfAccount>,
}

fn load_options(connection: &Connection) -> Result<BillOptions, Error> {
    Ok(BillOptions {
        payment_methods: get_all_payment_methods(connection)?,
        accounts: get_all_accounts(connection)?,
    })
}

/// Render the empty bill dialog with the due date set to today.
pub async fn get_new_bill_dialog(State(state): State<BillFormState>) -> Response {
    let Some(today) = local_today(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let form_data = BillFormData {
        due_date: date_input_value(today.midnight().assume_utc()),
        ..Default::default()
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match load_options(&connection) {
        Ok(options) => bill_dialog(
            FormMode::Create,
            &form_data,
            &ValidationErrors::new(),
            &options,
        )
        .into_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve bill dialog options: {error}");
            error.into_alert_response()
        }
    }
}

/// Render the bill dialog prefilled with a stored bill.
pub async fn get_edit_bill_dialog(
    Path(bill_id): Path<BillId>,
    State(state): State<BillFormState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let dialog = get_bill(bill_id, &connection).and_then(|bill| {
        let options = load_options(&connection)?;

        Ok(bill_dialog(
            FormMode::Edit(bill_id),
            &BillFormData::from(&bill),
            &ValidationErrors::new(),
            &options,
        ))
    });

    match dialog {
        Ok(dialog) => dialog.into_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve bill {bill_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// The query sent by the paid checkbox.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PaymentFieldsQuery {
    /// "on" when the checkbox is ticked, absent otherwise.
    pub paid: String,
}

/// Render the payment inputs for a paid bill, or nothing for an unpaid one.
pub async fn get_bill_payment_fields(
    State(state): State<BillFormState>,
    Query(query): Query<PaymentFieldsQuery>,
) -> Response {
    if !checkbox(&query.paid) {
        return html! {}.into_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match get_all_payment_methods(&connection) {
        Ok(payment_methods) => payment_fields_view(
            &BillFormData::default(),
            &ValidationErrors::new(),
            &payment_methods,
        )
        .into_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve payment methods: {error}");
            error.into_alert_response()
        }
    }
}

/// Handle the create bill form submission.
pub async fn create_bill_endpoint(
    State(state): State<BillFormState>,
    Form(form_data): Form<BillFormData>,
) -> Response {
    save_bill(FormMode::Create, &state, &form_data)
}

/// Handle the edit bill form submission.
pub async fn update_bill_endpoint(
    Path(bill_id): Path<BillId>,
    State(state): State<BillFormState>,
    Form(form_data): Form<BillFormData>,
) -> Response {
    save_bill(FormMode::Edit(bill_id), &state, &form_data)
}

fn save_bill(mode: FormMode, state: &BillFormState, form_data: &BillFormData) -> Response {
    let failure_message = match mode {
        FormMode::Create => "Erro ao criar conta",
        FormMode::Edit(_) => "Erro ao atualizar conta",
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response_with_message(failure_message);
        }
    };

    let input = match form_data.validate() {
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(
                "Rejected bill form, invalid fields: {:?}",
                errors.fields().collect::<Vec<_>>()
            );
            return match load_options(&connection) {
                Ok(options) => bill_dialog(mode, form_data, &errors, &options).into_response(),
                Err(error) => {
                    tracing::error!("Failed to retrieve bill dialog options: {error}");
                    error.into_alert_response_with_message(failure_message)
                }
            };
        }
    };

    let result = match mode {
        FormMode::Create => create_bill(&input, &connection).map(|bill| bill.id),
        FormMode::Edit(bill_id) => update_bill(bill_id, &input, &connection).map(|()| bill_id),
    };

    match result {
        Ok(bill_id) => {
            tracing::info!("Saved bill {bill_id} ({mode:?})");
            saved_response()
        }
        Err(error) => {
            tracing::error!("Could not save bill ({mode:?}): {error}");
            error.into_alert_response_with_message(failure_message)
        }
    }
}

/// Options for a select of records where inactive ones are only listed if
/// already selected.
fn active_or_selected<'a, T>(
    records: &'a [T],
    selected: &str,
    is_active: impl Fn(&T) -> bool,
    option: impl Fn(&'a T) -> (String, String),
) -> Vec<(String, String)> {
    records
        .iter()
        .map(|record| (is_active(record), option(record)))
        .filter(|(active, (value, _))| *active || value == selected)
        .map(|(_, option)| option)
        .collect()
}

fn bill_dialog(
    mode: FormMode,
    form_data: &BillFormData,
    errors: &ValidationErrors,
    options: &BillOptions,
) -> Markup {
    let account_options = active_or_selected(
        &options.accounts,
        &form_data.account_id,
        |account| account.active,
        |account| (account.id.to_string(), account.display_name()),
    );
    let paid = form_data.is_paid();

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

        (SelectField {
            name: "category",
            label: "Categoria",
            placeholder: "Selecione a categoria",
            options: code_options(&BILL_CATEGORIES, category_label),
            selected: &form_data.category,
            required: true,
            error: errors.get("category"),
        }.into_html())

        (InputField {
            name: "due_date",
            label: "Data de Vencimento",
            input_type: "date",
            value: &form_data.due_date,
            required: true,
            error: errors.get("due_date"),
        }.into_html())

        @if !account_options.is_empty() {
            (SelectField {
                name: "account_id",
                label: "Conta Contábil",
                placeholder: "Selecione a conta contábil",
                options: account_options,
                selected: &form_data.account_id,
                required: false,
                error: errors.get("account_id"),
            }.into_html())
        }

        div class="flex items-center gap-2"
        {
            input
                id="paid"
                name="paid"
                type="checkbox"
                checked[paid]
                hx-get=(endpoints::BILL_PAYMENT_FIELDS)
                hx-trigger="change"
                hx-include="this"
                hx-target={ "#" (PAYMENT_FIELDS_ID) }
                hx-swap="innerHTML"
                class=(FORM_CHECKBOX_STYLE);

            label for="paid" class="text-sm font-medium" { "Pago" }
        }

        div id=(PAYMENT_FIELDS_ID) class="space-y-4"
        {
            @if paid {
                (payment_fields_view(form_data, errors, &options.payment_methods))
            }
        }
    };

    dialog_view(mode, &ROUTES, &TEXT, fields)
}

fn payment_fields_view(
    form_data: &BillFormData,
    errors: &ValidationErrors,
    payment_methods: &[PaymentMethod],
) -> Markup {
    let payment_method_options = active_or_selected(
        payment_methods,
        &form_data.payment_method_id,
        |payment_method| payment_method.active,
        |payment_method| (payment_method.id.to_string(), payment_method.name.clone()),
    );

    html! {
        (InputField {
            name: "paid_date",
            label: "Data de Pagamento",
            input_type: "date",
            value: &form_data.paid_date,
            required: false,
            error: errors.get("paid_date"),
        }.into_html())

        (SelectField {
            name: "payment_method_id",
            label: "Forma de Pagamento",
            placeholder: "Selecione a forma de pagamento",
            options: payment_method_options,
            selected: &form_data.payment_method_id,
            required: false,
            error: errors.get("payment_method_id"),
        }.into_html())

        (InputField {
            name: "actual_amount",
            label: "Valor Pago",
            input_type: "number",
            value: &form_data.actual_amount,
            required: false,
            error: errors.get("actual_amount"),
        }.into_html())

        (InputField {
            name: "interest_amount",
            label: "Juros",
            input_type: "number",
            value: &form_data.interest_amount,
            required: false,
            error: errors.get("interest_amount"),
        }.into_html())
    }
}
