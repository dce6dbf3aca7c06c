//! Dialogs and endpoints for creating and editing chart of accounts entries.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    chart_of_accounts::{
        AccountId, ChartOfAccount, create_account, creates_parent_cycle,
        domain::{AccountFormData, AccountInput, PARENT_CYCLE},
        get_account, get_all_accounts, update_account,
    },
    endpoints,
    labels::{ACCOUNT_TYPES, account_type_label},
    record_form::{
        DialogText, FormMode, FormRoutes, InputField, SelectField, checkbox_field, code_options,
        dialog_view, saved_response,
    },
    validation::{Validate, ValidationErrors, checkbox},
};

/// The state needed for the account dialogs and endpoints.
#[derive(Debug, Clone)]
pub struct AccountFormState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountFormState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

const ROUTES: FormRoutes = FormRoutes {
    collection: endpoints::ACCOUNTS_API,
    item: endpoints::ACCOUNT_API,
};

const TEXT: DialogText = DialogText {
    create_title: "Nova Conta",
    edit_title: "Editar Conta",
    create_submit: "Criar Conta",
    edit_submit: "Salvar Conta",
};

/// Render the empty account dialog.
pub async fn get_new_account_dialog(State(state): State<AccountFormState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match get_all_accounts(&connection) {
        Ok(accounts) => account_dialog(
            FormMode::Create,
            &AccountFormData::default(),
            &ValidationErrors::new(),
            &accounts,
        )
        .into_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve accounts: {error}");
            error.into_alert_response()
        }
    }
}

/// Render the account dialog prefilled with a stored account.
pub async fn get_edit_account_dialog(
    Path(account_id): Path<AccountId>,
    State(state): State<AccountFormState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let dialog = get_account(account_id, &connection).and_then(|account| {
        let accounts = get_all_accounts(&connection)?;

        Ok(account_dialog(
            FormMode::Edit(account_id),
            &AccountFormData::from(&account),
            &ValidationErrors::new(),
            &accounts,
        ))
    });

    match dialog {
        Ok(dialog) => dialog.into_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve account {account_id}: {error}");
            error.into_alert_response()
        }
    }
}

/// Handle the create account form submission.
pub async fn create_account_endpoint(
    State(state): State<AccountFormState>,
    Form(form_data): Form<AccountFormData>,
) -> Response {
    save_account(FormMode::Create, &state, &form_data)
}

/// Handle the edit account form submission.
pub async fn update_account_endpoint(
    Path(account_id): Path<AccountId>,
    State(state): State<AccountFormState>,
    Form(form_data): Form<AccountFormData>,
) -> Response {
    save_account(FormMode::Edit(account_id), &state, &form_data)
}

fn save_account(mode: FormMode, state: &AccountFormState, form_data: &AccountFormData) -> Response {
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
        Ok(input) if mode == FormMode::Create => AccountInput {
            active: true,
            ..input
        },
        Ok(input) => input,
        Err(errors) => {
            tracing::debug!(
                "Rejected account form, invalid fields: {:?}",
                errors.fields().collect::<Vec<_>>()
            );
            return rerender_dialog(mode, form_data, &errors, &connection, failure_message);
        }
    };

    if let (FormMode::Edit(account_id), Some(parent_id)) = (mode, input.parent_id) {
        match creates_parent_cycle(account_id, parent_id, &connection) {
            Ok(false) => {}
            Ok(true) => {
                tracing::debug!("Rejected parent {parent_id} for account {account_id}: cycle");
                let mut errors = ValidationErrors::new();
                errors.insert("parent_id", PARENT_CYCLE);
                return rerender_dialog(mode, form_data, &errors, &connection, failure_message);
            }
            Err(error) => {
                tracing::error!("Could not check the ancestors of account {account_id}: {error}");
                return error.into_alert_response_with_message(failure_message);
            }
        }
    }

    let result = match mode {
        FormMode::Create => create_account(&input, &connection).map(|account| account.id),
        FormMode::Edit(account_id) => {
            update_account(account_id, &input, &connection).map(|()| account_id)
        }
    };

    match result {
        Ok(account_id) => {
            tracing::info!("Saved account {account_id} ({mode:?})");
            saved_response()
        }
        Err(error) => {
            tracing::error!("Could not save account ({mode:?}): {error}");
            error.into_alert_response_with_message(failure_message)
        }
    }
}

/// Re-render the dialog with `errors`. The parent select needs the current
/// accounts.
fn rerender_dialog(
    mode: FormMode,
    form_data: &AccountFormData,
    errors: &ValidationErrors,
    connection: &Connection,
    failure_message: &str,
) -> Response {
    match get_all_accounts(connection) {
        Ok(accounts) => account_dialog(mode, form_data, errors, &accounts).into_response(),
        Err(error) => {
            tracing::error!("Failed to retrieve accounts: {error}");
            error.into_alert_response_with_message(failure_message)
        }
    }
}

fn account_dialog(
    mode: FormMode,
    form_data: &AccountFormData,
    errors: &ValidationErrors,
    accounts: &[ChartOfAccount],
) -> Markup {
    let parent_options = accounts
        .iter()
        .filter(|account| FormMode::Edit(account.id) != mode)
        .map(|account| (account.id.to_string(), account.display_name()))
        .collect::<Vec<_>>();

    let fields = html! {
        (InputField {
            name: "code",
            label: "Código",
            input_type: "text",
            value: &form_data.code,
            required: true,
            error: errors.get("code"),
        }.into_html())

        (InputField {
            name: "name",
            label: "Nome",
            input_type: "text",
            value: &form_data.name,
            required: true,
            error: errors.get("name"),
        }.into_html())

        (SelectField {
            name: "type",
            label: "Tipo",
            placeholder: "Selecione o tipo",
            options: code_options(&ACCOUNT_TYPES, account_type_label),
            selected: &form_data.account_type,
            required: true,
            error: errors.get("type"),
        }.into_html())

        @if !parent_options.is_empty() || errors.get("parent_id").is_some() {
            (SelectField {
                name: "parent_id",
                label: "Conta Pai",
                placeholder: "Selecione a conta pai",
                options: parent_options,
                selected: &form_data.parent_id,
                required: false,
                error: errors.get("parent_id"),
            }.into_html())
        }

        @if let FormMode::Edit(_) = mode {
            (checkbox_field("active", "Ativa", checkbox(&form_data.active)))
        }
    };

    dialog_view(mode, &ROUTES, &TEXT, fields)
}

#[cfg(test)]
mod account_form_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        chart_of_accounts::{
            create_account,
            domain::{AccountFormData, AccountInput, CODE_REQUIRED, PARENT_CYCLE},
            get_account,
        },
        db::initialize,
        test_utils::{
            assert_form_error_message, count_rows, get_header, must_get_form, parse_html_fragment,
        },
    };

    use super::{
        AccountFormState, create_account_endpoint, get_edit_account_dialog,
        get_new_account_dialog, update_account_endpoint,
    };

    fn get_state() -> AccountFormState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).expect("Could not initialize database");

        AccountFormState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn insert_account(state: &AccountFormState, code: &str) -> i64 {
        insert_child_account(state, code, None)
    }

    fn insert_child_account(state: &AccountFormState, code: &str, parent_id: Option<i64>) -> i64 {
        create_account(
            &AccountInput {
                code: code.to_owned(),
                name: format!("Conta {code}"),
                account_type: "ativo".to_owned(),
                parent_id,
                active: true,
            },
            &state.db_connection.lock().unwrap(),
        )
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn parent_select_is_hidden_without_accounts() {
        let response = get_new_account_dialog(State(get_state())).await;

        let html = parse_html_fragment(response).await;
        let parent_select = html
            .select(&Selector::parse("select[name=parent_id]").unwrap())
            .next();
        assert!(parent_select.is_none());
    }

    #[tokio::test]
    async fn edit_dialog_omits_account_from_parent_options() {
        let state = get_state();
        let parent_id = insert_account(&state, "1");
        let account_id = insert_account(&state, "1.1");

        let response = get_edit_account_dialog(Path(account_id), State(state)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let options = html
            .select(&Selector::parse("select[name=parent_id] option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .collect::<Vec<_>>();
        assert_eq!(options, vec![parent_id.to_string()]);

        let active = html
            .select(&Selector::parse("input[name=active]").unwrap())
            .next()
            .expect("No active checkbox found");
        assert!(active.value().attr("checked").is_some());
    }

    #[tokio::test]
    async fn create_with_empty_form_writes_nothing() {
        let state = get_state();

        let response =
            create_account_endpoint(State(state.clone()), Form(AccountFormData::default())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, CODE_REQUIRED);
        assert_eq!(count_rows(&state.db_connection, "chart_of_accounts"), 0);
    }

    #[tokio::test]
    async fn create_writes_one_row() {
        let state = get_state();
        let form = AccountFormData {
            code: "4.1".to_owned(),
            name: "Vendas".to_owned(),
            account_type: "receita".to_owned(),
            ..Default::default()
        };

        let response = create_account_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_header(&response, "hx-trigger"), "records-changed");
        assert_eq!(count_rows(&state.db_connection, "chart_of_accounts"), 1);
        let stored = get_account(1, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored.parent_id, None);
        assert!(stored.active);
    }

    #[tokio::test]
    async fn create_with_missing_parent_renders_alert() {
        let state = get_state();
        let form = AccountFormData {
            code: "4.1".to_owned(),
            name: "Vendas".to_owned(),
            account_type: "receita".to_owned(),
            parent_id: "99".to_owned(),
            ..Default::default()
        };

        let response = create_account_endpoint(State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = parse_html_fragment(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Erro ao criar conta"));
        assert_eq!(count_rows(&state.db_connection, "chart_of_accounts"), 0);
    }

    #[tokio::test]
    async fn update_changes_record_without_inserting() {
        let state = get_state();
        let account_id = insert_account(&state, "1");
        let form = AccountFormData {
            code: "1".to_owned(),
            name: "Caixa".to_owned(),
            account_type: "ativo".to_owned(),
            parent_id: "".to_owned(),
            active: "".to_owned(),
        };

        let response =
            update_account_endpoint(Path(account_id), State(state.clone()), Form(form)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(count_rows(&state.db_connection, "chart_of_accounts"), 1);
        let updated = get_account(account_id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(updated.name, "Caixa");
        assert!(!updated.active);
    }

    fn edit_form(code: &str, parent_id: i64) -> AccountFormData {
        AccountFormData {
            code: code.to_owned(),
            name: format!("Conta {code}"),
            account_type: "ativo".to_owned(),
            parent_id: parent_id.to_string(),
            active: "on".to_owned(),
        }
    }

    #[tokio::test]
    async fn update_rejects_account_as_its_own_parent() {
        let state = get_state();
        let account_id = insert_account(&state, "1");

        let response = update_account_endpoint(
            Path(account_id),
            State(state.clone()),
            Form(edit_form("1", account_id)),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, PARENT_CYCLE);
        let stored = get_account(account_id, &state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored.parent_id, None);
    }

    #[tokio::test]
    async fn update_rejects_descendant_as_parent() {
        let state = get_state();
        let root_id = insert_account(&state, "1");
        let child_id = insert_child_account(&state, "1.1", Some(root_id));

        let response =
            update_account_endpoint(Path(root_id), State(state.clone()), Form(edit_form("1", child_id)))
                .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, PARENT_CYCLE);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_account(root_id, &connection).unwrap().parent_id, None);
        assert_eq!(get_account(child_id, &connection).unwrap().parent_id, Some(root_id));
    }

    #[tokio::test]
    async fn rerendered_inactive_account_stays_unchecked() {
        let state = get_state();
        let account_id = insert_account(&state, "1");
        let form = AccountFormData {
            code: "1".to_owned(),
            name: "".to_owned(),
            account_type: "ativo".to_owned(),
            parent_id: "".to_owned(),
            active: "off".to_owned(),
        };

        let response = update_account_endpoint(Path(account_id), State(state), Form(form)).await;

        let html = parse_html_fragment(response).await;
        let active = html
            .select(&Selector::parse("input[name=active]").unwrap())
            .next()
            .expect("No active checkbox found");
        assert!(active.value().attr("checked").is_none());
    }
}
