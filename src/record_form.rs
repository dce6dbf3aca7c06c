//! The dialog shell and field widgets shared by the record forms.
//!
//! A dialog is loaded into the modal container with `hx-get`. Its form posts
//! (create) or puts (edit) to the entity's API route and the response is
//! swapped back into the modal container:
//! - a validation failure re-renders the dialog with inline messages,
//! - a failed write renders an alert into the alert container via
//!   `hx-target-error` and leaves the dialog open,
//! - a successful write returns an empty body, closing the dialog, plus an
//!   `HX-Trigger` header that makes the dashboard re-fetch its content.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_htmx::HX_TRIGGER;
use maud::{Markup, html};

use crate::{
    database_id::DatabaseId,
    endpoints::format_endpoint,
    html::{
        ALERT_CONTAINER_ID, BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_CHECKBOX_STYLE,
        FORM_ERROR_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, MODAL_CONTAINER_ID, loading_spinner,
    },
};

/// The event the dashboard listens for to re-fetch its collections.
pub const RECORDS_CHANGED_EVENT: &str = "records-changed";

/// Empties the modal container.
pub const CLOSE_DIALOG_SCRIPT: &str = "document.getElementById('modal-container').innerHTML = ''";

/// Whether a dialog creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(DatabaseId),
}

/// The routes a dialog submits to.
pub struct FormRoutes<'a> {
    /// Receives a POST in create mode.
    pub collection: &'a str,
    /// Receives a PUT in edit mode. Contains the ID parameter.
    pub item: &'a str,
}

/// The labels of a dialog, which differ between create and edit mode.
pub struct DialogText<'a> {
    pub create_title: &'a str,
    pub edit_title: &'a str,
    pub create_submit: &'a str,
    pub edit_submit: &'a str,
}

/// Render a dialog containing a form with `fields`.
pub fn dialog_view(
    mode: FormMode,
    routes: &FormRoutes,
    text: &DialogText,
    fields: Markup,
) -> Markup {
    let (title, submit_label, hx_post, hx_put) = match mode {
        FormMode::Create => (
            text.create_title,
            text.create_submit,
            Some(routes.collection.to_owned()),
            None,
        ),
        FormMode::Edit(id) => (
            text.edit_title,
            text.edit_submit,
            None,
            Some(format_endpoint(routes.item, id)),
        ),
    };

    html! {
        div
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 px-4"
        {
            div
                role="dialog"
                aria-modal="true"
                aria-labelledby="dialog-title"
                class="w-full max-w-lg p-6 rounded shadow-lg bg-white dark:bg-gray-800
                    text-gray-900 dark:text-white max-h-screen overflow-y-auto"
            {
                div class="flex items-center justify-between mb-4"
                {
                    h2 id="dialog-title" class="text-xl font-bold" { (title) }

                    button
                        type="button"
                        aria-label="Fechar"
                        class="text-2xl leading-none"
                        onclick=(CLOSE_DIALOG_SCRIPT)
                    {
                        "×"
                    }
                }

                form
                    hx-post=[hx_post]
                    hx-put=[hx_put]
                    hx-target={ "#" (MODAL_CONTAINER_ID) }
                    hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                    hx-swap="innerHTML"
                    hx-disabled-elt="find button[type=submit]"
                    hx-indicator="#indicator"
                    class="w-full space-y-4"
                {
                    (fields)

                    div class="flex flex-col gap-2 pt-2"
                    {
                        button
                            type="submit"
                            id="indicator"
                            class=(BUTTON_PRIMARY_STYLE)
                        {
                            span class="htmx-indicator" { (loading_spinner()) }
                            (submit_label)
                        }

                        button
                            type="button"
                            class=(BUTTON_SECONDARY_STYLE)
                            onclick=(CLOSE_DIALOG_SCRIPT)
                        {
                            "Cancelar"
                        }
                    }
                }
            }
        }
    }
}

/// The response to a successful save: closes the dialog and announces the change.
pub fn saved_response() -> Response {
    (
        StatusCode::OK,
        [(HX_TRIGGER, RECORDS_CHANGED_EVENT)],
        Html(""),
    )
        .into_response()
}

fn field_error(error: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = error {
            p class=(FORM_ERROR_STYLE) { (message) }
        }
    }
}

/// The settings of an `input` element.
pub struct InputField<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub input_type: &'a str,
    pub value: &'a str,
    pub required: bool,
    pub error: Option<&'a str>,
}

impl InputField<'_> {
    pub fn into_html(self) -> Markup {
        let step = (self.input_type == "number").then_some("0.01");

        html! {
            div
            {
                label for=(self.name) class=(FORM_LABEL_STYLE) { (self.label) }

                input
                    id=(self.name)
                    name=(self.name)
                    type=(self.input_type)
                    step=[step]
                    value=(self.value)
                    required[self.required]
                    aria-invalid=[self.error.map(|_| "true")]
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(self.error))
            }
        }
    }
}

/// The settings of a `select` element.
pub struct SelectField<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub placeholder: &'a str,
    /// (value, label) pairs.
    pub options: Vec<(String, String)>,
    pub selected: &'a str,
    pub required: bool,
    pub error: Option<&'a str>,
}

impl SelectField<'_> {
    pub fn into_html(self) -> Markup {
        html! {
            div
            {
                label for=(self.name) class=(FORM_LABEL_STYLE) { (self.label) }

                select
                    id=(self.name)
                    name=(self.name)
                    required[self.required]
                    aria-invalid=[self.error.map(|_| "true")]
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[self.selected.is_empty()] { (self.placeholder) }

                    @for (value, label) in &self.options {
                        option value=(value) selected[value == self.selected] { (label) }
                    }
                }

                (field_error(self.error))
            }
        }
    }
}

/// A required choice between a few codes, rendered as radio buttons.
pub struct RadioField<'a> {
    pub name: &'a str,
    pub legend: &'a str,
    /// (value, label) pairs.
    pub options: Vec<(String, String)>,
    pub selected: &'a str,
    pub error: Option<&'a str>,
}

impl RadioField<'_> {
    pub fn into_html(self) -> Markup {
        html! {
            fieldset class="space-y-2"
            {
                legend class=(FORM_LABEL_STYLE) { (self.legend) }

                div class=(FORM_RADIO_GROUP_STYLE)
                {
                    @for (value, label) in &self.options {
                        @let id = format!("{}-{}", self.name, value);

                        div
                        {
                            input
                                name=(self.name)
                                id=(id)
                                type="radio"
                                value=(value)
                                checked[value == self.selected]
                                required
                                class=(FORM_RADIO_INPUT_STYLE);

                            label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (label) }
                        }
                    }
                }

                (field_error(self.error))
            }
        }
    }
}

/// A checkbox with its label on the right.
pub fn checkbox_field(name: &str, label: &str, checked: bool) -> Markup {
    html! {
        div class="flex items-center gap-2"
        {
            input
                id=(name)
                name=(name)
                type="checkbox"
                checked[checked]
                class=(FORM_CHECKBOX_STYLE);

            label for=(name) class="text-sm font-medium" { (label) }
        }
    }
}

/// Map codes to (code, label) select options.
pub fn code_options<'a>(
    codes: &[&'a str],
    label: impl Fn(&'a str) -> &'a str,
) -> Vec<(String, String)> {
    codes
        .iter()
        .map(|&code| (code.to_owned(), label(code).to_owned()))
        .collect()
}

#[cfg(test)]
mod record_form_tests {
    use maud::html;
    use scraper::{Html, Selector};

    use crate::{
        labels::{BILL_CATEGORIES, category_label},
        test_utils::{assert_hx_endpoint, assert_valid_html, get_header, must_get_form},
    };

    use super::{
        DialogText, FormMode, FormRoutes, InputField, RECORDS_CHANGED_EVENT, SelectField,
        code_options, dialog_view, saved_response,
    };

    const ROUTES: FormRoutes = FormRoutes {
        collection: "/api/things",
        item: "/api/things/{thing_id}",
    };

    const TEXT: DialogText = DialogText {
        create_title: "Nova Coisa",
        edit_title: "Editar Coisa",
        create_submit: "Criar",
        edit_submit: "Salvar",
    };

    fn render(mode: FormMode) -> Html {
        let markup = dialog_view(mode, &ROUTES, &TEXT, html! {});
        Html::parse_fragment(&markup.into_string())
    }

    #[test]
    fn create_mode_posts_to_collection() {
        let html = render(FormMode::Create);
        assert_valid_html(&html);

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/api/things", "hx-post");
        assert!(form.value().attr("hx-put").is_none());
        assert_hx_endpoint(&form, "#alert-container", "hx-target-error");
    }

    #[test]
    fn edit_mode_puts_to_item() {
        let html = render(FormMode::Edit(7));

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, "/api/things/7", "hx-put");
        assert!(form.value().attr("hx-post").is_none());

        let title = html
            .select(&Selector::parse("h2").unwrap())
            .next()
            .unwrap()
            .text()
            .collect::<String>();
        assert_eq!(title, "Editar Coisa");
    }

    #[test]
    fn input_shows_error_message() {
        let markup = InputField {
            name: "amount",
            label: "Valor",
            input_type: "number",
            value: "abc",
            required: true,
            error: Some("Valor inválido"),
        }
        .into_html();
        let html = Html::parse_fragment(&markup.into_string());

        let input = html
            .select(&Selector::parse("input[name=amount]").unwrap())
            .next()
            .unwrap();
        assert_eq!(input.value().attr("value"), Some("abc"));
        assert_eq!(input.value().attr("step"), Some("0.01"));

        let error = html
            .select(&Selector::parse("p").unwrap())
            .next()
            .unwrap()
            .text()
            .collect::<String>();
        assert_eq!(error, "Valor inválido");
    }

    #[test]
    fn select_marks_selected_option() {
        let markup = SelectField {
            name: "category",
            label: "Categoria",
            placeholder: "Selecione a categoria",
            options: code_options(&BILL_CATEGORIES, category_label),
            selected: "impostos",
            required: true,
            error: None,
        }
        .into_html();
        let html = Html::parse_fragment(&markup.into_string());

        let selected = html
            .select(&Selector::parse("option[selected]").unwrap())
            .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(selected, vec!["impostos"]);

        let option_count = html.select(&Selector::parse("option").unwrap()).count();
        assert_eq!(option_count, BILL_CATEGORIES.len() + 1);
    }

    #[tokio::test]
    async fn saved_response_closes_dialog_and_triggers_refresh() {
        let response = saved_response();

        assert_eq!(get_header(&response, "hx-trigger"), RECORDS_CHANGED_EVENT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}
