//! Assertions on the dialog forms rendered by the record handlers.

use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

/// Check that `form` submits to `endpoint` via the htmx `attribute`, e.g.
/// "hx-post" or "hx-put".
#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form.value().attr(attribute);

    assert_eq!(
        got,
        Some(endpoint),
        "want form with {attribute}=\"{endpoint}\", got {got:?}"
    );
}

/// Check that `form` has a required input `name` of `type_` holding `value`.
#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    let input = form
        .select(&Selector::parse("input").unwrap())
        .find(|input| input.value().attr("name") == Some(name))
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""));
    let attributes = input.value();

    assert_eq!(attributes.attr("type"), Some(type_), "type of input {name}");
    assert_eq!(
        attributes.attr("value").unwrap_or_default(),
        value,
        "value of input {name}"
    );
    assert!(
        attributes.attr("required").is_some(),
        "want input {name} to be required"
    );
}

/// Check the text of the first submit button in `form`.
#[track_caller]
pub(crate) fn assert_form_submit_button_with_text(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button[type=submit]").unwrap())
        .next()
        .expect("No submit button found");

    assert_eq!(submit_button.text().collect::<String>().trim(), text);
}

/// Check that the first message rendered in `form` is `want_message`.
///
/// Field messages are the only paragraphs inside the dialog forms.
#[track_caller]
pub(crate) fn assert_form_error_message(form: &ElementRef<'_>, want_message: &str) {
    let message = form
        .select(&Selector::parse("p").unwrap())
        .next()
        .expect("No error message found")
        .text()
        .collect::<String>();

    assert_eq!(message.trim(), want_message);
}
