//! Dashboard HTTP handlers and view rendering.
//!
//! The page is split into the tab bar, the filter form and the content region.
//! The content region is re-fetched on its own when the filter changes or when a
//! dialog saves a record, so the rest of the page keeps its state.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::HX_REPLACE_URL;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    bill::bill_list_view,
    chart_of_accounts::chart_of_accounts_list_view,
    dashboard::shell::{DashboardShell, LoadFailure, Tab, TabQuery, dashboard_query},
    endpoints,
    filter::RecordFilter,
    html::{
        ALERT_CONTAINER_ID, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, MODAL_CONTAINER_ID,
        PAGE_CONTAINER_STYLE, base,
    },
    labels::{TRANSACTION_CATEGORIES, category_label},
    navigation::TabBar,
    overview::{compute_overview, overview_view},
    payment_method::payment_method_list_view,
    record_form::RECORDS_CHANGED_EVENT,
    transaction::transaction_list_view,
};

/// The element that holds the tab's records.
const DASHBOARD_CONTENT_ID: &str = "dashboard-content";

const FILTER_CLEAR_ID: &str = "filter-clear";

const NEW_RECORD_BUTTON_STYLE: &str = "px-4 py-2 rounded text-sm font-medium text-white \
    bg-blue-500 hover:enabled:bg-blue-600 dark:bg-blue-600 dark:hover:enabled:bg-blue-700";

/// The state needed for displaying the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the dashboard page for the requested tab and filter.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(tab_query): Query<TabQuery>,
    Query(filter): Query<RecordFilter>,
) -> Response {
    let tab = Tab::from_code(&tab_query.tab);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match DashboardShell::load(tab, filter.clone(), &connection) {
        Ok(shell) => dashboard_view(tab, &filter, content_view(&shell)).into_response(),
        Err(LoadFailure { message, error }) => {
            tracing::error!("{message}: {error}");
            let status_code = error.status_code();
            let alert = Alert::error(message, &error.alert_details()).into_html();

            (
                status_code,
                dashboard_view(tab, &filter, content_region(tab, &filter, alert)),
            )
                .into_response()
        }
    }
}

/// Render only the content region for the requested tab and filter.
pub async fn get_dashboard_content(
    State(state): State<DashboardState>,
    Query(tab_query): Query<TabQuery>,
    Query(filter): Query<RecordFilter>,
) -> Response {
    let tab = Tab::from_code(&tab_query.tab);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match DashboardShell::load(tab, filter, &connection) {
        Ok(shell) => {
            // The page URL and the parts outside the content region follow the
            // filter that was just applied.
            let page_url = format!(
                "{}?{}",
                endpoints::DASHBOARD_VIEW,
                dashboard_query(tab, &shell.filter)
            );
            let markup = html! {
                (content_view(&shell))
                (TabBar::new(tab, &shell.filter).out_of_band().into_html())
                @if tab.is_filtered() {
                    (clear_filter_view(tab, &shell.filter, true))
                }
            };

            ([(HX_REPLACE_URL, page_url)], markup).into_response()
        }
        Err(LoadFailure { message, error }) => {
            tracing::error!("{message}: {error}");
            error.into_alert_response_with_message(message)
        }
    }
}

fn dashboard_view(tab: Tab, filter: &RecordFilter, content: Markup) -> Markup {
    let page = html! {
        (TabBar::new(tab, filter).into_html())

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full space-y-4"
            {
                @if tab.is_filtered() {
                    (filter_form_view(tab, filter))
                }

                (content)
            }
        }
    };

    base(tab.label(), &page)
}

/// The filter form. Every change re-fetches the content region, and a newer
/// request replaces one that is still in flight.
fn filter_form_view(tab: Tab, filter: &RecordFilter) -> Markup {
    html! {
        form
            id="filter-form"
            hx-get=(endpoints::DASHBOARD_CONTENT)
            hx-trigger="change, submit"
            hx-sync="this:replace"
            hx-target={ "#" (DASHBOARD_CONTENT_ID) }
            hx-swap="outerHTML"
            hx-target-error={ "#" (ALERT_CONTAINER_ID) }
            class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4 p-4 rounded
                bg-white dark:bg-gray-800 shadow-md"
        {
            input type="hidden" name="tab" value=(tab.code());

            div
            {
                label for="filter-from" class=(FORM_LABEL_STYLE) { "De" }
                input
                    id="filter-from"
                    name="from"
                    type="date"
                    value=(filter.from)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="filter-to" class=(FORM_LABEL_STYLE) { "Até" }
                input
                    id="filter-to"
                    name="to"
                    type="date"
                    value=(filter.to)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="filter-search" class=(FORM_LABEL_STYLE) { "Buscar" }
                input
                    id="filter-search"
                    name="search"
                    type="search"
                    placeholder="Descrição"
                    value=(filter.search)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="filter-category" class=(FORM_LABEL_STYLE) { "Categoria" }
                select
                    id="filter-category"
                    name="category"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[filter.category.is_empty()] { "Todas" }

                    @for code in TRANSACTION_CATEGORIES {
                        option value=(code) selected[filter.category == code] {
                            (category_label(code))
                        }
                    }
                }
            }

            (clear_filter_view(tab, filter, false))
        }
    }
}

/// The slot for the link that resets the filter. It is empty while no filter
/// value has an effect.
fn clear_filter_view(tab: Tab, filter: &RecordFilter, out_of_band: bool) -> Markup {
    html! {
        div
            id=(FILTER_CLEAR_ID)
            hx-swap-oob=[out_of_band.then_some("true")]
            class="sm:col-span-2 lg:col-span-4 text-right"
        {
            @if !filter.is_empty() {
                a
                    href={ (endpoints::DASHBOARD_VIEW) "?tab=" (tab.code()) }
                    class="text-sm text-blue-600 hover:underline dark:text-blue-400"
                {
                    "Limpar filtros"
                }
            }
        }
    }
}

fn content_view(shell: &DashboardShell) -> Markup {
    let records = match shell.tab {
        Tab::Overview => overview_view(&compute_overview(&shell.transactions, &shell.bills)),
        Tab::Transactions => transaction_list_view(&shell.transactions),
        Tab::Bills => bill_list_view(&shell.bills, &shell.payment_methods),
        Tab::Accounts => chart_of_accounts_list_view(&shell.accounts),
        Tab::PaymentMethods => payment_method_list_view(&shell.payment_methods),
    };

    content_region(shell.tab, &shell.filter, records)
}

/// The content region, which re-fetches itself whenever a record is saved.
fn content_region(tab: Tab, filter: &RecordFilter, records: Markup) -> Markup {
    let content_url = format!(
        "{}?{}",
        endpoints::DASHBOARD_CONTENT,
        dashboard_query(tab, filter)
    );

    html! {
        div
            id=(DASHBOARD_CONTENT_ID)
            hx-get=(content_url)
            hx-trigger={ (RECORDS_CHANGED_EVENT) " from:body" }
            hx-target="this"
            hx-swap="outerHTML"
            hx-target-error={ "#" (ALERT_CONTAINER_ID) }
            class="w-full space-y-4"
        {
            div class="flex flex-wrap items-center justify-between gap-2"
            {
                h2 class="text-xl font-semibold" { (tab.label()) }

                div class="flex gap-2"
                {
                    @for (label, url) in new_record_links(tab) {
                        button
                            type="button"
                            hx-get=(url)
                            hx-target={ "#" (MODAL_CONTAINER_ID) }
                            hx-swap="innerHTML"
                            class=(NEW_RECORD_BUTTON_STYLE)
                        {
                            (label)
                        }
                    }
                }
            }

            (records)
        }
    }
}

fn new_record_links(tab: Tab) -> &'static [(&'static str, &'static str)] {
    match tab {
        Tab::Overview => &[
            ("Nova Transação", endpoints::NEW_TRANSACTION_VIEW),
            ("Nova Conta", endpoints::NEW_BILL_VIEW),
        ],
        Tab::Transactions => &[("Nova Transação", endpoints::NEW_TRANSACTION_VIEW)],
        Tab::Bills => &[("Nova Conta", endpoints::NEW_BILL_VIEW)],
        Tab::Accounts => &[("Nova Conta Contábil", endpoints::NEW_ACCOUNT_VIEW)],
        Tab::PaymentMethods => &[(
            "Nova Forma de Pagamento",
            endpoints::NEW_PAYMENT_METHOD_VIEW,
        )],
    }
}
