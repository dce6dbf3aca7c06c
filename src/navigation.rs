//! The tab bar at the top of the dashboard.

use maud::{Markup, html};

use crate::{
    dashboard::{Tab, dashboard_query},
    endpoints,
    filter::RecordFilter,
};

/// A link in the tab bar.
///
/// It will change appearance if `is_current` is set to `true`. Only one link
/// should be set as current at any one time.
struct Link {
    url: String,
    title: &'static str,
    is_current: bool,
}

impl Link {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "inline-block p-4 text-blue-600 border-b-2 border-blue-600 rounded-t-lg
            dark:text-blue-500 dark:border-blue-500"
        } else {
            "inline-block p-4 border-b-2 border-transparent rounded-t-lg
            hover:text-gray-600 hover:border-gray-300 dark:hover:text-gray-300"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

/// The id of the tab bar, used to replace it out of band.
pub const TAB_BAR_ID: &str = "tab-bar";

pub struct TabBar {
    links: Vec<Link>,
    out_of_band: bool,
}

impl TabBar {
    /// Get the tab bar with `current` marked as the active tab.
    ///
    /// The links keep `filter` so that switching tabs does not reset it.
    pub fn new(current: Tab, filter: &RecordFilter) -> Self {
        let links = Tab::ALL
            .into_iter()
            .map(|tab| Link {
                url: format!(
                    "{}?{}",
                    endpoints::DASHBOARD_VIEW,
                    dashboard_query(tab, filter)
                ),
                title: tab.label(),
                is_current: tab == current,
            })
            .collect();

        Self {
            links,
            out_of_band: false,
        }
    }

    /// Render the tab bar as an htmx out-of-band swap, so a fragment response
    /// can refresh the filter carried by the links.
    pub fn out_of_band(self) -> Self {
        Self {
            out_of_band: true,
            ..self
        }
    }

    pub fn into_html(self) -> Markup {
        html!(
            nav
                id=(TAB_BAR_ID)
                hx-swap-oob=[self.out_of_band.then_some("true")]
                class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div class="max-w-screen-xl mx-auto px-4 pt-4"
                {
                    span
                        class="block mb-2 text-2xl font-semibold whitespace-nowrap dark:text-white"
                    {
                        "Sistema Financeiro"
                    }

                    ul
                        class="flex flex-wrap -mb-px text-sm font-medium text-center
                        text-gray-500 border-b border-gray-200 dark:text-gray-400
                        dark:border-gray-700"
                    {
                        @for link in self.links {
                            li class="me-2" { (link.into_html()) }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod tab_bar_tests {
    use scraper::{Html, Selector};

    use crate::{dashboard::Tab, filter::RecordFilter};

    use super::TabBar;

    #[test]
    fn marks_current_tab_and_keeps_filter() {
        let filter = RecordFilter {
            from: "2024-01-01".to_owned(),
            ..Default::default()
        };

        let html = Html::parse_fragment(&TabBar::new(Tab::Bills, &filter).into_html().into_string());

        let links = html
            .select(&Selector::parse("a").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(links.len(), Tab::ALL.len());

        let current = html
            .select(&Selector::parse("a[aria-current=page]").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].text().collect::<String>().trim(), "Contas a Pagar");
        assert_eq!(
            current[0].value().attr("href"),
            Some("/dashboard?tab=bills&from=2024-01-01")
        );
    }

    #[test]
    fn out_of_band_tab_bar_is_marked_for_swap() {
        let markup = TabBar::new(Tab::Overview, &RecordFilter::default())
            .out_of_band()
            .into_html()
            .into_string();
        let html = Html::parse_fragment(&markup);

        let nav = html
            .select(&Selector::parse("nav#tab-bar").unwrap())
            .next()
            .expect("No tab bar found");
        assert_eq!(nav.value().attr("hx-swap-oob"), Some("true"));
    }
}
