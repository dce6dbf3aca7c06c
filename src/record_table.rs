//! Tabular views over a sequence of records.
//!
//! A list is described by its columns, each a (key, label, formatter) triple.
//! [project] maps the records to display rows without reordering them, and
//! [table_view] renders the rows as an HTML table.

use maud::{Markup, html};

use crate::html::{
    ALERT_CONTAINER_ID, LINK_STYLE, MODAL_CONTAINER_ID, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
    TABLE_ROW_STYLE,
};

/// Text of the row shown when a list has no records.
pub const EMPTY_LIST_TEXT: &str = "Nenhum registro encontrado.";

/// A column of a record list.
pub struct Column<'a, T> {
    pub key: &'static str,
    pub label: &'static str,
    format: Box<dyn Fn(&T) -> String + 'a>,
}

impl<'a, T> Column<'a, T> {
    pub fn new(key: &'static str, label: &'static str, format: impl Fn(&T) -> String + 'a) -> Self {
        Self {
            key,
            label,
            format: Box::new(format),
        }
    }

    pub fn format(&self, record: &T) -> String {
        (self.format)(record)
    }
}

/// A formatted record, one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub cells: Vec<String>,
    /// Opens the record's edit dialog.
    pub edit_url: String,
}

/// Format each record with `columns`, keeping the order of `records`.
pub fn project<T>(
    records: &[T],
    columns: &[Column<'_, T>],
    edit_url: impl Fn(&T) -> String,
) -> Vec<DisplayRow> {
    records
        .iter()
        .map(|record| DisplayRow {
            cells: columns.iter().map(|column| column.format(record)).collect(),
            edit_url: edit_url(record),
        })
        .collect()
}

pub fn table_view<T>(columns: &[Column<'_, T>], rows: &[DisplayRow]) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md rounded w-full"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for column in columns {
                            th scope="col" class=(TABLE_CELL_STYLE) data-key=(column.key) {
                                (column.label)
                            }
                        }

                        th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Ações" } }
                    }
                }

                tbody
                {
                    @for row in rows {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            @for cell in &row.cells {
                                td class=(TABLE_CELL_STYLE) { (cell) }
                            }

                            td class=(TABLE_CELL_STYLE)
                            {
                                button
                                    type="button"
                                    hx-get=(row.edit_url)
                                    hx-target={ "#" (MODAL_CONTAINER_ID) }
                                    hx-swap="innerHTML"
                                    hx-target-error={ "#" (ALERT_CONTAINER_ID) }
                                    class=(LINK_STYLE)
                                {
                                    "Editar"
                                }
                            }
                        }
                    }

                    @if rows.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan=(columns.len() + 1) class={ (TABLE_CELL_STYLE) " text-center" }
                            {
                                (EMPTY_LIST_TEXT)
                            }
                        }
                    }
                }
            }
        }
    }
}
