//! Table component - owns view state and the search form, renders rows handed to it

pub mod filters;
pub mod form;
pub mod state;

use crate::constants::PAGE_SIZE_OPTIONS;
use crate::theme;
use crate::types::{Column, Record, RowEdit, RowId};
use crate::ui::components::{header_label, icon_button};
use eframe::egui;
use filters::{compute_view, filter_rows, TableView};
use form::{FilterForm, FormPhase};
use state::{PageSize, TableAction, ViewState};
use std::collections::HashMap;
use tracing::debug;

pub struct DataTable<R: Record> {
    columns: Vec<Column<R::Field>>,
    state: ViewState<R::Field>,
    form: FilterForm,
    page_input: String,
    // Text of edited cells, kept while their input has focus
    edit_buffers: HashMap<(RowId, R::Field), String>,
}

impl<R: Record> DataTable<R> {
    pub fn new(columns: Vec<Column<R::Field>>, page_size: PageSize) -> Self {
        Self {
            columns,
            state: ViewState::new(page_size),
            form: FilterForm::default(),
            page_input: "1".to_string(),
            edit_buffers: HashMap::new(),
        }
    }

    pub fn state(&self) -> &ViewState<R::Field> {
        &self.state
    }

    /// Reduce `action` against the rows that currently pass the filter.
    pub fn dispatch(&mut self, action: TableAction<R::Field>, rows: &[R]) {
        let filtered = filter_rows(rows, &self.columns, self.state.global_filter.as_deref()).len();
        debug!(?action, filtered, "Table action");

        let typed_page = matches!(action, TableAction::GotoPage(_));
        self.state = std::mem::take(&mut self.state).reduce(action, filtered);
        if !typed_page {
            self.page_input = (self.state.page_index + 1).to_string();
        }
        // Cells left on screen are redrawn from their records
        self.edit_buffers.clear();
    }

    /// Compute the visible page. When the rows changed under the view (an
    /// edit moved rows out of the filter) the stored page index follows the
    /// clamped one.
    pub fn view(&mut self, rows: &[R]) -> TableView {
        let view = compute_view(rows, &self.columns, &self.state);
        if view.page_index != self.state.page_index {
            debug!(
                from = self.state.page_index,
                to = view.page_index,
                "Page index clamped"
            );
            self.state.page_index = view.page_index;
            self.page_input = (view.page_index + 1).to_string();
        }
        view
    }

    /// Validate the search text and queue it as the new filter.
    /// A rejected submit queues nothing, so the visible rows stay as they are.
    fn submit_filter(&mut self, actions: &mut Vec<TableAction<R::Field>>) {
        if let Some(text) = self.form.submit() {
            actions.push(TableAction::SetGlobalFilter(text));
        }
    }

    /// Draw the search form, the table and the pagination bar.
    /// Returns the edited record when a cell input produced a valid value.
    pub fn show(&mut self, ui: &mut egui::Ui, rows: &[R]) -> Option<RowEdit<R>> {
        let mut actions = Vec::new();

        self.search_form(ui, &mut actions);
        ui.add_space(theme::SPACING_LG);

        let view = self.view(rows);
        let edit = theme::table_frame()
            .show(ui, |ui| self.table(ui, rows, &view, &mut actions))
            .inner;

        ui.add_space(theme::SPACING_LG);
        self.pagination_bar(ui, &view, &mut actions);

        for action in actions {
            self.dispatch(action, rows);
        }
        edit
    }

    fn search_form(&mut self, ui: &mut egui::Ui, actions: &mut Vec<TableAction<R::Field>>) {
        let border = if self.form.error().is_some() {
            theme::STATUS_ERROR
        } else {
            theme::BORDER_SUBTLE
        };
        let mut submitted = false;

        ui.horizontal(|ui| {
            egui::Frame::new()
                .fill(theme::BG_INPUT)
                .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, border))
                .corner_radius(theme::RADIUS_DEFAULT)
                .inner_margin(egui::Margin::symmetric(8, 6))
                .show(ui, |ui| {
                    ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(egui_phosphor::regular::MAGNIFYING_GLASS)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_DIM),
                        )
                        .selectable(false),
                    );
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.form.input)
                            .id(egui::Id::new("global_filter"))
                            .hint_text("Search...")
                            .frame(false)
                            .desired_width(theme::SEARCH_WIDTH),
                    );
                    if response.changed() {
                        self.form.on_edit();
                    }
                    // Enter submits, like a form
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submitted = true;
                    }
                });

            if ui.add(theme::button_accent("Search")).clicked() {
                submitted = true;
            }
        });

        if submitted {
            self.submit_filter(actions);
        }

        if let Some(err) = self.form.error() {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(err.to_string())
                        .size(theme::FONT_SMALL)
                        .color(theme::STATUS_ERROR),
                )
                .selectable(false),
            );
        } else if self.form.phase() == FormPhase::Dirty {
            ui.add(
                egui::Label::new(
                    egui::RichText::new("Press Enter or Search to apply")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        }
    }

    fn table(
        &mut self,
        ui: &mut egui::Ui,
        rows: &[R],
        view: &TableView,
        actions: &mut Vec<TableAction<R::Field>>,
    ) -> Option<RowEdit<R>> {
        use egui_extras::{Column as TableColumn, TableBuilder};

        let mut edit = None;
        let max_height = (ui.available_height() - theme::PAGER_HEIGHT).max(theme::ROW_HEIGHT);
        let sort = self.state.sort;
        let columns = &self.columns;
        let buffers = &mut self.edit_buffers;

        let mut table = TableBuilder::new(ui)
            .id_salt("data_table")
            .striped(true)
            .resizable(false)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .max_scroll_height(max_height)
            .auto_shrink([false, true]);
        for _ in columns {
            table = table.column(TableColumn::remainder().at_least(80.0).clip(true));
        }

        table
            .header(theme::HEADER_HEIGHT, |mut header| {
                for column in columns {
                    header.col(|ui| {
                        let direction = sort
                            .filter(|s| s.field == column.field)
                            .map(|s| s.direction);
                        if header_label(ui, column.label, direction).clicked() {
                            actions.push(TableAction::ToggleSort(column.field));
                        }
                    });
                }
            })
            .body(|body| {
                body.rows(theme::ROW_HEIGHT, view.page_rows.len(), |mut row| {
                    let record = &rows[view.page_rows[row.index()]];
                    for column in columns {
                        row.col(|ui| {
                            if column.editable {
                                if let Some(updated) = edit_cell(ui, buffers, record, column.field) {
                                    edit = Some(RowEdit {
                                        id: record.id(),
                                        updated,
                                    });
                                }
                            } else {
                                ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(record.value(column.field).to_string())
                                            .size(theme::FONT_LABEL)
                                            .color(theme::TEXT_SECONDARY),
                                    )
                                    .truncate()
                                    .selectable(false),
                                );
                            }
                        });
                    }
                });
            });

        edit
    }

    fn pagination_bar(
        &mut self,
        ui: &mut egui::Ui,
        view: &TableView,
        actions: &mut Vec<TableAction<R::Field>>,
    ) {
        use egui_phosphor::regular as icons;

        let can_previous = view.can_previous_page();
        let can_next = view.can_next_page();

        ui.horizontal(|ui| {
            if icon_button(ui, icons::CARET_DOUBLE_LEFT, can_previous, "First page").clicked() {
                actions.push(TableAction::FirstPage);
            }
            if icon_button(ui, icons::CARET_LEFT, can_previous, "Previous page").clicked() {
                actions.push(TableAction::PreviousPage);
            }
            if icon_button(ui, icons::CARET_RIGHT, can_next, "Next page").clicked() {
                actions.push(TableAction::NextPage);
            }
            if icon_button(ui, icons::CARET_DOUBLE_RIGHT, can_next, "Last page").clicked() {
                actions.push(TableAction::LastPage);
            }

            ui.add_space(theme::SPACING_MD);
            ui.label(egui::RichText::new("Page").color(theme::TEXT_MUTED));
            ui.label(
                egui::RichText::new(format!("{} of {}", view.page_index + 1, view.page_count))
                    .strong(),
            );

            ui.separator();
            ui.label(egui::RichText::new("Go to page:").color(theme::TEXT_MUTED));
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.page_input)
                    .id(egui::Id::new("page_jump"))
                    .desired_width(theme::PAGE_INPUT_WIDTH),
            );
            if response.changed() {
                actions.push(TableAction::GotoPage(self.page_input.clone()));
            }

            ui.separator();
            let current = self.state.page_size.get();
            egui::ComboBox::from_id_salt("page_size")
                .selected_text(format!("Show {}", current))
                .show_ui(ui, |ui| {
                    for size in PAGE_SIZE_OPTIONS {
                        let selected = size == current;
                        if ui.selectable_label(selected, format!("Show {}", size)).clicked()
                            && !selected
                        {
                            if let Ok(page_size) = PageSize::try_from(size) {
                                actions.push(TableAction::SetPageSize(page_size));
                            }
                        }
                    }
                });
        });
    }
}

/// Text input for an editable cell. Returns the updated record when the
/// typed text parses for `field`.
fn edit_cell<R: Record>(
    ui: &mut egui::Ui,
    buffers: &mut HashMap<(RowId, R::Field), String>,
    record: &R,
    field: R::Field,
) -> Option<R> {
    let key = (record.id(), field);
    let mut text = buffers
        .get(&key)
        .cloned()
        .unwrap_or_else(|| record.value(field).to_string());
    let rejected = buffers
        .contains_key(&key)
        .then(|| record.with_value(field, &text).err())
        .flatten();

    let stroke = if rejected.is_some() {
        theme::STATUS_ERROR
    } else {
        theme::BORDER_SUBTLE
    };
    let mut response = egui::Frame::new()
        .fill(theme::BG_INPUT)
        .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, stroke))
        .corner_radius(theme::RADIUS_SMALL)
        .inner_margin(egui::Margin::symmetric(4, 2))
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut text)
                    .id(egui::Id::new(("cell", key)))
                    .frame(false)
                    .desired_width(ui.available_width()),
            )
        })
        .inner;
    if let Some(err) = &rejected {
        response = response.on_hover_text(err.to_string());
    }

    if response.changed() {
        let updated = match record.with_value(field, &text) {
            Ok(updated) => Some(updated),
            Err(e) => {
                debug!(row = key.0, error = %e, "Cell edit rejected");
                None
            }
        };
        buffers.insert(key, text);
        updated
    } else {
        if !response.has_focus() {
            buffers.remove(&key);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{person, Person, PersonField};

    fn columns() -> Vec<Column<PersonField>> {
        vec![
            Column::new("ID", PersonField::Id),
            Column::new("Name", PersonField::Name).editable(),
            Column::new("Age", PersonField::Age).editable(),
            Column::new("Email", PersonField::Email),
        ]
    }

    // Names carry an "a", nothing else does
    fn anns(n: u64) -> Vec<Person> {
        (1..=n)
            .map(|i| person(i, &format!("Ann {}", i), 30, &format!("u{}@x.io", i)))
            .collect()
    }

    fn visible_ids(table: &mut DataTable<Person>, rows: &[Person]) -> Vec<RowId> {
        table.view(rows).page_rows.iter().map(|&i| rows[i].id).collect()
    }

    #[test]
    fn rows_leaving_the_filter_pull_the_page_back() {
        let mut rows = anns(15);
        let mut table = DataTable::new(columns(), PageSize::default());
        table.dispatch(TableAction::SetGlobalFilter("a".into()), &rows);
        table.dispatch(TableAction::LastPage, &rows);
        assert_eq!(table.state().page_index, 1);

        // Everything on page 2 is renamed out of the filter
        for row in &mut rows[10..] {
            row.name = "Bob".into();
        }

        let view = table.view(&rows);
        assert_eq!((view.page_index, view.page_count), (0, 1));
        assert!(!view.can_previous_page());
        assert!(!view.can_next_page());
        assert_eq!(table.state().page_index, 0);
        assert_eq!(table.page_input, "1");
        assert_eq!(visible_ids(&mut table, &rows), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn rejected_filter_leaves_rows_unchanged() {
        let rows = anns(15);
        let mut table = DataTable::new(columns(), PageSize::default());
        let before = visible_ids(&mut table, &rows);

        let mut actions = Vec::new();
        table.form.input = "x".repeat(21);
        table.form.on_edit();
        table.submit_filter(&mut actions);
        assert!(actions.is_empty());
        assert!(table.form.error().is_some());
        assert_eq!(table.state().global_filter, None);
        assert_eq!(visible_ids(&mut table, &rows), before);

        table.form.input = "ann 1".into();
        table.form.on_edit();
        table.submit_filter(&mut actions);
        assert_eq!(actions, [TableAction::SetGlobalFilter("ann 1".into())]);
    }

    #[test]
    fn navigation_drops_pending_cell_text() {
        let rows = anns(15);
        let mut table = DataTable::new(columns(), PageSize::default());
        table
            .edit_buffers
            .insert((3, PersonField::Age), "thirty".into());

        table.dispatch(TableAction::NextPage, &rows);
        assert!(table.edit_buffers.is_empty());
    }
}
