//! App module - the root composer: owns the rows and hands them to the table

pub mod sample_data;

use crate::settings::Settings;
use crate::table::DataTable;
use crate::theme;
use crate::types::{apply_edit, Column, Person, PersonField, RowEdit};
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Columns shown by the app, in display order
pub fn columns() -> Vec<Column<PersonField>> {
    vec![
        Column::new("ID", PersonField::Id),
        Column::new("Name", PersonField::Name).editable(),
        Column::new("Age", PersonField::Age).editable(),
        Column::new("Email", PersonField::Email),
    ]
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Single source of truth for row data; edits replace one record at a time
    pub(crate) rows: Arc<Vec<Person>>,
    pub(crate) table: DataTable<Person>,
    pub(crate) data_dir: PathBuf,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        rows: Vec<Person>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons for sort carets and pager buttons
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        debug!(rows = rows.len(), "Table populated");

        Self {
            rows: Arc::new(rows),
            table: DataTable::new(columns(), settings.page_size()),
            data_dir,
            window_pos: None,
            window_size: None,
            needs_center: false,
        }
    }

    pub(crate) fn apply_row_edit(&mut self, edit: RowEdit<Person>) {
        let id = edit.id;
        if apply_edit(&mut self.rows, edit) {
            debug!(id, "Row updated");
        } else {
            warn!(id, "Edit for unknown row ignored");
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            page_size: self.table.state().page_size.get(),
        };
        settings.save(&self.data_dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::filters::compute_view;
    use crate::table::state::{PageSize, TableAction};
    use crate::types::{person, Record};

    fn displayed_ages(rows: &[Person], table: &DataTable<Person>) -> Vec<(u64, u32)> {
        compute_view(rows, &columns(), table.state())
            .page_rows
            .iter()
            .map(|&i| (rows[i].id, rows[i].age))
            .collect()
    }

    #[test]
    fn columns_are_id_name_age_email() {
        let cols = columns();
        let labels: Vec<_> = cols.iter().map(|c| c.label).collect();
        assert_eq!(labels, ["ID", "Name", "Age", "Email"]);
        let editable: Vec<_> = cols.iter().filter(|c| c.editable).map(|c| c.field).collect();
        assert_eq!(editable, [PersonField::Name, PersonField::Age]);
    }

    #[test]
    fn edited_age_survives_a_resort() {
        let mut rows = Arc::new(vec![
            person(1, "Bob", 30, "b@x.com"),
            person(2, "Amy", 25, "a@x.com"),
        ]);
        let mut table = DataTable::new(columns(), PageSize::default());

        let updated = rows[1].with_value(PersonField::Age, "26").unwrap();
        assert!(apply_edit(&mut rows, RowEdit { id: 2, updated }));

        table.dispatch(TableAction::ToggleSort(PersonField::Name), &rows);
        assert_eq!(displayed_ages(&rows, &table), [(2, 26), (1, 30)]);

        table.dispatch(TableAction::ToggleSort(PersonField::Age), &rows);
        assert_eq!(displayed_ages(&rows, &table), [(2, 26), (1, 30)]);
    }

    #[test]
    fn dispatch_counts_filtered_rows_for_navigation() {
        let rows = sample_data::load().unwrap();
        let mut table = DataTable::new(columns(), PageSize::default());

        table.dispatch(TableAction::LastPage, &rows);
        assert_eq!(table.state().page_index, (rows.len() - 1) / 10);

        table.dispatch(TableAction::SetGlobalFilter("zzz".into()), &rows);
        table.dispatch(TableAction::LastPage, &rows);
        assert_eq!(table.state().page_index, 0);
    }
}
