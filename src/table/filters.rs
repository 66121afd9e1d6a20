//! Filtering, sorting and pagination of rows

use super::state::{page_count, ViewState};
use crate::types::{Column, Record, SortDirection};

/// The rows to draw for one view state, as indices into the input slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Rows on the current page, in display order
    pub page_rows: Vec<usize>,
    /// Rows passing the global filter, across all pages
    pub filtered_count: usize,
    /// Effective page index, clamped to the available pages
    pub page_index: usize,
    pub page_count: usize,
}

impl TableView {
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}

/// True when any column's rendered value contains `query_lower`.
fn matches_filter<R: Record>(row: &R, columns: &[Column<R::Field>], query_lower: &str) -> bool {
    columns.iter().any(|c| {
        row.value(c.field)
            .to_string()
            .to_lowercase()
            .contains(query_lower)
    })
}

/// Indices of rows passing the global filter, in input order.
pub fn filter_rows<R: Record>(
    rows: &[R],
    columns: &[Column<R::Field>],
    filter: Option<&str>,
) -> Vec<usize> {
    match filter {
        Some(query) if !query.is_empty() => {
            let query_lower = query.to_lowercase();
            rows.iter()
                .enumerate()
                .filter(|(_, row)| matches_filter(*row, columns, &query_lower))
                .map(|(i, _)| i)
                .collect()
        }
        _ => (0..rows.len()).collect(),
    }
}

/// Apply filter, sort and pagination from `state` to `rows`.
pub fn compute_view<R: Record>(
    rows: &[R],
    columns: &[Column<R::Field>],
    state: &ViewState<R::Field>,
) -> TableView {
    let mut indices = filter_rows(rows, columns, state.global_filter.as_deref());

    // Stable sort keeps input order among equal values
    if let Some(spec) = state.sort {
        indices.sort_by(|&a, &b| {
            let cmp = rows[a].value(spec.field).compare(&rows[b].value(spec.field));
            if spec.direction == SortDirection::Descending {
                cmp.reverse()
            } else {
                cmp
            }
        });
    }

    let filtered_count = indices.len();
    let page_size = state.page_size.get();
    let page_count = page_count(filtered_count, state.page_size);
    let page_index = state.page_index.min(page_count - 1);

    let page_rows = indices
        .into_iter()
        .skip(page_index * page_size)
        .take(page_size)
        .collect();

    TableView {
        page_rows,
        filtered_count,
        page_index,
        page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::state::{PageSize, TableAction};
    use crate::types::{person, Person, PersonField};

    fn columns() -> Vec<Column<PersonField>> {
        vec![
            Column::new("ID", PersonField::Id),
            Column::new("Name", PersonField::Name).editable(),
            Column::new("Age", PersonField::Age).editable(),
            Column::new("Email", PersonField::Email),
        ]
    }

    fn crowd(n: u64) -> Vec<Person> {
        (1..=n)
            .map(|i| person(i, &format!("Person {}", i), 20 + (i % 7) as u32, &format!("p{}@x.com", i)))
            .collect()
    }

    fn names(rows: &[Person], view: &TableView) -> Vec<String> {
        view.page_rows.iter().map(|&i| rows[i].name.clone()).collect()
    }

    #[test]
    fn pages_partition_the_filtered_rows() {
        let rows = crowd(47);
        let cols = columns();
        for size in [10, 20, 30, 40, 50] {
            for filter in [None, Some("1"), Some("PERSON 4")] {
                let mut state = ViewState::new(PageSize::try_from(size).unwrap());
                state.global_filter = filter.map(String::from);
                let first = compute_view(&rows, &cols, &state);

                let mut seen = 0;
                for page in 0..first.page_count {
                    state.page_index = page;
                    let view = compute_view(&rows, &cols, &state);
                    assert!(view.page_rows.len() <= size);
                    seen += view.page_rows.len();
                }
                assert_eq!(seen, first.filtered_count);
            }
        }
    }

    #[test]
    fn filter_is_case_insensitive_across_columns() {
        let rows = vec![
            person(1, "Bob", 30, "b@x.com"),
            person(2, "Amy", 25, "a@x.com"),
            person(3, "Carl", 52, "carl@example.org"),
        ];
        let cols = columns();
        let view = |q: &str| {
            let state = ViewState::default().reduce(TableAction::SetGlobalFilter(q.into()), rows.len());
            names(&rows, &compute_view(&rows, &cols, &state))
        };
        assert_eq!(view("AMY"), vec!["Amy"]);
        assert_eq!(view("x.com"), vec!["Bob", "Amy"]);
        // Numbers match on their rendered text
        assert_eq!(view("5"), vec!["Amy", "Carl"]);
        assert_eq!(view(""), vec!["Bob", "Amy", "Carl"]);
    }

    #[test]
    fn name_header_click_sorts_ascending() {
        let rows = vec![person(1, "Bob", 30, "b@x.com"), person(2, "Amy", 25, "a@x.com")];
        let state = ViewState::default().reduce(TableAction::ToggleSort(PersonField::Name), 2);
        let view = compute_view(&rows, &columns(), &state);
        assert_eq!(names(&rows, &view), vec!["Amy", "Bob"]);
        assert_eq!(rows[view.page_rows[0]].age, 25);
    }

    #[test]
    fn sort_cycle_orders_the_page() {
        let rows = vec![
            person(1, "Bob", 30, "b@x.com"),
            person(2, "Amy", 9, "a@x.com"),
            person(3, "Cid", 100, "c@x.com"),
        ];
        let cols = columns();
        let ages = |state: &ViewState<PersonField>| -> Vec<u32> {
            compute_view(&rows, &cols, state)
                .page_rows
                .iter()
                .map(|&i| rows[i].age)
                .collect()
        };

        let s = ViewState::default();
        assert_eq!(ages(&s), vec![30, 9, 100]);
        let s = s.reduce(TableAction::ToggleSort(PersonField::Age), 3);
        assert_eq!(ages(&s), vec![9, 30, 100]);
        let s = s.reduce(TableAction::ToggleSort(PersonField::Age), 3);
        assert_eq!(ages(&s), vec![100, 30, 9]);
        let s = s.reduce(TableAction::ToggleSort(PersonField::Age), 3);
        assert_eq!(ages(&s), vec![30, 9, 100]);
    }

    #[test]
    fn sort_applies_after_filter() {
        let rows = crowd(30);
        let state = ViewState::default()
            .reduce(TableAction::SetGlobalFilter("person 2".into()), 30)
            .reduce(TableAction::ToggleSort(PersonField::Id), 11)
            .reduce(TableAction::ToggleSort(PersonField::Id), 11);
        let view = compute_view(&rows, &columns(), &state);
        // "Person 2" and "Person 20".."Person 29"
        assert_eq!(view.filtered_count, 11);
        assert_eq!(view.page_count, 2);
        assert_eq!(rows[view.page_rows[0]].id, 29);
        assert_eq!(view.page_rows.len(), 10);
    }

    #[test]
    fn no_matches_renders_an_empty_first_page() {
        let rows = crowd(12);
        let state = ViewState::default()
            .reduce(TableAction::LastPage, 12)
            .reduce(TableAction::SetGlobalFilter("zzz".into()), 12);
        let view = compute_view(&rows, &columns(), &state);
        assert!(view.page_rows.is_empty());
        assert_eq!(view.filtered_count, 0);
        assert_eq!((view.page_index + 1, view.page_count), (1, 1));
    }

    #[test]
    fn stale_page_index_is_clamped() {
        let rows = crowd(12);
        let mut state = ViewState::default();
        state.page_index = 7;
        let view = compute_view(&rows, &columns(), &state);
        assert_eq!(view.page_index, 1);
        assert_eq!(view.page_rows.len(), 2);
        assert!(view.can_previous_page());
        assert!(!view.can_next_page());
    }
}
