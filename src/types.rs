//! Common types and data structures

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use thiserror::Error;

/// Unique, stable row identifier
pub type RowId = u64;

/// A single rendered cell value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Wide enough for every `u64` and `i64`
    Number(i128),
    Text(String),
}

impl CellValue {
    /// Numbers compare numerically, text lexicographically.
    /// Mixed pairs fall back to their rendered text.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// Rejected inline cell edit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("{field} must be a whole number, got {input:?}")]
    NotANumber { field: &'static str, input: String },
    #[error("{0} is read-only")]
    ReadOnly(&'static str),
}

/// A row type the table can display and edit.
///
/// `Field` is the set of keys the record exposes, so column descriptors can
/// only reference fields that exist on the record.
pub trait Record: Clone {
    type Field: Copy + Eq + Hash + fmt::Debug;

    fn id(&self) -> RowId;

    fn value(&self, field: Self::Field) -> CellValue;

    /// Returns a copy of the record with `field` replaced by the parsed `input`.
    fn with_value(&self, field: Self::Field, input: &str) -> Result<Self, EditError>;
}

/// Column descriptor: header label plus the record field it reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<F> {
    pub label: &'static str,
    pub field: F,
    pub editable: bool,
}

impl<F> Column<F> {
    pub fn new(label: &'static str, field: F) -> Self {
        Self {
            label,
            field,
            editable: false,
        }
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }
}

/// Sort direction for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Active sort: which field and which way
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// An edited record produced by the table, to be written back by the owner of the rows
#[derive(Debug, Clone, PartialEq)]
pub struct RowEdit<R> {
    pub id: RowId,
    pub updated: R,
}

/// Write `edit` into `rows`, cloning the collection only if it is shared.
/// Returns false when no row carries the edited id.
pub fn apply_edit<R: Record>(rows: &mut Arc<Vec<R>>, edit: RowEdit<R>) -> bool {
    let Some(pos) = rows.iter().position(|r| r.id() == edit.id) else {
        return false;
    };
    Arc::make_mut(rows)[pos] = edit.updated;
    true
}

/// Sample record shown by the app
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: RowId,
    pub name: String,
    pub age: u32,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    Id,
    Name,
    Age,
    Email,
}

impl Record for Person {
    type Field = PersonField;

    fn id(&self) -> RowId {
        self.id
    }

    fn value(&self, field: PersonField) -> CellValue {
        match field {
            PersonField::Id => CellValue::Number(i128::from(self.id)),
            PersonField::Name => CellValue::Text(self.name.clone()),
            PersonField::Age => CellValue::Number(i128::from(self.age)),
            PersonField::Email => CellValue::Text(self.email.clone()),
        }
    }

    fn with_value(&self, field: PersonField, input: &str) -> Result<Self, EditError> {
        let mut updated = self.clone();
        match field {
            PersonField::Name => updated.name = input.to_string(),
            PersonField::Age => {
                updated.age = input.trim().parse().map_err(|_| EditError::NotANumber {
                    field: "age",
                    input: input.to_string(),
                })?
            }
            PersonField::Email => updated.email = input.to_string(),
            PersonField::Id => return Err(EditError::ReadOnly("id")),
        }
        Ok(updated)
    }
}

#[cfg(test)]
pub(crate) fn person(id: RowId, name: &str, age: u32, email: &str) -> Person {
    Person {
        id,
        name: name.to_string(),
        age,
        email: email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_numerically() {
        let nine = CellValue::Number(9);
        let thirty = CellValue::Number(30);
        assert_eq!(nine.compare(&thirty), Ordering::Less);
        // As text "9" would sort after "30"
        assert_eq!(
            CellValue::Text("9".into()).compare(&CellValue::Text("30".into())),
            Ordering::Greater
        );
    }

    #[test]
    fn largest_ids_sort_last() {
        let low = person(1, "Bob", 30, "b@x.com");
        let high = person(u64::MAX, "Amy", 25, "a@x.com");
        assert_eq!(
            low.value(PersonField::Id).compare(&high.value(PersonField::Id)),
            Ordering::Less
        );
        assert_eq!(high.value(PersonField::Id).to_string(), u64::MAX.to_string());
    }

    #[test]
    fn age_edit_requires_a_number() {
        let p = person(2, "Amy", 25, "a@x.com");
        assert_eq!(p.with_value(PersonField::Age, "26").unwrap().age, 26);
        assert!(matches!(
            p.with_value(PersonField::Age, "2x"),
            Err(EditError::NotANumber { field: "age", .. })
        ));
        assert_eq!(
            p.with_value(PersonField::Id, "7"),
            Err(EditError::ReadOnly("id"))
        );
    }

    #[test]
    fn apply_edit_replaces_only_the_matching_row() {
        let mut rows = Arc::new(vec![
            person(1, "Bob", 30, "b@x.com"),
            person(2, "Amy", 25, "a@x.com"),
        ]);
        let snapshot = Arc::clone(&rows);
        let updated = rows[1].with_value(PersonField::Age, "26").unwrap();

        assert!(apply_edit(&mut rows, RowEdit { id: 2, updated }));
        assert_eq!(rows[1].age, 26);
        assert_eq!(rows[0], snapshot[0]);
        // The shared snapshot was copied, not mutated
        assert_eq!(snapshot[1].age, 25);
    }

    #[test]
    fn apply_edit_ignores_unknown_ids() {
        let mut rows = Arc::new(vec![person(1, "Bob", 30, "b@x.com")]);
        let stray = person(9, "Zed", 40, "z@x.com");
        assert!(!apply_edit(&mut rows, RowEdit { id: 9, updated: stray }));
        assert_eq!(rows.len(), 1);
    }
}
