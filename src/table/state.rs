//! View state and the reducer that drives it

use crate::constants::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
use crate::types::{SortDirection, SortSpec};
use std::num::IntErrorKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("unsupported page size {0}")]
    UnsupportedPageSize(usize),
}

/// Rows per page, limited to the selector's options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(usize);

impl PageSize {
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = TableError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        if PAGE_SIZE_OPTIONS.contains(&size) {
            Ok(Self(size))
        } else {
            Err(TableError::UnsupportedPageSize(size))
        }
    }
}

/// User intents the table reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction<F> {
    /// Cycle a column through unsorted, ascending, descending
    ToggleSort(F),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    /// Raw text of the go-to-page input, 1-indexed
    GotoPage(String),
    SetPageSize(PageSize),
    /// Validated filter text; empty clears the filter
    SetGlobalFilter(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState<F> {
    pub sort: Option<SortSpec<F>>,
    pub page_index: usize,
    pub page_size: PageSize,
    pub global_filter: Option<String>,
}

impl<F> ViewState<F> {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            sort: None,
            page_index: 0,
            page_size,
            global_filter: None,
        }
    }
}

impl<F> Default for ViewState<F> {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}

/// Number of pages for `row_count` rows. An empty table still has one page.
pub fn page_count(row_count: usize, page_size: PageSize) -> usize {
    row_count.div_ceil(page_size.get()).max(1)
}

/// Parse the go-to-page input into a zero-based index.
/// Anything that is not a positive number lands on the first page. Numbers
/// too large to parse saturate so the caller's clamp picks the last page.
pub fn parse_page_input(input: &str) -> usize {
    match input.trim().parse::<u64>() {
        Ok(page) => usize::try_from(page.saturating_sub(1)).unwrap_or(usize::MAX),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => usize::MAX,
        Err(_) => 0,
    }
}

impl<F: Copy + PartialEq> ViewState<F> {
    /// Compute the next view state. `row_count` is the number of rows that pass
    /// the current filter.
    pub fn reduce(mut self, action: TableAction<F>, row_count: usize) -> Self {
        let last_page = page_count(row_count, self.page_size) - 1;
        // Rows may have left the filter since the last action
        self.page_index = self.page_index.min(last_page);
        match action {
            TableAction::ToggleSort(field) => {
                self.sort = match self.sort {
                    Some(spec) if spec.field == field => match spec.direction {
                        SortDirection::Ascending => Some(SortSpec {
                            field,
                            direction: SortDirection::Descending,
                        }),
                        SortDirection::Descending => None,
                    },
                    _ => Some(SortSpec {
                        field,
                        direction: SortDirection::Ascending,
                    }),
                };
                self.page_index = 0;
            }
            TableAction::FirstPage => self.page_index = 0,
            TableAction::PreviousPage => self.page_index = self.page_index.saturating_sub(1),
            TableAction::NextPage => self.page_index = (self.page_index + 1).min(last_page),
            TableAction::LastPage => self.page_index = last_page,
            TableAction::GotoPage(input) => {
                self.page_index = parse_page_input(&input).min(last_page)
            }
            TableAction::SetPageSize(size) => {
                let top_row = self.page_index * self.page_size.get();
                self.page_size = size;
                self.page_index = (top_row / size.get()).min(page_count(row_count, size) - 1);
            }
            TableAction::SetGlobalFilter(text) => {
                self.global_filter = if text.is_empty() { None } else { Some(text) };
                self.page_index = 0;
            }
        }
        self
    }
}
