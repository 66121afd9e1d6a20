//! Application constants and configuration

pub const APP_NAME: &str = "People Table";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Page sizes offered by the page-size selector
pub const PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Global filter input limit, counted in characters
pub const FILTER_MAX_CHARS: usize = 20;
pub const FILTER_MAX_MESSAGE: &str = "Maximum 20 characters allowed";

/// Bundled sample rows
pub const SAMPLE_DATA_JSON: &str = include_str!("../data/sample_data.json");
