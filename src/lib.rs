// Webring - Core Library
// Exposes the data model, loader, grouping engine, and validator for use in
// the CLI, the proxy server, and tests

pub mod entry;
pub mod loader;
pub mod render;
pub mod validator;

// Re-export commonly used types
pub use entry::{Dataset, Entry, YearGroup, ABOUT_MAX_LENGTH, REQUIRED_FIELDS, YEAR_MAX, YEAR_MIN};
pub use loader::{parse_dataset, parse_wrapped, Source, WebringError};
pub use render::{format_directory, group_by_year, render};
pub use validator::{validate, ValidationResult, Violation};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
