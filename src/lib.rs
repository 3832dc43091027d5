//! Validate `.env` files and derive schemas and diffs from them.
//!
//! Parsing never stops at a bad line. Every finding is collected as an
//! [`Issue`] and routed to the report's `errors` or `warnings` depending on
//! [`Mode`]; only failing to read the input is an [`Error`].
//!
//! ```
//! let report = envdoc::parse_str("PORT=8080\nPORT=9090\n");
//! assert_eq!(report.env.value("PORT"), Some("8080"));
//! assert_eq!(report.warnings.len(), 1);
//! ```

pub mod diff;
mod error;
mod issue;
mod loader;
mod model;
mod parser;
pub mod render;
pub mod schema;
pub mod secrets;

pub use error::Error;
pub use issue::{Condition, Issue, IssueKind, Severity, classify};
pub use loader::{EnvLoader, from_path, from_path_with_mode};
pub use model::{EnvMap, Entry, Mode, ParseReport};
pub use parser::{
    parse_bytes, parse_bytes_with_mode, parse_reader, parse_reader_with_mode, parse_str,
    parse_str_with_mode,
};
