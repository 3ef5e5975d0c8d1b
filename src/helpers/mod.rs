//! Helper functions shared by templates, pages and the exporter

mod date;
mod url;

pub use date::*;
pub use url::*;
