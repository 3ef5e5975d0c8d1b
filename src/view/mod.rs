//! The fetch, filter and display pipeline shared by content pages
//!
//! A page owns one [`ListController`] per collection it shows (or a
//! [`DetailController`] for keyed lookups). Controllers keep the fetched
//! records and the selected filter apart, so a selection made before a
//! read resolves is never lost.

pub mod controller;
pub mod filter;
pub mod order;
pub mod state;

pub use controller::{DetailController, DetailView, ListController, ListView, LoadOutcome};
pub use filter::{apply_filter, derive_categories, Filter, ALL};
pub use order::sort_events;
pub use state::ViewState;
