//! folio: scroll-tracking navigation for sectioned portfolio pages.
//!
//! A markdown page is split into sections, laid out as terminal rows, and presented with a fixed
//! header whose links follow the scroll position. The navigation core is headless; the ratatui UI
//! is one surface over it.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod error;
pub mod form;
pub mod formats;
pub mod input;
pub mod layout;
pub mod logging;
pub mod menu;
pub mod navigation;
pub mod page;
pub mod reveal;
pub mod scheduler;
pub mod scroll;
pub mod section;
pub mod theme;
pub mod ui;
