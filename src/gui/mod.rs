//! GUI shell around the loader, mapper, and export logic.

mod app;
mod theme;

pub use app::{run, TableExtractorApp};
