//! Table extractor - pull City / Region / State columns out of tabular files.
//!
//! # Features
//! - CSV / Excel / HTML / PDF table loading
//! - Synonym-based column detection with an address-parsing fallback
//! - Column picker with a 50-row preview
//! - One-shot CSV export

pub mod extract;
pub mod gui;
pub mod loader;
pub mod mapper;
pub mod table;

pub use mapper::Mapping;
pub use table::Table;
