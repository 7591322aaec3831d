//! Table extractor - main entry point.

use anyhow::Result;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    table_extractor::gui::run()
}
