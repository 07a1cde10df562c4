//! Binary entry point that glues the CSV-backed record store to the TUI.
//! The bootstrapping pipeline is short: resolve the backing file path, load
//! every record eagerly, hand the store to the app state, and drive the
//! Ratatui event loop until the user quits.

use patient_records_manager::{default_store_path, run_app, App, RecordStore};

/// Initialize persistence, load existing records, and launch the Ratatui
/// event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for
/// example an unreadable data directory) to the terminal instead of
/// crashing silently.
fn main() -> anyhow::Result<()> {
    let path = default_store_path()?;
    let store = RecordStore::open(path)?;

    let mut app = App::new(store);
    run_app(&mut app)
}
