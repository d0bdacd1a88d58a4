//! Barcode Worker Service Entry Point
//!
//! Loads configuration, builds the Tokio runtime and starts the HTTP server.

fn main() -> anyhow::Result<()> {
    barcode_worker::run()
}
