//! Browser console logging

use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

/// Route `tracing` events to the browser console.
///
/// Call once before mounting the app; later calls are ignored.
pub fn init(max_level: Level) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time() // std::time is unavailable in the browser
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(LevelFilter::from_level(max_level));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }
}
