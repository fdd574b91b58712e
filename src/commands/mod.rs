//! Command handlers invoked by the CLI

pub mod scan;

pub use scan::{handle_scan_command, scan_and_render, scan_until_interrupted, ScanOptions};
