use std::io::Write;

use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Diagnostics go to stderr so stdout carries nothing but findings.
pub fn init(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };

    let mut builder = Builder::new();
    builder.filter_level(level).target(Target::Stderr);
    builder.format(|buf, record| {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(buf, "[{}] [{}] {}", timestamp, record.level(), record.args())
    });

    // A logger may already be installed when embedded in another binary.
    let _ = builder.try_init();
}
