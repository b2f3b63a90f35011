//! Probes a web server for known webshell files.
//!
//! Candidate URLs are the cartesian product of webshell names and directory
//! prefixes, each with a cache-busting query token. They are requested one
//! at a time with a single randomly chosen user agent, no redirect
//! following and a fixed timeout; only a `200` counts as found.

pub mod candidates;
pub mod cli;
pub mod error;
pub mod logger;
pub mod probe;
pub mod scan;
pub mod target;
pub mod wordlist;

pub use candidates::{generate, Candidate};
pub use error::{ConfigLoadError, ProbeError, ValidationError};
pub use probe::{HttpProber, ProbeOutcome, Prober};
pub use scan::{ScanSettings, ScanSummary, Scanner};
pub use target::{validate, Target};
