//! Suunto CSV Library
//!
//! Dumps the dives stored on a dive computer into CSV files, one file per
//! dive, named after the dive's start time. Talking to the hardware and
//! decoding dive logs is left to libdivecomputer; this crate finds the
//! model and the serial port, drives the library's dive and sample
//! iteration, and writes the rows.
//!
//! # Features
//!
//! - **`cli`** (default): Command-line front end (`clap`, `env_logger`)
//! - **`libdivecomputer`**: Bindings to the system libdivecomputer; needed by the binary
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "libdivecomputer")]
//! # fn main() -> suunto_csv::Result<()> {
//! use suunto_csv::backend::libdivecomputer::Libdivecomputer;
//! use suunto_csv::{export_model, ExportOptions};
//!
//! let library = Libdivecomputer::new()?;
//! let options = ExportOptions::default();
//! let report = export_model(
//!     &library,
//!     "D4i",
//!     &options,
//!     &mut std::io::stdout(),
//!     &mut std::io::stderr(),
//! )?;
//! println!("Exported {} of {} dives", report.exported(), report.dives_seen);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "libdivecomputer"))]
//! # fn main() {}
//! ```
//!
//! # Public API
//!
//! - [`resolve`] / [`supported_models`] - Look up models in the descriptor catalog
//! - [`locate`] - Find the serial transport in the device directory
//! - [`export`] / [`export_model`] - Export every dive on a device
//! - [`export_dive`] / [`SampleWriter`] - Write one dive's samples
//! - [`backend`] - The library seam, with mock and libdivecomputer implementations

// Module declarations
pub mod backend;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod exporter;
pub mod resolver;
pub mod transport;
pub mod types;
pub mod writer;

pub use config::*;
pub use error::*;
pub use exporter::*;
pub use resolver::*;
pub use transport::*;
pub use types::*;
pub use writer::*;
