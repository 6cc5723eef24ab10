//! # wxinclude-core
//!
//! A library for embedding binary files into a C/C++ header as static
//! byte arrays.
//!
//! This crate provides the core functionality for:
//! - Deriving array identifiers from file names
//! - Discovering input files from explicit lists and extension masks
//! - Formatting file contents as hexadecimal array literals
//! - Wrapping the arrays in include guards and wxWidgets helper macros
//!
//! ## Architecture
//!
//! - [`naming`]: Identifier derivation
//! - [`emit`]: Array formatting and header boilerplate
//! - [`resolver`]: Input file discovery
//! - [`convert`]: The [`Converter`] driving a run
//! - [`options`]: Run configuration
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use wxinclude_core::{ConversionOptions, Converter, InputSpec};
//!
//! let options = ConversionOptions::new().use_const(true).append_type(true);
//! let report = Converter::new(options).run(
//!     &[InputSpec::file("logo.png"), InputSpec::mask(".bmp")],
//!     "resources.h",
//! )?;
//!
//! for warning in &report.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! - [`DirectoryListing`]: Customize how extension masks see a directory

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod convert;
pub mod emit;
pub mod error;
pub mod naming;
pub mod options;
pub mod resolver;

// Re-export primary types for convenience
pub use convert::{Conversion, ConversionReport, Converter, Warning};
pub use emit::{format_array, format_bytes};
pub use error::{Error, Result};
pub use naming::derive_name;
pub use options::ConversionOptions;
pub use resolver::{DirectoryListing, FileSet, FileSetResolver, InputSpec, ResolvedFile};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
