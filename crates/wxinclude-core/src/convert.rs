//! Conversion of a set of input files into one header.
//!
//! A [`Converter`] owns everything a run needs: the options, the registry
//! of identifiers already emitted, and the growing output buffer. Nothing
//! is shared between runs, so independent converters can run side by side.
//!
//! The output is assembled in this order:
//!
//! 1. Metadata comment and opening include guard (optional)
//! 2. Helper includes, macros and conversion functions (optional)
//! 3. One array declaration per embedded file, in processing order
//! 4. Closing include guard (optional)
//!
//! Files that cannot be opened or read, and files whose identifier was
//! already emitted, are skipped with a [`Warning`]. Only a missing input
//! specification or an unusable output destination fail the run.

use crate::emit;
use crate::error::{Error, Result};
use crate::options::ConversionOptions;
use crate::resolver::{FileSetResolver, InputSpec, ResolvedFile};
use std::collections::HashSet;
use std::fmt;
use std::fs::{OpenOptions, Permissions};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// A non-fatal problem with a single input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The identifier derived for `path` was already emitted
    DuplicateName {
        /// The colliding identifier
        name: String,
        /// The file that was skipped
        path: PathBuf,
    },
    /// The file could not be opened
    OpenFailed {
        /// The file that was skipped
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },
    /// The file was opened but could not be read completely
    ReadFailed {
        /// The file that was skipped
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DuplicateName { name, .. } => write!(
                f,
                "'{}' already defined, processing of new one stopped.",
                name
            ),
            Warning::OpenFailed { path, .. } => {
                write!(f, "input file '{}' failed to open.", path.display())
            }
            Warning::ReadFailed { path, reason } => {
                write!(f, "input file '{}' failed to read: {}", path.display(), reason)
            }
        }
    }
}

/// Outcome of a conversion run
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    /// Identifiers of the embedded files, in output order
    pub embedded: Vec<String>,
    /// Per-file problems, in processing order
    pub warnings: Vec<Warning>,
    /// Total number of input bytes embedded
    pub bytes_embedded: u64,
    /// Time spent resolving, reading and formatting
    pub elapsed: Duration,
}

impl ConversionReport {
    /// Number of files embedded
    pub fn embedded_count(&self) -> usize {
        self.embedded.len()
    }

    /// Number of files skipped because their identifier was taken
    pub fn duplicate_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, Warning::DuplicateName { .. }))
            .count()
    }

    /// Number of files skipped because they could not be opened or read
    pub fn failed_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, Warning::OpenFailed { .. } | Warning::ReadFailed { .. }))
            .count()
    }
}

/// The generated header text together with its report
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Complete header content
    pub artifact: String,
    /// Run statistics and warnings
    pub report: ConversionReport,
}

/// Identifiers emitted so far in a run
#[derive(Debug, Default)]
struct NameRegistry {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl NameRegistry {
    /// Registers `name`, returning false if it was already present
    fn register(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.order.push(name.to_string());
        true
    }

    fn into_names(self) -> Vec<String> {
        self.order
    }
}

/// Drives one conversion run
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConversionOptions,
    base_dir: PathBuf,
}

impl Converter {
    /// Creates a converter matching extension masks in the current directory
    pub fn new(options: ConversionOptions) -> Self {
        Self {
            options,
            base_dir: PathBuf::from("."),
        }
    }

    /// Sets the directory scanned for extension mask matches
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Returns the options of this converter
    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Builds the header in memory
    ///
    /// `header_name` names the include guard and appears in the metadata
    /// comment.
    pub fn convert(&self, inputs: &[InputSpec], header_name: &str) -> Result<Conversion> {
        self.convert_with_progress(inputs, header_name, &mut |_| {})
    }

    /// Builds the header in memory, calling `progress` for every opened file
    ///
    /// `progress` sees each file before its identifier is checked, so files
    /// later skipped as duplicates are reported too.
    pub fn convert_with_progress(
        &self,
        inputs: &[InputSpec],
        header_name: &str,
        progress: &mut dyn FnMut(&Path),
    ) -> Result<Conversion> {
        if inputs.is_empty() {
            return Err(Error::NoInput);
        }

        let start = Instant::now();
        let options = &self.options;
        let mut artifact = String::new();
        let mut registry = NameRegistry::default();
        let mut report = ConversionReport::default();

        if options.header_guard {
            emit::guard_open(
                &mut artifact,
                header_name,
                options.helper_macros,
                options.use_const,
            );
        }

        if options.helper_macros {
            emit::helper_macros(
                &mut artifact,
                options.include_name(),
                options.include_memory_stream(),
            );
        }

        let resolver = FileSetResolver::new(&self.base_dir, options.respect_case);
        let files = resolver.resolve(inputs);

        for path in files.iter() {
            let (resolved, file) = match ResolvedFile::open(path) {
                Ok(opened) => opened,
                Err(e) => {
                    let warning = Warning::OpenFailed {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    };
                    warn!("{}", warning);
                    report.warnings.push(warning);
                    continue;
                }
            };

            info!("Processing {}", resolved.path.display());
            progress(&resolved.path);

            self.embed(
                resolved,
                BufReader::new(file),
                &mut artifact,
                &mut registry,
                &mut report,
            );
        }

        if options.header_guard {
            emit::guard_close(&mut artifact);
        }

        report.embedded = registry.into_names();
        report.elapsed = start.elapsed();

        debug!(
            "Converted {} files ({} bytes) in {:?}",
            report.embedded_count(),
            report.bytes_embedded,
            report.elapsed
        );

        Ok(Conversion { artifact, report })
    }

    /// Builds the header and writes it to `output`
    ///
    /// The destination is created before any input is read; the content
    /// replaces it in a single step once every file has been processed.
    pub fn run(&self, inputs: &[InputSpec], output: impl AsRef<Path>) -> Result<ConversionReport> {
        self.run_with_progress(inputs, output, &mut |_| {})
    }

    /// Like [`Converter::run`], calling `progress` for every opened file
    pub fn run_with_progress(
        &self,
        inputs: &[InputSpec],
        output: impl AsRef<Path>,
        progress: &mut dyn FnMut(&Path),
    ) -> Result<ConversionReport> {
        let output = output.as_ref();

        if inputs.is_empty() {
            return Err(Error::NoInput);
        }

        let (mut staging, permissions) = create_staging_file(output)?;
        let header_name = output
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!("Building {}", output.display());
        let conversion = self.convert_with_progress(inputs, &header_name, progress)?;

        staging
            .write_all(conversion.artifact.as_bytes())
            .and_then(|()| staging.flush())
            .and_then(|()| staging.as_file().set_permissions(permissions))
            .map_err(|e| Error::output_write(output, e))?;
        staging
            .persist(output)
            .map_err(|e| Error::output_write(output, e.error))?;

        Ok(conversion.report)
    }

    /// Registers the identifier of `resolved` and appends its array
    ///
    /// A duplicate identifier or a short read leaves `artifact` unchanged.
    fn embed<R: Read>(
        &self,
        resolved: ResolvedFile,
        mut reader: R,
        artifact: &mut String,
        registry: &mut NameRegistry,
        report: &mut ConversionReport,
    ) {
        let name = resolved.identifier(self.options.respect_case, self.options.append_type);
        if !registry.register(&name) {
            let warning = Warning::DuplicateName {
                name,
                path: resolved.path,
            };
            warn!("{}", warning);
            report.warnings.push(warning);
            return;
        }

        let mark = artifact.len();
        artifact.reserve(emit::estimated_len(&name, resolved.len));

        match emit::format_array(artifact, &name, &mut reader, resolved.len, self.options.use_const) {
            Ok(()) => report.bytes_embedded += resolved.len,
            Err(e) => {
                artifact.truncate(mark);
                let warning = Warning::ReadFailed {
                    path: resolved.path,
                    reason: e.to_string(),
                };
                warn!("{}", warning);
                report.warnings.push(warning);
            }
        }
    }
}

/// Creates a temporary file next to `output` to stage the header in
///
/// The destination is opened without truncation so that an existing
/// header stays intact until the final rename, and a new one is created
/// with the default mode. Its permissions are returned so the staged file
/// can take them over.
fn create_staging_file(output: &Path) -> Result<(NamedTempFile, Permissions)> {
    let destination = OpenOptions::new()
        .write(true)
        .create(true)
        .open(output)
        .map_err(|e| Error::output_create(output, e))?;
    let permissions = destination
        .metadata()
        .map_err(|e| Error::output_create(output, e))?
        .permissions();

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let staging = NamedTempFile::new_in(dir).map_err(|e| Error::output_create(output, e))?;
    Ok((staging, permissions))
}
