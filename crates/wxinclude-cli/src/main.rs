//! wxinclude - Convert binary files into a C/C++ header
//!
//! Every input file becomes a `static unsigned char` array. By default the
//! header also gets an include guard and helper macros that turn the
//! arrays into wxWidgets images and bitmaps.

mod config;

use anyhow::{bail, Result};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use config::FileConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;
use wxinclude_core::emit::TOOL_INFO;
use wxinclude_core::{ConversionOptions, ConversionReport, Converter, InputSpec};

/// Convert binary files into a C/C++ header of static byte arrays
#[derive(Parser, Debug)]
#[command(name = "wxinclude")]
#[command(author, version, about, long_about = LONG_ABOUT)]
struct Cli {
    /// Input files (same as --input-file)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Define file(s) for the conversion input
    #[arg(short = 'i', long = "input-file", value_name = "FILE")]
    input_files: Vec<PathBuf>,

    /// Define file type(s) for automatic conversion of files in the working directory
    #[arg(short = 'I', long = "input-type", value_name = "EXT")]
    input_types: Vec<String>,

    /// Define file for the conversion output
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// Disable adding of header support defines
    #[arg(short = 'n', long)]
    noheader: bool,

    /// Define arrays as const
    #[arg(short = 'C', long = "const")]
    constant: bool,

    /// Disable converting identifiers and file types to lower case
    #[arg(short = 'r', long)]
    respectcase: bool,

    /// Disable adding of wxWidgets support macros
    #[arg(short = 'w', long)]
    wxnone: bool,

    /// Header that includes wxWidgets (precompiled header?) [default: wx/wx.h]
    #[arg(short = 'W', long, value_name = "HEADER")]
    wxheader: Option<String>,

    /// Add the file type at the end of the identifier (myimage_png)
    #[arg(short = 't', long)]
    appendtype: bool,

    /// Quiet at runtime, not verbose
    #[arg(short, long)]
    quiet: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file with default options
    #[arg(long, default_value = "default.cfg", value_name = "FILE")]
    config: PathBuf,
}

const LONG_ABOUT: &str = "\
Convert binary files into a useful C/C++ header.

The primary goal is to provide wxWidgets users an easy way of integrating \
images in their programs. The addition of extra helper macros for wxWidgets \
can be disabled.

Multiple files are converted into one header. Input is defined by passing \
files or the extension masks to convert.

Example:

  wxinclude --const --input-file=mydata1.bin --input-type=.png \\
    --input-type=.bmp --output-file=myheader.h mydata2.bin myimage.png";

impl Cli {
    /// Parses arguments, also returning the explicit files in command line order
    ///
    /// Positional files and `--input-file` values are interleaved the way
    /// they were typed.
    fn parse_ordered<I, T>(args: I) -> clap::error::Result<(Self, Vec<PathBuf>)>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let cli = Self::from_arg_matches(&matches)?;
        let explicit = ordered_explicit_files(&cli, &matches);
        Ok((cli, explicit))
    }
}

fn ordered_explicit_files(cli: &Cli, matches: &ArgMatches) -> Vec<PathBuf> {
    let mut indexed: Vec<(usize, PathBuf)> = Vec::new();

    for (id, values) in [("input_files", &cli.input_files), ("files", &cli.files)] {
        if let Some(indices) = matches.indices_of(id) {
            indexed.extend(indices.zip(values.iter().cloned()));
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, path)| path).collect()
}

/// Command line options merged with the configuration file
#[derive(Debug)]
struct Settings {
    inputs: Vec<InputSpec>,
    output: Option<PathBuf>,
    options: ConversionOptions,
    quiet: bool,
}

impl Settings {
    /// Merges the command line over the configuration file
    ///
    /// Flags are set if either source sets them. Single values and lists
    /// from the file only apply when the command line gave none.
    fn merge(cli: &Cli, mut explicit: Vec<PathBuf>, file: FileConfig) -> Self {
        if explicit.is_empty() {
            explicit = file.input_files;
        }

        let masks = if cli.input_types.is_empty() {
            file.input_types
        } else {
            cli.input_types.clone()
        };

        let inputs = explicit
            .into_iter()
            .map(InputSpec::ExplicitFile)
            .chain(masks.into_iter().map(InputSpec::ExtensionMask))
            .collect();

        let mut options = ConversionOptions::new()
            .header_guard(!(cli.noheader || file.noheader))
            .helper_macros(!(cli.wxnone || file.wxnone))
            .use_const(cli.constant || file.constant)
            .respect_case(cli.respectcase || file.respectcase)
            .append_type(cli.appendtype || file.appendtype);
        if let Some(header) = cli.wxheader.clone().or(file.wxheader) {
            options = options.helper_include(header);
        }

        Self {
            inputs,
            output: cli.output_file.clone().or(file.output_file),
            options,
            quiet: cli.quiet || file.quiet,
        }
    }
}

fn main() -> Result<()> {
    let (cli, explicit) = Cli::parse_ordered(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    let file_config = FileConfig::load(&cli.config)?;
    let settings = Settings::merge(&cli, explicit, file_config);
    debug!("Settings: {:?}", settings);

    if !settings.quiet {
        println!("{}\n", TOOL_INFO);
    }

    if settings.inputs.is_empty() {
        bail!("No input defined!");
    }
    let Some(output) = settings.output else {
        bail!("No output defined!");
    };

    if !settings.quiet {
        let name = output.file_name().unwrap_or(output.as_os_str());
        println!("Build  : file '{}'...", name.to_string_lossy());
    }

    let quiet = settings.quiet;
    let mut progress = |path: &Path| {
        if !quiet {
            println!("Process: file '{}'...", path.display());
        }
    };
    let report = Converter::new(settings.options).run_with_progress(
        &settings.inputs,
        &output,
        &mut progress,
    )?;

    if !settings.quiet {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ConversionReport) {
    println!(
        "Build  : {:.3}s needed for conversion of {} files ({} duplicate, {} failed).",
        report.elapsed.as_secs_f64(),
        report.embedded_count(),
        report.duplicate_count(),
        report.failed_count()
    );
}
