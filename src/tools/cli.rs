use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::info;

use crate::compression::compress::MissingCodePolicy;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

impl From<u8> for Verbosity {
    fn from(v: u8) -> Self {
        match v {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// All user settable options that control a run
#[derive(Debug, Clone)]
pub struct HzOpts {
    /// Name of the file to read for input
    pub file: String,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Output file name, if not the default
    pub output: Option<String>,
    /// Original file used to rebuild the tree when decompressing
    pub reference: Option<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove the decoded copy after a test run
    pub keep_decoded: bool,
    /// What to do with bytes that have no code
    pub missing_code: MissingCodePolicy,
    /// Print the frequency table, codes and tree
    pub show_tables: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HzOpts {
    pub fn new() -> Self {
        Self {
            file: String::new(),
            op_mode: Mode::Test,
            output: None,
            reference: None,
            force_overwrite: false,
            keep_decoded: false,
            missing_code: MissingCodePolicy::Strict,
            show_tables: false,
            verbose: Verbosity::Info,
        }
    }
}

impl Default for HzOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A two pass Huffman file compressor",
    long_about = "
    Counts the bytes of the input, builds a Huffman tree from the counts and packs every byte
    into its code. The compressed file holds only the symbol count and the packed codes, so
    decompressing needs the original file (--reference) to rebuild the same tree.

    With no mode flag the file is compressed, decoded again and compared with the original."
)]
pub struct Args {
    /// Filename of file to process
    filename: String,

    /// Compress the input file
    #[clap(short = 'z', long = "zip", conflicts_with_all = &["decompress", "test"])]
    compress: bool,

    /// Decompress the input file
    #[clap(short = 'd', long = "decompress", requires = "reference", conflicts_with = "test")]
    decompress: bool,

    /// Compress, decompress and compare with the original (the default)
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Output file name
    #[clap(short = 'o', long = "output")]
    output: Option<String>,

    /// Original file, needed to rebuild the tree when decompressing
    #[clap(short = 'r', long = "reference")]
    reference: Option<String>,

    ///Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Keep the decoded copy made by a test run
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Skip bytes without a code instead of failing
    #[clap(long = "lenient")]
    lenient: bool,

    /// Print the frequency table, code table and tree
    #[clap(long = "tables")]
    tables: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

impl From<Args> for HzOpts {
    fn from(args: Args) -> Self {
        // clap already rejects conflicting mode flags
        let op_mode = match (args.compress, args.decompress, args.test) {
            (true, _, _) => Mode::Zip,
            (_, true, _) => Mode::Unzip,
            _ => Mode::Test,
        };
        HzOpts {
            file: args.filename,
            op_mode,
            output: args.output,
            reference: args.reference,
            force_overwrite: args.force,
            keep_decoded: args.keep,
            missing_code: if args.lenient {
                MissingCodePolicy::Skip
            } else {
                MissingCodePolicy::Strict
            },
            show_tables: args.tables,
            verbose: Verbosity::from(args.v),
        }
    }
}

/// Parse the command line into HzOpts and set the log level.
pub fn hzopts_init() -> HzOpts {
    let opts = HzOpts::from(Args::parse());

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    info!("---- huffzip Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.file);
    if let Some(output) = &opts.output {
        info!("Sending output to {}", output)
    };
    if let Some(reference) = &opts.reference {
        info!("Rebuilding the tree from {}", reference)
    };
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.missing_code == MissingCodePolicy::Skip {
        info!("Skipping bytes without a code")
    };
    info!("---- huffzip Initialization End ----\n");
    opts
}
