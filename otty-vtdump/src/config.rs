use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::Error;

/// Read buffer size used when `--chunk-size` is not given.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Feed a byte stream through the otty escape sequence parser and print
/// every action it emits.
#[derive(Debug, Parser)]
#[command(name = "otty-vtdump", version, about)]
pub struct CliArgs {
    /// File to parse, or `-` for stdin.
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: PathBuf,

    /// Treat FILE as a script(1) timing log (advanced format) and parse the
    /// output it recorded.
    #[arg(short, long)]
    pub script: bool,

    /// Trace format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Prefix every action with the parser state reached after the byte
    /// that triggered it.
    #[arg(long)]
    pub states: bool,

    /// Parse and count actions without printing them (for profiling).
    #[arg(short, long)]
    pub null: bool,

    /// Number of bytes read from the input at a time.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One line per action, consecutive text merged into one line.
    Text,
    /// One JSON object per action.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
    /// Timing log of a script(1) recording.
    Script(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Trace { format: Format, states: bool },
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: Input,
    pub output: Output,
    pub chunk_size: usize,
}

impl Config {
    pub fn from_args(args: CliArgs) -> Result<Self, Error> {
        if args.chunk_size == 0 {
            return Err(Error::ZeroChunkSize);
        }

        let stdin = args.file.as_os_str() == "-";
        let input = match (stdin, args.script) {
            (true, true) => return Err(Error::ScriptFromStdin),
            (true, false) => Input::Stdin,
            (false, true) => Input::Script(args.file),
            (false, false) => Input::File(args.file),
        };

        let output = if args.null {
            Output::Null
        } else {
            Output::Trace {
                format: args.format,
                states: args.states,
            }
        };

        Ok(Self {
            input,
            output,
            chunk_size: args.chunk_size,
        })
    }
}
