mod config;
mod error;
mod script;
mod trace;

use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser as _;
use env_logger::Env;
use log::{debug, error, info};
use otty_vtparse::Parser;

use crate::config::{CliArgs, Config, Input, Output};
use crate::error::Error;
use crate::script::ScriptLog;
use crate::trace::{Counter, TraceWriter};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();

    let args = CliArgs::parse();
    match Config::from_args(args).and_then(|config| run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("otty-vtdump: {err}");
            ExitCode::FAILURE
        },
    }
}

fn run(config: &Config) -> Result<(), Error> {
    let (mut input, source) = open_input(&config.input)?;
    let mut parser = Parser::new();

    match config.output {
        Output::Null => {
            let mut counter = Counter::default();
            let read = pump(&mut input, &source, config.chunk_size, |chunk| {
                parser.advance(chunk, &mut counter);
                Ok(())
            })?;
            parser.finish(&mut counter);
            info!("parsed {read} bytes: {}", counter.summary);
            println!("{}", counter.summary);
        },
        Output::Trace { format, states } => {
            let stdout = io::stdout().lock();
            let mut writer = TraceWriter::new(BufWriter::new(stdout), format);
            let mut events = Vec::new();
            let read = pump(&mut input, &source, config.chunk_size, |chunk| {
                if states {
                    for &byte in chunk {
                        parser.advance_byte(byte, &mut events);
                        writer.annotate(parser.state());
                        writer.write_all(&events)?;
                        events.clear();
                    }
                } else {
                    parser.advance(chunk, &mut events);
                    writer.write_all(&events)?;
                    events.clear();
                }
                Ok(())
            })?;
            parser.finish(&mut events);
            writer.write_all(&events)?;
            writer.finish()?;
            info!("parsed {read} bytes: {}", writer.summary);
        },
    }

    Ok(())
}

fn open_input(input: &Input) -> Result<(Box<dyn Read>, PathBuf), Error> {
    match input {
        Input::Stdin => {
            info!("reading stdin");
            Ok((Box::new(io::stdin().lock()), PathBuf::from("-")))
        },
        Input::File(path) => {
            info!("reading {}", path.display());
            let file = File::open(path).map_err(|err| Error::io(path, err))?;
            Ok((Box::new(file), path.clone()))
        },
        Input::Script(timing) => {
            let log = ScriptLog::open(timing)?;
            info!(
                "reading script(1) recording {}: {} output bytes, {} input bytes, {:.3}s",
                timing.display(),
                log.output_len(),
                log.input_entries().map(|entry| entry.size).sum::<u64>(),
                log.duration()
            );
            if let Some(input_log) = &log.input_path {
                debug!("keystrokes recorded in {}", input_log.display());
            }
            let source = log.output_path.clone().unwrap_or_else(|| timing.clone());
            Ok((Box::new(log.output()?), source))
        },
    }
}

/// Reads `input` in chunks of `chunk_size` bytes and hands each chunk to
/// `consume`. Returns the number of bytes read.
fn pump<F>(
    input: &mut dyn Read,
    source: &Path,
    chunk_size: usize,
    mut consume: F,
) -> Result<u64, Error>
where
    F: FnMut(&[u8]) -> Result<(), Error>,
{
    let mut buf = vec![0; chunk_size];
    let mut total = 0;

    loop {
        let read = match input.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::io(source, err)),
        };
        total += read as u64;
        consume(&buf[..read])?;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use otty_vtparse::Event;

    use super::*;

    #[test]
    fn pump_feeds_every_chunk_in_order() {
        let input = b"\x1b[1;31mred\x1b[0m\xe2\x94";
        let mut reader = Cursor::new(input.to_vec());
        let mut parser = Parser::new();
        let mut chunked: Vec<Event> = Vec::new();

        let read = pump(&mut reader, Path::new("-"), 3, |chunk| {
            parser.advance(chunk, &mut chunked);
            Ok(())
        })
        .unwrap();
        parser.finish(&mut chunked);

        let mut whole = Vec::new();
        let mut parser = Parser::new();
        parser.advance(input, &mut whole);
        parser.finish(&mut whole);
        assert_eq!(read, input.len() as u64);
        assert_eq!(chunked, whole);
    }

    #[test]
    fn pump_stops_on_consumer_error() {
        let mut reader = Cursor::new(vec![b'x'; 10]);
        let mut calls = 0;
        let result = pump(&mut reader, Path::new("-"), 4, |_| {
            calls += 1;
            Err(Error::Write(io::Error::from(ErrorKind::BrokenPipe)))
        });
        assert!(matches!(result, Err(Error::Write(_))));
        assert_eq!(calls, 1);
    }

    #[test]
    fn missing_input_file() {
        let input = Input::File(PathBuf::from("/nonexistent/input.bin"));
        assert!(matches!(open_input(&input), Err(Error::Io { .. })));
    }
}
