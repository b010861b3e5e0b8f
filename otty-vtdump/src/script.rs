//! Reader for recordings made by `script(1)` in the advanced timing format
//! (`script --log-timing`, or `script -T` on older util-linux).
//!
//! The timing log is a list of lines `<type> <elapsed> <payload...>`:
//!
//! * `H <elapsed> <key> <value...>` header, e.g. `OUTPUT_LOG`, `TIMING_LOG`
//! * `O <elapsed> <size>` bytes written to the terminal
//! * `I <elapsed> <size>` bytes typed by the user
//! * `S <elapsed> <signal...>` signal delivered to the session
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read, Take};
use std::path::{Component, Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{Error, ScriptError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Output,
    Input,
}

/// One `O` or `I` line of the timing log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    /// Seconds since the start of the recording.
    pub time: f64,
    pub direction: Direction,
    pub size: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptLog {
    pub info: BTreeMap<String, String>,
    pub entries: Vec<Entry>,
    pub output_path: Option<PathBuf>,
    pub input_path: Option<PathBuf>,
    /// Sum of all `O` sizes.
    output_len: u64,
}

impl ScriptLog {
    /// Reads and parses the timing log at `timing_path`.
    pub fn open(timing_path: &Path) -> Result<Self, Error> {
        let timing = fs::read_to_string(timing_path)
            .map_err(|err| Error::io(timing_path, err))?;
        let resolved = timing_path
            .canonicalize()
            .map_err(|err| Error::io(timing_path, err))?;

        Self::parse(&timing, &resolved).map_err(|source| Error::Script {
            path: timing_path.to_path_buf(),
            source,
        })
    }

    /// Parses the contents of a timing log located at `timing_path`.
    ///
    /// `timing_path` is used to resolve the relative log paths recorded in
    /// the headers, and should be absolute.
    pub fn parse(timing: &str, timing_path: &Path) -> Result<Self, ScriptError> {
        let mut log = Self::default();
        let mut base_path = None;
        let mut time = 0.0;

        for (index, line) in timing.lines().enumerate() {
            let line_no = index + 1;
            let mut fields = line.split(' ');
            let kind = fields.next().unwrap_or_default();
            // Basic format lines are `<elapsed> <size>`, without a type.
            if kind.parse::<f64>().is_ok() {
                return Err(ScriptError::InvalidTiming {
                    line: line_no,
                    value: kind.to_owned(),
                });
            }
            let elapsed = fields.next().ok_or(ScriptError::MissingField {
                line: line_no,
                field: "elapsed time",
            })?;
            time += elapsed.parse::<f64>().map_err(|_| ScriptError::InvalidTiming {
                line: line_no,
                value: elapsed.to_owned(),
            })?;

            match kind {
                "H" => {
                    let key = fields.next().ok_or(ScriptError::MissingField {
                        line: line_no,
                        field: "header name",
                    })?;
                    let value = fields.collect::<Vec<_>>().join(" ");

                    match key {
                        "TIMING_LOG" => {
                            base_path = base_path_of(timing_path, Path::new(&value));
                        },
                        "OUTPUT_LOG" => {
                            log.output_path = Some(rebase(base_path.as_deref(), &value));
                        },
                        "INPUT_LOG" => {
                            log.input_path = Some(rebase(base_path.as_deref(), &value));
                        },
                        _ => {},
                    }
                    log.info.insert(key.to_owned(), value);
                },
                "O" | "I" => {
                    let size = fields.next().ok_or(ScriptError::MissingField {
                        line: line_no,
                        field: "size",
                    })?;
                    let size = size.parse::<u64>().map_err(|_| ScriptError::InvalidSize {
                        line: line_no,
                        value: size.to_owned(),
                    })?;

                    let direction = if kind == "O" {
                        log.output_len += size;
                        Direction::Output
                    } else {
                        Direction::Input
                    };
                    log.entries.push(Entry {
                        time,
                        direction,
                        size,
                    });
                },
                "S" => debug!("skipping signal entry on line {line_no}: {line}"),
                _ => {
                    return Err(ScriptError::UnknownEntry {
                        line: line_no,
                        kind: kind.to_owned(),
                    });
                },
            }
        }

        Ok(log)
    }

    /// Entries of bytes typed by the user, which are not replayed.
    pub fn input_entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.direction == Direction::Input)
    }

    /// Seconds between the start of the recording and its last entry.
    pub fn duration(&self) -> f64 {
        self.entries.last().map_or(0.0, |entry| entry.time)
    }

    /// Total number of output bytes the recording announces.
    pub fn output_len(&self) -> u64 {
        self.output_len
    }

    /// Opens the recorded output, positioned after its header line and
    /// limited to the bytes announced by the `O` entries.
    pub fn output(&self) -> Result<ScriptOutput, Error> {
        let path = self.output_path.as_ref().ok_or_else(|| Error::Script {
            path: PathBuf::from(self.info.get("TIMING_LOG").map_or("", String::as_str)),
            source: ScriptError::NoOutputLog,
        })?;

        let file = File::open(path).map_err(|err| Error::io(path, err))?;
        let mut reader = BufReader::new(file);
        let mut header = Vec::new();
        reader
            .read_until(b'\n', &mut header)
            .map_err(|err| Error::io(path, err))?;

        info!(
            "replaying {} output bytes from {}",
            self.output_len,
            path.display()
        );

        Ok(ScriptOutput {
            inner: reader.take(self.output_len),
            exhausted: false,
        })
    }
}

/// Output bytes of a recording, see [`ScriptLog::output`].
#[derive(Debug)]
pub struct ScriptOutput {
    inner: Take<BufReader<File>>,
    exhausted: bool,
}

impl Read for ScriptOutput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf)?;
        if read == 0 && !buf.is_empty() && !self.exhausted {
            self.exhausted = true;
            let missing = self.inner.limit();
            if missing > 0 {
                warn!("output log ended {missing} bytes before the recorded size");
            }
        }
        Ok(read)
    }
}

/// Returns the directory `base` such that `actual == base / relative`.
fn base_path_of(actual: &Path, relative: &Path) -> Option<PathBuf> {
    if relative.is_absolute() {
        return None;
    }

    let relative: PathBuf = relative
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect();
    if relative.as_os_str().is_empty() || !actual.ends_with(&relative) {
        return None;
    }

    let keep = actual.components().count() - relative.components().count();
    Some(actual.components().take(keep).collect())
}

fn rebase(base: Option<&Path>, value: &str) -> PathBuf {
    match base {
        Some(base) => base.join(value),
        None => PathBuf::from(value),
    }
}
