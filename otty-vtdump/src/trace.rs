//! Writers for the actions emitted by the parser.
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use otty_vtparse::{Actor, Codepoint, Event, Params, State};
use serde::Serialize;

use crate::config::Format;

/// Number of emitted actions, by action name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    counts: BTreeMap<&'static str, u64>,
}

impl Summary {
    pub fn record(&mut self, action: &'static str) {
        *self.counts.entry(action).or_default() += 1;
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} actions", self.total())?;
        for (action, count) in &self.counts {
            write!(f, ", {action}={count}")?;
        }
        Ok(())
    }
}

/// Actor that only counts, for profiling the parser itself.
#[derive(Debug, Default)]
pub struct Counter {
    pub summary: Summary,
}

impl Actor for Counter {
    fn print(&mut self, _: Codepoint) {
        self.summary.record("print");
    }

    fn execute(&mut self, _: u8) {
        self.summary.record("execute");
    }

    fn esc_dispatch(&mut self, _: &[u8], _: u8) {
        self.summary.record("esc_dispatch");
    }

    fn csi_dispatch(&mut self, _: &Params, _: &[u8], _: u8) {
        self.summary.record("csi_dispatch");
    }

    fn hook(&mut self, _: &Params, _: &[u8], _: u8) {
        self.summary.record("hook");
    }

    fn put(&mut self, _: Codepoint) {
        self.summary.record("put");
    }

    fn unhook(&mut self) {
        self.summary.record("unhook");
    }

    fn osc_start(&mut self) {
        self.summary.record("osc_start");
    }

    fn osc_put(&mut self, _: Codepoint) {
        self.summary.record("osc_put");
    }

    fn osc_end(&mut self) {
        self.summary.record("osc_end");
    }
}

/// Consecutive text actions of the same kind, printed as one line.
#[derive(Debug)]
struct TextRun {
    action: &'static str,
    state: Option<State>,
    text: String,
}

/// JSON record of an event annotated with the parser state.
#[derive(Serialize)]
struct Annotated<'a> {
    state: State,
    #[serde(flatten)]
    event: &'a Event,
}

struct StatePrefix(Option<State>);

impl fmt::Display for StatePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(state) => write!(f, "{state:?}: "),
            None => Ok(()),
        }
    }
}

/// Writes one record per event in the selected [`Format`].
pub struct TraceWriter<W: Write> {
    out: W,
    format: Format,
    state: Option<State>,
    run: Option<TextRun>,
    pub summary: Summary,
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W, format: Format) -> Self {
        Self {
            out,
            format,
            state: None,
            run: None,
            summary: Summary::default(),
        }
    }

    /// Annotates the events written from now on with `state`.
    pub fn annotate(&mut self, state: State) {
        self.state = Some(state);
    }

    pub fn write_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a Event>,
    ) -> io::Result<()> {
        for event in events {
            self.write(event)?;
        }
        Ok(())
    }

    pub fn write(&mut self, event: &Event) -> io::Result<()> {
        self.summary.record(event.name());
        match self.format {
            Format::Json => {
                match self.state {
                    Some(state) => {
                        serde_json::to_writer(&mut self.out, &Annotated { state, event })?
                    },
                    None => serde_json::to_writer(&mut self.out, event)?,
                }
                self.out.write_all(b"\n")
            },
            Format::Text => self.write_text(event),
        }
    }

    /// Writes out pending text and flushes the underlying writer.
    pub fn finish(&mut self) -> io::Result<()> {
        self.flush_run()?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn write_text(&mut self, event: &Event) -> io::Result<()> {
        let text = match event {
            Event::Print { c } | Event::Put { c } | Event::OscPut { c } => Some(*c),
            _ => None,
        };

        if let Some(c) = text {
            let action = event.name();
            let state = self.state;
            if self
                .run
                .as_ref()
                .is_some_and(|run| run.action != action || run.state != state)
            {
                self.flush_run()?;
            }
            let run = self.run.get_or_insert_with(|| TextRun {
                action,
                state,
                text: String::new(),
            });
            push_codepoint(&mut run.text, c);
            return Ok(());
        }

        self.flush_run()?;
        write!(self.out, "{}", StatePrefix(self.state))?;
        match event {
            Event::Execute { byte } => writeln!(self.out, "execute 0x{byte:02x}"),
            Event::EscDispatch {
                intermediates,
                byte,
            } => writeln!(
                self.out,
                "esc {} {}",
                quote_bytes(intermediates),
                quote_final(*byte)
            ),
            Event::CsiDispatch {
                params,
                intermediates,
                byte,
            } => writeln!(
                self.out,
                "csi {params:?} {} {}",
                quote_bytes(intermediates),
                quote_final(*byte)
            ),
            Event::Hook {
                params,
                intermediates,
                byte,
            } => writeln!(
                self.out,
                "hook {params:?} {} {}",
                quote_bytes(intermediates),
                quote_final(*byte)
            ),
            other => writeln!(self.out, "{}", other.name()),
        }
    }

    fn flush_run(&mut self) -> io::Result<()> {
        match self.run.take() {
            Some(run) => writeln!(
                self.out,
                "{}{} \"{}\"",
                StatePrefix(run.state),
                run.action,
                run.text
            ),
            None => Ok(()),
        }
    }
}

fn push_codepoint(text: &mut String, c: Codepoint) {
    match c {
        Codepoint::Char(c) => text.extend(c.escape_debug()),
        Codepoint::Raw(byte) => text.push_str(&format!("\\x{byte:02x}")),
    }
}

fn quote_bytes(bytes: &[u8]) -> String {
    let mut quoted = String::from("\"");
    for &byte in bytes {
        push_codepoint(&mut quoted, Codepoint::Char(char::from(byte)));
    }
    quoted.push('"');
    quoted
}

fn quote_final(byte: u8) -> String {
    format!("{:?}", char::from(byte))
}

#[cfg(test)]
mod tests {
    use otty_vtparse::Parser;

    use super::*;

    fn trace(format: Format, input: &[u8]) -> (String, Summary) {
        let mut parser = Parser::new();
        let mut events = Vec::new();
        parser.advance(input, &mut events);
        parser.finish(&mut events);

        let mut writer = TraceWriter::new(Vec::new(), format);
        writer.write_all(&events).unwrap();
        writer.finish().unwrap();
        let summary = writer.summary.clone();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        (out, summary)
    }

    fn trace_states(format: Format, input: &[u8]) -> String {
        let mut parser = Parser::new();
        let mut writer = TraceWriter::new(Vec::new(), format);
        let mut events = Vec::new();
        for &byte in input {
            parser.advance_byte(byte, &mut events);
            writer.annotate(parser.state());
            writer.write_all(&events).unwrap();
            events.clear();
        }
        writer.finish().unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn text_with_states() {
        assert_eq!(
            trace_states(Format::Text, b"ab\x1b]0;t\x07c"),
            "Ground: print \"ab\"\n\
             OscString: osc_start\n\
             OscString: osc_put \"0;t\"\n\
             Ground: osc_end\n\
             Ground: print \"c\"\n"
        );
    }

    #[test]
    fn json_with_states() {
        assert_eq!(
            trace_states(Format::Json, b"\x1bPq\x18"),
            "{\"state\":\"dcs_passthrough\",\"action\":\"hook\",\"params\":[[0]],\"intermediates\":[],\"byte\":113}\n\
             {\"state\":\"ground\",\"action\":\"unhook\"}\n\
             {\"state\":\"ground\",\"action\":\"execute\",\"byte\":24}\n"
        );
    }

    #[test]
    fn text_merges_prints() {
        let (out, summary) = trace(Format::Text, b"he\"llo\r\n\xce\xbb\xff");
        assert_eq!(
            out,
            "print \"he\\\"llo\"\nexecute 0x0d\nexecute 0x0a\nprint \"λ\\xff\"\n"
        );
        assert_eq!(summary.to_string(), "10 actions, execute=2, print=8");
    }

    #[test]
    fn text_sequences() {
        let (out, _) = trace(Format::Text, b"\x1b[?1;2:3h\x1b(B\x1b]0;t\x07\x1bP1$qm\x1b\\");
        assert_eq!(
            out,
            "csi [[1], [2, 3]] \"?\" 'h'\n\
             esc \"(\" 'B'\n\
             osc_start\n\
             osc_put \"0;t\"\n\
             osc_end\n\
             hook [[1]] \"$\" 'q'\n\
             put \"m\"\n\
             unhook\n\
             esc \"\" '\\\\'\n"
        );
    }

    #[test]
    fn json_lines() {
        let (out, summary) = trace(Format::Json, b"a\x1b[m");
        assert_eq!(
            out,
            "{\"action\":\"print\",\"c\":{\"char\":\"a\"}}\n\
             {\"action\":\"csi_dispatch\",\"params\":[[0]],\"intermediates\":[],\"byte\":109}\n"
        );
        assert_eq!(summary.total(), 2);
    }

    #[test]
    fn counter_matches_recorded_events() {
        let input = b"ab\x1b[31mc\x1b]2;x\x1b\\\x07";
        let mut parser = Parser::new();
        let mut counter = Counter::default();
        parser.advance(input, &mut counter);

        let (_, summary) = trace(Format::Text, input);
        assert_eq!(counter.summary, summary);
        assert_eq!(
            counter.summary.to_string(),
            "11 actions, csi_dispatch=1, esc_dispatch=1, execute=1, osc_end=1, \
             osc_put=3, osc_start=1, print=3"
        );
    }
}
