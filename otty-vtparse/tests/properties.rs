use otty_vtparse::{Codepoint, Event, Parser, State};
use proptest::prelude::*;

fn parse(bytes: &[u8]) -> (Vec<Event>, State) {
    let mut parser = Parser::new();
    let mut events = Vec::new();
    parser.advance(bytes, &mut events);
    (events, parser.state())
}

/// Bytes biased towards the ones that steer the automaton.
fn interesting_byte() -> impl Strategy<Value = u8> {
    prop_oneof![
        any::<u8>(),
        Just(0x1bu8),
        Just(0x18u8),
        Just(0x07u8),
        Just(b'['),
        Just(b']'),
        Just(b'P'),
        Just(b';'),
        Just(b':'),
        Just(b'?'),
        Just(b'\\'),
        0xc2u8..=0xf4,
        0x80u8..=0xbf,
    ]
}

/// Text delivered by `print`, with raw fallbacks re-encoded as their bytes.
fn printed_bytes(events: &[Event]) -> Vec<u8> {
    let mut bytes = Vec::new();
    for event in events {
        if let Event::Print { c } = event {
            match c {
                Codepoint::Char(c) => {
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                },
                Codepoint::Raw(byte) => bytes.push(*byte),
            }
        }
    }
    bytes
}

proptest! {
    #[test]
    fn arbitrary_streams_never_get_stuck(
        input in prop::collection::vec(interesting_byte(), 0..512)
    ) {
        let mut parser = Parser::new();
        let mut events = Vec::new();
        parser.advance(&input, &mut events);

        // Whatever came before, CAN resynchronizes to ground and text prints.
        parser.advance(b"\x18ok", &mut events);
        prop_assert_eq!(parser.state(), State::Ground);
        let tail = &events[events.len() - 2..];
        prop_assert_eq!(
            tail,
            &[
                Event::Print { c: Codepoint::Char('o') },
                Event::Print { c: Codepoint::Char('k') },
            ][..]
        );
    }

    #[test]
    fn identical_streams_produce_identical_actions(
        input in prop::collection::vec(interesting_byte(), 0..512)
    ) {
        prop_assert_eq!(parse(&input), parse(&input));
    }

    #[test]
    fn chunking_does_not_change_actions(
        input in prop::collection::vec(interesting_byte(), 0..256),
        split in any::<prop::sample::Index>(),
    ) {
        let at = split.index(input.len() + 1);
        let mut parser = Parser::new();
        let mut events = Vec::new();
        parser.advance(&input[..at], &mut events);
        parser.advance(&input[at..], &mut events);

        prop_assert_eq!((events, parser.state()), parse(&input));
    }

    #[test]
    fn any_scalar_value_prints_once(c in any::<char>()) {
        prop_assume!(!c.is_ascii_control() && c != '\u{7f}');

        let mut buf = [0u8; 4];
        let (events, state) = parse(c.encode_utf8(&mut buf).as_bytes());
        prop_assert_eq!(events, vec![Event::Print { c: Codepoint::Char(c) }]);
        prop_assert_eq!(state, State::Ground);
    }

    #[test]
    fn ground_text_is_never_dropped(
        input in prop::collection::vec(
            prop_oneof![0x20u8..=0x7e, 0x80u8..=0xff],
            0..256,
        )
    ) {
        let mut parser = Parser::new();
        let mut events = Vec::new();
        parser.advance(&input, &mut events);
        parser.finish(&mut events);

        prop_assert_eq!(printed_bytes(&events), input);
    }

    #[test]
    fn can_before_sequence_is_transparent(
        prefix in prop::collection::vec(interesting_byte(), 0..64),
        params in prop::collection::vec(0u16..1000, 1..8),
    ) {
        let sequence = format!(
            "\x1b[{}H",
            params.iter().map(u16::to_string).collect::<Vec<_>>().join(";")
        );

        let mut parser = Parser::new();
        let mut ignored = Vec::new();
        parser.advance(&prefix, &mut ignored);
        parser.advance(b"\x18", &mut ignored);

        let mut events = Vec::new();
        parser.advance(sequence.as_bytes(), &mut events);
        let (expected, _) = parse(sequence.as_bytes());
        prop_assert_eq!(events, expected);
    }
}
