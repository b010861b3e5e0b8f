//! Byte classification for the escape sequence automaton.
//!
//! The transition table is indexed by `(State, ByteClass)` rather than by the
//! raw byte, which keeps every state handler a short exhaustive `match` and
//! lets the compiler check totality. Classification itself is a pure lookup
//! into a table that is built at compile time.

/// Class of a single input byte.
///
/// The introducer classes (`[`, `P`, `]`, `X`/`^`/`_`) only carry a special
/// meaning right after `ESC`; every other state treats them as ordinary
/// final bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteClass {
    /// 0x00-0x17, 0x19, 0x1c-0x1f except BEL.
    C0,
    /// 0x07, terminates OSC strings, otherwise a plain C0 control.
    Bel,
    /// 0x18 (CAN) and 0x1a (SUB): abort the current sequence.
    CanSub,
    /// 0x1b.
    Esc,
    /// 0x20-0x2f.
    Intermediate,
    /// 0x30-0x39.
    Digit,
    /// 0x3a (`:`).
    SubSeparator,
    /// 0x3b (`;`).
    Separator,
    /// 0x3c-0x3f (`<`, `=`, `>`, `?`).
    PrivateMarker,
    /// 0x5b (`[`).
    CsiIntroducer,
    /// 0x50 (`P`).
    DcsIntroducer,
    /// 0x5d (`]`).
    OscIntroducer,
    /// 0x58, 0x5e, 0x5f (`X`, `^`, `_`): SOS, PM and APC.
    StringIntroducer,
    /// Remaining bytes of 0x40-0x7e.
    Final,
    /// 0x7f.
    Del,
    /// 0x80-0xff, UTF-8 lead or continuation bytes.
    NonAscii,
}

impl ByteClass {
    /// Whether the class lies in the final byte range 0x40-0x7e.
    #[inline]
    pub const fn is_final(self) -> bool {
        matches!(
            self,
            Self::CsiIntroducer
                | Self::DcsIntroducer
                | Self::OscIntroducer
                | Self::StringIntroducer
                | Self::Final
        )
    }

    /// Whether the class lies in the parameter byte range 0x30-0x3f.
    #[inline]
    pub const fn is_parameter(self) -> bool {
        matches!(
            self,
            Self::Digit
                | Self::SubSeparator
                | Self::Separator
                | Self::PrivateMarker
        )
    }
}

const fn class_of(byte: u8) -> ByteClass {
    use ByteClass::*;

    match byte {
        0x07 => Bel,
        0x18 | 0x1a => CanSub,
        0x1b => Esc,
        0x00..=0x1f => C0,
        0x20..=0x2f => Intermediate,
        0x30..=0x39 => Digit,
        0x3a => SubSeparator,
        0x3b => Separator,
        0x3c..=0x3f => PrivateMarker,
        0x50 => DcsIntroducer,
        0x58 | 0x5e | 0x5f => StringIntroducer,
        0x5b => CsiIntroducer,
        0x5d => OscIntroducer,
        0x40..=0x7e => Final,
        0x7f => Del,
        0x80..=0xff => NonAscii,
    }
}

static CLASSES: [ByteClass; 256] = {
    let mut table = [ByteClass::C0; 256];
    let mut byte = 0;
    while byte < 256 {
        table[byte] = class_of(byte as u8);
        byte += 1;
    }
    table
};

/// Returns the class of `byte`.
#[inline(always)]
pub fn classify(byte: u8) -> ByteClass {
    CLASSES[byte as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c0_controls() {
        for byte in (0x00..=0x17).chain([0x19]).chain(0x1c..=0x1f) {
            let expected = if byte == 0x07 {
                ByteClass::Bel
            } else {
                ByteClass::C0
            };
            assert_eq!(classify(byte), expected, "byte {byte:#04x}");
        }
    }

    #[test]
    fn anywhere_triggers() {
        assert_eq!(classify(0x18), ByteClass::CanSub);
        assert_eq!(classify(0x1a), ByteClass::CanSub);
        assert_eq!(classify(0x1b), ByteClass::Esc);
    }

    #[test]
    fn parameter_bytes() {
        for byte in b'0'..=b'9' {
            assert_eq!(classify(byte), ByteClass::Digit);
        }
        assert_eq!(classify(b':'), ByteClass::SubSeparator);
        assert_eq!(classify(b';'), ByteClass::Separator);
        for byte in [b'<', b'=', b'>', b'?'] {
            assert_eq!(classify(byte), ByteClass::PrivateMarker);
        }
    }

    #[test]
    fn introducers_are_final_bytes() {
        assert_eq!(classify(b'['), ByteClass::CsiIntroducer);
        assert_eq!(classify(b'P'), ByteClass::DcsIntroducer);
        assert_eq!(classify(b']'), ByteClass::OscIntroducer);
        for byte in [b'X', b'^', b'_'] {
            assert_eq!(classify(byte), ByteClass::StringIntroducer);
        }

        for byte in 0x40..=0x7e {
            assert!(classify(byte).is_final(), "byte {byte:#04x}");
        }
    }

    #[test]
    fn high_bytes_and_del() {
        assert_eq!(classify(0x7f), ByteClass::Del);
        for byte in 0x80..=0xff {
            assert_eq!(classify(byte), ByteClass::NonAscii);
        }
    }

    #[test]
    fn classes_are_disjoint_over_ranges() {
        for byte in 0x20..=0x2f {
            assert_eq!(classify(byte), ByteClass::Intermediate);
        }
        for byte in 0x30..=0x3f {
            assert!(classify(byte).is_parameter());
            assert!(!classify(byte).is_final());
        }
    }
}
