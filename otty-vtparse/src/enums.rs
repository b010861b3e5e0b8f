/// States of the DEC/ANSI escape sequence automaton.
///
/// Exactly one state is current at any time. The parser starts in
/// [`State::Ground`] and never terminates; every byte in every state has a
/// defined transition.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum State {
    #[default]
    Ground,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiParam,
    CsiIntermediate,
    CsiIgnore,
    DcsEntry,
    DcsParam,
    DcsIntermediate,
    DcsPassthrough,
    DcsIgnore,
    OscString,
    SosPmApcString,
}

impl State {
    /// States in which bytes are delivered as text and therefore pass
    /// through the UTF-8 recognizer.
    #[inline]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Ground | Self::OscString | Self::DcsPassthrough)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Ignore,
    Utf8,
    Print,
    Execute,
    Clear,
    Collect,
    Param,
    EscDispatch,
    CsiDispatch,
    Hook,
    Put,
    Unhook,
    OscStart,
    OscPut,
    OscEnd,
}
