//! Transition helpers for the `otty-vtparse` finite state machine.
//!
//! The parser is driven by a table of state transitions that mirrors the
//! DEC/ECMA-48 state diagram, widened to accept UTF-8 text where the 8-bit
//! DEC grammar would see C1 controls. Each function in this module handles a
//! single parser state: given the class of an input byte it returns the next
//! [`State`] and the [`Action`] the parser should perform.

use crate::classify::ByteClass;
use crate::enums::{Action, State};

/// Transitions that override the state specific tables.
#[inline(always)]
const fn anywhere(class: ByteClass) -> Option<(State, Action)> {
    match class {
        ByteClass::CanSub => Some((State::Ground, Action::Execute)),
        ByteClass::Esc => Some((State::Escape, Action::None)),
        _ => None,
    }
}

/// Ground state handling printable data and C0 controls.
#[inline(always)]
const fn ground(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::Ground;

    match class {
        C0 | Bel => (Ground, Execute),
        Del => (Ground, Ignore),
        NonAscii => (Ground, Utf8),
        _ => (Ground, Print),
    }
}

/// ESC state waiting for the next byte to identify the sequence family.
#[inline(always)]
const fn escape(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::*;

    match class {
        C0 | Bel => (Ground, Execute),
        Intermediate => (EscapeIntermediate, Collect),
        CsiIntroducer => (CsiEntry, None),
        DcsIntroducer => (DcsEntry, None),
        OscIntroducer => (OscString, None),
        StringIntroducer => (SosPmApcString, None),
        Digit | SubSeparator | Separator | PrivateMarker | Final => {
            (Ground, EscDispatch)
        },
        Del | NonAscii | CanSub | Esc => (Escape, Ignore),
    }
}

/// ESC state that collects intermediate bytes before dispatch.
#[inline(always)]
const fn escape_intermediate(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::*;

    match class {
        C0 | Bel => (EscapeIntermediate, Execute),
        Intermediate => (EscapeIntermediate, Collect),
        Del | NonAscii | CanSub | Esc => (EscapeIntermediate, Ignore),
        _ => (Ground, EscDispatch),
    }
}

/// CSI entry point that validates and routes subsequent parameter bytes.
#[inline(always)]
const fn csi_entry(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::*;

    match class {
        C0 | Bel => (CsiEntry, Execute),
        Del | CanSub | Esc => (CsiEntry, Ignore),
        Intermediate => (CsiIntermediate, Collect),
        Digit | SubSeparator | Separator => (CsiParam, Param),
        PrivateMarker => (CsiParam, Collect),
        NonAscii => (CsiIgnore, None),
        _ => (Ground, CsiDispatch),
    }
}

/// CSI parameter collection handling numeric fields and separators.
#[inline(always)]
const fn csi_param(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::*;

    match class {
        C0 | Bel => (CsiParam, Execute),
        Del | CanSub | Esc => (CsiParam, Ignore),
        Digit | SubSeparator | Separator => (CsiParam, Param),
        // Private markers are only meaningful as the first parameter byte.
        PrivateMarker | NonAscii => (CsiIgnore, None),
        Intermediate => (CsiIntermediate, Collect),
        _ => (Ground, CsiDispatch),
    }
}

/// CSI intermediate state collecting extra bytes prior to dispatch.
#[inline(always)]
const fn csi_intermediate(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::*;

    match class {
        C0 | Bel => (CsiIntermediate, Execute),
        Del | CanSub | Esc => (CsiIntermediate, Ignore),
        Intermediate => (CsiIntermediate, Collect),
        Digit | SubSeparator | Separator | PrivateMarker | NonAscii => {
            (CsiIgnore, None)
        },
        _ => (Ground, CsiDispatch),
    }
}

/// CSI ignore state consuming bytes after a malformed sequence.
#[inline(always)]
const fn csi_ignore(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::*;

    match class {
        C0 | Bel => (CsiIgnore, Execute),
        class if class.is_final() => (Ground, None),
        _ => (CsiIgnore, Ignore),
    }
}

/// DCS entry point collecting the introducer and preparing parameters.
#[inline(always)]
const fn dcs_entry(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::*;

    match class {
        Intermediate => (DcsIntermediate, Collect),
        Digit | SubSeparator | Separator => (DcsParam, Param),
        PrivateMarker => (DcsParam, Collect),
        NonAscii => (DcsIgnore, None),
        class if class.is_final() => (DcsPassthrough, None),
        _ => (DcsEntry, Ignore),
    }
}

/// DCS parameter collection equivalent to `csi_param` but for DCS strings.
#[inline(always)]
const fn dcs_param(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::*;

    match class {
        Digit | SubSeparator | Separator => (DcsParam, Param),
        PrivateMarker | NonAscii => (DcsIgnore, None),
        Intermediate => (DcsIntermediate, Collect),
        class if class.is_final() => (DcsPassthrough, None),
        _ => (DcsParam, Ignore),
    }
}

/// DCS intermediate handler prior to entering passthrough mode.
#[inline(always)]
const fn dcs_intermediate(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::*;

    match class {
        Intermediate => (DcsIntermediate, Collect),
        class if class.is_parameter() => (DcsIgnore, None),
        NonAscii => (DcsIgnore, None),
        class if class.is_final() => (DcsPassthrough, None),
        _ => (DcsIntermediate, Ignore),
    }
}

/// DCS passthrough mode forwarding payload bytes to the hooked handler.
#[inline(always)]
const fn dcs_passthrough(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::DcsPassthrough;

    match class {
        Del | CanSub | Esc => (DcsPassthrough, Ignore),
        NonAscii => (DcsPassthrough, Utf8),
        _ => (DcsPassthrough, Put),
    }
}

/// DCS ignore state swallowing bytes after a malformed header. Only an
/// anywhere transition leaves it.
#[inline(always)]
const fn dcs_ignore(_class: ByteClass) -> (State, Action) {
    (State::DcsIgnore, Action::Ignore)
}

/// OSC payload collection until BEL or ESC is observed.
#[inline(always)]
const fn osc_string(class: ByteClass) -> (State, Action) {
    use Action::*;
    use ByteClass::*;
    use State::*;

    match class {
        // XTerm accepts BEL as an OSC terminator.
        Bel => (Ground, None),
        C0 | Del | CanSub | Esc => (OscString, Ignore),
        NonAscii => (OscString, Utf8),
        _ => (OscString, OscPut),
    }
}

/// SOS/PM/APC payloads are discarded until ESC leaves the state.
#[inline(always)]
const fn sos_pm_apc_string(_class: ByteClass) -> (State, Action) {
    (State::SosPmApcString, Action::Ignore)
}

/// Action to trigger upon entering a new state before reading the next byte.
#[inline(always)]
pub(crate) const fn entry_action(state: State) -> Action {
    use State::*;

    match state {
        Escape | CsiEntry | DcsEntry => Action::Clear,
        DcsPassthrough => Action::Hook,
        OscString => Action::OscStart,
        _ => Action::None,
    }
}

/// Action to trigger after leaving a state, typically to close a string.
#[inline(always)]
pub(crate) const fn exit_action(state: State) -> Action {
    match state {
        State::DcsPassthrough => Action::Unhook,
        State::OscString => Action::OscEnd,
        _ => Action::None,
    }
}

/// Core transition table that delegates to state-specific helpers.
#[inline(always)]
pub(crate) const fn transit(state: State, class: ByteClass) -> (State, Action) {
    use State::*;

    if let Some(transition) = anywhere(class) {
        return transition;
    }

    match state {
        Ground => ground(class),
        Escape => escape(class),
        EscapeIntermediate => escape_intermediate(class),
        CsiEntry => csi_entry(class),
        CsiParam => csi_param(class),
        CsiIntermediate => csi_intermediate(class),
        CsiIgnore => csi_ignore(class),
        DcsEntry => dcs_entry(class),
        DcsParam => dcs_param(class),
        DcsIntermediate => dcs_intermediate(class),
        DcsPassthrough => dcs_passthrough(class),
        DcsIgnore => dcs_ignore(class),
        OscString => osc_string(class),
        SosPmApcString => sos_pm_apc_string(class),
    }
}
