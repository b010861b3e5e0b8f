//! Parameter accumulator for CSI and DCS sequences.
//!
//! ECMA-48 defines a parameter string as numeric fields separated by `;`.
//! Each field may be subdivided with `:` (section 5.4.2), which is how
//! sequences such as `CSI 38:2::128:64:192 m` or the kitty curly underline
//! `CSI 4:3 m` are expressed. A field is stored as a group whose first value
//! is the primary parameter and whose remaining values refine it.
//!
//! An omitted value is recorded as `0`, the conventional "use the default"
//! marker, so `CSI ;5 H` yields `[[0], [5]]` and `CSI m` yields `[[0]]`.

use log::debug;

/// Maximum number of `;`-separated groups kept per sequence.
pub const MAX_PARAMS: usize = 16;

/// Maximum number of `:`-separated values kept per group.
pub const MAX_SUBPARAMS: usize = 16;

/// Ordered list of parameter groups collected for a CSI or DCS sequence.
#[derive(Clone, PartialEq, Eq)]
pub struct Params {
    groups: [[u16; MAX_SUBPARAMS]; MAX_PARAMS],
    lens: [usize; MAX_PARAMS],
    len: usize,
    /// A separator could not open a new slot. Digits are dropped until a
    /// separator succeeds again.
    overflowed: bool,
    truncated: bool,
}

impl Default for Params {
    fn default() -> Self {
        let mut params = Self {
            groups: [[0; MAX_SUBPARAMS]; MAX_PARAMS],
            lens: [0; MAX_PARAMS],
            len: 0,
            overflowed: false,
            truncated: false,
        };
        params.begin();
        params
    }
}

impl Params {
    /// Number of groups.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the group at `index`; the primary parameter comes first.
    pub fn get(&self, index: usize) -> Option<&[u16]> {
        if index < self.len {
            Some(&self.groups[index][..self.lens[index]])
        } else {
            None
        }
    }

    /// Iterates over the groups in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &[u16]> + '_ {
        self.groups[..self.len]
            .iter()
            .zip(&self.lens[..self.len])
            .map(|(group, &len)| &group[..len])
    }

    /// Whether groups or values were dropped because a limit was reached.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn to_vec(&self) -> Vec<Vec<u16>> {
        self.iter().map(<[u16]>::to_vec).collect()
    }

    /// Resets to a single group holding one pending zero value.
    pub(crate) fn begin(&mut self) {
        self.groups[0][0] = 0;
        self.lens[0] = 1;
        self.len = 1;
        self.overflowed = false;
        self.truncated = false;
    }

    /// Appends a decimal digit to the value currently open.
    pub(crate) fn digit(&mut self, digit: u8) {
        if self.overflowed {
            return;
        }

        let group = self.len - 1;
        let value = &mut self.groups[group][self.lens[group] - 1];
        *value = value.saturating_mul(10).saturating_add(u16::from(digit));
    }

    /// Closes the current value and opens a new one in the same group.
    pub(crate) fn subseparator(&mut self) {
        if self.overflowed {
            return;
        }

        let group = self.len - 1;
        if self.lens[group] == MAX_SUBPARAMS {
            self.overflow();
            return;
        }

        self.groups[group][self.lens[group]] = 0;
        self.lens[group] += 1;
    }

    /// Closes the current group and opens a new one.
    pub(crate) fn separator(&mut self) {
        if self.len == MAX_PARAMS {
            self.overflow();
            return;
        }

        self.groups[self.len][0] = 0;
        self.lens[self.len] = 1;
        self.len += 1;
        self.overflowed = false;
    }

    /// Completes the list; the open value already counts as present.
    pub(crate) fn finish(&self) -> &Self {
        self
    }

    fn overflow(&mut self) {
        if !self.truncated {
            debug!("parameter limit reached, ignoring the rest of the list");
        }
        self.overflowed = true;
        self.truncated = true;
    }
}

impl std::fmt::Debug for Params {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulate(input: &[u8]) -> Params {
        let mut params = Params::default();
        params.begin();
        for &byte in input {
            match byte {
                b'0'..=b'9' => params.digit(byte - b'0'),
                b':' => params.subseparator(),
                b';' => params.separator(),
                other => panic!("not a parameter byte: {other:#04x}"),
            }
        }
        params.finish().clone()
    }

    #[test]
    fn begin_holds_one_default_value() {
        let params = accumulate(b"");
        assert_eq!(params.to_vec(), vec![vec![0]]);
        assert_eq!(params.len(), 1);
        assert!(!params.is_empty());
    }

    #[test]
    fn groups_and_subparameters() {
        let params = accumulate(b"1;2:3:4;5");
        assert_eq!(params.to_vec(), vec![vec![1], vec![2, 3, 4], vec![5]]);
        assert_eq!(params.get(1), Some(&[2, 3, 4][..]));
        assert_eq!(params.get(3), None);
    }

    #[test]
    fn omitted_values_default_to_zero() {
        assert_eq!(accumulate(b";").to_vec(), vec![vec![0], vec![0]]);
        assert_eq!(accumulate(b";;7").to_vec(), vec![vec![0], vec![0], vec![7]]);
        assert_eq!(
            accumulate(b"38:2::128:64:192").to_vec(),
            vec![vec![38, 2, 0, 128, 64, 192]]
        );
    }

    #[test]
    fn values_saturate() {
        let params = accumulate(b"99999999999;1");
        assert_eq!(params.to_vec(), vec![vec![u16::MAX], vec![1]]);
        assert!(!params.is_truncated());
    }

    #[test]
    fn too_many_groups_are_truncated() {
        let input = (1..=MAX_PARAMS + 2)
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(";");
        let params = accumulate(input.as_bytes());

        let expected = (1..=MAX_PARAMS as u16).map(|n| vec![n]).collect::<Vec<_>>();
        assert_eq!(params.to_vec(), expected);
        assert!(params.is_truncated());
    }

    #[test]
    fn too_many_subparameters_are_truncated() {
        let mut input = "1".to_string();
        for n in 2..=MAX_SUBPARAMS + 3 {
            input.push_str(&format!(":{n}"));
        }
        input.push_str(";9");
        let params = accumulate(input.as_bytes());

        assert_eq!(params.len(), 2);
        assert_eq!(params.get(0).map(<[u16]>::len), Some(MAX_SUBPARAMS));
        assert_eq!(params.get(0).and_then(|g| g.last().copied()), Some(16));
        // The next group opens normally after an overflowing one.
        assert_eq!(params.get(1), Some(&[9][..]));
        assert!(params.is_truncated());
    }

    #[test]
    fn begin_clears_previous_sequence() {
        let mut params = accumulate(b"1;2;3");
        params.begin();
        assert_eq!(params.to_vec(), vec![vec![0]]);
        assert!(!params.is_truncated());
    }
}
