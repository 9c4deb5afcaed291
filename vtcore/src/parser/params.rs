// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! CSI/DCS parameter lists with sub-parameters.
//!
//! Parameters are decimal integers separated by `;`; a `:` opens a
//! sub-parameter list within the current parameter (`38:2::R:G:B`). Values
//! clamp at [`PARAM_MAX`], the parameter count caps at [`MAX_PARAMS`] and
//! sub-parameters at [`MAX_SUBPARAMS`] per parameter; excess input is
//! swallowed without desynchronising the sequence.
//!
//! An absent or empty parameter is stored as 0; ECMA-48 default-parameter
//! semantics live in the accessors ([`Params::get_nonzero_or`]) so each
//! dispatcher op picks its own default.

use smallvec::SmallVec;

/// Maximum number of parameters retained per sequence.
pub const MAX_PARAMS: usize = 32;

/// Maximum sub-parameters retained per parameter.
pub const MAX_SUBPARAMS: usize = 8;

/// Parameter values clamp here.
pub const PARAM_MAX: u16 = u16::MAX;

type Group = SmallVec<[u16; 2]>;

/// A parsed parameter list.
#[derive(Debug, Clone, Default)]
pub struct Params {
    groups: SmallVec<[Group; 8]>,
    /// More than [`MAX_PARAMS`] parameters arrived; the excess is swallowed.
    overflowed: bool,
}

impl Params {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Number of parameters (groups).
    #[must_use]
    pub fn len(&self) -> usize { self.groups.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    /// First sub-parameter of parameter `i`, if present.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<u16> {
        self.groups.get(i).and_then(|g| g.first().copied())
    }

    /// Parameter `i` with `default` substituted when absent.
    #[must_use]
    pub fn get_or(&self, i: usize, default: u16) -> u16 {
        self.get(i).unwrap_or(default)
    }

    /// Parameter `i` with `default` substituted when absent **or zero**;
    /// the common ECMA-48 "default 1" rule.
    #[must_use]
    pub fn get_nonzero_or(&self, i: usize, default: u16) -> u16 {
        match self.get(i) {
            None | Some(0) => default,
            Some(v) => v,
        }
    }

    /// All sub-parameters of parameter `i`.
    #[must_use]
    pub fn subparams(&self, i: usize) -> &[u16] {
        self.groups.get(i).map_or(&[], |g| g.as_slice())
    }

    /// True when parameter `i` was written with sub-parameters (`:`).
    #[must_use]
    pub fn has_subparams(&self, i: usize) -> bool {
        self.groups.get(i).is_some_and(|g| g.len() > 1)
    }

    /// Iterate over the parameter groups as slices.
    pub fn iter(&self) -> impl Iterator<Item = &[u16]> {
        self.groups.iter().map(SmallVec::as_slice)
    }

    // Accumulation interface, used by the state machine only.

    pub(crate) fn clear(&mut self) {
        self.groups.clear();
        self.overflowed = false;
    }

    fn ensure_group(&mut self) {
        if self.groups.is_empty() {
            self.groups.push(Group::new());
        }
        if self.groups.last().is_some_and(SmallVec::is_empty) {
            self.groups.last_mut().expect("non-empty").push(0);
        }
    }

    /// Fold one decimal digit into the current sub-parameter.
    pub(crate) fn accumulate_digit(&mut self, digit: u8) {
        if self.overflowed {
            return;
        }
        self.ensure_group();
        let group = self.groups.last_mut().expect("ensured above");
        if group.len() > MAX_SUBPARAMS {
            return;
        }
        let cur = group.last_mut().expect("ensured above");
        let next = u32::from(*cur) * 10 + u32::from(digit);
        *cur = u16::try_from(next).unwrap_or(PARAM_MAX);
    }

    /// `;`: close the current parameter and open the next.
    pub(crate) fn next_param(&mut self) {
        if self.overflowed {
            return;
        }
        self.ensure_group();
        if self.groups.len() < MAX_PARAMS {
            self.groups.push(Group::new());
        } else {
            self.overflowed = true;
        }
    }

    /// `:`: open a sub-parameter within the current parameter.
    pub(crate) fn next_subparam(&mut self) {
        if self.overflowed {
            return;
        }
        self.ensure_group();
        let group = self.groups.last_mut().expect("ensured above");
        if group.len() <= MAX_SUBPARAMS {
            group.push(0);
        }
    }

    /// Close accumulation at dispatch: an entirely empty list stays empty,
    /// but a trailing `;` yields a final empty (zero) parameter.
    pub(crate) fn finish(&mut self) {
        if let Some(last) = self.groups.last_mut() {
            if last.is_empty() {
                last.push(0);
            }
        }
    }
}
