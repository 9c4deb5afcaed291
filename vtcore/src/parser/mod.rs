// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Control-sequence parsing.
//!
//! [`machine`] holds the ECMA-48/DEC/xterm state machine, [`params`] the
//! CSI/DCS parameter lists with `:` sub-parameters, and [`perform`] the
//! [`Perform`] trait through which recognised events reach the sequence
//! dispatcher. The parser owns no terminal state; it can be driven against
//! any [`Perform`] implementation (the conformance tests use a plain event
//! recorder).

// Attach.
pub mod machine;
pub mod params;
pub mod perform;

// Re-export.
pub use machine::Parser;
pub use params::Params;
pub use perform::Perform;
