// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Input-side translation: user events → PTY bytes.

// Attach.
pub mod keyboard;
pub mod mouse;
pub mod paste;

// Re-export.
pub use keyboard::{Key, Modifiers, encode_key};
pub use mouse::{MouseButton, MouseEvent, MouseEventKind, encode_focus, encode_mouse};
pub use paste::encode_paste;
