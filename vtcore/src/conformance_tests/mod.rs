// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End-to-end conformance tests: raw byte streams through the public
//! [`Terminal`](crate::Terminal) API, asserting on the resulting screen
//! state, replies and events.

pub mod fixtures;

mod test_basic_output;
mod test_erase_and_edit;
mod test_matches_and_search;
mod test_modes_and_screens;
mod test_osc_and_replies;
mod test_sixel_pipeline;
mod test_split_feed;
