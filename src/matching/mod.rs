// ABOUTME: Matching cascade modules: fuzzy search, auto-expansion gate, and the engine
// ABOUTME: The engine wires catalog, alias and unmapped stores into one short-circuit pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod engine;
pub mod expansion;
pub mod fuzzy;
