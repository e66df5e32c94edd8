//! Shared fixtures for EditSimilar integration tests

#![allow(dead_code)]

pub mod wiki_builder;

pub use wiki_builder::WikiBuilder;

/// Marker list as an operator would write it
pub const STUB_MARKERS: &str = "Articles in these categories need attention:\n* Stub articles\n* Cleanup needed\n";
