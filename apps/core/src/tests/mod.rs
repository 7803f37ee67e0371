//! Test Module
//!
//! Cross-module test suite for the DigestiGo core.
//!
//! ## Test Categories
//! - `brain_tests`: classification precedence, extraction, replies and cards end to end
//! - `remote_tests`: remote responder history, timeout and fallback behavior
//! - `journal_tests`: recording bot output into the session journal

pub mod journal_tests;
