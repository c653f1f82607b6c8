//! Generate a dated commit history for a contribution graph.
//!
//! A run draws a [`schedule::Schedule`] of events across a window of days and
//! replays each one as a commit in a local repository through a
//! [`git::CommandRunner`], optionally force-pushing the result.

pub mod cli;
pub mod config;
pub mod contribute;
pub mod error;
pub mod git;
pub mod model;
pub mod output;
pub mod schedule;
pub mod util;
