//! Test Module
//!
//! Cross-module test suite for the MoodMate core.
//!
//! ## Test Categories
//! - `brain_tests`: Mood classification, keyword tables, reply selection
//! - `actor_tests`: Companion actor and the `ChatCompanion` seam
//! - `games_tests`: Memory match and tic-tac-toe through full games
//! - `wellness_tests`: Breathing, meditation and chat timing on virtual time
//! - `chaos_test`: Stale timers, restarts mid-delay and bursts of input
//! - `integration_tests`: Configuration to reply, end to end

pub mod brain_tests;
pub mod wellness_tests;
