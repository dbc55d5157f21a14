//! MoodMate core
//! "The Companion" - keyword mood detection, canned replies, kids games and
//! wellness timers behind a small actor.

pub mod actors;
pub mod brain;
pub mod chat;
pub mod config;
pub mod error;
pub mod games;
pub mod journal;
pub mod scheduler;
pub mod telemetry;
pub mod wellness;

#[cfg(test)]
mod tests;
