//! Agents and movement policies for Stigmaze.
//!
//! An [`Agent`] owns its position, last velocity, goal, and a
//! [`TemperatureSchedule`]. Each tick it asks its [`MovementPolicy`] for a
//! [`Step`](stigmaze_core::Step), applies it if the destination is open,
//! and lets the policy deposit pheromone at the new position.
//!
//! # Per-agent tick
//!
//! 1. Cool the temperature from the remaining simulation time.
//! 2. Refresh the distance to goal; stop if it is zero.
//! 3. [`MovementPolicy::decide`] picks a step.
//! 4. Commit and deposit, or record a bump.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod policy;
pub mod schedule;

pub use agent::{Agent, AgentState, AgentStatus, StepOutcome};
pub use policy::{AcoParams, AcoPolicy, AcoPolicyBuilder, MovementPolicy};
pub use schedule::TemperatureSchedule;
