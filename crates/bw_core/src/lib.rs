//! # bw_core - Deterministic Arena Defense Decision Engine
//!
//! This library computes, once per discrete turn, an action for each of
//! three player-controlled agents in a bounded 2D arena: one warden holding
//! the own base and two raiders funneling neutral drones toward the enemy
//! base.
//!
//! ## Features
//! - 100% deterministic evaluation (same snapshot + memory = same actions)
//! - Greedy spatial clustering of hostile drones into actionable targets
//! - Ordered per-role rule cascades with cross-agent claim tracking
//! - Line-oriented snapshot ingestion and wire-format action emission

pub mod engine;
pub mod error;

pub use engine::actions::{Action, AgentDecision};
pub use engine::arena::Arena;
pub use engine::snapshot::{GameSetup, TurnSnapshot};
pub use engine::turn::TurnEngine;
pub use error::{Result, SnapshotError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
