//! Turn snapshot ingestion.
//!
//! Wire format, whitespace-separated lines:
//!
//! - Init block: `baseX baseY` then `agentsPerPlayer`.
//! - Turn block: `ownHealth ownResource`, `enemyHealth enemyResource`,
//!   `entityCount`, then one line per entity:
//!   `id kind x y shieldTurns isControlled health vx vy nearBase threat`.
//!
//! Malformed input is a fatal precondition violation; the turn cannot be
//! evaluated and the caller should stop rather than guess.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::types::{Entity, EntityKind, Position, SideStatus, Threat, Velocity};
use crate::error::{Result, SnapshotError};

/// Always 3 in the current ruleset.
pub const AGENTS_PER_SIDE: usize = 3;

/// Match setup read once at process start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSetup {
    pub arena: Arena,
    pub agents_per_side: usize,
}

impl GameSetup {
    pub fn parse<I: Iterator<Item = String>>(lines: &mut I) -> Result<Self> {
        let base_line = next_line(lines, "base position")?;
        let fields = split_exact(&base_line, 2, "base position")?;
        let x: i32 = field(&fields, 0, "base position")?;
        let y: i32 = field(&fields, 1, "base position")?;

        let count_line = next_line(lines, "agent count")?;
        let fields = split_exact(&count_line, 1, "agent count")?;
        let agents_per_side: usize = field(&fields, 0, "agent count")?;

        Ok(Self {
            arena: Arena::from_own_base(Position::new(x, y)),
            agents_per_side,
        })
    }
}

/// Everything visible this turn. Rebuilt from scratch every turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub own: SideStatus,
    pub enemy: SideStatus,
    /// Input order is preserved; own agents index by order of appearance.
    pub entities: Vec<Entity>,
}

impl TurnSnapshot {
    /// Parse one turn block. Returns `Ok(None)` when the input ends
    /// cleanly before the block's first line (host closed the match).
    pub fn parse<I: Iterator<Item = String>>(
        lines: &mut I,
        arena: &Arena,
    ) -> Result<Option<Self>> {
        let Some(own_line) = lines.next() else {
            return Ok(None);
        };
        let own = parse_status(&own_line, "own status")?;
        let enemy = parse_status(&next_line(lines, "enemy status")?, "enemy status")?;

        let count_line = next_line(lines, "entity count")?;
        let fields = split_exact(&count_line, 1, "entity count")?;
        let count: usize = field(&fields, 0, "entity count")?;

        let mut entities = Vec::with_capacity(count);
        for _ in 0..count {
            let line = next_line(lines, "entity")?;
            entities.push(parse_entity(&line, arena)?);
        }

        let snapshot = Self {
            own,
            enemy,
            entities,
        };
        let found = snapshot.own_agents().len();
        if found != AGENTS_PER_SIDE {
            return Err(SnapshotError::AgentCountMismatch {
                expected: AGENTS_PER_SIDE,
                found,
            });
        }
        Ok(Some(snapshot))
    }

    pub fn drones(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::Drone)
    }

    /// Own agents in input order; index here is the agent index.
    pub fn own_agents(&self) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::OwnAgent)
            .collect()
    }

    pub fn enemy_agents(&self) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|e| e.kind == EntityKind::EnemyAgent)
            .collect()
    }

    pub fn entity(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }
}

fn next_line<I: Iterator<Item = String>>(lines: &mut I, context: &'static str) -> Result<String> {
    lines
        .next()
        .ok_or(SnapshotError::MissingLine { context })
}

fn split_exact<'a>(
    line: &'a str,
    expected: usize,
    context: &'static str,
) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != expected {
        return Err(SnapshotError::FieldCount {
            context,
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

fn field<T: FromStr>(fields: &[&str], idx: usize, context: &'static str) -> Result<T> {
    fields[idx].parse().map_err(|_| SnapshotError::NonNumeric {
        context,
        field: idx,
        value: fields[idx].to_string(),
    })
}

fn parse_status(line: &str, context: &'static str) -> Result<SideStatus> {
    let fields = split_exact(line, 2, context)?;
    Ok(SideStatus {
        health: field(&fields, 0, context)?,
        resource: field(&fields, 1, context)?,
    })
}

fn parse_entity(line: &str, arena: &Arena) -> Result<Entity> {
    const CTX: &str = "entity";
    let fields = split_exact(line, 11, CTX)?;

    let id: u32 = field(&fields, 0, CTX)?;
    let kind_code: i32 = field(&fields, 1, CTX)?;
    let kind = EntityKind::from_code(kind_code).ok_or(SnapshotError::UnknownKind(kind_code))?;
    let pos = Position::new(field(&fields, 2, CTX)?, field(&fields, 3, CTX)?);
    let shield_turns: u32 = field(&fields, 4, CTX)?;
    let is_controlled = field::<i32>(&fields, 5, CTX)? == 1;
    let health: i32 = field(&fields, 6, CTX)?;
    let velocity = Velocity::new(field(&fields, 7, CTX)?, field(&fields, 8, CTX)?);
    let near_base = field::<i32>(&fields, 9, CTX)? == 1;
    let threat_code: i32 = field(&fields, 10, CTX)?;
    let threat = Threat::from_code(threat_code).ok_or(SnapshotError::UnknownThreat(threat_code))?;

    Ok(Entity {
        id,
        kind,
        pos,
        shield_turns,
        is_controlled,
        health,
        velocity,
        near_base,
        threat,
        base_dist_sq: pos.dist_sq(arena.own_base),
    })
}
