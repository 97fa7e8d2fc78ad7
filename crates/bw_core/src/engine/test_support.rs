//! Shared fixtures for engine tests.

use super::snapshot::TurnSnapshot;
use super::types::{Entity, EntityKind, Position, SideStatus, Threat, Velocity};

/// Idle drone with no base lock.
pub fn drone_at(id: u32, x: i32, y: i32) -> Entity {
    Entity {
        id,
        kind: EntityKind::Drone,
        pos: Position::new(x, y),
        shield_turns: 0,
        is_controlled: false,
        health: 14,
        velocity: Velocity::new(0, 0),
        near_base: false,
        threat: Threat::None,
        base_dist_sq: Position::new(x, y).dist_sq(Position::new(0, 0)),
    }
}

/// Drone locked onto the own base (danger candidate).
pub fn threat_drone_at(id: u32, x: i32, y: i32) -> Entity {
    let mut e = drone_at(id, x, y);
    e.near_base = true;
    e.threat = Threat::OwnBase;
    e.velocity = Velocity::new(-400, 0);
    e
}

pub fn agent_at(id: u32, x: i32, y: i32) -> Entity {
    let mut e = drone_at(id, x, y);
    e.kind = EntityKind::OwnAgent;
    e.health = 0;
    e
}

pub fn enemy_at(id: u32, x: i32, y: i32) -> Entity {
    let mut e = drone_at(id, x, y);
    e.kind = EntityKind::EnemyAgent;
    e.health = 0;
    e
}

/// Snapshot with full pools and the given entities, input order preserved.
pub fn snapshot_with(entities: Vec<Entity>) -> TurnSnapshot {
    snapshot_with_resource(entities, 100)
}

pub fn snapshot_with_resource(entities: Vec<Entity>, resource: i32) -> TurnSnapshot {
    TurnSnapshot {
        own: SideStatus {
            health: 3,
            resource,
        },
        enemy: SideStatus {
            health: 3,
            resource: 0,
        },
        entities,
    }
}
