//! Arena constants and side-dependent geometry.
//!
//! All range thresholds are squared distances; waypoints are authored for
//! the base-at-origin side and point-reflected across the arena when the
//! own base occupies the far corner.

use serde::{Deserialize, Serialize};

use super::types::Position;

pub mod bounds {
    /// Arena is axis-aligned, [0, MAX_X] x [0, MAX_Y].
    pub const MAX_X: i32 = 17630;
    pub const MAX_Y: i32 = 9000;
}

/// Squared-distance thresholds.
pub mod range {
    /// Base fog radius: drones inside are candidates for danger ranking (6000^2).
    pub const BASE_FOG: i64 = 36_000_000;

    /// Agent sight radius (2200^2).
    pub const AGENT_VIEW: i64 = 4_840_000;

    /// Wind cast radius around the agent (1280^2).
    pub const WIND: i64 = 1_638_400;

    /// Outside this band from the own base a wind is a worthwhile
    /// extraction rather than a stop (2800^2).
    pub const WIND_EXTRACT: i64 = 7_840_000;

    /// A drone this close to the enemy base can be wind-delivered (7200^2).
    pub const WIND_SEND: i64 = 51_840_000;

    /// Control cast radius, same as sight (2200^2).
    pub const CONTROL: i64 = AGENT_VIEW;

    /// Outside this band from the own base a control is an extraction (4600^2).
    pub const CONTROL_EXTRACT: i64 = 21_160_000;

    /// Shield cast radius, same as sight (2200^2).
    pub const SHIELD: i64 = AGENT_VIEW;

    /// A drone within this range of the enemy base outlives its shield
    /// before it can be brought down (4800^2 = 12 turns of drone movement).
    pub const SHIELD_ESCAPE: i64 = 23_040_000;

    /// Mutual-closeness radius for drone clustering (1600^2).
    pub const CLUSTER_RADIUS: i64 = 2_560_000;

    /// Enemy agents inside this radius of the own base count as an active
    /// assault (8000^2).
    pub const ASSAULT_ALERT: i64 = 64_000_000;

    /// Patrol waypoint is considered reached inside this radius (800^2).
    pub const PATROL_ADVANCE: i64 = 640_000;

    /// The warden only farms clusters within this band of the own base (9000^2).
    pub const FARM_BAND: i64 = 81_000_000;
}

/// Resource thresholds for ability gating and mode switches.
pub mod gate {
    /// Fixed cost of every ability cast.
    pub const ABILITY_COST: i32 = 10;

    /// Future-investment redirects only fire above this pool level.
    pub const HIGH_RESOURCE: i32 = 50;

    /// Counter-shielding keeps this much pool in reserve.
    pub const SHIELD_RESERVE: i32 = 20;

    /// The team flips from farm to attack mode above this pool level and
    /// never flips back.
    pub const ATTACK_MODE: i32 = 80;

    /// Minimum drone health worth a future-investment redirect.
    pub const REDIRECT_MIN_HEALTH: i32 = 15;

    /// Minimum drone health worth a defensive redirect.
    pub const WARD_MIN_HEALTH: i32 = 10;

    /// A cluster wind needs at least this share of unshielded members.
    pub const PUSH_UNSHIELDED_RATIO: f32 = 0.75;
}

pub mod pace {
    /// Distance a drone travels per turn.
    pub const DRONE_STEP: i32 = 400;

    /// Damage one agent deals to an adjacent drone per turn.
    pub const DAMAGE_PER_TURN: i32 = 2;

    /// Cap for trajectory projection; a stationary drone never leaves the
    /// arena, so the projection loop needs a horizon.
    pub const MAX_PROJECTION_TURNS: u32 = 400;
}

pub mod timer {
    /// Turns an aggressive cast keeps the agent in its engagement window.
    pub const ENGAGEMENT_WINDOW: u32 = 5;

    /// Turns without net movement before a raider rotates its stack corner.
    pub const STUCK_LIMIT: u32 = 3;
}

/// Waypoints authored for the base-at-origin side.
mod waypoint {
    use super::Position;

    /// Assigned farm zones, one per agent index (center, top, bottom).
    pub const FARM_ZONES: [Position; 3] = [
        Position::new(5000, 4700),
        Position::new(6640, 1760),
        Position::new(1950, 6500),
    ];

    /// Stack corners near the enemy base, as offsets from it.
    pub const ENEMY_CORNER_OFFSETS: [Position; 2] =
        [Position::new(400, 4500), Position::new(4500, 400)];

    /// Warden patrol arc just inside the base fog.
    pub const PATROL_ARC: [Position; 3] = [
        Position::new(5200, 1800),
        Position::new(4100, 4100),
        Position::new(1800, 5200),
    ];
}

/// Side-dependent geometry for one match: both base corners plus every
/// waypoint, reflected when the own base is not at the origin corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena {
    pub own_base: Position,
    pub enemy_base: Position,
    /// Assigned farm zones, one per agent index.
    pub farm_zones: [Position; 3],
    /// Stack corners near the enemy base; redirect and fallback targets.
    pub enemy_corners: [Position; 2],
    /// Warden patrol route in attack mode.
    pub patrol_arc: [Position; 3],
    /// The map side corner farther from the own base; where disabled
    /// adversaries get sent.
    pub exile_corner: Position,
}

impl Arena {
    pub fn from_own_base(own_base: Position) -> Self {
        let at_origin = own_base.x == 0;
        let enemy_base = if at_origin {
            Position::new(bounds::MAX_X, bounds::MAX_Y)
        } else {
            Position::new(0, 0)
        };

        let place = |p: Position| if at_origin { p } else { reflect(p) };

        // Corner offsets are relative to the enemy base, so they land on
        // the reflected side exactly when the own waypoints do not.
        let corner = |p: Position| if at_origin { reflect(p) } else { p };

        let side_corners = [
            Position::new(bounds::MAX_X, 0),
            Position::new(0, bounds::MAX_Y),
        ];
        let exile_corner = if side_corners[0].dist_sq(own_base) >= side_corners[1].dist_sq(own_base)
        {
            side_corners[0]
        } else {
            side_corners[1]
        };

        Self {
            own_base,
            enemy_base,
            farm_zones: waypoint::FARM_ZONES.map(place),
            enemy_corners: waypoint::ENEMY_CORNER_OFFSETS.map(corner),
            patrol_arc: waypoint::PATROL_ARC.map(place),
            exile_corner,
        }
    }

    /// Of the two enemy-base corners, the one nearer to `pos`.
    pub fn nearer_enemy_corner(&self, pos: Position) -> Position {
        if pos.dist_sq(self.enemy_corners[0]) < pos.dist_sq(self.enemy_corners[1]) {
            self.enemy_corners[0]
        } else {
            self.enemy_corners[1]
        }
    }
}

/// Point reflection across the arena center.
fn reflect(p: Position) -> Position {
    Position::new(bounds::MAX_X - p.x, bounds::MAX_Y - p.y)
}
