//! Predicates and helpers shared by both role cascades.

use super::{CascadeCtx, Verdict};
use crate::engine::actions::Action;
use crate::engine::arena::{gate, pace};
use crate::engine::claims::AbilityKind;
use crate::engine::clusterer::Cluster;
use crate::engine::geometry::turns_to_leave;
use crate::engine::types::{Entity, Position, Threat};

/// A drone dies before it can walk out of the arena.
///
/// Assumes the fixed damage rate of one attacking agent; monotonic in
/// health for a fixed trajectory.
pub fn killable(e: &Entity) -> bool {
    let rounds = turns_to_leave(e.pos, e.velocity);
    // turns-to-kill (health / damage) strictly below turns-to-leave
    (e.health as i64) < pace::DAMAGE_PER_TURN as i64 * rounds as i64
}

/// Largest cluster wins; ties go to the one nearest `from`, then to the
/// earlier cluster.
pub fn best_cluster<'a>(clusters: &'a [Cluster], from: Position) -> Option<&'a Cluster> {
    clusters
        .iter()
        .min_by_key(|c| (std::cmp::Reverse(c.len()), from.dist_sq(c.center)))
}

/// Future-investment redirect, shared by the warden's rule 5 and the
/// raider farm cascade: above the high-resource gate, send one qualifying
/// drone to the enemy-base corner nearer to it.
///
/// Qualifying: visible, not already controlled/shielded/claimed, healthy
/// enough to be worth the cast, and either threatening the own base or
/// aimless but killable.
pub(super) fn future_investment(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.locked {
        return;
    }
    if ctx.resource <= gate::HIGH_RESOURCE {
        return;
    }
    if let Some(action) = invest_redirect(ctx) {
        verdict.lock(action);
    }
}

pub(super) fn invest_redirect(ctx: &mut CascadeCtx<'_>) -> Option<Action> {
    let candidate = ctx.visible_drones().into_iter().find(|d| {
        d.threat != Threat::EnemyBase
            && !d.is_controlled
            && d.is_unshielded()
            && !ctx.claims.is_claimed(AbilityKind::Control, d.id)
            && d.health >= gate::REDIRECT_MIN_HEALTH
            && (d.threat == Threat::OwnBase || (d.threat == Threat::None && killable(d)))
    })?;

    let target = candidate.id;
    let corner = ctx.arena.nearer_enemy_corner(candidate.pos);
    ctx.claims.claim(AbilityKind::Control, target);
    Some(Action::Control { target, to: corner })
}
