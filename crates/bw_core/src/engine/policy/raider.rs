//! Raider (agents 1-2) cascades: farm early, then stage and deliver
//! drones at the enemy base.

use super::{common, CascadeCtx, Verdict};
use crate::engine::actions::Action;
use crate::engine::arena::{gate, range, timer};
use crate::engine::claims::AbilityKind;
use crate::engine::clusterer::cluster;
use crate::engine::types::Threat;

/// Attack rule 1: spend surplus resource on delivery. Two or more drones
/// already in wind range and within send range of the enemy base go in as
/// one wind; otherwise a single qualifying drone gets redirected to the
/// nearer enemy corner.
pub(super) fn invest(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.locked {
        return;
    }
    if ctx.resource <= gate::HIGH_RESOURCE {
        return;
    }

    let pushable: Vec<u32> = ctx
        .snapshot
        .drones()
        .filter(|d| {
            d.pos.dist_sq(ctx.agent.pos) < range::WIND
                && d.pos.dist_sq(ctx.arena.enemy_base) < range::WIND_SEND
                && d.is_unshielded()
                && !ctx.claims.is_claimed(AbilityKind::Wind, d.id)
        })
        .map(|d| d.id)
        .collect();
    if pushable.len() >= 2 {
        for id in pushable {
            ctx.claims.claim(AbilityKind::Wind, id);
        }
        verdict.lock(Action::Wind {
            to: ctx.arena.enemy_base,
        });
        return;
    }

    if let Some(action) = common::invest_redirect(ctx) {
        verdict.lock(action);
    }
}

/// Attack rule 2: stage one aimless drone for a later combined push.
pub(super) fn stage(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.locked {
        return;
    }
    if !ctx.can_cast() {
        return;
    }

    let target = ctx.visible_drones().into_iter().find(|d| {
        d.threat != Threat::EnemyBase
            && d.is_unshielded()
            && !d.is_controlled
            && !ctx.claims.is_claimed(AbilityKind::Control, d.id)
    });
    if let Some(drone) = target {
        let id = drone.id;
        ctx.claims.claim(AbilityKind::Control, id);
        verdict.lock(Action::Control {
            target: id,
            to: ctx.arena.own_base,
        });
    }
}

/// Attack rule 3: wind every staged drone that is in reach and already
/// threatening the enemy base.
pub(super) fn combined_push(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.locked {
        return;
    }
    if !ctx.can_cast() {
        return;
    }

    let targets: Vec<u32> = ctx
        .visible_drones()
        .into_iter()
        .filter(|d| {
            d.threat == Threat::EnemyBase
                && d.pos.dist_sq(ctx.agent.pos) < range::WIND
                && d.pos.dist_sq(ctx.arena.enemy_base) < range::WIND_SEND
                && d.is_unshielded()
                && !ctx.claims.is_claimed(AbilityKind::Wind, d.id)
        })
        .map(|d| d.id)
        .collect();
    if targets.is_empty() {
        return;
    }
    for id in targets {
        ctx.claims.claim(AbilityKind::Wind, id);
    }
    verdict.lock(Action::Wind {
        to: ctx.arena.enemy_base,
    });
}

/// Attack rule 4: no push happened, so shield the best inbound drone the
/// defense could otherwise defuse. Best = closest to the enemy base;
/// inside the escape band the shield outlasts any kill attempt.
pub(super) fn counter_shield(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.locked || verdict.action.is_some() {
        return;
    }
    if ctx.resource <= gate::SHIELD_RESERVE {
        return;
    }

    let best = ctx
        .snapshot
        .drones()
        .filter(|d| {
            d.pos.dist_sq(ctx.agent.pos) < range::SHIELD
                && d.is_unshielded()
                && !ctx.claims.is_claimed(AbilityKind::Shield, d.id)
                && d.threat == Threat::EnemyBase
                && d.health >= gate::REDIRECT_MIN_HEALTH
                && d.pos.dist_sq(ctx.arena.enemy_base) < range::SHIELD_ESCAPE
        })
        .min_by_key(|d| d.pos.dist_sq(ctx.arena.enemy_base));
    if let Some(drone) = best {
        let id = drone.id;
        ctx.claims.claim(AbilityKind::Shield, id);
        verdict.lock(Action::Shield { target: id });
    }
}

/// Attack rule 5: an agent that got controlled inside its engagement
/// window shields itself as soon as it is unshielded again.
pub(super) fn self_protect(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.locked || verdict.action.is_some() {
        return;
    }
    if !ctx.can_cast() {
        return;
    }
    if ctx.memory.controlled_while_engaged && ctx.agent.is_unshielded() {
        ctx.claims.claim(AbilityKind::Shield, ctx.agent.id);
        verdict.lock(Action::Shield {
            target: ctx.agent.id,
        });
    }
}

/// Attack rule 6: hold a stack corner near the enemy base; alternate
/// corners when parked without net movement for too long.
pub(super) fn stack_fallback(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.action.is_some() {
        return;
    }
    if ctx.memory.stuck_turns > timer::STUCK_LIMIT {
        ctx.memory.corner_idx = 1 - ctx.memory.corner_idx;
        ctx.memory.stuck_turns = 0;
    }
    verdict.propose(Action::Move {
        to: ctx.arena.enemy_corners[ctx.memory.corner_idx],
    });
}

/// Farm rule 1: sweep the best killable cluster in view of the assigned
/// farm zone.
pub(super) fn farm_sweep(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.locked {
        return;
    }

    let zone = ctx.arena.farm_zones[ctx.agent_idx];
    let killable: Vec<_> = ctx
        .snapshot
        .drones()
        .filter(|d| {
            d.pos.dist_sq(zone) < range::AGENT_VIEW
                && d.threat != Threat::EnemyBase
                && common::killable(d)
        })
        .cloned()
        .collect();
    if killable.is_empty() {
        return;
    }

    let clusters = cluster(&killable, range::CLUSTER_RADIUS);
    if let Some(best) = common::best_cluster(&clusters, zone) {
        verdict.propose(Action::Move { to: best.center });
    }
}

/// Farm rule 3: hold the assigned farm zone.
pub(super) fn zone_fallback(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.action.is_some() {
        return;
    }
    verdict.propose(Action::Move {
        to: ctx.arena.farm_zones[ctx.agent_idx],
    });
}
