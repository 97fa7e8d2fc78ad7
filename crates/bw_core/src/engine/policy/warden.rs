//! Warden (agent 0) cascade: hold the own base.

use super::{common, CascadeCtx, Verdict};
use crate::engine::actions::Action;
use crate::engine::arena::{gate, range};
use crate::engine::claims::AbilityKind;
use crate::engine::clusterer::cluster;
use crate::engine::types::Threat;

/// Rule 1: answer the most dangerous drone cluster.
///
/// With enough resource the choice is: wind the whole cluster toward the
/// enemy base (stop-push when it is already on the doorstep, extraction
/// when it is far enough out to be worth the mileage), else control the
/// member nearest the base, else close in on the cluster center. Without
/// resource the warden still moves in to fight.
pub(super) fn base_defense(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    let Some(group) = ctx.danger.claim_for(ctx.agent_idx) else {
        return;
    };
    let center = group.cluster.center;

    if !ctx.can_cast() {
        verdict.lock(Action::Move { to: center });
        return;
    }

    let center_d = center.dist_sq(ctx.arena.own_base);
    let agent_d = ctx.agent.pos.dist_sq(center);

    let wind_band = center_d <= range::CONTROL || center_d >= range::WIND_EXTRACT;
    if agent_d < range::WIND
        && wind_band
        && group.cluster.unshielded_ratio() >= gate::PUSH_UNSHIELDED_RATIO
    {
        for member in &group.cluster.members {
            ctx.claims.claim(AbilityKind::Wind, member.id);
        }
        verdict.lock(Action::Wind {
            to: ctx.arena.enemy_base,
        });
        return;
    }

    let control_band = center_d <= range::CONTROL || center_d >= range::CONTROL_EXTRACT;
    let closest = group.cluster.members.iter().min_by_key(|m| m.base_dist_sq);
    if let Some(m) = closest {
        if agent_d < range::CONTROL
            && control_band
            && m.threat == Threat::OwnBase
            && m.health > gate::WARD_MIN_HEALTH
            && !m.is_controlled
            && m.is_unshielded()
            && !ctx.claims.is_claimed(AbilityKind::Control, m.id)
        {
            ctx.claims.claim(AbilityKind::Control, m.id);
            verdict.lock(Action::Control {
                target: m.id,
                to: ctx.arena.enemy_base,
            });
            return;
        }
    }

    verdict.lock(Action::Move { to: center });
}

/// Rule 2: verified assault on the base.
///
/// Overrides even a locked base-defense action: self-shield when an
/// attacker is in casting reach of this agent, otherwise disable the
/// nearest attacker toward the enemy base and strike it off the list.
pub(super) fn assault_response(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if ctx.attackers.is_empty() {
        return;
    }

    if ctx.agent.is_unshielded() && ctx.can_cast() {
        let in_reach = ctx.attackers.iter().any(|&id| {
            ctx.entity(id)
                .is_some_and(|e| e.pos.dist_sq(ctx.agent.pos) < range::CONTROL)
        });
        if in_reach {
            ctx.claims.claim(AbilityKind::Shield, ctx.agent.id);
            verdict.lock(Action::Shield {
                target: ctx.agent.id,
            });
            return;
        }
    }

    if !ctx.can_cast() {
        return;
    }
    let nearest = ctx
        .attackers
        .iter()
        .filter_map(|&id| ctx.entity(id))
        .filter(|e| {
            e.is_unshielded()
                && !e.is_controlled
                && !ctx.claims.is_claimed(AbilityKind::Wind, e.id)
                && !ctx.claims.is_claimed(AbilityKind::Control, e.id)
        })
        .min_by_key(|e| e.pos.dist_sq(ctx.agent.pos));
    let Some(attacker) = nearest else {
        return;
    };

    let id = attacker.id;
    let dist = attacker.pos.dist_sq(ctx.agent.pos);
    if dist < range::WIND {
        ctx.claims.claim(AbilityKind::Wind, id);
        ctx.attackers.retain(|&a| a != id);
        verdict.lock(Action::Wind {
            to: ctx.arena.enemy_base,
        });
    } else if dist < range::CONTROL {
        ctx.claims.claim(AbilityKind::Control, id);
        ctx.attackers.retain(|&a| a != id);
        verdict.lock(Action::Control {
            target: id,
            to: ctx.arena.enemy_base,
        });
    }
}

/// Rule 3: no threat on the board, but a disable-able adversary in sight.
/// Send it to the far side corner; the walk back buys whole turns.
pub(super) fn opportunistic_disable(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.locked || verdict.action.is_some() {
        return;
    }
    if !ctx.can_cast() {
        return;
    }

    let target = ctx
        .visible_enemies()
        .into_iter()
        .filter(|e| {
            e.is_unshielded()
                && !e.is_controlled
                && !ctx.claims.is_claimed(AbilityKind::Control, e.id)
        })
        .min_by_key(|e| e.pos.dist_sq(ctx.agent.pos));
    if let Some(enemy) = target {
        let id = enemy.id;
        ctx.claims.claim(AbilityKind::Control, id);
        verdict.lock(Action::Control {
            target: id,
            to: ctx.arena.exile_corner,
        });
    }
}

/// Rule 4: farm the best killable cluster, but never drift out of the
/// defensive band around the base.
pub(super) fn farm(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.locked {
        return;
    }

    let killable: Vec<_> = ctx
        .visible_drones()
        .into_iter()
        .filter(|d| d.threat != Threat::EnemyBase && common::killable(d))
        .cloned()
        .collect();
    if killable.is_empty() {
        return;
    }

    let clusters: Vec<_> = cluster(&killable, range::CLUSTER_RADIUS)
        .into_iter()
        .filter(|c| c.center.dist_sq(ctx.arena.own_base) < range::FARM_BAND)
        .collect();
    if let Some(best) = common::best_cluster(&clusters, ctx.agent.pos) {
        verdict.propose(Action::Move { to: best.center });
    }
}

/// Rule 6: patrol the arc in attack mode, hold the farm zone otherwise.
pub(super) fn fallback(ctx: &mut CascadeCtx<'_>, verdict: &mut Verdict) {
    if verdict.action.is_some() {
        return;
    }

    if ctx.attack_mode {
        let reached = ctx
            .agent
            .pos
            .dist_sq(ctx.arena.patrol_arc[ctx.memory.patrol_idx])
            < range::PATROL_ADVANCE;
        if reached {
            ctx.memory.patrol_idx = (ctx.memory.patrol_idx + 1) % ctx.arena.patrol_arc.len();
        }
        verdict.propose(Action::Move {
            to: ctx.arena.patrol_arc[ctx.memory.patrol_idx],
        });
    } else {
        verdict.propose(Action::Move {
            to: ctx.arena.farm_zones[ctx.agent_idx],
        });
    }
}
