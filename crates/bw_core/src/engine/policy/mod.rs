//! Per-agent rule cascades.
//!
//! Each role evaluates an ordered list of named rules sharing one cascade
//! context. The cascade is not a pure first-match chain: a rule that locks
//! stops the strictly-earlier defensive rules from being reconsidered, but
//! a later rule may still overwrite an unlocked proposal, and the assault
//! response deliberately overrides even a locked base-defense action. Last
//! assignment wins; the terminal fallback fires only when no rule proposed
//! anything, so every cascade ends in a move and no agent ever finishes a
//! turn without an action.
//!
//! ## Evaluation Order (Fixed, Do Not Change)
//!
//! Warden: base defense > assault response > opportunistic disable > farm
//! > future investment > patrol/zone fallback.
//!
//! Raider (attack mode): future investment > stage > combined push >
//! counter-shield > self-protect > stack-corner fallback.
//!
//! Raider (farm mode): farm sweep > future investment > zone fallback.

mod common;
mod raider;
mod warden;

use tracing::trace;

use super::actions::Action;
use super::arena::{gate, range, Arena};
use super::claims::ClaimSet;
use super::danger::DangerBoard;
use super::memory::{AgentMemory, AgentRole};
use super::snapshot::TurnSnapshot;
use super::types::{Entity, EntityId, EntityKind};

/// Everything one agent's cascade reads and mutates.
///
/// Shared mutable pieces (claims, danger assignments, attacker list) are
/// threaded through all three cascades in evaluation order; that is the
/// only cross-agent coordination mechanism.
pub struct CascadeCtx<'a> {
    pub agent_idx: usize,
    pub agent: &'a Entity,
    pub arena: &'a Arena,
    pub snapshot: &'a TurnSnapshot,
    pub danger: &'a mut DangerBoard,
    pub claims: &'a mut ClaimSet,
    pub memory: &'a mut AgentMemory,
    pub attack_mode: bool,
    /// Own pool after earlier agents' debits this turn.
    pub resource: i32,
    /// Enemy agents confirmed assaulting the base; entries are removed as
    /// they get targeted.
    pub attackers: &'a mut Vec<EntityId>,
}

impl<'a> CascadeCtx<'a> {
    pub fn can_cast(&self) -> bool {
        self.resource >= gate::ABILITY_COST
    }

    pub fn entity(&self, id: EntityId) -> Option<&'a Entity> {
        self.snapshot.entity(id)
    }

    /// Drones inside this agent's sight radius, input order.
    pub fn visible_drones(&self) -> Vec<&'a Entity> {
        let agent_pos = self.agent.pos;
        self.snapshot
            .drones()
            .filter(move |d| d.pos.dist_sq(agent_pos) < range::AGENT_VIEW)
            .collect()
    }

    /// Enemy agents inside this agent's sight radius, input order.
    pub fn visible_enemies(&self) -> Vec<&'a Entity> {
        let agent_pos = self.agent.pos;
        self.snapshot
            .entities
            .iter()
            .filter(move |e| {
                e.kind == EntityKind::EnemyAgent && e.pos.dist_sq(agent_pos) < range::AGENT_VIEW
            })
            .collect()
    }
}

/// Running outcome of one cascade.
#[derive(Debug, Default)]
pub struct Verdict {
    pub action: Option<Action>,
    /// Set by ability rules; stops later opportunistic rules from
    /// reconsidering, without preventing deliberate overrides.
    pub locked: bool,
    pub rule: &'static str,
}

impl Verdict {
    fn propose(&mut self, action: Action) {
        self.action = Some(action);
    }

    fn lock(&mut self, action: Action) {
        self.action = Some(action);
        self.locked = true;
    }
}

type RuleFn = for<'a, 'b> fn(&'b mut CascadeCtx<'a>, &mut Verdict);

/// A named cascade step.
struct Rule {
    name: &'static str,
    apply: RuleFn,
}

const WARDEN_RULES: &[Rule] = &[
    Rule {
        name: "base-defense",
        apply: warden::base_defense,
    },
    Rule {
        name: "assault-response",
        apply: warden::assault_response,
    },
    Rule {
        name: "opportunistic-disable",
        apply: warden::opportunistic_disable,
    },
    Rule {
        name: "farm",
        apply: warden::farm,
    },
    Rule {
        name: "future-investment",
        apply: common::future_investment,
    },
    Rule {
        name: "fallback",
        apply: warden::fallback,
    },
];

const RAIDER_ATTACK_RULES: &[Rule] = &[
    Rule {
        name: "future-investment",
        apply: raider::invest,
    },
    Rule {
        name: "stage",
        apply: raider::stage,
    },
    Rule {
        name: "combined-push",
        apply: raider::combined_push,
    },
    Rule {
        name: "counter-shield",
        apply: raider::counter_shield,
    },
    Rule {
        name: "self-protect",
        apply: raider::self_protect,
    },
    Rule {
        name: "stack-corner",
        apply: raider::stack_fallback,
    },
];

const RAIDER_FARM_RULES: &[Rule] = &[
    Rule {
        name: "farm-sweep",
        apply: raider::farm_sweep,
    },
    Rule {
        name: "future-investment",
        apply: common::future_investment,
    },
    Rule {
        name: "farm-zone",
        apply: raider::zone_fallback,
    },
];

/// Run the cascade matching the agent's role and the team mode.
///
/// Always produces an action; the fallback rules are total.
pub fn evaluate(ctx: &mut CascadeCtx<'_>) -> (Action, &'static str) {
    let rules = match (ctx.memory.role, ctx.attack_mode) {
        (AgentRole::Warden, _) => WARDEN_RULES,
        (AgentRole::Raider, true) => RAIDER_ATTACK_RULES,
        (AgentRole::Raider, false) => RAIDER_FARM_RULES,
    };

    let mut verdict = Verdict::default();
    for rule in rules {
        let before = verdict.action;
        (rule.apply)(ctx, &mut verdict);
        if verdict.action != before {
            verdict.rule = rule.name;
            trace!(
                agent = ctx.agent_idx,
                rule = rule.name,
                "cascade rule proposed action"
            );
        }
    }

    let action = verdict.action.unwrap_or(Action::Move {
        to: ctx.arena.farm_zones[ctx.agent_idx],
    });
    (action, verdict.rule)
}
