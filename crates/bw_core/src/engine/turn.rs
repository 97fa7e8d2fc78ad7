//! Turn orchestration.
//!
//! One turn: begin-turn bookkeeping on the carried memory, danger board
//! construction, then the three cascades strictly in agent-index order
//! (warden, raider, raider). Claims, the attacker list, and the resource
//! pool flow through the sequence, so a later agent always sees what the
//! earlier ones committed.

use tracing::debug;

use super::actions::AgentDecision;
use super::arena::{range, Arena};
use super::claims::ClaimSet;
use super::danger::DangerBoard;
use super::memory::TeamMemory;
use super::policy::{self, CascadeCtx};
use super::snapshot::TurnSnapshot;
use super::types::{Entity, EntityId, Threat};

/// The engine instance carried across the whole match.
#[derive(Debug)]
pub struct TurnEngine {
    arena: Arena,
    memory: TeamMemory,
}

impl TurnEngine {
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            memory: TeamMemory::new(),
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Cross-turn memory, read-only; `play_turn` is the only writer.
    pub fn memory(&self) -> &TeamMemory {
        &self.memory
    }

    /// Evaluate one turn, returning one decision per agent in index order.
    ///
    /// The snapshot is expected to come from `TurnSnapshot::parse`, which
    /// guarantees the agent count.
    pub fn play_turn(&mut self, snapshot: &TurnSnapshot) -> Vec<AgentDecision> {
        let agents = snapshot.own_agents();
        self.memory.begin_turn(&agents, snapshot.own.resource);
        let attack_mode = self.memory.attack_mode;

        let mut danger = DangerBoard::build(snapshot, &self.arena, &agents);
        let mut claims = ClaimSet::new();
        let mut attackers = assault_watch(snapshot, &agents);
        let mut resource = snapshot.own.resource;

        let arena = &self.arena;
        let mut decisions = Vec::with_capacity(agents.len());
        for (idx, (agent, agent_memory)) in agents
            .iter()
            .copied()
            .zip(self.memory.agents.iter_mut())
            .enumerate()
        {
            let mut ctx = CascadeCtx {
                agent_idx: idx,
                agent,
                arena,
                snapshot,
                danger: &mut danger,
                claims: &mut claims,
                memory: &mut *agent_memory,
                attack_mode,
                resource,
                attackers: &mut attackers,
            };
            let (action, rule) = policy::evaluate(&mut ctx);

            resource -= action.cost();
            if action.is_aggressive() {
                agent_memory.note_aggression();
            }
            debug!(agent = idx, rule, action = %action, pool = resource, "committed");
            decisions.push(AgentDecision {
                agent_idx: idx,
                action,
                rule,
            });
        }
        decisions
    }
}

/// Attacker list for the assault-response rule.
///
/// An assault is confirmed hostile-cast only when its effects are on the
/// board: a shielded drone bearing down on the base, or one of our own
/// agents under control. Unconfirmed enemy presence is ignored.
fn assault_watch(snapshot: &TurnSnapshot, agents: &[&Entity]) -> Vec<EntityId> {
    let shielded_danger = snapshot
        .drones()
        .any(|d| d.near_base && d.threat == Threat::OwnBase && d.shield_turns > 0);
    let controlled_agent = agents.iter().any(|a| a.is_controlled);
    if !shielded_danger && !controlled_agent {
        return Vec::new();
    }

    let mut attackers: Vec<&Entity> = snapshot
        .enemy_agents()
        .into_iter()
        .filter(|e| e.is_unshielded() && e.base_dist_sq < range::ASSAULT_ALERT)
        .collect();
    attackers.sort_by_key(|e| e.base_dist_sq);
    attackers.into_iter().map(|e| e.id).collect()
}
