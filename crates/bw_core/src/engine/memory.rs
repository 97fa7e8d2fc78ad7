//! Cross-turn agent memory.
//!
//! Everything here is explicitly threaded turn-to-turn by the caller;
//! entities and clusters are rebuilt from scratch each turn, this is not.

use serde::{Deserialize, Serialize};

use super::arena::{gate, timer};
use super::types::{Entity, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRole {
    /// Index 0: holds the own base.
    Warden,
    /// Indices 1-2: stages and delivers drones at the enemy base.
    Raider,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMemory {
    pub role: AgentRole,
    /// Turns left in the engagement window opened by the last aggressive
    /// cast; decrements each turn.
    pub engagement: u32,
    /// Latched when the agent is seen controlled inside the engagement
    /// window; cleared when the window expires.
    pub controlled_while_engaged: bool,
    /// Warden patrol waypoint index.
    pub patrol_idx: usize,
    /// Raider stack corner index, alternated when stuck.
    pub corner_idx: usize,
    /// Consecutive turns with no net movement.
    pub stuck_turns: u32,
    last_pos: Option<Position>,
}

impl AgentMemory {
    pub fn new(role: AgentRole) -> Self {
        Self {
            role,
            engagement: 0,
            controlled_while_engaged: false,
            patrol_idx: 0,
            corner_idx: 0,
            stuck_turns: 0,
            last_pos: None,
        }
    }

    /// Turn-start bookkeeping against the agent's snapshot entity.
    fn observe(&mut self, agent: &Entity) {
        if self.engagement > 0 {
            if agent.is_controlled {
                self.controlled_while_engaged = true;
            }
            self.engagement -= 1;
            if self.engagement == 0 {
                self.controlled_while_engaged = false;
            }
        }

        match self.last_pos {
            Some(p) if p == agent.pos => self.stuck_turns += 1,
            _ => self.stuck_turns = 0,
        }
        self.last_pos = Some(agent.pos);
    }

    /// An aggressive cast (wind or control) reopens the engagement window.
    pub fn note_aggression(&mut self) {
        self.engagement = timer::ENGAGEMENT_WINDOW;
    }
}

/// The three agents' memories plus the global mode latch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMemory {
    pub agents: [AgentMemory; 3],
    /// Farm -> attack, one way; never reverts.
    pub attack_mode: bool,
}

impl TeamMemory {
    pub fn new() -> Self {
        Self {
            agents: [
                AgentMemory::new(AgentRole::Warden),
                AgentMemory::new(AgentRole::Raider),
                AgentMemory::new(AgentRole::Raider),
            ],
            attack_mode: false,
        }
    }

    /// Advance all turn-start bookkeeping: mode latch, engagement windows,
    /// stuck counters.
    pub fn begin_turn(&mut self, agents: &[&Entity], resource: i32) {
        if !self.attack_mode && resource > gate::ATTACK_MODE {
            self.attack_mode = true;
        }
        for (memory, agent) in self.agents.iter_mut().zip(agents) {
            memory.observe(agent);
        }
    }
}

impl Default for TeamMemory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::agent_at;

    #[test]
    fn test_engagement_latch_and_expiry() {
        let mut m = AgentMemory::new(AgentRole::Raider);
        m.note_aggression();
        assert_eq!(m.engagement, timer::ENGAGEMENT_WINDOW);

        let mut controlled = agent_at(1, 100, 100);
        controlled.is_controlled = true;
        m.observe(&controlled);
        assert!(m.controlled_while_engaged);

        // The latch is sticky while the window runs, even uncontrolled.
        let free = agent_at(1, 100, 100);
        for _ in 1..timer::ENGAGEMENT_WINDOW {
            assert!(m.controlled_while_engaged);
            m.observe(&free);
        }
        assert_eq!(m.engagement, 0);
        assert!(!m.controlled_while_engaged);
    }

    #[test]
    fn test_no_latch_outside_window() {
        let mut m = AgentMemory::new(AgentRole::Raider);
        let mut controlled = agent_at(1, 100, 100);
        controlled.is_controlled = true;
        m.observe(&controlled);
        assert!(!m.controlled_while_engaged);
    }

    #[test]
    fn test_stuck_counter_tracks_net_movement() {
        let mut m = AgentMemory::new(AgentRole::Raider);
        let here = agent_at(1, 5000, 5000);
        m.observe(&here);
        assert_eq!(m.stuck_turns, 0);
        m.observe(&here);
        m.observe(&here);
        assert_eq!(m.stuck_turns, 2);

        let moved = agent_at(1, 5400, 5000);
        m.observe(&moved);
        assert_eq!(m.stuck_turns, 0);
    }

    #[test]
    fn test_attack_mode_never_reverts() {
        let mut team = TeamMemory::new();
        let a0 = agent_at(1, 0, 0);
        let a1 = agent_at(2, 0, 0);
        let a2 = agent_at(3, 0, 0);
        let agents = [&a0, &a1, &a2];

        team.begin_turn(&agents, gate::ATTACK_MODE);
        assert!(!team.attack_mode);

        team.begin_turn(&agents, gate::ATTACK_MODE + 1);
        assert!(team.attack_mode);

        team.begin_turn(&agents, 0);
        assert!(team.attack_mode);
    }
}
