//! Danger ranking of drone clusters threatening the own base.
//!
//! Drones that have locked onto the own base are clustered and the
//! clusters sorted ascending by center distance to the base; the first is
//! the most dangerous. Each cluster also carries a closest-first agent
//! ranking so that, when more than one agent could respond, the nearest
//! one takes the cluster and the others leave it alone.

use tracing::debug;

use super::arena::{range, Arena};
use super::clusterer::{cluster, Cluster};
use super::snapshot::{TurnSnapshot, AGENTS_PER_SIDE};
use super::types::{Entity, Threat};

/// One ranked cluster plus per-agent response data.
#[derive(Debug, Clone)]
pub struct DangerCluster {
    pub cluster: Cluster,
    /// Squared distance from cluster center to the own base.
    pub base_dist_sq: i64,
    /// Squared distance from each agent to the cluster center.
    pub agent_dist_sq: [i64; AGENTS_PER_SIDE],
    /// Agent indices ordered closest-first.
    pub closest_agents: [usize; AGENTS_PER_SIDE],
    assigned: bool,
}

/// All danger clusters for one turn, most dangerous first.
#[derive(Debug, Clone, Default)]
pub struct DangerBoard {
    clusters: Vec<DangerCluster>,
}

impl DangerBoard {
    pub fn build(snapshot: &TurnSnapshot, arena: &Arena, agents: &[&Entity]) -> Self {
        let mut threats: Vec<Entity> = snapshot
            .drones()
            .filter(|d| {
                d.near_base && d.threat == Threat::OwnBase && d.base_dist_sq < range::BASE_FOG
            })
            .cloned()
            .collect();
        threats.sort_by_key(|d| d.base_dist_sq);

        let mut clusters: Vec<DangerCluster> = cluster(&threats, range::CLUSTER_RADIUS)
            .into_iter()
            .map(|c| {
                let base_dist_sq = c.center.dist_sq(arena.own_base);
                let mut agent_dist_sq = [i64::MAX; AGENTS_PER_SIDE];
                for (i, agent) in agents.iter().enumerate().take(AGENTS_PER_SIDE) {
                    agent_dist_sq[i] = agent.pos.dist_sq(c.center);
                }
                let mut closest_agents: [usize; AGENTS_PER_SIDE] = std::array::from_fn(|i| i);
                closest_agents.sort_by_key(|&i| agent_dist_sq[i]);
                DangerCluster {
                    cluster: c,
                    base_dist_sq,
                    agent_dist_sq,
                    closest_agents,
                    assigned: false,
                }
            })
            .collect();
        clusters.sort_by_key(|c| c.base_dist_sq);

        if !clusters.is_empty() {
            debug!(clusters = clusters.len(), "danger board built");
        }
        Self { clusters }
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Ranked view, most dangerous first.
    pub fn clusters(&self) -> &[DangerCluster] {
        &self.clusters
    }

    /// Claim a cluster for `agent_idx`, most dangerous first.
    ///
    /// Clusters where this agent ranks closest are preferred; failing
    /// that, the agent takes the most dangerous cluster still on the
    /// board. Each cluster is handed out at most once per turn.
    pub fn claim_for(&mut self, agent_idx: usize) -> Option<DangerCluster> {
        let preferred = self
            .clusters
            .iter()
            .position(|c| !c.assigned && c.closest_agents[0] == agent_idx);
        let pick = preferred.or_else(|| self.clusters.iter().position(|c| !c.assigned))?;
        self.clusters[pick].assigned = true;
        Some(self.clusters[pick].clone())
    }
}
