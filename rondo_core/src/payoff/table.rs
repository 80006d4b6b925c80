use std::collections::HashMap;
use crate::domain::{Action, ActionDomain};
use crate::error::{ConfigError, InvariantError};
use crate::payoff::{PayoffSignal, RewardContext, RewardPolicy, RoundReward};

/// Number of entries above which building table is logged as warning.
pub const PAYOFF_TABLE_WARN_ENTRIES: usize = 1 << 16;
/// Hard limit of table entries, building larger table fails with [`ConfigError::PayoffTableTooLarge`].
pub const PAYOFF_TABLE_MAX_ENTRIES: usize = 1 << 24;

/// Precomputed mapping from every joint action to its [`PayoffSignal`].
///
/// The table is built by enumerating the full cartesian product of the action domain,
/// taken `agent_count` times, so it has `|domain|^agent_count` entries.
/// __This cost is exponential in number of agents__. It is fine for the small games here
/// (3 actions and 10 agents gives 59049 entries) but it does not scale to large groups or
/// large domains; tables above [`PAYOFF_TABLE_WARN_ENTRIES`] are reported and tables above
/// [`PAYOFF_TABLE_MAX_ENTRIES`] are refused.
///
/// After construction the table is immutable and total over the domain: lookup of any joint
/// action drawn from the domain hits. A miss means the table was built for another domain or
/// another number of agents and is reported as [`InvariantError::PayoffMiss`].
#[derive(Debug, Clone)]
pub struct PayoffTable<A: Action>{
    domain: ActionDomain<A>,
    agent_count: usize,
    table: HashMap<Vec<A>, PayoffSignal<A>>,
}

impl<A: Action> PayoffTable<A>{

    pub fn build(domain: ActionDomain<A>, agent_count: usize) -> Result<Self, ConfigError>{
        if agent_count == 0{
            return Err(ConfigError::ZeroAgents);
        }
        let size = u32::try_from(agent_count).ok()
            .and_then(|n| domain.len().checked_pow(n))
            .filter(|s| *s <= PAYOFF_TABLE_MAX_ENTRIES)
            .ok_or(ConfigError::PayoffTableTooLarge{domain: domain.len(), agents: agent_count})?;

        if size > PAYOFF_TABLE_WARN_ENTRIES{
            #[cfg(feature = "log_warn")]
            log::warn!("Building payoff table with {size} entries ({} actions, {agent_count} agents)", domain.len());
        }
        #[cfg(feature = "log_debug")]
        log::debug!("Building payoff table over domain {domain} for {agent_count} agents");

        let mut table = HashMap::with_capacity(size);
        // odometer over domain indexes, last agent changes fastest
        let mut indexes = vec![0usize; agent_count];
        loop{
            let joint: Vec<A> = indexes.iter()
                .map(|i| domain.as_slice()[*i].clone())
                .collect();
            let signal = PayoffSignal::from_joint(&joint);
            table.insert(joint, signal);

            let mut position = agent_count;
            loop{
                if position == 0{
                    return Ok(Self{domain, agent_count, table});
                }
                position -= 1;
                indexes[position] += 1;
                if indexes[position] < domain.len(){
                    break;
                }
                indexes[position] = 0;
            }
        }
    }

    pub fn lookup(&self, joint: &[A]) -> Result<&PayoffSignal<A>, InvariantError>{
        self.table.get(joint).ok_or_else(|| InvariantError::PayoffMiss{
            joint: format!("{joint:?}")
        })
    }

    /// Looks up signal of joint action and reduces it with `policy` for every seat.
    pub fn evaluate<P: RewardPolicy<A>>(&self, policy: &P, joint: &[A], max_rounds: u32)
        -> Result<Vec<RoundReward<P::Reward>>, InvariantError>{
        let signal = self.lookup(joint)?;
        (0..joint.len())
            .map(|seat| policy.compute(signal, &RewardContext::new(seat, joint, &self.domain, max_rounds)))
            .collect()
    }

    pub fn len(&self) -> usize{
        self.table.len()
    }

    pub fn is_empty(&self) -> bool{
        self.table.is_empty()
    }

    pub fn domain(&self) -> &ActionDomain<A>{
        &self.domain
    }

    pub fn agent_count(&self) -> usize{
        self.agent_count
    }
}
