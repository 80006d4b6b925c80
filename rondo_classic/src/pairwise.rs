use rand::rngs::StdRng;
use rondo_core::domain::{ActionDomain, Reward, Scheme};
use rondo_core::env::{JointAction, RenderContext, RoundScore, TurnBasedGame};
use rondo_core::error::{RenderError, RondoError};
use rondo_core::payoff::{PayoffSignal, RewardContext, RewardPolicy};
use crate::domain::ClassicGameError;

/// Two player repeated game. Both agents act once per round, the round is scored by
/// the pairwise reward policy `P` and every agent observes what the opponent did
/// in the previous round (`None` before the first round closes).
#[derive(Debug, Clone)]
pub struct PairGame<S: Scheme, P>{
    name: &'static str,
    domain: ActionDomain<S::ActionType>,
    policy: P,
    last_round: Option<JointAction<S::ActionType>>,
}

impl<S: Scheme, P> PairGame<S, P>
where P: RewardPolicy<S::ActionType, Reward = S::UniversalReward>{
    pub fn new(name: &'static str, domain: ActionDomain<S::ActionType>, policy: P) -> Self{
        Self{name, domain, policy, last_round: None}
    }

    pub fn name(&self) -> &'static str{
        self.name
    }

    pub fn policy(&self) -> &P{
        &self.policy
    }

    pub fn last_round(&self) -> Option<&JointAction<S::ActionType>>{
        self.last_round.as_ref()
    }
}

fn opponent_seat(seat: usize) -> Option<usize>{
    match seat{
        0 => Some(1),
        1 => Some(0),
        _ => None
    }
}

impl<S, P> TurnBasedGame<S> for PairGame<S, P>
where S: Scheme<GameErrorType = ClassicGameError>,
    P: RewardPolicy<S::ActionType, Reward = S::UniversalReward>{
    type Observation = Option<S::ActionType>;

    fn action_domain(&self) -> &ActionDomain<S::ActionType> {
        &self.domain
    }

    fn reset_game(&mut self, agent_count: usize, _rng: &mut StdRng) -> Result<(), RondoError<S>> {
        if agent_count != 2{
            return Err(RondoError::Game{source: ClassicGameError::WrongAgentCount{
                game: self.name, expected: 2, got: agent_count
            }});
        }
        self.last_round = None;
        Ok(())
    }

    fn score_round(&mut self, joint: &JointAction<S::ActionType>, max_rounds: u32) -> Result<RoundScore<S::UniversalReward>, RondoError<S>> {
        let rewards = match joint.actions(){
            Ok(actions) => {
                let signal = PayoffSignal::from_joint(&actions);
                (0..actions.len())
                    .map(|seat| self.policy
                        .compute(&signal, &RewardContext::new(seat, &actions, &self.domain, max_rounds))
                        .map(|r| r.reward))
                    .collect::<Result<Vec<_>, _>>()?
            },
            Err(_) => {
                // opponent left before acting, nobody is paid
                log::debug!("{}: round {joint} incomplete, no payoff", self.name);
                vec![S::UniversalReward::neutral(); joint.len()]
            }
        };
        log::debug!("{}: round {joint} scored {rewards:?}", self.name);
        self.last_round = Some(joint.clone());
        Ok(RoundScore::new(rewards))
    }

    fn observe(&self, seat: usize) -> Self::Observation {
        let opponent = opponent_seat(seat)?;
        self.last_round.as_ref()
            .and_then(|j| j.get(opponent))
            .cloned()
    }

    fn render_text(&self, context: &RenderContext<'_, S>) -> Result<String, RenderError> {
        if context.finished{
            return Ok("Game over".into());
        }
        let shown = match self.last_round.as_ref(){
            Some(last) if context.pending.iter().all(Option::is_none) => last.slots(),
            _ => context.pending,
        };
        let describe = |seat: usize| shown.get(seat)
            .and_then(|a| a.as_ref())
            .map(|a| a.to_string())
            .unwrap_or_else(|| "None".into());
        match context.agents{
            [first, second] => Ok(format!("Current state: {first}: {} , {second}: {}", describe(0), describe(1))),
            other => Err(RenderError::Failed(format!("two agents expected, got {}", other.len())))
        }
    }
}
