use std::fmt::{Display, Formatter};
use crate::domain::Action;

/// Frequency breakdown of actions chosen in one joint action.
///
/// Entries are `(action, count)` pairs sorted by count descending. Actions with equal count keep
/// the order in which they first appear in the joint action, so the result is fully determined
/// by the joint action. Actions nobody chose are not listed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoffSignal<A: Action>{
    entries: Vec<(A, usize)>
}

impl<A: Action> PayoffSignal<A>{

    pub fn from_joint(joint: &[A]) -> Self{
        let mut entries: Vec<(A, usize)> = Vec::new();
        for action in joint{
            match entries.iter_mut().find(|(a, _)| a == action){
                Some((_, count)) => *count += 1,
                None => entries.push((action.clone(), 1)),
            }
        }
        // sort_by is stable, ties stay in first seen order
        entries.sort_by(|l, r| r.1.cmp(&l.1));
        Self{entries}
    }

    pub fn entries(&self) -> &[(A, usize)]{
        &self.entries
    }

    /// Action chosen most often (first one of tied actions).
    pub fn top(&self) -> Option<&(A, usize)>{
        self.entries.first()
    }

    pub fn count_of(&self, action: &A) -> usize{
        self.entries.iter()
            .find(|(a, _)| a == action)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Number of distinct actions in joint action.
    pub fn distinct(&self) -> usize{
        self.entries.len()
    }

    /// Number of agents that contributed to this signal.
    pub fn total(&self) -> usize{
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

impl<A: Action> Display for PayoffSignal<A>{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, (a, c)) in self.entries.iter().enumerate(){
            if i > 0{
                write!(f, ", ")?;
            }
            write!(f, "{a}: {c}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests{
    use crate::payoff::PayoffSignal;

    #[test]
    fn sorted_by_count(){
        let s = PayoffSignal::from_joint(&[1u8, 2, 2, 0, 2, 1]);
        assert_eq!(s.entries(), &[(2, 3), (1, 2), (0, 1)]);
        assert_eq!(s.total(), 6);
        assert_eq!(s.count_of(&7), 0);
    }

    #[test]
    fn ties_keep_first_seen_order(){
        let s = PayoffSignal::from_joint(&[5u8, 3, 3, 5, 9]);
        assert_eq!(s.entries(), &[(5, 2), (3, 2), (9, 1)]);
        let s = PayoffSignal::from_joint(&[3u8, 5]);
        assert_eq!(s.top(), Some(&(3, 1)));
    }
}
