use std::hash::Hash;

use crate::dominance::DominanceTable;
use crate::frontier::Frontier;
use crate::Score;

/// A state space explored by [`best_first`].
///
/// Scores must never decrease from a state to its children. Two states with the same key are
/// treated as interchangeable, so only the higher scoring one is explored further.
pub trait Problem {
    type State;
    type Key: Eq + Hash;

    fn start(&self) -> Self::State;

    fn key(&self, state: &Self::State) -> Self::Key;

    fn score(&self, state: &Self::State) -> Score;

    /// Order in which states leave the frontier. Defaults to the score.
    fn priority(&self, state: &Self::State) -> Score {
        self.score(state)
    }

    /// An upper bound on the score of anything reachable from `state`, if one is known. States
    /// that can't beat the best score found so far aren't explored.
    fn bound(&self, _state: &Self::State) -> Option<Score> {
        None
    }

    /// Pushes every state reachable in one step from `state`.
    fn expand(&self, state: &Self::State, children: &mut Vec<Self::State>);
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Outcome {
    pub best: Score,
    pub expanded: usize,
    pub admitted: usize,
    pub keys: usize,
}

pub fn best_first<P: Problem>(problem: &P) -> Outcome {
    let mut table: DominanceTable<P::Key> = DominanceTable::new();
    let mut frontier = Frontier::new(|state: &P::State| problem.priority(state));
    let mut children: Vec<P::State> = Vec::new();
    let mut outcome = Outcome::default();

    let start = problem.start();
    table.improve(problem.key(&start), problem.score(&start));
    frontier.push(start);
    outcome.admitted += 1;

    while let Some((_, state)) = frontier.pop() {
        // The best score may have improved since this state was pushed.
        if matches!(problem.bound(&state), Some(bound) if bound <= table.best()) {
            continue;
        }
        outcome.expanded += 1;

        problem.expand(&state, &mut children);
        for child in children.drain(..) {
            if matches!(problem.bound(&child), Some(bound) if bound <= table.best()) {
                continue;
            }
            if table.improve(problem.key(&child), problem.score(&child)) {
                frontier.push(child);
                outcome.admitted += 1;
            }
        }
    }

    outcome.best = table.best();
    outcome.keys = table.len();
    log::debug!("expanded={} admitted={} keys={} best={}",
        outcome.expanded, outcome.admitted, outcome.keys, outcome.best);
    outcome
}

#[cfg(test)]
mod test {
    use super::*;

    // Pick numbers from a list, each at most once, without going over a limit. The key is the
    // running total, so the best score is the largest reachable sum.
    struct Subsets {
        items: Vec<usize>,
        limit: usize,
    }

    #[derive(Clone)]
    struct Picked {
        used: Vec<bool>,
        total: usize,
    }

    impl Problem for Subsets {
        type State = Picked;
        type Key = Vec<bool>;

        fn start(&self) -> Picked {
            Picked { used: vec![false; self.items.len()], total: 0 }
        }

        fn key(&self, state: &Picked) -> Vec<bool> {
            state.used.clone()
        }

        fn score(&self, state: &Picked) -> Score {
            state.total
        }

        fn bound(&self, state: &Picked) -> Option<Score> {
            let rest: usize = self.items.iter().zip(&state.used)
                .filter(|&(_, &used)| !used)
                .map(|(&n, _)| n)
                .sum();
            Some(self.limit.min(state.total + rest))
        }

        fn expand(&self, state: &Picked, children: &mut Vec<Picked>) {
            for (i, &n) in self.items.iter().enumerate() {
                if state.used[i] || state.total + n > self.limit {
                    continue;
                }
                let mut child = state.clone();
                child.used[i] = true;
                child.total += n;
                children.push(child);
            }
        }
    }

    #[test]
    fn test_best_first() {
        let problem = Subsets { items: vec![8, 6, 5, 3], limit: 12 };
        let outcome = best_first(&problem);
        assert_eq!(outcome.best, 11);
        assert!(outcome.expanded > 0);
        assert!(outcome.admitted >= outcome.expanded);
    }

    #[test]
    fn test_best_first_bound_stops_early() {
        // 8 + 3 hits the limit exactly; nothing else needs to be expanded once it's found.
        let problem = Subsets { items: vec![8, 3, 1], limit: 11 };
        let outcome = best_first(&problem);
        assert_eq!(outcome.best, 11);
        assert!(outcome.expanded < 8, "expanded {}", outcome.expanded);
    }

    #[test]
    fn test_best_first_nothing_fits() {
        let problem = Subsets { items: vec![20, 30], limit: 10 };
        let outcome = best_first(&problem);
        assert_eq!(outcome.best, 0);
        assert_eq!(outcome.keys, 1);
    }
}
