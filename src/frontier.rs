use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::Score;

/// A max-priority queue of search states.
///
/// The priority of a state is computed once, when it's pushed, by the function given to
/// [`Frontier::new`]. States themselves don't need to be comparable. States with equal priority
/// come out in the order they went in.
pub struct Frontier<S, F> {
    heap: BinaryHeap<Entry<S>>,
    priority: F,
    pushed: u64,
}

struct Entry<S> {
    priority: Score,
    seq: u64,
    state: S,
}

impl<S> Ord for Entry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S> PartialOrd for Entry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> PartialEq for Entry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for Entry<S> {}

impl<S, F> Frontier<S, F>
where
    F: Fn(&S) -> Score,
{
    pub fn new(priority: F) -> Self {
        Frontier { heap: BinaryHeap::new(), priority, pushed: 0 }
    }

    pub fn push(&mut self, state: S) {
        let priority = (self.priority)(&state);
        self.heap.push(Entry { priority, seq: self.pushed, state });
        self.pushed += 1;
    }

    /// Removes the state with the highest priority, returning it along with that priority.
    pub fn pop(&mut self) -> Option<(Score, S)> {
        self.heap.pop().map(|e| (e.priority, e.state))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pops_highest_first() {
        let mut frontier = Frontier::new(|&(score, _): &(Score, char)| score);
        frontier.push((3, 'a'));
        frontier.push((9, 'b'));
        frontier.push((1, 'c'));
        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop(), Some((9, (9, 'b'))));
        assert_eq!(frontier.pop(), Some((3, (3, 'a'))));
        assert_eq!(frontier.pop(), Some((1, (1, 'c'))));
        assert_eq!(frontier.pop(), None);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_ties_pop_in_insertion_order() {
        let mut frontier = Frontier::new(|s: &&str| s.len());
        for s in ["ab", "cd", "xyz", "ef"] {
            frontier.push(s);
        }
        let order: Vec<&str> = std::iter::from_fn(|| frontier.pop().map(|(_, s)| s)).collect();
        assert_eq!(order, vec!["xyz", "ab", "cd", "ef"]);
    }

    #[test]
    fn test_priority_ignores_state_identity() {
        // Vec<f64> isn't Ord; only the priority function matters.
        let mut frontier = Frontier::new(|v: &Vec<f64>| v.len());
        frontier.push(vec![0.5]);
        frontier.push(vec![0.1, 0.2]);
        assert_eq!(frontier.pop().map(|(p, _)| p), Some(2));
    }
}
