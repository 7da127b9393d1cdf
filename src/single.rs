use crate::compact::{CompactGraph, NodeId, Tunnel, ValveSet};
use crate::search::{best_first, Outcome, Problem};
use crate::volcano::Minutes;
use crate::Score;

/// Where one agent is, how long it has left, and how much pressure the valves it opened will
/// release by the deadline.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Agent {
    pub room: NodeId,
    pub minutes_left: Minutes,
    pub released: Score,
}

impl Agent {
    pub fn new(room: NodeId, minutes_left: Minutes) -> Self {
        Agent { room, minutes_left, released: 0 }
    }

    /// Tunnels to valves that are still closed and that can be reached with at least a minute
    /// to spare for opening the valve.
    ///
    /// An agent standing at a closed working valve, which only happens in the start room, can
    /// also open it without moving: that's a zero-minute tunnel to its own room.
    pub fn moves<'a>(&self, graph: &'a CompactGraph, opened: ValveSet) -> impl Iterator<Item = Tunnel> + 'a {
        let minutes_left = self.minutes_left;
        let here = (graph.flow(self.room) > 0).then_some(Tunnel { to: self.room, minutes: 0 });
        here.into_iter()
            .chain(graph.tunnels(self.room).iter().copied())
            .filter(move |t| t.minutes < minutes_left && !opened.contains(t.to))
    }

    /// Walks through `tunnel` and opens the valve at the end of it.
    pub fn open_via(&self, graph: &CompactGraph, tunnel: Tunnel) -> Self {
        let minutes_left = self.minutes_left - tunnel.minutes - 1;
        Agent {
            room: tunnel.to,
            minutes_left,
            released: self.released + minutes_left as Score * graph.flow(tunnel.to),
        }
    }

    /// Stays put for the rest of the time.
    pub fn retire(&self) -> Self {
        Agent { minutes_left: 0, ..*self }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct State {
    pub agent: Agent,
    pub opened: ValveSet,
}

pub struct SingleAgent<'a> {
    graph: &'a CompactGraph,
    minutes: Minutes,
}

impl<'a> SingleAgent<'a> {
    pub fn new(graph: &'a CompactGraph, minutes: Minutes) -> Self {
        SingleAgent { graph, minutes }
    }
}

impl Problem for SingleAgent<'_> {
    type State = State;
    type Key = (NodeId, Minutes);

    fn start(&self) -> State {
        State {
            agent: Agent::new(self.graph.start(), self.minutes),
            opened: ValveSet::default(),
        }
    }

    fn key(&self, state: &State) -> Self::Key {
        (state.agent.room, state.agent.minutes_left)
    }

    fn score(&self, state: &State) -> Score {
        state.agent.released
    }

    fn expand(&self, state: &State, children: &mut Vec<State>) {
        for tunnel in state.agent.moves(self.graph, state.opened) {
            children.push(State {
                agent: state.agent.open_via(self.graph, tunnel),
                opened: state.opened.with(tunnel.to),
            });
        }
    }
}

pub fn search(graph: &CompactGraph, minutes: Minutes) -> Outcome {
    best_first(&SingleAgent::new(graph, minutes))
}

/// Pressure released by the best plan for one agent starting from the graph's start room.
///
/// Plans are only compared by where the agent is and how long it has left, so a plan that
/// reaches the same room at the same time with less released is dropped even when it opened
/// different valves. This is usually, but not always, the true maximum.
pub fn max_release(graph: &CompactGraph, minutes: Minutes) -> Score {
    search(graph, minutes).best
}
