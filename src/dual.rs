use crate::compact::{CompactGraph, NodeId, Tunnel, ValveSet};
use crate::search::{best_first, Outcome, Problem};
use crate::single::Agent;
use crate::volcano::Minutes;
use crate::Score;

/// Two agents working the same network. A valve opened by either one is closed to both.
///
/// The agents are kept sorted so that swapping them gives the same state.
#[derive(Clone, Copy, Debug)]
pub struct State {
    agents: [Agent; 2],
    opened: ValveSet,
}

impl State {
    pub fn new(a: Agent, b: Agent, opened: ValveSet) -> Self {
        let agents = if a <= b { [a, b] } else { [b, a] };
        State { agents, opened }
    }

    pub fn agents(&self) -> &[Agent; 2] {
        &self.agents
    }

    pub fn opened(&self) -> ValveSet {
        self.opened
    }

    pub fn released(&self) -> Score {
        self.agents[0].released + self.agents[1].released
    }
}

/// What one agent does in a joint step.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Step {
    /// Don't move again. An agent with nowhere left to go always holds.
    Hold,
    Open(Tunnel),
}

impl Step {
    fn target(&self) -> Option<NodeId> {
        match self {
            Step::Hold => None,
            Step::Open(tunnel) => Some(tunnel.to),
        }
    }

    fn apply(&self, agent: &Agent, graph: &CompactGraph) -> Agent {
        match *self {
            Step::Hold => agent.retire(),
            Step::Open(tunnel) => agent.open_via(graph, tunnel),
        }
    }
}

fn steps(agent: &Agent, graph: &CompactGraph, opened: ValveSet) -> Vec<Step> {
    let mut steps: Vec<Step> = agent.moves(graph, opened).map(Step::Open).collect();
    steps.push(Step::Hold);
    steps
}

pub struct DualAgent<'a> {
    graph: &'a CompactGraph,
    minutes: [Minutes; 2],
}

impl<'a> DualAgent<'a> {
    pub fn new(graph: &'a CompactGraph, minutes: [Minutes; 2]) -> Self {
        DualAgent { graph, minutes }
    }
}

impl Problem for DualAgent<'_> {
    type State = State;
    type Key = (NodeId, Minutes, NodeId, Minutes);

    fn start(&self) -> State {
        let start = self.graph.start();
        State::new(
            Agent::new(start, self.minutes[0]),
            Agent::new(start, self.minutes[1]),
            ValveSet::default(),
        )
    }

    fn key(&self, state: &State) -> Self::Key {
        let [a, b] = state.agents;
        (a.room, a.minutes_left, b.room, b.minutes_left)
    }

    fn score(&self, state: &State) -> Score {
        state.released()
    }

    // Each agent either opens a valve or holds. Holding while the other agent has nowhere to go
    // would never end, so that pair is skipped, and both agents can't claim the same valve in
    // one step.
    fn expand(&self, state: &State, children: &mut Vec<State>) {
        let [a, b] = state.agents;
        let steps_a = steps(&a, self.graph, state.opened);
        let steps_b = steps(&b, self.graph, state.opened);
        for step_a in &steps_a {
            for step_b in &steps_b {
                if *step_a == Step::Hold && *step_b == Step::Hold {
                    continue;
                }
                if step_a.target().is_some() && step_a.target() == step_b.target() {
                    continue;
                }
                let mut opened = state.opened;
                for target in [step_a.target(), step_b.target()].into_iter().flatten() {
                    opened = opened.with(target);
                }
                children.push(State::new(
                    step_a.apply(&a, self.graph),
                    step_b.apply(&b, self.graph),
                    opened,
                ));
            }
        }
    }
}

pub fn search(graph: &CompactGraph, minutes: [Minutes; 2]) -> Outcome {
    best_first(&DualAgent::new(graph, minutes))
}

/// Pressure released by the best joint plan for two agents that both start from the graph's
/// start room. Like `single::max_release`, plans are compared by where the agents are and how
/// long they have left, which can drop the true maximum.
pub fn max_release(graph: &CompactGraph, minutes: [Minutes; 2]) -> Score {
    search(graph, minutes).best
}
