use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;

use crate::error::{Error, Result};
use crate::volcano::{Flow, Minutes, RoomHandle, Valve, Volcano};

/// Compacted graphs are limited to what fits in a `ValveSet`.
pub const MAX_NODES: usize = 64;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(u8);

impl NodeId {
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tunnel {
    pub to: NodeId,
    pub minutes: Minutes,
}

/// Valves that have been opened, as a bitmask over compacted node ids.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct ValveSet(u64);

impl ValveSet {
    pub fn contains(&self, id: NodeId) -> bool {
        self.0 & (1 << id.0) != 0
    }

    pub fn with(self, id: NodeId) -> Self {
        ValveSet(self.0 | (1 << id.0))
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// A complete graph over the start room and the rooms with working valves. Tunnel weights are
/// the shortest travel times through the original network.
///
/// The start room always gets id 0. Valves follow in the order they appear in the original
/// network, and each room's tunnels are sorted by destination.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CompactGraph {
    valves: Vec<Valve>,
    tunnels: Vec<Vec<Tunnel>>,
}

impl CompactGraph {
    pub fn new(volcano: &Volcano, start: &str) -> Result<Self> {
        let start_room = volcano.require(start, "start")?;
        let mut rooms: Vec<RoomHandle> = vec![start_room];
        rooms.extend(volcano.rooms().filter(|&rh| rh != start_room && volcano.valve(rh).flow > 0));
        if rooms.len() > MAX_NODES {
            return Err(Error::TooManyValves(rooms.len()));
        }

        let tunnels: Vec<Vec<Tunnel>> = rooms.iter()
            .map(|&src| {
                let times = shortest_times(volcano, src);
                rooms.iter().enumerate()
                    .filter(|&(_, &dst)| dst != src && volcano.valve(dst).flow > 0)
                    .filter_map(|(i, &dst)| {
                        times[dst.as_usize()].map(|minutes| Tunnel { to: NodeId(i as u8), minutes })
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        let valves: Vec<Valve> = rooms.iter().map(|&rh| volcano.valve(rh).clone()).collect();

        let graph = CompactGraph { valves, tunnels };
        log::trace!("compacted {} rooms down to {}:\n{graph}", volcano.len(), graph.len());
        Ok(graph)
    }

    pub fn start(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.valves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valves.is_empty()
    }

    pub fn valve(&self, id: NodeId) -> &Valve {
        &self.valves[id.as_usize()]
    }

    pub fn flow(&self, id: NodeId) -> Flow {
        self.valves[id.as_usize()].flow
    }

    pub fn tunnels(&self, id: NodeId) -> &[Tunnel] {
        &self.tunnels[id.as_usize()]
    }

    pub fn id_for(&self, name: &str) -> Option<NodeId> {
        self.valves.iter().position(|v| v.name == name).map(|i| NodeId(i as u8))
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.valves.len()).map(|i| NodeId(i as u8))
    }

    /// Travel time between two named valves, if there's a compacted tunnel between them.
    pub fn minutes(&self, src: &str, dst: &str) -> Option<Minutes> {
        let src = self.id_for(src)?;
        let dst = self.id_for(dst)?;
        self.tunnels(src).iter().find(|t| t.to == dst).map(|t| t.minutes)
    }
}

impl TryFrom<&CompactGraph> for Volcano {
    type Error = Error;

    fn try_from(graph: &CompactGraph) -> Result<Self> {
        let mut volcano = Volcano::default();
        let rooms: Vec<RoomHandle> = graph.valves.iter()
            .map(|valve| volcano.add_room(&valve.name, valve.flow))
            .collect::<Result<_>>()?;
        for src in graph.ids() {
            for tunnel in graph.tunnels(src) {
                volcano.add_tunnel(rooms[src.as_usize()], rooms[tunnel.to.as_usize()], tunnel.minutes);
            }
        }
        Ok(volcano)
    }
}

impl fmt::Display for CompactGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for valve in &self.valves {
            write!(f, " {:>2}", valve.name)?;
        }
        writeln!(f)?;
        for src in self.ids() {
            write!(f, "{:>2}", self.valve(src).name)?;
            for dst in self.ids() {
                match self.tunnels(src).iter().find(|t| t.to == dst) {
                    Some(t) => write!(f, " {:>2}", t.minutes)?,
                    None => write!(f, " {:>2}", "-")?,
                }
            }
            writeln!(f)?
        }
        Ok(())
    }
}

// Dijkstra's algorithm. Tunnels in puzzle input all take one minute, in which case rooms come off
// the heap in breadth-first order.
fn shortest_times(volcano: &Volcano, src: RoomHandle) -> Vec<Option<Minutes>> {
    let mut frontier: BinaryHeap<Reverse<(Minutes, RoomHandle)>> = BinaryHeap::new();
    let mut dist: Vec<Option<Minutes>> = vec![None; volcano.len()];
    let mut visited: Vec<bool> = vec![false; volcano.len()];

    frontier.push(Reverse((0, src)));
    dist[src.as_usize()] = Some(0);

    while let Some(Reverse((d0, r0))) = frontier.pop() {
        // Stale entries are left in the heap rather than updated, so skip them here.
        if visited[r0.as_usize()] {
            continue;
        }
        visited[r0.as_usize()] = true;

        for &(r1, minutes) in volcano.tunnels(r0) {
            let d1 = d0 + minutes;
            if dist[r1.as_usize()].map_or(true, |d| d1 < d) {
                dist[r1.as_usize()] = Some(d1);
                frontier.push(Reverse((d1, r1)));
            }
        }
    }
    dist
}
