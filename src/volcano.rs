use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::unsync::Lazy;
use regex_lite::Regex;

use crate::error::{Error, Result};

pub type Minutes = u32;
pub type Flow = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Valve {
    pub name: String,
    pub flow: Flow,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomHandle(u16);

impl RoomHandle {
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for RoomHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The raw tunnel network: every room, including the ones whose valves release nothing.
///
/// Rooms are numbered in the order they were described. Tunnels parsed from puzzle input take
/// one minute each, but other weights are allowed so a compacted graph can be turned back into
/// a `Volcano`.
#[derive(Clone, Debug, Default)]
pub struct Volcano {
    valves: Vec<Valve>,
    tunnels: Vec<Vec<(RoomHandle, Minutes)>>,
    handle_for: HashMap<String, RoomHandle>,
}

impl Volcano {
    /// Builds a network from a name -> neighbors map and a name -> flow rate map. Every name
    /// mentioned in `adjacency` must have a flow rate.
    pub fn from_maps(
        adjacency: &HashMap<String, Vec<String>>,
        flow_for: &HashMap<String, Flow>,
    ) -> Result<Self> {
        if let Some(name) = adjacency.keys().find(|name| !flow_for.contains_key(*name)) {
            return Err(Error::UnknownValve { name: name.clone(), from: "adjacency list".to_string() });
        }

        // Sort so room numbering doesn't depend on hash order.
        let mut names: Vec<&String> = flow_for.keys().collect();
        names.sort();

        let mut volcano = Volcano::default();
        for &name in &names {
            volcano.add_room(name, flow_for[name])?;
        }
        for &name in &names {
            let Some(neighbors) = adjacency.get(name) else {
                continue;
            };
            volcano.connect_all(name, neighbors.iter().map(String::as_str))?;
        }
        Ok(volcano)
    }

    /// Adds a room, or updates its flow rate if a room with that name already exists. Fails once
    /// every `RoomHandle` is taken.
    pub fn add_room(&mut self, name: &str, flow: Flow) -> Result<RoomHandle> {
        if let Some(&rh) = self.handle_for.get(name) {
            self.valves[rh.as_usize()].flow = flow;
            return Ok(rh);
        }
        let idx = u16::try_from(self.valves.len())
            .map_err(|_| Error::TooManyRooms(self.valves.len() + 1))?;
        let rh = RoomHandle(idx);
        self.valves.push(Valve { name: name.to_string(), flow });
        self.tunnels.push(Vec::new());
        self.handle_for.insert(name.to_string(), rh);
        Ok(rh)
    }

    pub fn add_tunnel(&mut self, src: RoomHandle, dst: RoomHandle, minutes: Minutes) {
        self.tunnels[src.as_usize()].push((dst, minutes));
    }

    fn connect_all<'a>(&mut self, src_name: &str, dst_names: impl Iterator<Item = &'a str>) -> Result<()> {
        let src = self.require(src_name, src_name)?;
        for dst_name in dst_names {
            let dst = self.require(dst_name, src_name)?;
            self.add_tunnel(src, dst, 1);
        }
        Ok(())
    }

    /// Looks up a room that `from` refers to, failing if it was never described.
    pub fn require(&self, name: &str, from: &str) -> Result<RoomHandle> {
        self.handle(name).ok_or_else(|| Error::UnknownValve {
            name: name.to_string(),
            from: from.to_string(),
        })
    }

    pub fn handle(&self, name: &str) -> Option<RoomHandle> {
        self.handle_for.get(name).copied()
    }

    pub fn valve(&self, rh: RoomHandle) -> &Valve {
        &self.valves[rh.as_usize()]
    }

    pub fn flow(&self, name: &str) -> Option<Flow> {
        self.handle(name).map(|rh| self.valve(rh).flow)
    }

    pub fn tunnels(&self, rh: RoomHandle) -> &[(RoomHandle, Minutes)] {
        &self.tunnels[rh.as_usize()]
    }

    pub fn child_names(&self, name: &str) -> Vec<&str> {
        let Some(src) = self.handle(name) else {
            return Vec::new();
        };
        self.tunnels(src).iter()
            .map(|&(dst, _)| self.valve(dst).name.as_str())
            .collect()
    }

    pub fn rooms(&self) -> impl Iterator<Item = RoomHandle> {
        (0..=u16::MAX).take(self.valves.len()).map(RoomHandle)
    }

    pub fn len(&self) -> usize {
        self.valves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valves.is_empty()
    }
}

impl FromStr for Volcano {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // eg: Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
        let line_re = Lazy::new(|| {
            Regex::new(r#"Valve ([A-Z]{2}) has flow rate=(\d+); tunnel(?:s)? lead(?:s)? to valve(?:s)? (.*)"#).unwrap()
        });

        // Describe every room before adding tunnels, so that a tunnel can lead to a room that's
        // described further down and a tunnel to a room that's never described is caught.
        let mut rows: Vec<(&str, &str)> = Vec::new();
        let mut volcano = Volcano::default();
        for line in s.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let Some(caps) = line_re.captures(line) else {
                return Err(Error::UnexpectedLine(line.to_string()));
            };
            let (_, [name, flow, adjacent]) = caps.extract();
            if volcano.handle(name).is_some() {
                return Err(Error::UnexpectedLine(line.to_string()));
            }
            volcano.add_room(name, flow.parse()?)?;
            rows.push((name, adjacent));
        }
        for (name, adjacent) in rows {
            volcano.connect_all(name, adjacent.split(',').map(str::trim))?;
        }
        Ok(volcano)
    }
}
