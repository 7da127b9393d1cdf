use std::error::Error;

use clap::Parser;

use budgeted_search::cli::{self, Args, VALVE_MINUTES, VALVE_MINUTES_WITH_HELP};
use budgeted_search::{dual, single, CompactGraph, Result, Score, Volcano};

const START: &str = "AA";

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let args = Args::parse();
    args.init_logging();
    Ok(cli::run(&args, solve, &mut std::io::stdout().lock())?)
}

fn solve(input: &str) -> Result<(Score, Score)> {
    let volcano: Volcano = input.parse()?;
    let graph = CompactGraph::new(&volcano, START)?;
    let alone = single::max_release(&graph, VALVE_MINUTES);
    let with_help = dual::max_release(&graph, [VALVE_MINUTES_WITH_HELP; 2]);
    Ok((alone, with_help))
}

#[cfg(test)]
mod test {
    use super::*;

    const EXAMPLE: &str = "\
Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
Valve BB has flow rate=13; tunnels lead to valves CC, AA
Valve CC has flow rate=2; tunnels lead to valves DD, BB
Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE
Valve EE has flow rate=3; tunnels lead to valves FF, DD
Valve FF has flow rate=0; tunnels lead to valves EE, GG
Valve GG has flow rate=0; tunnels lead to valves FF, HH
Valve HH has flow rate=22; tunnel leads to valve GG
Valve II has flow rate=0; tunnels lead to valves AA, JJ
Valve JJ has flow rate=21; tunnel leads to valve II";

    #[test]
    fn test_solve() {
        assert_eq!(solve(EXAMPLE).unwrap(), (1651, 1707));
    }

    #[test]
    fn test_solve_bad_input() {
        assert!(solve("Valve AA has flow rate=x; tunnel leads to valve AA").is_err());
    }
}
