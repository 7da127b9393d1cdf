use std::error::Error;

use clap::Parser;

use budgeted_search::blueprint::{quality_sum, read_blueprints, top_three_product};
use budgeted_search::cli::{self, Args, BLUEPRINT_TICKS, BLUEPRINT_TICKS_LONG};
use budgeted_search::{Result, Score};

fn main() -> std::result::Result<(), Box<dyn Error>> {
    let args = Args::parse();
    args.init_logging();
    Ok(cli::run(&args, solve, &mut std::io::stdout().lock())?)
}

fn solve(input: &str) -> Result<(Score, Score)> {
    let blueprints = read_blueprints(input)?;
    Ok((
        quality_sum(&blueprints, BLUEPRINT_TICKS),
        top_three_product(&blueprints, BLUEPRINT_TICKS_LONG),
    ))
}
