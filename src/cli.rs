use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{Error, Result};
use crate::volcano::Minutes;
use crate::Score;

pub const DEFAULT_INPUTS: [&str; 2] = ["sample.txt", "input.txt"];

pub const VALVE_MINUTES: Minutes = 30;
// Minutes left after spending four teaching an elephant to help.
pub const VALVE_MINUTES_WITH_HELP: Minutes = 26;

pub const BLUEPRINT_TICKS: u8 = 24;
pub const BLUEPRINT_TICKS_LONG: u8 = 32;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log search statistics
    #[arg(short, long)]
    pub verbose: bool,

    /// Puzzle inputs, solved in order [default: sample.txt input.txt]
    pub files: Vec<PathBuf>,
}

impl Args {
    pub fn inputs(&self) -> Vec<PathBuf> {
        if self.files.is_empty() {
            DEFAULT_INPUTS.iter().map(PathBuf::from).collect()
        } else {
            self.files.clone()
        }
    }

    pub fn init_logging(&self) {
        let log_level = if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::builder()
            .format_module_path(false)
            .format_timestamp_millis()
            .filter_level(log_level)
            .parse_default_env()
            .init();
    }
}

pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::MissingInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Solves each input in turn and writes both answers under the input's name. Stops at the first
/// input that can't be read or solved.
pub fn run<F>(args: &Args, solve: F, out: &mut impl Write) -> Result<()>
where
    F: Fn(&str) -> Result<(Score, Score)>,
{
    for path in args.inputs() {
        let input = read_input(&path)?;
        let start = std::time::Instant::now();
        let (part1, part2) = solve(&input)?;
        log::debug!("solved {} in {:?}", path.display(), start.elapsed());
        writeln!(out, "{}:", path.display())?;
        writeln!(out, "Answer part 1:  {part1}")?;
        writeln!(out, "Answer part 2:  {part2}")?;
    }
    Ok(())
}
