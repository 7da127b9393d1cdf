use std::fmt;

use once_cell::unsync::Lazy;
use regex_lite::Regex;

use crate::error::{Error, Result};
use crate::search::{best_first, Outcome, Problem};
use crate::Score;

use Res::*;

type Uint = u16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blueprint {
    pub id: Uint,
    pub ore_bot: BotCosts,
    pub clay_bot: BotCosts,
    pub obsidian_bot: BotCosts,
    pub geode_bot: BotCosts,
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct BotCosts {
    pub ore: Uint,
    pub clay: Uint,
    pub obsidian: Uint,
}

impl Blueprint {
    // A factory can only build one bot per tick, so there's no point in having more bots of a
    // kind than the most of that resource any one bot costs.
    fn max_ore_bots(&self) -> Uint {
        [self.ore_bot.ore, self.clay_bot.ore, self.obsidian_bot.ore, self.geode_bot.ore]
            .into_iter()
            .max()
            .unwrap_or(0)
    }

    fn max_clay_bots(&self) -> Uint {
        self.obsidian_bot.clay
    }

    fn max_obsidian_bots(&self) -> Uint {
        self.geode_bot.obsidian
    }
}

#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Res {
    Ore, Clay, Obsidian, Geode, Nothing,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub struct State {
    pub ore: Uint,
    pub clay: Uint,
    pub obsidian: Uint,
    pub geode: Uint,
    pub ore_bot: Uint,
    pub clay_bot: Uint,
    pub obsidian_bot: Uint,
    pub geode_bot: Uint,
    pub ticks_left: u8,
}

impl State {
    pub fn start(ticks: u8) -> Self {
        State {
            ticks_left: ticks,
            ore_bot: 1,
            ..Self::default()
        }
    }

    // Bots that exist at the start of the tick collect; a bot that's built this tick only joins
    // in afterwards.
    fn collect(&mut self) {
        self.ore += self.ore_bot;
        self.clay += self.clay_bot;
        self.obsidian += self.obsidian_bot;
        self.geode += self.geode_bot;
        self.ticks_left -= 1;
    }

    /// The state one tick later, if `res` can be built now and is worth building.
    pub fn make_bot(&self, res: Res, bp: &Blueprint) -> Option<Self> {
        let (costs, worth_it) = match res {
            Ore => (bp.ore_bot, self.ore_bot < bp.max_ore_bots()),
            Clay => (bp.clay_bot, self.clay_bot < bp.max_clay_bots()),
            Obsidian => (bp.obsidian_bot, self.obsidian_bot < bp.max_obsidian_bots()),
            Geode => (bp.geode_bot, true),
            Nothing => (BotCosts::default(), !self.can_afford(&bp.geode_bot)),
        };
        if !worth_it || !self.can_afford(&costs) {
            return None;
        }
        let mut new = *self;
        new.ore -= costs.ore;
        new.clay -= costs.clay;
        new.obsidian -= costs.obsidian;
        new.collect();
        match res {
            Ore => new.ore_bot += 1,
            Clay => new.clay_bot += 1,
            Obsidian => new.obsidian_bot += 1,
            Geode => new.geode_bot += 1,
            Nothing => (),
        }
        Some(new)
    }

    fn can_afford(&self, costs: &BotCosts) -> bool {
        self.ore >= costs.ore
            && self.clay >= costs.clay
            && self.obsidian >= costs.obsidian
    }

    // Pretend a geode bot gets built every remaining tick.
    fn geode_upper_bound(&self) -> Score {
        let t = self.ticks_left as Score;
        self.geode as Score + self.geode_bot as Score * t + t * t.saturating_sub(1) / 2
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ore={} clay={} obs={} geode={} r_ore={} r_clay={} r_obs={} r_geo={} left={}",
            self.ore,
            self.clay,
            self.obsidian,
            self.geode,
            self.ore_bot,
            self.clay_bot,
            self.obsidian_bot,
            self.geode_bot,
            self.ticks_left)
    }
}

pub struct GeodeFactory<'a> {
    blueprint: &'a Blueprint,
    ticks: u8,
}

impl<'a> GeodeFactory<'a> {
    pub fn new(blueprint: &'a Blueprint, ticks: u8) -> Self {
        GeodeFactory { blueprint, ticks }
    }
}

impl Problem for GeodeFactory<'_> {
    type State = State;
    // Everything but the geode count, which is the score.
    type Key = State;

    fn start(&self) -> State {
        State::start(self.ticks)
    }

    fn key(&self, state: &State) -> State {
        State { geode: 0, ..*state }
    }

    fn score(&self, state: &State) -> Score {
        state.geode as Score
    }

    fn priority(&self, state: &State) -> Score {
        state.geode_upper_bound()
    }

    fn bound(&self, state: &State) -> Option<Score> {
        Some(state.geode_upper_bound())
    }

    // When a geode bot is affordable, it's the only choice considered.
    fn expand(&self, state: &State, children: &mut Vec<State>) {
        if state.ticks_left == 0 {
            return;
        }
        if let Some(new) = state.make_bot(Geode, self.blueprint) {
            children.push(new);
            return;
        }
        children.extend(
            [Obsidian, Clay, Ore, Nothing]
                .into_iter()
                .filter_map(|res| state.make_bot(res, self.blueprint))
        );
    }
}

pub fn search(bp: &Blueprint, ticks: u8) -> Outcome {
    best_first(&GeodeFactory::new(bp, ticks))
}

pub fn cracked_geodes(bp: &Blueprint, ticks: u8) -> Score {
    let outcome = search(bp, ticks);
    log::debug!("blueprint {}: {} geodes in {} ticks", bp.id, outcome.best, ticks);
    outcome.best
}

/// Sum of each blueprint's id times the geodes it can crack.
pub fn quality_sum(blueprints: &[Blueprint], ticks: u8) -> Score {
    blueprints.iter()
        .map(|bp| bp.id as Score * cracked_geodes(bp, ticks))
        .sum()
}

/// Product of the geodes cracked by the first three blueprints.
pub fn top_three_product(blueprints: &[Blueprint], ticks: u8) -> Score {
    blueprints.iter()
        .take(3)
        .map(|bp| cracked_geodes(bp, ticks))
        .product()
}

pub fn read_blueprints(input: &str) -> Result<Vec<Blueprint>> {
    // eg: Blueprint 1: Each ore robot costs 4 ore. Each clay robot costs 4 ore. Each obsidian robot costs 4 ore and 18 clay. Each geode robot costs 4 ore and 9 obsidian.
    let line_re = Lazy::new(|| {
        Regex::new(r#"Blueprint (\d+): Each ore robot costs (\d+) ore. Each clay robot costs (\d+) ore. Each obsidian robot costs (\d+) ore and (\d+) clay. Each geode robot costs (\d+) ore and (\d+) obsidian."#).unwrap()
    });
    let no_cost = BotCosts::default();
    input.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let Some(captures) = line_re.captures(line) else {
                return Err(Error::UnexpectedLine(line.to_string()));
            };
            let strs: [&str; 7] = captures.extract().1;
            let nums: Vec<Uint> = strs.iter().map(|s| s.parse::<Uint>()).collect::<Result<Vec<_>, _>>()?;
            let [id, ore_ore, clay_ore, obs_ore, obs_clay, geo_ore, geo_obs] = nums[..] else {
                return Err(Error::UnexpectedLine(line.to_string()));
            };
            Ok(Blueprint {
                id,
                ore_bot: BotCosts { ore: ore_ore, ..no_cost },
                clay_bot: BotCosts { ore: clay_ore, ..no_cost },
                obsidian_bot: BotCosts { ore: obs_ore, clay: obs_clay, ..no_cost },
                geode_bot: BotCosts { ore: geo_ore, obsidian: geo_obs, ..no_cost },
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    const EXAMPLE: &str = "\
Blueprint 1: Each ore robot costs 4 ore. Each clay robot costs 2 ore. Each obsidian robot costs 3 ore and 14 clay. Each geode robot costs 2 ore and 7 obsidian.
Blueprint 2: Each ore robot costs 2 ore. Each clay robot costs 3 ore. Each obsidian robot costs 3 ore and 8 clay. Each geode robot costs 3 ore and 12 obsidian.";

    fn make_blueprint1() -> Blueprint {
        let no_cost = BotCosts::default();
        Blueprint {
            id: 1,
            ore_bot: BotCosts { ore: 4, ..no_cost },
            clay_bot: BotCosts { ore: 2, ..no_cost },
            obsidian_bot: BotCosts { ore: 3, clay: 14, ..no_cost },
            geode_bot: BotCosts { ore: 2, obsidian: 7, ..no_cost },
        }
    }

    #[test]
    fn test_read_blueprints() {
        let blueprints = read_blueprints(EXAMPLE).unwrap();
        assert_eq!(blueprints.len(), 2);
        assert_eq!(blueprints[0], make_blueprint1());
        assert_eq!(blueprints[1].id, 2);
        assert_eq!(blueprints[1].geode_bot.obsidian, 12);
    }

    #[test]
    fn test_read_blueprints_bad_line() {
        let err = read_blueprints("Blueprint 1: nothing to see here").unwrap_err();
        assert!(matches!(err, Error::UnexpectedLine(_)), "got {err:?}");
    }

    #[test]
    fn test_geode_upper_bound() {
        let state = State {
            geode_bot: 1,
            ticks_left: 5,
            ..State::default()
        };
        // 5 from the existing bot, 4 + 3 + 2 + 1 from bots built each tick.
        assert_eq!(state.geode_upper_bound(), 15);
        assert_eq!(State::default().geode_upper_bound(), 0);
    }

    #[test]
    fn test_make_bot() {
        let bp = make_blueprint1();
        let start = State::start(24);
        assert_eq!(start.make_bot(Clay, &bp), None);

        let waited = start.make_bot(Nothing, &bp).unwrap();
        let waited = waited.make_bot(Nothing, &bp).unwrap();
        assert_eq!(waited.ore, 2);
        assert_eq!(waited.ticks_left, 22);

        let built = waited.make_bot(Clay, &bp).unwrap();
        assert_eq!(built.ore, 1);
        assert_eq!(built.clay, 0, "a new bot doesn't collect on the tick it's built");
        assert_eq!(built.clay_bot, 1);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(State::start(24).to_string(),
            "ore=0 clay=0 obs=0 geode=0 r_ore=1 r_clay=0 r_obs=0 r_geo=0 left=24");
    }

    #[test]
    fn test_make_bot_prefers_geodes() {
        let bp = make_blueprint1();
        let state = State { ore: 5, obsidian: 7, ore_bot: 1, ticks_left: 3, ..State::default() };
        assert_eq!(state.make_bot(Nothing, &bp), None);
        assert!(state.make_bot(Geode, &bp).is_some());
    }

    #[test]
    fn test_make_bot_caps() {
        let bp = make_blueprint1();
        let state = State { ore: 10, ore_bot: 4, ticks_left: 3, ..State::default() };
        assert_eq!(state.make_bot(Ore, &bp), None);
        assert!(state.make_bot(Clay, &bp).is_some());
    }

    #[test]
    fn test_cracked_geodes() {
        let blueprints = read_blueprints(EXAMPLE).unwrap();
        assert_eq!(cracked_geodes(&blueprints[0], 24), 9);
        assert_eq!(cracked_geodes(&blueprints[1], 24), 12);
    }

    #[test]
    fn test_cracked_geodes_no_time() {
        assert_eq!(cracked_geodes(&make_blueprint1(), 0), 0);
    }

    #[test]
    fn test_quality_sum() {
        let blueprints = read_blueprints(EXAMPLE).unwrap();
        assert_eq!(quality_sum(&blueprints, 24), 33);
    }

    #[test] #[ignore]
    fn test_top_three_product() {
        let blueprints = read_blueprints(EXAMPLE).unwrap();
        assert_eq!(top_three_product(&blueprints, 32), 56 * 62);
    }
}
