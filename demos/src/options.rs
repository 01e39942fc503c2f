//! Command-line options for the demo.

use facet::Facet;
use facet_args as args;
use pathviz_core::Pos;
use pathviz_playback::{SessionConfig, Speed};
use pathviz_search::Algorithm;

pub const USAGE: &str = "\
usage: pathviz [options]

  --algorithm <bfs|dfs|dijkstra|astar>   search to animate (default bfs)
  --speed <1-10>                         playback speed (default 5)
  --rows <n> --cols <n>                  grid size (default 20x40)
  --start <row,col> --end <row,col>      endpoints (default 5,5 and 15,30)
  --density <0-1>                        share of random walls (default 0.25)
  --seed <n>                             wall layout seed (default 1)

keys: space run, c clear path, r remove walls, w scatter walls,
      1-4 pick algorithm, +/- speed, arrows resize, q quit
mouse: left toggles a wall, right moves start, middle moves end";

/// Raw command line, before validation.
#[derive(Facet, Debug, Default)]
pub struct Args {
    /// Search to animate
    #[facet(default, args::named, args::short = 'a')]
    pub algorithm: Option<String>,

    /// Playback speed, 1 to 10
    #[facet(default, args::named, args::short = 's')]
    pub speed: Option<String>,

    /// Grid rows
    #[facet(default, args::named)]
    pub rows: Option<String>,

    /// Grid columns
    #[facet(default, args::named)]
    pub cols: Option<String>,

    /// Start marker as row,col
    #[facet(default, args::named)]
    pub start: Option<String>,

    /// End marker as row,col
    #[facet(default, args::named)]
    pub end: Option<String>,

    /// Share of open cells turned into walls
    #[facet(default, args::named)]
    pub density: Option<String>,

    /// Wall layout seed
    #[facet(default, args::named)]
    pub seed: Option<String>,

    /// Print usage and exit
    #[facet(args::named, args::short = 'h')]
    pub help: bool,
}

/// Validated command line.
#[derive(Debug, Clone)]
pub struct Options {
    pub config: SessionConfig,
    pub density: f64,
    pub seed: u64,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: SessionConfig::default(),
            density: 0.25,
            seed: 1,
            help: false,
        }
    }
}

impl Options {
    /// Read and validate the process arguments.
    pub fn from_std_args() -> Result<Self, String> {
        let raw: Args = args::from_std_args().map_err(|e| format!("{e}\n\n{USAGE}"))?;
        Self::from_args(raw)
    }

    pub fn from_args(raw: Args) -> Result<Self, String> {
        let mut opts = Self {
            help: raw.help,
            ..Self::default()
        };
        if let Some(v) = raw.algorithm {
            opts.config.algorithm = v.parse::<Algorithm>().map_err(|e| e.to_string())?;
        }
        if let Some(v) = raw.speed {
            let v = number::<u8>("--speed", &v)?;
            opts.config.speed = Speed::new(v).map_err(|e| e.to_string())?;
        }
        if let Some(v) = raw.rows {
            opts.config.rows = number("--rows", &v)?;
        }
        if let Some(v) = raw.cols {
            opts.config.cols = number("--cols", &v)?;
        }
        if let Some(v) = raw.start {
            opts.config.start = pos("--start", &v)?;
        }
        if let Some(v) = raw.end {
            opts.config.end = pos("--end", &v)?;
        }
        if let Some(v) = raw.density {
            opts.density = number("--density", &v)?;
        }
        if let Some(v) = raw.seed {
            opts.seed = number("--seed", &v)?;
        }
        Ok(opts)
    }
}

fn number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("{flag}: \u{201c}{value}\u{201d} is not a valid number"))
}

fn pos(flag: &str, value: &str) -> Result<Pos, String> {
    let (r, c) = value
        .split_once(',')
        .ok_or_else(|| format!("{flag}: expected row,col"))?;
    Ok(Pos::new(number(flag, r)?, number(flag, c)?))
}
