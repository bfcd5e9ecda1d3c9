use std::{
    env,
    path::{Path, PathBuf},
};

use courier_route_derive::{CliOptions, CliValue, KvDisplay};
use log::LevelFilter;

use crate::{Error, Result};

const DEFAULT_NODES: &str = "data/city_nodes.csv";
const DEFAULT_EDGES: &str = "data/city_edges.csv";
const DEFAULT_DEPOT: &str = "DEPOT";
const DEFAULT_DELIVERIES: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Runtime options for a dispatch run.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct DispatchOptions {
    /// Nodes CSV with `node,x,y` columns.
    #[cli(long = "nodes")]
    #[kv(fmt = "path")]
    pub nodes: PathBuf,
    /// Edges CSV with `u,v,weight[,undirected]` columns.
    #[cli(long = "edges")]
    #[kv(fmt = "path")]
    pub edges: PathBuf,
    /// Node every courier starts from.
    #[cli(long = "depot")]
    pub depot: String,
    /// Number of couriers, one cluster each.
    #[cli(long = "k")]
    pub k: usize,
    /// Delivery node labels.
    #[cli(long = "deliveries", parse_with = "parse_labels")]
    #[kv(fmt = "list")]
    pub deliveries: Vec<String>,
    /// Seed for initial centroid sampling.
    #[cli(long = "seed")]
    pub seed: u64,
    /// Upper bound on k-means refinement rounds.
    #[cli(long = "max-iterations")]
    pub max_iterations: usize,
    /// Direction used for edge rows without an explicit `undirected` value.
    #[cli(long = "undirected", flag, negate = "directed")]
    pub undirected: bool,
    /// Compose cluster routes on the rayon pool.
    #[cli(long = "parallel", flag, negate = "no-parallel")]
    pub parallel: bool,
    /// Structured logging level.
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    #[cli(long = "log-timestamp", flag, negate = "no-log-timestamp")]
    pub log_timestamp: bool,
    /// Optional log file. Empty means stderr.
    #[cli(long = "log-output")]
    pub log_output: String,
    /// Optional report file. Empty means stdout.
    #[cli(long = "output")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for DispatchOptions {
    fn default() -> Self {
        Self {
            nodes: PathBuf::from(DEFAULT_NODES),
            edges: PathBuf::from(DEFAULT_EDGES),
            depot: DEFAULT_DEPOT.to_string(),
            k: 2,
            deliveries: DEFAULT_DELIVERIES.iter().map(|s| s.to_string()).collect(),
            seed: 7,
            max_iterations: 100,
            undirected: false,
            parallel: true,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: false,
            log_output: String::new(),
            output: String::new(),
        }
    }
}

impl DispatchOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  courier-route [options]\n\n",
            "Options:\n",
            "  --nodes <path>              nodes CSV (default data/city_nodes.csv)\n",
            "  --edges <path>              edges CSV (default data/city_edges.csv)\n",
            "  --depot <label>             start node for every courier (default DEPOT)\n",
            "  --k <usize>                 number of couriers (default 2)\n",
            "  --deliveries <A,B,...>      delivery labels (default A,B,C,D,E,F)\n",
            "  --seed <u64>                centroid sampling seed (default 7)\n",
            "  --max-iterations <usize>    k-means round limit (default 100)\n",
            "  --undirected[=<bool>]       treat edge rows as two-way by default\n",
            "  --directed\n",
            "  --parallel[=<bool>]         route clusters concurrently (default on)\n",
            "  --no-parallel\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  courier-route --k 2 --deliveries A,B,C,D,E\n",
            "  courier-route --k=3 --seed=11 --log-level=info --output routes.txt\n",
            "  courier-route --nodes city/nodes.csv --edges city/edges.csv --undirected\n",
        )
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }
}

fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

/// Comma or whitespace separated labels, empties dropped.
fn parse_labels(raw: &str) -> Result<Vec<String>> {
    let labels: Vec<String> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    if labels.is_empty() {
        return Err(Error::invalid_input("--deliveries needs at least one label"));
    }
    Ok(labels)
}
