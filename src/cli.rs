//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::cache::key::GenerationParameters;
use crate::core::render::{OutputFormat, RenderConfig};
use crate::generator::params::load_params;

/// datacache - reproducible, integrity-checked dataset caching.
#[derive(Parser, Debug)]
#[command(name = "datacache")]
#[command(
    author,
    version,
    about,
    long_about = r#"datacache generates deterministic synthetic datasets and caches them on disk.

Each dataset is identified by its generation parameters (random seed and point
count) and stored as <seed>-<points>.json under the cache root, together with a
SHA-256 digest of its contents. A cached dataset is only reused after its digest
has been verified; anything missing, malformed or tampered with is regenerated.

Every command prints a ResultSet in the selected format (default: jsonl).
Logs go to stderr.

Examples:
    datacache get --seed 42 --points 50
    datacache get --params params.json --use-cache true
    datacache verify --seed 42 --points 50
    datacache list --format md
"#
)]
pub struct Cli {
    /// Directory holding cached artifacts.
    #[arg(
        long,
        global = true,
        env = "DATACACHE_ROOT",
        default_value = ".datacache",
        value_name = "DIR",
        long_help = "Directory holding cached dataset artifacts.\n\n\
It is created on the first write. Can also be set with DATACACHE_ROOT."
    )]
    pub cache_root: PathBuf,

    /// Output format (jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logs on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug logging on stderr. RUST_LOG, when set, takes precedence\n\
over --quiet and --verbose."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Generation parameters given on the command line
#[derive(Args, Debug)]
pub struct ParamsArgs {
    /// Random seed of the dataset.
    #[arg(long, value_name = "N")]
    pub seed: u64,

    /// Number of points in the dataset.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub points: u64,
}

impl ParamsArgs {
    pub fn to_params(&self) -> Result<GenerationParameters> {
        let points = usize::try_from(self.points).context("--points is too large")?;
        Ok(GenerationParameters::new(self.seed, points)?)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a dataset from cache, or generate and cache it.
    #[command(
        long_about = "Return the dataset for the given parameters.\n\n\
With --use-cache true, a verified artifact is returned without regenerating.\n\
Otherwise (or when the artifact is missing, malformed or fails its digest check)\n\
the dataset is generated and written to the cache, replacing any old artifact.\n\n\
Examples:\n\
  datacache get --seed 42 --points 50\n\
  datacache get --params params.json --use-cache\n"
    )]
    Get {
        /// Random seed of the dataset.
        #[arg(long, value_name = "N", required_unless_present = "params")]
        seed: Option<u64>,

        /// Number of points in the dataset.
        #[arg(
            long,
            value_name = "N",
            required_unless_present = "params",
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        points: Option<u64>,

        /// Read parameters from a JSON file instead.
        #[arg(
            long,
            value_name = "FILE",
            conflicts_with_all = ["seed", "points"],
            long_help = "Read generation parameters from a JSON file such as\n\
{\"random_seed\": 42, \"n_points\": 50}. Negative seeds use their absolute value."
        )]
        params: Option<PathBuf>,

        /// Reuse a verified cached artifact when present.
        #[arg(
            long,
            env = "USE_CACHE",
            value_name = "BOOL",
            default_value = "false",
            default_missing_value = "true",
            num_args = 0..=1,
            action = ArgAction::Set,
            value_parser = BoolishValueParser::new()
        )]
        use_cache: bool,
    },

    /// Print the cache key and artifact path for a parameter set.
    Key {
        #[command(flatten)]
        params: ParamsArgs,
    },

    /// Verify the cached artifact for a parameter set.
    #[command(
        long_about = "Check the cached artifact for the given parameters without modifying it.\n\n\
Reports one of: valid, missing, unreadable, malformed, mismatch.\n\
Exits with a non-zero status unless the artifact is valid."
    )]
    Verify {
        #[command(flatten)]
        params: ParamsArgs,
    },

    /// List and verify every artifact in the cache root.
    List,

    /// Check that the cache root is usable.
    Doctor,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);
    let cache_root = cli.cache_root;

    match cli.command {
        Commands::Get {
            seed,
            points,
            params,
            use_cache,
        } => {
            let params = match (params, seed, points) {
                (Some(path), _, _) => load_params(&path)?,
                (None, Some(seed), Some(points)) => ParamsArgs { seed, points }.to_params()?,
                _ => anyhow::bail!("either --params or both --seed and --points are required"),
            };
            crate::commands::get::run_get(&cache_root, params, use_cache, render_config)
        }

        Commands::Key { params } => {
            crate::commands::key::run_key(&cache_root, params.to_params()?, render_config)
        }

        Commands::Verify { params } => {
            crate::commands::verify::run_verify(&cache_root, params.to_params()?, render_config)
        }

        Commands::List => crate::commands::list::run_list(&cache_root, render_config),

        Commands::Doctor => crate::commands::doctor::run_doctor(&cache_root, render_config),
    }
}
