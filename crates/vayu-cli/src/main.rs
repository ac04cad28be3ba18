mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::filter::EnvFilter;

use commands::Settings;

#[derive(Parser)]
#[command(
    name = "vayu",
    version,
    about = "Air-quality classifier for live station feeds and historical city rankings"
)]
struct Cli {
    /// Predefined scale: epa (default) or compact
    #[arg(long, global = true, value_name = "PRESET")]
    scale: Option<String>,

    /// Custom JSON scale file (overrides --scale)
    #[arg(long, global = true, value_name = "FILE")]
    scale_file: Option<PathBuf>,

    /// Output format: table (default) or json
    #[arg(short, long, global = true, default_value = "table")]
    output: String,

    /// UTC offset for timestamps when a feed has none, e.g. +05:30
    #[arg(long, global = true, value_name = "OFFSET")]
    tz: Option<String>,

    /// strftime pattern for timestamps
    #[arg(long, global = true, value_name = "PATTERN")]
    time_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one or more AQI values ("-" for no data)
    Classify {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Show display names and units for pollutant codes (all codes if none given)
    Pollutants { codes: Vec<String> },
    /// Render a saved station feed payload
    Report {
        /// Path to a feed JSON file
        input_file: PathBuf,
    },
    /// Fetch and render live station feeds
    Live {
        /// City name, @station-id, geo:LAT;LON or "here"
        #[arg(required = true)]
        queries: Vec<String>,

        /// API token (default: WAQI_TOKEN)
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,

        /// Maximum concurrent requests (default: VAYU_WORKERS or 4)
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Show bundled historical city rankings
    Rankings {
        /// Dataset name: aqi-2024 (default) or pm25-2024
        #[arg(short, long)]
        dataset: Option<String>,

        /// Only show the first N cities
        #[arg(long)]
        top: Option<usize>,

        /// Sort by rank, avg, peak or name
        #[arg(long, default_value = "rank")]
        sort: String,

        /// Show the monthly breakdown for one city
        #[arg(long)]
        city: Option<String>,
    },
    /// Health advice for people with pre-existing conditions
    Advice {
        /// Condition name or abbreviation (lists all conditions if omitted)
        condition: Option<String>,
    },
    /// Manage and inspect severity scales
    Scales {
        #[command(subcommand)]
        action: ScalesAction,
    },
}

#[derive(Subcommand)]
enum ScalesAction {
    /// List predefined scales
    List,
    /// Print the tiers of a scale (the active one if no preset is given)
    Explain {
        /// Preset name (e.g., "epa")
        preset: Option<String>,
    },
    /// Validate a custom scale file
    Validate {
        /// Path to JSON scale file
        file: PathBuf,
    },
}

fn main() {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = Settings::load(
        cli.scale.as_deref(),
        cli.scale_file.as_deref(),
        &cli.output,
        cli.tz.as_deref(),
        cli.time_format.as_deref(),
    )
    .and_then(|settings| match cli.command {
        Commands::Classify { values } => commands::classify::run(&settings, &values),
        Commands::Pollutants { codes } => commands::pollutants::run(&settings, &codes),
        Commands::Report { input_file } => commands::report::run(&settings, &input_file),
        Commands::Live {
            queries,
            token,
            workers,
        } => commands::report::live(&settings, &queries, token, workers),
        Commands::Rankings {
            dataset,
            top,
            sort,
            city,
        } => commands::rankings::run(&settings, dataset.as_deref(), top, &sort, city.as_deref()),
        Commands::Advice { condition } => commands::advice::run(&settings, condition.as_deref()),
        Commands::Scales { action } => match action {
            ScalesAction::List => commands::scales::list(&settings),
            ScalesAction::Explain { preset } => {
                commands::scales::explain(&settings, preset.as_deref())
            }
            ScalesAction::Validate { file } => commands::scales::validate(&settings, &file),
        },
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Install the global tracing subscriber. Logs go to stderr so that table
/// and JSON output on stdout stay clean.
///
/// - `RUST_LOG` takes precedence when set
/// - otherwise `VAYU_LOG_LEVEL` (trace|debug|info|warn|error, default warn)
/// - `FORCE_COLOR=1|true|yes` / `0|false|no` overrides TTY detection
fn init_tracing() {
    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stderr().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("VAYU_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("error") => "error",
            _ => "warn",
        };
        EnvFilter::new(format!("{level},reqwest=warn,hyper=warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
