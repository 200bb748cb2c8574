mod collatz;
mod config;
mod display;
mod error;
mod geometry;
mod help;
mod palette;
mod render;
mod settings;
mod surface;
mod terminal;

use clap::{Args, Parser, Subcommand};
use collatz::SequenceCollection;
use config::{ColorMode, PathsConfig};
use error::Result;
use settings::{PathSettings, Settings};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use surface::{PathLog, RasterCanvas, Surface};

#[derive(Parser)]
#[command(name = "collatz-paths")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(about = "Collatz sequences drawn as zig-zag paths in the terminal or to PNG", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the paths in the terminal and scroll around them
    View {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Print the paths to stdout (no interactive display)
    Print {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Draw the paths into a PNG image, one pixel per unit
    Export {
        /// Output file
        output: PathBuf,

        #[command(flatten)]
        paths: PathArgs,
    },

    /// Print the computed sequences, one per line
    Sequences {
        /// Print as a JSON array of arrays instead
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        paths: PathArgs,
    },

    /// Print the drawing commands for every path as JSON
    Paths {
        #[command(flatten)]
        paths: PathArgs,
    },
}

/// Options shared by every command. Unset options fall back to the
/// settings file, then to built-in defaults.
#[derive(Args)]
struct PathArgs {
    /// First starting value
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    start: Option<u64>,

    /// Last starting value (inclusive)
    #[arg(long, conflicts_with = "count")]
    stop: Option<u64>,

    /// Number of starting values beginning at --start
    #[arg(short = 'n', long)]
    count: Option<u64>,

    /// Maximum Collatz steps per path (0 or less draws a single point)
    #[arg(short = 'k', long, allow_hyphen_values = true)]
    max_iterations: Option<i64>,

    /// Keep iterating past 1 until --max-iterations
    #[arg(long)]
    no_stop_at_one: bool,

    /// Include even starting values
    #[arg(short, long, conflicts_with = "odd_only")]
    all: bool,

    /// Only odd starting values
    #[arg(long)]
    odd_only: bool,

    /// Vertical distance between paths
    #[arg(long)]
    n_spacing: Option<f32>,

    /// Horizontal distance between steps
    #[arg(long)]
    k_spacing: Option<f32>,

    /// Vertical change per step
    #[arg(long)]
    y_delta: Option<f32>,

    /// Draw paths one at a time (view only)
    #[arg(long)]
    animate: bool,

    /// Milliseconds per path when animating
    #[arg(short = 't', long)]
    frame_ms: Option<u64>,

    /// Stroke color selection
    #[arg(short, long, value_enum)]
    colors: Option<ColorMode>,

    /// Start every path at the same height
    #[arg(long)]
    tree: bool,

    /// Shared starting height in tree mode
    #[arg(long)]
    tree_origin: Option<f32>,

    /// Random seed for the random color mode
    #[arg(long)]
    seed: Option<u64>,
}

impl PathArgs {
    fn overrides(&self) -> PathSettings {
        let flag = |set: bool, value: bool| set.then_some(value);
        PathSettings {
            start: self.start,
            stop: self.stop,
            count: self.count,
            max_iterations: self.max_iterations,
            stop_at_one: flag(self.no_stop_at_one, false),
            odd_only: flag(self.all, false).or(flag(self.odd_only, true)),
            n_spacing: self.n_spacing,
            k_spacing: self.k_spacing,
            y_delta: self.y_delta,
            animate: flag(self.animate, true),
            frame_ms: self.frame_ms,
            colors: self.colors,
            tree: flag(self.tree, true),
            tree_origin: self.tree_origin,
            seed: self.seed,
        }
    }

    /// Defaults, then the settings file, then the command line
    fn config(&self, settings: &Settings) -> PathsConfig {
        let mut config = PathsConfig::default();
        let overrides = self.overrides();
        // A --stop or --count on the command line replaces the file's range
        if overrides.stop.is_some() || overrides.count.is_some() {
            PathSettings { stop: None, count: None, ..settings.paths.clone() }.apply(&mut config);
        } else {
            settings.paths.apply(&mut config);
        }
        overrides.apply(&mut config);
        config
    }

    /// Config for one-shot output, where pacing has nothing to show
    fn still_config(&self, settings: &Settings) -> PathsConfig {
        let mut config = self.config(settings);
        if config.animate {
            log::debug!("animation only applies to the view command");
            config.animate = false;
        }
        config
    }
}

fn compute(config: &PathsConfig) -> SequenceCollection {
    log::info!("computing Collatz sequences");
    let collection = collatz::generate(config);
    if collection.is_empty() {
        log::warn!("no starting values in range, nothing to draw");
    }
    log::info!(
        "computed {} sequences, longest has {} values",
        collection.len(),
        collection.longest()
    );
    collection
}

fn print_sequences(collection: &SequenceCollection, json: bool) -> Result<()> {
    let mut out = io::stdout().lock();

    if json {
        serde_json::to_writer(&mut out, collection)?;
        writeln!(out)?;
    } else {
        for sequence in collection {
            let line: Vec<String> = sequence.values().iter().map(u64::to_string).collect();
            writeln!(out, "{}", line.join(" "))?;
        }
    }

    out.flush()?;
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load();

    match cli.command {
        Commands::View { paths } => {
            let config = paths.config(&settings);
            let collection = compute(&config);
            display::run_interactive(&config, &collection)?;
        }
        Commands::Print { paths } => {
            let config = paths.still_config(&settings);
            let collection = compute(&config);
            display::run_print(&config, &collection)?;
        }
        Commands::Export { output, paths } => {
            let config = paths.still_config(&settings);
            let collection = compute(&config);
            let mut canvas = RasterCanvas::new();
            render::render(&mut canvas, &collection, &config, |_| Ok(()))?;
            canvas.save_png(&output)?;
            let (width, height) = canvas.size();
            log::info!("wrote {}x{} image to {}", width, height, output.display());
        }
        Commands::Sequences { json, paths } => {
            let config = paths.still_config(&settings);
            print_sequences(&compute(&config), json)?;
        }
        Commands::Paths { paths } => {
            let config = paths.still_config(&settings);
            let collection = compute(&config);
            let mut path_log = PathLog::new();
            render::render(&mut path_log, &collection, &config, |_| Ok(()))?;
            let mut out = io::stdout().lock();
            serde_json::to_writer(&mut out, &path_log)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("collatz-paths: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Range;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("collatz-paths").chain(args.iter().copied())).unwrap()
    }

    fn config_of(args: &[&str], settings: &Settings) -> PathsConfig {
        match parse(args).command {
            Commands::View { paths } => paths.config(settings),
            _ => panic!("expected view"),
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_flags_keeps_defaults() {
        let config = config_of(&["view"], &Settings::default());
        assert_eq!(config.start, 1);
        assert_eq!(config.range, Range::Stop(800));
        assert!(config.stop_at_one);
        assert!(config.odd_only);
    }

    #[test]
    fn flags_override_defaults() {
        let config = config_of(
            &["view", "-s", "5", "-n", "10", "--all", "--no-stop-at-one", "-k", "-1", "--tree", "-c", "random"],
            &Settings::default(),
        );
        assert_eq!(config.start, 5);
        assert_eq!(config.range, Range::Count(10));
        assert!(!config.odd_only);
        assert!(!config.stop_at_one);
        assert_eq!(config.max_iterations, -1);
        assert!(config.tree);
        assert_eq!(config.color_mode, ColorMode::Random);
    }

    #[test]
    fn flags_override_settings_file() {
        let settings: Settings =
            toml::from_str("[paths]\ncount = 50\nodd_only = false\nk_spacing = 2.0").unwrap();
        let config = config_of(&["view", "--stop", "9", "--odd-only"], &settings);
        assert_eq!(config.range, Range::Stop(9));
        assert!(config.odd_only);
        assert_eq!(config.spacing.k_spacing, 2.0);
    }

    #[test]
    fn stop_and_count_conflict() {
        let result = Cli::try_parse_from(["collatz-paths", "view", "--stop", "3", "--count", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_start_is_rejected() {
        let result = Cli::try_parse_from(["collatz-paths", "print", "--start", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn still_config_disables_animation() {
        match parse(&["print", "--animate"]).command {
            Commands::Print { paths } => assert!(!paths.still_config(&Settings::default()).animate),
            _ => panic!("expected print"),
        }
    }
}
