use cdist_timings::{Config, Harness};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cdist-timings")]
#[command(
    about = "Compare loop-based and vectorised cosine nearest-neighbour matching",
    long_about = None
)]
struct Cli {
    /// Configuration file path (.json, .yaml or .toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level
    #[arg(short, long)]
    log_level: Option<String>,

    /// Timing runs per configuration
    #[arg(long)]
    loops: Option<usize>,

    /// Timed executions per implementation per run
    #[arg(short, long)]
    repeats: Option<usize>,

    /// Fixed RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start the loop matcher at row 0 instead of row 1
    #[arg(long)]
    scan_from_first_row: bool,

    /// Sweep several dimensions and vector lengths
    #[arg(long)]
    full_sweep: bool,
}

/// Config file when given, otherwise defaults plus `CDIST_*` variables
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(config_path) => Config::from_file(config_path)?,
        None => Config::from_env()?,
    };
    Ok(apply_overrides(cli, config))
}

/// Command-line flags take precedence over file and environment values
fn apply_overrides(cli: &Cli, mut config: Config) -> Config {
    if cli.full_sweep {
        config.sweep = Config::full_sweep().sweep;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(loops) = cli.loops {
        config.loops = loops;
    }
    if let Some(repeats) = cli.repeats {
        config.repeats = repeats;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if cli.scan_from_first_row {
        config.matcher.scan_from_first_row = true;
    }
    config
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(std::io::stderr)
        .init();

    if !config.matcher.scan_from_first_row {
        tracing::debug!("Loop matcher starts at row 1; row 0 of the first matrix is not scanned");
    }

    let mut harness = Harness::new(config)?;
    let stdout = std::io::stdout();
    harness.run(&mut stdout.lock())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdist_timings::SweepConfig;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cdist-timings").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_keep_config() {
        let base = Config {
            loops: 4,
            seed: Some(9),
            ..Config::default()
        };
        let config = apply_overrides(&parse(&[]), base);

        assert_eq!(config.loops, 4);
        assert_eq!(config.repeats, 10);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.sweep, SweepConfig::default());
        assert!(!config.matcher.scan_from_first_row);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_full_sweep_replaces_only_sweep() {
        let base = Config {
            loops: 2,
            repeats: 3,
            seed: Some(1),
            ..Config::default()
        };
        let config = apply_overrides(&parse(&["--full-sweep"]), base);

        assert_eq!(config.sweep, Config::full_sweep().sweep);
        assert_eq!(config.loops, 2);
        assert_eq!(config.repeats, 3);
        assert_eq!(config.seed, Some(1));
    }

    #[test]
    fn test_flags_override_every_field() {
        let cli = parse(&[
            "--loops",
            "5",
            "-r",
            "7",
            "-s",
            "11",
            "-l",
            "debug",
            "--scan-from-first-row",
        ]);
        let config = apply_overrides(&cli, Config::default());

        assert_eq!(config.loops, 5);
        assert_eq!(config.repeats, 7);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.log_level, "debug");
        assert!(config.matcher.scan_from_first_row);
    }

    #[test]
    fn test_flags_apply_after_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "loops = 2\nrepeats = 4\nseed = 3\n\n[sweep]\ndimensions = [6]\nvector_lengths = [2]"
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = load_config(&parse(&["--config", path.as_str(), "--repeats", "1"])).unwrap();
        assert_eq!(config.loops, 2);
        assert_eq!(config.repeats, 1);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.sweep.dimensions, vec![6]);

        let config = load_config(&parse(&["-c", path.as_str(), "--full-sweep"])).unwrap();
        assert_eq!(config.sweep, Config::full_sweep().sweep);
        assert_eq!(config.repeats, 4);
    }
}
