//! Configuration for cdist timings

use serde::{Deserialize, Serialize};

/// Main configuration for a benchmark run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of data regenerations per configuration
    #[serde(default = "default_loops")]
    pub loops: usize,

    /// Timed executions per implementation per loop
    #[serde(default = "default_repeats")]
    pub repeats: usize,

    /// Calls per timed execution
    #[serde(default = "default_number")]
    pub number: usize,

    /// Configuration axes to sweep
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Fixed RNG seed, entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Matcher configuration
    #[serde(default)]
    pub matcher: MatcherConfig,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loops: default_loops(),
            repeats: default_repeats(),
            number: default_number(),
            sweep: SweepConfig::default(),
            seed: None,
            matcher: MatcherConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Sweep over several matrix sizes and vector lengths
    pub fn full_sweep() -> Self {
        Self {
            sweep: SweepConfig {
                dimensions: vec![10, 100, 1000],
                vector_lengths: vec![10, 100, 300],
            },
            ..Self::default()
        }
    }

    /// Load configuration from a file
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Config = if path.ends_with(".yaml") || path.ends_with(".yml") {
            serde_yaml::from_str(&content)
                .map_err(|e| crate::BenchError::Config(e.to_string()))?
        } else if path.ends_with(".toml") {
            toml::from_str(&content).map_err(|e| crate::BenchError::Config(e.to_string()))?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// A variable that is set but does not parse is an error.
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Self::default();

        if let Some(loops) = env_parse("CDIST_LOOPS")? {
            config.loops = loops;
        }
        if let Some(repeats) = env_parse("CDIST_REPEATS")? {
            config.repeats = repeats;
        }
        if let Some(seed) = env_parse("CDIST_SEED")? {
            config.seed = Some(seed);
        }
        if let Some(scan) = env_parse("CDIST_SCAN_FROM_FIRST_ROW")? {
            config.matcher.scan_from_first_row = scan;
        }
        if let Ok(level) = std::env::var("CDIST_LOG_LEVEL") {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Check the values a run depends on
    pub fn validate(&self) -> crate::Result<()> {
        if self.number == 0 {
            return Err(crate::BenchError::Config(
                "number of calls per repeat must be at least 1".to_string(),
            ));
        }
        if self.sweep.dimensions.is_empty() || self.sweep.vector_lengths.is_empty() {
            return Err(crate::BenchError::Config(
                "sweep needs at least one dimension and one vector length".to_string(),
            ));
        }
        if self.sweep.dimensions.contains(&0) {
            return Err(crate::BenchError::Config(
                "dimensions must be at least 1".to_string(),
            ));
        }
        if self.sweep.vector_lengths.contains(&0) {
            return Err(crate::BenchError::Config(
                "vector lengths must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> crate::Result<Option<T>> {
    let Ok(value) = std::env::var(key) else {
        return Ok(None);
    };
    value.parse().map(Some).map_err(|_| {
        crate::BenchError::Config(format!("Invalid value for {}: {:?}", key, value))
    })
}

/// Axes swept by the harness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Row counts of both matrices
    #[serde(default = "default_dimensions")]
    pub dimensions: Vec<usize>,

    /// Column counts of both matrices
    #[serde(default = "default_vector_lengths")]
    pub vector_lengths: Vec<usize>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            vector_lengths: default_vector_lengths(),
        }
    }
}

impl SweepConfig {
    /// Every (dimension, vector_length) pair, dimension-major
    pub fn cases(&self) -> Vec<(usize, usize)> {
        self.dimensions
            .iter()
            .flat_map(|&d| self.vector_lengths.iter().map(move |&v| (d, v)))
            .collect()
    }
}

/// Matcher configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Start the loop matcher at row 0 instead of row 1
    #[serde(default)]
    pub scan_from_first_row: bool,
}

// Default value functions
fn default_loops() -> usize {
    10
}

fn default_repeats() -> usize {
    10
}

fn default_number() -> usize {
    1
}

fn default_dimensions() -> Vec<usize> {
    vec![1000]
}

fn default_vector_lengths() -> Vec<usize> {
    vec![100]
}

fn default_log_level() -> String {
    "info".to_string()
}
