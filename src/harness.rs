//! Timing harness comparing the loop and vectorised matchers

use std::io::Write;

use crate::config::Config;
use crate::error::Result;
use crate::generator::{DataGenerator, MatrixPair};
use crate::matcher::{create_matcher, ClosestPair, Matcher, MatcherKind};
use crate::timing::{mean, speedup, Samples, Timer};

/// Runs every configured case and prints progress to a writer
pub struct Harness {
    config: Config,
    generator: DataGenerator,
    loop_matcher: Box<dyn Matcher>,
    vectorised_matcher: Box<dyn Matcher>,
}

impl Harness {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let generator = DataGenerator::from_config(&config);
        let loop_matcher = create_matcher(MatcherKind::Loop, &config.matcher);
        let vectorised_matcher = create_matcher(MatcherKind::Vectorised, &config.matcher);

        Ok(Self {
            config,
            generator,
            loop_matcher,
            vectorised_matcher,
        })
    }

    /// Run the whole sweep
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<BenchReport> {
        writeln!(
            out,
            "Starting benchmarks, running {} loops",
            self.config.loops
        )?;

        let mut cases = Vec::new();
        for (dimension, vector_length) in self.config.sweep.cases() {
            cases.push(self.run_case(out, dimension, vector_length)?);
        }

        Ok(BenchReport { cases })
    }

    /// Run `loops` timing runs for one matrix shape
    pub fn run_case<W: Write>(
        &mut self,
        out: &mut W,
        dimension: usize,
        vector_length: usize,
    ) -> Result<CaseReport> {
        tracing::info!(
            dimension,
            vector_length,
            loops = self.config.loops,
            repeats = self.config.repeats,
            "Benchmarking configuration"
        );
        writeln!(
            out,
            "Configuration: dimension = {}, vector length = {}",
            dimension, vector_length
        )?;

        let mut runs = Vec::with_capacity(self.config.loops);
        for run_index in 1..=self.config.loops {
            writeln!(out, "Timing run {}", run_index)?;

            // Fresh data each run, shared by both implementations
            let data = self.generator.generate(dimension, vector_length)?;
            runs.push(self.time_run(out, &data)?);
        }

        let loop_avgs: Vec<f64> = runs.iter().map(|r| r.loop_avg).collect();
        let vectorised_avgs: Vec<f64> = runs.iter().map(|r| r.vectorised_avg).collect();
        let loop_mean = mean(&loop_avgs)?;
        let vectorised_mean = mean(&vectorised_avgs)?;
        let overall = speedup(loop_mean, vectorised_mean)?;

        writeln!(out, "overall average loop duration = {}", loop_mean)?;
        writeln!(
            out,
            "overall average vectorised duration = {}",
            vectorised_mean
        )?;
        writeln!(out, "overall vectorised is {} times faster", overall)?;

        Ok(CaseReport {
            dimension,
            vector_length,
            runs,
            loop_mean,
            vectorised_mean,
            speedup: overall,
        })
    }

    fn time_run<W: Write>(&self, out: &mut W, data: &MatrixPair) -> Result<RunReport> {
        writeln!(out, "running loop implementation")?;
        let (loop_samples, loop_pair) = self.time_matcher(self.loop_matcher.as_ref(), data)?;
        let loop_avg = loop_samples.mean()?;
        writeln!(out, "average loop duration = {}", loop_avg)?;

        if loop_pair.is_none() && self.config.repeats > 0 {
            tracing::warn!(
                rows = data.rows(),
                "Loop matcher scanned no rows, no closest pair"
            );
            writeln!(out, "loop implementation scanned no rows")?;
        }

        writeln!(out, "running vectorised - - - - - - -")?;
        let (vectorised_samples, vectorised_pair) =
            self.time_matcher(self.vectorised_matcher.as_ref(), data)?;
        let vectorised_avg = vectorised_samples.mean()?;
        writeln!(out, "average vectorised duration = {}", vectorised_avg)?;

        let ratio = speedup(loop_avg, vectorised_avg)?;
        writeln!(out, "vectorised is {} times faster", ratio)?;

        Ok(RunReport {
            loop_avg,
            vectorised_avg,
            speedup: ratio,
            loop_pair,
            vectorised_pair,
        })
    }

    fn time_matcher(
        &self,
        matcher: &dyn Matcher,
        data: &MatrixPair,
    ) -> Result<(Samples, Option<ClosestPair>)> {
        let mut last = None;
        let samples = Timer::new(|| -> Result<()> {
            last = matcher.find_closest(data)?;
            Ok(())
        })
        .repeat(self.config.repeats, self.config.number)?;

        tracing::debug!(
            matcher = matcher.name(),
            durations = ?samples.durations(),
            "Timing samples"
        );

        Ok((samples, last))
    }
}

/// Results of a full sweep
#[derive(Debug, Clone)]
pub struct BenchReport {
    pub cases: Vec<CaseReport>,
}

/// Results for one (dimension, vector length) configuration
#[derive(Debug, Clone)]
pub struct CaseReport {
    pub dimension: usize,
    pub vector_length: usize,
    pub runs: Vec<RunReport>,
    /// Mean of the per-run loop averages
    pub loop_mean: f64,
    /// Mean of the per-run vectorised averages
    pub vectorised_mean: f64,
    pub speedup: f64,
}

/// Results of one timing run on freshly generated data
#[derive(Debug, Clone)]
pub struct RunReport {
    pub loop_avg: f64,
    pub vectorised_avg: f64,
    pub speedup: f64,
    pub loop_pair: Option<ClosestPair>,
    pub vectorised_pair: Option<ClosestPair>,
}
