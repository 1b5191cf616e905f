use crate::engine::constants::{
    ARRAY_SIZE_RANGE, DEFAULT_ARRAY_SIZE, DEFAULT_HISTORY_LINES, DEFAULT_TABLE_SIZE,
    TABLE_SIZE_RANGE,
};
use crate::engine::errors::{parse_number, EngineError};
use crate::engine::searching::SearchAlgorithm;
use crate::engine::sorting::SortAlgorithm;
use crate::session::PanelKind;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Panel shown at startup
    #[arg(long, value_enum, default_value_t = PanelKind::Sorting)]
    pub panel: PanelKind,
    /// Delay between steps in milliseconds; each panel has its own default
    #[arg(short, long)]
    pub speed: Option<u64>,
    /// Length of the sorting array, 5 to 100
    #[arg(long, default_value_t = DEFAULT_ARRAY_SIZE)]
    pub array_size: usize,
    /// Number of hash table slots, 1 to 64
    #[arg(long, default_value_t = DEFAULT_TABLE_SIZE)]
    pub table_size: usize,
    /// Seed for generated data, random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
    /// Step descriptions kept in each step log
    #[arg(long, default_value_t = DEFAULT_HISTORY_LINES)]
    pub history: usize,
    /// Log level, defaults to [`tracing::Level::INFO`]
    #[arg(default_value_t = tracing::Level::INFO, long)]
    pub log_level: tracing::Level,
    /// Write logs to this file; the TUI logs nowhere otherwise
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Print a step trace instead of launching the TUI
    #[arg(long)]
    pub headless: bool,
    /// Sorting algorithm for a headless run
    #[arg(long, value_enum, conflicts_with = "search")]
    pub sort: Option<SortAlgorithm>,
    /// Search algorithm for a headless run
    #[arg(long, value_enum, requires = "target")]
    pub search: Option<SearchAlgorithm>,
    /// Value to look for with --search
    #[arg(long, allow_hyphen_values = true)]
    pub target: Option<i64>,
    /// Comma separated values for a headless run, e.g. 5,3,8,1
    #[arg(long, allow_hyphen_values = true)]
    pub values: Option<String>,
}

/// What a headless run should do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeadlessRun {
    Sort(SortAlgorithm),
    Search { algorithm: SearchAlgorithm, target: i64 },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub panel: PanelKind,
    pub speed: Option<u64>,
    pub array_size: usize,
    pub table_size: usize,
    pub seed: Option<u64>,
    pub history: usize,
    pub log_level: tracing::Level,
    pub log_file: Option<PathBuf>,
    pub headless: bool,
    pub run: HeadlessRun,
    pub values: Option<Vec<i64>>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            panel: PanelKind::Sorting,
            speed: None,
            array_size: DEFAULT_ARRAY_SIZE,
            table_size: DEFAULT_TABLE_SIZE,
            seed: None,
            history: DEFAULT_HISTORY_LINES,
            log_level: tracing::Level::INFO,
            log_file: None,
            headless: false,
            run: HeadlessRun::Sort(SortAlgorithm::Bubble),
            values: None,
        }
    }
}

impl Config {
    /// Generator for bulk data, reproducible when `--seed` was given
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Parse `5,3,8,1` into values
pub fn parse_values(input: &str) -> Result<Vec<i64>, EngineError> {
    let values = input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_number)
        .collect::<Result<Vec<_>, _>>()?;
    if values.is_empty() {
        return Err(EngineError::invalid_input(input, "expected comma separated numbers"));
    }
    Ok(values)
}

impl Cli {
    pub fn get_config(self) -> Result<Config, EngineError> {
        if !ARRAY_SIZE_RANGE.contains(&self.array_size) {
            return Err(EngineError::InvalidConfiguration(format!(
                "--array-size must be within {}..={}, got {}",
                ARRAY_SIZE_RANGE.start(),
                ARRAY_SIZE_RANGE.end(),
                self.array_size
            )));
        }
        if !TABLE_SIZE_RANGE.contains(&self.table_size) {
            return Err(EngineError::InvalidConfiguration(format!(
                "--table-size must be within {}..={}, got {}",
                TABLE_SIZE_RANGE.start(),
                TABLE_SIZE_RANGE.end(),
                self.table_size
            )));
        }
        if self.speed == Some(0) {
            return Err(EngineError::InvalidConfiguration(String::from(
                "--speed must be at least 1 ms",
            )));
        }
        if self.history == 0 {
            return Err(EngineError::InvalidConfiguration(String::from(
                "--history must keep at least one line",
            )));
        }
        let run = match (self.search, self.target) {
            (Some(algorithm), Some(target)) => HeadlessRun::Search { algorithm, target },
            (Some(_), None) => {
                return Err(EngineError::InvalidConfiguration(String::from(
                    "--search needs --target",
                )))
            }
            (None, _) => HeadlessRun::Sort(self.sort.unwrap_or(SortAlgorithm::Bubble)),
        };
        let values = self.values.as_deref().map(parse_values).transpose()?;
        Ok(Config {
            panel: self.panel,
            speed: self.speed,
            array_size: self.array_size,
            table_size: self.table_size,
            seed: self.seed,
            history: self.history,
            log_level: self.log_level,
            log_file: self.log_file,
            headless: self.headless,
            run,
            values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, EngineError> {
        let cli = Cli::try_parse_from(std::iter::once("algoviz").chain(args.iter().copied()))
            .expect("arguments should parse");
        cli.get_config()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.array_size, DEFAULT_ARRAY_SIZE);
        assert_eq!(config.table_size, DEFAULT_TABLE_SIZE);
        assert_eq!(config.panel, PanelKind::Sorting);
        assert_eq!(config.run, HeadlessRun::Sort(SortAlgorithm::Bubble));
        assert!(!config.headless);
    }

    #[test]
    fn test_headless_search() {
        let config = parse(&[
            "--headless",
            "--search",
            "binary",
            "--target",
            "-4",
            "--values",
            "-9,-4,0,7",
        ])
        .unwrap();
        assert_eq!(
            config.run,
            HeadlessRun::Search {
                algorithm: SearchAlgorithm::Binary,
                target: -4
            }
        );
        assert_eq!(config.values, Some(vec![-9, -4, 0, 7]));
    }

    #[test]
    fn test_out_of_range_sizes_rejected() {
        assert!(matches!(
            parse(&["--array-size", "4"]),
            Err(EngineError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            parse(&["--table-size", "65"]),
            Err(EngineError::InvalidConfiguration(_))
        ));
        assert!(parse(&["--speed", "0"]).is_err());
    }

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_values(" 5, 3,8 ,1").unwrap(), vec![5, 3, 8, 1]);
        assert!(parse_values("5,x").is_err());
        assert!(parse_values(" , ").is_err());
    }
}
