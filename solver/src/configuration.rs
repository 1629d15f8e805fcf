use anum_core::Budget;
use anyhow::{Context, Result};
use clap::ArgMatches;
use std::fs::File;
use std::str::FromStr;
use std::time::Duration;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Configuration {
    pub max_steps: usize,
    pub max_nodes: usize,
    pub max_depth: usize,
    pub timeout_ms: Option<u64>,
    /// Rewrite limit of the `normalize` command
    pub normalize_steps: usize,
    /// Size of the batch worker pool, all cores when missing
    pub threads: Option<usize>,
}

impl Default for Configuration {
    fn default() -> Configuration {
        let budget = Budget::default();
        Configuration {
            max_steps: budget.max_steps,
            max_nodes: budget.max_nodes,
            max_depth: budget.max_depth,
            timeout_ms: None,
            normalize_steps: 1000,
            threads: None,
        }
    }
}

fn parse_flag<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match matches.value_of(name) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Invalid value '{}' for --{}", value, name)),
    }
}

impl Configuration {
    pub fn load(filename: &str) -> Result<Configuration> {
        let file = File::open(filename)
            .with_context(|| format!("Opening configuration {}", filename))?;
        serde_yaml::from_reader(file)
            .with_context(|| format!("Decoding configuration {}", filename))
    }

    /// Command line flags take precedence over the file
    pub fn override_with(mut self, matches: &ArgMatches) -> Result<Configuration> {
        if let Some(max_steps) = parse_flag(matches, "max-steps")? {
            self.max_steps = max_steps;
        }
        if let Some(max_nodes) = parse_flag(matches, "max-nodes")? {
            self.max_nodes = max_nodes;
        }
        if let Some(max_depth) = parse_flag(matches, "max-depth")? {
            self.max_depth = max_depth;
        }
        if let Some(timeout_ms) = parse_flag(matches, "timeout-ms")? {
            self.timeout_ms = Some(timeout_ms);
        }
        Ok(self)
    }

    pub fn budget(&self) -> Budget {
        Budget {
            max_steps: self.max_steps,
            max_nodes: self.max_nodes,
            max_depth: self.max_depth,
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }
}

#[cfg(test)]
mod specs {
    use super::*;
    use clap::{App, Arg};

    fn matches(args: &[&str]) -> ArgMatches<'static> {
        App::new("test")
            .arg(Arg::with_name("max-steps").long("max-steps").takes_value(true))
            .arg(Arg::with_name("max-nodes").long("max-nodes").takes_value(true))
            .arg(Arg::with_name("max-depth").long("max-depth").takes_value(true))
            .arg(Arg::with_name("timeout-ms").long("timeout-ms").takes_value(true))
            .get_matches_from(args)
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let configuration: Configuration =
            serde_yaml::from_str("max-steps: 20\ntimeout-ms: 150\n").unwrap();
        assert_eq!(configuration.max_steps, 20);
        assert_eq!(configuration.max_nodes, Budget::default().max_nodes);
        assert_eq!(
            configuration.budget().timeout,
            Some(Duration::from_millis(150))
        );
    }

    #[test]
    fn default_budget() {
        assert_eq!(Configuration::default().budget(), Budget::default());
    }

    #[test]
    fn flags_override_file() {
        let configuration: Configuration = serde_yaml::from_str("max-steps: 20\nmax-depth: 3\n").unwrap();
        let configuration = configuration
            .override_with(&matches(&["test", "--max-steps", "70"]))
            .unwrap();
        assert_eq!(configuration.max_steps, 70);
        assert_eq!(configuration.max_depth, 3);
    }

    #[test]
    fn invalid_flag() {
        let actual = Configuration::default().override_with(&matches(&["test", "--max-nodes", "many"]));
        assert!(actual.is_err());
    }

    #[test]
    fn load_asset() {
        let filename = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/config.yaml");
        let configuration = Configuration::load(filename).unwrap();
        assert_eq!(configuration.max_nodes, 48);
        assert_eq!(configuration.timeout_ms, Some(2000));
    }
}
