//! Layered TOML configuration.
use crate::backend::differ::Limits;
use anyhow::{Context, Result};
use config_derive::Merge;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

#[derive(Deserialize, Merge, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub limits: LimitsConfig,
    pub log: Log,
}

impl Config {
    /// Configured limits, defaults filled in.
    pub fn limits(&self) -> Limits {
        let default = Limits::default();

        Limits {
            max_depth: self.limits.max_depth.unwrap_or(default.max_depth),
            max_sequence_cells: self
                .limits
                .max_sequence_cells
                .unwrap_or(default.max_sequence_cells),
            max_total_cells: self
                .limits
                .max_total_cells
                .unwrap_or(default.max_total_cells),
        }
    }
}

#[derive(Deserialize, Merge, Clone, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    pub max_depth: Option<usize>,
    pub max_sequence_cells: Option<usize>,
    pub max_total_cells: Option<usize>,
}

#[derive(Deserialize, Merge, Clone, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Log {
    /// A `tracing_subscriber::EnvFilter` directive, e.g. `semdiff=debug`.
    pub filter: Option<String>,
}

/// Read in this order, later files overriding earlier ones.
pub const CONFIG_PATHS: [&str; 4] = [
    "/etc/semdiff.toml",
    "$XDG_CONFIG_HOME$/semdiff/config.toml",
    "$HOME$/.config/semdiff/config.toml",
    "$PWD$/.semdiff.toml",
];

/// Expands `$VAR$` placeholders. `None` when a variable is unset, except
/// `PWD` which falls back to the current directory.
fn replace_variables(s: &str) -> Result<Option<String>> {
    let mut out = String::new();

    for (i, x) in s.split('$').enumerate() {
        if i % 2 == 0 {
            out.push_str(x);
        } else {
            match env::var(x) {
                Ok(x) => out.push_str(&x),
                _ if x == "PWD" => out.push_str(&env::current_dir()?.to_string_lossy()),
                _ => return Ok(None),
            }
        }
    }

    Ok(Some(out))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

fn extract_config(p: &Path, cfg: Config) -> Result<Config> {
    let s = fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
    let new = parse_config(&s).with_context(|| format!("parsing {}", p.display()))?;

    Ok(cfg.merge(new))
}

/// Reads every configuration file that exists, then `extra` if given.
/// Also returns the files read, in order; logging is not up yet.
pub fn read_config(extra: Option<&Path>) -> Result<(Config, Vec<PathBuf>)> {
    read_layers(&CONFIG_PATHS, extra)
}

fn read_layers(layers: &[&str], extra: Option<&Path>) -> Result<(Config, Vec<PathBuf>)> {
    let mut config = Config::default();
    let mut read = Vec::new();

    for path in layers {
        let Some(path) = replace_variables(path)? else {
            continue;
        };
        let path = PathBuf::from(path);

        if path.exists() {
            config = extract_config(&path, config)?;
            read.push(path);
        }
    }

    if let Some(path) = extra {
        config = extract_config(path, config)?;
        read.push(path.to_path_buf());
    }

    Ok((config, read))
}
