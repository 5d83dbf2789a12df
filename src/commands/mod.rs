use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Subcommand;
use semdiff::{
    backend::linguist::{Languages, LinguistState},
    config::Config,
};

pub(crate) mod diff;
pub(crate) mod parse;

/// The explicit language if any, else the first file name that tells.
pub(crate) fn resolve_language(explicit: Option<Languages>, files: &[&Path]) -> Result<Languages> {
    if let Some(lang) = explicit {
        return Ok(lang);
    }

    let state = LinguistState::new()?;

    files
        .iter()
        .find_map(|f| state.guess_language(f))
        .ok_or_else(|| {
            anyhow!(
                "cannot tell the language of {}; pass --language",
                files
                    .first()
                    .map_or_else(String::new, |f| f.display().to_string())
            )
        })
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// show the structural difference between two files
    Diff {
        old: PathBuf,
        new: PathBuf,

        /// the grammar to parse both files with.  guessed
        /// from the file names when absent.
        #[arg(short, long, value_enum)]
        language: Option<Languages>,
    },
    /// show the term a file is assigned to
    Parse {
        file: PathBuf,

        /// the grammar to parse the file with.  guessed
        /// from the file name when absent.
        #[arg(short, long, value_enum)]
        language: Option<Languages>,
    },
}

impl Commands {
    pub(crate) fn execute(&self, cfg: &Config) -> Result<()> {
        match self {
            Commands::Diff { old, new, language } => diff::diff(old, new, *language, cfg),
            Commands::Parse { file, language } => parse::parse(file, *language, cfg),
        }
    }
}
