use std::{fs, path::Path};

use anyhow::{Context, Result};
use semdiff::{
    backend::{assign, linguist::Languages},
    config::Config,
};

use crate::commands::resolve_language;

pub(crate) fn parse(file: &Path, language: Option<Languages>, cfg: &Config) -> Result<()> {
    let lang = resolve_language(language, &[file])?;
    let source =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;

    let term = assign::parse(lang, &source, cfg.limits().max_depth)
        .with_context(|| format!("parsing {}", file.display()))?;

    println!("{term}");
    println!("{} nodes", term.size());

    Ok(())
}
