use std::{fs, path::Path};

use anyhow::{Context, Result};
use semdiff::{
    backend::{assign::parse, differ::Differ, linguist::Languages, term::Term},
    config::Config,
};
use tracing::info;

use crate::commands::resolve_language;

fn read_term(file: &Path, lang: Languages, max_depth: usize) -> Result<Term> {
    let source =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;

    parse(lang, &source, max_depth).with_context(|| format!("parsing {}", file.display()))
}

pub(crate) fn diff(
    old: &Path,
    new: &Path,
    language: Option<Languages>,
    cfg: &Config,
) -> Result<()> {
    let differ = Differ::new(cfg.limits());
    let lang = resolve_language(language, &[old, new])?;

    let left = read_term(old, lang, differ.limits().max_depth)?;
    let right = read_term(new, lang, differ.limits().max_depth)?;

    let diff = differ
        .diff_term(&left, &right)
        .with_context(|| format!("comparing {} and {}", old.display(), new.display()))?;
    let n = diff.magnitude();

    info!(?lang, changes = n, "compared {} and {}", old.display(), new.display());

    println!("{diff}");
    println!("{} change{}", n, if n == 1 { "" } else { "s" });

    Ok(())
}
