//! Which grammar to parse a file with.
use clap::ValueEnum;
use glob::{Pattern, PatternError};
use std::{collections::BTreeMap, ffi::OsStr, path::Path};

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Languages {
    Rust,
    Javascript,
    Python,
}

const FILENAMES: [(Languages, &[&str]); 3] = [
    (Languages::Rust, &["*.rs"]),
    (Languages::Javascript, &["*.js", "*.mjs", "*.cjs", "*.jsx"]),
    (Languages::Python, &["*.py", "*.pyi"]),
];

pub fn get_ts_language(lng: Languages) -> tree_sitter::Language {
    match lng {
        Languages::Rust => tree_sitter_rust::LANGUAGE.into(),
        Languages::Javascript => tree_sitter_javascript::LANGUAGE.into(),
        Languages::Python => tree_sitter_python::LANGUAGE.into(),
    }
}

/// Compiled file name patterns.
#[derive(Debug, Clone)]
pub struct LinguistState {
    filenames: BTreeMap<Languages, Vec<Pattern>>,
}

impl LinguistState {
    pub fn new() -> Result<Self, PatternError> {
        let mut filenames = BTreeMap::new();

        for (lang, patterns) in FILENAMES {
            let patterns = patterns
                .iter()
                .map(|p| Pattern::new(p))
                .collect::<Result<Vec<_>, _>>()?;

            filenames.insert(lang, patterns);
        }

        Ok(Self { filenames })
    }

    pub fn guess_language(&self, file: &Path) -> Option<Languages> {
        let fname = file.file_name().and_then(OsStr::to_str).unwrap_or("");

        for (lang, patterns) in &self.filenames {
            for pattern in patterns {
                if pattern.matches(fname) {
                    return Some(*lang);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod test {
    use super::{LinguistState, Languages};
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case("src/main.rs", Some(Languages::Rust))]
    #[case("web/app.mjs", Some(Languages::Javascript))]
    #[case("component.jsx", Some(Languages::Javascript))]
    #[case("/tmp/script.py", Some(Languages::Python))]
    #[case("stubs.pyi", Some(Languages::Python))]
    #[case("README.md", None)]
    #[case("rs", None)]
    fn guess(#[case] file: &str, #[case] expected: Option<Languages>) {
        let state = LinguistState::new().unwrap();

        assert_eq!(state.guess_language(Path::new(file)), expected);
    }
}
