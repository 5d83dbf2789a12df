//! Assignment of tree_sitter `Node`s to `Term`s.
//!
//! A handful of node kinds common to the supported grammars get a proper
//! shape (calls, functions, bindings, identifiers, literals). Every other
//! named node becomes a `Group` named after its kind; anonymous tokens and
//! extras (comments) are dropped.
use crate::backend::{
    linguist::{get_ts_language, Languages},
    syntax::Literal,
    term::Term,
};
use anyhow::{anyhow, bail, Result};
use tracing::debug;
use tree_sitter::{Node, Parser};

const CALLS: [&str; 2] = ["call_expression", "call"];

/// Named functions, bound to their name.
const FUNCTIONS: [&str; 5] = [
    "function_item",
    "function_definition",
    "function_declaration",
    "generator_function_declaration",
    "method_definition",
];

const LAMBDAS: [&str; 4] = [
    "closure_expression",
    "lambda",
    "arrow_function",
    "function_expression",
];

/// Node kind, name field, value field.
const BINDINGS: [(&str, &str, &str); 6] = [
    ("let_declaration", "pattern", "value"),
    ("const_item", "name", "value"),
    ("static_item", "name", "value"),
    ("assignment", "left", "right"),
    ("assignment_expression", "left", "right"),
    ("variable_declarator", "name", "value"),
];

const INTEGERS: [&str; 3] = ["integer_literal", "integer", "number"];

const TEXTS: [&str; 9] = [
    "string_literal",
    "raw_string_literal",
    "char_literal",
    "float_literal",
    "string",
    "concatenated_string",
    "float",
    "template_string",
    "regex",
];

fn parse_integer(text: &str) -> Option<i64> {
    let digits = text.replace('_', "");

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(rest) = digits.strip_prefix(prefix) {
            return i64::from_str_radix(rest, radix).ok();
        }
    }

    digits.parse().ok()
}

pub struct Assigner<'a> {
    source: &'a str,
    max_depth: usize,
}

impl<'a> Assigner<'a> {
    pub fn new(source: &'a str, max_depth: usize) -> Self {
        Self { source, max_depth }
    }

    pub fn assign(&self, node: Node<'_>) -> Result<Term> {
        self.term(node, 0)
    }

    fn text(&self, node: Node<'_>) -> &'a str {
        &self.source[node.start_byte()..node.end_byte()]
    }

    fn field(&self, node: Node<'_>, name: &str, depth: usize) -> Result<Term> {
        match node.child_by_field_name(name) {
            Some(child) => self.term(child, depth),
            None => Ok(Term::Empty),
        }
    }

    fn members(&self, node: Option<Node<'_>>, depth: usize) -> Result<Vec<Term>> {
        let Some(node) = node else {
            return Ok(vec![]);
        };

        let mut cursor = node.walk();
        let children = node
            .named_children(&mut cursor)
            .filter(|c| !c.is_extra())
            .collect::<Vec<_>>();

        children.into_iter().map(|c| self.term(c, depth)).collect()
    }

    fn term(&self, node: Node<'_>, depth: usize) -> Result<Term> {
        if depth > self.max_depth {
            bail!("syntax tree nests more than {} levels", self.max_depth);
        }

        let kind = node.kind();
        let next = depth + 1;

        if CALLS.contains(&kind) {
            return Ok(Term::apply(
                self.field(node, "function", next)?,
                self.members(node.child_by_field_name("arguments"), next)?,
            ));
        }

        if FUNCTIONS.contains(&kind) || LAMBDAS.contains(&kind) {
            let params = match node.child_by_field_name("parameters") {
                Some(p) => self.members(Some(p), next)?,
                None => match node.child_by_field_name("parameter") {
                    Some(p) => vec![self.term(p, next)?],
                    None => vec![],
                },
            };
            let f = Term::abstraction(params, self.field(node, "body", next)?);

            return Ok(match node.child_by_field_name("name") {
                Some(name) if FUNCTIONS.contains(&kind) => Term::assign(self.text(name), f),
                _ => f,
            });
        }

        if let Some((_, name, value)) = BINDINGS.iter().find(|(k, _, _)| *k == kind) {
            if let Some(name) = node.child_by_field_name(name) {
                return Ok(Term::assign(self.text(name), self.field(node, value, next)?));
            }
        }

        let text = self.text(node);

        if node.named_child_count() == 0 && kind.ends_with("identifier") {
            return Ok(Term::variable(text));
        }

        if INTEGERS.contains(&kind) {
            return Ok(Term::literal(
                parse_integer(text).map_or_else(|| Literal::Text(text.to_string()), Literal::Integer),
            ));
        }

        match kind {
            "boolean_literal" => return Ok(Term::boolean(text == "true")),
            "true" => return Ok(Term::boolean(true)),
            "false" => return Ok(Term::boolean(false)),
            _ => {}
        }

        if TEXTS.contains(&kind) {
            return Ok(Term::text(text));
        }

        let members = self.members(Some(node), next)?;

        Ok(if members.is_empty() {
            Term::group(Term::variable(kind), vec![Term::text(text)])
        } else {
            Term::group(Term::variable(kind), members)
        })
    }
}

/// Parses `source` with the grammar of `lang` and assigns the result.
pub fn parse(lang: Languages, source: &str, max_depth: usize) -> Result<Term> {
    let mut parser = Parser::new();

    parser.set_language(&get_ts_language(lang))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| anyhow!("tree-sitter gave up parsing the {lang:?} source"))?;
    let term = Assigner::new(source, max_depth).assign(tree.root_node())?;

    debug!(?lang, nodes = term.size(), "assigned syntax tree");

    Ok(term)
}
