use pretty_assertions::assert_eq;
use rstest::rstest;
use semdiff::backend::{
    assign::parse, diff_term, linguist::Languages, patch::patch, Diff, Differ, DiffError, Limits,
    Term,
};

fn diff(lang: Languages, left: &str, right: &str) -> (Term, Term, Diff) {
    let l = parse(lang, left, 256).unwrap();
    let r = parse(lang, right, 256).unwrap();
    let d = diff_term(&l, &r).unwrap();

    (l, r, d)
}

#[rstest]
#[case::rust(Languages::Rust, "pub fn foo() {\n  bar(1, 2)\n}")]
#[case::javascript(Languages::Javascript, "function foo(x) { return bar(x, 2); }")]
#[case::python(Languages::Python, "def foo(x):\n    return bar(x, 2)\n")]
fn no_difference(#[case] lang: Languages, #[case] code: &str) {
    let (l, _, d) = diff(lang, code, code);

    assert!(d.is_empty());
    assert_eq!(d.magnitude(), 0);
    assert_eq!(patch(&l, &d), Ok(l));
}

#[rstest]
#[case::rust(Languages::Rust, "fn main() { foo(1, 2) }", "fn main() { foo(1, 3) }")]
#[case::javascript(Languages::Javascript, "foo(1, 2);", "foo(1, 3);")]
#[case::python(Languages::Python, "foo(1, 2)\n", "foo(1, 3)\n")]
fn changed_argument(#[case] lang: Languages, #[case] left: &str, #[case] right: &str) {
    let (_, _, d) = diff(lang, left, right);

    assert_eq!(d.magnitude(), 1);
    assert_eq!(d.changes(), vec![(&Term::integer(2), &Term::integer(3))]);
    assert!(d.to_string().contains("foo(1, {-2-}{+3+})"));
}

#[test]
fn renamed_function_is_one_patch() {
    let (l, r, d) = diff(
        Languages::Rust,
        "pub fn foo() {\n  1\n}",
        "pub fn bar() {\n  1\n}",
    );

    assert_eq!(d.magnitude(), 1);
    assert_eq!(d.before(), l);
    assert_eq!(d.after(), r);
}

#[test]
fn statement_added_and_changed() {
    let left = "pub fn foo() {\n  1\n}";
    let right = "pub fn foo() {\nlet x = 5;\n  3\n}";

    let (l, r, d) = diff(Languages::Rust, left, right);

    assert_eq!(d.magnitude(), 2);
    assert_eq!(patch(&l, &d), Ok(r));
}

#[test]
fn prepended_parameter() {
    let (_, _, d) = diff(
        Languages::Python,
        "def f(a, b):\n    pass\n",
        "def f(z, a, b):\n    pass\n",
    );

    assert_eq!(d.magnitude(), 1);
    assert_eq!(d.changes(), vec![(&Term::Empty, &Term::variable("z"))]);
}

#[test]
fn unrelated_files() {
    let (l, r, d) = diff(
        Languages::Rust,
        "pub fn foo() {\n  1\n}",
        "struct Foo { i: i32 }",
    );

    assert_eq!(patch(&l, &d), Ok(r));
}

#[test]
fn limits_are_reported() {
    let code = "fn f() { g(1, 2, 3, 4, 5, 6, 7, 8) }";
    let t = parse(Languages::Rust, code, 256).unwrap();

    let narrow = Differ::new(Limits {
        max_sequence_cells: 20,
        ..Limits::default()
    });

    assert_eq!(
        narrow.diff_term(&t, &t),
        Err(DiffError::TooLarge {
            cells: 81,
            limit: 20
        })
    );

    let shallow = Differ::new(Limits {
        max_depth: 3,
        ..Limits::default()
    });

    assert!(matches!(
        shallow.diff_term(&t, &t),
        Err(DiffError::TooDeep { limit: 3 })
    ));
}
