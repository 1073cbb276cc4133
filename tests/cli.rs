use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn codis(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("codis"));
    cmd.arg("--root").arg(root);
    cmd
}

fn run_jsonl(cmd: &mut Command) -> Vec<Value> {
    let assert = cmd.assert().success();
    parse_jsonl(&assert.get_output().stdout)
}

fn field<'a>(item: &'a Value, name: &str) -> &'a str {
    item.get(name).and_then(|v| v.as_str()).unwrap()
}

/// Page lines below the info-view header
fn body_lines(page: &str) -> Vec<&str> {
    page.lines().skip(1).collect()
}

#[test]
fn search_single_hit_reports_file_and_line() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("notes.txt"), "alpha\nbeta\ngamma\n");
    write_file(&temp.path().join("other.md"), "delta\n");

    let items = run_jsonl(codis(temp.path()).arg("search").arg("beta"));

    assert_eq!(items.len(), 1);
    assert_eq!(field(&items[0], "location"), "notes.txt, line 2");
    assert_eq!(items[0]["index"], 0);
    let page = field(&items[0], "page");
    assert!(page.starts_with("\n\n\n"));
    assert!(page.contains("0|  alpha"));
    assert!(page.contains("1>  beta"));
    assert!(page.contains("2|  gamma"));
}

#[test]
fn search_invalid_regex_is_sentinel() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "anything");

    let items = run_jsonl(codis(temp.path()).arg("search").arg("(unclosed"));

    assert_eq!(items.len(), 1);
    assert_eq!(field(&items[0], "page"), "invalid query");
    assert_eq!(field(&items[0], "location"), "None");
}

#[test]
fn search_without_hits_is_none() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "anything");

    let items = run_jsonl(codis(temp.path()).arg("search").arg("missing"));

    assert_eq!(items.len(), 1);
    assert_eq!(field(&items[0], "page"), "None");
    assert_eq!(field(&items[0], "location"), "None");
}

#[test]
fn search_category_filter() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("app.py"), "token = 1");
    write_file(&temp.path().join("notes.md"), "token docs");

    let items = run_jsonl(
        codis(temp.path())
            .arg("search")
            .arg("token")
            .arg("--category")
            .arg("textual"),
    );

    assert_eq!(items.len(), 1);
    assert_eq!(field(&items[0], "location"), "notes.md, line 1");
}

#[test]
fn fuzzy_finds_misspelled_line() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("main.go"), "package main\nfunc main() {\n    println(1)\n}");

    let items = run_jsonl(codis(temp.path()).arg("fuzzy").arg("prntln"));

    assert_eq!(items.len(), 1);
    assert_eq!(field(&items[0], "location"), "main.go, line 3");
}

#[test]
fn explore_orders_files_before_dirs() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a"), "");
    write_file(&temp.path().join("b"), "");
    fs::create_dir(temp.path().join("d")).unwrap();

    let items = run_jsonl(codis(temp.path()).arg("explore"));

    assert_eq!(items.len(), 1);
    assert_eq!(field(&items[0], "location"), "file explorer");
    let page = field(&items[0], "page");
    assert!(page.lines().next().unwrap().ends_with("| showing: types"));

    let children: Vec<String> = body_lines(page)
        .into_iter()
        .skip(1)
        .map(|l| {
            let entry = l.split('|').nth(1).unwrap().trim();
            entry.split_whitespace().nth(1).unwrap().to_string()
        })
        .collect();
    assert_eq!(children, vec!["b", "a", "d"]);
}

#[test]
fn explore_zoom_and_miss() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("top.txt"), "");
    write_file(&temp.path().join("pkg/inner.go"), "func Inner() {}");

    let items = run_jsonl(codis(temp.path()).arg("explore").arg("2"));
    let lines = body_lines(field(&items[0], "page"));
    assert!(lines[0].starts_with("2   |\t/ pkg"));
    assert!(lines[1].starts_with("3   |\t\t- inner.go"));
    assert!(lines[1].ends_with("| code"));

    let items = run_jsonl(codis(temp.path()).arg("explore").arg("42"));
    assert_eq!(field(&items[0], "page"), "no entry with id 42");
    assert_eq!(field(&items[0], "location"), "None");
}

#[test]
fn explore_hits_view_counts_last_query() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("todo.txt"), "TODO one\nTODO two\ndone");

    let items = run_jsonl(
        codis(temp.path())
            .arg("explore")
            .arg("--info")
            .arg("hits")
            .arg("--hits")
            .arg("TODO"),
    );

    let page = field(&items[0], "page");
    assert!(page.lines().next().unwrap().ends_with("| showing: last query"));
    let file_line = body_lines(page)
        .into_iter()
        .find(|l| l.contains("- todo.txt"))
        .unwrap();
    assert!(file_line.ends_with("| 2"));
}

#[test]
fn deps_renders_import_tree() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("main.py"), "import helpers\nrun = 1");
    write_file(&temp.path().join("helpers.py"), "def help():\n    pass");

    let items = run_jsonl(codis(temp.path()).arg("deps").arg("--info").arg("functions"));

    assert_eq!(field(&items[0], "location"), "dependency explorer");
    let lines = body_lines(field(&items[0], "page"));
    assert_eq!(lines[0], "0   |> main.py");
    assert!(lines[1].starts_with("1   |\thelpers.py"));
    assert!(lines[1].ends_with("| 1"));
}

#[test]
fn deps_cycle_has_no_roots_but_can_be_focused() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.py"), "import b\nx = 1");
    write_file(&temp.path().join("b.py"), "import a\ny = 1");

    let items = run_jsonl(codis(temp.path()).arg("deps"));
    assert_eq!(field(&items[0], "page"), "None");

    let items = run_jsonl(codis(temp.path()).arg("deps").arg("a.py"));
    let lines = body_lines(field(&items[0], "page"));
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "0   |> a.py");
}

#[test]
fn related_lists_declarations() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("calc.py"),
        "total = 0\ndef add_total(value):\n    return value\nprint(total)",
    );

    let items = run_jsonl(codis(temp.path()).arg("related").arg("calc.py").arg("4"));
    let locations: Vec<&str> = items.iter().map(|i| field(i, "location")).collect();
    assert_eq!(locations, vec!["calc.py, line 1", "calc.py, line 2"]);

    let items = run_jsonl(codis(temp.path()).arg("related").arg("calc.py").arg("99"));
    assert_eq!(field(&items[0], "page"), "line not found...");
}

#[test]
fn files_shows_overview_panes() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("src/shop.py"), "import cart\nclass Shop:\n    pass");
    write_file(&temp.path().join("src/cart.py"), "items = []");

    let items = run_jsonl(codis(temp.path()).arg("files").arg("shop"));
    assert_eq!(items.len(), 1);
    assert_eq!(field(&items[0], "location"), "src/shop.py");
    assert_eq!(field(&items[0], "page"), "functions and objects:\n---\nShop\n");

    let items = run_jsonl(codis(temp.path()).arg("files").arg("shop").arg("--imports"));
    assert_eq!(field(&items[0], "page"), "imported files:\n---\n\tsrc/cart.py\n");
}

#[test]
fn markdown_format_has_one_section_per_page() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "needle\nhay\nneedle");

    codis(temp.path())
        .arg("--format")
        .arg("md")
        .arg("search")
        .arg("needle")
        .assert()
        .success()
        .stdout(predicate::str::contains("## a.txt, line 1"))
        .stdout(predicate::str::contains("## a.txt, line 3"));
}

#[test]
fn missing_root_fails() {
    let temp = tempdir().unwrap();

    codis(&temp.path().join("absent"))
        .arg("search")
        .arg("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to index"));
}
