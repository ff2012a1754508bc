use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

const TEMPLATE: &str = r#"{#- @variable name: label="Name", required=true -#}
{#- @variable age: type=integer, default=18 -#}
{#- @variable tags: type=array -#}
{{ name }} is {{ age }}{% if tags is defined %} [{{ tags | join("|") }}]{% endif %}
"#;

fn write(dir: &Path, rel: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn templator(xdg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("templator"));
    cmd.env("XDG_CONFIG_HOME", xdg);
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn render_with_vars_and_defaults() {
    let tmp = tempdir().unwrap();
    let tpl = write(tmp.path(), "t.md", TEMPLATE);

    templator(tmp.path())
        .args(["render", "--batch", "--var", "name=Ana", "--var", "tags=a, b"])
        .arg(&tpl)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana is 18 [a|b]"));
}

#[test]
fn render_bad_integer_falls_back_to_zero() {
    let tmp = tempdir().unwrap();
    let tpl = write(tmp.path(), "t.md", TEMPLATE);

    templator(tmp.path())
        .args(["render", "--batch", "--var", "name=Bo", "--var", "age=old"])
        .arg(&tpl)
        .assert()
        .success()
        .stdout(predicate::str::contains("Bo is 0"));
}

#[test]
fn render_strict_flag_rejects_bad_integer() {
    let tmp = tempdir().unwrap();
    let tpl = write(tmp.path(), "t.md", TEMPLATE);

    templator(tmp.path())
        .args(["render", "--batch", "--strict", "--var", "name=Bo", "--var", "age=old"])
        .arg(&tpl)
        .assert()
        .failure()
        .stdout(predicate::str::contains("invalid integer for 'age': old"));
}

#[test]
fn render_strict_mode_from_config() {
    let tmp = tempdir().unwrap();
    let tpl = write(tmp.path(), "t.md", TEMPLATE);
    write(tmp.path(), "templator/config.toml", "version = 1\n[coercion]\nmode = \"strict\"\n");

    templator(tmp.path())
        .args(["render", "--batch", "--var", "name=Bo", "--var", "age=old"])
        .arg(&tpl)
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL templator render"));
}

#[test]
fn render_batch_missing_required_fails() {
    let tmp = tempdir().unwrap();
    let tpl = write(tmp.path(), "t.md", TEMPLATE);

    templator(tmp.path())
        .args(["render", "--batch"])
        .arg(&tpl)
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing required variable: name"));
}

#[test]
fn render_json_inputs_file_and_json_output() {
    let tmp = tempdir().unwrap();
    let tpl = write(tmp.path(), "t.md", TEMPLATE);
    let inputs = write(
        tmp.path(),
        "inputs.json",
        r#"{"name": "Cy", "age": 41, "tags": ["x", "y"]}"#,
    );

    let assert = templator(tmp.path())
        .args(["render", "--batch", "--json", "--inputs"])
        .arg(&inputs)
        .arg(&tpl)
        .assert()
        .success();
    let json: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(json["result"], "Cy is 41 [x|y]");
    assert_eq!(json["inputs"]["age"], 41);
    assert_eq!(json["inputs"]["tags"], serde_json::json!(["x", "y"]));
}

#[test]
fn render_var_overrides_inputs_file() {
    let tmp = tempdir().unwrap();
    let tpl = write(tmp.path(), "t.md", TEMPLATE);
    let inputs = write(tmp.path(), "inputs.json", r#"{"name": "Cy"}"#);

    templator(tmp.path())
        .args(["render", "--batch", "--var", "name=Di", "--inputs"])
        .arg(&inputs)
        .arg(&tpl)
        .assert()
        .success()
        .stdout(predicate::str::contains("Di is 18"));
}

#[test]
fn render_writes_output_file() {
    let tmp = tempdir().unwrap();
    let tpl = write(tmp.path(), "t.md", TEMPLATE);
    let out_path = tmp.path().join("out.txt");

    templator(tmp.path())
        .args(["render", "--batch", "--var", "name=Ed", "--output"])
        .arg(&out_path)
        .arg(&tpl)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK   templator render"));

    assert_eq!(fs::read_to_string(&out_path).unwrap(), "Ed is 18");
}

#[test]
fn render_undeclared_variable_fails() {
    let tmp = tempdir().unwrap();
    let tpl = write(tmp.path(), "t.md", "{#- @variable a: type=string -#}{{ a }} {{ b }}");

    templator(tmp.path())
        .args(["render", "--batch", "--var", "a=1", "--var", "b=2"])
        .arg(&tpl)
        .assert()
        .failure()
        .stdout(predicate::str::contains("rendering error"));
}
