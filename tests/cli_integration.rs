// CLI integration tests: scan build files and print resolved plugin configs.
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_protoplug");
    let mut command = Command::new(exe);
    command.env("RUST_LOG", "protoplug=warn");
    command
}

fn run(args: &[&str]) -> Output {
    cmd().args(args).output().expect("run protoplug")
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path.to_str().expect("utf8 path").to_string()
}

const ROOT_BUILD: &str = r#"
load("@rules_proto//proto:defs.bzl", "proto_library")

# gazelle:proto_plugin go label @build_stack_rules_proto//plugin/golang/protobuf:protoc-gen-go
# gazelle:proto_plugin go option paths=source_relative
# gazelle:proto_plugin go option Mfoo.proto=example.com/foo
# gazelle:proto_plugin doc enabled false
"#;

#[test]
fn prints_sorted_text_reports() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build = write(temp.path(), "BUILD.bazel", ROOT_BUILD);

    let output = run(&[build.as_str()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "plugin doc [disabled]",
            "plugin go [enabled] label=@build_stack_rules_proto//plugin/golang/protobuf:protoc-gen-go options=Mfoo.proto=example.com/foo,paths=source_relative",
        ]
    );
}

#[test]
fn later_files_override_earlier_ones() {
    let temp = tempfile::tempdir().expect("tempdir");
    let first = write(temp.path(), "first.bazel", ROOT_BUILD);
    let second = write(
        temp.path(),
        "second.bazel",
        "# gazelle:proto_plugin go -option paths=source_relative\n# gazelle:proto_plugin doc enable true\n",
    );

    let output = run(&["--format", "toml", first.as_str(), second.as_str()]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    let document: toml::Table = toml::from_str(&stdout).expect("toml output");
    let plugins = document["plugin"].as_array().expect("plugin array");
    assert_eq!(plugins.len(), 2);
    assert_eq!(plugins[0]["name"].as_str(), Some("doc"));
    assert_eq!(plugins[0]["enabled"].as_bool(), Some(true));
    assert_eq!(plugins[1]["name"].as_str(), Some("go"));
    let options: Vec<&str> = plugins[1]["options"]
        .as_array()
        .expect("options")
        .iter()
        .filter_map(|value| value.as_str())
        .collect();
    assert_eq!(options, vec!["Mfoo.proto=example.com/foo"]);
}

#[test]
fn bad_directives_are_skipped_by_default() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build = write(
        temp.path(),
        "BUILD",
        "# gazelle:proto_plugin go bogus x\n# gazelle:proto_plugin go option keep\n# gazelle:proto_plugin ts enabled maybe\n",
    );

    let output = run(&[build.as_str()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(stdout.trim(), "plugin go [enabled] options=keep");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown parameter"), "{stderr}");
}

#[test]
fn strict_mode_fails_on_first_bad_directive() {
    let temp = tempfile::tempdir().expect("tempdir");
    let build = write(
        temp.path(),
        "BUILD",
        "# gazelle:proto_plugin go option keep\n# gazelle:proto_plugin go label //bad pkg:x\n",
    );

    let output = run(&["--strict", build.as_str()]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("BUILD:2"), "{stderr}");
}

#[test]
fn config_file_changes_directive_keyword() {
    let temp = tempfile::tempdir().expect("tempdir");
    let config = write(
        temp.path(),
        "protoplug.toml",
        "[directive]\nkeyword = \"protoc_plugin\"\n",
    );
    let build = write(
        temp.path(),
        "BUILD",
        "# gazelle:proto_plugin ignored option x\n# gazelle:protoc_plugin seen option y\n",
    );

    let output = run(&["--config", config.as_str(), build.as_str()]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(stdout.trim(), "plugin seen [enabled] options=y");
}

#[test]
fn missing_file_is_an_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let missing = temp.path().join("nope.bazel");

    let output = run(&[missing.to_str().expect("utf8 path")]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.bazel"));
}
