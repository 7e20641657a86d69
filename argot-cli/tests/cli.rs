use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn no_arguments_prints_help() {
    let mut cmd = cargo_bin_cmd!("argot");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("usage: argot"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("echo"));
}

#[test]
fn help_flag_wins_over_a_broken_line() {
    let mut cmd = cargo_bin_cmd!("argot");
    cmd.arg("serve").arg("--port").arg("nope").arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("usage: argot"));
}

#[test]
fn version_flag_prints_the_crate_version() {
    let mut cmd = cargo_bin_cmd!("argot");
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn echo_repeats_and_shouts() {
    let mut cmd = cargo_bin_cmd!("argot");
    cmd.arg("echo").arg("--repeat").arg("2").arg("--upper").arg("hi").arg("there");
    cmd.assert()
        .success()
        .stdout(predicate::eq("HI THERE\nHI THERE\n"));
}

#[test]
fn serve_uses_declared_defaults() {
    let mut cmd = cargo_bin_cmd!("argot");
    cmd.arg("serve");
    cmd.env_remove("ARGOT_PORT");
    cmd.assert()
        .success()
        .stdout(predicate::eq("serving on 127.0.0.1:3000\n"));
}

#[test]
fn serve_port_falls_back_to_the_environment() {
    let mut cmd = cargo_bin_cmd!("argot");
    cmd.arg("serve");
    cmd.env("ARGOT_PORT", "4444");
    cmd.assert()
        .success()
        .stdout(predicate::eq("serving on 127.0.0.1:4444\n"));
}

#[test]
fn command_line_port_beats_the_environment() {
    let mut cmd = cargo_bin_cmd!("argot");
    cmd.arg("serve").arg("--port").arg("8080");
    cmd.env("ARGOT_PORT", "4444");
    cmd.assert()
        .success()
        .stdout(predicate::eq("serving on 127.0.0.1:8080\n"));
}

#[test]
fn invalid_option_value_exits_nonzero_with_usage() {
    let mut cmd = cargo_bin_cmd!("argot");
    cmd.arg("serve").arg("--port").arg("loud");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--port"))
        .stderr(predicate::str::contains("usage: argot"));
}

#[test]
fn duplicate_option_is_rejected() {
    let mut cmd = cargo_bin_cmd!("argot");
    cmd.arg("serve").arg("--port").arg("1").arg("--port").arg("2");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("duplicate"));
}

#[test]
fn complete_offers_command_names_for_an_empty_line() {
    let mut cmd = cargo_bin_cmd!("argot");
    cmd.arg("complete");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"serve\""))
        .stdout(predicate::str::contains("\"echo\""));
}

#[test]
fn complete_offers_option_names_inside_a_command() {
    let mut cmd = cargo_bin_cmd!("argot");
    cmd.arg("complete").arg("serve").arg("--p");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"--port\""))
        .stdout(predicate::str::contains("\"kind\": \"literal\""));
}
