//! Integration tests for the holdplanner binary.
//!
//! Spawns the binary with command-line arguments and checks stdout, stderr
//! and the exit status.

use std::process::{Command, Output};

/// Runs the binary with `args` and returns its output.
fn run_planner(args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_holdplanner");
    Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to start holdplanner")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn plans_given_hand() {
    let output = run_planner(&["--hand", "6,6,6,6,6"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines[0], "You rolled: (6, 6, 6, 6, 6)");
    assert_eq!(
        lines[1],
        "Best strategy for hand (6, 6, 6, 6, 6) is to hold (6, 6, 6, 6, 6) with expected score 30.0000"
    );
}

#[test]
fn single_die_rerolls_everything() {
    let output = run_planner(&["--hand", "1"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(
        lines[1],
        "Best strategy for hand (1) is to hold () with expected score 3.5000"
    );
}

#[test]
fn rolls_requested_rounds() {
    let output = run_planner(&["--rounds", "3", "--seed", "7"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("You rolled: ")).count(),
        3
    );
}

#[test]
fn seeded_runs_are_reproducible() {
    let a = run_planner(&["--rounds", "2", "--seed", "99"]);
    let b = run_planner(&["--rounds", "2", "--seed", "99", "--threads", "2"]);
    assert!(a.status.success() && b.status.success());
    assert_eq!(stdout_lines(&a), stdout_lines(&b));
}

#[test]
fn top_lists_ranked_holds() {
    let output = run_planner(&["--hand", "1,1,1,5,6", "--top", "3"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 5);
    assert!(lines[2].starts_with("  1. hold "));
    assert!(lines[4].starts_with("  3. hold "));
}

#[test]
fn json_output() {
    let output = run_planner(&["--hand", "6,6,6,6,6", "--json"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["hand"], serde_json::json!([6, 6, 6, 6, 6]));
    assert_eq!(value["hold"], serde_json::json!([6, 6, 6, 6, 6]));
    assert_eq!(value["expected_score"], serde_json::json!(30.0));
    assert!(value.get("ranked").is_none());
}

#[test]
fn json_output_with_ranking() {
    let output = run_planner(&["--hand", "2,3", "--json", "--top", "2"]);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    let ranked = value["ranked"].as_array().unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["hold"], value["hold"]);
}

#[test]
fn rejects_out_of_range_face() {
    let output = run_planner(&["--hand", "1,7", "--sides", "6"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("face 7 is outside 1..=6"), "stderr: {}", stderr);
}

#[test]
fn rejects_malformed_hand() {
    let output = run_planner(&["--hand", "1,two"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid face value: 'two'"), "stderr: {}", stderr);
}

#[test]
fn rejects_zero_sides() {
    let output = run_planner(&["--sides", "0"]);
    assert!(!output.status.success());
}

#[test]
fn rejects_hand_with_too_many_holds() {
    let output = run_planner(&["--sides", "2", "--dice", "14"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("enumerating holds of 14 dice"),
        "stderr: {}",
        stderr
    );
}
