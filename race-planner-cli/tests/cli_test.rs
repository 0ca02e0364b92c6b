use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from any real config file in the home directory
fn race_planner(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("race-planner").unwrap();
    cmd.env("RACE_PLANNER_CONFIG", dir.path().join("config.toml"))
        .env_remove("RACE_PLANNER_SEED")
        .env_remove("RACE_PLANNER_UNIT")
        .env("NO_COLOR", "1");
    cmd
}

fn generate_args(cmd: &mut Command) -> &mut Command {
    cmd.args([
        "generate",
        "--start",
        "2024-01-01",
        "--race",
        "2024-02-26",
        "--pace",
        "9:00",
        "--distance",
        "half-marathon",
        "--peak",
        "40",
        "--seed",
        "11",
    ])
}

#[test]
fn test_help_command() {
    let dir = TempDir::new().unwrap();
    race_planner(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Periodized running plans"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("mileage"));
}

#[test]
fn test_version_command() {
    let dir = TempDir::new().unwrap();
    race_planner(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let dir = TempDir::new().unwrap();
    race_planner(&dir)
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("_race-planner"));
}

#[test]
fn test_generate_json_ends_with_race() {
    let dir = TempDir::new().unwrap();
    let mut cmd = race_planner(&dir);
    let output = generate_args(&mut cmd)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let events: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let events = events.as_array().unwrap();
    let race = events.last().unwrap();
    assert_eq!(race["event_workout"], "Race");
    assert_eq!(race["event_date"], "2024-02-26");
    assert_eq!(
        events.iter().filter(|e| e["event_workout"] == "Race").count(),
        1
    );
}

#[test]
fn test_generate_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let run = || {
        let mut cmd = race_planner(&dir);
        generate_args(&mut cmd)
            .args(["--format", "json"])
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_generate_table() {
    let dir = TempDir::new().unwrap();
    let mut cmd = race_planner(&dir);
    generate_args(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains("Half Marathon Training Plan"))
        .stdout(predicate::str::contains("Week 1 (base"))
        .stdout(predicate::str::contains("Half Marathon Race Day"));
}

#[test]
fn test_generate_rejects_out_of_range_weeks() {
    let dir = TempDir::new().unwrap();
    race_planner(&dir)
        .args([
            "generate",
            "--start",
            "2024-01-01",
            "--race",
            "2024-01-15",
            "--pace",
            "9:00",
            "--distance",
            "10k",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("4 to 20 weeks"));
}

#[test]
fn test_generate_rejects_bad_pace() {
    let dir = TempDir::new().unwrap();
    race_planner(&dir)
        .args([
            "generate",
            "--start",
            "2024-01-01",
            "--race",
            "2024-02-26",
            "--pace",
            "9:75",
            "--distance",
            "10k",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid pace"));
}

#[test]
fn test_mileage_command() {
    let dir = TempDir::new().unwrap();
    race_planner(&dir)
        .args(["mileage", "--weeks", "8", "--peak", "40", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"volume\": 22"))
        .stdout(predicate::str::contains("\"volume\": 10"));
}

#[test]
fn test_pace_command() {
    let dir = TempDir::new().unwrap();
    race_planner(&dir)
        .args(["pace", "--type", "speed", "--phase", "peak", "--pace", "8:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7:30 /mi"));
}

#[test]
fn test_workout_command() {
    let dir = TempDir::new().unwrap();
    race_planner(&dir)
        .args([
            "workout",
            "THRESHOLD_MILE_REPEATS",
            "--tier",
            "advanced",
            "--phase",
            "peak",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Distance: 12.5 mi"))
        .stdout(predicate::str::contains("5 × 2 mi @ threshold (rest 60s)"));
}

#[test]
fn test_workout_rejects_unknown_id() {
    let dir = TempDir::new().unwrap();
    race_planner(&dir)
        .args(["workout", "FARTLEK_MIX"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown workout id"));
}

#[test]
fn test_config_init_and_show() {
    let dir = TempDir::new().unwrap();
    race_planner(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));
    assert!(dir.path().join("config.toml").exists());

    race_planner(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    race_planner(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_distance_unit = \"mi\""));
}

#[test]
fn test_config_unit_applies_to_generate() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[plan]\ndefault_distance_unit = \"km\"\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();

    let mut cmd = race_planner(&dir);
    generate_args(&mut cmd)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"event_distance\": 21.1"));
}

#[test]
fn test_env_unit_overrides_config() {
    let dir = TempDir::new().unwrap();
    let mut cmd = race_planner(&dir);
    generate_args(&mut cmd)
        .env("RACE_PLANNER_UNIT", "km")
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"event_distance\": 21.1"));
}

#[test]
fn test_env_seed_overrides_config_seed() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[plan]\nseed = 5\n").unwrap();

    let base_args = [
        "generate",
        "--start",
        "2024-01-01",
        "--race",
        "2024-02-26",
        "--pace",
        "9:00",
        "--distance",
        "ultra",
        "--peak",
        "40",
        "--format",
        "json",
    ];

    let from_env = race_planner(&dir)
        .args(base_args)
        .env("RACE_PLANNER_SEED", "11")
        .output()
        .unwrap();
    let from_flag = race_planner(&dir)
        .args(base_args)
        .args(["--seed", "11"])
        .output()
        .unwrap();

    assert!(from_env.status.success());
    assert_eq!(from_env.stdout, from_flag.stdout);
}
