use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

struct Env {
    inventory: TempDir,
    config: TempDir,
}

impl Env {
    fn new(contents: &str) -> Self {
        let env = Env {
            inventory: tempfile::tempdir().unwrap(),
            config: tempfile::tempdir().unwrap(),
        };
        fs::write(env.inventory.path().join("inv.txt"), contents).unwrap();
        env
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("invtxt").unwrap();
        cmd.env("INVTXT_DIR", self.inventory.path())
            .env("INVTXT_CONFIG_DIR", self.config.path())
            .env_remove("INVTXT_LOG")
            .arg("--plain");
        cmd
    }

    fn text(&self) -> String {
        fs::read_to_string(self.inventory.path().join("inv.txt")).unwrap()
    }
}

#[test]
fn missing_inventory_directory_is_fatal() {
    let config = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("invtxt").unwrap();
    cmd.env("INVTXT_DIR", config.path().join("missing"))
        .env("INVTXT_CONFIG_DIR", config.path())
        .arg("ls")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn first_run_writes_config_and_layout() {
    let env = Env::new("");
    env.cmd().arg("ls").assert().success();
    assert!(env.config.path().join("config.json").is_file());
    assert!(env.inventory.path().join("pics").is_dir());
}

#[test]
fn ls_filters_and_counts() {
    let env = Env::new("(2) *kettle electric kettle -> @kitchen\nbroom -> @closet\nmop");
    env.cmd()
        .args(["ls", "KETTLE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 (2) *kettle electric kettle -> @kitchen"))
        .stdout(predicate::str::contains("1 of 3 items shown"))
        .stdout(predicate::str::contains("broom").not());
}

#[test]
fn add_then_deficit() {
    let env = Env::new("(3) *saw hand saw");
    env.cmd()
        .args(["add", "(1/4)   *bulb light bulb -> #e27 @closet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Item added (2)"));
    assert_eq!(
        env.text(),
        "(3) *saw hand saw\n(1/4) *bulb light bulb -> @closet #e27"
    );

    env.cmd()
        .arg("lsdeficit")
        .assert()
        .success()
        .stdout(predicate::str::contains("*bulb"))
        .stdout(predicate::str::contains("*saw").not());
}

#[test]
fn duplicate_alias_is_rejected_and_file_untouched() {
    let original = "(3) *saw hand saw";
    let env = Env::new(original);
    env.cmd()
        .args(["add", "*saw another saw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    assert_eq!(env.text(), original);
}

#[test]
fn relative_amount_edit() {
    let env = Env::new("(3) *saw hand saw");
    env.cmd().args(["num", "saw", "-5"]).assert().success();
    assert_eq!(env.text(), "(0) *saw hand saw");
    env.cmd().args(["num", "1", "+2"]).assert().success();
    assert_eq!(env.text(), "(2) *saw hand saw");
    env.cmd()
        .args(["num", "saw", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid number"));
}

#[test]
fn field_edits_and_unset() {
    let env = Env::new("(3) *saw hand saw");
    env.cmd().args(["als", "saw", "ryoba"]).assert().success();
    env.cmd().args(["text", "ryoba", "pull saw"]).assert().success();
    env.cmd().args(["meta", "1", "@shed #sharp"]).assert().success();
    env.cmd().args(["req", "ryoba", "1"]).assert().success();
    assert_eq!(env.text(), "(3/1) *ryoba pull saw -> @shed #sharp");

    env.cmd().args(["meta", "ryoba", "unset"]).assert().success();
    assert_eq!(env.text(), "(3/1) *ryoba pull saw");
}

#[test]
fn rm_echoes_removed_line() {
    let env = Env::new("(3) *saw hand saw\nbroom");
    env.cmd()
        .args(["rm", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(3) *saw hand saw"));
    assert_eq!(env.text(), "broom");
}

#[test]
fn unknown_item_fails() {
    let env = Env::new("broom");
    env.cmd()
        .args(["rm", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Item not found"));
    assert_eq!(env.text(), "broom");
}

#[test]
fn names_and_refs() {
    let env = Env::new("*drill drill -> @tools #power *bits\n*bits drill bits -> @tools #steel");
    env.cmd()
        .arg("lstag")
        .assert()
        .success()
        .stdout("#power #steel\n");
    env.cmd()
        .arg("cats")
        .assert()
        .success()
        .stdout("@tools\n");
    env.cmd()
        .args(["refs", "drill"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 *bits drill bits"));
}

#[test]
fn read_only_commands_keep_hand_formatting() {
    let hand_written = "  broom   ->   @closet";
    let env = Env::new(hand_written);
    env.cmd().arg("ls").assert().success();
    assert_eq!(env.text(), hand_written);
}

#[test]
fn pics_clean_without_orphans() {
    let env = Env::new("broom");
    env.cmd()
        .args(["pics", "clean"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No orphaned pictures found"));
}

#[test]
fn config_prints_effective_settings() {
    let env = Env::new("");
    env.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"viewer\": \"gpicview\""));
}
