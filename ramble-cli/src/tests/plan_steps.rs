//! Behaviour-driven step definitions driving the plan CLI scenarios.

use super::helpers::{END, START, SnapshotDir};
use super::*;
use camino::Utf8PathBuf;
use ramble_core::SolveError;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

const UNKNOWN_START: &str = "Atlantis";

#[derive(Debug)]
struct Flags {
    start: String,
    include_budget: bool,
    text: bool,
}

struct PlanWorld {
    dir: SnapshotDir,
    snapshot: RefCell<Option<Utf8PathBuf>>,
    flags: RefCell<Flags>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl PlanWorld {
    fn new() -> Self {
        Self {
            dir: SnapshotDir::new(),
            snapshot: RefCell::new(None),
            flags: RefCell::new(Flags {
                start: START.to_owned(),
                include_budget: true,
                text: false,
            }),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let flags = self.flags.borrow();
        let snapshot = self
            .snapshot
            .borrow()
            .clone()
            .expect("snapshot written before running");
        let mut argv = vec![
            "ramble".to_owned(),
            "plan".to_owned(),
            snapshot.into_string(),
            format!("--{ARG_START}"),
            flags.start.clone(),
            format!("--{ARG_END}"),
            END.to_owned(),
        ];
        if flags.include_budget {
            argv.extend([format!("--{ARG_BUDGET}"), "120".to_owned()]);
        }
        if flags.text {
            argv.extend(["--format".to_owned(), "text".to_owned()]);
        }
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }
}

#[fixture]
fn world() -> PlanWorld {
    PlanWorld::new()
}

#[given("a canal snapshot exists on disk")]
fn canal_snapshot_exists(#[from(world)] world: &PlanWorld) {
    world.snapshot.replace(Some(world.dir.write_canal()));
}

#[given("the snapshot contains invalid JSON")]
fn snapshot_contains_invalid_json(#[from(world)] world: &PlanWorld) {
    let path = world.dir.write_raw("canal.json", b"{ \"nodes\": [");
    world.snapshot.replace(Some(path));
}

#[given("I request text output")]
fn request_text_output(#[from(world)] world: &PlanWorld) {
    world.flags.borrow_mut().text = true;
}

#[given("I omit the time budget")]
fn omit_time_budget(#[from(world)] world: &PlanWorld) {
    world.flags.borrow_mut().include_budget = false;
}

#[given("I start from an attraction that is not in the snapshot")]
fn start_from_unknown_attraction(#[from(world)] world: &PlanWorld) {
    world.flags.borrow_mut().start = UNKNOWN_START.to_owned();
}

#[when("I run the plan command along the canal")]
fn run_plan_command(#[from(world)] world: &PlanWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Plan(args) => {
            let mut buffer = world.stdout.borrow_mut();
            plan::run_plan_with(args, &mut *buffer)
        }
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds and prints a JSON plan ending at the harbour")]
fn command_prints_json_plan(#[from(world)] world: &PlanWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let stdout = world.stdout.borrow();
    let value: serde_json::Value = serde_json::from_slice(&stdout).expect("output should be JSON");
    let stops = value["plan"]["stops"].as_array().expect("stops array");
    assert!(stops.len() >= 2);
    assert_eq!(stops.last().and_then(|stop| stop["name"].as_str()), Some(END));
}

#[then("the command succeeds and prints a text report")]
fn command_prints_text_report(#[from(world)] world: &PlanWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    result.as_ref().expect("expected success");

    let stdout = String::from_utf8(world.stdout.borrow().clone()).expect("stdout utf-8");
    assert!(stdout.contains(&format!("Tour from {START} to {END}")));
    assert!(stdout.contains("Leg 1:"));
    assert!(stdout.contains("Total distance:"));
}

#[then("the command fails because the budget is missing")]
fn command_fails_missing_budget(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_BUDGET),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because the start is not a known attraction")]
fn command_fails_unknown_start(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::Solve {
            source: SolveError::AttractionNotFound { name },
        } => assert_eq!(name, UNKNOWN_START),
        other => panic!("expected AttractionNotFound, found {other:?}"),
    }
}

#[then("the command fails because the snapshot JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &PlanWorld) {
    match &*world.error() {
        CliError::ParseSnapshot { .. } => {}
        other => panic!("expected ParseSnapshot, found {other:?}"),
    }
}

macro_rules! register_plan_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/plan_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: PlanWorld) {
            let _ = world;
        }
    };
}

register_plan_scenario!(plan_as_json, "planning a tour as JSON");
register_plan_scenario!(plan_as_text, "rendering a text report");
register_plan_scenario!(plan_missing_budget, "rejecting a missing budget");
register_plan_scenario!(plan_unknown_attraction, "rejecting an unknown attraction");
register_plan_scenario!(plan_invalid_snapshot, "rejecting an invalid snapshot");
