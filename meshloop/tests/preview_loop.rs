//! Loop-level tests driving `run_loop` with scripted builders and runners.
//!
//! These cover the full feedback cycle: settings discovered in one run show
//! up in the next command, and the loop stops the way the caller expects.

use meshloop::core::settings::Settings;
use meshloop::io::builder::BuildFailed;
use meshloop::looping::{LoopConfig, LoopStop, run_loop};
use meshloop::test_support::{ScriptedBuilder, ScriptedRun, ScriptedRunner};

fn kerava() -> LoopConfig {
    LoopConfig {
        target_command: vec!["./kerava".to_string()],
        max_iterations: None,
    }
}

/// Mesh + seed override, first run reports camera and ticks, second run's
/// binary is gone. The second command must carry everything discovered.
#[test]
fn discovered_settings_feed_next_command_until_launch_fails() {
    let builder = ScriptedBuilder::always_ok();
    let runner = ScriptedRunner::new(vec![
        ScriptedRun::output("loading scene\ncamera: --camera=1,2,3\nframe --ticks=100\n"),
        ScriptedRun::LaunchFailed,
    ]);

    let outcome = run_loop(
        &builder,
        &runner,
        &kerava(),
        Settings::new(Some("scene.obj".to_string()), Some(42), Vec::new()),
        |_| {},
    )
    .expect("loop");

    assert_eq!(outcome.stop, LoopStop::LaunchFailed);
    assert_eq!(outcome.iterations, 2);

    let commands = runner.commands();
    assert_eq!(commands[0].args, vec!["-m", "scene.obj", "--seed=42"]);
    assert_eq!(
        commands[1].args,
        vec![
            "-m",
            "scene.obj",
            "--camera=1,2,3",
            "--seed=42",
            "--ticks=100"
        ]
    );
}

#[test]
fn discovery_mode_persists_and_pass_through_is_verbatim() {
    let builder = ScriptedBuilder::always_ok();
    let runner = ScriptedRunner::new(vec![
        ScriptedRun::output("--CAMERA=0,0,5\n"),
        ScriptedRun::output("--ticks=12abc\n"),
    ]);
    let pass_through = vec!["--resolution".to_string(), "640x480".to_string()];

    let outcome = run_loop(
        &builder,
        &runner,
        &kerava(),
        Settings::new(None, None, pass_through),
        |_| {},
    )
    .expect("loop");

    assert_eq!(outcome.stop, LoopStop::NothingDiscovered);
    let commands = runner.commands();
    assert_eq!(commands[0].args, vec!["-d", "--resolution", "640x480"]);
    assert_eq!(
        commands[1].args,
        vec!["-d", "--resolution", "640x480", "--CAMERA=0,0,5"]
    );
}

#[test]
fn camera_and_ticks_refresh_while_seed_sticks() {
    let builder = ScriptedBuilder::always_ok();
    let runner = ScriptedRunner::new(vec![
        ScriptedRun::output("--seed=7\n--camera=a\n--ticks=1\n"),
        ScriptedRun::output("--camera=b\n"),
        ScriptedRun::output("--ticks=2\n--seed=1\n--seed=8\n"),
        ScriptedRun::output("bye\n"),
    ]);

    let outcome = run_loop(
        &builder,
        &runner,
        &kerava(),
        Settings::new(None, Some(3), Vec::new()),
        |_| {},
    )
    .expect("loop");

    assert_eq!(outcome.iterations, 4);
    let commands = runner.commands();
    assert_eq!(commands[0].args, vec!["-d", "--seed=3"]);
    assert_eq!(commands[1].args, vec!["-d", "--camera=a", "--seed=7", "--ticks=1"]);
    assert_eq!(commands[2].args, vec!["-d", "--camera=b", "--seed=7"]);
    assert_eq!(commands[3].args, vec!["-d", "--seed=8", "--ticks=2"]);
    assert_eq!(outcome.settings.seed.as_deref(), Some("--seed=8"));
}

#[test]
fn first_build_failure_runs_nothing() {
    let builder = ScriptedBuilder::new(vec![false]);
    let runner = ScriptedRunner::new(vec![ScriptedRun::output("--camera=x\n")]);

    let err = run_loop(
        &builder,
        &runner,
        &kerava(),
        Settings::new(None, None, Vec::new()),
        |_| {},
    )
    .expect_err("build failure");

    assert!(err.downcast_ref::<BuildFailed>().is_some());
    assert!(runner.commands().is_empty());
}
