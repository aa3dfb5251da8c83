//! Lifecycle and filtering behavior tests.
//!
//! A counter-instrumented dummy step records how often each lifecycle phase
//! ran, so the tests can assert exactly which phases a selection or a
//! failure reaches.

use cairn::config::{Config, ConfigRegistrar};
use cairn::context::Context;
use cairn::error::{CairnError, Result};
use cairn::runner::Runner;
use cairn::steps::{BuildStep, FilteringPipeline};
use cairn::tags::{tag_set, TagSet};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default, Clone, Copy)]
struct Probe {
    configure: u32,
    pre_run: u32,
    run: u32,
    cleanup: u32,
    informed_about_failure: bool,
}

type SharedProbe = Arc<Mutex<Probe>>;

struct DummyStep {
    tags: TagSet,
    probe: SharedProbe,
    fail_in_configure: bool,
    fail_in_pre_run: bool,
    fail_in_run: bool,
    fail_in_cleanup: bool,
}

impl DummyStep {
    fn new(tags: TagSet) -> (Self, SharedProbe) {
        let probe = SharedProbe::default();
        let step = Self {
            tags,
            probe: Arc::clone(&probe),
            fail_in_configure: false,
            fail_in_pre_run: false,
            fail_in_run: false,
            fail_in_cleanup: false,
        };
        (step, probe)
    }

    fn fail_in_configure(mut self) -> Self {
        self.fail_in_configure = true;
        self
    }

    fn fail_in_pre_run(mut self) -> Self {
        self.fail_in_pre_run = true;
        self
    }

    fn fail_in_run(mut self) -> Self {
        self.fail_in_run = true;
        self
    }

    fn fail_in_cleanup(mut self) -> Self {
        self.fail_in_cleanup = true;
        self
    }
}

impl BuildStep for DummyStep {
    fn provided_tags(&self) -> TagSet {
        self.tags.clone()
    }

    fn configure(&mut self, _registrar: &mut ConfigRegistrar) -> Result<()> {
        self.probe.lock().unwrap().configure += 1;
        if self.fail_in_configure {
            return Err(CairnError::validation(
                self.name(),
                "configuration failure was requested",
            ));
        }
        Ok(())
    }

    fn pre_run(&mut self, _config: &Config) -> Result<()> {
        self.probe.lock().unwrap().pre_run += 1;
        if self.fail_in_pre_run {
            return Err(std::io::Error::other("pre-run failure was requested").into());
        }
        Ok(())
    }

    fn run(&mut self, _config: &Config, context: &mut Context) -> Result<()> {
        self.probe.lock().unwrap().run += 1;
        context.insert("test", 0);
        if self.fail_in_run {
            return Err(std::io::Error::other("run failure was requested").into());
        }
        Ok(())
    }

    fn cleanup(&mut self, _config: &Config, context: &mut Context, run_failed: bool) -> Result<()> {
        {
            let mut probe = self.probe.lock().unwrap();
            probe.cleanup += 1;
            probe.informed_about_failure = run_failed;
        }
        let count = context.get_i64("test").unwrap_or(0);
        context.insert("test", count + 1);
        if self.fail_in_cleanup {
            return Err(std::io::Error::other("cleanup failure was requested").into());
        }
        Ok(())
    }
}

#[track_caller]
fn assert_counters(probe: &SharedProbe, expected: (u32, u32, u32, u32), label: &str) {
    let p = *probe.lock().unwrap();
    assert_eq!(
        (p.configure, p.pre_run, p.run, p.cleanup),
        expected,
        "unexpected (configure, pre_run, run, cleanup) counters for {label}",
    );
}

fn informed_about_failure(probe: &SharedProbe) -> bool {
    probe.lock().unwrap().informed_about_failure
}

fn parse_with(registrar: ConfigRegistrar, requested: &[&str], skipped: &[&str]) -> Config {
    let mut args: Vec<String> = vec!["cairn-test".to_string()];
    if !requested.is_empty() {
        args.push("--steps".to_string());
        args.extend(requested.iter().map(ToString::to_string));
    }
    if !skipped.is_empty() {
        args.push("--skip-steps".to_string());
        args.extend(skipped.iter().map(ToString::to_string));
    }
    registrar.parse_from(args).unwrap()
}

fn parse_config(requested: &[&str], skipped: &[&str]) -> Config {
    parse_with(
        ConfigRegistrar::new("cairn-test", "test session"),
        requested,
        skipped,
    )
}

/// Pipeline of two steps: the first provides {dummy1, dummy2}, the second
/// {dummy3}.
fn two_step_pipeline(fail_in_pre_run: bool) -> (FilteringPipeline, SharedProbe, SharedProbe) {
    let (mut step1, probe1) = DummyStep::new(tag_set(["dummy1", "dummy2"]));
    let (mut step2, probe2) = DummyStep::new(tag_set(["dummy3"]));
    if fail_in_pre_run {
        step1 = step1.fail_in_pre_run();
        step2 = step2.fail_in_pre_run();
    }
    let pipeline = FilteringPipeline::new(
        vec![Box::new(step1), Box::new(step2)],
        "two-step pipeline",
    );
    (pipeline, probe1, probe2)
}

#[test]
fn step_name_defaults_to_type_name() {
    let (step, _probe) = DummyStep::new(tag_set(["all"]));
    assert_eq!(step.name(), "DummyStep");
}

#[test]
fn pipeline_combines_provided_tags() {
    let (pipeline, _p1, _p2) = two_step_pipeline(false);
    assert_eq!(
        pipeline.provided_tags(),
        tag_set(["dummy1", "dummy2", "dummy3"])
    );
}

#[test]
fn pipeline_filters_steps_by_selection() {
    // (requested, skipped, step1 counters, step2 counters)
    let cases: &[(&[&str], &[&str], (u32, u32, u32, u32), (u32, u32, u32, u32))] = &[
        // the wildcard runs every step
        (&["all"], &[], (1, 1, 1, 1), (1, 1, 1, 1)),
        // requesting dummy1 runs only step1, but configure still runs for both
        (&["dummy1"], &[], (1, 1, 1, 1), (1, 0, 0, 0)),
        // requesting dummy3 runs only step2
        (&["dummy3"], &[], (1, 0, 0, 0), (1, 1, 1, 1)),
        // skipping dummy1 excludes step1 even though the wildcard matches it
        (&["all"], &["dummy1"], (1, 0, 0, 0), (1, 1, 1, 1)),
        // skipping dummy3 excludes step2
        (&["all"], &["dummy3"], (1, 1, 1, 1), (1, 0, 0, 0)),
    ];

    for (requested, skipped, expected1, expected2) in cases {
        let (mut pipeline, probe1, probe2) = two_step_pipeline(false);
        let mut registrar = ConfigRegistrar::new("cairn-test", "test session");
        pipeline.configure(&mut registrar).unwrap();
        let config = parse_with(registrar, requested, skipped);

        let mut context = Context::new();
        pipeline.pre_run(&config).unwrap();
        pipeline.run(&config, &mut context).unwrap();
        pipeline.cleanup(&config, &mut context, false).unwrap();

        let label = format!("requested={requested:?} skipped={skipped:?}");
        assert_counters(&probe1, *expected1, &format!("step1 ({label})"));
        assert_counters(&probe2, *expected2, &format!("step2 ({label})"));
    }
}

#[test]
fn pipeline_pre_run_failure_stops_iteration() {
    let (mut pipeline, probe1, probe2) = two_step_pipeline(true);
    let mut registrar = ConfigRegistrar::new("cairn-test", "test session");
    pipeline.configure(&mut registrar).unwrap();
    let config = parse_with(registrar, &[], &[]);

    assert!(pipeline.pre_run(&config).is_err());

    // step1 fails in pre-run, so step2 never even gets a pre-run call
    assert_counters(&probe1, (1, 1, 0, 0), "step1");
    assert_counters(&probe2, (1, 0, 0, 0), "step2");
}

#[test]
fn pipeline_configure_failure_aborts_configuration() {
    let (step1, probe1) = DummyStep::new(tag_set(["dummy1"]));
    let (step2, probe2) = DummyStep::new(tag_set(["dummy2"]));
    let step1 = step1.fail_in_configure();
    let mut pipeline = FilteringPipeline::new(
        vec![Box::new(step1), Box::new(step2)],
        "failing pipeline",
    );

    let mut registrar = ConfigRegistrar::new("cairn-test", "test session");
    let err = pipeline.configure(&mut registrar).unwrap_err();

    assert!(err.is_validation());
    assert!(err.to_string().contains("DummyStep"));
    assert_counters(&probe1, (1, 0, 0, 0), "step1");
    assert_counters(&probe2, (0, 0, 0, 0), "step2");
}

#[test]
fn nested_pipelines_compose() {
    let (inner_step, inner_probe) = DummyStep::new(tag_set(["inner"]));
    let inner = FilteringPipeline::new(vec![Box::new(inner_step)], "inner pipeline");
    let (outer_step, outer_probe) = DummyStep::new(tag_set(["outer"]));
    let mut outer = FilteringPipeline::new(
        vec![Box::new(inner), Box::new(outer_step)],
        "outer pipeline",
    );

    assert_eq!(outer.provided_tags(), tag_set(["inner", "outer"]));

    let mut registrar = ConfigRegistrar::new("cairn-test", "test session");
    outer.configure(&mut registrar).unwrap();
    let config = parse_with(registrar, &[], &[]);
    let mut context = Context::new();
    outer.pre_run(&config).unwrap();
    outer.run(&config, &mut context).unwrap();
    outer.cleanup(&config, &mut context, false).unwrap();

    assert_counters(&inner_probe, (1, 1, 1, 1), "inner step");
    assert_counters(&outer_probe, (1, 1, 1, 1), "outer step");
}

#[test]
fn runner_drives_a_single_step() {
    let (step, probe) = DummyStep::new(tag_set(["all"]));
    let config = parse_config(&[], &[]);
    let mut runner = Runner::new(config, vec![Box::new(step)]);

    assert_eq!(runner.run(), 0);

    // the runner never calls configure; that happens before parsing
    assert_counters(&probe, (0, 1, 1, 1), "step");
    assert!(!informed_about_failure(&probe));
    assert_eq!(runner.context().get_i64("test"), Some(1));
}

#[test]
fn runner_exits_nonzero_on_failed_pre_run() {
    let (step, probe) = DummyStep::new(tag_set(["all"]));
    let step = step.fail_in_pre_run();
    let config = parse_config(&[], &[]);
    let mut runner = Runner::new(config, vec![Box::new(step)]);

    assert_eq!(runner.run(), 1);

    // no cleanup phase: pre-run is pure validation
    assert_counters(&probe, (0, 1, 0, 0), "step");
}

#[test]
fn runner_pre_run_failure_stops_later_steps() {
    let (step1, probe1) = DummyStep::new(tag_set(["all"]));
    let step1 = step1.fail_in_pre_run();
    let (step2, probe2) = DummyStep::new(tag_set(["all"]));
    let config = parse_config(&[], &[]);
    let mut runner = Runner::new(config, vec![Box::new(step1), Box::new(step2)]);

    assert_eq!(runner.run(), 1);

    assert_counters(&probe1, (0, 1, 0, 0), "step1");
    assert_counters(&probe2, (0, 0, 0, 0), "step2");
}

#[test]
fn runner_breaks_run_but_cleans_every_step() {
    let (step1, probe1) = DummyStep::new(tag_set(["all"]));
    let step1 = step1.fail_in_run().fail_in_cleanup();
    let (step2, probe2) = DummyStep::new(tag_set(["all"]));
    let config = parse_config(&[], &[]);
    let mut runner = Runner::new(config, vec![Box::new(step1), Box::new(step2)]);

    assert_eq!(runner.run(), 1);

    // step1's run failed, so step2 is never run, but cleanup reaches both
    // steps even though step1's own cleanup also fails
    assert_counters(&probe1, (0, 1, 1, 1), "step1");
    assert_counters(&probe2, (0, 1, 0, 1), "step2");
    assert!(informed_about_failure(&probe1));
    assert!(informed_about_failure(&probe2));
}

#[test]
fn cleanup_failure_alone_forces_failure_exit() {
    let (step1, probe1) = DummyStep::new(tag_set(["all"]));
    let step1 = step1.fail_in_cleanup();
    let (step2, probe2) = DummyStep::new(tag_set(["all"]));
    let config = parse_config(&[], &[]);
    let mut runner = Runner::new(config, vec![Box::new(step1), Box::new(step2)]);

    assert_eq!(runner.run(), 1);

    // the failing cleanup does not stop its sibling's cleanup, and no run
    // failed, so cleanup was informed of a clean run
    assert_counters(&probe1, (0, 1, 1, 1), "step1");
    assert_counters(&probe2, (0, 1, 1, 1), "step2");
    assert!(!informed_about_failure(&probe1));
    assert!(!informed_about_failure(&probe2));
}

#[test]
fn pipeline_cleans_only_run_attempted_children() {
    let (step_a, probe_a) = DummyStep::new(tag_set(["all"]));
    let (step_b, probe_b) = DummyStep::new(tag_set(["all"]));
    let step_b = step_b.fail_in_run();
    let (step_c, probe_c) = DummyStep::new(tag_set(["all"]));
    let mut pipeline = FilteringPipeline::new(
        vec![Box::new(step_a), Box::new(step_b), Box::new(step_c)],
        "partial pipeline",
    );

    let mut registrar = ConfigRegistrar::new("cairn-test", "test session");
    pipeline.configure(&mut registrar).unwrap();
    let config = parse_with(registrar, &[], &[]);
    let mut runner = Runner::new(config, vec![Box::new(pipeline)]);

    assert_eq!(runner.run(), 1);

    // a and b were attempted and get cleanup; c's run was never attempted
    assert_counters(&probe_a, (1, 1, 1, 1), "step a");
    assert_counters(&probe_b, (1, 1, 1, 1), "step b");
    assert_counters(&probe_c, (1, 1, 0, 0), "step c");
    assert!(informed_about_failure(&probe_a));
    assert!(informed_about_failure(&probe_b));
}

#[test]
fn requested_and_skipped_steps_conflict_at_parse_time() {
    let registrar = ConfigRegistrar::new("cairn-test", "test session");
    let result = registrar.parse_from([
        "cairn-test",
        "--steps",
        "dummy1",
        "--skip-steps",
        "dummy3",
    ]);
    assert!(matches!(result, Err(CairnError::Config { .. })));
}
