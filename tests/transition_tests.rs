// Host-side tests for page-transition sequencing.

use torch_core::constants::*;
use torch_core::*;

const VIEWPORT: [f32; 2] = [1024.0, 768.0];

struct Harness {
    clock: ManualClock,
    gate: ReadinessGate,
    orch: TransitionOrchestrator<ManualClock>,
    events: Vec<TransitionEvent>,
}

impl Harness {
    fn new(gate_open: bool) -> Self {
        let clock = ManualClock::new();
        let gate = ReadinessGate::new();
        if gate_open {
            gate.open();
        }
        let config = TransitionConfig::default();
        let orch = TransitionOrchestrator::new(clock.clone(), config, gate.clone());
        Self {
            clock,
            gate,
            orch,
            events: Vec::new(),
        }
    }

    fn request(&mut self, from: &str, to: &str) -> bool {
        let seeding = Seeding::Rect(AnchorRect {
            x: 20.0,
            y: 20.0,
            width: 120.0,
            height: 40.0,
        });
        self.orch.request(from, to, seeding, VIEWPORT, &mut self.events)
    }

    /// Advance wall time and the simulation together, one frame at a time.
    fn run_for(&mut self, ms: f64) {
        let frames = (ms / FRAME_MS as f64).ceil() as usize;
        for _ in 0..frames {
            self.clock.advance(FRAME_MS as f64);
            self.orch.frame(FRAME_MS, &FrameInput::default(), &mut self.events);
        }
    }

    fn commits(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                TransitionEvent::Commit { to } => Some(to.clone()),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn full_cycle_returns_to_idle() {
    let mut h = Harness::new(true);
    let flag = h.orch.flag();
    assert!(!flag.is_active());

    assert!(h.request("/", "/work"));
    assert_eq!(h.orch.phase(), TransitionPhase::Dispersing);
    assert!(flag.is_active());
    assert_eq!(h.orch.state().to_path, "/work");
    assert!(h.orch.simulation().is_some());

    h.run_for(DISPERSION_DURATION_MS);
    assert_eq!(h.orch.phase(), TransitionPhase::Settling);
    assert!(h.commits().is_empty());

    h.run_for(SETTLE_DELAY_MS);
    assert_eq!(h.orch.phase(), TransitionPhase::Navigating);
    assert_eq!(h.commits(), vec!["/work".to_string()]);
    assert!(h.orch.simulation().is_none());
    assert!(flag.is_active());

    h.orch.on_route_changed("/work", &mut h.events);
    assert_eq!(h.orch.phase(), TransitionPhase::Idle);
    assert!(!flag.is_active());
    assert_eq!(
        h.events.last(),
        Some(&TransitionEvent::Finished {
            path: "/work".to_string()
        })
    );
}

#[test]
fn commit_waits_for_settle_delay() {
    let mut h = Harness::new(true);
    h.request("/", "/about");
    h.run_for(DISPERSION_DURATION_MS);
    h.run_for(SETTLE_DELAY_MS - 100.0);
    assert!(h.commits().is_empty());
    h.run_for(100.0);
    assert_eq!(h.commits().len(), 1);
}

#[test]
fn settle_delay_is_configurable() {
    let clock = ManualClock::new();
    let gate = ReadinessGate::new();
    gate.open();
    let config = TransitionConfig {
        settle_delay_ms: 0.0,
        dispersion_duration_ms: 100.0,
        ..TransitionConfig::default()
    };
    let mut orch = TransitionOrchestrator::new(clock.clone(), config, gate);
    let mut events = Vec::new();
    let anchor = AnchorRect {
        x: 0.0,
        y: 0.0,
        width: 50.0,
        height: 50.0,
    };
    orch.request("/", "/x", Seeding::Rect(anchor), VIEWPORT, &mut events);
    for _ in 0..8 {
        clock.advance(FRAME_MS as f64);
        orch.frame(FRAME_MS, &FrameInput::default(), &mut events);
    }
    assert_eq!(orch.phase(), TransitionPhase::Navigating);
}

#[test]
fn request_at_half_way_supersedes_and_targets_latest() {
    let mut h = Harness::new(true);
    h.request("/", "/first");
    h.run_for(DISPERSION_DURATION_MS * 0.5);
    assert_eq!(h.orch.phase(), TransitionPhase::Dispersing);

    h.request("/", "/second");
    assert!(h.events.contains(&TransitionEvent::Superseded {
        dropped: "/first".to_string()
    }));
    assert_eq!(h.orch.state().to_path, "/second");
    assert_eq!(h.orch.generation(), 2);

    h.run_for(DISPERSION_DURATION_MS + SETTLE_DELAY_MS + 100.0);
    assert_eq!(h.commits(), vec!["/second".to_string()]);
}

#[test]
fn request_during_settle_restarts_dispersion() {
    let mut h = Harness::new(true);
    h.request("/", "/a");
    h.run_for(DISPERSION_DURATION_MS + 200.0);
    assert_eq!(h.orch.phase(), TransitionPhase::Settling);

    h.request("/", "/b");
    assert_eq!(h.orch.phase(), TransitionPhase::Dispersing);
    // The old settle deadline must not commit the new target early.
    h.run_for(SETTLE_DELAY_MS);
    assert!(h.commits().is_empty());
    h.run_for(DISPERSION_DURATION_MS + SETTLE_DELAY_MS + 100.0);
    assert_eq!(h.commits(), vec!["/b".to_string()]);
}

#[test]
fn same_path_request_is_ignored_when_idle() {
    let mut h = Harness::new(true);
    assert!(!h.request("/work", "/work"));
    assert_eq!(h.orch.phase(), TransitionPhase::Idle);
    assert!(h.events.is_empty());
}

#[test]
fn closed_gate_commits_immediately() {
    let mut h = Harness::new(false);
    assert!(h.request("/", "/work"));
    assert_eq!(h.orch.phase(), TransitionPhase::Navigating);
    assert!(h.orch.simulation().is_none());
    assert_eq!(h.commits(), vec!["/work".to_string()]);

    h.orch.on_route_changed("/work", &mut h.events);
    h.gate.open();
    h.events.clear();
    h.request("/work", "/");
    assert_eq!(h.orch.phase(), TransitionPhase::Dispersing);
}

#[test]
fn back_forward_while_idle_is_ignored() {
    let mut h = Harness::new(true);
    h.orch.on_back_forward("/b", &mut h.events);
    assert!(h.events.is_empty());
    assert_eq!(h.orch.phase(), TransitionPhase::Idle);
}

#[test]
fn back_forward_mid_transition_aborts() {
    let mut h = Harness::new(true);
    let flag = h.orch.flag();
    h.request("/", "/work");
    h.run_for(300.0);
    h.orch.on_back_forward("/elsewhere", &mut h.events);
    assert_eq!(h.events.last(), Some(&TransitionEvent::Aborted));
    assert_eq!(h.orch.phase(), TransitionPhase::Idle);
    assert!(!flag.is_active());
    assert!(h.orch.simulation().is_none());

    h.run_for(DISPERSION_DURATION_MS + SETTLE_DELAY_MS + 100.0);
    assert!(h.commits().is_empty());
}

#[test]
fn stale_route_notice_after_new_request_is_ignored() {
    let mut h = Harness::new(true);
    h.request("/", "/a");
    h.run_for(DISPERSION_DURATION_MS + SETTLE_DELAY_MS + 100.0);
    assert_eq!(h.orch.phase(), TransitionPhase::Navigating);

    // The user moves on before the router confirms `/a`.
    h.request("/a", "/b");
    assert_eq!(h.orch.phase(), TransitionPhase::Dispersing);
    let before = h.events.len();
    h.orch.on_route_changed("/a", &mut h.events);
    assert_eq!(h.events.len(), before);
    assert_eq!(h.orch.phase(), TransitionPhase::Dispersing);
    assert!(h.orch.flag().is_active());

    h.run_for(DISPERSION_DURATION_MS + SETTLE_DELAY_MS + 100.0);
    assert_eq!(h.commits(), vec!["/a".to_string(), "/b".to_string()]);
    h.orch.on_route_changed("/b", &mut h.events);
    assert_eq!(h.orch.phase(), TransitionPhase::Idle);
}

#[test]
fn route_notice_for_other_path_mid_dispersion_keeps_target() {
    let mut h = Harness::new(true);
    h.request("/", "/work");
    h.run_for(300.0);
    h.orch.on_route_changed("/elsewhere", &mut h.events);
    assert!(!h.events.contains(&TransitionEvent::Aborted));
    h.run_for(DISPERSION_DURATION_MS + SETTLE_DELAY_MS + 100.0);
    assert_eq!(h.commits(), vec!["/work".to_string()]);
}

#[test]
fn back_forward_after_commit_finishes() {
    let mut h = Harness::new(false);
    h.request("/", "/work");
    assert_eq!(h.orch.phase(), TransitionPhase::Navigating);
    h.orch.on_back_forward("/", &mut h.events);
    assert_eq!(h.orch.phase(), TransitionPhase::Idle);
    assert!(!h.orch.flag().is_active());
}

#[test]
fn direction_follows_path_depth() {
    assert_eq!(direction_for("/", "/work"), DispersionDirection::Forward);
    assert_eq!(direction_for("/work", "/work/one"), DispersionDirection::Forward);
    assert_eq!(direction_for("/work/one", "/work"), DispersionDirection::Backward);
    assert_eq!(direction_for("/work", "/about"), DispersionDirection::Backward);
}

#[test]
fn dispersion_uses_configured_count_and_direction() {
    let mut h = Harness::new(true);
    h.request("/work/one", "/");
    let sim = h.orch.simulation().expect("dispersing");
    assert_eq!(sim.mode(), SimulationMode::Dispersion);
    assert_eq!(sim.particles().len(), DISPERSION_COUNT);
    assert_eq!(sim.config().direction, DispersionDirection::Backward);
}

#[test]
fn uniform_seeding_runs_smoke_wash() {
    let mut h = Harness::new(true);
    h.orch
        .request("/", "/x", Seeding::Uniform, VIEWPORT, &mut h.events);
    let sim = h.orch.simulation().expect("running");
    assert_eq!(sim.mode(), SimulationMode::Smoke);
    assert_eq!(sim.particles().len(), SMOKE_COUNT);

    h.run_for(SMOKE_DURATION_MS + SETTLE_DELAY_MS + 100.0);
    assert_eq!(h.commits(), vec!["/x".to_string()]);
}
