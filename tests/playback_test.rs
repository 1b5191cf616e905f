// Integration tests for playback, run guards and panels

use algoviz::config::Config;
use algoviz::engine::searching::SearchAlgorithm;
use algoviz::engine::sorting::{self, SortAlgorithm};
use algoviz::engine::RunContext;
use algoviz::playback::{NoPacer, Outcome, Pacer, Playback, Speed};
use algoviz::session::{InputAction, Panel, PanelKind, RunRequest, RunState, Runner, Session};
use algoviz::step::Step;
use algoviz::structures::bst::TraversalOrder;
use algoviz::structures::ArrayBuffer;
use std::time::{Duration, Instant};

/// Records requested pauses instead of sleeping
#[derive(Default)]
struct RecordingPacer {
    pauses: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn pause_for(&mut self, delay: Duration) {
        self.pauses.push(delay);
    }
}

fn session() -> Session {
    let config = Config {
        seed: Some(1234),
        ..Config::default()
    };
    Session::new(&config).expect("default config is valid")
}

#[test]
fn test_pacer_receives_configured_delay() {
    let mut array = ArrayBuffer::from_values(vec![4, 3, 2, 1]);
    let sequence = sorting::run(&array, SortAlgorithm::Selection, RunContext::new());
    let mut playback = Playback::new(sequence, Speed::from_millis(25));
    let mut pacer = RecordingPacer::default();
    let mut sink = |_: &Step| {};
    let outcome = playback.run_to_end(&mut array, &mut sink, &mut pacer);

    assert!(outcome.is_completed());
    // A pause may follow the last step
    assert!(pacer.pauses.len() + 1 >= outcome.steps());
    assert!(pacer.pauses.len() <= outcome.steps());
    assert!(pacer.pauses.iter().all(|&d| d == Duration::from_millis(25)));
    assert_eq!(array.values(), &[1, 2, 3, 4]);
}

#[test]
fn test_cancel_from_sink_stops_at_next_boundary() {
    let mut array = ArrayBuffer::from_values((0..20).rev().collect());
    let context = RunContext::new();
    let sequence = sorting::run(&array, SortAlgorithm::Bubble, context.clone());
    let mut playback = Playback::new(sequence, Speed::from_millis(1));
    let mut seen = 0;
    let mut sink = |_: &Step| {
        seen += 1;
        if seen == 10 {
            context.cancel();
        }
    };
    let outcome = playback.run_to_end(&mut array, &mut sink, &mut NoPacer);
    assert_eq!(outcome, Outcome::Aborted { steps: 10 });
}

#[test]
fn test_sorting_panel_runs_to_completion_with_ticks() {
    let mut session = session();
    session.sorting.load(vec![5, 3, 8, 1]);
    assert_eq!(session.current_mut().start(), RunRequest::Started);
    assert_eq!(session.current_mut().start(), RunRequest::Busy);

    let delay = session.current().runner().speed().delay();
    let mut now = Instant::now();
    for _ in 0..1000 {
        session.tick(now);
        now += delay;
        if !session.current().runner().is_running() {
            break;
        }
    }
    assert_eq!(session.current().runner().state(), RunState::Done);
    assert_eq!(session.sorting.visualizer().structure().values(), &[1, 3, 5, 8]);
    assert!(
        session.current().status().starts_with("Sorted 4 elements"),
        "status: {}",
        session.current().status()
    );
    let highlights = session.current().runner().highlights();
    assert!((0..4).all(|i| highlights.mark(i).is_some()));
}

#[test]
fn test_pause_holds_progress() {
    let mut session = session();
    session.current_mut().start();
    let start = Instant::now();
    session.tick(start);
    session.current_mut().runner_mut().toggle_pause();
    assert_eq!(session.current().runner().state(), RunState::Paused);

    let logged = session.current().runner().log().total_recorded();
    session.tick(start + Duration::from_secs(10));
    assert_eq!(session.current().runner().log().total_recorded(), logged);
}

#[test]
fn test_invalid_input_leaves_panel_untouched() {
    let mut session = session();
    session.switch_to(PanelKind::Tree);
    let before = session.tree.visualizer().structure().values(TraversalOrder::Inorder);
    let result = session.current_mut().submit(InputAction::Insert, "twelve");
    assert!(result.is_err());
    assert!(!session.current().runner().is_running());
    assert_eq!(
        session.tree.visualizer().structure().values(TraversalOrder::Inorder),
        before
    );
}

#[test]
fn test_hash_panel_reports_probe_count() {
    let mut session = session();
    session.switch_to(PanelKind::HashTable);
    for input in ["7:a", "14:b", "21:c"] {
        let request = session
            .current_mut()
            .submit(InputAction::Insert, input)
            .expect("valid entry");
        assert_eq!(request, RunRequest::Started);
        let outcome = session
            .hash
            .visualizer_mut()
            .finish_with(&mut NoPacer)
            .expect("run was started");
        session.hash.finished(outcome);
    }
    assert_eq!(session.hash.last_probes(), Some(2));
    assert_eq!(session.hash.status(), "Inserted key 21 (2 probes)");
    assert_eq!(session.hash.stats().items, 3);
}

#[test]
fn test_stack_pop_on_empty_is_reported() {
    let mut session = session();
    session.switch_to(PanelKind::StackQueue);
    session.current_mut().reset();
    let result = session.current_mut().submit(InputAction::Delete, "");
    assert!(result.is_err(), "{:?}", result);
}

#[test]
fn test_rejected_search_keeps_running_target() {
    let mut session = session();
    session.searching.load(vec![5, 1, 3]);
    assert_eq!(session.searching.search(3), RunRequest::Started);
    assert_eq!(session.searching.search(99), RunRequest::Busy);
    assert_eq!(session.searching.target(), Some(3));

    let outcome = session
        .searching
        .visualizer_mut()
        .finish_with(&mut NoPacer)
        .expect("run was started");
    session.searching.finished(outcome);
    assert!(
        session.searching.status().starts_with("Found 3 at index 2"),
        "status: {}",
        session.searching.status()
    );
}

#[test]
fn test_rejected_traversal_keeps_running_order() {
    let mut session = session();
    assert_eq!(session.tree.traverse(TraversalOrder::Preorder), RunRequest::Started);
    assert_eq!(session.tree.traverse(TraversalOrder::Postorder), RunRequest::Busy);
    assert_eq!(session.tree.order(), TraversalOrder::Preorder);

    let outcome = session
        .tree
        .visualizer_mut()
        .finish_with(&mut NoPacer)
        .expect("run was started");
    session.tree.finished(outcome);
    assert!(
        session.tree.status().starts_with("Preorder:"),
        "status: {}",
        session.tree.status()
    );
}

#[test]
fn test_search_load_sorts_for_binary_search() {
    let mut session = session();
    session.searching.set_algorithm(SearchAlgorithm::Binary);
    assert_eq!(session.searching.load(vec![9, 2, 5]), RunRequest::Started);
    assert_eq!(session.searching.visualizer().structure().values(), &[2, 5, 9]);
}
