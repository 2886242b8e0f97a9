use std::path::PathBuf;

use lesson_content::ContentFactory;
use lesson_core::LessonPhase;
use lesson_sim::Simulation;

fn simulation() -> Simulation {
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../lesson/content/data");
    Simulation::from_factory(&ContentFactory::new(data_dir), "vocal_lesson")
        .expect("bundled content")
}

#[test]
fn bundled_lesson_runs_to_the_end() {
    let report = simulation().run(3).expect("run");

    assert_eq!(report.final_state.phase, LessonPhase::LessonEnded);
    assert!(report.cards_played > 0);
    assert!(report.turns_played >= 1 && report.turns_played <= 6);
    assert_eq!(report.updates_root.len(), 64);
}

#[test]
fn runs_are_reproducible_per_seed() {
    let simulation = simulation();

    assert_eq!(
        simulation.run(11).expect("first run"),
        simulation.run(11).expect("second run")
    );
}

#[test]
fn report_serializes_to_json() {
    let report = simulation().run(5).expect("run");
    let json = serde_json::to_value(&report).expect("json");

    assert_eq!(json["seed"], 5);
    assert_eq!(json["final_state"]["phase"], "LessonEnded");
}
