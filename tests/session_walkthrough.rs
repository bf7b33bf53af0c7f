use card_trainer::import::{LoadOptions, load};
use card_trainer::models::{Intent, Session, StepState};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;

fn term(session: &Session) -> &str {
    session.current_card().map(|c| c.term.as_str()).unwrap()
}

#[test]
fn walkthrough_from_file_to_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abc.csv");
    fs::write(&path, "a,1\nb,2\nc,3\n").unwrap();

    let loaded = load(&path, LoadOptions::default()).unwrap();
    assert!(loaded.warnings.is_empty());
    let mut session = Session::new(loaded.deck, StdRng::seed_from_u64(0)).unwrap();

    assert_eq!(session.position(), 1);
    assert_eq!(term(&session), "a");

    session.apply(Intent::MarkKnown);
    assert_eq!(session.known_count(), 1);
    assert_eq!(session.position(), 2);
    assert_eq!(term(&session), "b");

    session.apply(Intent::StepBack);
    assert_eq!(session.position(), 1);
    assert_eq!(term(&session), "a");
    assert_eq!(session.step_state(), StepState::MustGoForward);

    session.apply(Intent::StepForward);
    assert_eq!(session.position(), 2);
    assert_eq!(term(&session), "b");
    assert_eq!(session.step_state(), StepState::CanGoBack);
    assert_eq!(session.known_count(), 1);

    session.apply(Intent::MarkUnknown);
    assert_eq!(session.unknown_count(), 1);
    assert_eq!(session.position(), 3);
    assert_eq!(term(&session), "c");

    session.apply(Intent::MarkKnown);
    let result = session.result().expect("session should be finished");
    assert_eq!(result.cards_shown, 3);
    assert_eq!(result.known, 2);
    assert_eq!(result.unknown, 1);
    let (known_pct, unknown_pct) = result.percentages().unwrap();
    assert!((known_pct - 66.67).abs() < 0.01);
    assert!((unknown_pct - 33.33).abs() < 0.01);
    assert_eq!(result.duration, None);
}

#[test]
fn shuffled_start_shows_first_card_of_shuffled_deck() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.csv");
    fs::write(&path, "kot,cat\npies,dog\nkoń,horse\nmysz,mouse\n").unwrap();
    let loaded = load(&path, LoadOptions::default()).unwrap();

    let expected = loaded.deck.shuffled(&mut StdRng::seed_from_u64(3));
    let session = Session::start_shuffled(loaded.deck, StdRng::seed_from_u64(3)).unwrap();

    assert_eq!(session.deck(), &expected);
    assert_eq!(session.position(), 1);
    assert_eq!(term(&session), expected.get(0).unwrap().term);
}

#[test]
fn restart_from_results_and_mid_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pair.csv");
    fs::write(&path, "x,1\ny,2\n").unwrap();
    let loaded = load(&path, LoadOptions::default()).unwrap();
    let mut session = Session::new(loaded.deck, StdRng::seed_from_u64(8)).unwrap();

    session.apply(Intent::StartTimer);
    session.apply(Intent::MarkKnown);
    session.apply(Intent::ShuffleAndRestart);
    assert_eq!(session.position(), 1);
    assert_eq!(session.known_count(), 0);
    assert!(session.stopwatch().sample().is_none());

    session.apply(Intent::StartTimer);
    session.apply(Intent::MarkUnknown);
    session.apply(Intent::MarkUnknown);
    let result = session.result().unwrap();
    assert_eq!(result.unknown, 2);
    assert!(result.duration.is_some());

    session.apply(Intent::ShuffleAndRestart);
    assert!(session.is_presenting());
    assert_eq!(session.unknown_count(), 0);
    assert_eq!(session.step_state(), StepState::CanGoBack);
}
