// revision/tests/review_lifecycle.rs
//
// End-to-end flow: a learner disagrees with the canonical segmentation,
// files a report, a reviewer decides, and the decision becomes authoritative
// for every later resolution.

use libsyllabe_core::{Classification, Config, SyllableSequence};
use libsyllabe_revision::{
    CorrectionStore, EngineError, InMemoryBucket, MismatchReport, Resolver, ReviewDesk,
    ReviewOutcome, ReviewStatus, Scope, Source, RESEGMENTATION_BUCKET,
};

fn seq(parts: &[&str]) -> SyllableSequence {
    SyllableSequence::new(parts.to_vec()).unwrap()
}

#[test]
fn mismatch_to_acceptance_to_authoritative_answer() {
    let store = CorrectionStore::new_in_memory();
    let buckets = InMemoryBucket::new();
    let resolver = Resolver::new(store.clone(), &Config::default());
    let desk = ReviewDesk::new(store, buckets.clone());

    // The learner cuts "bronzette" after characters 4 and 7: bron-zet-te.
    let verdict = resolver
        .check_segmentation("bronzette", &[4, 7], None)
        .unwrap();
    assert!(!verdict.correct);
    assert_eq!(verdict.user_sequence.syllables(), ["bron", "zet", "te"]);
    assert_eq!(verdict.canonical_sequence.syllables(), ["bron", "zette"]);

    // The disagreement goes to review; the word sits in the learner's
    // resegmentation bucket in the meantime.
    buckets.add_word("lea", RESEGMENTATION_BUCKET, "bronzette");
    let request = desk
        .submit(MismatchReport {
            word: verdict_word(&verdict),
            learner_sequence: verdict.user_sequence.clone(),
            canonical_sequence: verdict.canonical_sequence.clone(),
            requester: "lea".to_string(),
        })
        .unwrap();
    assert_eq!(request.status, ReviewStatus::Pending);

    // The reviewer accepts the canonical answer as-is.
    let decided = desk
        .decide(
            request.id,
            ReviewOutcome::Accept {
                override_sequence: None,
            },
            Some("segmentation confirmed".to_string()),
        )
        .unwrap();
    assert_eq!(decided.status, ReviewStatus::Accepted);
    assert!(!buckets.contains("lea", RESEGMENTATION_BUCKET, "bronzette"));

    let global = desk.store().global("bronzette").unwrap().unwrap();
    assert_eq!(global.sequence.syllables(), ["bron", "zette"]);
    assert_eq!(global.classification, Classification::Multisyllable);
    assert_eq!(global.usage, 0);

    // A second learner with a conflicting record of their own still gets the
    // accepted answer.
    resolver
        .record_exercise_result(
            "bronzette",
            Classification::Multisyllable,
            Some(seq(&["bron", "zet", "te"])),
            "sam",
            Some("t9"),
        )
        .unwrap();
    let scope = Scope::learner("sam").with_texts(vec!["t9"]);
    let res = resolver.resolve("bronzette", Some(&scope));
    assert_eq!(res.source, Source::AdminValidated);
    assert_eq!(res.sequence.syllables(), ["bron", "zette"]);
    assert_eq!(desk.store().global("bronzette").unwrap().unwrap().usage, 1);
}

fn verdict_word(verdict: &libsyllabe_revision::Verdict) -> libsyllabe_core::Word {
    libsyllabe_core::Word::new(verdict.canonical_sequence.word())
}

#[test]
fn duplicate_report_while_pending_is_a_conflict() {
    let store = CorrectionStore::new_in_memory();
    let desk = ReviewDesk::new(store, InMemoryBucket::new());

    let make_report = || MismatchReport {
        word: libsyllabe_core::Word::new("bronzette"),
        learner_sequence: seq(&["bron", "zet", "te"]),
        canonical_sequence: seq(&["bron", "zette"]),
        requester: "lea".to_string(),
    };

    let first = desk.submit(make_report()).unwrap();
    assert!(matches!(
        desk.submit(make_report()).unwrap_err(),
        EngineError::Conflict { .. }
    ));

    // Once decided, a new report may be filed again.
    desk.decide(first.id, ReviewOutcome::Reject, None).unwrap();
    desk.submit(make_report()).unwrap();
}

#[test]
fn a_newer_acceptance_supersedes_the_old_global() {
    let store = CorrectionStore::new_in_memory();
    let resolver = Resolver::new(store.clone(), &Config::default());
    let desk = ReviewDesk::new(store, InMemoryBucket::new());

    let file = |requester: &str| MismatchReport {
        word: libsyllabe_core::Word::new("papillon"),
        learner_sequence: seq(&["pa", "pil", "lon"]),
        canonical_sequence: seq(&["pa", "pi", "llon"]),
        requester: requester.to_string(),
    };

    let first = desk.submit(file("lea")).unwrap();
    desk.decide(
        first.id,
        ReviewOutcome::Accept {
            override_sequence: None,
        },
        None,
    )
    .unwrap();
    assert_eq!(
        resolver.resolve("papillon", None).sequence.syllables(),
        ["pa", "pi", "llon"]
    );

    // A later review overrides with the learner-style cut; the correction is
    // superseded, not duplicated.
    let second = desk.submit(file("sam")).unwrap();
    desk.decide(
        second.id,
        ReviewOutcome::Accept {
            override_sequence: Some(seq(&["pa", "pil", "lon"])),
        },
        None,
    )
    .unwrap();

    assert_eq!(
        resolver.resolve("papillon", None).sequence.syllables(),
        ["pa", "pil", "lon"]
    );
    assert_eq!(desk.store().globals_snapshot().unwrap().len(), 1);
}

#[test]
fn accept_both_does_not_change_resolution_priority() {
    let store = CorrectionStore::new_in_memory();
    let resolver = Resolver::new(store.clone(), &Config::default());
    let desk = ReviewDesk::new(store, InMemoryBucket::new());

    let request = desk
        .submit(MismatchReport {
            word: libsyllabe_core::Word::new("chocolat"),
            learner_sequence: seq(&["choco", "lat"]),
            canonical_sequence: seq(&["cho", "co", "lat"]),
            requester: "lea".to_string(),
        })
        .unwrap();
    desk.decide(request.id, ReviewOutcome::AcceptBoth, None)
        .unwrap();

    // Resolution still comes from the algorithm; the alternative is only
    // informational.
    let res = resolver.resolve("chocolat", None);
    assert_eq!(res.source, Source::Algorithm);
    let alts = desk.store().alternatives("chocolat").unwrap();
    assert!(alts.contains(&seq(&["choco", "lat"])));
}

#[test]
fn reopened_request_can_be_decided_differently() {
    let store = CorrectionStore::new_in_memory();
    let desk = ReviewDesk::new(store, InMemoryBucket::new());

    let request = desk
        .submit(MismatchReport {
            word: libsyllabe_core::Word::new("bronzette"),
            learner_sequence: seq(&["bron", "zet", "te"]),
            canonical_sequence: seq(&["bron", "zette"]),
            requester: "lea".to_string(),
        })
        .unwrap();

    desk.decide(request.id, ReviewOutcome::Reject, Some("non".into()))
        .unwrap();
    desk.reopen(request.id).unwrap();
    let accepted = desk
        .decide(
            request.id,
            ReviewOutcome::Accept {
                override_sequence: None,
            },
            None,
        )
        .unwrap();
    assert_eq!(accepted.status, ReviewStatus::Accepted);
    assert!(desk.store().global("bronzette").unwrap().is_some());
}
