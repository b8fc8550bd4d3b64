// revision/tests/resolution_priority.rs
//
// Integration tests for the three-source merge.
//
// Tests cover:
// - source priority: AdminValidated > LearnerSubmission > Algorithm
// - the staged batch fallback with the minimum-batch threshold
// - usage counter behavior on the hot path

use libsyllabe_core::{classify, Classification, Config, SyllableSequence, Word};
use libsyllabe_revision::{CorrectionStore, GlobalCorrection, Resolver, Scope, Source};

fn seq(parts: &[&str]) -> SyllableSequence {
    SyllableSequence::new(parts.to_vec()).unwrap()
}

fn global(surface: &str, parts: &[&str]) -> GlobalCorrection {
    let sequence = seq(parts);
    GlobalCorrection {
        word: Word::new(surface),
        classification: classify(&sequence),
        sequence,
        usage: 0,
    }
}

#[test]
fn global_correction_wins_over_everything() {
    let resolver = Resolver::new(CorrectionStore::new_in_memory(), &Config::default());
    resolver
        .store()
        .put_global(global("bronzette", &["bron", "zette"]))
        .unwrap();
    resolver
        .record_exercise_result(
            "bronzette",
            Classification::Multisyllable,
            Some(seq(&["bron", "zet", "te"])),
            "lea",
            Some("t1"),
        )
        .unwrap();

    let scope = Scope::learner("lea").with_texts(vec!["t1"]);
    let res = resolver.resolve("bronzette", Some(&scope));
    assert_eq!(res.source, Source::AdminValidated);
    assert_eq!(res.sequence.syllables(), ["bron", "zette"]);
}

#[test]
fn resolution_is_keyed_on_normalized_form() {
    let resolver = Resolver::new(CorrectionStore::new_in_memory(), &Config::default());
    resolver
        .store()
        .put_global(global("école", &["é", "cole"]))
        .unwrap();

    // Different accents/case, same key.
    let res = resolver.resolve("Ecole", None);
    assert_eq!(res.source, Source::AdminValidated);
}

#[test]
fn batch_respects_input_order_and_priority() {
    let resolver = Resolver::new(CorrectionStore::new_in_memory(), &Config::default());
    resolver
        .store()
        .put_global(global("chocolat", &["cho", "colat"]))
        .unwrap();
    resolver
        .record_exercise_result(
            "maison",
            Classification::Multisyllable,
            Some(seq(&["mai", "son"])),
            "lea",
            Some("t1"),
        )
        .unwrap();

    let scope = Scope::learner("lea").with_texts(vec!["t1"]);
    let out = resolver.resolve_batch(&["chocolat", "maison", "papillon"], Some(&scope));

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].source, Source::AdminValidated);
    assert_eq!(out[1].source, Source::LearnerSubmission);
    assert_eq!(out[2].source, Source::Algorithm);
    assert_eq!(out[2].word.key(), "papillon");
}

#[test]
fn small_batch_pulls_out_of_scope_records() {
    let resolver = Resolver::new(CorrectionStore::new_in_memory(), &Config::default());
    // Record from another text than the scoped one.
    resolver
        .record_exercise_result(
            "chocolat",
            Classification::Multisyllable,
            Some(seq(&["cho", "co", "lat"])),
            "lea",
            Some("other-text"),
        )
        .unwrap();

    // Fewer than min_resolved_batch words are covered by stages 1-2, so the
    // resolver widens to the learner's records from any text.
    let scope = Scope::learner("lea").with_texts(vec!["t1"]);
    let out = resolver.resolve_batch(&["chocolat"], Some(&scope));
    assert_eq!(out[0].source, Source::LearnerSubmission);
}

#[test]
fn large_enough_batch_does_not_widen_scope() {
    let mut config = Config::default();
    config.min_resolved_batch = 1;
    let resolver = Resolver::new(CorrectionStore::new_in_memory(), &config);

    resolver
        .store()
        .put_global(global("chocolat", &["cho", "co", "lat"]))
        .unwrap();
    resolver
        .record_exercise_result(
            "maison",
            Classification::Multisyllable,
            Some(seq(&["mai", "son"])),
            "lea",
            Some("other-text"),
        )
        .unwrap();

    // Stage 1 already satisfies the threshold of 1, so the out-of-scope
    // record for "maison" is never consulted.
    let scope = Scope::learner("lea").with_texts(vec!["t1"]);
    let out = resolver.resolve_batch(&["chocolat", "maison"], Some(&scope));
    assert_eq!(out[0].source, Source::AdminValidated);
    assert_eq!(out[1].source, Source::Algorithm);
}

#[test]
fn duplicate_words_in_batch_share_one_resolution() {
    let resolver = Resolver::new(CorrectionStore::new_in_memory(), &Config::default());
    resolver
        .store()
        .put_global(global("chocolat", &["cho", "colat"]))
        .unwrap();
    let out = resolver.resolve_batch(&["chocolat", "Chocolat"], None);
    assert_eq!(out[0].sequence.syllables(), ["cho", "colat"]);
    assert_eq!(out[1].sequence.syllables(), ["cho", "colat"]);
    // Each result keeps the surface form it was asked about.
    assert_eq!(out[0].word.surface(), "chocolat");
    assert_eq!(out[1].word.surface(), "Chocolat");
    // The shared resolution is served from one lookup.
    let g = resolver.store().global("chocolat").unwrap().unwrap();
    assert_eq!(g.usage, 1);
}

#[test]
fn serving_a_global_increments_usage() {
    let resolver = Resolver::new(CorrectionStore::new_in_memory(), &Config::default());
    resolver
        .store()
        .put_global(global("bronzette", &["bron", "zette"]))
        .unwrap();

    resolver.resolve("bronzette", None);
    resolver.resolve_batch(&["bronzette"], None);
    let g = resolver.store().global("bronzette").unwrap().unwrap();
    assert_eq!(g.usage, 2);
}
