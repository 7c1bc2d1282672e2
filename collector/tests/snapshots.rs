//! Client-reported snapshots flowing through collection and scoring.

use std::path::PathBuf;

use envguard_collector::{SignalCollector, SnapshotProbeSource};
use envguard_scorer::{Locale, ProbeBundle, UaProfile};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn collector(name: &str) -> SignalCollector<SnapshotProbeSource> {
    let source = SnapshotProbeSource::from_path(fixture(name)).expect("fixture should load");
    SignalCollector::new(source)
}

#[test]
fn android_emulator_snapshot_is_flagged() {
    let verdict = collector("android_emulator.json").classify(Locale::En);

    let points: Vec<u32> = verdict.groups.iter().map(|group| group.points).collect();
    assert_eq!(points, vec![25, 5, 14, 0, 3, 15]);
    assert_eq!(verdict.score, 62);
    assert!(verdict.is_emulator);
    assert_eq!(
        verdict.reasons.first().map(String::as_str),
        Some("Suspicious User-Agent keyword: sdk")
    );
}

#[test]
fn physical_phone_snapshot_passes() {
    let verdict = collector("pixel_8.json").classify(Locale::En);
    assert_eq!(verdict.score, 0);
    assert!(!verdict.is_emulator);
    assert_eq!(verdict.reasons, vec!["No emulator indicators found"]);
}

#[test]
fn partial_snapshot_falls_back_to_sentinels() {
    let collector = collector("headless_partial.json");
    let bundle = collector.collect();
    assert_eq!(
        bundle,
        ProbeBundle {
            user_agent: "Mozilla/5.0 (Linux; Android 13; Mobile)".to_string(),
            ..ProbeBundle::default()
        }
    );
    assert!(UaProfile::from_user_agent(&bundle.user_agent).mobile);

    let verdict = collector.classify(Locale::En);
    assert_eq!(verdict.score, 10);
    assert_eq!(verdict.reasons, vec!["Mobile User-Agent without touch support"]);
}

#[test]
fn russian_is_the_default_reason_locale() {
    let verdict = collector("pixel_8.json").classify(Locale::default());
    assert_eq!(verdict.reasons, vec!["Не обнаружено явных признаков эмулятора"]);
}
