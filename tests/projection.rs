// tests/projection.rs
//
// Crossover projection: the closed form, the guards, and monotonicity.
//
use goldcross::projection::{CrossoverDuration, GrowthModel, Outcome, project};

const YEAR: f64 = 31_536_000.0;

#[test]
fn reference_caps_follow_closed_form() {
    let (gold, bitcoin): (f64, f64) = (21_857_000_000_000.0, 1_900_000_000_000.0);
    let years = (gold / bitcoin).ln() / (1.0_f64 + (0.5 - 0.05)).ln();
    let expected = years * YEAR;

    let d = project(Some(gold), Some(bitcoin)).unwrap();
    assert_eq!(d.years, years.floor() as u64);
    assert_eq!(d.months, ((expected % YEAR) / (YEAR / 12.0)).floor() as u64);
    assert!(d.as_seconds() <= expected);
    assert!(expected - d.as_seconds() < 1.0, "lost more than the floored fraction");
    assert!(d.months < 12 && d.days < 31 && d.hours < 24 && d.minutes < 60 && d.seconds < 60);
}

#[test]
fn equal_caps_have_already_crossed() {
    assert_eq!(project(Some(1_000.0), Some(1_000.0)), Some(CrossoverDuration::ZERO));
}

#[test]
fn bitcoin_ahead_is_always_zero() {
    for (gold, bitcoin) in [(1.0, 2.0), (5.0e12, 5.000001e12), (1.0e3, 1.0e15)] {
        assert_eq!(project(Some(gold), Some(bitcoin)), Some(CrossoverDuration::ZERO));
    }
}

#[test]
fn missing_or_junk_input_is_zero_not_a_fault() {
    assert_eq!(project(None, Some(500.0)), Some(CrossoverDuration::ZERO));
    assert_eq!(project(Some(500.0), None), Some(CrossoverDuration::ZERO));
    assert_eq!(project(Some(f64::NAN), Some(1.0)), Some(CrossoverDuration::ZERO));
    assert_eq!(project(Some(10.0), Some(0.0)), Some(CrossoverDuration::ZERO));
}

#[test]
fn shrinking_bitcoin_never_shortens_the_wait() {
    let m = GrowthModel::default();
    let gold = 20.0e12;
    let mut prev = 0.0;
    for bitcoin in [19.0e12, 10.0e12, 2.0e12, 1.0e12, 1.0e9, 1.0] {
        let secs = m.seconds_to_cross(gold, bitcoin).unwrap();
        assert!(secs >= prev, "{bitcoin}: {secs} < {prev}");
        prev = secs;
    }
}

#[test]
fn uncomputable_is_distinct_from_overtaken() {
    let flat = GrowthModel { fast_rate: 0.05, slow_rate: 0.05 };
    assert_eq!(flat.outcome(Some(10.0), Some(1.0)), Outcome::Uncomputable);
    assert_eq!(flat.outcome(Some(1.0), Some(10.0)), Outcome::Overtaken);

    let m = GrowthModel::default();
    assert!(matches!(m.outcome(Some(10.0), Some(1.0)), Outcome::In(d) if d.years == 6));
}
