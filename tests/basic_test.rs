use student_predictor::jitter::JITTER_AMPLITUDE;
use student_predictor::model::MIN_CONFIDENCE;
use student_predictor::{
    Feature, FixedJitter, Scorer, SeededJitter, StudentRecord, StudentRecordInput, Verdict,
};

fn record_with(f: impl FnOnce(&mut StudentRecordInput)) -> StudentRecord {
    let mut input = StudentRecordInput::from(&StudentRecord::sample());
    f(&mut input);
    StudentRecord::try_from(input).expect("valid record")
}

fn worst_case() -> StudentRecord {
    record_with(|r| {
        r.failures = Some(3);
        r.studytime = Some(1);
        r.medu = Some(0);
        r.fedu = Some(0);
        r.absences = Some(20);
        r.health = Some(1);
    })
}

fn best_case() -> StudentRecord {
    record_with(|r| {
        r.failures = Some(0);
        r.studytime = Some(4);
        r.medu = Some(4);
        r.fedu = Some(4);
        r.absences = Some(0);
        r.health = Some(5);
    })
}

/// A spread of valid records covering the corners of every numeric domain.
fn grid() -> Vec<StudentRecord> {
    let mut records = Vec::new();
    for studytime in 1..=4 {
        for failures in 0..=3 {
            for (parents, absences) in [(0, 20), (4, 0), (2, 10)] {
                for flag in ["yes", "no"] {
                    records.push(record_with(|r| {
                        r.studytime = Some(studytime);
                        r.failures = Some(failures);
                        r.medu = Some(parents);
                        r.fedu = Some(parents);
                        r.absences = Some(absences);
                        r.famsup = Some(flag.to_string());
                        r.schoolsup = Some(flag.to_string());
                        r.internet = Some(flag.to_string());
                    }));
                }
            }
        }
    }
    records
}

#[test]
fn test_bounds_hold_for_every_record() {
    let scorer = Scorer::with_jitter(SeededJitter::new(7));
    for record in grid() {
        let result = scorer.score(&record);
        assert!((0.0..=1.0).contains(&result.probability));
        assert!((MIN_CONFIDENCE..=1.0).contains(&result.confidence));
        assert_eq!(result.verdict == Verdict::Pass, result.probability > 0.5);
    }
}

#[test]
fn test_bounds_hold_at_jitter_extremes() {
    for noise in [-JITTER_AMPLITUDE, JITTER_AMPLITUDE] {
        let scorer = Scorer::with_jitter(FixedJitter(noise));
        for record in [worst_case(), best_case()] {
            let result = scorer.score(&record);
            assert!((0.0..=1.0).contains(&result.probability));
            assert!(result.confidence >= MIN_CONFIDENCE);
        }
    }
}

#[test]
fn test_factor_order_is_independent_of_record() {
    let scorer = Scorer::with_jitter(FixedJitter(0.0));
    let expected = vec![
        Feature::StudyTime,
        Feature::FatherEducation,
        Feature::MotherEducation,
        Feature::Failures,
        Feature::Age,
    ];

    for record in grid() {
        let factors = scorer.score(&record).ranked_factors;
        assert_eq!(factors.len(), 5);
        assert!(factors.windows(2).all(|w| w[0].base_weight > w[1].base_weight));
        let order: Vec<Feature> = factors.iter().map(|f| f.feature).collect();
        assert_eq!(order, expected);
    }

    // Magnitudes still vary with the record.
    let worst = scorer.score(&worst_case()).ranked_factors;
    let best = scorer.score(&best_case()).ranked_factors;
    assert_eq!(worst[0].importance, 0.0);
    assert_eq!(best[0].importance, 0.245);
}

#[test]
fn test_fixed_jitter_is_idempotent() {
    let scorer = Scorer::with_jitter(FixedJitter(0.013));
    let record = StudentRecord::sample();
    assert_eq!(scorer.score(&record), scorer.score(&record));
}

#[test]
fn test_studytime_increases_score() {
    let scorer = Scorer::default();
    let scores: Vec<f64> = (1..=4)
        .map(|s| scorer.base_probability(&record_with(|r| r.studytime = Some(s))))
        .collect();
    assert!(scores.windows(2).all(|w| w[1] > w[0]), "{:?}", scores);
}

#[test]
fn test_failures_decrease_score() {
    let scorer = Scorer::default();
    let scores: Vec<f64> = (0..=3)
        .map(|f| scorer.base_probability(&record_with(|r| r.failures = Some(f))))
        .collect();
    assert!(scores.windows(2).all(|w| w[1] < w[0]), "{:?}", scores);
}

#[test]
fn test_sample_golden_probability() {
    let result = Scorer::with_jitter(FixedJitter(0.0)).score(&StudentRecord::sample());
    assert!((result.probability - 0.6360375).abs() < 1e-12, "{}", result.probability);
    assert_eq!(result.verdict, Verdict::Pass);
    assert_eq!(result.confidence, 0.6);
    assert_eq!(result.ranked_factors[0].description, "Study Time: 5-10 hours");
}

#[test]
fn test_worst_case_fails() {
    let scorer = Scorer::with_jitter(FixedJitter(0.0));
    let result = scorer.score(&worst_case());
    // 0.5 + 0.0039 (age 17) - 0.054 - 0.0069 + 0.0019 - 0.00096 + 0.00105
    assert!((result.probability - 0.44499).abs() < 1e-12, "{}", result.probability);
    assert_eq!(result.verdict, Verdict::Fail);
    assert!(result.probability < scorer.score(&StudentRecord::sample()).probability);
}

#[test]
fn test_best_case_passes() {
    let result = Scorer::with_jitter(FixedJitter(-JITTER_AMPLITUDE)).score(&best_case());
    assert_eq!(result.verdict, Verdict::Pass);
}
