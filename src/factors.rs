//! Per-record explanation of the weighted features.
//!
//! Each feature has its own normalising transform onto `[0, 1]` (1 being the
//! favourable end) and its own human-readable label. The displayed importance
//! is the normalised value scaled by the feature's weight.
//!
//! Ranking uses the static base weight, not the per-record importance, so the
//! order of the returned factors is the same for every record.

use serde::Serialize;

use crate::record::StudentRecord;
use crate::weights::{Feature, FeatureWeights};

pub const TOP_FACTORS: usize = 5;

const STUDY_TIME_LABELS: [&str; 4] = ["<2 hours", "2-5 hours", "5-10 hours", ">10 hours"];
const EDUCATION_LABELS: [&str; 5] = ["None", "Primary", "5th-9th grade", "Secondary", "Higher"];
const HEALTH_LABELS: [&str; 5] = ["Very bad", "Bad", "OK", "Good", "Very good"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFactor {
    pub feature: Feature,
    pub description: String,
    pub importance: f64,
    pub base_weight: f64,
}

fn label(labels: &[&'static str], index: usize) -> &'static str {
    labels.get(index).copied().unwrap_or("Unknown")
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn flag_value(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// The feature's value for this record mapped onto `[0, 1]`.
pub fn normalized_value(feature: Feature, record: &StudentRecord) -> f64 {
    match feature {
        Feature::StudyTime => (f64::from(record.studytime()) - 1.0) / 3.0,
        Feature::MotherEducation => f64::from(record.mother_education()) / 4.0,
        Feature::FatherEducation => f64::from(record.father_education()) / 4.0,
        Feature::Failures => (3.0 - f64::from(record.failures())) / 3.0,
        Feature::Age => (f64::from(record.age()) - 15.0) / 4.0,
        Feature::Absences => (20.0 - f64::from(record.absences())) / 20.0,
        Feature::Health => (f64::from(record.health()) - 1.0) / 4.0,
        Feature::FamilySupport => flag_value(record.family_support()),
        Feature::Internet => flag_value(record.internet()),
        Feature::SchoolSupport => flag_value(record.school_support()),
    }
}

pub fn describe(feature: Feature, record: &StudentRecord) -> String {
    match feature {
        Feature::StudyTime => format!(
            "Study Time: {}",
            label(&STUDY_TIME_LABELS, usize::from(record.studytime()).saturating_sub(1))
        ),
        Feature::MotherEducation => format!(
            "Mother's Education: {}",
            label(&EDUCATION_LABELS, usize::from(record.mother_education()))
        ),
        Feature::FatherEducation => format!(
            "Father's Education: {}",
            label(&EDUCATION_LABELS, usize::from(record.father_education()))
        ),
        Feature::Failures => format!("Past Failures: {}", record.failures()),
        Feature::Age => format!("Age: {} years", record.age()),
        Feature::Absences => format!("Absences: {}", record.absences()),
        Feature::Health => format!(
            "Health: {}",
            label(&HEALTH_LABELS, usize::from(record.health()).saturating_sub(1))
        ),
        Feature::FamilySupport => format!("Family Support: {}", yes_no(record.family_support())),
        Feature::Internet => format!("Internet Access: {}", yes_no(record.internet())),
        Feature::SchoolSupport => format!("School Support: {}", yes_no(record.school_support())),
    }
}

pub fn explain(feature: Feature, record: &StudentRecord, weights: &FeatureWeights) -> RankedFactor {
    let base_weight = weights.get(feature);
    RankedFactor {
        feature,
        description: describe(feature, record),
        importance: (normalized_value(feature, record) * base_weight).abs(),
        base_weight,
    }
}

/// The [`TOP_FACTORS`] heaviest features by base weight, explained for `record`.
pub fn rank_factors(record: &StudentRecord, weights: &FeatureWeights) -> Vec<RankedFactor> {
    weights
        .ranked()
        .into_iter()
        .take(TOP_FACTORS)
        .map(|(feature, _)| explain(feature, record, weights))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::StudentRecordInput;

    fn record_with(f: impl FnOnce(&mut StudentRecordInput)) -> StudentRecord {
        let mut input = StudentRecordInput::from(&StudentRecord::sample());
        f(&mut input);
        StudentRecord::try_from(input).unwrap()
    }

    #[test]
    fn test_sample_descriptions() {
        let record = StudentRecord::sample();
        assert_eq!(describe(Feature::StudyTime, &record), "Study Time: 5-10 hours");
        assert_eq!(describe(Feature::MotherEducation, &record), "Mother's Education: Secondary");
        assert_eq!(describe(Feature::FatherEducation, &record), "Father's Education: 5th-9th grade");
        assert_eq!(describe(Feature::Health, &record), "Health: Good");
        assert_eq!(describe(Feature::Age, &record), "Age: 17 years");
        assert_eq!(describe(Feature::FamilySupport, &record), "Family Support: Yes");
        assert_eq!(describe(Feature::SchoolSupport, &record), "School Support: No");
    }

    #[test]
    fn test_normalized_values_span_unit_interval() {
        let low = record_with(|r| {
            r.studytime = Some(1);
            r.failures = Some(3);
            r.absences = Some(20);
            r.health = Some(1);
            r.age = Some(15);
        });
        let high = record_with(|r| {
            r.studytime = Some(4);
            r.failures = Some(0);
            r.absences = Some(0);
            r.health = Some(5);
            r.age = Some(19);
        });

        for feature in [Feature::StudyTime, Feature::Failures, Feature::Absences, Feature::Health, Feature::Age] {
            assert_eq!(normalized_value(feature, &low), 0.0, "{:?}", feature);
            assert_eq!(normalized_value(feature, &high), 1.0, "{:?}", feature);
        }
    }

    #[test]
    fn test_flags_contribute_full_weight_or_nothing() {
        let weights = FeatureWeights::default();
        let record = StudentRecord::sample();
        assert_eq!(explain(Feature::FamilySupport, &record, &weights).importance, 0.038);
        assert_eq!(explain(Feature::SchoolSupport, &record, &weights).importance, 0.0);
    }

    #[test]
    fn test_top_five_follow_base_weight() {
        let factors = rank_factors(&StudentRecord::sample(), &FeatureWeights::default());
        let order: Vec<Feature> = factors.iter().map(|f| f.feature).collect();
        assert_eq!(
            order,
            vec![Feature::StudyTime, Feature::FatherEducation, Feature::MotherEducation, Feature::Failures, Feature::Age]
        );

        let studytime = &factors[0];
        assert!((studytime.importance - 0.245 * 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(studytime.base_weight, 0.245);
    }
}
