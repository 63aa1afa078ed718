use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{PredictorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl FromStr for Sex {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Address {
    #[serde(rename = "U")]
    Urban,
    #[serde(rename = "R")]
    Rural,
}

impl FromStr for Address {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "U" => Ok(Address::Urban),
            "R" => Ok(Address::Rural),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FamilySize {
    #[serde(rename = "LE3")]
    AtMostThree,
    #[serde(rename = "GT3")]
    MoreThanThree,
}

impl FromStr for FamilySize {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "LE3" => Ok(FamilySize::AtMostThree),
            "GT3" => Ok(FamilySize::MoreThanThree),
            _ => Err(()),
        }
    }
}

struct YesNo(bool);

impl FromStr for YesNo {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "yes" => Ok(YesNo(true)),
            "no" => Ok(YesNo(false)),
            _ => Err(()),
        }
    }
}

fn yes_no<S: Serializer>(value: &bool, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "yes" } else { "no" })
}

/// Inclusive integer domain of a numeric field.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NumericDomain {
    #[serde(skip)]
    pub field: &'static str,
    pub min: i64,
    pub max: i64,
    pub description: &'static str,
}

impl NumericDomain {
    fn check(&self, value: Option<i64>) -> Result<u8> {
        let value = value.ok_or(PredictorError::MissingField(self.field))?;
        if value < self.min || value > self.max {
            return Err(PredictorError::DomainViolation {
                field: self.field,
                value: value.to_string(),
                domain: format!("an integer between {} and {}", self.min, self.max),
            });
        }
        // Every numeric domain fits in a u8.
        Ok(value as u8)
    }
}

/// Closed set of accepted spellings for a categorical field.
#[derive(Debug, Clone, Copy)]
pub struct CategoricalDomain {
    pub field: &'static str,
    pub options: &'static [&'static str],
    pub description: &'static str,
}

impl CategoricalDomain {
    fn check<T: FromStr>(&self, value: Option<&str>) -> Result<T> {
        let raw = value.ok_or(PredictorError::MissingField(self.field))?;
        raw.parse::<T>().map_err(|_| PredictorError::DomainViolation {
            field: self.field,
            value: format!("{:?}", raw),
            domain: format!("one of {}", self.options.join(", ")),
        })
    }
}

pub const AGE: NumericDomain = NumericDomain { field: "age", min: 15, max: 19, description: "Student age" };
pub const MOTHER_EDUCATION: NumericDomain = NumericDomain { field: "Medu", min: 0, max: 4, description: "Mother education level" };
pub const FATHER_EDUCATION: NumericDomain = NumericDomain { field: "Fedu", min: 0, max: 4, description: "Father education level" };
pub const STUDY_TIME: NumericDomain = NumericDomain { field: "studytime", min: 1, max: 4, description: "Weekly study time" };
pub const FAILURES: NumericDomain = NumericDomain { field: "failures", min: 0, max: 3, description: "Number of past class failures" };
pub const HEALTH: NumericDomain = NumericDomain { field: "health", min: 1, max: 5, description: "Current health status" };
pub const ABSENCES: NumericDomain = NumericDomain { field: "absences", min: 0, max: 20, description: "Number of school absences" };

const YES_NO: &[&str] = &["yes", "no"];

pub const SEX: CategoricalDomain = CategoricalDomain { field: "sex", options: &["M", "F"], description: "Student gender" };
pub const ADDRESS: CategoricalDomain = CategoricalDomain { field: "address", options: &["U", "R"], description: "Home address type (urban, rural)" };
pub const FAMILY_SIZE: CategoricalDomain = CategoricalDomain { field: "famsize", options: &["LE3", "GT3"], description: "Family size (<= 3, > 3)" };
pub const SCHOOL_SUPPORT: CategoricalDomain = CategoricalDomain { field: "schoolsup", options: YES_NO, description: "Extra educational school support" };
pub const FAMILY_SUPPORT: CategoricalDomain = CategoricalDomain { field: "famsup", options: YES_NO, description: "Family educational support" };
pub const INTERNET: CategoricalDomain = CategoricalDomain { field: "internet", options: YES_NO, description: "Internet access at home" };
pub const ROMANTIC: CategoricalDomain = CategoricalDomain { field: "romantic", options: YES_NO, description: "In a romantic relationship" };

pub const NUMERIC_FIELDS: [NumericDomain; 7] =
    [AGE, MOTHER_EDUCATION, FATHER_EDUCATION, STUDY_TIME, FAILURES, HEALTH, ABSENCES];

pub const CATEGORICAL_FIELDS: [CategoricalDomain; 7] =
    [SEX, ADDRESS, FAMILY_SIZE, SCHOOL_SUPPORT, FAMILY_SUPPORT, INTERNET, ROMANTIC];

/// Field catalogue served to front ends so they can build their forms.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureCatalogue {
    pub categorical_features: BTreeMap<&'static str, &'static [&'static str]>,
    pub numerical_features: BTreeMap<&'static str, NumericDomain>,
}

impl FeatureCatalogue {
    pub fn new() -> Self {
        Self {
            categorical_features: CATEGORICAL_FIELDS.iter().map(|d| (d.field, d.options)).collect(),
            numerical_features: NUMERIC_FIELDS.iter().map(|d| (d.field, *d)).collect(),
        }
    }
}

impl Default for FeatureCatalogue {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw student attributes as they arrive over the wire or from a CSV row.
///
/// Every field is optional so that absence can be reported as a
/// [`PredictorError::MissingField`] instead of a deserialization failure.
/// Convert with [`StudentRecord::try_from`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StudentRecordInput {
    pub age: Option<i64>,
    pub sex: Option<String>,
    pub address: Option<String>,
    pub famsize: Option<String>,
    #[serde(rename = "Medu")]
    pub medu: Option<i64>,
    #[serde(rename = "Fedu")]
    pub fedu: Option<i64>,
    pub studytime: Option<i64>,
    pub failures: Option<i64>,
    pub schoolsup: Option<String>,
    pub famsup: Option<String>,
    pub internet: Option<String>,
    pub romantic: Option<String>,
    pub health: Option<i64>,
    pub absences: Option<i64>,
}

/// A student record whose every field lies within its declared domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    age: u8,
    sex: Sex,
    address: Address,
    famsize: FamilySize,
    #[serde(rename = "Medu")]
    mother_education: u8,
    #[serde(rename = "Fedu")]
    father_education: u8,
    studytime: u8,
    failures: u8,
    #[serde(serialize_with = "yes_no")]
    schoolsup: bool,
    #[serde(serialize_with = "yes_no")]
    famsup: bool,
    #[serde(serialize_with = "yes_no")]
    internet: bool,
    #[serde(serialize_with = "yes_no")]
    romantic: bool,
    health: u8,
    absences: u8,
}

impl TryFrom<StudentRecordInput> for StudentRecord {
    type Error = PredictorError;

    fn try_from(input: StudentRecordInput) -> Result<Self> {
        Ok(StudentRecord {
            age: AGE.check(input.age)?,
            sex: SEX.check(input.sex.as_deref())?,
            address: ADDRESS.check(input.address.as_deref())?,
            famsize: FAMILY_SIZE.check(input.famsize.as_deref())?,
            mother_education: MOTHER_EDUCATION.check(input.medu)?,
            father_education: FATHER_EDUCATION.check(input.fedu)?,
            studytime: STUDY_TIME.check(input.studytime)?,
            failures: FAILURES.check(input.failures)?,
            schoolsup: SCHOOL_SUPPORT.check::<YesNo>(input.schoolsup.as_deref())?.0,
            famsup: FAMILY_SUPPORT.check::<YesNo>(input.famsup.as_deref())?.0,
            internet: INTERNET.check::<YesNo>(input.internet.as_deref())?.0,
            romantic: ROMANTIC.check::<YesNo>(input.romantic.as_deref())?.0,
            health: HEALTH.check(input.health)?,
            absences: ABSENCES.check(input.absences)?,
        })
    }
}

impl From<&StudentRecord> for StudentRecordInput {
    fn from(record: &StudentRecord) -> Self {
        let flag = |b: bool| Some(if b { "yes" } else { "no" }.to_string());
        let sex = match record.sex {
            Sex::Male => "M",
            Sex::Female => "F",
        };
        let address = match record.address {
            Address::Urban => "U",
            Address::Rural => "R",
        };
        let famsize = match record.famsize {
            FamilySize::AtMostThree => "LE3",
            FamilySize::MoreThanThree => "GT3",
        };

        StudentRecordInput {
            age: Some(record.age.into()),
            sex: Some(sex.to_string()),
            address: Some(address.to_string()),
            famsize: Some(famsize.to_string()),
            medu: Some(record.mother_education.into()),
            fedu: Some(record.father_education.into()),
            studytime: Some(record.studytime.into()),
            failures: Some(record.failures.into()),
            schoolsup: flag(record.schoolsup),
            famsup: flag(record.famsup),
            internet: flag(record.internet),
            romantic: flag(record.romantic),
            health: Some(record.health.into()),
            absences: Some(record.absences.into()),
        }
    }
}

impl StudentRecord {
    /// The example student used to prefill forms and for the `predict` default.
    pub fn sample() -> Self {
        StudentRecord {
            age: 17,
            sex: Sex::Female,
            address: Address::Urban,
            famsize: FamilySize::MoreThanThree,
            mother_education: 3,
            father_education: 2,
            studytime: 3,
            failures: 0,
            schoolsup: false,
            famsup: true,
            internet: true,
            romantic: false,
            health: 4,
            absences: 2,
        }
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn famsize(&self) -> FamilySize {
        self.famsize
    }

    pub fn mother_education(&self) -> u8 {
        self.mother_education
    }

    pub fn father_education(&self) -> u8 {
        self.father_education
    }

    pub fn studytime(&self) -> u8 {
        self.studytime
    }

    pub fn failures(&self) -> u8 {
        self.failures
    }

    pub fn school_support(&self) -> bool {
        self.schoolsup
    }

    pub fn family_support(&self) -> bool {
        self.famsup
    }

    pub fn internet(&self) -> bool {
        self.internet
    }

    pub fn romantic(&self) -> bool {
        self.romantic
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn absences(&self) -> u8 {
        self.absences
    }
}
