use crate::core::{IndicatorVector, SubjectList};
use crate::utils::error::Result;
use crate::utils::validation::{validate_distinct, validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};

/// Substrings that place a subject in a group.
///
/// Factor markers match anywhere in the identifier; condition markers only
/// match as a suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub factor_a: String,
    pub factor_b: String,
    pub condition_x_suffix: String,
    pub condition_y_suffix: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            factor_a: "A".to_string(),
            factor_b: "B".to_string(),
            condition_x_suffix: "1".to_string(),
            condition_y_suffix: "2".to_string(),
        }
    }
}

impl Validate for Markers {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("markers.factor_a", &self.factor_a)?;
        validate_non_empty_string("markers.factor_b", &self.factor_b)?;
        validate_non_empty_string("markers.condition_x_suffix", &self.condition_x_suffix)?;
        validate_non_empty_string("markers.condition_y_suffix", &self.condition_y_suffix)?;
        validate_distinct("markers.factor_b", &self.factor_a, &self.factor_b)?;
        validate_distinct(
            "markers.condition_y_suffix",
            &self.condition_x_suffix,
            &self.condition_y_suffix,
        )?;
        Ok(())
    }
}

/// Subjects whose membership in a mutually exclusive pair is not exactly one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AmbiguousSubjects {
    pub both_factors: Vec<String>,
    pub no_factor: Vec<String>,
    pub both_conditions: Vec<String>,
    pub no_condition: Vec<String>,
}

impl AmbiguousSubjects {
    pub fn is_empty(&self) -> bool {
        self.both_factors.is_empty()
            && self.no_factor.is_empty()
            && self.both_conditions.is_empty()
            && self.no_condition.is_empty()
    }
}

/// The eight indicators of the 2x2 (genotype x condition) study layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSet {
    pub ll: IndicatorVector,
    pub ss: IndicatorVector,
    pub ca: IndicatorVector,
    pub no_ca: IndicatorVector,
    pub ll_ca: IndicatorVector,
    pub ll_no_ca: IndicatorVector,
    pub ss_ca: IndicatorVector,
    pub ss_no_ca: IndicatorVector,
}

impl IndicatorSet {
    pub fn derive(subjects: &SubjectList, markers: &Markers) -> Result<Self> {
        let ll = IndicatorVector::from_predicate("LL", subjects, |s| s.contains(&markers.factor_a));
        let ss = IndicatorVector::from_predicate("SS", subjects, |s| s.contains(&markers.factor_b));
        let ca = IndicatorVector::from_predicate("CA", subjects, |s| {
            s.ends_with(&markers.condition_x_suffix)
        });
        let no_ca = IndicatorVector::from_predicate("NoCA", subjects, |s| {
            s.ends_with(&markers.condition_y_suffix)
        });

        let ll_ca = ll.product(&ca, "LLCA")?;
        let ll_no_ca = ll.product(&no_ca, "LLNoCA")?;
        let ss_ca = ss.product(&ca, "SSCA")?;
        let ss_no_ca = ss.product(&no_ca, "SSNoCA")?;

        tracing::debug!(
            "Derived indicators: LL={}, SS={}, CA={}, NoCA={}",
            ll.count_ones(),
            ss.count_ones(),
            ca.count_ones(),
            no_ca.count_ones()
        );

        Ok(Self {
            ll,
            ss,
            ca,
            no_ca,
            ll_ca,
            ll_no_ca,
            ss_ca,
            ss_no_ca,
        })
    }

    /// All eight indicators in table column order.
    pub fn all(&self) -> [&IndicatorVector; 8] {
        [
            &self.ll,
            &self.ss,
            &self.ca,
            &self.no_ca,
            &self.ll_ca,
            &self.ll_no_ca,
            &self.ss_ca,
            &self.ss_no_ca,
        ]
    }

    /// Membership is not checked during derivation; this only reports it.
    pub fn ambiguous_subjects(&self, subjects: &SubjectList) -> AmbiguousSubjects {
        let mut report = AmbiguousSubjects::default();

        for (i, subject) in subjects.iter().enumerate() {
            match self.ll.values()[i] + self.ss.values()[i] {
                0 => report.no_factor.push(subject.to_string()),
                2 => report.both_factors.push(subject.to_string()),
                _ => {}
            }
            match self.ca.values()[i] + self.no_ca.values()[i] {
                0 => report.no_condition.push(subject.to_string()),
                2 => report.both_conditions.push(subject.to_string()),
                _ => {}
            }
        }

        report
    }
}
