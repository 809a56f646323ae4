use crate::utils::error::{DesignError, Result};
use serde::Serialize;

/// Ordered subject identifiers. Order defines the row order of every matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectList {
    subjects: Vec<String>,
}

impl SubjectList {
    pub fn new(subjects: Vec<String>) -> Self {
        Self { subjects }
    }

    /// One identifier per line. Blank lines are kept as subjects; only the
    /// line terminator is removed.
    pub fn parse(text: &str) -> Self {
        Self {
            subjects: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.subjects
    }
}

impl FromIterator<String> for SubjectList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A named 0/1 column, positionally aligned with a [`SubjectList`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorVector {
    name: String,
    values: Vec<u8>,
}

impl IndicatorVector {
    pub fn from_predicate<F>(name: &str, subjects: &SubjectList, predicate: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        Self {
            name: name.to_string(),
            values: subjects.iter().map(|s| u8::from(predicate(s))).collect(),
        }
    }

    pub fn from_values(name: &str, values: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            values: values.into_iter().map(|v| u8::from(v != 0)).collect(),
        }
    }

    /// Elementwise product, i.e. logical AND of two indicators.
    pub fn product(&self, other: &IndicatorVector, name: &str) -> Result<IndicatorVector> {
        if self.len() != other.len() {
            return Err(DesignError::LengthMismatch {
                name: other.name.clone(),
                expected: self.len(),
                found: other.len(),
            });
        }

        Ok(IndicatorVector {
            name: name.to_string(),
            values: self
                .values
                .iter()
                .zip(&other.values)
                .map(|(a, b)| a * b)
                .collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn count_ones(&self) -> usize {
        self.values.iter().filter(|&&v| v == 1).count()
    }
}

/// The columns of one design matrix. All columns have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplanatoryVariableSet {
    evs: Vec<IndicatorVector>,
}

impl ExplanatoryVariableSet {
    pub fn new(evs: Vec<IndicatorVector>) -> Result<Self> {
        if let Some(first) = evs.first() {
            let expected = first.len();
            if let Some(bad) = evs.iter().find(|ev| ev.len() != expected) {
                return Err(DesignError::LengthMismatch {
                    name: bad.name().to_string(),
                    expected,
                    found: bad.len(),
                });
            }
        }
        Ok(Self { evs })
    }

    pub fn num_waves(&self) -> usize {
        self.evs.len()
    }

    pub fn num_points(&self) -> usize {
        self.evs.first().map_or(0, IndicatorVector::len)
    }

    pub fn evs(&self) -> &[IndicatorVector] {
        &self.evs
    }

    pub fn names(&self) -> Vec<&str> {
        self.evs.iter().map(IndicatorVector::name).collect()
    }

    /// Transposed view: one row per subject, one value per EV.
    pub fn rows(&self) -> impl Iterator<Item = Vec<u8>> + '_ {
        (0..self.num_points()).map(move |i| self.evs.iter().map(|ev| ev.values()[i]).collect())
    }
}

const PAIRWISE_CONTRASTS: &[&[i8]] = &[&[1, -1], &[-1, 1]];

const TWO_BY_TWO_CONTRASTS: &[&[i8]] = &[
    &[1, 1, -1, -1],
    &[1, -1, 1, -1],
    &[1, -1, -1, 1],
    &[-1, 1, 1, -1],
];

const TWO_BY_TWO_FTESTS: &[&[i8]] = &[&[1, 0, 0, 0], &[0, 1, 0, 0], &[0, 0, 1, 0]];

/// Contrast layout selected by the number of EVs in a design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "scheme")]
pub enum DesignScheme {
    /// Two groups: A > B and B > A.
    Pairwise,
    /// Four cells of a 2x2 factorial, with an omnibus F-test over the first
    /// three contrasts.
    TwoByTwo,
    /// No contrast table exists for this many EVs; only the matrix is written.
    Unsupported { ev_count: usize },
}

impl DesignScheme {
    pub fn from_ev_count(ev_count: usize) -> Self {
        match ev_count {
            2 => DesignScheme::Pairwise,
            4 => DesignScheme::TwoByTwo,
            _ => DesignScheme::Unsupported { ev_count },
        }
    }

    pub fn num_waves(&self) -> usize {
        match self {
            DesignScheme::Pairwise => 2,
            DesignScheme::TwoByTwo => 4,
            DesignScheme::Unsupported { ev_count } => *ev_count,
        }
    }

    pub fn contrasts(&self) -> Option<&'static [&'static [i8]]> {
        match self {
            DesignScheme::Pairwise => Some(PAIRWISE_CONTRASTS),
            DesignScheme::TwoByTwo => Some(TWO_BY_TWO_CONTRASTS),
            DesignScheme::Unsupported { .. } => None,
        }
    }

    pub fn ftests(&self) -> Option<&'static [&'static [i8]]> {
        match self {
            DesignScheme::TwoByTwo => Some(TWO_BY_TWO_FTESTS),
            DesignScheme::Pairwise | DesignScheme::Unsupported { .. } => None,
        }
    }
}

/// A labelled EV set. The label is the stem of every file written for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Design {
    label: String,
    evs: ExplanatoryVariableSet,
    scheme: DesignScheme,
}

impl Design {
    pub fn new(label: &str, evs: ExplanatoryVariableSet) -> Self {
        let scheme = DesignScheme::from_ev_count(evs.num_waves());
        Self {
            label: label.to_string(),
            evs,
            scheme,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn evs(&self) -> &ExplanatoryVariableSet {
        &self.evs
    }

    pub fn scheme(&self) -> DesignScheme {
        self.scheme
    }

    pub fn matrix_file(&self) -> String {
        format!("{}.mat", self.label)
    }

    pub fn contrast_file(&self) -> String {
        format!("{}.con", self.label)
    }

    pub fn ftest_file(&self) -> String {
        format!("{}.fts", self.label)
    }

    /// Every file this design produces, in write order.
    pub fn file_names(&self) -> Vec<String> {
        let mut files = vec![self.matrix_file()];
        if self.scheme.contrasts().is_some() {
            files.push(self.contrast_file());
        }
        if self.scheme.ftests().is_some() {
            files.push(self.ftest_file());
        }
        files
    }
}
