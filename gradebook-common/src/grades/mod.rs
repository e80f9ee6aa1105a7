//! Grade records and their normalization
//!
//! A stored grade record is a JSON array `[term1, term2, term3, makeup]`.
//! [`GradeTuple::normalize`] is the single place where malformed records
//! are coerced to the all-zero default.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::{Error, Result};

mod calculator;

pub use calculator::{calculate, GradeSummary, Status, PASSING_AVERAGE};

/// Selects one slot of a [`GradeTuple`]
///
/// Parses from either the wire names (`n1`, `n2`, `n3`, `rec`) or the
/// descriptive names (`term1`, `term2`, `term3`, `makeup`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeField {
    Term1,
    Term2,
    Term3,
    Makeup,
}

impl GradeField {
    pub const ALL: [GradeField; 4] = [
        GradeField::Term1,
        GradeField::Term2,
        GradeField::Term3,
        GradeField::Makeup,
    ];

    /// Key used for this slot in the compiled view
    pub fn wire_name(&self) -> &'static str {
        match self {
            GradeField::Term1 => "n1",
            GradeField::Term2 => "n2",
            GradeField::Term3 => "n3",
            GradeField::Makeup => "rec",
        }
    }

    fn index(&self) -> usize {
        match self {
            GradeField::Term1 => 0,
            GradeField::Term2 => 1,
            GradeField::Term3 => 2,
            GradeField::Makeup => 3,
        }
    }
}

impl FromStr for GradeField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "n1" | "term1" => Ok(GradeField::Term1),
            "n2" | "term2" => Ok(GradeField::Term2),
            "n3" | "term3" => Ok(GradeField::Term3),
            "rec" | "makeup" => Ok(GradeField::Makeup),
            other => Err(Error::InvalidField(other.to_string())),
        }
    }
}

impl fmt::Display for GradeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Normalized grade record: three term grades plus the makeup grade
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradeTuple {
    values: [f64; 4],
}

impl GradeTuple {
    pub const ZERO: GradeTuple = GradeTuple { values: [0.0; 4] };

    pub fn new(term1: f64, term2: f64, term3: f64, makeup: f64) -> Self {
        Self {
            values: [term1, term2, term3, makeup],
        }
    }

    /// Coerce a raw grade store entry into a tuple
    ///
    /// - absent entry or non-array value: all zeros
    /// - short arrays are padded with `0.0`, long arrays truncated to 4
    /// - any remaining element that is not a number (or a string holding
    ///   one) resets the whole tuple to zero
    pub fn normalize(raw: Option<&Value>) -> Self {
        let items = match raw {
            None => return Self::ZERO,
            Some(Value::Array(items)) => items,
            Some(other) => {
                warn!("Grade record is not a list, resetting to zero: {}", other);
                return Self::ZERO;
            }
        };

        let mut values = [0.0; 4];
        for (slot, item) in values.iter_mut().zip(items.iter()) {
            match coerce_element(item) {
                Some(v) => *slot = v,
                None => {
                    warn!("Grade record has non-numeric element {}, resetting to zero", item);
                    return Self::ZERO;
                }
            }
        }
        Self { values }
    }

    pub fn get(&self, field: GradeField) -> f64 {
        self.values[field.index()]
    }

    pub fn set(&mut self, field: GradeField, value: f64) {
        self.values[field.index()] = value;
    }

    pub fn term1(&self) -> f64 {
        self.values[0]
    }

    pub fn term2(&self) -> f64 {
        self.values[1]
    }

    pub fn term3(&self) -> f64 {
        self.values[2]
    }

    pub fn makeup(&self) -> f64 {
        self.values[3]
    }

    pub fn as_array(&self) -> [f64; 4] {
        self.values
    }

    /// Run the status calculator over this tuple
    pub fn summary(&self) -> GradeSummary {
        calculate(self.term1(), self.term2(), self.term3(), self.makeup())
    }

    /// Storage representation: a 4-element JSON array of floats
    pub fn to_json(&self) -> Value {
        Value::Array(self.values.iter().map(|&v| Value::from(v)).collect())
    }
}

fn coerce_element(item: &Value) -> Option<f64> {
    let value = match item {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}
