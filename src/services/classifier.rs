// src/services/classifier.rs

//! Project-name heuristics.
//!
//! Two independent rules:
//! - [`classify`]: any decimal digit in the name makes it a solution.
//! - [`extract_solution_number`]: the name must carry exactly one number.
//!
//! Digits are Unicode decimal digits (`\d`, general category Nd), so `١٢`
//! counts as well as `12`.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit-run pattern is valid"));

static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("digit pattern is valid"));

/// Submission category derived from the project name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Problem,
    Solution,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Problem => write!(f, "problem"),
            Category::Solution => write!(f, "solution"),
        }
    }
}

/// Why a project name yields no single solution number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationAmbiguity {
    #[error("project name '{0}' contains no number")]
    NoNumber(String),

    #[error("project name '{name}' contains {count} distinct numbers")]
    MultipleNumbers { name: String, count: usize },

    #[error("number '{digits}' in project name '{name}' is out of range")]
    Unparseable { name: String, digits: String },
}

/// Classify a submission by its project name.
pub fn classify(project_name: &str) -> Category {
    if DIGIT_RUN.is_match(project_name) {
        Category::Solution
    } else {
        Category::Problem
    }
}

/// Extract the single problem number a project name refers to.
///
/// Runs with the same numeric value (e.g. `12` and `012`) count once.
pub fn extract_solution_number(project_name: &str) -> Result<u64, ClassificationAmbiguity> {
    let mut numbers = BTreeSet::new();
    for run in DIGIT_RUN.find_iter(project_name) {
        let value = parse_digits(run.as_str()).ok_or_else(|| {
            ClassificationAmbiguity::Unparseable {
                name: project_name.to_string(),
                digits: run.as_str().to_string(),
            }
        })?;
        numbers.insert(value);
    }

    let mut values = numbers.into_iter();
    match (values.next(), values.len()) {
        (None, _) => Err(ClassificationAmbiguity::NoNumber(project_name.to_string())),
        (Some(value), 0) => Ok(value),
        (Some(_), rest) => Err(ClassificationAmbiguity::MultipleNumbers {
            name: project_name.to_string(),
            count: rest + 1,
        }),
    }
}

/// Value of a run of decimal digits from any script, `None` on overflow.
fn parse_digits(digits: &str) -> Option<u64> {
    digits.chars().try_fold(0u64, |acc, c| {
        acc.checked_mul(10)?.checked_add(u64::from(digit_value(c)))
    })
}

fn is_decimal_digit(c: char) -> bool {
    DIGIT.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Nd digits are encoded in contiguous blocks of ten, zero first, so the
/// value is the distance from the start of the block modulo ten.
fn digit_value(c: char) -> u32 {
    if let Some(value) = c.to_digit(10) {
        return value;
    }
    let mut offset = 0;
    let mut code = c as u32;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        code -= 1;
    }
    offset % 10
}
