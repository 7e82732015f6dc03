// ============================================================================
// Comparison Primitive
// Sign-aware ordering of canonical digit strings
// ============================================================================

use super::errors::{NumericError, NumericResult};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// All six relations between two values, computed in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbols {
    pub eq: bool,
    pub ne: bool,
    pub lt: bool,
    pub le: bool,
    pub gt: bool,
    pub ge: bool,
}

impl Symbols {
    pub fn from_ordering(ordering: Ordering) -> Self {
        Self {
            eq: ordering == Ordering::Equal,
            ne: ordering != Ordering::Equal,
            lt: ordering == Ordering::Less,
            le: ordering != Ordering::Greater,
            gt: ordering == Ordering::Greater,
            ge: ordering != Ordering::Less,
        }
    }

    pub fn ordering(&self) -> Ordering {
        if self.lt {
            Ordering::Less
        } else if self.gt {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Check a single relation.
    pub fn holds(&self, relation: Relation) -> bool {
        match relation {
            Relation::Eq => self.eq,
            Relation::Ne => self.ne,
            Relation::Lt => self.lt,
            Relation::Le => self.le,
            Relation::Gt => self.gt,
            Relation::Ge => self.ge,
        }
    }
}

/// A named comparison relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl FromStr for Relation {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equals" | "equal" | "eq" => Ok(Relation::Eq),
            "not equals" | "not equal" | "ne" => Ok(Relation::Ne),
            "less than" | "lt" => Ok(Relation::Lt),
            "less than or equals" | "less than or equal" | "le" => Ok(Relation::Le),
            "greater than" | "gt" => Ok(Relation::Gt),
            "greater than or equals" | "greater than or equal" | "ge" => Ok(Relation::Ge),
            other => Err(NumericError::out_of_range(format!(
                "unknown comparison `{}`",
                other
            ))),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Relation::Eq => "eq",
            Relation::Ne => "ne",
            Relation::Lt => "lt",
            Relation::Le => "le",
            Relation::Gt => "gt",
            Relation::Ge => "ge",
        };
        f.write_str(name)
    }
}

/// Order two canonical digit strings.
///
/// Sign decides first. Between same-signed values a longer integer part
/// wins (inverted when both are negative); otherwise digits are compared
/// left to right, the shorter operand padded with zeros.
pub fn compare_canonical(a: &str, b: &str) -> Ordering {
    let (a_neg, a_abs) = split_negative(a);
    let (b_neg, b_abs) = split_negative(b);

    match (a_neg, b_neg) {
        (false, true) => Ordering::Greater,
        (true, false) => Ordering::Less,
        (false, false) => compare_unsigned(a_abs, b_abs),
        (true, true) => compare_unsigned(b_abs, a_abs),
    }
}

/// `NumericResult`-returning relation check on raw text, normalizing both
/// sides first.
pub fn relation_holds(a: &str, relation: Relation, b: &str) -> NumericResult<bool> {
    let a = super::digits::normalize(a)?;
    let b = super::digits::normalize(b)?;
    Ok(Symbols::from_ordering(compare_canonical(&a, &b)).holds(relation))
}

fn split_negative(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    }
}

fn compare_unsigned(a: &str, b: &str) -> Ordering {
    let a_int = a.find('.').unwrap_or(a.len());
    let b_int = b.find('.').unwrap_or(b.len());
    if a_int != b_int {
        return a_int.cmp(&b_int);
    }

    let (a, b) = (a.as_bytes(), b.as_bytes());
    for i in 0..a.len().max(b.len()) {
        match (a.get(i), b.get(i)) {
            (Some(x), Some(y)) if x == y => continue,
            // a point reached first means the other side still has digits
            (Some(b'.'), Some(_)) => return Ordering::Less,
            (Some(_), Some(b'.')) => return Ordering::Greater,
            (Some(x), Some(y)) => return x.cmp(y),
            // no trailing zeros, so leftover digits are significant
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => break,
        }
    }

    Ordering::Equal
}
