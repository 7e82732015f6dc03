// ============================================================================
// Numeric Value Interface
// Common contract shared by decimals, fractions and their union
// ============================================================================

use crate::numeric::{Decimal, Fraction, Numeric, NumericResult, Relation, Symbols};
use std::fmt::Display;

/// Separator between type name and value in the tagged text form.
pub const TAG_SEPARATOR: &str = " -;- ";

/// Behaviour every numeric representation provides.
/// Implementations: Decimal, Fraction, Numeric.
pub trait NumericValue: Display + Send + Sync {
    /// Type name used by the tagged text form
    fn type_name(&self) -> &'static str;

    fn is_negative(&self) -> bool;

    /// Evaluate as a decimal
    fn to_decimal(&self) -> NumericResult<Decimal>;

    /// Exact fractional form
    fn to_fraction(&self) -> Fraction;

    /// Compare by value against any other numeric representation
    fn compare_signs(&self, other: &dyn NumericValue) -> NumericResult<Symbols> {
        Ok(self.to_decimal()?.compare_signs(&other.to_decimal()?))
    }

    /// Check a named relation, e.g. `a.relation(Relation::Lt, &b)`
    fn relation(&self, relation: Relation, other: &dyn NumericValue) -> NumericResult<bool> {
        Ok(self.compare_signs(other)?.holds(relation))
    }

    /// Serialized text form `"<TypeName> -;- <value>"`
    fn tagged(&self) -> String {
        format!("{}{}{}", self.type_name(), TAG_SEPARATOR, self)
    }
}

impl NumericValue for Decimal {
    fn type_name(&self) -> &'static str {
        "Decimal"
    }

    fn is_negative(&self) -> bool {
        Decimal::is_negative(self)
    }

    fn to_decimal(&self) -> NumericResult<Decimal> {
        Ok(self.clone())
    }

    fn to_fraction(&self) -> Fraction {
        Fraction::from_decimal(self)
    }
}

impl NumericValue for Fraction {
    fn type_name(&self) -> &'static str {
        "Fraction"
    }

    fn is_negative(&self) -> bool {
        Fraction::is_negative(self)
    }

    fn to_decimal(&self) -> NumericResult<Decimal> {
        Fraction::to_decimal(self)
    }

    fn to_fraction(&self) -> Fraction {
        self.clone()
    }
}

impl NumericValue for Numeric {
    fn type_name(&self) -> &'static str {
        match self {
            Numeric::Decimal(d) => d.type_name(),
            Numeric::Fraction(f) => f.type_name(),
        }
    }

    fn is_negative(&self) -> bool {
        Numeric::is_negative(self)
    }

    fn to_decimal(&self) -> NumericResult<Decimal> {
        Numeric::to_decimal(self)
    }

    fn to_fraction(&self) -> Fraction {
        Numeric::to_fraction(self)
    }
}
