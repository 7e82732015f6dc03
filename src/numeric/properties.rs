// ============================================================================
// Property Tests
// Algebraic laws checked over generated digit strings
// ============================================================================

use super::{digits, Decimal};
use crate::advanced::{gcf, lcm};
use proptest::prelude::*;
use std::cmp::Ordering;

/// Signed decimals with up to 12 integer and 8 fractional digits, possibly
/// carrying redundant zeros.
fn arb_text() -> impl Strategy<Value = String> {
    "-?0{0,2}[0-9]{1,12}(\\.[0-9]{1,8}0{0,2})?"
}

fn arb_decimal() -> impl Strategy<Value = Decimal> {
    arb_text().prop_map(|text| text.parse::<Decimal>().unwrap())
}

fn arb_nonzero() -> impl Strategy<Value = Decimal> {
    arb_decimal().prop_filter("non-zero divisor", |d| !d.is_zero())
}

proptest! {
    #[test]
    fn prop_normalize_idempotent(text in arb_text()) {
        let once = digits::normalize(&text).unwrap();
        prop_assert_eq!(digits::normalize(&once).unwrap(), once.clone());
        prop_assert!(digits::is_canonical(&once));
    }

    #[test]
    fn prop_canonical_display(text in arb_text()) {
        let canonical = digits::normalize(&text).unwrap();
        let value: Decimal = canonical.parse().unwrap();
        prop_assert_eq!(value.to_string(), canonical);
    }

    #[test]
    fn prop_additive_inverse(a in arb_decimal(), b in arb_decimal()) {
        let back = a.checked_add(&b).unwrap().checked_sub(&b).unwrap();
        prop_assert_eq!(back, a);
    }

    #[test]
    fn prop_multiplicative_inverse(a in arb_decimal(), b in arb_nonzero()) {
        let back = a.checked_mul(&b).unwrap().checked_div(&b).unwrap();
        prop_assert_eq!(back, a);
    }

    #[test]
    fn prop_comparison_total(a in arb_decimal(), b in arb_decimal()) {
        let symbols = a.compare_signs(&b);
        let held = [symbols.lt, symbols.eq, symbols.gt];
        prop_assert_eq!(held.iter().filter(|&&h| h).count(), 1);
    }

    #[test]
    fn prop_comparison_transitive(a in arb_decimal(), b in arb_decimal(), c in arb_decimal()) {
        let mut sorted = [a, b, c];
        sorted.sort();
        prop_assert!(sorted[0] <= sorted[1]);
        prop_assert!(sorted[1] <= sorted[2]);
        prop_assert!(sorted[0] <= sorted[2]);
    }

    #[test]
    fn prop_gcf_lcm_identity(a in 1u32..100_000, b in 1u32..100_000) {
        let (x, y) = (Decimal::from(a), Decimal::from(b));
        let operands = [x.clone(), y.clone()];
        let product = gcf(&operands).unwrap().checked_mul(&lcm(&operands).unwrap()).unwrap();
        prop_assert_eq!(product, x.checked_mul(&y).unwrap());
    }

    #[test]
    fn prop_division_terminates_at_precision(n in 1u64..1_000_000, precision in 1usize..40) {
        let one = Decimal::one().with_precision(precision);
        let quotient = one.checked_div(&Decimal::from(n)).unwrap();
        let fractional = quotient.as_str().split_once('.').map_or(0, |(_, f)| f.len());
        prop_assert!(fractional <= precision);
    }
}

#[test]
fn quickcheck_comparison_antisymmetric() {
    fn antisymmetric(a: i64, b: i64, scale: u8) -> bool {
        let shift = Decimal::from(10u64.pow(u32::from(scale % 6)));
        let x = Decimal::from(a).checked_div(&shift).unwrap();
        let y = Decimal::from(b).checked_div(&shift).unwrap();
        x.cmp(&y) == y.cmp(&x).reverse() && (x.cmp(&y) == Ordering::Equal) == (a == b)
    }
    quickcheck::quickcheck(antisymmetric as fn(i64, i64, u8) -> bool);
}
