//! Property-based tests for fixed-width numerals
//!
//! Tests:
//! - Ring operations agree with `u64` arithmetic modulo `2^w`
//! - Signed helpers detect exactly the overflowing cases
//! - Exact division inverts multiplication

use fixplex_math::{Numeral, Word8, Word16, Word64};
use num_traits::{One, Zero};
use proptest::prelude::*;

proptest! {
    /// Addition and multiplication wrap like masked u64 arithmetic
    #[test]
    fn ring_ops_match_u64(a in any::<u16>(), b in any::<u16>()) {
        let (x, y) = (Word8::new(a as u64), Word8::new(b as u64));
        prop_assert_eq!((x + y).get(), (a as u64).wrapping_add(b as u64) & 0xff);
        prop_assert_eq!((x * y).get(), (a as u64).wrapping_mul(b as u64) & 0xff);
        prop_assert_eq!((x - y) + y, x);
        prop_assert_eq!(-x + x, Word8::zero());
    }

    /// Signed addition overflows exactly when i8 addition does
    #[test]
    fn signed_add_matches_i8(a in any::<i8>(), b in any::<i8>()) {
        let x = Word8::new(a as u8 as u64);
        let y = Word8::new(b as u8 as u64);
        let expected = a.checked_add(b).map(|s| Word8::new(s as u8 as u64));
        prop_assert_eq!(x.signed_add(y), expected);
    }

    /// Signed multiplication overflows exactly when i8 multiplication does
    #[test]
    fn signed_mul_matches_i8(a in any::<i8>(), b in any::<i8>()) {
        let x = Word8::new(a as u8 as u64);
        let y = Word8::new(b as u8 as u64);
        let expected = a.checked_mul(b).map(|p| Word8::new(p as u8 as u64));
        prop_assert_eq!(x.signed_mul(y), expected);
    }

    /// Odd values have inverses
    #[test]
    fn odd_values_invert(k in any::<u64>()) {
        let x = Word64::new(k | 1);
        let inv = x.inverse();
        prop_assert!(inv.is_some());
        prop_assert_eq!(x * inv.unwrap_or_default(), Word64::one());
        prop_assert_eq!(Word64::new(k & !1).inverse(), None);
    }

    /// Dividing a product by one factor recovers a solution
    #[test]
    fn div_exact_inverts_mul(a in any::<u16>(), b in 1u16..) {
        let (x, d) = (Word16::new(a as u64), Word16::new(b as u64));
        let product = x * d;
        let q = product.div_exact(d);
        prop_assert!(q.is_some());
        prop_assert_eq!(d * q.unwrap_or_default(), product);
    }

    /// Division fails exactly when the divisor has more trailing zeros
    #[test]
    fn div_exact_divisibility(r in any::<u16>(), d in 1u16..) {
        let (r, d) = (Word16::new(r as u64), Word16::new(d as u64));
        prop_assert_eq!(r.div_exact(d).is_some(), d.trailing_zeros() <= r.trailing_zeros());
    }
}
