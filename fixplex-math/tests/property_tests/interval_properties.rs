//! Property-based tests for cyclic intervals
//!
//! Tests:
//! - Membership agrees with walking the interval from `lo`
//! - Repair targets are members
//! - Distances are zero exactly for members

use fixplex_math::{ModInterval, Word8};
use num_traits::{One, Zero};
use proptest::prelude::*;

fn w(v: u8) -> Word8 {
    Word8::new(v as u64)
}

proptest! {
    /// A value is a member iff it is reached within `size` steps from `lo`
    #[test]
    fn contains_matches_walk(lo in any::<u8>(), hi in any::<u8>(), v in any::<u8>()) {
        let iv = ModInterval::new(w(lo), w(hi));
        let expected = lo == hi || (v.wrapping_sub(lo) < hi.wrapping_sub(lo));
        prop_assert_eq!(iv.contains(w(v)), expected);
    }

    /// The repair target of a non-member is a member bound
    #[test]
    fn repair_target_is_member(lo in any::<u8>(), hi in any::<u8>(), v in any::<u8>()) {
        prop_assume!(lo != hi);
        let iv = ModInterval::new(w(lo), w(hi));
        prop_assume!(!iv.contains(w(v)));
        let target = iv.repair_target(w(v));
        prop_assert!(iv.contains(target));
        prop_assert!(target == iv.lo || target == iv.hi - Word8::one());
    }

    /// Distance vanishes exactly on members
    #[test]
    fn distance_zero_iff_member(lo in any::<u8>(), hi in any::<u8>(), v in any::<u8>()) {
        let iv = ModInterval::new(w(lo), w(hi));
        prop_assert_eq!(iv.distance(w(v)).is_zero(), iv.contains(w(v)));
    }

    /// Size counts the members
    #[test]
    fn size_counts_members(lo in any::<u8>(), hi in any::<u8>()) {
        prop_assume!(lo != hi);
        let iv = ModInterval::new(w(lo), w(hi));
        let members = (0..=255u8).filter(|&v| iv.contains(w(v))).count();
        prop_assert_eq!(members as u64, iv.size().get());
    }
}
