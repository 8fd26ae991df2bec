//! Fixed-width unsigned numerals with wraparound arithmetic.
//!
//! All arithmetic is performed modulo `2^BITS`. Besides the ring operations,
//! the [`Numeral`] trait exposes the handful of number-theoretic helpers a
//! modular tableau needs: signed arithmetic with overflow signalling,
//! trailing-zero counts, inverses of odd values and exact division.
//!
//! ## Exact division
//!
//! Over `Z/2^w` a value `d` divides `r` iff `tz(d) <= tz(r)` (with
//! `tz(0) = w`). In that case `x = (r >> t) * inv(d >> t)` with `t = tz(d)`
//! satisfies `d * x == r`; it is one of the `2^t` solutions.

use num_traits::{Bounded, One, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub, Zero};
use std::fmt;
use std::hash::Hash;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Fixed-width unsigned integer arithmetic surface.
///
/// Identities and bounds come from [`Zero`], [`One`] and [`Bounded`];
/// `Bounded::max_value()` is `2^w - 1`.
pub trait Numeral:
    Copy
    + Eq
    + Ord
    + Hash
    + Default
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + Zero
    + One
    + Bounded
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + WrappingNeg
{
    /// Bit width `w`; values live in `[0, 2^w)`.
    const BITS: u32;

    /// Truncating conversion from `u64`.
    fn from_u64(value: u64) -> Self;

    /// The unsigned value.
    fn to_u64(self) -> u64;

    /// Two's complement interpretation of the value.
    fn to_signed(self) -> i128;

    /// Check if the value is odd (and therefore invertible).
    fn is_odd(self) -> bool {
        self.to_u64() & 1 == 1
    }

    /// Number of trailing zero bits; `BITS` for zero.
    fn trailing_zeros(self) -> u32 {
        if self.is_zero() {
            Self::BITS
        } else {
            self.to_u64().trailing_zeros()
        }
    }

    /// Check if the value is a power of two.
    fn is_power_of_two(self) -> bool {
        self.to_u64().is_power_of_two()
    }

    /// Logical right shift.
    fn shift_right(self, amount: u32) -> Self {
        if amount >= Self::BITS {
            Self::zero()
        } else {
            Self::from_u64(self.to_u64() >> amount)
        }
    }

    /// Signed addition; `None` on two's complement overflow.
    fn signed_add(self, other: Self) -> Option<Self> {
        Self::from_signed(self.to_signed() + other.to_signed())
    }

    /// Signed multiplication; `None` on two's complement overflow.
    fn signed_mul(self, other: Self) -> Option<Self> {
        Self::from_signed(self.to_signed() * other.to_signed())
    }

    /// Convert a signed value if it is representable in `BITS` bits.
    fn from_signed(value: i128) -> Option<Self> {
        let half = 1i128 << (Self::BITS - 1);
        if value < -half || value >= half {
            return None;
        }
        // Two's complement truncation.
        Some(Self::from_u64(value as u64))
    }

    /// Multiplicative inverse modulo `2^w`; only odd values are invertible.
    fn inverse(self) -> Option<Self> {
        if !self.is_odd() {
            return None;
        }
        // Newton iteration doubles the number of correct low bits each step;
        // `a * a == 1 (mod 8)` holds for every odd `a`.
        let a = self.to_u64();
        let mut x = a;
        for _ in 0..5 {
            x = x.wrapping_mul(2u64.wrapping_sub(a.wrapping_mul(x)));
        }
        Some(Self::from_u64(x))
    }

    /// Find `x` with `divisor * x == self`, if one exists.
    fn div_exact(self, divisor: Self) -> Option<Self> {
        if divisor.is_zero() {
            return if self.is_zero() { Some(Self::zero()) } else { None };
        }
        let tz = divisor.trailing_zeros();
        if self.trailing_zeros() < tz {
            return None;
        }
        let odd = divisor.shift_right(tz).inverse()?;
        Some(self.shift_right(tz) * odd)
    }

    /// Check if `divisor` divides `self` modulo `2^w`.
    fn is_divisible_by(self, divisor: Self) -> bool {
        self.div_exact(divisor).is_some()
    }
}

/// A `W`-bit unsigned word, `1 <= W <= 64`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Word<const W: u32>(u64);

/// 4-bit word, convenient for exhaustive tests.
pub type Word4 = Word<4>;
/// 8-bit word.
pub type Word8 = Word<8>;
/// 16-bit word.
pub type Word16 = Word<16>;
/// 32-bit word.
pub type Word32 = Word<32>;
/// 64-bit word.
pub type Word64 = Word<64>;

impl<const W: u32> Word<W> {
    const VALID_WIDTH: () = assert!(W >= 1 && W <= 64, "word width must be in 1..=64");

    /// Mask selecting the low `W` bits.
    pub const MASK: u64 = u64::MAX >> (64 - W);

    /// Create a word, truncating `value` to `W` bits.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_WIDTH;
        Self(value & Self::MASK)
    }

    /// The unsigned value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl<const W: u32> From<u64> for Word<W> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<const W: u32> Numeral for Word<W> {
    const BITS: u32 = W;

    fn from_u64(value: u64) -> Self {
        Self::new(value)
    }

    fn to_u64(self) -> u64 {
        self.0
    }

    fn to_signed(self) -> i128 {
        let value = i128::from(self.0);
        if value >= 1i128 << (W - 1) {
            value - (1i128 << W)
        } else {
            value
        }
    }
}

impl<const W: u32> Zero for Word<W> {
    fn zero() -> Self {
        Self::new(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const W: u32> One for Word<W> {
    fn one() -> Self {
        Self::new(1)
    }
}

impl<const W: u32> Bounded for Word<W> {
    fn min_value() -> Self {
        Self::new(0)
    }

    fn max_value() -> Self {
        Self::new(Self::MASK)
    }
}

impl<const W: u32> WrappingAdd for Word<W> {
    fn wrapping_add(&self, rhs: &Self) -> Self {
        Self::new(self.0.wrapping_add(rhs.0))
    }
}

impl<const W: u32> WrappingSub for Word<W> {
    fn wrapping_sub(&self, rhs: &Self) -> Self {
        Self::new(self.0.wrapping_sub(rhs.0))
    }
}

impl<const W: u32> WrappingMul for Word<W> {
    fn wrapping_mul(&self, rhs: &Self) -> Self {
        Self::new(self.0.wrapping_mul(rhs.0))
    }
}

impl<const W: u32> WrappingNeg for Word<W> {
    fn wrapping_neg(&self) -> Self {
        Self::new(self.0.wrapping_neg())
    }
}

// Word arithmetic is modular, so the operators are the wrapping ones.
impl<const W: u32> Add for Word<W> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(&rhs)
    }
}

impl<const W: u32> Sub for Word<W> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(&rhs)
    }
}

impl<const W: u32> Mul for Word<W> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(&rhs)
    }
}

impl<const W: u32> Neg for Word<W> {
    type Output = Self;

    fn neg(self) -> Self {
        self.wrapping_neg()
    }
}

impl<const W: u32> AddAssign for Word<W> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const W: u32> SubAssign for Word<W> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const W: u32> MulAssign for Word<W> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const W: u32> fmt::Debug for Word<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}u{}", self.0, W)
    }
}

impl<const W: u32> fmt::Display for Word<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
