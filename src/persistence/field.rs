//! Coefficient Fields for Boundary Reduction
//!
//! Persistence is computed over a field. The field is chosen once, as a
//! closed enum, and the reduction is then monomorphized over the field's
//! arithmetic:
//!
//! - `Rational`: characteristic 0, exact `BigRational` arithmetic
//! - `FiniteField(p)`: ℤ/pℤ for a prime p
//!
//! Barcodes of simplicial complexes can differ between fields when the
//! complex carries torsion (e.g. ℝP² has an H₁ class over 𝔽₂ that vanishes
//! over ℚ).

use std::fmt::Debug;

use num_rational::BigRational;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TdaError};

/// Field arithmetic used by the reduction
pub trait Field: Send + Sync {
    type Element: Clone + Debug + PartialEq + Send + Sync;

    fn zero(&self) -> Self::Element;
    fn one(&self) -> Self::Element;
    fn from_i64(&self, value: i64) -> Self::Element;
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    fn neg(&self, a: &Self::Element) -> Self::Element;
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;
    /// Multiplicative inverse; `a` must be nonzero
    fn inv(&self, a: &Self::Element) -> Self::Element;
    fn is_zero(&self, a: &Self::Element) -> bool;
}

/// Exact rational numbers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RationalField;

impl Field for RationalField {
    type Element = BigRational;

    fn zero(&self) -> BigRational {
        BigRational::zero()
    }

    fn one(&self) -> BigRational {
        BigRational::one()
    }

    fn from_i64(&self, value: i64) -> BigRational {
        BigRational::from_integer(value.into())
    }

    fn add(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a + b
    }

    fn neg(&self, a: &BigRational) -> BigRational {
        -a.clone()
    }

    fn mul(&self, a: &BigRational, b: &BigRational) -> BigRational {
        a * b
    }

    fn inv(&self, a: &BigRational) -> BigRational {
        a.recip()
    }

    fn is_zero(&self, a: &BigRational) -> bool {
        a.is_zero()
    }
}

/// Integers modulo a prime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeField {
    p: u64,
}

impl PrimeField {
    /// Create ℤ/pℤ; fails with `InvalidParameter` unless `p` is prime
    pub fn new(p: u64) -> Result<Self> {
        if !is_prime(p) {
            return Err(TdaError::invalid(
                "characteristic",
                format!("{p} is not a prime modulus"),
            ));
        }
        Ok(Self { p })
    }

    /// The prime `p`
    pub fn modulus(&self) -> u64 {
        self.p
    }

    fn pow(&self, base: u64, mut exp: u64) -> u64 {
        let p = u128::from(self.p);
        let mut acc: u128 = 1;
        let mut b = u128::from(base % self.p);
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc * b % p;
            }
            b = b * b % p;
            exp >>= 1;
        }
        acc as u64
    }
}

impl Field for PrimeField {
    type Element = u64;

    fn zero(&self) -> u64 {
        0
    }

    fn one(&self) -> u64 {
        1 % self.p
    }

    fn from_i64(&self, value: i64) -> u64 {
        // moduli above i64::MAX do not fit an i64 remainder
        let residue = value.unsigned_abs() % self.p;
        if value < 0 && residue != 0 {
            self.p - residue
        } else {
            residue
        }
    }

    fn add(&self, a: &u64, b: &u64) -> u64 {
        ((u128::from(*a) + u128::from(*b)) % u128::from(self.p)) as u64
    }

    fn neg(&self, a: &u64) -> u64 {
        if *a == 0 {
            0
        } else {
            self.p - a
        }
    }

    fn mul(&self, a: &u64, b: &u64) -> u64 {
        (u128::from(*a) * u128::from(*b) % u128::from(self.p)) as u64
    }

    fn inv(&self, a: &u64) -> u64 {
        // Fermat: a^(p-2) = a⁻¹ mod p
        self.pow(*a, self.p - 2)
    }

    fn is_zero(&self, a: &u64) -> bool {
        *a == 0
    }
}

/// Coefficient field selected once at pipeline start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "modulus", rename_all = "snake_case")]
pub enum CoefficientField {
    /// Characteristic 0
    #[default]
    Rational,
    /// ℤ/pℤ; the modulus is checked for primality when used
    FiniteField(u64),
}

impl CoefficientField {
    /// Map a characteristic (0 or a prime) to a field
    pub fn from_characteristic(characteristic: u64) -> Result<Self> {
        let field = match characteristic {
            0 => CoefficientField::Rational,
            p => CoefficientField::FiniteField(p),
        };
        field.validate()?;
        Ok(field)
    }

    /// Characteristic of the field
    pub fn characteristic(&self) -> u64 {
        match self {
            CoefficientField::Rational => 0,
            CoefficientField::FiniteField(p) => *p,
        }
    }

    /// Fail with `InvalidParameter` for a non-prime modulus
    pub fn validate(&self) -> Result<()> {
        match self {
            CoefficientField::Rational => Ok(()),
            CoefficientField::FiniteField(p) => PrimeField::new(*p).map(|_| ()),
        }
    }
}

/// Deterministic trial division; moduli are small in practice
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5u64;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}
