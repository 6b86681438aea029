// src/noyau/exposant.rs
//
// Exposant décimal exact et mise à l'échelle par puissances de dix, sans flottants.
//
// On avance par paquets de 10^9 puis par 10 : même résultat exact qu'une boucle ×/÷10,
// mais beaucoup moins d'opérations sur les grands entiers quand l'exposant est grand.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use tracing::trace;

const PAS_MILLIARD: i64 = 9;

pub fn pow10(n: usize) -> BigInt {
    num_traits::pow(BigInt::from(10), n)
}

fn dix() -> BigRational {
    BigRational::from_integer(BigInt::from(10))
}

fn milliard() -> BigRational {
    BigRational::from_integer(BigInt::from(1_000_000_000u32))
}

/// Exposant e tel que 10^e <= x < 10^(e+1). Exige x > 0.
///
/// Si x < 1 on travaille sur 1/x (on ne cherche que vers le haut) puis on corrige :
/// 1/x = 10^k exactement donne -k, sinon -(k+1).
pub fn rat_exponent(x: &BigRational) -> i64 {
    debug_assert!(x.is_positive(), "rat_exponent: x doit être > 0");

    let inverse = x.numer() < x.denom();
    let mut y = if inverse { x.recip() } else { x.clone() };

    let milliard = milliard();
    let dix = dix();
    let mut e: i64 = 0;
    let mut tours = 0usize;

    while y >= milliard {
        e += PAS_MILLIARD;
        y /= &milliard;
        tours += 1;
    }
    while y >= dix {
        e += 1;
        y /= &dix;
        tours += 1;
    }

    let e = match (inverse, y.is_one()) {
        (false, _) => e,
        (true, true) => -e,
        (true, false) => -(e + 1),
    };
    trace!(exposant = e, inverse, tours, "rat_exponent");
    e
}

/// Divise x par 10^exp, sur place (x est une copie de travail de l'appelant).
/// exp < 0 : double inversion, donc multiplication exacte par 10^-exp.
pub fn rat_scale(x: &mut BigRational, exp: i64) {
    if x.is_zero() {
        return;
    }
    if exp < 0 {
        *x = x.recip();
        rat_scale(x, -exp);
        *x = x.recip();
        return;
    }

    let milliard = milliard();
    let dix = dix();
    let mut exp = exp;
    let mut tours = 0usize;

    while exp >= PAS_MILLIARD {
        *x /= &milliard;
        exp -= PAS_MILLIARD;
        tours += 1;
    }
    while exp >= 1 {
        *x /= &dix;
        exp -= 1;
        tours += 1;
    }
    trace!(tours, "rat_scale");
}
