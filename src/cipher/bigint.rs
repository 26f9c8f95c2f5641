// Modular Arithmetic Kernel
// Big integer operations underneath primality testing and key derivation

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::RngCore;

use crate::error::{CipherError, Result};

/// Modular exponentiation: base^exp mod modulus, result in [0, modulus)
///
/// Panics if `modulus` is zero.
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

/// Greatest common divisor
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Extended Euclidean Algorithm
///
/// Returns `(u, v, g)` with `u*x + v*y == g == gcd(|x|, |y|)`. Negative
/// inputs are folded in through the signs of the seed rows, so every row
/// `(n, u, v)` of the table satisfies `u*x + v*y == n`. Only the last two
/// rows are kept.
pub fn extended_euclid(x: &BigInt, y: &BigInt) -> (BigInt, BigInt, BigInt) {
    if y.is_zero() {
        return (x.signum(), BigInt::zero(), x.abs());
    }

    let (mut n_prev, mut n_last) = (x.abs(), y.abs());
    let (mut u_prev, mut u_last) = (x.signum(), BigInt::zero());
    let (mut v_prev, mut v_last) = (BigInt::zero(), y.signum());

    while !n_last.is_one() && n_last != n_prev {
        let (mut q, r) = n_prev.div_rem(&n_last);

        // Exact division: stop one step short so the gcd repeats instead of
        // the remainder reaching zero.
        if r.is_zero() {
            q -= 1u32;
        }

        let n_next = &n_prev - &q * &n_last;
        let u_next = &u_prev - &q * &u_last;
        let v_next = &v_prev - &q * &v_last;

        n_prev = std::mem::replace(&mut n_last, n_next);
        u_prev = std::mem::replace(&mut u_last, u_next);
        v_prev = std::mem::replace(&mut v_last, v_next);
    }

    (u_last, v_last, n_last)
}

/// Compute modular inverse: x^(-1) mod n, normalized into [0, n)
///
/// Fails with [`CipherError::NoInverse`] when `gcd(x, n) != 1`. A result of
/// zero is a real inverse and only happens for `n == 1`.
pub fn mod_inverse(x: &BigUint, n: &BigUint) -> Result<BigUint> {
    if n.is_zero() || !gcd(x, n).is_one() {
        return Err(CipherError::NoInverse);
    }

    let modulus = BigInt::from(n.clone());
    let (u, _, _) = extended_euclid(&BigInt::from(x.clone()), &modulus);

    Ok(u.mod_floor(&modulus).magnitude().clone())
}

/// Random big integer in [0, bound) by rejection sampling
///
/// The buffer is as long as the signed little-endian encoding of `bound`,
/// with the top bit cleared so the sample is never negative in that
/// encoding. A zero bound yields zero.
pub fn random_below<R: RngCore + ?Sized>(bound: &BigUint, rng: &mut R) -> BigUint {
    if bound.is_zero() {
        return BigUint::zero();
    }

    let len = (bound.bits() / 8 + 1) as usize;
    let mut bytes = vec![0u8; len];

    loop {
        rng.fill_bytes(&mut bytes);
        bytes[len - 1] &= 0x7F;

        let candidate = BigUint::from_bytes_le(&bytes);
        if &candidate < bound {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn ubig(n: u64) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        assert_eq!(mod_pow(&ubig(3), &ubig(5), &ubig(7)), ubig(5));
        assert_eq!(mod_pow(&ubig(10), &ubig(0), &ubig(7)), ubig(1));
        assert_eq!(mod_pow(&ubig(10), &ubig(3), &ubig(1)), ubig(0));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(&ubig(12), &ubig(18)), ubig(6));
        assert_eq!(gcd(&ubig(0), &ubig(9)), ubig(9));
        assert_eq!(gcd(&ubig(17), &ubig(5)), ubig(1));
    }

    #[test]
    fn test_extended_euclid_exact_divisor() {
        let (u, v, g) = extended_euclid(&big(12), &big(4));
        assert_eq!(g, big(4));
        assert_eq!(u * big(12) + v * big(4), big(4));
    }

    #[test]
    fn test_extended_euclid_negative_inputs() {
        for (x, y) in [(-240, 46), (240, -46), (-240, -46), (-7, 3)] {
            let (u, v, g) = extended_euclid(&big(x), &big(y));
            assert_eq!(&u * big(x) + &v * big(y), g);
            assert_eq!(g, big(x).gcd(&big(y)));
        }
    }

    #[test]
    fn test_extended_euclid_zero_inputs() {
        assert_eq!(extended_euclid(&big(0), &big(0)), (big(0), big(0), big(0)));
        assert_eq!(extended_euclid(&big(-5), &big(0)), (big(-1), big(0), big(5)));

        let (u, v, g) = extended_euclid(&big(0), &big(-3));
        assert_eq!(g, big(3));
        assert_eq!(u * big(0) + v * big(-3), big(3));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let inv = mod_inverse(&ubig(3), &ubig(7)).unwrap();
        assert_eq!(inv, ubig(5));
        assert_eq!((ubig(3) * inv) % ubig(7), ubig(1));
    }

    #[test]
    fn test_mod_inverse_not_coprime() {
        assert_eq!(mod_inverse(&ubig(6), &ubig(9)), Err(CipherError::NoInverse));
        assert_eq!(mod_inverse(&ubig(0), &ubig(9)), Err(CipherError::NoInverse));
        assert_eq!(mod_inverse(&ubig(3), &ubig(0)), Err(CipherError::NoInverse));
    }

    #[test]
    fn test_mod_inverse_zero_is_valid_for_unit_modulus() {
        assert_eq!(mod_inverse(&ubig(5), &ubig(1)), Ok(ubig(0)));
    }

    #[test]
    fn test_random_below_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        // 0xFF has its top bit set, so the buffer carries an extra sign byte
        for bound in [1u64, 2, 3, 0xFF, 0x100, 1_000_003] {
            for _ in 0..50 {
                assert!(random_below(&ubig(bound), &mut rng) < ubig(bound));
            }
        }
        assert_eq!(random_below(&ubig(0), &mut rng), ubig(0));
    }

    #[test]
    fn test_random_below_is_reproducible_when_seeded() {
        let bound = BigUint::one() << 200;
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(random_below(&bound, &mut a), random_below(&bound, &mut b));
    }

    proptest! {
        #[test]
        fn prop_extended_euclid_bezout(x in any::<i64>(), y in any::<i64>()) {
            let (x, y) = (big(x), big(y));
            let (u, v, g) = extended_euclid(&x, &y);
            prop_assert_eq!(&u * &x + &v * &y, g.clone());
            prop_assert_eq!(g, x.gcd(&y));
        }

        #[test]
        fn prop_mod_inverse(x in 0u64..1_000_000, n in 2u64..1_000_000) {
            let (x, n) = (ubig(x), ubig(n));
            match mod_inverse(&x, &n) {
                Ok(inv) => {
                    prop_assert!(inv < n);
                    prop_assert_eq!((&x * inv) % &n, BigUint::one());
                }
                Err(err) => {
                    prop_assert_eq!(err, CipherError::NoInverse);
                    prop_assert!(!gcd(&x, &n).is_one());
                }
            }
        }
    }
}
