use super::Random;

/// Xoroshiro128++ generator.
pub struct Xoroshiro {
    seed: XoroshiroSeed,
}

impl Xoroshiro {
    fn new(lo: i64, hi: i64) -> Self {
        if (lo | hi) == 0 {
            return Self {
                seed: XoroshiroSeed {
                    lo: -7046029254386353131i64,
                    hi: 7640891576956012809i64,
                },
            };
        }
        Self {
            seed: XoroshiroSeed { lo, hi },
        }
    }

    pub fn from_seed(seed: i64) -> Self {
        let seed = XoroshiroSeed::mixed_seed(seed);
        Self::new(seed.lo, seed.hi)
    }
}

impl Random for Xoroshiro {
    fn next_i32(&mut self) -> i32 {
        self.seed.next() as i32
    }

    fn next_bounded_i32(&mut self, bound: i32) -> i32 {
        let mut l = (self.next_i32() as u64) & 0xFFFFFFFF;
        let mut m = l.wrapping_mul(bound as u64);
        let mut n = m & 4294967295u64;
        if n < bound as u64 {
            let i = (((!bound).wrapping_add(1)) as u64) % (bound as u64);
            while n < i {
                l = self.next_i32() as u64;
                m = l.wrapping_mul(bound as u64);
                n = m & 4294967295u64;
            }
        }
        let o = m >> 32;
        o as i32
    }
}

struct XoroshiroSeed {
    lo: i64,
    hi: i64,
}

fn mix_stafford_13(seed: i64) -> i64 {
    let seed = (seed ^ ((seed as u64) >> 30) as i64).wrapping_mul(-4658895280553007687i64);
    let seed = (seed ^ ((seed as u64) >> 27) as i64).wrapping_mul(-7723592293110705685i64);
    seed ^ ((seed as u64) >> 31) as i64
}

impl XoroshiroSeed {
    fn mix(&self) -> Self {
        Self {
            lo: mix_stafford_13(self.lo),
            hi: mix_stafford_13(self.hi),
        }
    }

    fn next(&mut self) -> i64 {
        let l = self.lo;
        let m = self.hi;
        let n = l.wrapping_add(m).rotate_left(17).wrapping_add(l);
        let o = m ^ l;
        self.lo = l.rotate_left(49) ^ o ^ (o << 21);
        self.hi = o.rotate_left(28);
        n
    }

    fn unmixed_seed(seed: i64) -> Self {
        let l = seed ^ 7640891576956012809i64;
        let m = l.wrapping_add(-7046029254386353131i64);
        Self { lo: l, hi: m }
    }

    fn mixed_seed(seed: i64) -> Self {
        Self::unmixed_seed(seed).mix()
    }
}

#[cfg(test)]
mod tests {
    use crate::random::Random;

    use super::Xoroshiro;

    // Reference values from the canonical Xoroshiro128++ seeding

    #[test]
    fn test_next_i32() {
        let values = [
            -160476802, 781697906, 653572596, 1337520923, -505875771, -47281585, 342195906,
            1417498593, -1478887443, 1560080270,
        ];

        let mut xoroshiro = Xoroshiro::from_seed(0);
        for value in values {
            assert_eq!(xoroshiro.next_i32(), value);
        }
    }

    #[test]
    fn test_next_bounded_i32() {
        let mut xoroshiro = Xoroshiro::from_seed(0);

        let values = [9, 1, 1, 3, 8, 9, 0, 3, 6, 3];
        for value in values {
            assert_eq!(xoroshiro.next_bounded_i32(10), value);
        }
    }

    #[test]
    fn bounded_values_stay_in_range() {
        let mut xoroshiro = Xoroshiro::from_seed(42);
        for bound in 1..64 {
            let value = xoroshiro.next_bounded_i32(bound);
            assert!((0..bound).contains(&value));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Xoroshiro::from_seed(1234);
        let mut b = Xoroshiro::from_seed(1234);
        for _ in 0..32 {
            assert_eq!(a.next_i32(), b.next_i32());
        }
        let mut c = Xoroshiro::from_seed(1235);
        assert!((0..32).any(|_| a.next_i32() != c.next_i32()));
    }
}
