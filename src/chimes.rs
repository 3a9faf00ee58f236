//! Chime targets and the proximity hit test
//!
//! A chime always rings when a wind's head is within one unit of it.
//! Further out it rings with probability 10 / d².

use rand::Rng;

/// Scale of the inverse-square falloff
const RING_STRENGTH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chime {
    pub x: f64,
    pub y: f64,
}

/// Decide whether a head at (x, y) rings `chime` this frame
pub fn rings<R: Rng + ?Sized>(x: f64, y: f64, chime: &Chime, rng: &mut R) -> bool {
    let dx = x - chime.x;
    let dy = y - chime.y;
    let d_squared = dx * dx + dy * dy;
    if d_squared < 1.0 {
        return true;
    }
    rng.gen::<f64>() < RING_STRENGTH / d_squared
}

/// A fixed set of chimes, read-only for the lifetime of a session
#[derive(Debug, Clone, Default)]
pub struct ChimeField {
    chimes: Vec<Chime>,
}

impl ChimeField {
    #[allow(dead_code)]
    pub fn new(chimes: Vec<Chime>) -> Self {
        Self { chimes }
    }

    /// Place `count` chimes uniformly over a `width` x `height` rectangle
    pub fn scatter<R: Rng + ?Sized>(count: usize, width: f64, height: f64, rng: &mut R) -> Self {
        let chimes = (0..count)
            .map(|_| Chime {
                x: rng.gen_range(0.0..width),
                y: rng.gen_range(0.0..height),
            })
            .collect();
        Self { chimes }
    }

    pub fn len(&self) -> usize {
        self.chimes.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.chimes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chime> {
        self.chimes.iter()
    }

    /// Every chime that rings for a head at (x, y), tested independently
    pub fn hits<R: Rng + ?Sized>(&self, x: f64, y: f64, rng: &mut R) -> Vec<usize> {
        self.chimes
            .iter()
            .enumerate()
            .filter(|(_, chime)| rings(x, y, chime, &mut *rng))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Always draws the largest value below 1.0
    struct Unlucky;

    impl RngCore for Unlucky {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }
        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xff);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    /// Always draws 0.0
    struct Lucky;

    impl RngCore for Lucky {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_point_blank_always_rings() {
        let chime = Chime { x: 100.0, y: 100.0 };
        // d² = 0.5
        for _ in 0..100 {
            assert!(rings(100.5, 100.5, &chime, &mut Unlucky));
        }
    }

    #[test]
    fn test_probability_falls_off() {
        let chime = Chime { x: 0.0, y: 0.0 };
        // d² = 10 000 → p = 0.001
        assert!(!rings(100.0, 0.0, &chime, &mut Unlucky));
        assert!(rings(100.0, 0.0, &chime, &mut Lucky));

        let mut rng = StdRng::seed_from_u64(42);
        let far = (0..10_000).filter(|_| rings(1000.0, 0.0, &chime, &mut rng)).count();
        assert!(far < 10, "far chime rang {} times", far);

        let near = (0..10_000).filter(|_| rings(4.0, 0.0, &chime, &mut rng)).count();
        assert!(near > 5_000, "near chime rang only {} times", near);
    }

    #[test]
    fn test_within_sqrt_ten_rings_unconditionally() {
        // 10 / d² ≥ 1 whenever d² ≤ 10
        let chime = Chime { x: 0.0, y: 0.0 };
        assert!(rings(3.0, 0.0, &chime, &mut Unlucky));
    }

    #[test]
    fn test_hits_reports_each_chime() {
        let field = ChimeField::new(vec![
            Chime { x: 0.0, y: 0.0 },
            Chime { x: 500.0, y: 500.0 },
            Chime { x: 0.5, y: 0.0 },
        ]);
        assert_eq!(field.hits(0.0, 0.0, &mut Unlucky), vec![0, 2]);
    }

    #[test]
    fn test_scatter_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let field = ChimeField::scatter(50, 720.0, 360.0, &mut rng);
        assert_eq!(field.len(), 50);
        for chime in field.iter() {
            assert!((0.0..720.0).contains(&chime.x));
            assert!((0.0..360.0).contains(&chime.y));
        }
    }
}
