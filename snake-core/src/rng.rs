/// xorshift32. The same seed always yields the same apples and debrief lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }

    pub fn next_int(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        self.next() % max
    }

    /// Uniform-ish value in `min..max_exclusive`.
    pub fn next_range(&mut self, min: i32, max_exclusive: i32) -> i32 {
        debug_assert!(max_exclusive > min);
        let span = (max_exclusive - min) as u32;
        min + self.next_int(span) as i32
    }

    pub fn next_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.next_int(len as u32) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_remapped() {
        assert_eq!(SeededRng::new(0), SeededRng::new(0xDEAD_BEEF));
    }

    #[test]
    fn ranges_stay_in_bounds() {
        let mut rng = SeededRng::new(7);
        for _ in 0..1_000 {
            let v = rng.next_range(1, 135);
            assert!((1..135).contains(&v));
            assert!(rng.next_index(5) < 5);
        }
    }
}
