//! Per-render color assignment.
//!
//! Each render owns a SplitMix64 stream seeded for that call, shuffles the
//! theme palette once, and hands colors to course names in first-seen order,
//! cycling when names outnumber colors. Identical names always share a color
//! within a render; nothing persists across renders.

use std::collections::HashMap;

use crate::core::Rgba8;
use crate::theme::Theme;

/// Small deterministic PRNG (SplitMix64). Render-scoped by construction, so
/// concurrent renders never contend on shared random state.
#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from the system clock, for callers that did not pin a seed.
    pub fn from_entropy() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        let mut rng = Self::new(nanos);
        rng.next_u64();
        rng
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in [0, bound) for small bounds.
    fn next_below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// Course name -> palette color, built once per render.
pub struct ColorAssignment {
    shuffled: Vec<Rgba8>,
    by_name: HashMap<String, Rgba8>,
    next: usize,
}

impl ColorAssignment {
    pub fn new(theme: &Theme, rng: &mut SplitMix64) -> Self {
        let mut shuffled = theme.palette.to_vec();
        // Fisher-Yates.
        for i in (1..shuffled.len()).rev() {
            let j = rng.next_below(i + 1);
            shuffled.swap(i, j);
        }
        Self {
            shuffled,
            by_name: HashMap::new(),
            next: 0,
        }
    }

    /// The shuffled palette order for this render.
    pub fn shuffled_palette(&self) -> &[Rgba8] {
        &self.shuffled
    }

    pub fn color_for(&mut self, name: &str) -> Rgba8 {
        if let Some(&color) = self.by_name.get(name) {
            return color;
        }
        let color = self.shuffled[self.next % self.shuffled.len()];
        self.next += 1;
        self.by_name.insert(name.to_string(), color);
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Style;

    #[test]
    fn splitmix_is_deterministic() {
        let mut a = SplitMix64::new(42);
        let mut b = SplitMix64::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn same_name_shares_a_color() {
        let theme = Style::Cool.theme();
        let mut assignment = ColorAssignment::new(theme, &mut SplitMix64::new(1));
        let a = assignment.color_for("Algorithms");
        let _ = assignment.color_for("Physics");
        let b = assignment.color_for("Algorithms");
        assert_eq!(a, b);
    }

    #[test]
    fn first_seen_order_follows_shuffled_palette() {
        let theme = Style::Cool.theme();
        let mut assignment = ColorAssignment::new(theme, &mut SplitMix64::new(9));
        let expected = assignment.shuffled_palette().to_vec();
        for (i, name) in ["a", "b", "c", "d"].iter().enumerate() {
            assert_eq!(assignment.color_for(name), expected[i]);
        }
    }

    #[test]
    fn palette_cycles_when_exhausted() {
        let theme = Style::Cool.theme();
        let mut assignment = ColorAssignment::new(theme, &mut SplitMix64::new(3));
        let len = assignment.shuffled_palette().len();
        let first = assignment.color_for("course-0");
        for i in 1..len {
            assignment.color_for(&format!("course-{i}"));
        }
        assert_eq!(assignment.color_for("course-wrap"), first);
    }

    #[test]
    fn shuffle_is_a_permutation_of_the_theme_palette() {
        let theme = Style::Warm.theme();
        let assignment = ColorAssignment::new(theme, &mut SplitMix64::new(77));
        let mut shuffled = assignment.shuffled_palette().to_vec();
        let mut original = theme.palette.to_vec();
        let key = |c: &Rgba8| (c.r, c.g, c.b, c.a);
        shuffled.sort_by_key(key);
        original.sort_by_key(key);
        assert_eq!(shuffled, original);
    }
}
