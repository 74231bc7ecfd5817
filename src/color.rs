use rand::{Rng, SeedableRng, rngs::StdRng};

/// Upper bound on candidate draws when searching for a non-colliding color.
pub const MAX_COLOR_ATTEMPTS: usize = 20;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Uniformly random `#RRGGBB` with uppercase digits.
pub fn random_hex_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut color = String::with_capacity(7);
    color.push('#');
    for _ in 0..6 {
        color.push(char::from(HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())]));
    }
    color
}

/// Anything that can hand out candidate colors.
pub trait ColorSource: Send {
    /// Next candidate `#RRGGBB` color.
    fn next_color(&mut self) -> String;
}

/// [`ColorSource`] backed by a seedable standard RNG.
#[derive(Clone, Debug)]
pub struct RandomColors {
    rng: StdRng,
}

impl RandomColors {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Independent child source seeded from this one.
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.rng.r#gen())
    }
}

impl ColorSource for RandomColors {
    fn next_color(&mut self) -> String {
        random_hex_color(&mut self.rng)
    }
}

impl<S: ColorSource + ?Sized> ColorSource for Box<S> {
    fn next_color(&mut self) -> String {
        (**self).next_color()
    }
}

/// Draw up to `max_attempts` candidates (at least one) and return the first one not in
/// `avoid`. If every draw collides the last candidate is returned anyway.
pub fn different_color<S, A>(source: &mut S, avoid: &A, max_attempts: usize) -> String
where
    S: ColorSource + ?Sized,
    A: ColorSet + ?Sized,
{
    let mut candidate = source.next_color();
    let mut attempts = 1;
    while avoid.contains_color(&candidate) && attempts < max_attempts {
        candidate = source.next_color();
        attempts += 1;
    }
    if avoid.contains_color(&candidate) {
        tracing::debug!(attempts, color = %candidate, "accepting colliding color");
    }
    candidate
}

/// Membership test over a collection of colors.
pub trait ColorSet {
    /// Return `true` when `color` is in the set.
    fn contains_color(&self, color: &str) -> bool;
}

impl ColorSet for std::collections::HashSet<String> {
    fn contains_color(&self, color: &str) -> bool {
        self.contains(color)
    }
}

impl ColorSet for std::collections::BTreeSet<String> {
    fn contains_color(&self, color: &str) -> bool {
        self.contains(color)
    }
}

impl ColorSet for [String] {
    fn contains_color(&self, color: &str) -> bool {
        self.iter().any(|c| c == color)
    }
}

impl ColorSet for [&str] {
    fn contains_color(&self, color: &str) -> bool {
        self.iter().any(|c| *c == color)
    }
}

#[cfg(test)]
#[path = "../tests/unit/color/color.rs"]
mod tests;
