use std::collections::{BTreeSet, HashSet};

use super::*;
use crate::foundation::core::is_hex_color;

/// Cycles through a fixed list, counting draws.
struct Cycle {
    colors: Vec<&'static str>,
    draws: usize,
}

impl ColorSource for Cycle {
    fn next_color(&mut self) -> String {
        let c = self.colors[self.draws % self.colors.len()];
        self.draws += 1;
        c.to_string()
    }
}

#[test]
fn random_colors_are_well_formed() {
    let mut src = RandomColors::seeded(7);
    for _ in 0..200 {
        let c = src.next_color();
        assert!(is_hex_color(&c), "{c}");
        assert_eq!(c, c.to_uppercase());
    }
}

#[test]
fn seeded_sources_are_deterministic() {
    let mut a = RandomColors::seeded(42);
    let mut b = RandomColors::seeded(42);
    for _ in 0..10 {
        assert_eq!(a.next_color(), b.next_color());
    }
}

#[test]
fn returns_first_non_colliding_candidate() {
    let mut src = Cycle {
        colors: vec!["#000000", "#111111", "#222222"],
        draws: 0,
    };
    let avoid: HashSet<String> = ["#000000".to_string(), "#111111".to_string()].into();
    assert_eq!(different_color(&mut src, &avoid, MAX_COLOR_ATTEMPTS), "#222222");
    assert_eq!(src.draws, 3);
}

#[test]
fn terminates_when_every_candidate_collides() {
    let mut src = Cycle {
        colors: vec!["#000000", "#111111"],
        draws: 0,
    };
    let avoid: HashSet<String> = ["#000000".to_string(), "#111111".to_string()].into();
    let got = different_color(&mut src, &avoid, MAX_COLOR_ATTEMPTS);
    assert!(avoid.contains(&got));
    assert_eq!(src.draws, MAX_COLOR_ATTEMPTS);
}

#[test]
fn only_reachable_free_color_is_found_within_bound() {
    // Free color appears on the last permitted draw.
    let mut colors = vec!["#ABCDEF"; MAX_COLOR_ATTEMPTS - 1];
    colors.push("#FEDCBA");
    let mut src = Cycle { colors, draws: 0 };
    let avoid = ["#ABCDEF"];
    assert_eq!(
        different_color(&mut src, &avoid[..], MAX_COLOR_ATTEMPTS),
        "#FEDCBA"
    );
}

#[test]
fn zero_attempts_still_draws_once() {
    let mut src = Cycle {
        colors: vec!["#000000"],
        draws: 0,
    };
    let avoid: Vec<String> = vec!["#000000".to_string()];
    assert_eq!(different_color(&mut src, avoid.as_slice(), 0), "#000000");
    assert_eq!(src.draws, 1);
}

#[test]
fn forks_are_deterministic_and_independent() {
    let mut a = RandomColors::seeded(9);
    let mut b = RandomColors::seeded(9);
    let mut fa = a.fork();
    let mut fb = b.fork();
    assert_eq!(fa.next_color(), fb.next_color());
    assert_eq!(a.next_color(), b.next_color());
}

#[test]
fn ordered_sets_avoid_colors_too() {
    let mut src = Cycle {
        colors: vec!["#0F0F0F", "#F0F0F0"],
        draws: 0,
    };
    let avoid = BTreeSet::from(["#0F0F0F".to_string()]);
    assert!(avoid.contains_color("#0F0F0F"));
    assert!(!avoid.contains_color("#0f0f0f"));
    assert_eq!(different_color(&mut src, &avoid, MAX_COLOR_ATTEMPTS), "#F0F0F0");
    assert_eq!(src.draws, 2);
}
