use super::*;

#[test]
fn manhattan_distance_ignores_direction() {
    let a = GridPos::new(2, 0);
    let b = GridPos::new(0, 1);
    assert_eq!(a.manhattan(b), 3);
    assert_eq!(b.manhattan(a), 3);
    assert_eq!(a.manhattan(a), 0);
    assert_eq!(GridPos::new(-1, -1).manhattan(GridPos::ORIGIN), 2);
}

#[test]
fn orthogonal_neighbors_are_distance_one() {
    let p = GridPos::new(3, 4);
    for n in p.orthogonal_neighbors() {
        assert_eq!(p.manhattan(n), 1);
    }
}

#[test]
fn parses_hex_case_insensitively() {
    let c = Rgb8::parse_hex("#ff8000").unwrap();
    assert_eq!(c, Rgb8 { r: 255, g: 128, b: 0 });
    assert_eq!(Rgb8::parse_hex("#FF8000").unwrap(), c);
    assert_eq!(c.to_hex(), "#FF8000");
}

#[test]
fn rejects_malformed_hex() {
    for bad in ["", "ff8000", "#ff800", "#ff80000", "#gg0000", "#ff 000", "red"] {
        assert!(!is_hex_color(bad), "{bad:?} should be rejected");
    }
    assert!(is_hex_color("#00aaFF"));
}
