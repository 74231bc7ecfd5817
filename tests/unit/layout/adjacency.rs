use super::*;
use crate::layout::spiral::compute_positions;

fn set(v: &[usize]) -> BTreeSet<usize> {
    v.iter().copied().collect()
}

#[test]
fn five_square_layout_neighbors() {
    // (0,0) (1,0) (1,1) (0,1) (2,0)
    let p = compute_positions(5);
    assert_eq!(adjacent(0, &p), set(&[1, 3]));
    assert_eq!(adjacent(1, &p), set(&[0, 2, 4]));
    assert_eq!(adjacent(2, &p), set(&[1, 3]));
    assert_eq!(adjacent(3, &p), set(&[0, 2]));
    assert_eq!(adjacent(4, &p), set(&[1]));
}

#[test]
fn diagonals_are_excluded() {
    let p = compute_positions(5);
    // 0 at (0,0) and 2 at (1,1) are diagonal.
    assert!(!adjacent(0, &p).contains(&2));
    assert!(!adjacent(2, &p).contains(&0));
    // 4 at (2,0) and 2 at (1,1) are diagonal.
    assert!(!adjacent(4, &p).contains(&2));
}

#[test]
fn never_contains_self_and_is_symmetric() {
    let p = compute_positions(40);
    for i in 0..p.len() {
        let adj = adjacent(i, &p);
        assert!(!adj.contains(&i));
        assert!(adj.len() <= 4);
        for &j in &adj {
            assert!(adjacent(j, &p).contains(&i), "{i} -> {j} not symmetric");
        }
    }
}

#[test]
fn out_of_range_index_has_no_neighbors() {
    let p = compute_positions(3);
    assert!(adjacent(3, &p).is_empty());
    assert!(adjacent(0, &[]).is_empty());
    assert!(NeighborIndex::build(&p).neighbors(99).is_empty());
}

#[test]
fn bucket_index_matches_linear_scan() {
    let p = compute_positions(81);
    let index = NeighborIndex::build(&p);
    assert_eq!(index.len(), 81);
    for i in 0..p.len() {
        assert_eq!(index.neighbors(i), adjacent(i, &p), "index {i}");
    }
}

#[test]
fn bucket_index_handles_duplicate_cells() {
    let p = vec![GridPos::new(0, 0), GridPos::new(1, 0), GridPos::new(1, 0)];
    let index = NeighborIndex::build(&p);
    assert_eq!(index.neighbors(0), set(&[1, 2]));
    assert_eq!(index.neighbors(1), adjacent(1, &p));
}
