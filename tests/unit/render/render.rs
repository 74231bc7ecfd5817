use super::*;

fn opts() -> RenderOpts {
    RenderOpts {
        square_size: 4,
        gap: 1,
        background: [9, 9, 9, 255],
    }
}

#[test]
fn empty_snapshot_is_one_background_pixel() {
    let img = render_snapshot(&[], opts()).unwrap();
    assert_eq!(img.dimensions(), (1, 1));
    assert_eq!(img.get_pixel(0, 0).0, [9, 9, 9, 255]);
}

#[test]
fn squares_land_on_their_spiral_cells() {
    // (0,0) red, (1,0) green, (1,1) blue
    let squares = vec![
        Square::new("#FF0000"),
        Square::new("#00FF00"),
        Square::new("#0000ff"),
    ];
    let img = render_snapshot(&squares, opts()).unwrap();
    assert_eq!(img.dimensions(), (9, 9));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(3, 3).0, [255, 0, 0, 255]);
    // Gap column between the first two squares.
    assert_eq!(img.get_pixel(4, 0).0, [9, 9, 9, 255]);
    assert_eq!(img.get_pixel(5, 0).0, [0, 255, 0, 255]);
    assert_eq!(img.get_pixel(8, 8).0, [0, 0, 255, 255]);
    // (0,1) is not occupied yet.
    assert_eq!(img.get_pixel(0, 8).0, [9, 9, 9, 255]);
}

#[test]
fn rejects_bad_colors_and_zero_size() {
    let bad = vec![Square::new("blue")];
    assert!(matches!(
        render_snapshot(&bad, opts()),
        Err(BlockPartyError::Validation(_))
    ));
    let zero = RenderOpts {
        square_size: 0,
        ..opts()
    };
    assert!(render_snapshot(&[], zero).is_err());
}

#[test]
fn oversized_canvas_is_a_validation_error() {
    let one = vec![Square::new("#000000")];
    let huge = RenderOpts {
        square_size: u32::MAX,
        gap: 0,
        background: [0; 4],
    };
    assert!(matches!(
        render_snapshot(&one, huge),
        Err(BlockPartyError::Validation(_))
    ));

    let wide_gap = RenderOpts {
        square_size: 1,
        gap: u32::MAX,
        ..opts()
    };
    let two = vec![Square::new("#000000"), Square::new("#FFFFFF")];
    assert!(matches!(
        render_snapshot(&two, wide_gap),
        Err(BlockPartyError::Validation(_))
    ));

    let at_cap = RenderOpts {
        square_size: MAX_SNAPSHOT_SIDE,
        gap: 0,
        ..opts()
    };
    assert!(matches!(
        render_snapshot(&[], at_cap),
        Ok(img) if img.dimensions() == (1, 1)
    ));
    let over_cap = RenderOpts {
        square_size: MAX_SNAPSHOT_SIDE + 1,
        ..at_cap
    };
    assert!(render_snapshot(&one, over_cap).is_err());
}
