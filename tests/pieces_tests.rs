//! Piece template, rotation and kick tests

use web_tetris::core::{attempt_wall_kick, collides, Board, Shape, Tetromino, KICK_OFFSETS};
use web_tetris::types::{PieceKind, BOARD_WIDTH};

fn rows(shape: &Shape) -> Vec<Vec<u8>> {
    shape.rows().map(|row| row.to_vec()).collect()
}

#[test]
fn test_i_piece_shapes() {
    let i = Shape::template(PieceKind::I);
    assert_eq!(
        rows(&i),
        vec![
            vec![0, 0, 0, 0],
            vec![1, 1, 1, 1],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0]
        ]
    );
    assert_eq!(
        rows(&i.rotate_cw()),
        vec![
            vec![0, 0, 1, 0],
            vec![0, 0, 1, 0],
            vec![0, 0, 1, 0],
            vec![0, 0, 1, 0]
        ]
    );
}

#[test]
fn test_o_piece_rotation_is_identity() {
    let o = Shape::template(PieceKind::O);
    assert_eq!(rows(&o), vec![vec![2, 2], vec![2, 2]]);
    assert_eq!(o.rotate_cw(), o);
}

#[test]
fn test_three_wide_templates() {
    assert_eq!(
        rows(&Shape::template(PieceKind::S)),
        vec![vec![0, 4, 4], vec![4, 4, 0], vec![0, 0, 0]]
    );
    assert_eq!(
        rows(&Shape::template(PieceKind::Z)),
        vec![vec![5, 5, 0], vec![0, 5, 5], vec![0, 0, 0]]
    );
    assert_eq!(
        rows(&Shape::template(PieceKind::J)),
        vec![vec![6, 0, 0], vec![6, 6, 6], vec![0, 0, 0]]
    );
    assert_eq!(
        rows(&Shape::template(PieceKind::L)),
        vec![vec![0, 0, 7], vec![7, 7, 7], vec![0, 0, 0]]
    );
}

#[test]
fn test_l_rotation_cycle() {
    let l = Shape::template(PieceKind::L);
    let r1 = l.rotate_cw();
    assert_eq!(rows(&r1), vec![vec![0, 7, 0], vec![0, 7, 0], vec![0, 7, 7]]);
    let r2 = r1.rotate_cw();
    assert_eq!(rows(&r2), vec![vec![0, 0, 0], vec![7, 7, 7], vec![7, 0, 0]]);
    assert_eq!(r2.rotate_cw().rotate_cw(), l);
}

#[test]
fn test_spawn_position_centers_template() {
    for kind in PieceKind::ALL {
        let piece = Tetromino::spawn(kind);
        let size = piece.shape.size() as i8;
        assert_eq!(piece.x, BOARD_WIDTH as i8 / 2 - size / 2, "{kind:?}");
        assert_eq!(piece.y, 0);
        assert_eq!(piece.shape, Shape::template(kind));
    }
}

#[test]
fn test_all_shapes_have_4_minos() {
    for kind in PieceKind::ALL {
        let mut shape = Shape::template(kind);
        for _ in 0..4 {
            assert_eq!(shape.cells().len(), 4, "{kind:?}");
            shape = shape.rotate_cw();
        }
    }
}

#[test]
fn test_kick_offsets_order() {
    assert_eq!(KICK_OFFSETS.len(), 9);
    assert_eq!(KICK_OFFSETS[0], (0, 0));
    assert_eq!(KICK_OFFSETS[1], (-1, 0));
    assert_eq!(KICK_OFFSETS[2], (1, 0));
    assert_eq!(KICK_OFFSETS[8], (0, -2));
}

#[test]
fn test_t_rotation_with_kick_off_left_wall() {
    let board = Board::new();
    // Vertical T with its stem to the right, column 1 of the matrix on column 0
    let vertical = Tetromino::spawn(PieceKind::T).rotated_cw();
    let vertical = vertical.shifted(-1 - vertical.x, 6);
    assert!(!collides(&vertical, &board));

    // The next rotation is three wide and pokes through the wall
    let rotated = vertical.rotated_cw();
    assert!(collides(&rotated, &board));

    // One left still collides, one right fits
    let kicked = attempt_wall_kick(&rotated, &board).expect("kick");
    assert_eq!((kicked.x, kicked.y), (rotated.x + 1, rotated.y));
    assert_eq!(kicked.shape, rotated.shape);
}

#[test]
fn test_rotation_failure_leaves_nothing() {
    let mut board = Board::new();
    for y in 0..20 {
        for x in 0..10 {
            board.set(x, y, Some(PieceKind::Z));
        }
    }
    let rotated = Tetromino::spawn(PieceKind::J).shifted(0, 8).rotated_cw();
    assert!(attempt_wall_kick(&rotated, &board).is_none());
}
