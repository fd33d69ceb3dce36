use grid_snake::game::{Direction, GridDims, GridModel, Position, Role, Snake};
use rand::{rngs::StdRng, SeedableRng};

fn model(snake: &[Position], food: Position, direction: Direction) -> GridModel {
    GridModel::from_parts(
        GridDims::new(10, 10),
        Snake::from_positions(snake).unwrap(),
        food,
        direction,
        StdRng::seed_from_u64(11),
    )
}

#[test]
fn eating_from_the_center() {
    let mut model = model(&[Position::new(5, 5)], Position::new(4, 5), Direction::Left);

    assert!(model.step().ate_food);

    let snapshot = model.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.segments[0].pos, Position::new(4, 5));
    assert_eq!(snapshot.segments[0].role, Role::Head);
    assert_eq!(snapshot.segments[1].pos, Position::new(5, 5));
    assert_eq!(snapshot.segments[1].role, Role::Body);
    assert!(GridDims::new(10, 10).contains(snapshot.food));
}

#[test]
fn wrapping_off_the_left_edge() {
    let mut model = model(&[Position::new(0, 5)], Position::new(7, 7), Direction::Left);

    assert!(!model.step().ate_food);

    assert_eq!(model.snake().head(), Position::new(10, 5));
    assert_eq!(model.snake().len(), 1);
}

#[test]
fn long_run_keeps_everything_in_bounds() {
    let dims = GridDims::new(6, 4);
    let mut model = GridModel::new(dims, Some(5));
    let turns = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    for i in 0..400 {
        if i % 7 == 0 {
            model.set_direction(turns[(i / 7) % turns.len()]);
        }
        let before = model.snake().len();
        let outcome = model.step();
        let after = model.snake().len();

        assert_eq!(after, before + usize::from(outcome.ate_food));
        assert!(model.snake().positions().all(|p| dims.contains(p)));
        assert!(dims.contains(model.food()));
    }
    assert_eq!(model.ticks(), 400);
}

#[test]
fn body_follows_the_head_cell_by_cell() {
    let start = [
        Position::new(3, 3),
        Position::new(3, 4),
        Position::new(4, 4),
        Position::new(5, 4),
    ];
    let mut model = model(&start, Position::new(0, 0), Direction::Up);

    model.step();

    let positions: Vec<_> = model.snake().positions().collect();
    assert_eq!(positions[0], Position::new(3, 2));
    assert_eq!(&positions[1..], &start[..3]);
}
