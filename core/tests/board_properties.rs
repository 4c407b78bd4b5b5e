use minegrid_core::*;

const CONFIGS: [(Coord2, CellCount); 6] = [
    ((1, 2), 1),
    ((3, 3), 1),
    ((9, 9), 10),
    ((16, 16), 40),
    ((30, 16), 99),
    ((5, 5), 24),
];

fn assert_consistent(board: &Board, config: GameConfig) {
    assert_eq!(board.size(), config.size);
    assert_eq!(board.len(), config.total_cells() as usize);
    assert_eq!(board.mine_count(), config.mines);
    assert_eq!(
        board.tokens().filter(|token| token.is_mine()).count(),
        config.mines as usize
    );

    for index in 0..board.len() {
        if let Token::Count(count) = board[index] {
            assert_eq!(count, board.count_adjacent_mines(index), "index {index}");
        }
    }
}

#[test]
fn rejection_sampler_boards_are_consistent() {
    for (size, mines) in CONFIGS {
        let config = GameConfig::new(size, mines).unwrap();
        for seed in 0..20 {
            let board = RejectionSampler::new(seed).generate(config).unwrap();
            assert_consistent(&board, config);
        }
    }
}

#[test]
fn shuffle_sampler_boards_are_consistent() {
    for (size, mines) in CONFIGS {
        let config = GameConfig::new(size, mines).unwrap();
        for seed in 0..20 {
            let board = ShuffleSampler::new(seed).generate(config).unwrap();
            assert_consistent(&board, config);
        }
    }
}

#[test]
fn unseeded_generation_validates_input() {
    assert_eq!(generate(0, 1, 0).err(), Some(GameError::InvalidDimensions));
    assert_eq!(generate(3, 3, 9).err(), Some(GameError::TooManyMines));

    let board = generate(10, 4, 7).unwrap();
    assert_consistent(&board, GameConfig::new((10, 4), 7).unwrap());
}

/// Reveals every safe cell in index order, the round must end in a win.
#[test]
fn revealing_every_safe_cell_wins() {
    for seed in 0..10 {
        let config = GameConfig::new((12, 8), 15).unwrap();
        let mut game = Game::default();
        game.reset_with(config, RejectionSampler::new(seed)).unwrap();

        let safe: Vec<_> = (0..game.board().len())
            .filter(|&index| !game.board().contains_mine(index))
            .collect();
        for index in safe {
            if game.is_finished() {
                break;
            }
            let outcome = game.handle_click(index).unwrap();
            assert_ne!(outcome, ClickOutcome::Reveal(RevealOutcome::HitMine));
        }

        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.revealed_count(), config.total_cells() - config.mines);
        assert!((0..game.board().len())
            .filter(|&index| game.board().contains_mine(index))
            .all(|index| !game.cell_state(index).is_revealed()));
    }
}

/// Flood fill from a zero cell opens its whole zero region plus the border.
#[test]
fn flood_fill_matches_connected_zero_region() {
    let config = GameConfig::new((20, 20), 30).unwrap();

    for seed in 0..10 {
        let mut game = Game::default();
        game.reset_with(config, ShuffleSampler::new(seed)).unwrap();
        let board = game.board().clone();

        let Some(start) = (0..board.len()).find(|&index| board[index].is_zero()) else {
            continue;
        };

        let mut expected = vec![false; board.len()];
        let mut stack = vec![start];
        while let Some(index) = stack.pop() {
            if expected[index] {
                continue;
            }
            expected[index] = true;
            if board[index].is_zero() {
                stack.extend(board.neighbors(index));
            }
        }

        game.reveal(start).unwrap();
        let actual: Vec<_> = game.cell_states().map(|state| state.is_revealed()).collect();
        assert_eq!(actual, expected, "seed {seed}");
    }
}

#[test]
fn game_snapshot_survives_json() {
    let config = GameConfig::new((6, 5), 4).unwrap();
    let mut game = Game::default();
    game.reset_with(config, RejectionSampler::new(1)).unwrap();
    game.toggle_input_mode();
    game.handle_click(0).unwrap();

    let json = serde_json::to_string(&game).unwrap();
    let restored: Game = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, game);
    assert_eq!(restored.input_mode(), InputMode::Flag);
}

#[test]
fn board_snapshot_with_wrong_mine_count_is_rejected() {
    let board = Board::from_mine_indices((4, 3), &[1, 6]).unwrap();
    let mut value = serde_json::to_value(&board).unwrap();
    value["mine_count"] = serde_json::json!(3);

    let error = serde_json::from_value::<Board>(value).unwrap_err();
    assert!(error.to_string().contains("Board shape does not match"), "{error}");
}

#[test]
fn board_snapshot_with_wrong_counts_is_rejected() {
    let board = Board::from_mine_indices((3, 1), &[0]).unwrap();
    let mut value = serde_json::to_value(&board).unwrap();
    let tokens = serde_json::to_value([Token::Mine, Token::Count(0), Token::Count(0)]).unwrap();
    value["tokens"]["data"] = tokens;

    assert!(serde_json::from_value::<Board>(value).is_err());
}

#[test]
fn game_snapshot_with_mismatched_cells_is_rejected() {
    let small = Game::with_board(Board::from_mine_indices((2, 2), &[0]).unwrap());
    let large = Game::with_board(Board::from_mine_indices((3, 3), &[0]).unwrap());

    let mut value = serde_json::to_value(&small).unwrap();
    value["cells"] = serde_json::to_value(&large).unwrap()["cells"].clone();

    let error = serde_json::from_value::<Game>(value).unwrap_err();
    assert!(error.to_string().contains("Board shape does not match"), "{error}");
}

#[test]
fn game_snapshot_with_out_of_range_trigger_is_rejected() {
    let mut game = Game::with_board(Board::from_mine_indices((2, 2), &[0]).unwrap());
    game.reveal_mine(0).unwrap();

    let mut value = serde_json::to_value(&game).unwrap();
    value["triggered_mine"] = serde_json::json!(4);

    assert!(serde_json::from_value::<Game>(value).is_err());
}
