use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::placement;
use crate::*;

/// Summary of where a board is in its life.
///
/// `Won` is derived from the revealed count on every call, never stored, so
/// it holds as soon as the last safe square opens.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    Fresh,
    Active,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A single Minesweeper board: mine layout, the player's progress, and the
/// win/loss bookkeeping.
///
/// Mines are placed lazily by the first [`Board::reveal`] call, which keeps
/// the clicked square safe. Until then the board has dimensions and a mine
/// count but no layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    squares: Array2<Square>,
    revealed: Array2<bool>,
    flagged: Array2<bool>,
    seed: u64,
    mines_placed: bool,
    game_over: bool,
    revealed_count: Area,
    flagged_count: Area,
}

impl Board {
    /// Creates a fresh board with an entropy-seeded mine layout to come.
    pub fn new(config: BoardConfig) -> Self {
        use rand::prelude::*;
        Self::with_seed(config, rand::rng().random())
    }

    /// Same as [`Board::new`] but with a fixed RNG seed, for reproducible
    /// layouts.
    pub fn with_seed(config: BoardConfig, seed: u64) -> Self {
        let dim = config.size().grid_index();
        Self {
            config,
            squares: Array2::default(dim),
            revealed: Array2::default(dim),
            flagged: Array2::default(dim),
            seed,
            mines_placed: false,
            game_over: false,
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    /// Builds a board with an explicit mine layout, bypassing random
    /// placement. Duplicate coordinates collapse into one mine.
    pub fn with_mines(size: Pos, mines: &[Pos]) -> Result<Self> {
        let mask = placement::mask_from(size, mines)?;
        let mine_count = mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        let config = BoardConfig::new(size.0, size.1, mine_count)?;

        let mut board = Self::with_seed(config, 0);
        board.squares = placement::survey(&mask);
        board.mines_placed = true;
        Ok(board)
    }

    pub const fn config(&self) -> BoardConfig {
        self.config
    }

    pub const fn size(&self) -> Pos {
        self.config.size()
    }

    pub const fn total_mines(&self) -> Area {
        self.config.mines()
    }

    pub const fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub const fn is_lost(&self) -> bool {
        self.game_over
    }

    /// Whether every non-mine square has been revealed, independent of
    /// whether a mine blew up at some point.
    pub fn is_won(&self) -> bool {
        self.revealed_count == self.config.safe_cells()
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::Lost
        } else if self.is_won() {
            Phase::Won
        } else if self.mines_placed {
            Phase::Active
        } else {
            Phase::Fresh
        }
    }

    /// How many flags the player has left; negative when over-flagged.
    pub fn flags_remaining(&self) -> isize {
        (self.config.mines() as isize) - (self.flagged_count as isize)
    }

    /// Player-visible state of one square.
    pub fn view(&self, pos: Pos) -> Result<SquareView> {
        let pos = self.config.validate(pos)?;
        Ok(self.view_of(pos))
    }

    /// Full display projection, one symbol per square. Read-only and cheap
    /// enough to call every frame.
    pub fn snapshot(&self) -> Array2<SquareView> {
        Array2::from_shape_fn(self.size().grid_index(), |(x, y)| {
            self.view_of((x as Axis, y as Axis))
        })
    }

    /// Reveals a square. Already-revealed and flagged squares are left
    /// alone, as is the whole board once the game has ended.
    ///
    /// The first reveal places the mines, keeping the clicked square clear.
    /// Revealing a mine discloses every mine on the board and ends the game.
    /// Revealing a zero-clue square floods across the zero region, stopping
    /// at nonzero clues and flags.
    pub fn reveal(&mut self, pos: Pos) -> Result<RevealOutcome> {
        let pos = self.config.validate(pos)?;
        let idx = pos.grid_index();

        if self.game_over || self.revealed[idx] || self.flagged[idx] {
            return Ok(RevealOutcome::NoChange);
        }

        if !self.mines_placed {
            self.place_mines(pos);
        }

        Ok(self.reveal_single(pos))
    }

    /// Flags or unflags a hidden square, adjusting the flag counter. No-op
    /// on revealed squares and after the game has ended.
    pub fn toggle_flag(&mut self, pos: Pos) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let pos = self.config.validate(pos)?;
        let idx = pos.grid_index();

        if self.game_over || self.revealed[idx] {
            return Ok(NoChange);
        }

        Ok(if self.flagged[idx] {
            self.flagged[idx] = false;
            self.flagged_count -= 1;
            Unflagged
        } else {
            self.flagged[idx] = true;
            self.flagged_count += 1;
            Flagged
        })
    }

    fn place_mines(&mut self, safe: Pos) {
        let mask = placement::scatter(&self.config, safe, self.seed);
        self.squares = placement::survey(&mask);
        self.mines_placed = true;
        log::debug!("placed {} mines, safe start {:?}", self.config.mines(), safe);
    }

    fn reveal_single(&mut self, pos: Pos) -> RevealOutcome {
        let idx = pos.grid_index();
        self.revealed[idx] = true;

        match self.squares[idx] {
            Square::Mine => {
                log::debug!("mine hit at {:?}", pos);
                self.disclose_mines();
                self.game_over = true;
                RevealOutcome::Exploded
            }
            Square::Clue(clue) => {
                self.revealed_count += 1;
                log::debug!("opened {:?}, clue: {}", pos, clue);

                if clue == 0 {
                    self.flood_reveal(pos);
                }

                if self.is_won() {
                    log::debug!("all safe squares revealed");
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Opened
                }
            }
        }
    }

    /// Worklist flood fill over a zero-clue region. Flags are barriers, and
    /// the revealed grid doubles as the visited set.
    fn flood_reveal(&mut self, start: Pos) {
        let mut to_visit: VecDeque<Pos> = self
            .squares
            .neighbors(start)
            .filter(|&pos| self.is_floodable(pos))
            .collect();
        log::trace!("flood fill from {:?}, frontier: {:?}", start, to_visit);

        while let Some(pos) = to_visit.pop_front() {
            let idx = pos.grid_index();
            if self.revealed[idx] || self.flagged[idx] {
                continue;
            }

            // Zero-clue squares never border a mine, so the frontier only
            // ever holds clue squares.
            let Square::Clue(clue) = self.squares[idx] else {
                continue;
            };

            self.revealed[idx] = true;
            self.revealed_count += 1;
            log::trace!("flood opened {:?}, clue: {}", pos, clue);

            if clue == 0 {
                let frontier = self
                    .squares
                    .neighbors(pos)
                    .filter(|&next| self.is_floodable(next));
                to_visit.extend(frontier);
            }
        }
    }

    fn is_floodable(&self, pos: Pos) -> bool {
        let idx = pos.grid_index();
        !self.revealed[idx] && !self.flagged[idx]
    }

    fn disclose_mines(&mut self) {
        for ((x, y), &square) in self.squares.indexed_iter() {
            if square.is_mine() {
                self.revealed[(x, y)] = true;
            }
        }
    }

    fn view_of(&self, pos: Pos) -> SquareView {
        let idx = pos.grid_index();
        if self.revealed[idx] {
            match self.squares[idx] {
                Square::Mine => SquareView::Mine,
                Square::Clue(clue) => SquareView::Open(clue),
            }
        } else if self.flagged[idx] {
            SquareView::Flagged
        } else {
            SquareView::Hidden
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Pos, mines: &[Pos]) -> Board {
        Board::with_mines(size, mines).unwrap()
    }

    fn config(width: Axis, height: Axis, mines: Area) -> BoardConfig {
        BoardConfig::new(width, height, mines).unwrap()
    }

    #[test]
    fn fresh_board_starts_hidden_and_unflagged() {
        let board = Board::with_seed(config(4, 3, 5), 7);

        assert!(!board.mines_placed());
        assert_eq!(board.phase(), Phase::Fresh);
        assert_eq!(board.flags_remaining(), 5);
        assert!(board.snapshot().iter().all(|view| view.is_hidden()));
    }

    #[test]
    fn first_reveal_is_never_a_mine() {
        for seed in [0, 1, 42, 1337] {
            for x in 0..5 {
                for y in 0..5 {
                    let mut board = Board::with_seed(config(5, 5, 8), seed);
                    let outcome = board.reveal((x, y)).unwrap();

                    assert!(outcome.has_update());
                    assert!(!board.is_lost());
                    assert!(board.mines_placed());
                    assert_ne!(board.squares[(x, y).grid_index()], Square::Mine);
                }
            }
        }
    }

    #[test]
    fn placement_stores_consistent_clues() {
        let mut board = Board::with_seed(config(7, 5, 11), 3);
        board.reveal((2, 2)).unwrap();

        let mine_count = board.squares.iter().filter(|sq| sq.is_mine()).count();
        assert_eq!(mine_count, 11);

        for ((x, y), &square) in board.squares.indexed_iter() {
            let Square::Clue(clue) = square else {
                continue;
            };
            let pos = (x as Axis, y as Axis);
            let adjacent_mines = board
                .squares
                .neighbors(pos)
                .filter(|&neighbor| board.squares[neighbor.grid_index()].is_mine())
                .count();
            assert_eq!(usize::from(clue), adjacent_mines);
        }
    }

    #[test]
    fn zero_reveal_cascades_until_nonzero_or_flagged() {
        let mut board = board((3, 3), &[(2, 2)]);
        board.toggle_flag((1, 1)).unwrap();

        let outcome = board.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Opened);
        assert_eq!(board.view((1, 1)).unwrap(), SquareView::Flagged);
        assert_eq!(board.view((2, 2)).unwrap(), SquareView::Hidden);
        assert_eq!(board.view((2, 1)).unwrap(), SquareView::Open(1));
        assert_eq!(board.view((1, 2)).unwrap(), SquareView::Open(1));
        assert_eq!(board.view((0, 0)).unwrap(), SquareView::Open(0));
        assert!(!board.is_won());

        // lifting the barrier and opening the last safe square wins
        board.toggle_flag((1, 1)).unwrap();
        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::Won);
        assert!(board.is_won());
    }

    #[test]
    fn mine_reveal_discloses_all_mines_and_freezes_the_board() {
        let mines = [(0, 0), (3, 3), (1, 2)];
        let mut board = board((4, 4), &mines);
        board.toggle_flag((3, 3)).unwrap();

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Exploded);
        assert!(board.is_lost());
        assert_eq!(board.phase(), Phase::Lost);
        for pos in mines {
            assert_eq!(board.view(pos).unwrap(), SquareView::Mine);
        }

        let frozen = board.clone();
        assert_eq!(board.reveal((2, 0)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag((2, 0)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(board, frozen);
        assert_eq!(board.flags_remaining(), 2);
    }

    #[test]
    fn win_requires_every_safe_square() {
        let mut board = board((2, 2), &[(0, 0)]);

        assert_eq!(board.reveal((1, 0)).unwrap(), RevealOutcome::Opened);
        assert!(!board.is_won());
        assert_eq!(board.reveal((1, 0)).unwrap(), RevealOutcome::NoChange);

        assert_eq!(board.reveal((0, 1)).unwrap(), RevealOutcome::Opened);
        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::Won);

        assert!(board.is_won());
        assert!(!board.is_lost());
        assert_eq!(board.phase(), Phase::Won);
    }

    #[test]
    fn flag_toggle_restores_the_counter() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.flags_remaining(), 1);
        assert_eq!(board.toggle_flag((1, 1)).unwrap(), FlagOutcome::Flagged);
        assert_eq!(board.flags_remaining(), 0);
        assert_eq!(board.toggle_flag((1, 1)).unwrap(), FlagOutcome::Unflagged);
        assert_eq!(board.flags_remaining(), 1);
        assert!(board.snapshot().iter().all(|view| view.is_hidden()));
    }

    #[test]
    fn overflagging_goes_negative() {
        let mut board = board((2, 2), &[(0, 0)]);

        board.toggle_flag((0, 0)).unwrap();
        board.toggle_flag((1, 0)).unwrap();
        board.toggle_flag((0, 1)).unwrap();

        assert_eq!(board.flags_remaining(), -2);
    }

    #[test]
    fn corner_cascade_wins_the_fixed_layout() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Won);
        assert!(board.is_won());
        for ((x, y), view) in board.snapshot().indexed_iter() {
            if (x, y) == (2, 2) {
                assert_eq!(*view, SquareView::Hidden);
            } else {
                assert!(matches!(view, SquareView::Open(_)));
            }
        }
    }

    #[test]
    fn near_full_board_first_reveal_wins_instantly() {
        let mut board = Board::with_seed(config(5, 5, 24), 9);

        assert_eq!(board.reveal((3, 2)).unwrap(), RevealOutcome::Won);
        assert!(board.is_won());
        assert!(!board.is_lost());
    }

    #[test]
    fn flagged_square_blocks_reveal_and_placement() {
        let mut board = Board::with_seed(config(4, 4, 3), 5);
        board.toggle_flag((1, 1)).unwrap();

        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::NoChange);
        assert!(!board.mines_placed());
        assert_eq!(board.view((1, 1)).unwrap(), SquareView::Flagged);
    }

    #[test]
    fn out_of_bounds_coordinates_are_rejected() {
        let mut board = board((3, 3), &[(0, 0)]);

        assert_eq!(board.reveal((3, 0)), Err(BoardError::OutOfBounds));
        assert_eq!(board.toggle_flag((0, 3)), Err(BoardError::OutOfBounds));
        assert_eq!(board.view((3, 3)), Err(BoardError::OutOfBounds));
    }

    #[test]
    fn same_seed_yields_the_same_layout() {
        let mut first = Board::with_seed(config(9, 9, 10), 2024);
        let mut second = Board::with_seed(config(9, 9, 10), 2024);

        first.reveal((4, 4)).unwrap();
        second.reveal((4, 4)).unwrap();

        assert_eq!(first.squares, second.squares);
    }

    #[test]
    fn toggle_flag_is_a_noop_on_revealed_squares() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.reveal((1, 1)).unwrap();

        assert_eq!(board.toggle_flag((1, 1)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(board.flags_remaining(), 1);
    }

    #[test]
    fn winning_then_revealing_a_mine_still_explodes() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.reveal((1, 0)).unwrap();
        board.reveal((0, 1)).unwrap();
        assert_eq!(board.reveal((1, 1)).unwrap(), RevealOutcome::Won);

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::Exploded);
        assert!(board.is_lost());
        assert!(board.is_won());
        assert_eq!(board.phase(), Phase::Lost);
    }

    #[test]
    fn duplicate_mine_coordinates_collapse() {
        let board = board((2, 2), &[(0, 0), (0, 0)]);
        assert_eq!(board.total_mines(), 1);
    }
}
