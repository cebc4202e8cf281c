//! Checkers game logic with bitboard state representation.
//!
//! # Board Encoding
//!
//! Pieces live only on the 32 dark squares ((row + col) odd), so each side
//! fits in a 32-bit mask indexed by dark-square number:
//!
//! ```text
//! index = row * 4 + col / 2
//!
//!    .  0  .  1  .  2  .  3     row 0
//!    4  .  5  .  6  .  7  .     row 1
//!    .  8  .  9  . 10  . 11     row 2
//!   12  . 13  . 14  . 15  .     row 3
//!    . 16  . 17  . 18  . 19     row 4
//!   20  . 21  . 22  . 23  .     row 5
//!    . 24  . 25  . 26  . 27     row 6
//!   28  . 29  . 30  . 31  .     row 7
//! ```
//!
//! A [`Board`] is three such masks: dark pieces, light pieces, kings. Dark
//! starts on rows 0-2 and advances toward row 7; Light starts on rows 5-7
//! and advances toward row 0. A man reaching its crowning row becomes a
//! king and gains all four diagonal directions.
//!
//! # Rules
//!
//! Simplified checkers: a piece steps one square diagonally onto an empty
//! square, or jumps one adjacent enemy piece onto the empty square beyond,
//! capturing it. Every jump ends the turn - there are no forced captures
//! and no multi-jump chains. A player with no pieces, or with pieces but no
//! legal move, loses.
//!
//! The engine is a pure library: [`GameState`] is replaced wholesale by
//! every operation, never mutated in place, so a UI can hold the previous
//! state for free and the logic is testable without any UI at all.

use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
pub mod wasm;

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    Dark = 1,
    Light = 2,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Dark => Player::Light,
            Player::Light => Player::Dark,
        }
    }

    /// Row delta of this player's forward direction.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Player::Dark => 1,
            Player::Light => -1,
        }
    }

    /// The row on which this player's men are crowned.
    #[inline]
    pub fn crowning_row(self) -> u8 {
        match self {
            Player::Dark => 7,
            Player::Light => 0,
        }
    }
}

/// A piece on the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Piece {
    pub owner: Player,
    pub king: bool,
}

/// Position on the 8x8 board (0-63, row-major).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from row and column (0-7 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 8 && col < 8);
        Pos(row * 8 + col)
    }

    /// Get the row (0-7).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 8
    }

    /// Get the column (0-7).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 8
    }

    /// Check if this is a dark (playable) square.
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    /// Step diagonally by (dr, dc). Returns None when off the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Pos> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Pos::from_row_col(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Iterate over all 64 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..64).map(Pos)
    }

    /// Iterate over the 32 dark (playable) squares.
    pub fn dark_squares() -> impl Iterator<Item = Pos> {
        Pos::all().filter(|pos| pos.is_dark())
    }
}

/// A move in the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Move {
    /// A simple diagonal step onto an empty square.
    Step { from: Pos, to: Pos },
    /// A jump over an adjacent enemy piece onto the empty square beyond.
    /// `over` is the captured square (the diagonal midpoint).
    Jump { from: Pos, to: Pos, over: Pos },
}

impl Move {
    /// Get the source position of the move.
    #[inline]
    pub fn source(&self) -> Pos {
        match self {
            Move::Step { from, .. } => *from,
            Move::Jump { from, .. } => *from,
        }
    }

    /// Get the destination position of the move.
    #[inline]
    pub fn to(&self) -> Pos {
        match self {
            Move::Step { to, .. } => *to,
            Move::Jump { to, .. } => *to,
        }
    }

    /// Get the captured square for jumps, None for steps.
    #[inline]
    pub fn captured(&self) -> Option<Pos> {
        match self {
            Move::Step { .. } => None,
            Move::Jump { over, .. } => Some(*over),
        }
    }
}

/// Compact board state - three 32-bit masks over the dark squares.
///
/// See module documentation for encoding details.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Board {
    dark: u32,
    light: u32,
    kings: u32,
}

impl Board {
    /// The four diagonal directions, in generation order.
    const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

    /// Create an empty board.
    #[inline]
    pub fn empty() -> Board {
        Board {
            dark: 0,
            light: 0,
            kings: 0,
        }
    }

    /// Create the starting board: 12 men per side on dark squares, Dark on
    /// rows 0-2, Light on rows 5-7.
    pub fn initial() -> Board {
        let mut board = Board::empty();
        for pos in Pos::dark_squares() {
            let owner = match pos.row() {
                0..=2 => Player::Dark,
                5..=7 => Player::Light,
                _ => continue,
            };
            board.set_piece(pos, Piece { owner, king: false });
        }
        board
    }

    /// Bit for a dark square. Meaningless for light squares; callers guard
    /// with `is_dark`.
    #[inline]
    fn bit(pos: Pos) -> u32 {
        1 << (pos.row() as u32 * 4 + pos.col() as u32 / 2)
    }

    /// Get the piece at a position. Returns None for empty squares and for
    /// light squares, which never hold pieces.
    #[inline]
    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        if !pos.is_dark() {
            return None;
        }
        let bit = Self::bit(pos);
        let owner = if self.dark & bit != 0 {
            Player::Dark
        } else if self.light & bit != 0 {
            Player::Light
        } else {
            return None;
        };
        Some(Piece {
            owner,
            king: self.kings & bit != 0,
        })
    }

    /// Check if a square is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.piece_at(pos).is_none()
    }

    /// Put a piece on a dark square, replacing whatever was there.
    /// Does NOT validate - caller must ensure the placement is legal.
    #[inline]
    pub fn set_piece(&mut self, pos: Pos, piece: Piece) {
        debug_assert!(pos.is_dark());
        let bit = Self::bit(pos);
        self.dark &= !bit;
        self.light &= !bit;
        self.kings &= !bit;
        match piece.owner {
            Player::Dark => self.dark |= bit,
            Player::Light => self.light |= bit,
        }
        if piece.king {
            self.kings |= bit;
        }
    }

    /// Remove and return the piece at a position, if any.
    #[inline]
    pub fn remove_piece(&mut self, pos: Pos) -> Option<Piece> {
        let piece = self.piece_at(pos)?;
        let bit = Self::bit(pos);
        self.dark &= !bit;
        self.light &= !bit;
        self.kings &= !bit;
        Some(piece)
    }

    /// Count pieces on the board for a player.
    #[inline]
    pub fn piece_count(&self, player: Player) -> u32 {
        match player {
            Player::Dark => self.dark.count_ones(),
            Player::Light => self.light.count_ones(),
        }
    }

    // ========== Move Generation ==========

    /// Generate the legal moves for the piece at `from`, in a fixed
    /// direction order.
    ///
    /// Men move only toward their crowning row; kings use all four
    /// diagonals. Per direction: a step onto an empty square, or a jump
    /// over an adjacent enemy piece onto the empty square beyond.
    /// Off-board destinations are silently omitted. An empty square (or a
    /// light square) yields no moves.
    ///
    /// No lookahead happens here: captures are never forced and a jump
    /// never chains into another, so each entry is a complete turn.
    pub fn legal_moves(&self, from: Pos) -> Vec<Move> {
        let piece = match self.piece_at(from) {
            Some(piece) => piece,
            None => return Vec::new(),
        };
        let mut moves = Vec::with_capacity(4);

        for (dr, dc) in Self::DIAGONALS {
            if !piece.king && dr != piece.owner.forward() {
                continue;
            }
            let step = match from.offset(dr, dc) {
                Some(step) => step,
                None => continue,
            };
            match self.piece_at(step) {
                // Empty neighbor: simple step.
                None => moves.push(Move::Step { from, to: step }),
                // Enemy neighbor: jump if the square beyond is on the
                // board and empty.
                Some(neighbor) if neighbor.owner != piece.owner => {
                    if let Some(landing) = step.offset(dr, dc) {
                        if self.is_empty(landing) {
                            moves.push(Move::Jump {
                                from,
                                to: landing,
                                over: step,
                            });
                        }
                    }
                }
                // Own piece blocks the direction entirely.
                Some(_) => {}
            }
        }

        moves
    }

    /// Check whether a player has at least one legal move.
    pub fn has_any_move(&self, player: Player) -> bool {
        Pos::dark_squares().any(|pos| {
            matches!(self.piece_at(pos), Some(piece) if piece.owner == player)
                && !self.legal_moves(pos).is_empty()
        })
    }

    /// Check whether `player` has lost: no pieces left, or pieces but no
    /// legal move for any of them. Both causes end the game the same way.
    pub fn is_game_over(&self, player: Player) -> bool {
        self.piece_count(player) == 0 || !self.has_any_move(player)
    }

    // ========== Move Application ==========

    /// Apply a move to the board: relocate the piece, remove the jumped
    /// piece for jumps, and crown the mover when it reaches its crowning
    /// row. Does NOT validate - callers check membership in `legal_moves`.
    pub fn apply(&mut self, mov: Move) {
        let mut piece = self.remove_piece(mov.source()).expect("No piece at source");
        if let Some(over) = mov.captured() {
            self.remove_piece(over);
        }
        if mov.to().row() == piece.owner.crowning_row() {
            piece.king = true;
        }
        self.set_piece(mov.to(), piece);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                let ch = match self.piece_at(Pos::from_row_col(row, col)) {
                    Some(Piece { owner: Player::Dark, king: false }) => 'd',
                    Some(Piece { owner: Player::Dark, king: true }) => 'D',
                    Some(Piece { owner: Player::Light, king: false }) => 'l',
                    Some(Piece { owner: Player::Light, king: true }) => 'L',
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Game result.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Winner(Player),
}

/// Complete game state as seen by the UI.
///
/// Every operation consumes `&self` and returns a fresh `GameState`; no
/// partial mutation is ever observable between moves. `legal_moves` is
/// always the move set of `selection` and empty when nothing is selected.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_player: Player,
    pub selection: Option<Pos>,
    pub legal_moves: Vec<Move>,
    pub outcome: Outcome,
}

impl GameState {
    /// Start a fresh game. Light moves first.
    pub fn new() -> GameState {
        GameState {
            board: Board::initial(),
            current_player: Player::Light,
            selection: None,
            legal_moves: Vec::new(),
            outcome: Outcome::InProgress,
        }
    }

    /// Select the piece at `pos` and compute its legal moves.
    ///
    /// Selecting an empty square, an opponent piece, or anything once the
    /// game is over clears the selection instead; there is nothing to
    /// report to the caller beyond the resulting state.
    pub fn select(&self, pos: Pos) -> GameState {
        let mut next = self.clone();
        next.selection = None;
        next.legal_moves = Vec::new();
        if next.outcome != Outcome::InProgress {
            return next;
        }
        if let Some(piece) = next.board.piece_at(pos) {
            if piece.owner == next.current_player {
                next.legal_moves = next.board.legal_moves(pos);
                next.selection = Some(pos);
            }
        }
        next
    }

    /// Apply the move from `from` to `to` and pass the turn.
    ///
    /// The move must be in the legal set of `from` for the current player;
    /// otherwise (including once the game is over) the returned state
    /// equals the input and nothing happens. The engine never panics on a
    /// bad move - the UI is expected to gate clicks on `legal_moves`, and
    /// anything that slips through is ignored.
    ///
    /// After a successful move the opponent becomes the current player and
    /// the termination check runs: if the opponent has no pieces or no
    /// legal moves, the mover wins. The two causes are not distinguished.
    pub fn apply_move(&self, from: Pos, to: Pos) -> GameState {
        if self.outcome != Outcome::InProgress {
            return self.clone();
        }
        let mover = self.current_player;
        match self.board.piece_at(from) {
            Some(piece) if piece.owner == mover => {}
            _ => return self.clone(),
        }
        let mov = match self.board.legal_moves(from).into_iter().find(|m| m.to() == to) {
            Some(mov) => mov,
            None => return self.clone(),
        };

        let mut board = self.board;
        board.apply(mov);

        let opponent = mover.opponent();
        let outcome = if board.is_game_over(opponent) {
            Outcome::Winner(mover)
        } else {
            Outcome::InProgress
        };

        GameState {
            board,
            current_player: opponent,
            selection: None,
            legal_moves: Vec::new(),
            outcome,
        }
    }

    /// Check if the game has ended.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    /// Get the winner, or None while the game is in progress.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Outcome::InProgress => None,
            Outcome::Winner(player) => Some(player),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
