//! WASM bindings for checkers-core
//!
//! Provides a JavaScript-friendly API for the rules engine. The UI renders
//! the board and forwards cell clicks; all rule decisions happen here.

use wasm_bindgen::prelude::*;

use crate::{GameState, Move, Outcome, Piece, Player, Pos};

/// WASM-friendly wrapper around GameState
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a fresh game
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame {
            inner: GameState::new(),
        }
    }

    /// Reset to the starting position
    pub fn reset(&mut self) {
        self.inner = GameState::new();
    }

    /// Current player (1 = dark, 2 = light)
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.current_player as u8
    }

    /// Handle a cell click. Returns true if the click changed anything.
    ///
    /// A click on a legal destination of the selected piece applies the
    /// move; a click on one of the current player's pieces selects it;
    /// anything else clears the selection.
    #[wasm_bindgen(js_name = clickCell)]
    pub fn click_cell(&mut self, row: u8, col: u8) -> bool {
        if row >= 8 || col >= 8 {
            return false;
        }
        let pos = Pos::from_row_col(row, col);

        if let Some(from) = self.inner.selection {
            if self.inner.legal_moves.iter().any(|m| m.to() == pos) {
                self.inner = self.inner.apply_move(from, pos);
                return true;
            }
        }

        let next = self.inner.select(pos);
        let changed = next.selection != self.inner.selection;
        self.inner = next;
        changed
    }

    /// Get the piece at a cell as [player, is_king], or [] if empty
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, row: u8, col: u8) -> Vec<u8> {
        if row >= 8 || col >= 8 {
            return vec![];
        }
        match self.inner.board.piece_at(Pos::from_row_col(row, col)) {
            Some(Piece { owner, king }) => vec![owner as u8, king as u8],
            None => vec![],
        }
    }

    /// Get the selected cell as [row, col], or [] if nothing is selected
    pub fn selection(&self) -> Vec<u8> {
        match self.inner.selection {
            Some(pos) => vec![pos.row(), pos.col()],
            None => vec![],
        }
    }

    /// Get the selected piece's legal moves as a JSON array.
    /// Each move is { from: [row, col], to: [row, col], captures: [row, col] | null }
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> JsValue {
        let moves: Vec<WasmMove> = self
            .inner
            .legal_moves
            .iter()
            .copied()
            .map(WasmMove::from)
            .collect();
        serde_wasm_bindgen::to_value(&moves).unwrap()
    }

    /// Check if the game has ended
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_over()
    }

    /// Get game result: "ongoing", "dark_wins", or "light_wins"
    pub fn result(&self) -> String {
        match self.inner.outcome {
            Outcome::InProgress => "ongoing".to_string(),
            Outcome::Winner(Player::Dark) => "dark_wins".to_string(),
            Outcome::Winner(Player::Light) => "light_wins".to_string(),
        }
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable move for JavaScript
#[derive(serde::Serialize)]
struct WasmMove {
    from: [u8; 2],
    to: [u8; 2],
    captures: Option<[u8; 2]>,
}

impl From<Move> for WasmMove {
    fn from(mov: Move) -> Self {
        WasmMove {
            from: [mov.source().row(), mov.source().col()],
            to: [mov.to().row(), mov.to().col()],
            captures: mov.captured().map(|over| [over.row(), over.col()]),
        }
    }
}
