use log::{debug, trace};

use crate::tic_tac_toe::{Move, Outcome, Player, TicTacToe};

/// Game value with X as the maximizing side: 1 X wins, -1 O wins, 0 draw.
pub(crate) type Score = i8;

// Window bounds, strictly outside every reachable score.
pub(crate) const SCORE_MIN: Score = -2;
pub(crate) const SCORE_MAX: Score = 2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SearchStats {
    pub(crate) nodes: usize,
    pub(crate) cutoffs: usize,
}

/// Exhaustive minimax with alpha-beta pruning.
///
/// The board is borrowed mutably for the duration of a call and every
/// simulated move is undone before the call returns.
#[derive(Debug, Default)]
pub(crate) struct Minimax {
    stats: SearchStats,
}

impl Minimax {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Counters for the most recent `best_move` call.
    pub(crate) fn stats(&self) -> SearchStats {
        self.stats
    }

    pub(crate) fn best_move(&mut self, board: &mut TicTacToe, player: Player) -> Option<Move> {
        self.stats = SearchStats::default();
        // After `player` moves it is the opponent's turn in the child position.
        let maximizing = player.opponent() == Player::X;
        let mut best: Option<(Move, Score)> = None;

        for mv in board.legal_moves() {
            board.apply(mv, player);
            let score = self.minimax(board, maximizing, SCORE_MIN, SCORE_MAX);
            board.undo(mv);

            let value = match player {
                Player::X => score,
                Player::O => -score,
            };
            trace!("{} at {} scores {}", player, mv, value);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((mv, value));
            }
        }

        if let Some((mv, value)) = best {
            debug!(
                "best move for {}: {} (value {}, {} nodes, {} cutoffs)",
                player, mv, value, self.stats.nodes, self.stats.cutoffs
            );
        }
        best.map(|(mv, _)| mv)
    }

    pub(crate) fn minimax(
        &mut self,
        board: &mut TicTacToe,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.stats.nodes += 1;

        match board.outcome() {
            Outcome::WinX => return 1,
            Outcome::WinO => return -1,
            Outcome::Draw => return 0,
            Outcome::InProgress => {}
        }

        let moves = board.legal_moves();
        assert!(!moves.is_empty(), "in-progress board without legal moves:\n{}", board);

        if maximizing {
            let mut best = SCORE_MIN;
            for mv in moves {
                board.apply(mv, Player::X);
                let value = self.minimax(board, false, alpha, beta);
                board.undo(mv);
                best = best.max(value);
                alpha = alpha.max(best);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        } else {
            let mut best = SCORE_MAX;
            for mv in moves {
                board.apply(mv, Player::O);
                let value = self.minimax(board, true, alpha, beta);
                board.undo(mv);
                best = best.min(value);
                beta = beta.min(best);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
            best
        }
    }
}
