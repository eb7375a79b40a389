//! Plain-text presentation of boards and results.

use crate::games::morpion::{Board, Cell, Coord, LineKind, Mark};
use crate::session::{Outcome, RenderInstruction};
use tracing::instrument;

fn symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Occupied(Mark::X) => 'X',
        Cell::Occupied(Mark::O) => 'O',
    }
}

/// Draws the board with row and column numbers. Cells in `highlight` are
/// wrapped in brackets.
#[instrument(skip_all)]
pub fn board_text(board: &Board, highlight: &[Coord]) -> String {
    let n = board.dimension();
    let mut out = String::from("  ");
    for col in 0..n {
        out.push_str(&format!(" {col} "));
    }
    out.push('\n');

    for (row, cells) in board.rows().enumerate() {
        out.push_str(&format!("{row} "));
        for (col, cell) in cells.iter().enumerate() {
            let c = symbol(*cell);
            if highlight.contains(&Coord::new(row, col)) {
                out.push_str(&format!("[{c}]"));
            } else {
                out.push_str(&format!(" {c} "));
            }
        }
        out.push('\n');
    }
    out
}

fn line_name(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Row => "row",
        LineKind::Column => "column",
        LineKind::Diagonal | LineKind::AntiDiagonal => "diagonal",
    }
}

/// One-line status message, or `None` when nothing should be shown.
pub fn describe(instruction: &RenderInstruction) -> Option<String> {
    match instruction {
        RenderInstruction::Ignored => None,
        RenderInstruction::Continue { active, .. } => Some(format!("{active} to play.")),
        RenderInstruction::Terminal { outcome, .. } => Some(match outcome {
            Outcome::Won { winner, line } => {
                format!("{winner} wins with a {}!", line_name(line.kind))
            }
            Outcome::Draw => "It's a draw!".to_string(),
            Outcome::TimedOut => "Game ended due to inactivity.".to_string(),
        }),
    }
}

/// Board plus status message for a render instruction.
pub fn render(instruction: &RenderInstruction) -> Option<String> {
    let message = describe(instruction)?;
    let board = match instruction {
        RenderInstruction::Ignored => return None,
        RenderInstruction::Continue { board, .. } => board_text(board, &[]),
        RenderInstruction::Terminal { board, outcome } => {
            board_text(board, outcome.winning_cells())
        }
    };
    Some(format!("{board}{message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::morpion::{BoardSize, Participant, PlayerId, check_win};

    #[test]
    fn test_board_text_marks_cells() {
        let mut board = Board::new(BoardSize::Three);
        board.apply_move(Coord::new(0, 0), Mark::X);
        board.apply_move(Coord::new(1, 1), Mark::O);
        let text = board_text(&board, &[]);
        assert_eq!(text, "   0  1  2 \n0  X  .  . \n1  .  O  . \n2  .  .  . \n");
    }

    #[test]
    fn test_winning_cells_highlighted() {
        let mut board = Board::new(BoardSize::Three);
        for col in 0..3 {
            board.apply_move(Coord::new(2, col), Mark::O);
        }
        let line = check_win(&board, Mark::O).expect("bottom row");
        let text = board_text(&board, &line.cells);
        assert!(text.contains("2 [O][O][O]"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&RenderInstruction::Ignored), None);
        let next = RenderInstruction::Continue {
            board: Board::new(BoardSize::Three),
            active: Participant::Human(PlayerId(42)),
        };
        assert_eq!(describe(&next).as_deref(), Some("<@42> to play."));
        let timed_out = RenderInstruction::Terminal {
            board: Board::new(BoardSize::Three),
            outcome: Outcome::TimedOut,
        };
        assert_eq!(
            describe(&timed_out).as_deref(),
            Some("Game ended due to inactivity.")
        );
    }
}
