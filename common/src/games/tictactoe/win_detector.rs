use super::board::Board;
use super::types::{Mark, Outcome, Symbol, WinningLine};

/// Rows, then columns, then diagonals. Scan order decides which line is
/// reported when several are complete.
pub const WIN_LINES: [WinningLine; 8] = [
    WinningLine([0, 1, 2]),
    WinningLine([3, 4, 5]),
    WinningLine([6, 7, 8]),
    WinningLine([0, 3, 6]),
    WinningLine([1, 4, 7]),
    WinningLine([2, 5, 8]),
    WinningLine([0, 4, 8]),
    WinningLine([2, 4, 6]),
];

pub fn check_win_with_line(board: &Board) -> Option<(Symbol, WinningLine)> {
    let cells = board.cells();
    WIN_LINES.iter().find_map(|line| {
        let [a, b, c] = line.cells();
        let mark = cells[a];
        if mark != Mark::Empty && mark == cells[b] && mark == cells[c] {
            mark.symbol().map(|symbol| (symbol, *line))
        } else {
            None
        }
    })
}

pub fn check_win(board: &Board) -> Option<Symbol> {
    check_win_with_line(board).map(|(symbol, _)| symbol)
}

pub fn evaluate(board: &Board) -> Outcome {
    if let Some((symbol, line)) = check_win_with_line(board) {
        return Outcome::Win { symbol, line };
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
