use gridsweep_core::*;

/// Draws what the player sees, with lettered columns and 1-based row numbers.
pub fn render_visible(board: &VisibleBoard) -> String {
    render_grid(board.size(), |coords| visible_symbol(board[coords]))
}

/// Draws the full mine layout.
pub fn render_hidden(board: &HiddenBoard) -> String {
    render_grid(board.size(), |coords| hidden_symbol(board[coords]))
}

fn visible_symbol(cell: VisibleCell) -> char {
    match cell {
        VisibleCell::Hidden => 'O',
        VisibleCell::Flagged => 'P',
        VisibleCell::Revealed(label) => match label {
            Label::Number(count) => count_symbol(count),
            Label::Blank => ' ',
            Label::FlagCovered => 'P',
            Label::MineExposed => 'X',
            Label::MineDisarmed => 'x',
        },
    }
}

fn hidden_symbol(cell: HiddenCell) -> char {
    match cell {
        HiddenCell::Mine => 'X',
        HiddenCell::Clear(0) => ' ',
        HiddenCell::Clear(count) => count_symbol(count),
    }
}

fn count_symbol(count: u8) -> char {
    char::from_digit(count.into(), 10).unwrap_or('?')
}

fn render_grid(size: Coord2, symbol: impl Fn(Coord2) -> char) -> String {
    let (rows, cols) = size;
    let mut out = String::from("    ");
    for col in 0..cols {
        out.push('[');
        out.push(column_label(col));
        out.push(']');
    }
    out.push('\n');

    for row in 0..rows {
        let label = format!("[{}]", u16::from(row) + 1);
        out.push_str(&format!("{:>4} ", label));
        let cells: Vec<String> = (0..cols).map(|col| symbol((row, col)).to_string()).collect();
        out.push_str(&cells.join("  "));
        out.push('\n');
    }
    out
}
