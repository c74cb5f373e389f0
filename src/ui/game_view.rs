use std::str::FromStr;

use crate::game::{Board, Cell, GameEngine, GameStatus, PlayerId};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    engine: &GameEngine,
    selected_column: usize,
    message: &Option<String>,
) {
    let board_height = engine.board().height() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(board_height),    // Board
            Constraint::Length(3),            // Message
            Constraint::Length(4),            // Controls
        ])
        .split(frame.area());

    render_header(frame, engine, chunks[0]);
    render_board(frame, engine, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, engine, chunks[3]);
}

/// Terminal color for a player's configured color string
fn player_color(engine: &GameEngine, id: PlayerId) -> Color {
    Color::from_str(&engine.player(id).color).unwrap_or(match id {
        PlayerId::One => Color::Red,
        PlayerId::Two => Color::Yellow,
    })
}

fn render_header(frame: &mut Frame, engine: &GameEngine, area: Rect) {
    let (status, color) = match engine.status() {
        GameStatus::NotStarted => ("Press 'r' to start".to_string(), Color::Gray),
        GameStatus::InProgress => {
            let current = engine.current_player();
            (
                format!("Current Player: {}", current.number()),
                player_color(engine, current),
            )
        }
        GameStatus::Won(winner) => (
            format!("Game Over  |  Player {} won", winner.number()),
            player_color(engine, winner),
        ),
        GameStatus::Tied => ("Game Over  |  Tie".to_string(), Color::Gray),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

/// Column numbers, with the selected column highlighted and full columns dimmed
fn column_labels(board: &Board, selected_column: usize) -> Line<'static> {
    let legal = board.legal_columns();
    let mut spans = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..board.width() {
        let label = format!("{:^3}", col + 1);
        let style = if col == selected_column {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if !legal.contains(&col) {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        spans.push(Span::styled(label, style));
    }
    spans.push(Span::raw("  ")); // Suffix padding to match " ║"
    Line::from(spans)
}

fn render_board(frame: &mut Frame, engine: &GameEngine, selected_column: usize, area: Rect) {
    let board: &Board = engine.board();
    let winning_run = engine.winning_run();
    let inner_width = board.width() * 3 + 1;
    let mut lines = Vec::new();

    lines.push(column_labels(board, selected_column));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(inner_width))));

    for (row, cells) in board.rows().enumerate() {
        let mut row_spans = vec![Span::raw("  ║")];

        for (col, cell) in cells.iter().enumerate() {
            let span = match *cell {
                Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
                Cell::Occupied(player) => {
                    let mut style = Style::default().fg(player_color(engine, player));
                    if winning_run.is_some_and(|run| run.contains(&(row, col))) {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    Span::styled(" ● ", style)
                }
            };
            row_spans.push(span);
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(inner_width))));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..board.width() {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

/// One colored label per player with its color-cycling key
fn player_legend(engine: &GameEngine) -> Line<'static> {
    let mut spans = Vec::new();
    for player in engine.players().iter() {
        if !spans.is_empty() {
            spans.push(Span::raw("   "));
        }
        let key = match player.id {
            PlayerId::One => 'C',
            PlayerId::Two => 'V',
        };
        spans.push(Span::styled(
            format!("Player {}", player.id.number()),
            Style::default()
                .fg(player_color(engine, player.id))
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(": {key} color")));
    }
    Line::from(spans)
}

fn render_controls(frame: &mut Frame, engine: &GameEngine, area: Rect) {
    let line1 = Line::from("←/→: Move  |  Enter/1-9: Drop  |  R: Restart  |  S: Save  |  Q: Quit");
    let line2 = player_legend(engine);

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    #[test]
    fn test_full_columns_are_dimmed() {
        let mut engine = GameEngine::default();
        engine
            .start(
                Player::new(PlayerId::One, "red"),
                Player::new(PlayerId::Two, "yellow"),
                4,
                5,
            )
            .unwrap();
        for col in [0, 1, 0, 1, 1, 0, 1] {
            engine.drop_piece(col).unwrap();
        }
        assert_eq!(engine.board().legal_columns(), vec![0, 2, 3, 4]);

        let line = column_labels(engine.board(), 3);
        // Leading padding, one label per column, trailing padding
        assert_eq!(line.spans.len(), 7);
        assert_eq!(line.spans[2].content, " 2 ");
        assert_eq!(line.spans[2].style.fg, Some(Color::DarkGray));
        assert_eq!(line.spans[1].style.fg, None);
        assert_eq!(line.spans[4].style.fg, Some(Color::Cyan));
    }

    #[test]
    fn test_player_legend_uses_player_colors() {
        let mut engine = GameEngine::default();
        engine.set_player_color(PlayerId::One, "blue");
        engine.set_player_color(PlayerId::Two, "not a color");

        let line = player_legend(&engine);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "Player 1: C color   Player 2: V color");
        assert_eq!(line.spans[0].style.fg, Some(Color::Blue));
        assert_eq!(line.spans[3].style.fg, Some(Color::Yellow));
    }
}
