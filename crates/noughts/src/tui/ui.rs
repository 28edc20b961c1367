//! Stateless UI rendering.

use super::app::App;
use noughts_engine::{Board, Player, Position, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const HELP: &str = "arrows/1-9 move  enter place  n new  u undo  m mode  s reset  q quit";

/// Renders the whole screen from application state.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Scores
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let engine = app.engine();
    let title = Paragraph::new(format!("Noughts - {}", engine.mode().name()))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let score = engine.scoreboard();
    let scores = Paragraph::new(format!(
        "X wins: {}   O wins: {}   Draws: {}",
        score.x_wins(),
        score.o_wins(),
        score.draws()
    ))
    .alignment(Alignment::Center);
    frame.render_widget(scores, chunks[1]);

    draw_board(frame, chunks[2], app);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);

    if let Some(end) = app.popup() {
        let area = center_rect(frame.area(), 30, 5);
        let popup = Paragraph::new(vec![
            Line::from(Span::styled(
                end.message(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("press any key"),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().title("Round over").borders(Borders::ALL));
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for (row, chunk) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        draw_row(frame, chunk, app, row);
    }
    draw_separator(frame, rows[1]);
    draw_separator(frame, rows[3]);
}

fn draw_row(frame: &mut Frame, area: Rect, app: &App, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..3 {
        if let Some(pos) = Position::from_index(row * 3 + col) {
            draw_cell(frame, cols[col * 2], app, pos);
        }
    }
    draw_separator_vertical(frame, cols[1]);
    draw_separator_vertical(frame, cols[3]);
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, pos: Position) {
    let board: &Board = app.engine().state().board();
    let index = pos.to_index();

    let (symbol, mut style) = match board.get(index) {
        Some(Square::Occupied(Player::X)) => {
            (" X ", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
        }
        Some(Square::Occupied(Player::O)) => {
            (" O ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        }
        _ => (" · ", Style::default().fg(Color::DarkGray)),
    };

    if app.winning_line().is_some_and(|line| line.contains(&index)) {
        style = style.bg(Color::Green).fg(Color::Black);
    } else if !app.board_enabled() {
        style = style.add_modifier(Modifier::DIM);
    } else if pos == app.cursor() {
        style = style.bg(Color::White).fg(Color::Black);
    }

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("──────────────────────────────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use noughts_engine::GameMode;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::{Duration, Instant};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_scores_and_status() {
        let app = App::new(GameMode::VsComputer, Duration::ZERO);
        let screen = render(&app);
        assert!(screen.contains("Noughts - Vs computer"));
        assert!(screen.contains("X wins: 0   O wins: 0   Draws: 0"));
        assert!(screen.contains("X to move"));
    }

    #[test]
    fn test_renders_popup_after_win() {
        let mut app = App::new(GameMode::Local, Duration::ZERO);
        for c in "14253".chars() {
            app.handle_key(KeyCode::Char(c), Instant::now());
        }
        let screen = render(&app);
        assert!(screen.contains("Round over"));
        assert!(screen.contains("X wins!"));
        assert!(screen.contains("X wins: 1"));
    }
}
