//! Stateless UI rendering for the word grid.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use strictly_tiles::games::wordgrid::remaining_rack;
use strictly_tiles::{BOARD_SIZE, GameSession, Position, Premium, Severity};

use super::app::App;

/// Draws the main UI.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Min(18),    // Board and side panel
            Constraint::Length(3),  // Status
            Constraint::Length(3),  // Help
        ])
        .split(f.area());

    let title = Paragraph::new("Strictly Tiles")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(3 * BOARD_SIZE as u16 + 6), Constraint::Min(24)])
        .split(chunks[1]);
    draw_board(f, body[0], app.session());
    draw_side_panel(f, body[1], app);

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(status, chunks[2]);

    let help = Paragraph::new(concat!(
        "Letters: place | Shift+letter: blank | Enter: turn | Bksp/^Z: undo | ^Y: redo | ",
        "Esc: cancel | ^S: submit | ^P: pass | ^X: exchange | ^Q: quit",
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}

fn draw_board(f: &mut Frame, area: Rect, session: &GameSession) {
    let composition = session.composition();
    let board = session.board();

    let mut lines = Vec::with_capacity(BOARD_SIZE + 1);
    let header: String = (1..=BOARD_SIZE).map(|c| format!("{:>3}", c)).collect();
    lines.push(Line::from(Span::styled(
        format!("   {}", header),
        Style::default().fg(Color::DarkGray),
    )));

    for row in 0..BOARD_SIZE {
        let mut spans = vec![Span::styled(
            format!("{:>3}", row + 1),
            Style::default().fg(Color::DarkGray),
        )];
        for col in 0..BOARD_SIZE {
            let Some(pos) = Position::new(row, col) else {
                continue;
            };
            let cell = board.get(pos);
            let (text, mut style) = if let Some(tile) = cell.tile {
                let letter = tile.letter.map_or('?', |l| l.as_char());
                let letter = if tile.is_blank { letter.to_ascii_lowercase() } else { letter };
                (
                    format!(" {} ", letter),
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
            } else if let Some(ghost) = composition.ghost_at(pos) {
                let letter = if ghost.is_blank {
                    ghost.letter.as_char().to_ascii_lowercase()
                } else {
                    ghost.letter.as_char()
                };
                (
                    format!(" {} ", letter),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )
            } else {
                premium_mark(cell.premium)
            };

            if composition.selected() == Some(pos) {
                if cell.is_empty() && composition.ghost_at(pos).is_none() {
                    let arrow = composition.direction().arrow();
                    push_cursor(&mut spans, arrow);
                    continue;
                }
                style = style.add_modifier(Modifier::REVERSED);
            } else if composition.is_valid_target(pos) {
                style = style.bg(Color::Rgb(30, 45, 70));
            }
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    let title = format!("Board ({})", composition.phase());
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

fn push_cursor(spans: &mut Vec<Span<'static>>, arrow: char) {
    spans.push(Span::styled(
        format!(" {} ", arrow),
        Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD),
    ));
}

fn premium_mark(premium: Option<Premium>) -> (String, Style) {
    match premium {
        Some(Premium::TripleWord) => ("3W ".into(), Style::default().fg(Color::Red)),
        Some(Premium::DoubleWord) => ("2W ".into(), Style::default().fg(Color::Magenta)),
        Some(Premium::TripleLetter) => ("3L ".into(), Style::default().fg(Color::Blue)),
        Some(Premium::DoubleLetter) => ("2L ".into(), Style::default().fg(Color::Cyan)),
        Some(Premium::Center) => (" * ".into(), Style::default().fg(Color::Magenta)),
        None => (" . ".into(), Style::default().fg(Color::DarkGray)),
    }
}

fn draw_side_panel(f: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let game = session.game();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(game.players.len() as u16 + 3),
            Constraint::Min(3),
        ])
        .split(area);

    // Tiles already standing on the board as ghosts are not shown.
    let rack: Vec<Span> = remaining_rack(session.acting_rack(), session.composition().ghost_tiles())
        .iter()
        .map(|tile| {
            Span::styled(
                format!(" {} ", tile.label()),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            )
        })
        .flat_map(|span| [span, Span::raw(" ")])
        .collect();
    let rack = Paragraph::new(vec![Line::from(rack), Line::from(app.turn_message())])
        .block(Block::default().borders(Borders::ALL).title("Rack"));
    f.render_widget(rack, chunks[0]);

    let owner = game.current_turn_player_id.as_deref();
    let mut score_lines: Vec<Line> = game
        .players
        .iter()
        .map(|p| {
            let marker = if Some(p.id().as_str()) == owner { "▶" } else { " " };
            Line::from(format!("{} {:<12} {:>4}", marker, p.name(), p.score()))
        })
        .collect();
    score_lines.push(Line::from(Span::styled(
        format!("Bag: {}  ({})", game.bag_count, game.status),
        Style::default().fg(Color::DarkGray),
    )));
    let scores = Paragraph::new(score_lines)
        .block(Block::default().borders(Borders::ALL).title("Scores"));
    f.render_widget(scores, chunks[1]);

    let warnings: Vec<Line> = session
        .composition()
        .warnings()
        .iter()
        .map(|w| {
            let color = match w.severity {
                Severity::Error => Color::Red,
                Severity::Warning => Color::Yellow,
            };
            Line::from(Span::styled(w.to_string(), Style::default().fg(color)))
        })
        .collect();
    let warnings = Paragraph::new(warnings)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Warnings"));
    f.render_widget(warnings, chunks[2]);
}
