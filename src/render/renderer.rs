use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Position, Role, Snapshot};
use crate::metrics::GameMetrics;

/// Terminal columns used by one grid cell
pub const CELL_COLUMNS: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Inner area of the board block for a frame of the given size
    pub fn board_area(&self, area: Rect) -> Rect {
        let chunks = Self::split(area);
        Self::board_block().inner(chunks[1])
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Self::split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let grid = self.render_grid(snapshot);
        frame.render_widget(grid, chunks[1]);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn split(area: Rect) -> std::rc::Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(area)
    }

    fn board_block() -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ")
    }

    fn cell(role: Option<Role>) -> Span<'static> {
        match role {
            Some(Role::Head) => Span::styled(
                "■ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Some(Role::Body) => Span::styled("□ ", Style::default().fg(Color::Green)),
            Some(Role::Food) => Span::styled(
                "O ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
        }
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        // bounds are inclusive, so the board is one cell wider and taller
        // than the dims say
        let lines: Vec<Line> = (0..=snapshot.dims.height)
            .map(|y| {
                let spans: Vec<Span> = (0..=snapshot.dims.width)
                    .map(|x| Self::cell(snapshot.role_at(Position::new(x, y))))
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(Self::board_block())
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                snapshot.len().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Food: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.food_eaten.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
            Span::styled(snapshot.tick.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("Click", Style::default().fg(Color::Cyan)),
            Span::raw(" an edge, "),
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to turn | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
