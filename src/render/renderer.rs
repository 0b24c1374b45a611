use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CollisionType, GameConfig, GridPosition, Snapshot};
use crate::metrics::GameMetrics;

/// What occupies a cell, in drawing priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Apple,
    Body,
    Head,
}

/// Character grid of the play field, one entry per cell
struct Canvas {
    width: usize,
    height: usize,
    cell_size: i32,
    cells: Vec<Cell>,
}

impl Canvas {
    fn new(config: &GameConfig) -> Self {
        Self {
            width: config.grid_width,
            height: config.grid_height,
            cell_size: config.cell_size,
            cells: vec![Cell::Empty; config.grid_width * config.grid_height],
        }
    }

    fn paint(&mut self, pos: GridPosition, cell: Cell) {
        let (col, row) = pos.cell(self.cell_size);
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return;
        }
        let slot = &mut self.cells[row as usize * self.width + col as usize];
        if cell as u8 > *slot as u8 {
            *slot = cell;
        }
    }

    fn draw_square(&mut self, pos: GridPosition, cell: Cell) {
        self.paint(pos, cell);
    }

    fn draw_squares(&mut self, positions: &[GridPosition], cell: Cell) {
        for &pos in positions {
            self.paint(pos, cell);
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        self.cells
            .chunks(self.width)
            .map(|row| Line::from(row.iter().map(|&cell| styled(cell)).collect::<Vec<_>>()))
            .collect()
    }
}

fn styled(cell: Cell) -> Span<'static> {
    match cell {
        Cell::Head => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Cell::Body => Span::styled("■ ", Style::default().fg(Color::Gray)),
        Cell::Apple => Span::styled(
            "● ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Cell::Empty => Span::styled("· ", Style::default().fg(Color::DarkGray)),
    }
}

#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        config: &GameConfig,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if snapshot.alive {
            frame.render_widget(self.render_field(config, snapshot), game_area);
        } else {
            frame.render_widget(self.render_game_over(snapshot), game_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_field(&self, config: &GameConfig, snapshot: &Snapshot) -> Paragraph<'static> {
        let mut canvas = Canvas::new(config);
        canvas.draw_square(snapshot.apple, Cell::Apple);
        canvas.draw_squares(&snapshot.body, Cell::Body);
        canvas.draw_square(snapshot.head, Cell::Head);

        Paragraph::new(canvas.lines())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let cause = match snapshot.collision {
            Some(CollisionType::Wall) => "You hit the wall",
            Some(CollisionType::SelfCollision) => "You bit yourself",
            None => "",
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" restart  "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_paints_by_priority() {
        let config = GameConfig::new(3, 2);
        let mut canvas = Canvas::new(&config);
        let here = GridPosition::new(15, 0);

        canvas.draw_square(here, Cell::Head);
        canvas.draw_squares(&[here, GridPosition::new(0, 15)], Cell::Body);
        canvas.draw_square(GridPosition::new(0, 15), Cell::Apple);

        assert_eq!(canvas.cells[1], Cell::Head);
        assert_eq!(canvas.cells[3], Cell::Body);
        assert_eq!(canvas.cells[0], Cell::Empty);
    }

    #[test]
    fn test_canvas_skips_off_field_positions() {
        let config = GameConfig::new(3, 2);
        let mut canvas = Canvas::new(&config);

        canvas.draw_square(GridPosition::new(45, 0), Cell::Head);
        canvas.draw_square(GridPosition::new(-15, 0), Cell::Head);

        assert!(canvas.cells.iter().all(|&cell| cell == Cell::Empty));
        assert_eq!(canvas.lines().len(), 2);
    }
}
