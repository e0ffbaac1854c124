use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Position, Snapshot};
use crate::session::SessionStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Apple,
    Head,
    Body,
}

/// Draws a [`Snapshot`] into a ratatui frame
///
/// Everything visual lives here: body segments get a new random colour on
/// every frame, the head is always cyan.
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, stats: &SessionStats) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, stats), chunks[0]);

        if snapshot.running {
            frame.render_widget(self.render_board(snapshot, &mut rand::thread_rng()), chunks[1]);
        } else {
            frame.render_widget(self.render_game_over(snapshot, stats), chunks[1]);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// Lay the snapshot out on a grid, skipping anything off the board
    fn layout_cells(snapshot: &Snapshot) -> Vec<Vec<Cell>> {
        let cell = snapshot.cell_size.max(1);
        let (cols, rows) = (snapshot.board_width / cell, snapshot.board_height / cell);
        let mut grid = vec![vec![Cell::Empty; cols as usize]; rows as usize];

        let mut paint = |pos: Position, kind: Cell| {
            if let Some((col, row)) = snapshot.cell_of(pos) {
                grid[row as usize][col as usize] = kind;
            }
        };

        paint(snapshot.apple, Cell::Apple);
        // tail to head, so the head is painted last
        for (i, &pos) in snapshot.snake.iter().enumerate().rev() {
            paint(pos, if i == 0 { Cell::Head } else { Cell::Body });
        }

        grid
    }

    fn render_board<R: Rng>(&self, snapshot: &Snapshot, rng: &mut R) -> Paragraph<'_> {
        let lines: Vec<Line> = Self::layout_cells(snapshot)
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .map(|cell| match cell {
                        Cell::Head => Span::styled(
                            "██",
                            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                        ),
                        Cell::Body => Span::styled(
                            "██",
                            Style::default().fg(Color::Rgb(rng.gen(), rng.gen(), rng.gen())),
                        ),
                        Cell::Apple => Span::styled(
                            "()",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Cell::Empty => Span::styled(" ·", Style::default().fg(Color::DarkGray)),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, stats: &SessionStats) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(stats.best_score().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(stats.format_time(), value),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_game_over(&self, snapshot: &Snapshot, stats: &SessionStats) -> Paragraph<'_> {
        let bold = Modifier::BOLD;
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Game Over",
                Style::default().fg(Color::Red).add_modifier(bold),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Rgb(255, 200, 0))),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default().fg(Color::White).add_modifier(bold),
                ),
            ]),
            Line::from(Span::styled(
                format!("Games played: {}", stats.games_finished()),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green).add_modifier(bold)),
                Span::styled(" to play again, ", Style::default().fg(Color::Gray)),
                Span::styled("Q", Style::default().fg(Color::Red).add_modifier(bold)),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        Paragraph::new(Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]))
        .alignment(Alignment::Center)
    }
}
