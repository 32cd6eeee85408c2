use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, CollisionType, EndReason, Phase, ViewModel};
use crate::metrics::GameMetrics;

/// Terminal columns used to draw one grid cell
pub const CELL_WIDTH: u16 = 2;

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Largest grid that fits a terminal of the given size
    pub fn grid_capacity(area: Rect) -> (u32, u32) {
        let inner_width = area.width.saturating_sub(2);
        let inner_height = area
            .height
            .saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + 2);
        (
            u32::from(inner_width / CELL_WIDTH),
            u32::from(inner_height),
        )
    }

    pub fn render(&self, frame: &mut Frame, view: &ViewModel, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        let stats = self.render_stats(view, metrics);
        frame.render_widget(stats, chunks[0]);

        match view.phase {
            Phase::Instructions => {
                let area = centered(chunks[1], 48, 13);
                frame.render_widget(self.render_instructions(), area);
            }
            Phase::Playing => {
                let area = centered(
                    chunks[1],
                    clamp_u16(view.grid.cols())
                        .saturating_mul(CELL_WIDTH)
                        .saturating_add(2),
                    clamp_u16(view.grid.rows()).saturating_add(2),
                );
                frame.render_widget(self.render_grid(view, area), area);
            }
            Phase::GameOver {
                final_score,
                reason,
            } => {
                let area = centered(chunks[1], 56, 9);
                frame.render_widget(self.render_game_over(final_score, reason, metrics), area);
            }
        }

        let controls = self.render_controls(view.phase);
        frame.render_widget(controls, chunks[2]);
    }

    /// Grid cells that fit inside `area`; anything beyond is clipped
    fn render_grid(&self, view: &ViewModel, area: Rect) -> Paragraph<'_> {
        let head = view.snake_cells.first().copied();
        let body: HashSet<Cell> = view.snake_cells.iter().copied().collect();
        let visible_cols = view
            .grid
            .cols()
            .min(u32::from(area.width.saturating_sub(2) / CELL_WIDTH));
        let visible_rows = view.grid.rows().min(u32::from(area.height.saturating_sub(2)));
        let mut lines = Vec::with_capacity(visible_rows as usize);

        for row in 0..visible_rows as i32 {
            let mut spans = Vec::with_capacity(visible_cols as usize);

            for col in 0..visible_cols as i32 {
                let cell = Cell::new(col, row);

                let span = if Some(cell) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&cell) {
                    Span::styled("■ ", Style::default().fg(Color::White))
                } else if Some(cell) == view.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, view: &ViewModel, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_instructions(&self) -> Paragraph<'_> {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Snake Game",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Arrow keys", key),
                Span::raw(" or "),
                Span::styled("WASD", key),
                Span::raw(" to move"),
            ]),
            Line::from("Eat red food to grow and score"),
            Line::from("Avoid walls and your own body"),
            Line::from(""),
            Line::from(vec![
                Span::styled("F", key),
                Span::raw(": toggle full-terminal grid   "),
                Span::styled("Esc", key),
                Span::raw(": quit"),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("SPACE", key),
                Span::raw(" to start"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_game_over(
        &self,
        final_score: u32,
        reason: EndReason,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let headline = match reason {
            EndReason::BoardFull => Span::styled(
                "BOARD FILLED!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            EndReason::Collision(collision) => Span::styled(
                match collision {
                    CollisionType::Wall => "GAME OVER - hit the wall",
                    CollisionType::SelfCollision => "GAME OVER - bit yourself",
                },
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
        };

        let text = vec![
            Line::from(""),
            Line::from(headline),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    final_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("   (games played: {})", metrics.games_played),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let hint = match phase {
            Phase::Instructions => vec![
                Span::styled("SPACE", Style::default().fg(Color::Cyan)),
                Span::raw(" to start | "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
            Phase::Playing => vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("F", Style::default().fg(Color::Cyan)),
                Span::raw(" toggle layout | "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
            Phase::GameOver { .. } => vec![
                Span::styled("R", Style::default().fg(Color::Green)),
                Span::raw(" restart | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" or "),
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ],
        };

        Paragraph::new(Line::from(hint)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// Rect of at most `width` x `height` centred inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
