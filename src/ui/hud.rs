use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::GameState;

const SEPARATOR: &str = " │ ";

/// Renders the score row: `Length: N │ Score: S │ Hi: H`.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    frame.render_widget(
        Paragraph::new(score_line(state, theme)).alignment(Alignment::Center),
        area,
    );
}

/// Renders the one-line control hint under the board.
pub fn render_hint(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    let hint = if state.is_over() {
        "[Enter]/[R] restart · [Q] quit"
    } else if state.is_started() {
        "Arrows or WASD to steer · [Q] quit"
    } else {
        "[Enter] start · [Q] quit"
    };

    frame.render_widget(
        Paragraph::new(Line::from(hint))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.menu_footer)),
        area,
    );
}

fn score_line(state: &GameState, theme: &Theme) -> Line<'static> {
    let value = Style::default().fg(theme.hud_score);
    let high_score = if state.is_new_high_score() {
        value.add_modifier(Modifier::BOLD)
    } else {
        value
    };

    Line::from(vec![
        Span::raw("Length: "),
        Span::styled(state.snake().len().to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw("Score: "),
        Span::styled(state.score().to_string(), value),
        Span::raw(SEPARATOR),
        Span::raw("Hi: "),
        Span::styled(state.high_score().to_string(), high_score),
    ])
}
