use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::config::{CELL_WIDTH, GLYPH_CELL, GLYPH_FOOD, GridSize, Theme};
use crate::game::GameState;
use crate::snake::Position;
use crate::ui::hud::{render_hint, render_hud};
use crate::ui::menu::{render_game_over_menu, render_start_menu};

const HUD_ROWS: u16 = 2;

/// Terminal size needed to draw the whole board, HUD included.
#[must_use]
pub fn required_size(bounds: GridSize) -> (u16, u16) {
    let width = bounds.width * CELL_WIDTH + 2;
    let height = bounds.height + 2 + HUD_ROWS;
    (width, height)
}

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme) {
    let area = frame.area();
    let (width, height) = required_size(state.bounds());
    if area.width < width || area.height < height {
        render_too_small(frame, area, width, height);
        return;
    }

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [play_area, hud_area, hint_area] = Layout::vertical([
        Constraint::Length(height - HUD_ROWS),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(column);

    let block = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);
    render_hud(frame, hud_area, state, theme);
    render_hint(frame, hint_area, state, theme);

    if state.is_start_screen() {
        render_start_menu(frame, play_area, state.high_score(), theme);
    } else if state.is_over() {
        render_game_over_menu(frame, play_area, state);
    }
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, width: u16, height: u16) {
    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!("need {width}x{height}, have {}x{}", area.width, area.height)),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, state.bounds(), state.food()) else {
        return;
    };

    let style = Style::new()
        .fg(theme.food)
        .bg(theme.play_bg)
        .add_modifier(Modifier::BOLD);
    frame.buffer_mut().set_string(x, y, GLYPH_FOOD, style);
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let bounds = state.bounds();
    let buffer = frame.buffer_mut();

    for (index, segment) in state.snake().segments().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, *segment) else {
            continue;
        };

        let color = if index == 0 {
            theme.snake_head
        } else {
            theme.snake_body
        };
        buffer.set_string(x, y, GLYPH_CELL, Style::new().fg(color).bg(theme.play_bg));
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
