use ratatui::style::Color;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Cells per side of the square play field.
pub const GRID_SIZE: u16 = 20;

/// The fixed play field.
pub const GRID: GridSize = GridSize {
    width: GRID_SIZE,
    height: GRID_SIZE,
};

/// Fixed tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 150;

/// Points awarded per food eaten.
pub const SCORE_INCREMENT: u32 = 10;

/// Frame pacing for the render/input loop.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Terminal columns used to draw one grid cell.
pub const CELL_WIDTH: u16 = 2;

/// Glyph for a single filled cell (two columns wide).
pub const GLYPH_CELL: &str = "██";

/// Glyph for food.
pub const GLYPH_FOOD: &str = "()";

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_score: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Classic green snake on dark theme.
pub const THEME_CLASSIC: Theme = Theme {
    name: "classic",
    snake_head: Color::LightGreen,
    snake_body: Color::Green,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_score: Color::White,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    food: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::Cyan,
    hud_score: Color::Cyan,
    menu_title: Color::Cyan,
    menu_footer: Color::DarkGray,
};

/// Neon magenta/yellow theme.
pub const THEME_NEON: Theme = Theme {
    name: "neon",
    snake_head: Color::White,
    snake_body: Color::Magenta,
    food: Color::Yellow,
    play_bg: Color::Black,
    border_fg: Color::Magenta,
    hud_score: Color::Magenta,
    menu_title: Color::Magenta,
    menu_footer: Color::DarkGray,
};

/// All available themes; the first one is the default.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN, THEME_NEON];

/// Looks up a theme by its case-insensitive name.
#[must_use]
pub fn theme_by_name(name: &str) -> Option<&'static Theme> {
    THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}
