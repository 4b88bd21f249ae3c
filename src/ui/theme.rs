use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey, also no-op bytes
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub move_cmd: Color,
    pub io_cmd: Color,
    pub arith_cmd: Color,
    pub bracket: Color,
    pub offset: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    move_cmd: Color::Rgb(137, 180, 250),  // `<` `>`
    io_cmd: Color::Rgb(166, 227, 161),    // `.` `,`
    arith_cmd: Color::Rgb(250, 179, 135), // `+` `-` and cell values
    bracket: Color::Rgb(249, 226, 175),   // `[` `]`
    offset: Color::Rgb(148, 226, 213),    // program offsets and tape indices
    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    current_line_bg: Color::Rgb(50, 50, 70),
};
