//! Styles shared by the calendar widget and the `weekcal` application

use ratatui::style::{Color, Modifier, Style};

pub const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub const ARROW_STYLE: Style = BASE_STYLE.fg(Color::LightCyan).add_modifier(Modifier::BOLD);

pub const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const DAY_STYLE: Style = BASE_STYLE;

pub const SELECTED_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightCyan)
    .add_modifier(Modifier::BOLD);

pub const TOAST_STYLE: Style = BASE_STYLE.fg(Color::LightGreen);
