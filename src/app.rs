use crate::help::Help;
use crate::toast::Toast;
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;
use weekcal::{theme::BASE_STYLE, Calendar, CalendarHit, CalendarModel, CALENDAR_HEIGHT};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    today: Date,
    model: CalendarModel<Toast>,
    state: AppState,
    // Where the calendar was last drawn, for locating mouse clicks
    calendar_area: Rect,
}

impl App {
    pub(crate) fn new(today: Date, model: CalendarModel<Toast>) -> App {
        App {
            today,
            model,
            state: AppState::Calendar,
            calendar_area: Rect::default(),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        let event = read()?;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = event.as_key_press_event()
        {
            self.model.listener_mut().dismiss();
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        } else if let Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) = event
        {
            self.model.listener_mut().dismiss();
            if !self.handle_click(column, row) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.previous_week(),
                KeyCode::Char('l') | KeyCode::Right => self.next_week(),
                KeyCode::Char('1') => self.select(0),
                KeyCode::Char('2') => self.select(1),
                KeyCode::Char('3') => self.select(2),
                KeyCode::Char('4') => self.select(3),
                KeyCode::Char('5') => self.select(4),
                KeyCode::Char('6') => self.select(5),
                KeyCode::Char('7') => self.select(6),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.model.jump_to(self.today);
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the user clicked on nothing
    fn handle_click(&mut self, column: u16, row: u16) -> bool {
        match self.state {
            AppState::Calendar => match self.calendar().hit_test(self.calendar_area, column, row) {
                Some(CalendarHit::PreviousWeek) => self.previous_week(),
                Some(CalendarHit::NextWeek) => self.next_week(),
                Some(CalendarHit::Day(i)) => self.select(i),
                None => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn calendar(&self) -> Calendar<Toast> {
        Calendar::new(self.today)
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn previous_week(&mut self) -> bool {
        self.model.go_to_previous_week().is_ok()
    }

    fn next_week(&mut self) -> bool {
        self.model.go_to_next_week().is_ok()
    }

    fn select(&mut self, index: usize) -> bool {
        self.model.select_nth(index).is_some()
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [calendar_area, _, toast_area] = Layout::vertical([
            Constraint::Length(CALENDAR_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        self.calendar_area = calendar_area;
        self.calendar().render(calendar_area, buf, &mut self.model);
        self.model.listener().render(toast_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use weekcal::theme::{ARROW_STYLE, DAY_STYLE, SELECTED_STYLE, TITLE_STYLE, WEEKDAY_STYLE};

    fn new_app(today: Date) -> App {
        App::new(today, CalendarModel::new(today).with_listener(Toast::new()))
    }

    fn render(app: &mut App, area: Rect) -> Buffer {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    fn first_day(app: &App) -> Date {
        app.model.window().first()
    }

    #[test]
    fn test_render() {
        let mut app = new_app(date!(2024 - 03 - 15));
        app.handle_key(KeyCode::Char('3'));
        let buffer = render(&mut app, Rect::new(0, 0, 50, 7));
        let mut expected = Buffer::with_lines([
            "     <              March 2024              >     ",
            "    ──────────────────────────────────────────    ",
            "      F     Sa    Su    M     T     W     Th      ",
            "     [15]   16    17    18    19    20    21      ",
            "                                                  ",
            "            You clicked on 2024-03-17.            ",
            "                                                  ",
        ]);
        expected.set_style(*expected.area(), BASE_STYLE);
        expected.set_style(Rect::new(4, 0, 3, 1), ARROW_STYLE);
        expected.set_style(Rect::new(20, 0, 10, 1), TITLE_STYLE);
        expected.set_style(Rect::new(43, 0, 3, 1), ARROW_STYLE);
        for i in 0..7 {
            expected.set_style(Rect::new(5 + 6 * i, 2, 4, 1), WEEKDAY_STYLE);
            expected.set_style(Rect::new(5 + 6 * i, 3, 4, 1), DAY_STYLE);
        }
        expected.set_style(Rect::new(17, 3, 4, 1), SELECTED_STYLE);
        expected.set_style(Rect::new(12, 5, 26, 1), weekcal::theme::TOAST_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_paging_keys() {
        let mut app = new_app(date!(2024 - 03 - 15));
        assert!(app.handle_key(KeyCode::Char('l')));
        assert_eq!(first_day(&app), date!(2024 - 03 - 22));
        assert!(app.handle_key(KeyCode::Right));
        assert_eq!(first_day(&app), date!(2024 - 03 - 29));
        assert_eq!(app.model.header_label(), (time::Month::March, 2024));
        assert!(app.handle_key(KeyCode::Char('h')));
        assert!(app.handle_key(KeyCode::Left));
        assert!(app.handle_key(KeyCode::Left));
        assert_eq!(first_day(&app), date!(2024 - 03 - 08));
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(first_day(&app), date!(2024 - 03 - 15));
        assert_eq!(app.model.selected_date(), date!(2024 - 03 - 15));
        assert_eq!(app.model.listener().message(), None);
    }

    #[test]
    fn test_select_after_paging() {
        let mut app = new_app(date!(2024 - 03 - 15));
        app.handle_key(KeyCode::Char('l'));
        app.handle_key(KeyCode::Char('l'));
        assert!(app.handle_key(KeyCode::Char('7')));
        assert_eq!(app.model.selected_date(), date!(2024 - 04 - 04));
        assert_eq!(
            app.model.listener().message(),
            Some("You clicked on 2024-04-04.")
        );
        app.handle_key(KeyCode::Char('0'));
        assert_eq!(first_day(&app), date!(2024 - 03 - 15));
        assert_eq!(app.model.selected_date(), date!(2024 - 04 - 04));
    }

    #[test]
    fn test_invalid_keys() {
        let mut app = new_app(date!(2024 - 03 - 15));
        assert!(!app.handle_key(KeyCode::Char('8')));
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(!app.handle_key(KeyCode::Enter));
        assert_eq!(app.model.listener().message(), None);
        assert_eq!(app.state, AppState::Calendar);
    }

    #[test]
    fn test_end_of_time() {
        let mut app = new_app(Date::MAX);
        assert!(!app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.model.window().last(), Date::MAX);
        assert!(app.handle_key(KeyCode::Char('h')));
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = new_app(date!(2024 - 03 - 15));
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        assert!(app.handle_key(KeyCode::Char('l')));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(first_day(&app), date!(2024 - 03 - 15));
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }

    #[test]
    fn test_clicks() {
        let mut app = new_app(date!(2024 - 03 - 15));
        render(&mut app, Rect::new(0, 0, 80, 24));
        // Calendar spans columns 19 through 60
        assert!(app.handle_click(60, 0));
        assert_eq!(first_day(&app), date!(2024 - 03 - 22));
        assert!(app.handle_click(19, 0));
        assert!(app.handle_click(20, 0));
        assert_eq!(first_day(&app), date!(2024 - 03 - 08));
        assert!(app.handle_click(32, 3));
        assert_eq!(app.model.selected_date(), date!(2024 - 03 - 10));
        assert_eq!(
            app.model.listener().message(),
            Some("You clicked on 2024-03-10.")
        );
        assert!(!app.handle_click(40, 2));
        assert!(!app.handle_click(5, 3));
        assert_eq!(app.model.selected_date(), date!(2024 - 03 - 10));
    }

    #[test]
    fn test_click_dismisses_help() {
        let mut app = new_app(date!(2024 - 03 - 15));
        render(&mut app, Rect::new(0, 0, 80, 24));
        app.handle_key(KeyCode::Char('?'));
        assert!(app.handle_click(19, 3));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(app.model.selected_date(), date!(2024 - 03 - 15));
        assert_eq!(app.model.listener().message(), None);
    }
}
