use super::model::{is_today, CalendarModel};
use super::window::DAYS_IN_WEEK;
use crate::theme::{ARROW_STYLE, DAY_STYLE, SELECTED_STYLE, TITLE_STYLE, WEEKDAY_STYLE};
use ratatui::{prelude::*, widgets::*};
use std::borrow::Cow;
use std::marker::PhantomData;
use time::{Date, Month, Weekday};

/// Number of columns per day of week
const DAY_WIDTH: u16 = 6;

/// Offset of a day's text from the left edge of its column
const DAY_INSET: u16 = 1;

/// Width of the text drawn for each day and weekday label
const DAY_TEXT_WIDTH: usize = 4;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = 42;

/// Number of lines taken up by the calendar
pub const CALENDAR_HEIGHT: u16 = 4;

const HEADER_ROW: u16 = 0;
const RULE_ROW: u16 = 1;
const LABEL_ROW: u16 = 2;
const DAY_ROW: u16 = 3;

static PREVIOUS_ARROW: &str = " < ";
static NEXT_ARROW: &str = " > ";
const ARROW_WIDTH: u16 = 3;

const ACS_HLINE: char = '─';

/// Produces the label shown above each day of the week
pub trait WeekdayLabeler {
    fn weekday_label(&self, weekday: Weekday) -> Cow<'static, str>;
}

impl<T: WeekdayLabeler + ?Sized> WeekdayLabeler for &T {
    fn weekday_label(&self, weekday: Weekday) -> Cow<'static, str> {
        (**self).weekday_label(weekday)
    }
}

/// Two letters for the weekdays whose initials are ambiguous (Saturday,
/// Sunday, Thursday), a single letter for the rest
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ShortLabels;

impl WeekdayLabeler for ShortLabels {
    fn weekday_label(&self, weekday: Weekday) -> Cow<'static, str> {
        Cow::Borrowed(match weekday {
            Weekday::Saturday => "Sa",
            Weekday::Sunday => "Su",
            Weekday::Thursday => "Th",
            Weekday::Monday => "M",
            Weekday::Tuesday => "T",
            Weekday::Wednesday => "W",
            Weekday::Friday => "F",
        })
    }
}

/// Renders a [`CalendarModel`]: a month & year header flanked by paging
/// arrows, followed by the visible week with its weekday labels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Calendar<L, W = ShortLabels> {
    today: Date,
    labels: W,
    arrows: bool,
    _data: PhantomData<L>,
}

impl<L> Calendar<L, ShortLabels> {
    pub fn new(today: Date) -> Calendar<L, ShortLabels> {
        Calendar {
            today,
            labels: ShortLabels,
            arrows: true,
            _data: PhantomData,
        }
    }
}

impl<L, W> Calendar<L, W> {
    pub fn labels<W2: WeekdayLabeler>(self, labels: W2) -> Calendar<L, W2> {
        Calendar {
            today: self.today,
            labels,
            arrows: self.arrows,
            _data: PhantomData,
        }
    }

    /// Show or hide the paging arrows in the header.  Hidden arrows cannot
    /// be clicked.
    pub fn arrows(mut self, shown: bool) -> Self {
        self.arrows = shown;
        self
    }

    /// Like [`CalendarHit::locate()`], but only reports the paging arrows if
    /// they are shown
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<CalendarHit> {
        CalendarHit::locate(area, column, row)
            .filter(|hit| self.arrows || matches!(hit, CalendarHit::Day(_)))
    }
}

impl<L, W: WeekdayLabeler> StatefulWidget for Calendar<L, W> {
    type State = CalendarModel<L>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let mut canvas = BufferCanvas::new(calendar_area(area), buf);
        let (month, year) = state.header_label();
        canvas.draw_header(month, year, self.arrows);
        for (i, date) in std::iter::zip(0u16.., state.window().iter()) {
            canvas.draw_label(i, &self.labels.weekday_label(date.weekday()));
            let style = if state.is_selected(date) {
                SELECTED_STYLE
            } else {
                DAY_STYLE
            };
            canvas.draw_day(i, show_day(date, is_today(date, self.today)), style);
        }
    }
}

/// The part of a [`Calendar`] found at a given screen position
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CalendarHit {
    PreviousWeek,
    NextWeek,
    /// The visible day at the given index, counting from the left
    Day(usize),
}

impl CalendarHit {
    /// Determine what lies at (`column`, `row`) when a [`Calendar`] with
    /// arrows is rendered into `area`
    pub fn locate(area: Rect, column: u16, row: u16) -> Option<CalendarHit> {
        let area = calendar_area(area);
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        let x = column - area.x;
        match row - area.y {
            HEADER_ROW if x < ARROW_WIDTH => Some(CalendarHit::PreviousWeek),
            HEADER_ROW if x >= area.width.saturating_sub(ARROW_WIDTH) => {
                Some(CalendarHit::NextWeek)
            }
            DAY_ROW => {
                let index = usize::from(x / DAY_WIDTH);
                (index < DAYS_IN_WEEK).then_some(CalendarHit::Day(index))
            }
            _ => None,
        }
    }
}

// The calendar is centered horizontally and drawn at the top of `area`
fn calendar_area(area: Rect) -> Rect {
    let width = MAIN_WIDTH.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: CALENDAR_HEIGHT.min(area.height),
    }
}

fn show_day(date: Date, is_today: bool) -> String {
    let day = date.day();
    if is_today {
        format!("[{day:2}]")
    } else {
        format!(" {day:2} ")
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    // Positions are relative to the clipped area, not the full calendar width
    fn draw_header(&mut self, month: Month, year: i32, arrows: bool) {
        let width = self.area.width;
        let title = format!("{month} {year}");
        let title_width = u16::try_from(title.len()).unwrap_or(width);
        self.mvprint(
            HEADER_ROW,
            width.saturating_sub(title_width) / 2,
            title,
            Some(TITLE_STYLE),
        );
        if arrows {
            self.mvprint(HEADER_ROW, 0, PREVIOUS_ARROW, Some(ARROW_STYLE));
            self.mvprint(
                HEADER_ROW,
                width.saturating_sub(ARROW_WIDTH),
                NEXT_ARROW,
                Some(ARROW_STYLE),
            );
        }
        self.hline(RULE_ROW, 0, ACS_HLINE, width);
    }

    fn draw_label(&mut self, index: u16, label: &str) {
        self.mvprint(
            LABEL_ROW,
            DAY_WIDTH * index + DAY_INSET,
            format!("{label:^DAY_TEXT_WIDTH$}"),
            Some(WEEKDAY_STYLE),
        );
    }

    fn draw_day(&mut self, index: u16, s: String, style: Style) {
        self.mvprint(DAY_ROW, DAY_WIDTH * index + DAY_INSET, s, Some(style));
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // A Paragraph truncates text running past the calendar's area, as
            // long as the Rect it is given lies within the frame.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}
