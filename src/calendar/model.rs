use super::window::{final_window, next_window, WeekWindow};
use thiserror::Error;
use time::{Date, Month};

/// Receives the dates the user clicks on
pub trait SelectionListener {
    fn day_selected(&mut self, date: Date);
}

impl<F: FnMut(Date)> SelectionListener for F {
    fn day_selected(&mut self, date: Date) {
        self(date);
    }
}

/// A [`SelectionListener`] that ignores every selection
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Silent;

impl SelectionListener for Silent {
    fn day_selected(&mut self, _date: Date) {}
}

/// The visible week and the selected date of a paged week calendar.
///
/// The selected date is tracked independently of the visible window: paging
/// away from the selected date neither clears nor moves it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarModel<L = Silent> {
    window: WeekWindow,
    selected: Date,
    listener: L,
}

impl CalendarModel<Silent> {
    /// Create a model showing the seven days starting at `seed`, with `seed`
    /// selected.
    ///
    /// If `seed` is less than a week before the last representable date, the
    /// final representable week is shown instead.
    pub fn new(seed: Date) -> Self {
        CalendarModel {
            window: window_from(seed),
            selected: seed,
            listener: Silent,
        }
    }
}

impl<L> CalendarModel<L> {
    pub fn with_listener<M>(self, listener: M) -> CalendarModel<M> {
        CalendarModel {
            window: self.window,
            selected: self.selected,
            listener,
        }
    }

    pub fn window(&self) -> &WeekWindow {
        &self.window
    }

    pub fn selected_date(&self) -> Date {
        self.selected
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn is_selected(&self, date: Date) -> bool {
        date == self.selected
    }

    /// The month and year of the first visible day
    pub fn header_label(&self) -> (Month, i32) {
        let first = self.window.first();
        (first.month(), first.year())
    }

    pub fn go_to_previous_week(&mut self) -> Result<(), OutOfTimeError> {
        let window = self.window.preceding().ok_or_else(|| {
            log::warn!("no week before {}", self.window.first());
            OutOfTimeError
        })?;
        self.show(window);
        Ok(())
    }

    pub fn go_to_next_week(&mut self) -> Result<(), OutOfTimeError> {
        let window = self.window.following().ok_or_else(|| {
            log::warn!("no week after {}", self.window.last());
            OutOfTimeError
        })?;
        self.show(window);
        Ok(())
    }

    /// Show the seven days starting at `date`, leaving the selection alone
    pub fn jump_to(&mut self, date: Date) {
        self.show(window_from(date));
    }

    fn show(&mut self, window: WeekWindow) {
        log::debug!("showing {} through {}", window.first(), window.last());
        self.window = window;
    }
}

impl<L: SelectionListener> CalendarModel<L> {
    /// Select `date` and notify the listener.
    ///
    /// The date does not need to be visible.
    pub fn select_date(&mut self, date: Date) {
        log::debug!("selected {date}");
        self.selected = date;
        self.listener.day_selected(date);
    }

    /// Select the visible day at `index` (0 being the leftmost), returning
    /// it.  Returns `None` without notifying anyone if `index` is out of
    /// range.
    pub fn select_nth(&mut self, index: usize) -> Option<Date> {
        let date = self.window.get(index)?;
        self.select_date(date);
        Some(date)
    }
}

pub fn is_today(date: Date, today: Date) -> bool {
    date == today
}

fn window_from(date: Date) -> WeekWindow {
    next_window(date).unwrap_or_else(final_window)
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;
