use std::iter::successors;
use std::ops::Index;
use thiserror::Error;
use time::{Date, Duration};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Seven consecutive dates in ascending order.
///
/// Values are only ever built by [`next_window()`] and [`previous_window()`]
/// or by the `TryFrom` conversions, which reject anything that is not exactly
/// seven contiguous days.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WeekWindow([Date; DAYS_IN_WEEK]);

impl WeekWindow {
    // Returns `None` if any of the seven days starting at `first` cannot be
    // represented
    fn starting_at(first: Date) -> Option<WeekWindow> {
        let mut days = iter_days_from(first);
        let mut dates = [first; DAYS_IN_WEEK];
        for slot in &mut dates {
            *slot = days.next()?;
        }
        Some(WeekWindow(dates))
    }

    pub fn first(&self) -> Date {
        self.0[0]
    }

    pub fn last(&self) -> Date {
        self.0[DAYS_IN_WEEK - 1]
    }

    pub fn get(&self, index: usize) -> Option<Date> {
        self.0.get(index).copied()
    }

    pub fn dates(&self) -> &[Date; DAYS_IN_WEEK] {
        &self.0
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Date>> {
        self.0.iter().copied()
    }

    pub fn contains(&self, date: Date) -> bool {
        (self.first()..=self.last()).contains(&date)
    }

    /// The window that starts on the day after this one ends
    pub fn following(&self) -> Option<WeekWindow> {
        next_window(self.last().next_day()?)
    }

    /// The window that ends on the day before this one starts
    pub fn preceding(&self) -> Option<WeekWindow> {
        previous_window(self.first())
    }
}

impl Index<usize> for WeekWindow {
    type Output = Date;

    fn index(&self, index: usize) -> &Date {
        &self.0[index]
    }
}

impl TryFrom<[Date; DAYS_IN_WEEK]> for WeekWindow {
    type Error = InvalidWindow;

    fn try_from(dates: [Date; DAYS_IN_WEEK]) -> Result<WeekWindow, InvalidWindow> {
        for (index, (&previous, &found)) in (1..).zip(dates.iter().zip(dates.iter().skip(1))) {
            if previous.next_day() != Some(found) {
                return Err(InvalidWindow::Gap {
                    index,
                    previous,
                    found,
                });
            }
        }
        Ok(WeekWindow(dates))
    }
}

impl TryFrom<&[Date]> for WeekWindow {
    type Error = InvalidWindow;

    fn try_from(dates: &[Date]) -> Result<WeekWindow, InvalidWindow> {
        let array = <[Date; DAYS_IN_WEEK]>::try_from(dates)
            .map_err(|_| InvalidWindow::Length(dates.len()))?;
        WeekWindow::try_from(array)
    }
}

/// Error returned when a sequence of dates does not form a [`WeekWindow`]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum InvalidWindow {
    #[error("a week window holds exactly 7 dates, not {0}")]
    Length(usize),
    #[error("date {found} at position {index} does not directly follow {previous}")]
    Gap {
        index: usize,
        previous: Date,
        found: Date,
    },
}

/// Returns the seven days beginning with `anchor`.
///
/// Returns `None` if the window would run past the last representable date.
pub fn next_window(anchor: Date) -> Option<WeekWindow> {
    WeekWindow::starting_at(anchor)
}

/// Returns the seven days ending on the day before `anchor`.
///
/// Returns `None` if the window would start before the first representable
/// date.
pub fn previous_window(anchor: Date) -> Option<WeekWindow> {
    WeekWindow::starting_at(anchor.checked_sub(Duration::days(7))?)
}

/// The last seven days that `time` can represent
pub(crate) fn final_window() -> WeekWindow {
    Date::MAX
        .checked_sub(Duration::days(6))
        .and_then(next_window)
        .expect("the final week of the calendar should be representable")
}

fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}
