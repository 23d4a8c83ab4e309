//! A horizontally paged seven-day calendar.
//!
//! [`CalendarModel`] holds the visible [`WeekWindow`] and the selected date,
//! pages a week at a time, and tells a [`SelectionListener`] whenever a date
//! is selected.  [`Calendar`] renders a model with [`ratatui`].
//!
//! ```
//! use time::macros::date;
//! use weekcal::CalendarModel;
//!
//! let mut clicked = Vec::new();
//! let mut model =
//!     CalendarModel::new(date!(2024 - 03 - 15)).with_listener(|d: time::Date| clicked.push(d));
//! model.go_to_next_week().unwrap();
//! model.go_to_next_week().unwrap();
//! assert_eq!(model.header_label(), (time::Month::March, 2024));
//! model.select_date(date!(2024 - 04 - 04));
//! assert_eq!(model.selected_date(), date!(2024 - 04 - 04));
//! # drop(model);
//! assert_eq!(clicked, [date!(2024 - 04 - 04)]);
//! ```
mod calendar;
pub mod theme;
pub use crate::calendar::*;
