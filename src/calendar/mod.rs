mod model;
mod widget;
mod window;
pub use self::model::{is_today, CalendarModel, OutOfTimeError, SelectionListener, Silent};
pub use self::widget::{Calendar, CalendarHit, ShortLabels, WeekdayLabeler, CALENDAR_HEIGHT};
pub use self::window::{next_window, previous_window, InvalidWindow, WeekWindow};
