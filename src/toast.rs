use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Widget},
};
use time::Date;
use weekcal::{theme::TOAST_STYLE, SelectionListener};

/// Brief feedback shown beneath the calendar after a day is clicked
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Toast(Option<String>);

impl Toast {
    pub(crate) fn new() -> Toast {
        Toast::default()
    }

    pub(crate) fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub(crate) fn dismiss(&mut self) {
        self.0 = None;
    }
}

impl SelectionListener for Toast {
    fn day_selected(&mut self, date: Date) {
        log::info!("day clicked: {date}");
        self.0 = Some(format!("You clicked on {date}."));
    }
}

impl Widget for &Toast {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(msg) = self.message() {
            Paragraph::new(Line::styled(msg, TOAST_STYLE))
                .centered()
                .render(area, buf);
        }
    }
}
