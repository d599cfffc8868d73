use chrono::{DateTime, Local};
use ratatui::{prelude::*, widgets::*};

use crate::domain::notification::Notification;
use crate::domain::text::truncate_to_width;

/// A two-line list row for one notification: subject title on top, repo,
/// reason and timestamp below.
#[derive(Clone, Debug)]
pub struct NotificationRow {
    pub notification: Notification,
    pub padding: Padding, // Only used to calc width
    pub highlight: bool,
}

impl NotificationRow {
    pub fn new(notification: Notification, padding: Padding) -> Self {
        Self {
            notification,
            padding,
            highlight: false,
        }
    }

    pub fn updated_at(&self) -> String {
        DateTime::<Local>::from(self.notification.updated_at)
            .format("%b %d %R")
            .to_string()
    }

    fn meta_line(&self) -> String {
        format!(
            "{} · {} · {}",
            self.notification.repo.full_name(),
            self.notification.reason,
            self.updated_at(),
        )
    }

    fn content_width(&self, area: &Rect) -> usize {
        area.width
            .saturating_sub(self.padding.left + self.padding.right)
            .into()
    }

    /// Rows are fixed-height: title, meta, separator.
    pub fn calculate_height(&self) -> u16 {
        3
    }
}

impl Widget for NotificationRow {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = self.content_width(&area);

        let marker = if self.notification.unread { "● " } else { "  " };
        let title = truncate_to_width(
            &format!("{marker}{}", self.notification.subject.title),
            width,
        );
        let title_style = match (self.notification.unread, self.highlight) {
            (_, true) => Style::default().bold().reversed(),
            (true, false) => Style::default().bold(),
            (false, false) => Style::default().fg(Color::Gray),
        };

        let meta = truncate_to_width(&format!("  {}", self.meta_line()), width);
        let meta_style = if self.highlight {
            Style::default().italic().reversed()
        } else {
            Style::default().italic().fg(Color::DarkGray)
        };

        let mut text = Text::default();
        text.extend::<Text>(Span::styled(title, title_style).into());
        text.extend::<Text>(Span::styled(meta, meta_style).into());

        Paragraph::new(text).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::notification::{
        NotificationId, Reason, Repository, Subject, SubjectKind,
    };

    fn create_test_row(unread: bool) -> NotificationRow {
        let notification = Notification::new(
            NotificationId::new("thread-1"),
            Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            unread,
            Reason::Mention,
            Subject::new("Fix crash on resume", SubjectKind::Issue),
            Repository::new("acme", "widgets", false),
        );
        NotificationRow::new(notification, Padding::new(1, 1, 1, 1))
    }

    #[test]
    fn test_height_is_fixed() {
        assert_eq!(create_test_row(true).calculate_height(), 3);
    }

    #[test]
    fn test_meta_line_contents() {
        let row = create_test_row(true);
        let meta = row.meta_line();
        assert!(meta.contains("acme/widgets"));
        assert!(meta.contains("mention"));
    }

    #[test]
    fn test_render_marks_unread_rows() {
        let row = create_test_row(true);
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        row.render(area, &mut buf);

        let line: String = (0..40u16).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.contains('●'));
        assert!(line.contains("Fix crash on resume"));
    }

    #[test]
    fn test_render_read_rows_have_no_marker() {
        let row = create_test_row(false);
        let area = Rect::new(0, 0, 40, 3);
        let mut buf = Buffer::empty(area);
        row.render(area, &mut buf);

        let line: String = (0..40u16).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(!line.contains('●'));
    }
}
