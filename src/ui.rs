use ratatui::{prelude::*, widgets::*};

use crate::models::{ColonyStatus, NotificationKind, TaskPriority};

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Health score color (0-100)
pub fn health_color(score: u8) -> Color {
    match score {
        80..=100 => Color::Green,
        50..=79 => Color::Yellow,
        _ => Color::Red,
    }
}

/// Colony status color
pub fn status_color(status: ColonyStatus) -> Color {
    match status {
        ColonyStatus::Active => Color::Green,
        ColonyStatus::Setup => Color::Cyan,
        ColonyStatus::Maintenance => Color::Yellow,
        ColonyStatus::Offline => Color::DarkGray,
    }
}

/// Task priority color
pub fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::Low => Color::DarkGray,
        TaskPriority::Medium => Color::Cyan,
        TaskPriority::High => Color::Yellow,
        TaskPriority::Critical => Color::Red,
    }
}

/// Notification kind color
pub fn notification_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Critical => Color::Red,
        NotificationKind::Warning => Color::Yellow,
        NotificationKind::Info => Color::Cyan,
        NotificationKind::Achievement => Color::Magenta,
    }
}

/// A simple text gauge like "[####----] 48%"
pub fn text_gauge(pct: f32, width: usize) -> String {
    let clamped = pct.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f32).round() as usize;
    let filled = filled.min(width);
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        clamped
    )
}

/// Format a price in cents as dollars
pub fn format_cents(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_gauge_bounds() {
        assert_eq!(text_gauge(0.0, 4), "[----] 0%");
        assert_eq!(text_gauge(100.0, 4), "[####] 100%");
        assert_eq!(text_gauge(250.0, 4), "[####] 100%");
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(1899), "$18.99");
        assert_eq!(format_cents(5), "$0.05");
    }
}
