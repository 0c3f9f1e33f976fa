use anyhow::Error;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::config::WindowSize;
use crate::menu::MenuBar;

/// Cells between two section labels in the bar.
const SECTION_GAP: u16 = 1;

/// Centre a window of at most `size` cells inside the terminal area.
pub(crate) fn window_area(size: WindowSize, area: Rect) -> Rect {
    let width = size.width.min(area.width);
    let height = size.height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Width a section label takes in the bar, padding included.
fn label_width(label: &str) -> u16 {
    cell_count(label).saturating_add(2)
}

/// Character count of `text`, clamped to what a terminal row can hold.
fn cell_count(text: &str) -> u16 {
    u16::try_from(text.chars().count()).unwrap_or(u16::MAX)
}

/// Horizontal offset of section `index` from the start of the bar, used to
/// hang its dropdown right below the label.
pub(crate) fn section_offset<A>(bar: &MenuBar<A>, index: usize) -> u16 {
    bar.sections()
        .iter()
        .take(index)
        .map(|section| label_width(section.label()).saturating_add(SECTION_GAP))
        .fold(0u16, u16::saturating_add)
}

/// Render the bar labels, highlighting the section under the cursor.
pub(crate) fn bar_line<A>(bar: &MenuBar<A>, selected: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(bar.len() * 2);
    for (idx, section) in bar.sections().iter().enumerate() {
        let style = if idx == selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        spans.push(Span::styled(format!(" {} ", section.label()), style));
        spans.push(Span::raw(" ".repeat(SECTION_GAP as usize)));
    }
    Line::from(spans)
}

/// Rectangle for a dropdown of `labels` hanging below `anchor_x`, kept inside
/// `bounds`.
pub(crate) fn dropdown_rect<'a, I>(labels: I, anchor_x: u16, top: u16, bounds: Rect) -> Rect
where
    I: IntoIterator<Item = &'a str>,
{
    let mut count = 0u16;
    let mut widest = 0u16;
    for label in labels {
        count = count.saturating_add(1);
        widest = widest.max(cell_count(label));
    }

    let width = widest.saturating_add(4).min(bounds.width);
    let height = count
        .max(1)
        .saturating_add(2)
        .min(bounds.bottom().saturating_sub(top));
    let right = bounds.right();
    let x = bounds
        .x
        .saturating_add(anchor_x)
        .min(right.saturating_sub(width));

    Rect {
        x,
        y: top,
        width,
        height,
    }
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
