//! Card rendering.
//!
//! Turns launches into plain lines for the viewport. Each card is a block of
//! rows followed by one blank separator row; [`Body::spans`] records where
//! each card starts and how many rows it covers so the list can keep the
//! selected card on screen.

use super::style::{ListStyles, ELLIPSIS, NORMAL_MARKER, SELECTED_MARKER};
use crate::launch::Launch;
use lipgloss_extras::lipgloss;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Rendered list body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    pub lines: Vec<String>,
    /// `(first_row, rows)` per card, in item order.
    pub spans: Vec<(usize, usize)>,
}

impl Body {
    /// Index of the card covering `row`, or the last card above it.
    pub fn card_at_row(&self, row: usize) -> Option<usize> {
        self.spans.iter().rposition(|&(start, _)| start <= row)
    }
}

/// Cuts `text` to `width` display columns, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(ELLIPSIS);
    out
}

/// Greedy word wrap to `width` columns. Words longer than a line are cut.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let w = UnicodeWidthStr::width(word);
        if used > 0 && used + 1 + w > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        if used > 0 {
            current.push(' ');
            used += 1;
        }
        if w > width {
            current.push_str(&truncate(word, width - used));
            used = width;
        } else {
            current.push_str(word);
            used += w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Centers `text` within `width` columns.
pub fn center(text: &str, width: usize) -> String {
    let w = lipgloss::width_visible(text);
    let pad = width.saturating_sub(w) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn detail_line(label: &str, value: &str, styles: &ListStyles, width: usize) -> String {
    let label = format!("{label}:");
    let room = width.saturating_sub(UnicodeWidthStr::width(label.as_str()) + 1);
    format!(
        "{} {}",
        styles.detail_label.render(&label),
        styles.detail_text.render(&truncate(value, room))
    )
}

/// `Label url` pairs joined by ` | `, with URLs cut to fit `width`.
fn media_line(links: &[(&str, &str)], styles: &ListStyles, width: usize) -> Option<String> {
    const SEPARATOR: &str = " | ";
    let mut out = String::new();
    let mut used = 0;

    for (label, url) in links {
        let separator = if out.is_empty() { "" } else { SEPARATOR };
        let head = UnicodeWidthStr::width(separator) + UnicodeWidthStr::width(*label) + 1;
        if used + head >= width {
            break;
        }
        let url = truncate(url, width - used - head);
        used += head + UnicodeWidthStr::width(url.as_str());
        out.push_str(separator);
        out.push_str(&styles.link.render(label));
        out.push(' ');
        out.push_str(&url);
    }
    (!out.is_empty()).then_some(out)
}

/// Rows of one card, without selection markers.
pub fn card_lines(launch: &Launch, expanded: bool, styles: &ListStyles, width: usize) -> Vec<String> {
    let status = launch.status();
    let badge = styles.badge(status).render(status.label());
    let badge_width = lipgloss::width_visible(&badge);

    let title_room = width.saturating_sub(badge_width + 1);
    let title = truncate(&launch.mission_name, title_room);
    let gap = width
        .saturating_sub(UnicodeWidthStr::width(title.as_str()) + badge_width)
        .max(1);

    let mut lines = vec![
        format!("{}{}{}", styles.card_title.render(&title), " ".repeat(gap), badge),
        styles
            .button
            .render(if expanded { "COLLAPSE" } else { "VIEW" }),
    ];

    if !expanded {
        return lines;
    }

    lines.push(detail_line("Rocket", &launch.rocket.rocket_name, styles, width));
    lines.push(detail_line(
        "Launch Date",
        launch.local_launch_time().as_deref().unwrap_or("unknown"),
        styles,
        width,
    ));
    lines.push(detail_line(
        "Launch Site",
        &launch.launch_site.site_name_long,
        styles,
        width,
    ));

    let links = &launch.links;
    if let Some(patch) = links.mission_patch_small.as_deref() {
        lines.push(detail_line("Patch", patch, styles, width));
    }
    let media: Vec<(&str, &str)> = [("Video", &links.video_link), ("Article", &links.article_link)]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|url| (label, url)))
        .collect();
    if let Some(line) = media_line(&media, styles, width) {
        lines.push(line);
    }

    lines.extend(
        wrap(launch.details_or_default(), width)
            .into_iter()
            .map(|line| styles.detail_text.render(&line)),
    );
    lines
}

/// Renders every launch as a card, marking the one at `cursor`.
pub fn body<'a>(
    launches: impl IntoIterator<Item = &'a Launch>,
    is_expanded: impl Fn(&Launch) -> bool,
    cursor: usize,
    styles: &ListStyles,
    width: usize,
) -> Body {
    let inner = width.saturating_sub(UnicodeWidthStr::width(NORMAL_MARKER));
    let mut out = Body::default();

    for (index, launch) in launches.into_iter().enumerate() {
        let marker = if index == cursor {
            styles.selected_marker.render(SELECTED_MARKER)
        } else {
            NORMAL_MARKER.to_string()
        };
        let start = out.lines.len();
        let card = card_lines(launch, is_expanded(launch), styles, inner);
        let rows = card.len();
        out.lines
            .extend(card.into_iter().map(|line| format!("{marker}{line}")));
        out.lines.push(String::new());
        out.spans.push((start, rows));
    }
    out
}
