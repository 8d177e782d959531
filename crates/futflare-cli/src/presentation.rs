//! Plain-text rendering of capsules and listing pages.
//!
//! Renderers return strings so they can be tested without a terminal; color
//! is applied only when the caller asks for it.

use std::fmt::Write;

use chrono::{DateTime, Duration, Utc};
use futflare_engine::Pagination;
use futflare_types::{Capsule, CapsuleStatus, ContentItem};
use owo_colors::OwoColorize;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn status_badge(status: CapsuleStatus, color: bool) -> String {
    let label = format!("[{}]", status);
    match (status, color) {
        (_, false) => label,
        (CapsuleStatus::Locked, true) => label.yellow().bold().to_string(),
        (CapsuleStatus::Opened, true) => label.green().bold().to_string(),
    }
}

/// Coarse remaining time: two most significant units.
pub fn describe_remaining(remaining: Duration) -> String {
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;
    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m")
    } else {
        "<1m".to_string()
    }
}

fn open_note(capsule: &Capsule, now: DateTime<Utc>) -> String {
    let date = capsule.scheduled_open_date.format(DATE_FORMAT);
    match capsule.status() {
        CapsuleStatus::Opened => format!("opened {date}"),
        CapsuleStatus::Locked => match capsule.time_until_open(now) {
            Some(remaining) => format!("opens {date} (in {})", describe_remaining(remaining)),
            None => format!("opens {date}"),
        },
    }
}

pub fn render_capsule_list(
    items: &[Capsule],
    total_count: u64,
    pagination: &Pagination,
    link: &str,
    now: DateTime<Utc>,
    color: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Capsules ({} total, page {} of {})",
        total_count, pagination.page, pagination.total_pages
    );
    out.push('\n');

    for capsule in items {
        let _ = writeln!(
            out,
            "  {:<10} {:<28} {}  (id: {})",
            status_badge(capsule.status(), color),
            capsule.title,
            open_note(capsule, now),
            capsule.id
        );
    }

    out.push('\n');
    let _ = writeln!(out, "Pages: {}", pagination);
    let _ = writeln!(out, "Link: {}", render_link(link));
    out
}

pub fn render_empty_list(link: &str) -> String {
    format!("No capsules found.\nLink: {}\n", render_link(link))
}

fn render_link(query: &str) -> String {
    if query.is_empty() {
        "(default view)".to_string()
    } else {
        format!("?{query}")
    }
}

pub fn render_capsule(capsule: &Capsule, now: DateTime<Utc>, color: bool) -> String {
    let mut out = String::new();
    let title = if color {
        capsule.title.bold().to_string()
    } else {
        capsule.title.clone()
    };
    let _ = writeln!(out, "{} {}", title, status_badge(capsule.status(), color));
    let _ = writeln!(out, "  id:           {}", capsule.id);
    if !capsule.creator.is_empty() {
        let _ = writeln!(out, "  creator:      {}", capsule.creator);
    }
    let _ = writeln!(out, "  created:      {}", capsule.created_at.format(DATE_FORMAT));
    let _ = writeln!(out, "  schedule:     {}", open_note(capsule, now));
    if !capsule.participant_emails.is_empty() {
        let _ = writeln!(out, "  participants: {}", capsule.participant_emails.join(", "));
    }
    if !capsule.description.is_empty() {
        let _ = writeln!(out, "  description:  {}", capsule.description);
    }
    out.push('\n');

    if capsule.is_locked() {
        let _ = writeln!(
            out,
            "  Content locked until {}",
            capsule.scheduled_open_date.format(DATE_FORMAT)
        );
        return out;
    }

    let items = capsule.content_items();
    let _ = writeln!(out, "  Content ({} items):", items.len());
    for (i, item) in items.iter().enumerate() {
        let _ = writeln!(out, "    {}. {}", i + 1, render_item(item));
    }
    out
}

fn render_item(item: &ContentItem) -> String {
    match item {
        ContentItem::Message { text } => format!("message  {text}"),
        ContentItem::Image {
            url,
            caption,
            alt_text,
        } => {
            let mut line = format!("image    {url}");
            if !caption.is_empty() {
                let _ = write!(line, " \"{caption}\"");
            }
            if !alt_text.is_empty() {
                let _ = write!(line, " [alt: {alt_text}]");
            }
            line
        }
        ContentItem::Video { url, caption } if caption.is_empty() => format!("video    {url}"),
        ContentItem::Video { url, caption } => format!("video    {url} \"{caption}\""),
    }
}
