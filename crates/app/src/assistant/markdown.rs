//! Sanitising Markdown rendering for assistant replies.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Render `markdown` to HTML.
///
/// Raw HTML is escaped rather than passed through, and links or images whose
/// destination uses a scheme other than `http`, `https` or `mailto` lose their
/// target and keep only their text.
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let mut dropped_link = false;
    let mut dropped_image = false;

    let events = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Some(Event::Text(raw)),
        Event::Start(Tag::Link { ref dest_url, .. }) if !is_safe_destination(dest_url) => {
            dropped_link = true;

            None
        }
        Event::End(TagEnd::Link) if dropped_link => {
            dropped_link = false;

            None
        }
        Event::Start(Tag::Image { ref dest_url, .. }) if !is_safe_destination(dest_url) => {
            dropped_image = true;

            None
        }
        Event::End(TagEnd::Image) if dropped_image => {
            dropped_image = false;

            None
        }
        other => Some(other),
    });

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, events);

    output
}

fn is_safe_destination(destination: &str) -> bool {
    let destination = destination.trim();
    let scheme_end = destination.find(':');
    let path_start = destination.find(['/', '?', '#']);

    match (scheme_end, path_start) {
        (Some(colon), Some(path)) if path < colon => true,
        (Some(colon), _) => {
            let scheme = destination[..colon].to_ascii_lowercase();

            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        (None, _) => true,
    }
}
