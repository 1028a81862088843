//! Markdown to HTML for captions and the echoed topic.
//!
//! Raw HTML in the source is emitted as escaped text, so model output can
//! never inject markup into the page.

use pulldown_cmark::{html, Event, Options, Parser};

pub fn render(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
