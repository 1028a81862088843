//! Presentation of a [`SessionState`] for the terminal or as an HTML page.

use crate::session::SessionState;
use std::fmt::Write as _;

const PAGE_STYLE: &str = "body{font-family:sans-serif;max-width:48rem;margin:2rem auto}\
#slideshow{display:flex;gap:1rem;overflow-x:auto}\
.slide{flex:0 0 20rem;text-align:center}\
.slide img{width:100%;border:1px solid #ddd}\
#error{color:#b00020}\
.user-turn{font-weight:bold}";

/// Plain-text rendering of what is currently visible.
pub fn render_text(session: &SessionState, examples: &[String]) -> String {
    let mut out = String::new();

    for entry in &session.transcript {
        let _ = writeln!(out, "> {}", entry.text);
    }

    if !session.slideshow.hidden {
        for (i, slide) in session.slideshow.slides.iter().enumerate() {
            let _ = writeln!(
                out,
                "[{}] {}\n    ({}, {} bytes)",
                i + 1,
                slide.caption,
                slide.illustration.mime_type,
                slide.illustration.bytes.len()
            );
        }
    }

    if !session.error.hidden {
        let _ = writeln!(out, "{}", session.error.message);
    }

    if session.transcript.is_empty() && !examples.is_empty() {
        let _ = writeln!(out, "Examples:");
        for (i, example) in examples.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, example);
        }
    }

    out
}

/// Self-contained HTML page of the session.
pub fn render_html(session: &SessionState, examples: &[String]) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Tiny cat stories</title>\n<style>{}</style>\n</head>\n<body>\n",
        PAGE_STYLE
    );

    out.push_str("<ul id=\"examples\">\n");
    for example in examples {
        let _ = writeln!(out, "<li>{}</li>", escape(example));
    }
    out.push_str("</ul>\n");

    let _ = writeln!(
        out,
        "<textarea id=\"input\"{}{}>{}</textarea>",
        if session.input.disabled { " disabled" } else { "" },
        if session.input.focused { " autofocus" } else { "" },
        escape(&session.input.value)
    );

    out.push_str("<div id=\"output\">\n");
    for entry in &session.transcript {
        let _ = writeln!(out, "<div class=\"user-turn\">{}</div>", entry.html);
    }
    out.push_str("</div>\n");

    let _ = writeln!(
        out,
        "<div id=\"slideshow\"{}>",
        if session.slideshow.hidden { " hidden" } else { "" }
    );
    for slide in &session.slideshow.slides {
        let _ = writeln!(
            out,
            "<div class=\"slide\"><img src=\"{}\" alt=\"{}\"><div>{}</div></div>",
            slide.illustration.data_uri(),
            escape(&slide.caption),
            slide.caption_html
        );
    }
    out.push_str("</div>\n");

    let _ = writeln!(
        out,
        "<div id=\"error\"{}>{}</div>",
        if session.error.hidden { " hidden" } else { "" },
        escape(&session.error.message)
    );

    if let Some(started_at) = session.started_at {
        let _ = writeln!(
            out,
            "<footer>Generated {}</footer>",
            started_at.format("%Y-%m-%d %H:%M")
        );
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
