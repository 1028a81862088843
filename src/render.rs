//! Slide rendering.

use crate::markdown;
use crate::models::{Illustration, Slide};
use crate::session::Slideshow;

/// Format `caption` and append it with its illustration as the last slide.
pub fn add_slide(slideshow: &mut Slideshow, caption: &str, illustration: Illustration) {
    let caption_html = markdown::render(caption);
    slideshow.slides.push(Slide {
        caption: caption.to_string(),
        caption_html,
        illustration,
    });
    tracing::debug!(
        "Appended slide {} ({} image bytes)",
        slideshow.slides.len(),
        slideshow.slides.last().map_or(0, |s| s.illustration.bytes.len())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_slide_appends_in_order_with_formatted_caption() {
        let mut slideshow = Slideshow::default();
        add_slide(
            &mut slideshow,
            "First *cat*",
            Illustration::new(vec![1], "image/jpeg"),
        );
        add_slide(
            &mut slideshow,
            "Second cat",
            Illustration::new(vec![2], "image/png"),
        );

        assert_eq!(slideshow.slides.len(), 2);
        assert_eq!(slideshow.slides[0].caption, "First *cat*");
        assert_eq!(slideshow.slides[0].caption_html, "<p>First <em>cat</em></p>\n");
        assert_eq!(slideshow.slides[1].illustration.bytes, vec![2]);
        assert_eq!(slideshow.slides[1].illustration.mime_type, "image/png");
    }

    #[test]
    fn test_add_slide_does_not_touch_visibility() {
        let mut slideshow = Slideshow::default();
        add_slide(&mut slideshow, "A", Illustration::new(vec![], "image/jpeg"));
        assert!(slideshow.hidden);
    }
}
