// src/services/badge.rs

//! Local badge rendering.
//!
//! Produces a flat, shields-like SVG: a label segment, the view count, and
//! an optional likes segment.

use crate::models::{BadgeConfig, Count};

/// Approximate advance of one Verdana 11px glyph.
const CHAR_WIDTH: usize = 7;
const SEGMENT_PADDING: usize = 10;

struct Segment {
    text: String,
    color: String,
}

impl Segment {
    fn width(&self) -> usize {
        self.text.chars().count() * CHAR_WIDTH + SEGMENT_PADDING
    }
}

/// Render the badge for `views` and, when known, `likes`.
pub fn render_badge(views: &Count, likes: Option<&Count>, style: &BadgeConfig) -> String {
    let mut segments = vec![
        Segment {
            text: style.label.clone(),
            color: style.label_color.clone(),
        },
        Segment {
            text: format_count(views),
            color: style.value_color.clone(),
        },
    ];
    if let Some(likes) = likes {
        segments.push(Segment {
            text: format!("{} {}", format_count(likes), style.likes_label),
            color: style.likes_color.clone(),
        });
    }

    let total: usize = segments.iter().map(Segment::width).sum();
    let aria = escape_xml(
        &segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(": "),
    );

    let mut rects = String::new();
    let mut texts = String::new();
    let mut x = 0;
    for segment in &segments {
        let width = segment.width();
        let center = x + width / 2;
        let text = escape_xml(&segment.text);
        let color = escape_xml(&segment.color);

        rects.push_str(&format!(
            r#"<rect x="{x}" width="{width}" height="20" fill="{color}"/>"#
        ));
        texts.push_str(&format!(
            r##"<text x="{center}" y="15" fill="#010101" fill-opacity=".3">{text}</text><text x="{center}" y="14">{text}</text>"##
        ));
        x += width;
    }

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{total}" height="20" role="img" aria-label="{aria}">
<title>{aria}</title>
<linearGradient id="s" x2="0" y2="100%"><stop offset="0" stop-color="#bbb" stop-opacity=".1"/><stop offset="1" stop-opacity=".1"/></linearGradient>
<clipPath id="r"><rect width="{total}" height="20" rx="3" fill="#fff"/></clipPath>
<g clip-path="url(#r)">{rects}<rect width="{total}" height="20" fill="url(#s)"/></g>
<g fill="#fff" text-anchor="middle" font-family="Verdana,Geneva,DejaVu Sans,sans-serif" font-size="11">{texts}</g>
</svg>
"##
    )
}

/// Group digits in threes: `1234567` -> `1,234,567`.
pub fn format_count(n: &Count) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
