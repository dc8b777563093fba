// src/services/sanitize.rs

//! Markup sanitizing for badge SVGs that get embedded in a README.
//!
//! The fetched badge is third-party markup. Before it is committed, active
//! content is stripped: script-capable elements, links, event handlers,
//! `javascript:` and remote references, and CSS imports. Plain shapes and
//! text pass through unchanged, so the count stays extractable.

use std::sync::LazyLock;

use regex::Regex;

/// Elements removed together with everything they contain.
static ACTIVE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b.*?</script\s*>|<foreignObject\b.*?</foreignObject\s*>|<iframe\b.*?</iframe\s*>|<object\b.*?</object\s*>|<embed\b.*?</embed\s*>",
    )
    .expect("valid active block regex")
});

/// Opening and closing `<a>` tags; their children are kept.
static ANCHOR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<a\b[^>]*>|</a\s*>").expect("valid anchor regex"));

static REMOTE_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<image\b[^>]*\s(?:xlink:href|href)\s*=\s*["']\s*https?://[^>]*>"#)
        .expect("valid remote image regex")
});

/// `href`/`xlink:href` pointing at `javascript:` or an http(s) URL.
static UNSAFE_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\s+(?:xlink:href|href)\s*=\s*(?:"\s*(?:javascript:|https?://)[^"]*"|'\s*(?:javascript:|https?://)[^']*')"#,
    )
    .expect("valid href regex")
});

/// `onload=`, `onclick=` and friends, quoted or bare.
static EVENT_HANDLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s/>]+)"#)
        .expect("valid event handler regex")
});

static XML_BASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+xml:base\s*=\s*(?:"[^"]*"|'[^']*')"#).expect("valid xml:base regex")
});

static CSS_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)@import\s+(?:url\([^)]*\)|"[^"]*"|'[^']*')[^;<]*;?"#)
        .expect("valid css import regex")
});

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid blank line regex"));

/// Strip active content from badge markup.
pub fn sanitize_svg(markup: &str) -> String {
    let mut out = markup.strip_prefix('\u{FEFF}').unwrap_or(markup).to_string();

    for re in [
        &ACTIVE_BLOCK,
        &ANCHOR_TAG,
        &REMOTE_IMAGE,
        &UNSAFE_HREF,
        &EVENT_HANDLER,
        &XML_BASE,
        &CSS_IMPORT,
    ] {
        out = re.replace_all(&out, "").into_owned();
    }

    BLANK_LINES.replace_all(&out, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Count;
    use crate::services::extract::extract_count;

    #[test]
    fn test_script_blocks_removed() {
        let markup = "<svg><script type=\"text/javascript\">\nfetch('//evil')\n</SCRIPT><text>42</text></svg>";
        let clean = sanitize_svg(markup);
        assert_eq!(clean, "<svg><text>42</text></svg>");
    }

    #[test]
    fn test_event_handlers_removed() {
        let markup = r#"<svg onload="alert(1)" width="90"><rect onclick='x()' onmouseover=y()/></svg>"#;
        let clean = sanitize_svg(markup);
        assert_eq!(clean, r#"<svg width="90"><rect/></svg>"#);
    }

    #[test]
    fn test_links_and_remote_references_removed() {
        let markup = concat!(
            r#"<svg xmlns:xlink="http://www.w3.org/1999/xlink">"#,
            r#"<a href="https://example.com"><text>7</text></a>"#,
            r#"<image xlink:href="https://tracker.example/p.png" width="1"/>"#,
            r#"<use xlink:href="javascript:alert(1)"/>"#,
            r##"<use href="#local"/>"##,
            r#"<style>@import url(https://x.example/a.css);</style>"#,
            r#"<iframe src="x"></iframe><foreignObject><div/></foreignObject>"#,
            "</svg>"
        );
        let clean = sanitize_svg(markup);

        assert!(clean.contains("<text>7</text>"));
        assert!(clean.contains(r##"<use href="#local"/>"##));
        for banned in ["<a ", "</a>", "<image", "javascript:", "@import", "<iframe", "foreignObject"] {
            assert!(!clean.contains(banned), "{banned} survived: {clean}");
        }
    }

    #[test]
    fn test_bom_and_blank_lines() {
        let clean = sanitize_svg("\u{FEFF}<svg>\n\n\n\n<text>1</text></svg>");
        assert_eq!(clean, "<svg>\n\n<text>1</text></svg>");
    }

    #[test]
    fn test_plain_badge_is_unchanged() {
        let markup = r##"<svg xmlns="http://www.w3.org/2000/svg" width="118"><g fill="#fff"><text x="425">Profile views</text><text x="1005">1,234</text></g></svg>"##;
        let clean = sanitize_svg(markup);
        assert_eq!(clean, markup);
        assert_eq!(extract_count(&clean).unwrap(), Count::from(1234u64));
    }
}
