//! Plain text of a content-editable HTML payload.
//!
//! Caret offsets of editable regions are counted in rendered characters, so
//! the payload is flattened the way `innerText` would see it: `<br>` and
//! block boundaries become newlines, tags disappear, character references are
//! decoded, and `<script>`/`<style>` bodies and comments are dropped.

use memchr::memchr;

fn is_block_tag(name: &str) -> bool {
    matches!(
        name,
        "div" | "p" | "li" | "ul" | "ol" | "pre" | "blockquote" | "h1" | "h2" | "h3" | "h4"
            | "h5" | "h6" | "tr" | "section" | "article"
    )
}

pub fn plain_text_from_html(payload: &str) -> String {
    let bytes = payload.as_bytes();
    let mut out = String::with_capacity(payload.len());
    let mut pos = 0usize;

    while pos < bytes.len() {
        let Some(rel) = memchr(b'<', &bytes[pos..]) else {
            push_decoded(&payload[pos..], &mut out);
            break;
        };
        let tag_start = pos + rel;
        push_decoded(&payload[pos..tag_start], &mut out);

        if payload[tag_start..].starts_with("<!--") {
            pos = match payload[tag_start + 4..].find("-->") {
                Some(end) => tag_start + 4 + end + 3,
                None => bytes.len(),
            };
            continue;
        }

        let Some(close_rel) = memchr(b'>', &bytes[tag_start..]) else {
            // Unterminated tag: keep it as literal text.
            push_decoded(&payload[tag_start..], &mut out);
            break;
        };
        let tag_end = tag_start + close_rel + 1;
        let inner = &payload[tag_start + 1..tag_end - 1];
        let (closing, name) = tag_name(inner);
        pos = tag_end;

        match name.as_str() {
            "br" => out.push('\n'),
            "script" | "style" if !closing => {
                let needle = format!("</{name}");
                pos = match payload[pos..].to_ascii_lowercase().find(&needle) {
                    Some(end) => {
                        let end = pos + end;
                        memchr(b'>', &bytes[end..]).map_or(bytes.len(), |g| end + g + 1)
                    }
                    None => bytes.len(),
                };
            }
            n if is_block_tag(n) && !closing => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }

    out
}

fn tag_name(inner: &str) -> (bool, String) {
    let inner = inner.trim_start();
    let (closing, rest) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let name = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    (closing, name)
}

fn push_decoded(text: &str, out: &mut String) {
    if !text.is_empty() {
        out.push_str(&html_escape::decode_html_entities(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(plain_text_from_html("hello  world"), "hello  world");
    }

    #[test]
    fn br_and_blocks_become_newlines() {
        assert_eq!(plain_text_from_html("a<br>b<BR/>c"), "a\nb\nc");
        assert_eq!(plain_text_from_html("<div>a</div><div>b</div>"), "a\nb");
        assert_eq!(plain_text_from_html("x<p>y</p>"), "x\ny");
    }

    #[test]
    fn entities_are_decoded_and_inline_tags_dropped() {
        assert_eq!(
            plain_text_from_html("<b>fish</b>&amp;chips&nbsp;&lt;3"),
            "fish&chips\u{00A0}<3"
        );
    }

    #[test]
    fn comments_and_scripts_are_skipped() {
        assert_eq!(
            plain_text_from_html("a<!-- hidden -->b<script>var x = 1 < 2;</script>c"),
            "abc"
        );
    }

    #[test]
    fn unterminated_markup_never_panics() {
        assert_eq!(plain_text_from_html("a <b"), "a <b");
        assert_eq!(plain_text_from_html("<!-- open"), "");
        assert_eq!(plain_text_from_html(""), "");
    }
}
