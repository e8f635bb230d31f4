//! Plain-text projection of serialized HTML markup.
//!
//! The wrapped engine owns the real document model; this module only turns
//! its HTML snapshot into the plain text the stats tracker and the reference
//! engine consume. Block-level closing tags become paragraph breaks, `<br>`
//! becomes a line break, and a handful of common entities are decoded.

const BLOCK_CLOSERS: [&str; 10] = [
    "/p", "/h1", "/h2", "/h3", "/h4", "/h5", "/h6", "/li", "/blockquote", "/pre",
];

/// Strip tags from `markup` and return the plain-text projection.
pub fn plain_text(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            // Unterminated tag; treat the remainder as text.
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = after[..close].trim().to_ascii_lowercase();
        if tag == "br" || tag == "br/" || tag == "br /" {
            out.push('\n');
        } else if BLOCK_CLOSERS.iter().any(|closer| tag == *closer) {
            out.push_str("\n\n");
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);

    let decoded = decode_entities(&out);
    normalize_breaks(&decoded)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Collapse runs of 3+ newlines to a single paragraph break and trim the ends.
fn normalize_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newline_run = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                out.push('\n');
            }
        } else {
            newline_run = 0;
            out.push(ch);
        }
    }
    out.trim_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_inline_tags() {
        assert_eq!(
            plain_text("<p>Hello <strong>bold</strong> world</p>"),
            "Hello bold world"
        );
    }

    #[test]
    fn block_closers_become_paragraph_breaks() {
        assert_eq!(
            plain_text("<p>one</p><p>two</p>"),
            "one\n\ntwo"
        );
        assert_eq!(
            plain_text("<h1>Title</h1><p>Body</p>"),
            "Title\n\nBody"
        );
    }

    #[test]
    fn br_becomes_single_line_break() {
        assert_eq!(plain_text("<p>a<br>b</p>"), "a\nb");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(plain_text("<p>a &amp; b &lt;c&gt;</p>"), "a & b <c>");
    }

    #[test]
    fn plain_input_passes_through() {
        assert_eq!(plain_text("no markup here"), "no markup here");
    }

    #[test]
    fn unterminated_tag_is_kept_as_text() {
        assert_eq!(plain_text("before <oops"), "before <oops");
    }
}
