//! Netscape bookmark-file markup (the browser export format).
//!
//! Parsing scans for anchor elements without a full HTML parser: the format
//! is line-oriented and browsers emit it very uniformly. Folder nesting in
//! the source document is not preserved.

use std::fmt::Write;

use crate::stores::{fresh_id, now_millis};
use crate::types::Bookmark;

/// Extracts every link element from a bookmark-markup document.
///
/// `title` is the anchor's trimmed text content, `url` its `HREF` attribute
/// and `created_at` the `ADD_DATE` attribute (seconds) scaled to
/// milliseconds, defaulting to the current time when absent, unparseable or
/// too large to represent in milliseconds.
/// Each entry receives a fresh id and no folder. Entries lacking a non-empty
/// url or title are dropped.
pub fn parse(content: &str) -> Vec<Bookmark> {
    let lower = content.to_ascii_lowercase();
    let mut bookmarks = Vec::new();
    let mut cursor = 0;

    while let Some(found) = lower[cursor..].find("<a") {
        let open = cursor + found;
        // Require a delimiter after "<a" so e.g. "<abbr>" is not an anchor.
        match lower.as_bytes().get(open + 2) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' => {}
            _ => {
                cursor = open + 2;
                continue;
            }
        }
        let Some(tag_close) = lower[open..].find('>') else {
            break;
        };
        let attrs = &content[open + 2..open + tag_close];
        let text_start = open + tag_close + 1;
        let Some(anchor_end) = lower[text_start..].find("</a") else {
            break;
        };
        let text = &content[text_start..text_start + anchor_end];
        cursor = text_start + anchor_end + 3;

        let url = attr_value(attrs, "href").unwrap_or_default();
        let title = unescape(&strip_tags(text)).trim().to_string();
        if url.is_empty() || title.is_empty() {
            continue;
        }

        let created_at = attr_value(attrs, "add_date")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|seconds| seconds.checked_mul(1000))
            .filter(|&millis| millis != 0)
            .unwrap_or_else(now_millis);

        bookmarks.push(Bookmark {
            id: fresh_id(),
            title,
            url,
            created_at,
            folder_id: None,
        });
    }

    bookmarks
}

/// Serializes the collection as a `NETSCAPE-Bookmark-file-1` document.
///
/// `ADD_DATE` is the creation time floored to seconds. Only `&`, `<` and `>`
/// are escaped, and only in the title.
pub fn export(bookmarks: &[Bookmark]) -> String {
    let mut html = String::from(
        "<!DOCTYPE NETSCAPE-Bookmark-file-1>\n\
         <META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n\
         <TITLE>Bookmarks</TITLE>\n\
         <H1>Bookmarks</H1>\n\
         <DL><p>\n",
    );
    for bookmark in bookmarks {
        let _ = writeln!(
            html,
            "    <DT><A HREF=\"{}\" ADD_DATE=\"{}\">{}</A>",
            bookmark.url,
            bookmark.created_at.div_euclid(1000),
            escape_title(&bookmark.title),
        );
    }
    html.push_str("</DL><p>\n");
    html
}

/// Escapes `&`, `<` and `>` for embedding a title in markup.
pub fn escape_title(title: &str) -> String {
    title
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Drops markup tags, keeping text content only.
fn strip_tags(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }
    result
}

/// Finds a named attribute inside an anchor tag's attribute list.
///
/// Matching is case-insensitive; values may be double-quoted, single-quoted
/// or bare.
fn attr_value(attrs: &str, name: &str) -> Option<String> {
    let lower = attrs.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut search = 0;

    while let Some(found) = lower[search..].find(name) {
        let at = search + found;
        search = at + name.len();

        let standalone = at == 0 || bytes[at - 1].is_ascii_whitespace();
        let mut rest = at + name.len();
        while rest < bytes.len() && bytes[rest].is_ascii_whitespace() {
            rest += 1;
        }
        if !standalone || rest >= bytes.len() || bytes[rest] != b'=' {
            continue;
        }
        rest += 1;
        while rest < bytes.len() && bytes[rest].is_ascii_whitespace() {
            rest += 1;
        }
        if rest >= bytes.len() {
            return None;
        }
        return match bytes[rest] {
            quote @ (b'"' | b'\'') => {
                let start = rest + 1;
                attrs[start..]
                    .find(quote as char)
                    .map(|end| attrs[start..start + end].to_string())
            }
            _ => {
                let end = attrs[rest..]
                    .find(|c: char| c.is_ascii_whitespace())
                    .map(|e| rest + e)
                    .unwrap_or(attrs.len());
                Some(attrs[rest..end].to_string())
            }
        };
    }
    None
}
