// src/core/html.rs
//
// Tolerant, case-insensitive tag scanning. Only what the voice-line table
// needs: element blocks (nesting aware), start tags, attributes, text.

use super::sanitize::{normalize_entities, normalize_ws};

/// ASCII-only lowercasing. Byte offsets into the result match the input.
pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// A borrowed document with a lowercased shadow for matching.
pub struct Html<'a> {
    raw: &'a str,
    lc: String,
}

impl<'a> Html<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw, lc: to_lower(raw) }
    }

    /// Next `<name …>…</name>` block starting at or after `from`, as a byte range
    /// covering both tags. Nested same-name elements are balanced; an unclosed
    /// element runs to the end of the document.
    pub fn next_block(&self, name: &str, from: usize) -> Option<(usize, usize)> {
        let start = self.find_open(name, from)?;
        let mut pos = tag_end(self.raw, start)?;
        let close = join!("</", name);
        let mut depth = 1usize;

        while depth > 0 {
            let next_close = self.lc.get(pos..)?.find(&close).map(|i| i + pos);
            let next_open = self.find_open(name, pos);
            match (next_open, next_close) {
                (Some(o), Some(c)) if o < c => {
                    depth += 1;
                    pos = tag_end(self.raw, o).unwrap_or(self.raw.len());
                }
                (_, Some(c)) => {
                    depth -= 1;
                    pos = tag_end(self.raw, c).unwrap_or(self.raw.len());
                }
                (_, None) => return Some((start, self.raw.len())),
            }
        }
        Some((start, pos))
    }

    /// All sibling-level `name` blocks, in document order.
    pub fn blocks(&self, name: &str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut pos = 0usize;
        while let Some((s, e)) = self.next_block(name, pos) {
            out.push(&self.raw[s..e]);
            pos = e;
        }
        out
    }

    /// Every start tag in the document, in order.
    pub fn start_tags(&self) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut pos = 0usize;
        while let Some(rel) = self.raw.get(pos..).and_then(|r| r.find('<')) {
            let lt = pos + rel;
            let first = self.raw[lt + 1..].chars().next();
            match (first, tag_end(self.raw, lt)) {
                (Some(c), Some(end)) if c.is_ascii_alphabetic() => {
                    out.push(&self.raw[lt..end]);
                    pos = end;
                }
                _ => pos = lt + 1,
            }
        }
        out
    }

    /// Offset of the next start tag named exactly `name` (not a longer name
    /// sharing the prefix, so `p` never matches `<pre>`).
    fn find_open(&self, name: &str, from: usize) -> Option<usize> {
        let pat = join!("<", name);
        let mut pos = from;
        loop {
            let at = self.lc.get(pos..)?.find(&pat)? + pos;
            let next = self.lc[at + pat.len()..].chars().next();
            match next {
                Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/' => return Some(at),
                None => return None,
                _ => pos = at + pat.len(),
            }
        }
    }
}

/// Byte offset just past the `>` closing the tag that starts at `lt`.
/// Quoted attribute values may contain `>`.
fn tag_end(s: &str, lt: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, ch) in s[lt..].char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(ch),
            (None, '>') => return Some(lt + i + 1),
            _ => {}
        }
    }
    None
}

/// The opening tag of a block: `<td class="x">` out of `<td class="x">…</td>`.
pub fn open_tag(block: &str) -> &str {
    match tag_end(block, 0) {
        Some(end) => &block[..end],
        None => block,
    }
}

/// HTML between the opening tag and the final closing tag of a block.
pub fn inner_html(block: &str) -> &str {
    let Some(open_end) = tag_end(block, 0) else { return "" };
    match block.rfind("</") {
        Some(close_start) if close_start >= open_end => &block[open_end..close_start],
        _ => &block[open_end..],
    }
}

/// Read attribute `name` from a start tag. Names match case-insensitively;
/// values may be double-, single- or unquoted and have entities decoded.
pub fn attr(tag: &str, name: &str) -> Option<String> {
    let body = tag.strip_prefix('<')?;
    let body = body.trim_end_matches('>').trim_end_matches('/');
    // skip the element name
    let mut rest = body.trim_start_matches(|c: char| !c.is_whitespace());

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let key = &rest[..name_end];
        rest = rest[name_end..].trim_start();

        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let close = body.find(q).unwrap_or(body.len());
                    rest = body.get(close + 1..).unwrap_or("");
                    &body[..close]
                }
                _ => {
                    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
                    rest = &after_eq[end..];
                    &after_eq[..end]
                }
            }
        } else {
            ""
        };

        if key.eq_ignore_ascii_case(name) {
            return Some(normalize_entities(value));
        }
    }
}

/// Drop every `<…>` tag, decode entities, collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}

/// Split a paragraph's inner HTML on `<br>` variants and raw newlines into
/// clean text lines. Empty lines are dropped.
pub fn split_lines(inner: &str) -> Vec<String> {
    let lc = to_lower(inner);
    let mut pieces = Vec::new();
    let mut pos = 0usize;
    let mut cut = 0usize;

    while let Some(rel) = lc[pos..].find("<br") {
        let at = pos + rel;
        let next = lc[at + 3..].chars().next();
        let is_br = matches!(next, Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/');
        let end = tag_end(inner, at).unwrap_or(inner.len());
        if is_br {
            pieces.push(&inner[cut..at]);
            cut = end;
        }
        pos = end.max(at + 3);
    }
    pieces.push(&inner[cut..]);

    pieces
        .into_iter()
        .flat_map(|p| p.split('\n'))
        .map(strip_tags)
        .filter(|l| !l.is_empty())
        .collect()
}
