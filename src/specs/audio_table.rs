// src/specs/audio_table.rs
//
// Voice-line table: column 2 holds `<span typeof="mw:File">` players with
// `<source data-transcodekey="mp3" src=…>` variants, column 3 holds the
// transcript paragraphs.

use crate::config::consts::{
    FILE_MARKER_ATTR, FILE_MARKER_VALUE, KEY_SUFFIX, SOURCE_SUFFIX, TRANSCODE_ATTR,
    TRANSCODE_FORMAT,
};
use crate::core::html::{self, Html};
use crate::core::Fetch;
use crate::data::Dataset;
use crate::error::Result;

/// Everything one parse pass produces.
#[derive(Debug, Default)]
pub struct Extraction {
    pub entries: Dataset,
    /// Absolute download URLs, one per pair, in insertion order
    pub urls: Vec<String>,
    /// Rows that had a file marker but no mp3 variant
    pub skipped_rows: usize,
}

/// One table row that carries at least one file marker.
#[derive(Debug, PartialEq, Eq)]
struct AudioRow {
    srcs: Vec<String>,
    lines: Vec<String>,
}

/// Fetch `page_url` and extract it.
pub fn fetch(fetcher: &dyn Fetch, page_url: &str, dataset_root: &str) -> Result<Extraction> {
    logf!("Getting audio page {page_url}");
    let doc = fetcher.get_text(page_url)?;
    logd!("Page is {} bytes", doc.len());
    Ok(extract(&doc, dataset_root, Some(page_url)))
}

/// Walk every `<tr>` and pair audio variants with transcript lines.
/// `page_url` resolves root-relative `src` values; `None` leaves them as-is.
pub fn extract(doc: &str, dataset_root: &str, page_url: Option<&str>) -> Extraction {
    let mut out = Extraction::default();

    for (ix, tr) in Html::new(doc).blocks("tr").into_iter().enumerate() {
        let Some(row) = parse_row(tr) else { continue };

        if row.srcs.is_empty() {
            logw!("Row {ix}: file marker without an {TRANSCODE_FORMAT} variant, skipping");
            out.skipped_rows += 1;
            continue;
        }

        for (src, transcript) in pair(row) {
            let key = dataset_key(&src, dataset_root);
            logd!("{key} <- {src}");
            out.entries.insert(key, transcript);
            out.urls.push(absolute_url(&src, page_url));
        }
    }

    logf!(
        "Extracted {} entries from {} audio urls ({} rows skipped)",
        out.entries.len(), out.urls.len(), out.skipped_rows
    );
    out
}

/// `None` unless the row has two cells and file markers in the second.
fn parse_row(tr: &str) -> Option<AudioRow> {
    let cells = Html::new(tr).blocks("td");
    if cells.len() < 2 { return None; }

    let markers = file_markers(html::inner_html(cells[1]));
    if markers.is_empty() { return None; }

    let lines = match cells.get(2) {
        Some(td) => transcript_lines(html::inner_html(td)),
        None => Vec::new(),
    };

    let srcs = markers.iter().flat_map(|m| mp3_sources(m)).collect();
    Some(AudioRow { srcs, lines })
}

/// `<span typeof="mw:File">` blocks, outermost only.
fn file_markers(cell: &str) -> Vec<&str> {
    let doc = Html::new(cell);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = doc.next_block("span", pos) {
        let block = &cell[s..e];
        let is_marker = html::attr(html::open_tag(block), FILE_MARKER_ATTR)
            .is_some_and(|v| v == FILE_MARKER_VALUE);
        if is_marker {
            out.push(block);
            pos = e;
        } else {
            // look inside wrapper spans
            pos = s + html::open_tag(block).len();
        }
    }
    out
}

/// `src` of every element in the marker whose transcode key is mp3.
fn mp3_sources(marker: &str) -> Vec<String> {
    Html::new(marker)
        .start_tags()
        .into_iter()
        .filter(|tag| html::attr(tag, TRANSCODE_ATTR).is_some_and(|v| v == TRANSCODE_FORMAT))
        .filter_map(|tag| html::attr(tag, "src"))
        .collect()
}

/// Paragraph text of the transcript cell, one entry per physical line.
fn transcript_lines(cell: &str) -> Vec<String> {
    Html::new(cell)
        .blocks("p")
        .into_iter()
        .flat_map(|p| html::split_lines(html::inner_html(p)))
        .collect()
}

/// Several variants pair with lines by index; a single variant takes every
/// line joined with spaces.
fn pair(row: AudioRow) -> Vec<(String, String)> {
    let AudioRow { srcs, lines } = row;
    if srcs.len() == 1 {
        let joined = lines.join(" ");
        return srcs.into_iter().map(|src| (src, joined.clone())).collect();
    }
    srcs.into_iter()
        .enumerate()
        .map(|(i, src)| {
            let t = lines.get(i).cloned().unwrap_or_default();
            (src, t)
        })
        .collect()
}

/// Last path segment of a URL.
pub fn file_name(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Manifest key: `<root>/<file name with ogg.mp3 → wav>`. An empty root gives
/// the bare file name; trailing slashes on the root are dropped.
pub fn dataset_key(url: &str, root: &str) -> String {
    let name = file_name(url).replace(SOURCE_SUFFIX, KEY_SUFFIX);
    if root.is_empty() {
        return name;
    }
    join!(root.trim_end_matches('/'), "/", &name)
}

/// `//host/x` → `https://host/x`; `/x` resolves against the page origin.
pub fn absolute_url(src: &str, page_url: Option<&str>) -> String {
    if src.starts_with("//") {
        return join!("https:", src);
    }
    if src.starts_with("https://") || src.starts_with("http://") {
        return s!(src);
    }
    match (src.starts_with('/'), page_url.and_then(origin)) {
        (true, Some(origin)) => join!(origin, src),
        _ => s!(src),
    }
}

/// `https://host:port` part of an absolute URL.
fn origin(url: &str) -> Option<&str> {
    let scheme_end = url.find("://")? + 3;
    let host_end = url[scheme_end..].find('/').map_or(url.len(), |i| i + scheme_end);
    Some(&url[..host_end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio(name: &str) -> String {
        format!(
            r#"<span typeof="mw:File"><span class="mw-tmh-player audio"><audio controls>
<source src="//static.wiki.gg/{name}.ogg" type="audio/ogg"/>
<source src="//static.wiki.gg/transcoded/{name}.ogg.mp3" type="audio/mpeg" data-transcodekey="mp3"/>
</audio></span></span>"#
        )
    }

    #[test]
    fn key_is_prefixed_and_suffix_swapped() {
        assert_eq!(dataset_key("//x/y/a.ogg.mp3", "data"), "data/a.wav");
        assert_eq!(dataset_key("//x/y/a.ogg.mp3", "data/"), "data/a.wav");
        assert_eq!(dataset_key("//x/y/a.ogg.mp3", ""), "a.wav");
        assert_eq!(dataset_key("https://x/b.mp3", "root"), "root/b.mp3");
    }

    #[test]
    fn urls_become_absolute() {
        assert_eq!(absolute_url("//u.org/a.mp3", None), "https://u.org/a.mp3");
        assert_eq!(absolute_url("http://u.org/a.mp3", None), "http://u.org/a.mp3");
        assert_eq!(
            absolute_url("/images/a.mp3", Some("https://bluearchive.wiki/wiki/Ibuki/audio")),
            "https://bluearchive.wiki/images/a.mp3"
        );
        assert_eq!(absolute_url("/images/a.mp3", None), "/images/a.mp3");
    }

    #[test]
    fn row_without_marker_is_not_a_data_row() {
        assert_eq!(parse_row("<tr><td>Title</td><td>plain</td><td><p>x</p></td></tr>"), None);
        assert_eq!(parse_row(&format!("<tr><td>{}</td></tr>", audio("a"))), None);
    }

    #[test]
    fn marker_inside_wrapper_span_is_found() {
        let cell = format!(r#"<span class="wrap">{}</span>"#, audio("a"));
        let markers = file_markers(&cell);
        assert_eq!(markers.len(), 1);
        assert_eq!(mp3_sources(markers[0]), vec!["//static.wiki.gg/transcoded/a.ogg.mp3"]);
    }

    #[test]
    fn only_mp3_variant_is_taken() {
        let row = parse_row(&format!("<tr><td>t</td><td>{}</td><td></td></tr>", audio("a"))).unwrap();
        assert_eq!(row.srcs, vec!["//static.wiki.gg/transcoded/a.ogg.mp3"]);
        assert!(row.lines.is_empty());
    }

    #[test]
    fn missing_third_cell_gives_no_lines() {
        let row = parse_row(&format!("<tr><td>t</td><td>{}</td></tr>", audio("a"))).unwrap();
        assert!(row.lines.is_empty());
        assert_eq!(pair(row), vec![(s!("//static.wiki.gg/transcoded/a.ogg.mp3"), s!())]);
    }

    #[test]
    fn pair_multi_pads_with_empty() {
        let row = AudioRow {
            srcs: vec![s!("a"), s!("b"), s!("c")],
            lines: vec![s!("one")],
        };
        assert_eq!(
            pair(row),
            vec![(s!("a"), s!("one")), (s!("b"), s!()), (s!("c"), s!())]
        );
    }

    #[test]
    fn pair_single_joins_all_lines() {
        let row = AudioRow { srcs: vec![s!("a")], lines: vec![s!("x"), s!("y"), s!("z")] };
        assert_eq!(pair(row), vec![(s!("a"), s!("x y z"))]);
    }
}
