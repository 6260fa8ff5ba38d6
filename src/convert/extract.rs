use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};

const IMAGE_LABEL: &str = "![Picture]";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlineRecord {
    pub level: usize,
    pub content: String,
}

/// Everything the renderer needs from one markdown article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    pub headlines: Vec<HeadlineRecord>,
    pub text: String,
    /// Path of the last image line, empty when the article has none.
    pub image: String,
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Headline(HeadlineRecord),
    Image(&'a str),
    Text(&'a str),
}

fn classify_line(line: &str) -> Line<'_> {
    if line.starts_with('#') {
        // Level counts every '#' on the line, not only the leading run.
        let level = line.chars().filter(|&c| c == '#').count();
        let content = line.trim_start_matches(['#', ' ']).trim().to_string();
        return Line::Headline(HeadlineRecord { level, content });
    }

    if line.starts_with("![") {
        let image = line.strip_prefix(IMAGE_LABEL).unwrap_or(line).trim();
        return Line::Image(image.trim_matches(['(', ')']));
    }

    Line::Text(line)
}

/// Read a markdown file and split it into headlines, body text and image.
pub fn extract(path: &Path) -> Result<ExtractedDocument> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse(BufReader::new(file)).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Lines are split on `\n` with a trailing `\r` dropped. Bytes that are not
/// UTF-8 become U+FFFD instead of failing the whole article.
pub fn parse(mut reader: impl BufRead) -> io::Result<ExtractedDocument> {
    let mut doc = ExtractedDocument::default();
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let raw = buf.strip_suffix(b"\n").unwrap_or(&buf);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line = String::from_utf8_lossy(raw);

        match classify_line(&line) {
            Line::Headline(h) => doc.headlines.push(h),
            Line::Image(path) => doc.image = path.to_string(),
            Line::Text(t) => {
                text.push_str(t);
                text.push(' ');
            }
        }
    }

    doc.text = text.trim().to_string();
    Ok(doc)
}

// ── Tests ──
