pub mod extract;
pub mod render;

use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use render::Template;

/// Outcome of one conversion pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub converted: usize,
    pub failed: usize,
}

/// File name without its extension; used for the output name and the title.
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Two-step pipeline: markdown → extracted document → rendered page on disk.
pub fn convert_file(md_path: &Path, template: &Template, output_folder: &Path) -> Result<PathBuf> {
    let doc = extract::extract(md_path)?;
    debug!(headlines = ?doc.headlines, text = %doc.text, image = %doc.image, "Extracted content");

    let name = base_name(md_path);
    let html = render::render(&doc, template, &name);
    debug!(content = %html, "Content after replacing");

    let out = render::write_page(output_folder, &name, &html)?;
    info!(path = %out.display(), "HTML file created");
    Ok(out)
}

/// Convert every `*.md` file directly inside `md_folder`.
///
/// A failing file is logged and counted; the rest of the batch still runs.
/// Only a failure to list the folder ends the pass early.
pub fn convert_folder(
    md_folder: &Path,
    template: &Template,
    output_folder: &Path,
) -> Result<ConvertStats> {
    let mut files = Vec::new();
    for entry in WalkDir::new(md_folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::walk(md_folder, e))?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(".md") {
            files.push(entry.into_path());
        }
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut stats = ConvertStats::default();
    for path in &files {
        pb.set_message(base_name(path));
        match convert_file(path, template, output_folder) {
            Ok(_) => stats.converted += 1,
            Err(e) => {
                pb.suspend(|| warn!(file = %path.display(), error = %e, "Error processing file"));
                stats.failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(stats)
}

// ── Tests ──
