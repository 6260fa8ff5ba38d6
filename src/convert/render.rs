use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::extract::ExtractedDocument;
use crate::error::{Error, Result};

/// Consumed once per headline, then once more by the base name.
pub const HEADLINE_PLACEHOLDER: &str = "Placeholder Headline";
/// Body text. Also the default image target.
pub const BODY_PLACEHOLDER: &str = "Test text";
pub const TITLE_PLACEHOLDER: &str = "Placeholder Title";

/// Article layout loaded once per run and shared by every page.
#[derive(Debug, Clone)]
pub struct Template {
    html: String,
    image_placeholder: Option<String>,
}

impl Template {
    pub fn new(html: impl Into<String>) -> Self {
        Template {
            html: html.into(),
            image_placeholder: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let html = fs::read_to_string(path).map_err(|source| Error::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Template::new(html))
    }

    /// Give the image tag its own marker instead of the body placeholder.
    pub fn with_image_placeholder(mut self, placeholder: Option<String>) -> Self {
        self.image_placeholder = placeholder;
        self
    }

    fn image_placeholder(&self) -> &str {
        self.image_placeholder.as_deref().unwrap_or(BODY_PLACEHOLDER)
    }
}

/// A template copy being filled in, one placeholder occurrence at a time.
struct Page {
    html: String,
}

impl Page {
    /// Replace the first remaining occurrence of `placeholder`.
    /// Returns false when none is left.
    fn substitute(&mut self, placeholder: &str, replacement: &str) -> bool {
        match self.html.find(placeholder) {
            Some(start) => {
                self.html
                    .replace_range(start..start + placeholder.len(), replacement);
                true
            }
            None => false,
        }
    }
}

/// Fill `template` with the extracted article.
///
/// Order matters: headlines first, then body text, image, and finally the
/// base name into the headline and title markers that are still left.
pub fn render(doc: &ExtractedDocument, template: &Template, base_name: &str) -> String {
    let mut page = Page {
        html: template.html.clone(),
    };

    for (i, h) in doc.headlines.iter().enumerate() {
        let tag = format!("<h{0}>{1}</h{0}>", h.level, h.content);
        if !page.substitute(HEADLINE_PLACEHOLDER, &tag) {
            debug!(base_name, dropped = doc.headlines.len() - i, "No headline placeholder left");
            break;
        }
    }

    page.substitute(BODY_PLACEHOLDER, &format!("<p>{}</p>", doc.text));

    let img = format!("<img src=\"{}\" alt=\"Picture\">", doc.image);
    if !page.substitute(template.image_placeholder(), &img) {
        debug!(base_name, image = %doc.image, "Image placeholder already consumed");
    }

    page.substitute(HEADLINE_PLACEHOLDER, base_name);
    page.substitute(TITLE_PLACEHOLDER, base_name);

    page.html
}

/// Write `<output_folder>/<base_name>.html`, creating the folder if needed.
pub fn write_page(output_folder: &Path, base_name: &str, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_folder).map_err(|source| Error::FolderCreate {
        path: output_folder.to_path_buf(),
        source,
    })?;

    let path = output_folder.join(format!("{}.html", base_name));
    fs::write(&path, html).map_err(|source| Error::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

// ── Tests ──
