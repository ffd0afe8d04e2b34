//! PDF export
//!
//! Lays the raw itinerary text out as one flowing block of Helvetica lines on
//! A4 pages, adding pages as needed.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::debug;

use super::{ExportSink, SinkError};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 10.0;

/// Roughly what fits between the margins at 12pt Helvetica
const CHARS_PER_LINE: usize = 85;

/// Writes itinerary text to a PDF file
#[derive(Debug, Clone)]
pub struct PdfExporter {
    title: String,
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self {
            title: "Travel Itinerary".to_string(),
        }
    }
}

impl PdfExporter {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into() }
    }

    fn lines_per_page() -> usize {
        (((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM) as usize).max(1)
    }

    /// Wrap the text and split it into pages of lines
    ///
    /// Blank lines are kept so paragraphs stay apart. Always yields at least
    /// one page.
    pub fn layout_pages(text: &str) -> Vec<Vec<String>> {
        let lines: Vec<String> = text
            .replace('\r', "")
            .replace('\t', "    ")
            .lines()
            .flat_map(|line| {
                textwrap::wrap(line, CHARS_PER_LINE)
                    .into_iter()
                    .map(|l| l.into_owned())
                    .collect::<Vec<_>>()
            })
            .collect();

        if lines.is_empty() {
            return vec![Vec::new()];
        }
        lines.chunks(Self::lines_per_page()).map(|c| c.to_vec()).collect()
    }
}

impl ExportSink for PdfExporter {
    fn export(&self, text: &str, filename: &Path) -> Result<(), SinkError> {
        debug!(path = %filename.display(), text_len = text.len(), "PdfExporter::export: called");
        let pages = Self::layout_pages(text);

        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| SinkError::Pdf(e.to_string()))?;

        for (index, lines) in pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                doc.get_page(page).get_layer(layer)
            };

            let mut y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
            for line in lines {
                layer.use_text(line.as_str(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
                y -= LINE_HEIGHT_MM;
            }
        }

        if let Some(parent) = filename.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(filename)?);
        doc.save(&mut writer).map_err(|e| SinkError::Pdf(e.to_string()))?;

        debug!(pages = pages.len(), "PdfExporter::export: written");
        Ok(())
    }
}
