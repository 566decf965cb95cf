//! Document assembly for profiling reports.
//!
//! A [`Document`] collects an ordered sequence of content blocks (paragraphs,
//! tables, image references, page breaks) and renders them to a standalone
//! HTML file. Producers only append blocks; all rendering concerns live here.

use chrono::Local;
use maud::{Markup, PreEscaped, html};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// One ordered piece of document content.
#[derive(Debug, Clone)]
pub enum ContentBlock {
    /// A descriptive text paragraph.
    Paragraph(String),
    /// A table with a header row and data rows.
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A reference to an image or chart file on disk.
    Image(PathBuf),
    /// An explicit break between document sections.
    PageBreak,
}

/// An ordered document assembled from content blocks.
///
/// Blocks render in insertion order. Chart files saved as HTML embed as
/// iframes so interactive plots survive; raster files embed as `<img>`.
pub struct Document {
    title: String,
    blocks: Vec<ContentBlock>,
}

impl Document {
    pub fn new(title: &str) -> Self {
        Document {
            title: title.to_string(),
            blocks: Vec::new(),
        }
    }

    /// Append a descriptive text paragraph.
    pub fn add_description(&mut self, text: impl Into<String>) {
        self.blocks.push(ContentBlock::Paragraph(text.into()));
    }

    /// Append a table with a header row and data rows.
    pub fn add_table(&mut self, headers: Vec<String>, rows: Vec<Vec<String>>) {
        self.blocks.push(ContentBlock::Table { headers, rows });
    }

    /// Append a reference to a chart or image file.
    pub fn add_image(&mut self, path: impl Into<PathBuf>) {
        self.blocks.push(ContentBlock::Image(path.into()));
    }

    /// Append an explicit section break.
    pub fn add_page_break(&mut self) {
        self.blocks.push(ContentBlock::PageBreak);
    }

    /// Number of blocks added so far.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn render_block(block: &ContentBlock) -> Markup {
        match block {
            ContentBlock::Paragraph(text) => html! {
                p class="description" { (text) }
            },
            ContentBlock::Table { headers, rows } => html! {
                table {
                    thead {
                        tr {
                            @for header in headers {
                                th { (header) }
                            }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                @for cell in row {
                                    td { (cell) }
                                }
                            }
                        }
                    }
                }
            },
            ContentBlock::Image(path) => {
                let src = path.display().to_string();
                // Interactive plotly output is a full HTML page, so it embeds
                // as an iframe rather than an img tag.
                if path.extension().and_then(|e| e.to_str()) == Some("html") {
                    html! {
                        iframe class="chart" src=(src) {}
                    }
                } else {
                    html! {
                        img class="chart" src=(src) alt=(src);
                    }
                }
            }
            ContentBlock::PageBreak => html! {
                div class="page-break" {}
            },
        }
    }

    fn render(&self) -> Markup {
        let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        html! {
            html {
                head {
                    title { (self.title) }
                    style {
                        (PreEscaped("
                            body {
                                font-family: Arial, sans-serif;
                                max-width: 900px;
                                margin: 0 auto;
                                padding: 20px;
                            }
                            h1 {
                                color: #145da0;
                                border-bottom: 2px solid #4a90e2;
                                padding-bottom: 8px;
                            }
                            p.description {
                                font-weight: bold;
                                margin: 18px 0 6px 0;
                            }
                            table {
                                border-collapse: collapse;
                                margin-bottom: 12px;
                            }
                            th {
                                background: #808080;
                                color: whitesmoke;
                                padding: 6px 12px;
                            }
                            td {
                                background: #f5f5dc;
                                padding: 4px 12px;
                                text-align: center;
                            }
                            iframe.chart {
                                width: 820px;
                                height: 520px;
                                border: none;
                                display: block;
                                margin-bottom: 12px;
                            }
                            img.chart {
                                max-width: 820px;
                                display: block;
                                margin-bottom: 12px;
                            }
                            .page-break {
                                border-top: 1px dashed #aaa;
                                margin: 30px 0;
                                page-break-after: always;
                            }
                            .timestamp {
                                color: #777;
                                font-size: 13px;
                            }
                        "))
                    }
                }
                body {
                    h1 { (self.title) }
                    p class="timestamp" { "Generated on: " (generated_at) }
                    @for block in &self.blocks {
                        (Self::render_block(block))
                    }
                }
            }
        }
    }

    /// Render the document and write it to an HTML file.
    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let mut file = std::fs::File::create(path)?;
        file.write_all(self.render().into_string().as_bytes())?;
        info!("Document saved to: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        let mut doc = Document::new("Test Report");
        doc.add_description("Column Types:");
        doc.add_table(
            vec!["Type".to_string(), "Column Names".to_string()],
            vec![vec!["Numerical Columns".to_string(), "age, fare".to_string()]],
        );
        doc.add_page_break();
        doc.add_image("charts/histogram_of_age.html");
        doc
    }

    #[test]
    fn test_blocks_render_in_order() {
        let doc = sample_document();
        let rendered = doc.render().into_string();

        let para_pos = rendered.find("Column Types:").unwrap();
        let table_pos = rendered.find("Numerical Columns").unwrap();
        let break_pos = rendered.find("page-break").unwrap();
        let image_pos = rendered.find("histogram_of_age").unwrap();

        assert!(para_pos < table_pos);
        assert!(table_pos < break_pos);
        assert!(break_pos < image_pos);
    }

    #[test]
    fn test_html_chart_embeds_as_iframe() {
        let mut doc = Document::new("Charts");
        doc.add_image("box_plot_of_age.html");
        doc.add_image("logo.png");

        let rendered = doc.render().into_string();
        assert!(rendered.contains("<iframe class=\"chart\" src=\"box_plot_of_age.html\""));
        assert!(rendered.contains("<img class=\"chart\" src=\"logo.png\""));
    }

    #[test]
    fn test_table_renders_headers_and_cells() {
        let mut doc = Document::new("Tables");
        doc.add_table(
            vec!["Metric".to_string(), "Percentage".to_string()],
            vec![vec!["Duplicate Percentage".to_string(), "20.00%".to_string()]],
        );

        let rendered = doc.render().into_string();
        assert!(rendered.contains("<th>Metric</th>"));
        assert!(rendered.contains("<td>20.00%</td>"));
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");

        let doc = sample_document();
        doc.save_to_file(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Test Report"));
        assert!(contents.contains("Generated on:"));
    }
}
