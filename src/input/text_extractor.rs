//! Text extraction from various file formats

use crate::error::{Result, ScreenerError};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

// <w:br/>, <w:br w:type="page"/>, <w:cr/>
static DOCX_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<w:(?:br|cr)\b[^>]*/>").expect("Invalid break regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ScreenerError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        self.extract_from_bytes(&bytes).map_err(|e| {
            ScreenerError::DocxExtraction(format!("'{}': {}", path.display(), e))
        })
    }
}

impl DocxExtractor {
    /// Pull the body text out of a DOCX container held in memory
    pub fn extract_from_bytes(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ScreenerError::DocxExtraction(format!("not a zip container: {}", e)))?;

        let mut document = archive
            .by_name("word/document.xml")
            .map_err(|e| ScreenerError::DocxExtraction(format!("missing word/document.xml: {}", e)))?;

        let mut xml = String::new();
        document.read_to_string(&mut xml)?;

        Ok(Self::xml_to_text(&xml))
    }

    /// One line per paragraph; runs inside a paragraph are concatenated.
    pub fn xml_to_text(xml: &str) -> String {
        let text = xml.replace("</w:p>", "\n").replace("<w:tab/>", "\t");
        let text = DOCX_BREAK_RE.replace_all(&text, "\n");
        let stripped = TAG_RE.replace_all(&text, "");

        decode_entities(&stripped)
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        // undecodable bytes are dropped rather than failing the document
        Ok(String::from_utf8_lossy(&bytes).replace('\u{FFFD}', ""))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(path).await?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html.replace("<br>", "\n").replace("</p>", "\n\n");

        let clean_text = decode_entities(&TAG_RE.replace_all(&text, ""));

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", FileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_xml_to_text() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p><w:p><w:r><w:t>Skills:</w:t></w:r><w:r><w:tab/><w:t>Rust &amp; SQL</w:t></w:r></w:p></w:body></w:document>"#;
        assert_eq!(DocxExtractor::xml_to_text(xml), "Jane Doe\nSkills:\tRust & SQL");
    }

    #[test]
    fn test_docx_breaks_separate_words() {
        let xml = r#"<w:p><w:r><w:t>Python</w:t><w:br w:type="page"/><w:t>SQL</w:t><w:cr/><w:t>Docker</w:t><w:br/><w:t>Linux</w:t></w:r></w:p>"#;
        assert_eq!(DocxExtractor::xml_to_text(xml), "Python\nSQL\nDocker\nLinux");
    }

    #[test]
    fn test_docx_from_bytes() {
        let bytes = build_docx(r#"<w:document><w:body><w:p><w:r><w:t>Ada Lovelace</w:t></w:r></w:p></w:body></w:document>"#);
        let text = DocxExtractor.extract_from_bytes(&bytes).unwrap();
        assert_eq!(text, "Ada Lovelace");
    }

    #[test]
    fn test_docx_rejects_plain_bytes() {
        let result = DocxExtractor.extract_from_bytes(b"not a zip file");
        assert!(matches!(result, Err(ScreenerError::DocxExtraction(_))));
    }

    #[test]
    fn test_markdown_html_to_text() {
        let html = "<h2>Skills</h2>\n<p><strong>Rust</strong> &amp; Go</p>\n";
        assert_eq!(MarkdownExtractor.html_to_text(html), "Skills\nRust & Go");
    }
}
