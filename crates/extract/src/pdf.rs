use brevity_common::{BrevityError, Result};
use lopdf::Document;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Whether the bytes start with a PDF header
///
/// A byte order mark and leading whitespace are skipped; a `%PDF` anywhere
/// else in the data does not count.
pub fn is_pdf(bytes: &[u8]) -> bool {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(PDF_MAGIC)
}

/// Extract text from every readable page of a PDF, in page order
///
/// Pages that fail to decode are skipped with a warning. A document that
/// cannot be loaded at all is an error.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| BrevityError::extraction(format!("Failed to load PDF: {}", e)))?;

    let pages = doc.get_pages();
    let mut parts = Vec::with_capacity(pages.len());

    for page_number in pages.keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(text) => parts.push(text),
            Err(e) => warn!("Failed to extract page {}: {}", page_number, e),
        }
    }

    debug!(
        "Extracted {} of {} pages - Length: {} chars",
        parts.len(),
        pages.len(),
        parts.iter().map(String::len).sum::<usize>()
    );

    Ok(parts.join("\n"))
}

/// Extract text from an uploaded document
///
/// PDFs go through [`extract_pdf_text`]; anything else must be UTF-8 text.
pub fn extract_document(bytes: &[u8]) -> Result<String> {
    if is_pdf(bytes) {
        return extract_pdf_text(bytes);
    }

    String::from_utf8(bytes.to_vec()).map_err(|_| {
        BrevityError::invalid_input("Unsupported document: expected a PDF or UTF-8 text file")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a minimal PDF with one line of text per page
    fn build_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for text in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_extracts_pages_in_order() {
        let bytes = build_pdf(&["First page text", "Second page text"]);
        assert!(is_pdf(&bytes));

        let text = extract_pdf_text(&bytes).unwrap();
        let first = text.find("First page text").expect("page 1 text");
        let second = text.find("Second page text").expect("page 2 text");
        assert!(first < second);
    }

    #[test]
    fn test_extract_document_routes_pdf() {
        let bytes = build_pdf(&["Hello World"]);
        assert!(extract_document(&bytes).unwrap().contains("Hello World"));
    }

    #[test]
    fn test_broken_pdf_is_an_extraction_error() {
        let err = extract_pdf_text(b"%PDF-1.5\nthis is not a pdf").unwrap_err();
        assert!(matches!(err, BrevityError::Extraction(_)));
    }

    #[test]
    fn test_plain_text_passes_through() {
        let text = extract_document("plain notes\n\nsecond paragraph".as_bytes()).unwrap();
        assert_eq!(text, "plain notes\n\nsecond paragraph");
    }

    #[test]
    fn test_pdf_header_must_lead_the_file() {
        assert!(is_pdf(b"%PDF-1.7\n"));
        assert!(is_pdf(b"\xEF\xBB\xBF  \r\n%PDF-1.4\n"));
        assert!(!is_pdf(b"Notes: every PDF file starts with %PDF-1.7 in its header."));
        assert!(!is_pdf(b""));
    }

    #[test]
    fn test_text_mentioning_pdf_header_passes_through() {
        let notes = "Notes: every PDF file starts with %PDF-1.7 in its header.";
        assert_eq!(extract_document(notes.as_bytes()).unwrap(), notes);
    }

    #[test]
    fn test_binary_data_is_rejected() {
        let err = extract_document(&[0xff, 0xfe, 0x00, 0x81]).unwrap_err();
        assert!(matches!(err, BrevityError::InvalidInput(_)));
    }
}
