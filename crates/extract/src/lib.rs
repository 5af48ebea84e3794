//! Brevity document text extraction
//!
//! PDF text via lopdf, plain UTF-8 text passed through

mod pdf;

pub use pdf::{extract_document, extract_pdf_text, is_pdf};
