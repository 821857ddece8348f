//! Remote steps: ask the OCR service for markdown.

pub mod ocr2md;
