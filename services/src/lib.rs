//! Collaborators of the question pipeline that are not about the model itself:
//! text extraction from uploaded images and identifier generation.

pub mod ocr;
pub mod uuid;

pub use ocr::{OcrConfig, OcrError, TesseractOcr, TextExtractor};
