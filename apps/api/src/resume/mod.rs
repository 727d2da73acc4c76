//! Résumé intake: multipart parsing, scoped on-disk staging of the uploaded
//! file and text extraction.

pub mod extractor;
pub mod handlers;
pub mod upload;
