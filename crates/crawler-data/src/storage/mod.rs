//! 저장소 모듈.

pub mod csv;

pub use self::csv::{append_row, CsvAppender};
