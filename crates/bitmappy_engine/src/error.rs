//! Unified error types for bitmappy_engine

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bitmappy_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("Failed to read '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === INI Errors ===
    #[error("Syntax error in line {line}: {message}")]
    IniSyntax { line: usize, message: String },

    #[error("Section [{name}] defined twice (line {line})")]
    DuplicateSection { name: String, line: usize },

    #[error("Option '{option}' in section [{section}] defined twice (line {line})")]
    DuplicateOption { section: String, option: String, line: usize },

    // === Sprite Format Errors ===
    #[error("Missing section [{name}]")]
    MissingSection { name: String },

    #[error("Missing option '{option}' in section [{section}]")]
    MissingOption { section: String, option: String },

    #[error("Malformed palette entry [{key}]: {message}")]
    MalformedPaletteEntry { key: char, message: String },

    #[error("Unknown palette key '{key}' at row {row}, column {column}")]
    UnknownPaletteKey { key: char, row: usize, column: usize },

    #[error("Row {row} has {actual} pixels, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },

    #[error("Sprite contains no pixel rows")]
    EmptyPixels,

    #[error("Too many colors: {colors} distinct colors, only {capacity} palette keys available")]
    PaletteExhausted { colors: usize, capacity: usize },

    // === Grid Errors ===
    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Pixel index {index} out of range (0..{len})")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("Pixel data length mismatch: expected {expected}, got {actual}")]
    PixelDataLength { expected: usize, actual: usize },

    // === Color Errors ===
    #[error("Invalid hex color: {value}")]
    InvalidHexColor { value: String },

    // === External Errors ===
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias for bitmappy_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile { path: path.into(), source }
    }

    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFile { path: path.into(), source }
    }

    pub fn missing_section(name: impl Into<String>) -> Self {
        Self::MissingSection { name: name.into() }
    }

    pub fn missing_option(section: impl Into<String>, option: impl Into<String>) -> Self {
        Self::MissingOption {
            section: section.into(),
            option: option.into(),
        }
    }

    pub fn malformed_palette_entry(key: char, msg: impl Into<String>) -> Self {
        Self::MalformedPaletteEntry { key, message: msg.into() }
    }

    /// Bounds violation for a signed index as passed in by callers.
    pub fn index_out_of_range(index: i64, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
