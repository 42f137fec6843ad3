/*!
 * Error types for the tmxdoc library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when decoding or encoding TMX wire text
#[derive(Error, Debug)]
pub enum TmxError {
    /// The root element carries a version other than the supported one
    #[error("unsupported TMX version: expected \"1.4\", found \"{found}\"")]
    UnsupportedVersion {
        /// Version string found on the root element
        found: String,
    },

    /// The wire text is not a well-formed XML document
    #[error("malformed TMX document: {0}")]
    Malformed(String),

    /// The root element is not a `tmx` element
    #[error("not a TMX document: root element is <{0}>")]
    NotTmx(String),

    /// An operation that is declared but has no defined behavior yet
    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Errors that can occur while handling localizable resources
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The resource names a segmentation type outside paragraph/sentence
    #[error("invalid segmentation type: {0}")]
    InvalidSegmentation(String),
}
