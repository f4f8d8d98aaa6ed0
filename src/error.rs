use thiserror::Error;

/// Errors produced while loading fonts or writing the PDF document
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error("page order refers to a page that is no longer in the document")]
    /// The document's page order is out of sync with its pages
    PageMissing,
}

/// Which grid axis an explicit placement was given for
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// Errors raised by a [`LabelSheet`](crate::LabelSheet). None of them leave the
/// sheet or the canvas partially modified.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LabelError {
    #[error("label text is empty")]
    /// The label was empty or only whitespace
    EmptyLabel,

    #[error("label has {lines} line breaks, at most {max} are allowed")]
    /// The label has more embedded line breaks than fit on one label
    InvalidLabel { lines: usize, max: usize },

    #[error("{axis} {index} is outside the sheet (must be less than {limit})")]
    /// An explicit row or column was outside the grid
    InvalidPlacement { axis: Axis, index: usize, limit: usize },

    #[error("the label sheet has already been built")]
    /// `build` was called on a sheet that was already built
    AlreadyBuilt,
}

impl LabelError {
    /// Whether this error rejected the label's text, as opposed to its position
    /// or the sheet's state
    pub fn is_invalid_label(&self) -> bool {
        matches!(self, LabelError::EmptyLabel | LabelError::InvalidLabel { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = LabelError::InvalidPlacement {
            axis: Axis::Column,
            index: 3,
            limit: 3,
        };
        assert_eq!(
            err.to_string(),
            "column 3 is outside the sheet (must be less than 3)"
        );
        assert_eq!(
            LabelError::InvalidLabel { lines: 5, max: 4 }.to_string(),
            "label has 5 line breaks, at most 4 are allowed"
        );
    }

    #[test]
    fn label_errors_are_grouped() {
        assert!(LabelError::EmptyLabel.is_invalid_label());
        assert!(LabelError::InvalidLabel { lines: 5, max: 4 }.is_invalid_label());
        assert!(!LabelError::AlreadyBuilt.is_invalid_label());
    }
}
