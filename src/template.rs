use crate::pagesize::{PageSize, LETTER};
use crate::units::Mm;

/// Grid geometry of a physical label sheet. Measurements are from the
/// top-left corner of the page.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SheetTemplate {
    /// Paper the sheet is printed on
    pub page_size: PageSize,
    pub rows: usize,
    pub columns: usize,
    /// Width of one label
    pub column_width: Mm,
    /// Most line breaks a single label may contain
    pub max_lines: usize,
    /// Space above the first row, and below the last
    pub top: Mm,
    /// Space left of the first column
    pub left: Mm,
    /// Horizontal space between adjacent columns
    pub gutter: Mm,
    /// Offset of the text from the top of its label
    pub padding: Mm,
}

impl SheetTemplate {
    /// Avery 5160 / 8160 address labels: 30 labels of 1" x 2-5/8" on US Letter
    pub const AVERY_5160: SheetTemplate = SheetTemplate {
        page_size: LETTER,
        rows: 10,
        columns: 3,
        column_width: Mm(67.0),
        max_lines: 4,
        top: Mm(13.0),
        left: Mm(5.0),
        gutter: Mm(3.0),
        padding: Mm(2.0),
    };

    /// Number of label slots on one page
    pub fn capacity(&self) -> usize {
        self.rows * self.columns
    }

    /// Height of one row of labels on a page of `page_height`
    pub fn row_height(&self, page_height: Mm) -> Mm {
        (page_height - self.top * 2.0) / self.rows as f32
    }

    /// Top-left corner of the text block for the label at `row`, `col`
    pub fn label_origin(&self, row: usize, col: usize, row_height: Mm) -> (Mm, Mm) {
        let x = self.left + self.column_width * col as f32 + self.gutter * col as f32;
        let y = self.top + row_height * row as f32 + self.padding;
        (x, y)
    }

    /// Line height used for the text of one label
    pub fn line_height(&self, row_height: Mm) -> Mm {
        row_height / 3.5
    }
}

impl Default for SheetTemplate {
    fn default() -> Self {
        SheetTemplate::AVERY_5160
    }
}
