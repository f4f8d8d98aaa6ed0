//! Queues labels and lays them out on a grid of label slots.

use crate::canvas::Canvas;
use crate::error::{Axis, LabelError};
use crate::layout::{normalize_text, Align};
use crate::template::SheetTemplate;
use std::collections::HashSet;

/// Where on the grid a label goes along one axis
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Take the next free slot
    #[default]
    Auto,
    /// A fixed 0-based row or column
    At(usize),
}

impl From<usize> for Placement {
    fn from(index: usize) -> Self {
        Placement::At(index)
    }
}

impl From<Option<usize>> for Placement {
    fn from(index: Option<usize>) -> Self {
        index.map_or(Placement::Auto, Placement::At)
    }
}

/// A queued label. Entries cannot be changed once added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEntry {
    text: String,
    row: Placement,
    col: Placement,
}

impl LabelEntry {
    /// The label text, trimmed
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn row(&self) -> Placement {
        self.row
    }

    pub fn col(&self) -> Placement {
        self.col
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SheetState {
    /// Labels can be added and the sheet can be built
    Open,
    /// The sheet has been rendered
    Built,
}

/// The grid slot a label was assigned to
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LabelPosition {
    pub page: usize,
    pub row: usize,
    pub col: usize,
}

/// A sheet of labels under construction.
///
/// Labels are queued with [`add`](LabelSheet::add) and only laid out when
/// [`build`](LabelSheet::build) is called, which draws every label into a
/// [`Canvas`] and can only happen once.
///
/// Labels without an explicit position fill the grid column by column: down
/// the rows of the first column, then the next column, and on to a new page
/// once every slot of the page has been used. A label with an explicit row or
/// column is drawn exactly there and does not move the automatic cursor, so
/// it can land on top of another label.
///
/// ```
/// use avery_labels::{LabelSheet, Placement};
///
/// let mut sheet = LabelSheet::new();
/// sheet.add("Jane Doe\n123 Main St\nSpringfield", Placement::Auto, Placement::Auto)?;
/// sheet.add("Return to sender", Placement::At(9), Placement::At(2))?;
/// assert_eq!(sheet.len(), 2);
///
/// let plan = sheet.plan();
/// assert_eq!((plan[1].row, plan[1].col), (9, 2));
/// # Ok::<(), avery_labels::LabelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LabelSheet {
    template: SheetTemplate,
    entries: Vec<LabelEntry>,
    state: SheetState,
    outlines: bool,
}

impl Default for LabelSheet {
    fn default() -> Self {
        LabelSheet::new()
    }
}

impl LabelSheet {
    /// An empty Avery 5160 sheet
    pub fn new() -> LabelSheet {
        LabelSheet {
            template: SheetTemplate::AVERY_5160,
            entries: Vec::new(),
            state: SheetState::Open,
            outlines: false,
        }
    }

    /// Outline every label when building, which helps when aligning a printer
    pub fn with_outlines(mut self, outlines: bool) -> LabelSheet {
        self.outlines = outlines;
        self
    }

    pub fn state(&self) -> SheetState {
        self.state
    }

    pub fn entries(&self) -> &[LabelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue a label. Lines are separated by `\n`.
    ///
    /// The text is trimmed, must not end up empty, and may contain at most
    /// [`max_lines`](SheetTemplate::max_lines) line breaks. An explicit row or
    /// column must lie on the grid. A rejected label leaves the sheet as it was.
    pub fn add<S: AsRef<str>>(
        &mut self,
        text: S,
        row: Placement,
        col: Placement,
    ) -> Result<(), LabelError> {
        if self.state != SheetState::Open {
            return Err(LabelError::AlreadyBuilt);
        }

        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(LabelError::EmptyLabel);
        }
        let breaks = normalize_text(text).matches('\n').count();
        if breaks > self.template.max_lines {
            return Err(LabelError::InvalidLabel {
                lines: breaks,
                max: self.template.max_lines,
            });
        }

        check_axis(Axis::Row, row, self.template.rows)?;
        check_axis(Axis::Column, col, self.template.columns)?;

        self.entries.push(LabelEntry {
            text: text.to_string(),
            row,
            col,
        });
        Ok(())
    }

    /// Queue a label in the next free slot
    pub fn push<S: AsRef<str>>(&mut self, text: S) -> Result<(), LabelError> {
        self.add(text, Placement::Auto, Placement::Auto)
    }

    /// Work out which page, row, and column every queued label lands in,
    /// without drawing anything
    pub fn plan(&self) -> Vec<LabelPosition> {
        let rows = self.template.rows;
        let columns = self.template.columns;
        let capacity = self.template.capacity();

        let mut positions = Vec::with_capacity(self.entries.len());
        let mut current_row = 0;
        let mut current_col = 0;
        let mut current_page = 0;
        let mut items_on_page = 0;

        for entry in self.entries.iter() {
            if items_on_page >= capacity {
                current_page += 1;
                items_on_page = 1;
                current_row = 0;
                current_col = 0;
            } else {
                items_on_page += 1;
            }
            if current_row >= rows {
                current_col += 1;
                current_row = 0;
            }
            if current_col >= columns {
                current_page += 1;
                items_on_page = 1;
                current_row = 0;
                current_col = 0;
            }

            let row = match entry.row {
                Placement::At(row) if row < rows => row,
                _ => {
                    current_row += 1;
                    current_row - 1
                }
            };
            let col = match entry.col {
                Placement::At(col) if col < columns => col,
                _ => current_col,
            };

            positions.push(LabelPosition {
                page: current_page,
                row,
                col,
            });
        }

        positions
    }

    /// Indices of labels that land on a slot an earlier label already took.
    /// They are still drawn, on top of the earlier one.
    pub fn overlaps(&self) -> Vec<usize> {
        overlapping(&self.plan())
    }

    /// Draw every queued label into `canvas`, adding pages as needed.
    ///
    /// The first page is added by this call. Fails without touching the canvas
    /// if the sheet was already built.
    pub fn build<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> Result<(), LabelError> {
        if self.state != SheetState::Open {
            return Err(LabelError::AlreadyBuilt);
        }

        let positions = self.plan();
        let template = self.template;

        if let Some(last) = positions.last() {
            canvas.add_page(template.page_size);
            let row_height = template.row_height(canvas.page_height());
            let line_height = template.line_height(row_height);

            let overlaps: HashSet<usize> = overlapping(&positions).into_iter().collect();

            let mut page = 0;
            for (index, (entry, position)) in self.entries.iter().zip(positions.iter()).enumerate()
            {
                while page < position.page {
                    canvas.add_page(template.page_size);
                    page += 1;
                }

                if overlaps.contains(&index) {
                    log::warn!(
                        "label {index} overlaps an earlier label on page {} row {} column {}",
                        position.page,
                        position.row,
                        position.col
                    );
                }

                let (x, y) = template.label_origin(position.row, position.col, row_height);
                log::debug!(
                    "label {index} -> page {} row {} column {} at ({x}mm, {y}mm)",
                    position.page,
                    position.row,
                    position.col
                );

                canvas.set_y(y);
                canvas.set_x(x);
                canvas.multi_cell(
                    template.column_width,
                    line_height,
                    &entry.text,
                    self.outlines,
                    Align::Center,
                );
            }

            log::info!(
                "built {} labels on {} pages",
                self.entries.len(),
                last.page + 1
            );
        } else {
            log::info!("built an empty label sheet");
        }

        self.state = SheetState::Built;
        Ok(())
    }
}

fn overlapping(positions: &[LabelPosition]) -> Vec<usize> {
    let mut occupied = HashSet::new();
    positions
        .iter()
        .enumerate()
        .filter(|(_, position)| !occupied.insert(**position))
        .map(|(index, _)| index)
        .collect()
}

fn check_axis(axis: Axis, placement: Placement, limit: usize) -> Result<(), LabelError> {
    match placement {
        Placement::At(index) if index >= limit => {
            Err(LabelError::InvalidPlacement { axis, index, limit })
        }
        _ => Ok(()),
    }
}
