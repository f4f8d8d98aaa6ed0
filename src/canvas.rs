//! The drawing surface label sheets render into.
//!
//! [`Canvas`] is a small cursor-based API in the style of classic PDF
//! libraries: coordinates are millimetres from the top-left corner of the
//! current page, the caller positions a cursor and then draws a wrapped text
//! block at it. [`PdfCanvas`] implements it on top of [`Document`].

use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::font::Font;
use crate::info::Info;
use crate::layout::{align_offset, wrap_lines, Align, Margins};
use crate::page::{FrameLayout, Page, SpanFont, SpanLayout};
use crate::pagesize::{PageSize, LETTER};
use crate::rect::Rect;
use crate::units::*;
use crate::PDFError;
use id_arena::Id;
use std::io::Write;

/// A paginated surface that text blocks can be drawn onto
pub trait Canvas {
    /// Width of the current page
    fn page_width(&self) -> Mm;

    /// Height of the current page
    fn page_height(&self) -> Mm;

    /// Start a new page of the given size and make it current
    fn add_page(&mut self, size: PageSize);

    fn set_x(&mut self, x: Mm);

    fn set_y(&mut self, y: Mm);

    /// Draw `text` at the cursor as a block `width` wide, wrapping it into
    /// lines `line_height` tall. `border` outlines the whole block. Moves the
    /// cursor below the block.
    fn multi_cell(&mut self, width: Mm, line_height: Mm, text: &str, border: bool, align: Align);

    /// Colour used by subsequent text
    fn set_text_colour(&mut self, colour: Colour);
}

/// Space kept between the edge of a cell and its text, as in FPDF (1mm)
const CELL_MARGIN: Mm = Mm(1.0);

/// Where the baseline sits inside a line cell, as a fraction of the font size
/// below the cell's vertical centre
const BASELINE_SHIFT: f32 = 0.3;

/// A [`Canvas`] that draws into an in-memory PDF [`Document`] using one
/// embedded font
pub struct PdfCanvas {
    document: Document,
    font: Id<Font>,
    font_size: Pt,
    text_colour: Colour,
    margins: Margins,
    current_page: Option<usize>,
    x: Mm,
    y: Mm,
}

impl PdfCanvas {
    /// Create an empty canvas whose text is set in `font` at `font_size`
    pub fn new(font: Font, font_size: Pt) -> PdfCanvas {
        let mut document = Document::default();
        let font = document.add_font(font);
        PdfCanvas {
            document,
            font,
            font_size,
            text_colour: colours::BLACK,
            margins: Margins::empty(),
            current_page: None,
            x: Mm(0.0),
            y: Mm(0.0),
        }
    }

    /// Margins applied to pages added after this call
    pub fn with_margins(mut self, margins: Margins) -> PdfCanvas {
        self.margins = margins;
        self
    }

    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    /// The cursor position, from the top-left of the current page
    pub fn cursor(&self) -> (Mm, Mm) {
        (self.x, self.y)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Encode the PDF and write it to `w`
    pub fn write<W: Write>(self, w: W) -> Result<(), PDFError> {
        self.document.write(w)
    }

    fn current_size(&self) -> PageSize {
        self.current_page
            .and_then(|index| self.document.page(index))
            .map(|page| (page.width(), page.height()))
            .unwrap_or(LETTER)
    }

    fn ensure_page(&mut self) -> usize {
        match self.current_page {
            Some(index) => index,
            None => {
                log::debug!("drawing before any page was added, starting one");
                self.add_page(LETTER);
                self.document.page_count() - 1
            }
        }
    }

    /// Lay out one text block. Returns the spans and the number of lines used.
    fn layout_block(
        &self,
        page_height: Pt,
        width: Mm,
        line_height: Mm,
        text: &str,
        align: Align,
    ) -> (Vec<SpanLayout>, usize) {
        let font = &self.document.fonts[self.font];
        let size = self.font_size;
        let cell_width: Pt = width.into();
        let padding: Pt = CELL_MARGIN.into();

        let lines = wrap_lines(text, cell_width - padding * 2.0, |s| font.text_width(s, size));
        let left: Pt = self.x.into();
        let shift: Mm = Mm::from(size) * BASELINE_SHIFT;

        let spans = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(i, line)| {
                let baseline = self.y + line_height * i as f32 + line_height / 2.0 + shift;
                let offset = align_offset(align, font.text_width(line, size), cell_width, padding);
                SpanLayout {
                    text: line.clone(),
                    font: SpanFont { id: self.font, size },
                    colour: self.text_colour,
                    coords: (left + offset, page_height - Pt::from(baseline)),
                }
            })
            .collect();

        (spans, lines.len())
    }
}

impl Canvas for PdfCanvas {
    fn page_width(&self) -> Mm {
        self.current_size().0.into()
    }

    fn page_height(&self) -> Mm {
        self.current_size().1.into()
    }

    fn add_page(&mut self, size: PageSize) {
        self.document.add_page(Page::new(size, Some(self.margins)));
        self.current_page = Some(self.document.page_count() - 1);
        self.x = self.margins.left.into();
        self.y = self.margins.top.into();
        log::trace!("started page {}", self.document.page_count());
    }

    fn set_x(&mut self, x: Mm) {
        self.x = x;
    }

    fn set_y(&mut self, y: Mm) {
        self.y = y;
    }

    fn multi_cell(&mut self, width: Mm, line_height: Mm, text: &str, border: bool, align: Align) {
        let index = self.ensure_page();
        let page_height = self.current_size().1;
        let (spans, line_count) = self.layout_block(page_height, width, line_height, text, align);
        let block_height = line_height * line_count as f32;

        let frame = border.then(|| FrameLayout {
            rect: Rect::from_origin(
                self.x.into(),
                page_height - Pt::from(self.y + block_height),
                width.into(),
                block_height.into(),
            ),
            colour: colours::LIGHT_GREY,
            line_width: Pt(0.5),
        });

        if let Some(page) = self.document.page_mut(index) {
            page.add_spans(spans);
            if let Some(frame) = frame {
                page.add_frame(frame);
            }
        }

        self.y += block_height;
        self.x = self.margins.left.into();
    }

    fn set_text_colour(&mut self, colour: Colour) {
        self.text_colour = colour;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageContents;

    /// Tests that need real glyph metrics use whichever common system font is
    /// installed, and are skipped when there is none.
    fn system_font() -> Option<Font> {
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/Library/Fonts/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
        .iter()
        .filter_map(|path| std::fs::read(path).ok())
        .find_map(|bytes| Font::load(bytes).ok())
    }

    #[test]
    fn page_size_defaults_to_letter() {
        let Some(font) = system_font() else {
            return;
        };
        let mut canvas = PdfCanvas::new(font, Pt(10.0));
        assert!((canvas.page_height().0 - 279.4).abs() < 1e-3);
        assert_eq!(canvas.page_count(), 0);

        canvas.add_page(crate::pagesize::A4);
        assert!((canvas.page_width().0 - 210.0).abs() < 1e-3);
    }

    #[test]
    fn multi_cell_advances_cursor_per_line() {
        let Some(font) = system_font() else {
            return;
        };
        let mut canvas =
            PdfCanvas::new(font, Pt(10.0)).with_margins(Margins::all(Mm(5.0)));
        canvas.add_page(LETTER);
        canvas.set_y(Mm(20.0));
        canvas.set_x(Mm(30.0));
        canvas.multi_cell(Mm(67.0), Mm(7.0), "Jane Doe\n123 Main St\nSpringfield", false, Align::Center);

        let (x, y) = canvas.cursor();
        assert!((x.0 - 5.0).abs() < 1e-3);
        assert!((y.0 - 41.0).abs() < 1e-3);

        let page = canvas.document().page(0).unwrap();
        let spans: Vec<_> = page.spans().collect();
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].text, "Jane Doe");
        // lines are stacked downwards and centred inside the cell
        assert!(spans[0].coords.1 > spans[1].coords.1);
        let cell_left: Pt = Mm(30.0).into();
        let cell_right: Pt = Mm(97.0).into();
        for span in spans {
            assert!(span.coords.0 > cell_left && span.coords.0 < cell_right);
        }
    }

    #[test]
    fn text_colour_applies_to_later_blocks() {
        let Some(font) = system_font() else {
            return;
        };
        let red = Colour::new_rgb_bytes(255, 0, 0);
        let mut canvas = PdfCanvas::new(font, Pt(10.0));
        canvas.multi_cell(Mm(50.0), Mm(5.0), "before", false, Align::Left);
        canvas.set_text_colour(red);
        canvas.multi_cell(Mm(50.0), Mm(5.0), "after", false, Align::Left);

        let page = canvas.document().page(0).unwrap();
        let fills: Vec<Colour> = page.spans().map(|s| s.colour).collect();
        assert_eq!(fills, vec![colours::BLACK, red]);
    }

    #[test]
    fn border_draws_one_frame() {
        let Some(font) = system_font() else {
            return;
        };
        let mut canvas = PdfCanvas::new(font, Pt(10.0));
        canvas.multi_cell(Mm(50.0), Mm(5.0), "a\nb", true, Align::Left);

        // the first draw started a page on its own
        assert_eq!(canvas.page_count(), 1);
        let page = canvas.document().page(0).unwrap();
        let frames = page
            .contents
            .iter()
            .filter(|c| matches!(c, PageContents::Frame(_)))
            .count();
        assert_eq!(frames, 1);

        let mut out = Vec::new();
        canvas.write(&mut out).unwrap();
        assert!(out.starts_with(b"%PDF-"));
    }
}
