use avery_labels::layout::Align;
use avery_labels::pagesize::PageSize;
use avery_labels::{Canvas, Colour, Mm};

/// One call made against a [`RecordingCanvas`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AddPage(PageSize),
    SetX(Mm),
    SetY(Mm),
    MultiCell {
        width: Mm,
        line_height: Mm,
        text: String,
        border: bool,
        align: Align,
    },
    SetTextColour(Colour),
}

/// A label drawn on the canvas, with the cursor it was drawn at
#[derive(Debug, Clone, PartialEq)]
pub struct Drawn {
    pub page: usize,
    pub x: Mm,
    pub y: Mm,
    pub text: String,
}

/// A canvas that draws nothing and remembers every call, on a US Letter page
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub calls: Vec<Call>,
}

impl RecordingCanvas {
    pub fn new() -> RecordingCanvas {
        RecordingCanvas::default()
    }

    pub fn pages_added(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::AddPage(_)))
            .count()
    }

    /// Replay the calls to find where each text block was drawn
    pub fn drawn(&self) -> Vec<Drawn> {
        let mut drawn = Vec::new();
        let mut page = 0usize;
        let mut x = Mm(0.0);
        let mut y = Mm(0.0);
        for call in self.calls.iter() {
            match call {
                Call::AddPage(_) => page += 1,
                Call::SetX(v) => x = *v,
                Call::SetY(v) => y = *v,
                Call::MultiCell { text, .. } => drawn.push(Drawn {
                    page: page.saturating_sub(1),
                    x,
                    y,
                    text: text.clone(),
                }),
                Call::SetTextColour(_) => {}
            }
        }
        drawn
    }
}

impl Canvas for RecordingCanvas {
    fn page_width(&self) -> Mm {
        Mm(215.9)
    }

    fn page_height(&self) -> Mm {
        Mm(279.4)
    }

    fn add_page(&mut self, size: PageSize) {
        self.calls.push(Call::AddPage(size));
    }

    fn set_x(&mut self, x: Mm) {
        self.calls.push(Call::SetX(x));
    }

    fn set_y(&mut self, y: Mm) {
        self.calls.push(Call::SetY(y));
    }

    fn multi_cell(&mut self, width: Mm, line_height: Mm, text: &str, border: bool, align: Align) {
        self.calls.push(Call::MultiCell {
            width,
            line_height,
            text: text.to_string(),
            border,
            align,
        });
    }

    fn set_text_colour(&mut self, colour: Colour) {
        self.calls.push(Call::SetTextColour(colour));
    }
}

pub fn close(a: Mm, b: Mm) -> bool {
    (a.0 - b.0).abs() < 1e-3
}
