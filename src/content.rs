//! Turns page contents into PDF content stream operators.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{FrameLayout, PageContents, SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::Write;

#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts)?,
            PageContents::Frame(frame) => render_frame(&mut content, frame)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        current_font.size
    )?;
    current_colour.write_fill(content)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            current_colour.write_fill(content)?;
        }

        let font = &fonts[current_font.id];
        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        for ch in span.text.chars().filter(|ch| !ch.is_control()) {
            write!(content, "{:04x}", font.glyph_id_or_fallback(ch))?;
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_frame(content: &mut Vec<u8>, frame: &FrameLayout) -> Result<(), std::io::Error> {
    let r = &frame.rect;
    write!(content, "q\n")?;
    frame.colour.write_stroke(content)?;
    write!(content, "{} w\n", frame.line_width)?;
    write!(content, "{} {} {} {} re\n", r.x1, r.y1, r.width(), r.height())?;
    write!(content, "S\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Rect;
    use crate::units::Pt;

    #[test]
    fn frame_is_stroked_rectangle() {
        let fonts = Arena::new();
        let contents = vec![PageContents::Frame(FrameLayout {
            rect: Rect::from_origin(Pt(10.0), Pt(20.0), Pt(30.0), Pt(40.0)),
            colour: crate::colours::BLACK,
            line_width: Pt(0.5),
        })];
        let rendered = render_contents(&contents, &fonts).unwrap();
        assert_eq!(
            String::from_utf8(rendered).unwrap(),
            "q\n0 G\n0.5 w\n10 20 30 40 re\nS\nQ\n"
        );
    }

    #[test]
    fn nothing_to_render() {
        let fonts = Arena::new();
        assert!(render_contents(&[], &fonts).unwrap().is_empty());
        assert!(render_contents(&[PageContents::Text(Vec::new())], &fonts)
            .unwrap()
            .is_empty());
    }
}
