use avery_labels::{
    Canvas, Colour, Font, Info, LabelError, LabelSheet, PDFError, PdfCanvas, Placement, Pt,
};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

/// Render a file of address labels onto Avery 5160 sheets as a PDF.
///
/// Labels are separated by blank lines. A label whose first line is
/// `@ROW,COL` is placed at that 0-based row and column; either side may be
/// `*` to place it automatically. Lines starting with `#` between labels are
/// ignored; inside a label they are kept as text.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Label file to read, or `-` for stdin
    input: PathBuf,

    /// TrueType or OpenType font to set the labels in
    #[arg(short, long)]
    font: PathBuf,

    /// Where to write the PDF
    #[arg(short, long, default_value = "labels.pdf")]
    output: PathBuf,

    /// Font size in points
    #[arg(long, default_value_t = 10.0)]
    font_size: f32,

    /// Document title stored in the PDF metadata
    #[arg(long)]
    title: Option<String>,

    /// Outline every label, for checking printer alignment
    #[arg(long)]
    outline: bool,

    /// Text colour as a hex RGB triplet, such as `1f3a93` or `#1f3a93`
    #[arg(long, value_parser = parse_colour)]
    colour: Option<Colour>,
}

fn parse_colour(hex: &str) -> Result<Colour, String> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
    };
    match (digits.len(), channel(0), channel(2), channel(4)) {
        (6, Some(r), Some(g), Some(b)) => Ok(Colour::new_rgb_bytes(r, g, b)),
        _ => Err(format!("`{hex}` is not a colour like 1f3a93")),
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Pdf(#[from] PDFError),

    #[error("line {line}: `{text}` is not a valid @ROW,COL position")]
    Position { line: usize, text: String },

    #[error("label starting on line {line}: {source}")]
    Label { line: usize, source: LabelError },

    #[error(transparent)]
    Build(#[from] LabelError),
}

/// One label read from the input file
#[derive(Debug, PartialEq)]
struct LabelSpec {
    /// 1-based line the label starts on, for error messages
    line: usize,
    row: Placement,
    col: Placement,
    text: String,
}

fn parse_index(part: &str) -> Option<Placement> {
    match part.trim() {
        "*" | "" => Some(Placement::Auto),
        n => n.parse().ok().map(Placement::At),
    }
}

fn parse_position(line: usize, text: &str) -> Result<(Placement, Placement), CliError> {
    let invalid = || CliError::Position {
        line,
        text: text.to_string(),
    };
    let (row, col) = text
        .strip_prefix('@')
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(invalid)?;
    let row = parse_index(row).ok_or_else(invalid)?;
    let col = parse_index(col).ok_or_else(invalid)?;
    Ok((row, col))
}

fn parse_labels(input: &str) -> Result<Vec<LabelSpec>, CliError> {
    let mut labels = Vec::new();
    let mut current: Option<LabelSpec> = None;

    for (i, raw) in input.lines().enumerate() {
        let line = i + 1;
        if current.is_none() && raw.trim_start().starts_with('#') {
            continue;
        }
        if raw.trim().is_empty() {
            labels.extend(current.take());
            continue;
        }

        match current.as_mut() {
            Some(label) => {
                if !label.text.is_empty() {
                    label.text.push('\n');
                }
                label.text.push_str(raw);
            }
            None if raw.starts_with('@') => {
                let (row, col) = parse_position(line, raw.trim())?;
                current = Some(LabelSpec {
                    line,
                    row,
                    col,
                    text: String::new(),
                });
            }
            None => {
                current = Some(LabelSpec {
                    line,
                    row: Placement::Auto,
                    col: Placement::Auto,
                    text: raw.to_string(),
                });
            }
        }
    }
    labels.extend(current);

    Ok(labels)
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let read = if path.as_os_str() == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input).map(|_| input)
    } else {
        std::fs::read_to_string(path)
    };
    read.map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn run(cli: Cli) -> Result<(), CliError> {
    let labels = parse_labels(&read_input(&cli.input)?)?;
    log::info!("read {} labels from {}", labels.len(), cli.input.display());

    let mut sheet = LabelSheet::new().with_outlines(cli.outline);
    for label in labels {
        sheet
            .add(&label.text, label.row, label.col)
            .map_err(|source| CliError::Label {
                line: label.line,
                source,
            })?;
    }

    let font_bytes = std::fs::read(&cli.font).map_err(|source| CliError::Read {
        path: cli.font.clone(),
        source,
    })?;
    let mut canvas = PdfCanvas::new(Font::load(font_bytes)?, Pt(cli.font_size));
    if let Some(title) = cli.title {
        canvas.set_info(Info::new().title(title));
    }
    if let Some(colour) = cli.colour {
        canvas.set_text_colour(colour);
    }

    sheet.build(&mut canvas)?;
    let pages = canvas.page_count();

    let out = std::fs::File::create(&cli.output).map_err(PDFError::from)?;
    canvas.write(std::io::BufWriter::new(out))?;
    log::info!("wrote {} pages to {}", pages, cli.output.display());

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_split_on_blank_lines() {
        let input = "Jane Doe\n123 Main St\n\n\n# skipped\nJohn Roe\n  Apt 4\n";
        let labels = parse_labels(input).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text, "Jane Doe\n123 Main St");
        assert_eq!(labels[1].line, 6);
        assert_eq!(labels[1].text, "John Roe\n  Apt 4");
    }

    #[test]
    fn pins_are_read_from_the_first_line() {
        let labels = parse_labels("@3,1\nPinned\n\n@*,2\nColumn only\n").unwrap();
        assert_eq!(labels[0].row, Placement::At(3));
        assert_eq!(labels[0].col, Placement::At(1));
        assert_eq!(labels[0].text, "Pinned");
        assert_eq!(labels[1].row, Placement::Auto);
        assert_eq!(labels[1].col, Placement::At(2));
    }

    #[test]
    fn hash_lines_inside_a_label_are_text() {
        let labels = parse_labels("# guests
Jane Doe
#12 Oak St
# Suite 4
Springfield
").unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].line, 2);
        assert_eq!(labels[0].text, "Jane Doe\n#12 Oak St\n# Suite 4\nSpringfield");
    }

    #[test]
    fn colours_parse_from_hex() {
        assert_eq!(parse_colour("#ff0000"), Ok(Colour::new_rgb_bytes(255, 0, 0)));
        assert_eq!(parse_colour("00ff00"), Ok(Colour::new_rgb_bytes(0, 255, 0)));
        assert!(parse_colour("red").is_err());
        assert!(parse_colour("#ff00").is_err());
        assert!(parse_colour("ff00001").is_err());
    }

    #[test]
    fn malformed_pin_reports_its_line() {
        let err = parse_labels("First\n\n@x,1\nSecond").unwrap_err();
        assert!(matches!(err, CliError::Position { line: 3, .. }));
    }

    #[test]
    fn a_pin_alone_is_an_empty_label() {
        let labels = parse_labels("@0,0\n").unwrap();
        let mut sheet = LabelSheet::new();
        let err = sheet
            .add(&labels[0].text, labels[0].row, labels[0].col)
            .unwrap_err();
        assert_eq!(err, LabelError::EmptyLabel);
    }
}
