//! Minimal deterministic PDF 1.4 writer.
//!
//! Text only, built-in Courier faces, uncompressed content streams. Objects are
//! always written in the same order and nothing depends on the clock.

use crate::receipts::{
    errors::RenderError,
    layout::{Emphasis, TextLine},
};

const PAGE_WIDTH: u32 = 595;
const PAGE_HEIGHT: u32 = 842;
const MARGIN_LEFT: u32 = 50;
const FIRST_BASELINE: u32 = 792;
const LEADING: u32 = 12;
const HEADING_LEADING: u32 = 20;
const BODY_SIZE: u32 = 9;
const HEADING_SIZE: u32 = 14;
const FOOTER_SIZE: u32 = 8;
const FOOTER_BASELINE: u32 = 30;
const FOOTER_LEFT: u32 = 262;

/// Lines printed on one page before continuing on the next.
pub(crate) const LINES_PER_PAGE: usize = 58;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const REGULAR_FONT_ID: usize = 3;
const BOLD_FONT_ID: usize = 4;
const FIRST_PAGE_ID: usize = 5;

/// Write `lines` as a complete PDF document.
///
/// Fails when a line holds a character the Courier faces cannot show.
pub(crate) fn write_document(lines: &[TextLine]) -> Result<Vec<u8>, RenderError> {
    let pages: Vec<&[TextLine]> = if lines.is_empty() {
        vec![lines]
    } else {
        lines.chunks(LINES_PER_PAGE).collect()
    };

    let page_count = pages.len();
    let page_id = |index: usize| FIRST_PAGE_ID + 2 * index;

    let kids = (0..page_count)
        .map(|index| format!("{} 0 R", page_id(index)))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects: Vec<Vec<u8>> = vec![
        format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>").into_bytes(),
        format!("<< /Type /Pages /Kids [{kids}] /Count {page_count} >>").into_bytes(),
        font_object("Courier"),
        font_object("Courier-Bold"),
    ];

    for (index, page_lines) in pages.iter().enumerate() {
        let content_id = page_id(index) + 1;

        objects.push(
            format!(
                "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                 /Resources << /Font << /F1 {REGULAR_FONT_ID} 0 R /F2 {BOLD_FONT_ID} 0 R >> >> \
                 /Contents {content_id} 0 R >>"
            )
            .into_bytes(),
        );

        objects.push(stream_object(&page_content(page_lines, index + 1, page_count)?));
    }

    Ok(assemble(&objects))
}

fn font_object(base_font: &str) -> Vec<u8> {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{base_font} /Encoding /WinAnsiEncoding >>"
    )
    .into_bytes()
}

fn stream_object(content: &[u8]) -> Vec<u8> {
    let mut object = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();

    object.extend_from_slice(content);
    object.extend_from_slice(b"\nendstream");

    object
}

fn page_content(
    lines: &[TextLine],
    page: usize,
    page_count: usize,
) -> Result<Vec<u8>, RenderError> {
    let mut content = Vec::new();
    let mut baseline = FIRST_BASELINE;

    for line in lines {
        let (font, size, leading) = match line.emphasis {
            Emphasis::Heading => ("F2", HEADING_SIZE, HEADING_LEADING),
            Emphasis::Bold => ("F2", BODY_SIZE, LEADING),
            Emphasis::Regular => ("F1", BODY_SIZE, LEADING),
        };

        if !line.text.is_empty() {
            show_text(&mut content, font, size, MARGIN_LEFT, baseline, &line.text)?;
        }

        baseline = baseline.saturating_sub(leading);
    }

    show_text(
        &mut content,
        "F1",
        FOOTER_SIZE,
        FOOTER_LEFT,
        FOOTER_BASELINE,
        &format!("Page {page} of {page_count}"),
    )?;

    Ok(content)
}

fn show_text(
    out: &mut Vec<u8>,
    font: &str,
    size: u32,
    x: u32,
    y: u32,
    text: &str,
) -> Result<(), RenderError> {
    out.extend_from_slice(format!("BT\n/{font} {size} Tf\n{x} {y} Td\n(").as_bytes());
    encode_text(out, text)?;
    out.extend_from_slice(b") Tj\nET\n");

    Ok(())
}

/// Append `text` as a WinAnsi literal string body.
fn encode_text(out: &mut Vec<u8>, text: &str) -> Result<(), RenderError> {
    for ch in text.chars() {
        let byte = win_ansi_byte(ch).ok_or(RenderError::UnsupportedCharacter(ch))?;

        if matches!(ch, '(' | ')' | '\\') {
            out.push(b'\\');
        }

        out.push(byte);
    }

    Ok(())
}

fn win_ansi_byte(ch: char) -> Option<u8> {
    match ch {
        ' '..='~' | '\u{A0}'..='\u{FF}' => u8::try_from(u32::from(ch)).ok(),
        _ => win_ansi_special(ch),
    }
}

fn win_ansi_special(ch: char) -> Option<u8> {
    let byte = match ch {
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => return None,
    };

    Some(byte)
}

/// Number, offset and cross-reference the objects, ids starting at 1.
fn assemble(objects: &[Vec<u8>]) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());

    for (index, body) in objects.iter().enumerate() {
        offsets.push(out.len());

        out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    let size = objects.len() + 1;

    out.extend_from_slice(format!("xref\n0 {size}\n0000000000 65535 f \n").as_bytes());

    for offset in offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }

    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {size} /Root {CATALOG_ID} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        )
        .as_bytes(),
    );

    out
}
