//! PDF rendering for quiz results and study notes.
//!
//! Uses the PDF base-14 fonts, so text is folded to ASCII before it is drawn.

use crate::error::{Error, Result};
use crate::models::question::AnsweredQuestion;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const PT_TO_MM: f32 = 0.3528;
const BODY_SIZE: f32 = 11.0;
const HEADING_SIZE: f32 = 13.0;
const TITLE_SIZE: f32 = 18.0;
const BULLET_GLYPHS: [char; 4] = ['•', '-', '*', '–'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteLine {
    Heading(String),
    Bullet(String),
    Paragraph(String),
    Blank,
}

/// Heading if the line ends with `:` (or was a markdown `#` heading),
/// bullet if it starts with a bullet glyph, paragraph otherwise.
pub fn classify_line(line: &str) -> NoteLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return NoteLine::Blank;
    }

    let was_markdown_heading = trimmed.starts_with('#');
    let cleaned = trimmed.trim_start_matches('#').replace("**", "");
    let cleaned = cleaned.trim();

    if was_markdown_heading || cleaned.ends_with(':') {
        return NoteLine::Heading(cleaned.to_string());
    }
    if let Some(rest) = cleaned.strip_prefix(BULLET_GLYPHS) {
        return NoteLine::Bullet(rest.trim().to_string());
    }
    NoteLine::Paragraph(cleaned.to_string())
}

/// Greedy word wrap on character count; words longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: String = word.to_string();
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(max_chars).collect();
            word = word.chars().skip(max_chars).collect();
            lines.push(head);
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() { 0 } else { current.chars().count() + 1 };
        if needed + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// ASCII spelling of the Latin-1 letters, for the builtin Helvetica.
fn fold_latin(c: char) -> Option<&'static str> {
    let folded = match c {
        'À'..='Å' => "A",
        'Æ' => "AE",
        'Ç' => "C",
        'È'..='Ë' => "E",
        'Ì'..='Ï' => "I",
        'Ð' => "D",
        'Ñ' => "N",
        'Ò'..='Ö' | 'Ø' => "O",
        'Ù'..='Ü' => "U",
        'Ý' => "Y",
        'Þ' => "Th",
        'ß' => "ss",
        'à'..='å' => "a",
        'æ' => "ae",
        'ç' => "c",
        'è'..='ë' => "e",
        'ì'..='ï' => "i",
        'ð' => "d",
        'ñ' => "n",
        'ò'..='ö' | 'ø' => "o",
        'ù'..='ü' => "u",
        'ý' | 'ÿ' => "y",
        'þ' => "th",
        'Œ' => "OE",
        'œ' => "oe",
        'Š' => "S",
        'š' => "s",
        'Ž' => "Z",
        'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

fn to_pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' | '\u{2022}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' | '\t' => out.push(' '),
            c if c.is_ascii() => out.push(c),
            c => out.push_str(fold_latin(c).unwrap_or("?")),
        }
    }
    out
}

struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor: f32,
    pages: usize,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::Render(format!("{:?}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::Render(format!("{:?}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    fn line_height(size: f32) -> f32 {
        size * PT_TO_MM * 1.45
    }

    fn chars_per_line(size: f32, indent: f32) -> usize {
        // Helvetica averages roughly half an em per character.
        let usable = PAGE_WIDTH - 2.0 * MARGIN - indent;
        (usable / (size * PT_TO_MM * 0.5)) as usize
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor - height >= MARGIN {
            return;
        }
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    fn text(&mut self, text: &str, size: f32, bold: bool, indent: f32) {
        let text = to_pdf_text(text);
        let height = Self::line_height(size);
        for line in wrap_text(&text, Self::chars_per_line(size, indent)) {
            self.ensure_room(height);
            self.cursor -= height;
            let font = if bold { &self.bold } else { &self.regular };
            self.layer
                .use_text(line, size, Mm(MARGIN + indent), Mm(self.cursor), font);
        }
    }

    fn gap(&mut self, mm: f32) {
        self.cursor -= mm;
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| Error::Render(format!("{:?}", e)))
    }
}

pub fn render_results_pdf(answers: &[AnsweredQuestion], score: usize, total: usize) -> Result<Vec<u8>> {
    let mut pdf = PdfWriter::new("Quiz Results")?;
    pdf.text("Quiz Results", TITLE_SIZE, true, 0.0);
    pdf.gap(2.0);
    pdf.text(&format!("Score: {}/{}", score, total), HEADING_SIZE, true, 0.0);
    pdf.gap(6.0);

    for (i, ans) in answers.iter().enumerate() {
        pdf.text(&format!("Q{}: {}", i + 1, ans.question.question), BODY_SIZE, true, 0.0);
        for (letter, option) in ans.question.lettered_options() {
            let status = if option == ans.question.correct_answer {
                " (Correct Answer)"
            } else if Some(option) == ans.user_answer.as_deref() {
                " (Your Answer)"
            } else {
                ""
            };
            pdf.text(&format!("{}) {}{}", letter, option, status), BODY_SIZE, false, 5.0);
        }
        let verdict = if ans.is_correct { "correct" } else { "incorrect" };
        pdf.text(
            &format!("Your answer: {} ({})", ans.user_answer_label(), verdict),
            BODY_SIZE,
            false,
            5.0,
        );
        if let Some(explanation) = &ans.explanation {
            pdf.text(&format!("Explanation: {}", explanation), BODY_SIZE, false, 5.0);
        }
        pdf.gap(5.0);
    }

    pdf.finish()
}

pub fn render_notes_pdf(notes: &str) -> Result<Vec<u8>> {
    let mut pdf = PdfWriter::new("Study Notes")?;
    pdf.text("Study Notes", TITLE_SIZE, true, 0.0);
    pdf.gap(6.0);

    for line in notes.lines() {
        match classify_line(line) {
            NoteLine::Heading(text) => {
                pdf.gap(2.0);
                pdf.text(&text, HEADING_SIZE, true, 0.0);
            }
            NoteLine::Bullet(text) => pdf.text(&format!("- {}", text), BODY_SIZE, false, 5.0),
            NoteLine::Paragraph(text) => pdf.text(&text, BODY_SIZE, false, 0.0),
            NoteLine::Blank => pdf.gap(2.0),
        }
    }

    pdf.finish()
}
