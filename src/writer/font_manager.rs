//! Font metrics and text encoding for PDF generation.
//!
//! Only the Base-14 Helvetica family is used. Glyph widths are the standard
//! AFM metrics indexed by WinAnsi code, in units of 1/1000 em. Text is
//! encoded to WinAnsi bytes before it is measured or written, so anything
//! outside that code page is rejected rather than silently mis-rendered.

use crate::error::{Error, Result};
use crate::layout::style::{FontSpec, FontWeight};

/// Unicode code points that WinAnsi maps into 0x80..=0x9F.
static WIN_ANSI_HIGH: phf::Map<char, u8> = phf::phf_map! {
    '€' => 0x80, '‚' => 0x82, 'ƒ' => 0x83, '„' => 0x84, '…' => 0x85, '†' => 0x86,
    '‡' => 0x87, 'ˆ' => 0x88, '‰' => 0x89, 'Š' => 0x8A, '‹' => 0x8B, 'Œ' => 0x8C,
    'Ž' => 0x8E, '‘' => 0x91, '’' => 0x92, '“' => 0x93, '”' => 0x94, '•' => 0x95,
    '–' => 0x96, '—' => 0x97, '˜' => 0x98, '™' => 0x99, 'š' => 0x9A, '›' => 0x9B,
    'œ' => 0x9C, 'ž' => 0x9E, 'Ÿ' => 0x9F,
};

/// Encode a single character in WinAnsi, if it has a code.
pub fn win_ansi_byte(ch: char) -> Option<u8> {
    match ch as u32 {
        0x00..=0x7F | 0xA0..=0xFF => Some(ch as u8),
        _ => WIN_ANSI_HIGH.get(&ch).copied(),
    }
}

/// A Base-14 font used by the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseFont {
    /// Helvetica
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
}

impl BaseFont {
    /// PostScript name written as `/BaseFont`.
    pub fn name(&self) -> &'static str {
        match self {
            BaseFont::Helvetica => "Helvetica",
            BaseFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Page resource name used with `Tf`.
    pub fn resource_id(&self) -> &'static str {
        match self {
            BaseFont::Helvetica => "F1",
            BaseFont::HelveticaBold => "F2",
        }
    }

    fn widths(&self) -> &'static [u16; 256] {
        match self {
            BaseFont::Helvetica => &HELVETICA_WIDTHS,
            BaseFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Width of a WinAnsi code in 1/1000 em.
    pub fn code_width(&self, code: u8) -> u16 {
        self.widths()[code as usize]
    }
}

/// Resolves font specs to base fonts and measures text.
#[derive(Debug, Clone, Default)]
pub struct FontManager;

impl FontManager {
    /// Create a font manager.
    pub fn new() -> Self {
        Self
    }

    /// Select the base font for a family / weight pair.
    ///
    /// # Errors
    ///
    /// [`Error::Layout`] for a family other than Helvetica.
    pub fn select_font(&self, spec: &FontSpec) -> Result<BaseFont> {
        match (spec.family, spec.weight) {
            ("Helvetica", FontWeight::Normal) => Ok(BaseFont::Helvetica),
            ("Helvetica", FontWeight::Bold) => Ok(BaseFont::HelveticaBold),
            (family, _) => Err(Error::Layout(format!("unsupported font family '{}'", family))),
        }
    }

    /// Encode text to WinAnsi bytes.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedCharacter`] for the first character with no WinAnsi code.
    pub fn encode(&self, text: &str, font: BaseFont) -> Result<Vec<u8>> {
        text.chars()
            .map(|ch| {
                win_ansi_byte(ch).ok_or_else(|| Error::UnsupportedCharacter {
                    ch,
                    font: font.name().to_string(),
                })
            })
            .collect()
    }

    /// Width of already-encoded text in points.
    pub fn encoded_width(&self, encoded: &[u8], font: BaseFont, font_size: f32) -> f32 {
        let units: u32 = encoded.iter().map(|&b| font.code_width(b) as u32).sum();
        units as f32 * font_size / 1000.0
    }

    /// Width of text in points.
    pub fn text_width(&self, text: &str, font: BaseFont, font_size: f32) -> Result<f32> {
        let encoded = self.encode(text, font)?;
        Ok(self.encoded_width(&encoded, font, font_size))
    }
}

/// Line breaking for wrapped paragraphs.
#[derive(Debug, Clone, Default)]
pub struct TextLayout {
    font_manager: FontManager,
}

impl TextLayout {
    /// Create a text layout helper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Break `text` into lines no wider than `max_width` points.
    ///
    /// Embedded `\n` always breaks. Lines break at spaces; a word that is
    /// wider than a whole line is split between characters. Every paragraph
    /// yields at least one (possibly empty) line.
    pub fn wrap_text(
        &self,
        text: &str,
        font: BaseFont,
        font_size: f32,
        max_width: f32,
    ) -> Result<Vec<String>> {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let space_width = self.font_manager.text_width(" ", font, font_size)?;
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current_line = String::new();
            let mut current_width = 0.0;

            for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
                let word_width = self.font_manager.text_width(word, font, font_size)?;

                if current_line.is_empty() && word_width <= max_width {
                    current_line = word.to_string();
                    current_width = word_width;
                } else if !current_line.is_empty() && current_width + space_width + word_width <= max_width {
                    current_line.push(' ');
                    current_line.push_str(word);
                    current_width += space_width + word_width;
                } else if word_width <= max_width {
                    lines.push(std::mem::take(&mut current_line));
                    current_line = word.to_string();
                    current_width = word_width;
                } else {
                    if !current_line.is_empty() {
                        lines.push(std::mem::take(&mut current_line));
                    }
                    let mut pieces = self.split_word(word, font, font_size, max_width)?;
                    let (last, last_width) = pieces.pop().unwrap_or_default();
                    lines.extend(pieces.into_iter().map(|(piece, _)| piece));
                    current_line = last;
                    current_width = last_width;
                }
            }

            lines.push(current_line);
        }

        Ok(lines)
    }

    /// Split one over-long word into pieces that fit, at least one char each.
    fn split_word(
        &self,
        word: &str,
        font: BaseFont,
        font_size: f32,
        max_width: f32,
    ) -> Result<Vec<(String, f32)>> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut piece_width = 0.0;

        for ch in word.chars() {
            let mut buf = [0u8; 4];
            let ch_width = self.font_manager.text_width(ch.encode_utf8(&mut buf), font, font_size)?;
            if !piece.is_empty() && piece_width + ch_width > max_width {
                pieces.push((std::mem::take(&mut piece), piece_width));
                piece_width = 0.0;
            }
            piece.push(ch);
            piece_width += ch_width;
        }
        pieces.push((piece, piece_width));

        Ok(pieces)
    }

    /// The font manager used for measurement.
    pub fn font_manager(&self) -> &FontManager {
        &self.font_manager
    }
}

const HELVETICA_WIDTHS: [u16; 256] = [
    278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278,
    278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278,
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 350,
    556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

const HELVETICA_BOLD_WIDTHS: [u16; 256] = [
    278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278,
    278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278, 278,
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 350,
    556, 350, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    350, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 350, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];
