// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text metrics for the PDF built-in Helvetica faces, and width-based word
// wrapping on top of them.
//
// Advance widths are the standard Adobe AFM values in 1/1000 em for the
// printable ASCII range. Accented Latin letters share their base letter's
// advance; anything else falls back to the average lowercase advance.

use unicode_normalization::UnicodeNormalization;

use super::FontWeight;

/// Advance used for characters outside the tables.
const FALLBACK_ADVANCE: u16 = 556;

/// Helvetica, code points 32..=126.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015,                                             // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // 'N'..'Z'
    278, 278, 278, 469, 556, 333,                                                   // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // 'n'..'z'
    334, 260, 334, 584,                                                             // '{'..'~'
];

/// Helvetica-Bold, code points 32..=126.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Advance of `c` in 1/1000 em.
fn advance(c: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    let c = base_char(c);
    match c as u32 {
        code @ 32..=126 => table[(code - 32) as usize],
        _ => FALLBACK_ADVANCE,
    }
}

/// First character of the canonical decomposition: `ã` becomes `a`.
fn base_char(c: char) -> char {
    std::iter::once(c).nfd().next().unwrap_or(c)
}

/// Rendered width of `text` in points at `size`.
pub fn text_width(text: &str, size: f32, weight: FontWeight) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(advance(c, weight))).sum();
    units as f32 * size / 1000.0
}

/// Wrap `text` so that no line is wider than `max_width` points.
///
/// Splits on existing newlines first, then word-wraps each paragraph. Words
/// wider than a line are broken between characters. Always returns at least
/// one line.
pub fn wrap_text(text: &str, max_width: f32, size: f32, weight: FontWeight) -> Vec<String> {
    let space = text_width(" ", size, weight);
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            result.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_width = 0.0_f32;

        for word in words {
            let word_width = text_width(word, size, weight);

            if word_width > max_width {
                // Flush any accumulated line, then force-break the word.
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                let mut chunk = String::new();
                let mut chunk_width = 0.0_f32;
                for c in word.chars() {
                    let w = f32::from(advance(c, weight)) * size / 1000.0;
                    if chunk_width + w > max_width && !chunk.is_empty() {
                        result.push(std::mem::take(&mut chunk));
                        chunk_width = 0.0;
                    }
                    chunk.push(c);
                    chunk_width += w;
                }
                current_line = chunk;
                current_width = chunk_width;
            } else if current_line.is_empty() {
                current_line.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_width += space + word_width;
            } else {
                result.push(std::mem::take(&mut current_line));
                current_line.push_str(word);
                current_width = word_width;
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_cover_printable_ascii() {
        assert_eq!(HELVETICA.len(), 95);
        assert_eq!(HELVETICA_BOLD.len(), 95);
        assert_eq!(advance('A', FontWeight::Regular), 667);
        assert_eq!(advance('A', FontWeight::Bold), 722);
        assert_eq!(advance('~', FontWeight::Regular), 584);
        assert_eq!(advance('i', FontWeight::Regular), 222);
    }

    #[test]
    fn accented_letters_measure_like_their_base() {
        assert_eq!(
            text_width("INSCRIÇÃO", 15.0, FontWeight::Bold),
            text_width("INSCRICAO", 15.0, FontWeight::Bold)
        );
    }

    #[test]
    fn letters_outside_latin_1_measure_like_their_base() {
        assert_eq!(advance('ȯ', FontWeight::Regular), advance('o', FontWeight::Regular));
        assert_eq!(advance('Ḋ', FontWeight::Bold), advance('D', FontWeight::Bold));
    }

    #[test]
    fn width_scales_with_size() {
        let w11 = text_width("Nome", 11.0, FontWeight::Regular);
        let w22 = text_width("Nome", 22.0, FontWeight::Regular);
        assert!((w22 - 2.0 * w11).abs() < 1e-4);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_text("Ana Souza", 200.0, 11.0, FontWeight::Regular);
        assert_eq!(lines, vec!["Ana Souza".to_string()]);
    }

    #[test]
    fn long_text_wraps_within_width() {
        let text = "Rua das Flores, 123, apartamento 45, bloco B, Jardim Paulista, São Paulo - SP";
        let lines = wrap_text(text, 120.0, 11.0, FontWeight::Regular);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 11.0, FontWeight::Regular) <= 120.0 + 1e-3);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn oversized_words_are_broken() {
        let word = "x".repeat(80);
        let lines = wrap_text(&word, 50.0, 11.0, FontWeight::Regular);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn explicit_newlines_start_new_lines() {
        let lines = wrap_text("linha um\nlinha dois", 500.0, 11.0, FontWeight::Regular);
        assert_eq!(lines, vec!["linha um".to_string(), "linha dois".to_string()]);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap_text("", 100.0, 11.0, FontWeight::Regular), vec![String::new()]);
    }
}
