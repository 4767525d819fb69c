// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Header predicates. Headers come from hand-made form sheets, so matching is
// done on a normalized form: diacritics stripped, whitespace collapsed,
// lowercase.

use unicode_normalization::UnicodeNormalization;

/// Normalize a header for matching: `"  Data de\tNascimento "` becomes
/// `"data de nascimento"`, `"Carimbo de Data/Hora"` becomes
/// `"carimbo de data/hora"`.
pub fn normalize_header(header: &str) -> String {
    let folded: String = header.nfd().filter(|c| !is_combining_mark(*c)).collect();
    folded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// `true` for the form-submission timestamp column ("Carimbo de data/hora",
/// "Timestamp"), which is ingestion metadata and never rendered.
pub fn is_timestamp_header(header: &str) -> bool {
    let norm = normalize_header(header);
    norm.contains("timestamp")
        || (norm.contains("carimbo") && norm.contains("data") && norm.contains("hora"))
}

/// `true` for columns whose cells should go through date normalization.
pub fn is_date_header(header: &str) -> bool {
    let norm = normalize_header(header);
    norm.contains("data")
        || norm.contains("nascimento")
        || norm.contains("dt nasc")
        || norm == "dob"
}

/// Combining diacritical marks left over from decomposed input.
pub const fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |
        '\u{1AB0}'..='\u{1AFF}' |
        '\u{1DC0}'..='\u{1DFF}' |
        '\u{20D0}'..='\u{20FF}' |
        '\u{FE20}'..='\u{FE2F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_accents_and_spacing() {
        assert_eq!(normalize_header("  Data de\tNascimento "), "data de nascimento");
        assert_eq!(normalize_header("INSCRIÇÃO"), "inscricao");
        // Decomposed "é" (e + U+0301).
        assert_eq!(normalize_header("Endere\u{0301}co"), "endereco");
    }

    #[test]
    fn timestamp_headers_in_any_order() {
        assert!(is_timestamp_header("Carimbo de data/hora"));
        assert!(is_timestamp_header("CARIMBO DE DATA E HORA"));
        assert!(is_timestamp_header("Data e hora (carimbo)"));
        assert!(is_timestamp_header("Hora / Data carimbo"));
        assert!(is_timestamp_header("Timestamp"));
        assert!(!is_timestamp_header("Data de nascimento"));
        assert!(!is_timestamp_header(""));
    }

    #[test]
    fn letters_outside_latin_1_are_folded() {
        assert_eq!(normalize_header("Carimbo de data/hȯra"), "carimbo de data/hora");
        assert!(is_timestamp_header("Carimbo de data/hȯra"));
        assert_eq!(normalize_header("Ḋt Nasc"), "dt nasc");
        assert!(is_date_header("Ḋt Nasc"));
        assert_eq!(normalize_header("Ǫbservações"), "observacoes");
    }

    #[test]
    fn date_headers() {
        assert!(is_date_header("Data de Nascimento"));
        assert!(is_date_header("Nascimento"));
        assert!(is_date_header("Dt Nasc."));
        assert!(is_date_header("DOB"));
        assert!(is_date_header("Data de admissão"));
        assert!(!is_date_header("DOB do responsável"));
        assert!(!is_date_header("Nome"));
    }
}
