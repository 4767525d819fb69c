// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pair classifier — splits a clean row into ordinary and emergency-contact
// field groups.

use fichas_core::{ClassifiedPairs, CleanRow, FieldPair};

/// `true` for headers that belong under the emergency-contacts heading.
pub fn is_emergency_header(header: &str) -> bool {
    header.to_lowercase().contains("emerg")
}

/// Build the non-empty (header, value) pairs of `row` in `headers` order and
/// partition them. Values are trimmed; blank values are dropped so a page
/// never renders an empty line.
pub fn classify(row: &CleanRow, headers: &[String]) -> ClassifiedPairs {
    let mut pairs = ClassifiedPairs::default();

    for header in headers {
        let value = row.get(header).unwrap_or_default().trim();
        if value.is_empty() {
            continue;
        }
        let pair = FieldPair::new(header.clone(), value);
        if is_emergency_header(header) {
            pairs.emergency.push(pair);
        } else {
            pairs.ordinary.push(pair);
        }
    }

    pairs
}
