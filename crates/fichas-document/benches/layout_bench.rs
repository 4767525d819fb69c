// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the page layout engine and full PDF export.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use fichas_core::{ClassifiedPairs, CleanRow, CleanRowSet, FieldPair, LayoutConfig};
use fichas_document::{PageImages, RecordingSurface, assemble, export_pdf, render_page};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const HEADERS: [&str; 8] = [
    "Nome completo",
    "Data de nascimento",
    "Endereço",
    "Cidade",
    "Telefone",
    "Moto",
    "Observações",
    "Contato de emergência",
];

fn value(header: &str, i: usize) -> String {
    match header {
        "Endereço" => format!("Rua das Palmeiras, {i}, apartamento 12, bloco C, Vila Mariana"),
        "Observações" => "Participa dos encontros regionais desde 2015 e ajuda na organização ".repeat(3),
        _ => format!("{header} {i}"),
    }
}

fn snapshot(rows: usize) -> CleanRowSet {
    CleanRowSet {
        headers: HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: (0..rows)
            .map(|i| CleanRow::new(HEADERS.iter().map(|h| (h.to_string(), value(h, i))).collect()))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Measure and render one page with wrapped values and an emergency section.
fn bench_render_page(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let pairs = ClassifiedPairs {
        ordinary: HEADERS[..7]
            .iter()
            .map(|h| FieldPair::new(*h, value(h, 1)))
            .collect(),
        emergency: vec![FieldPair::new(HEADERS[7], value(HEADERS[7], 1))],
    };

    c.bench_function("render_page (8 fields)", |b| {
        b.iter(|| black_box(render_page(black_box(&pairs), None, None, &config, 1)));
    });
}

/// Assemble 100 pages onto a recording surface: layout cost without PDF
/// serialisation.
fn bench_assemble(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let rows = snapshot(100);
    let images = PageImages::none();

    c.bench_function("assemble (100 rows, recording)", |b| {
        b.iter(|| {
            let mut surface = RecordingSurface::new();
            let pages = assemble(&mut surface, black_box(&rows), &images, &config);
            black_box(pages.map(|p| p.len()).unwrap_or_default());
        });
    });
}

/// Full export of 25 rows to PDF bytes.
fn bench_export(c: &mut Criterion) {
    let config = LayoutConfig::default();
    let rows = snapshot(25);
    let images = PageImages::none();

    c.bench_function("export_pdf (25 rows)", |b| {
        b.iter(|| black_box(export_pdf(black_box(&rows), &images, &config).map(|v| v.len())));
    });
}

criterion_group!(benches, bench_render_page, bench_assemble, bench_export);
criterion_main!(benches);
