// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use marginalia_dom::{Document, Layout};
use marginalia_layout::{Overlay, Position, Trigger, left_in_pixels, reposition};
use marginalia_popover::{Footnote, FootnoteNodes};

const VIEWPORT: Size = Size::new(1280.0, 800.0);

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_triggers(count: usize, seed: u64) -> Vec<Trigger> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * (VIEWPORT.width - 12.0);
            // Some triggers sit above or below the viewport, as they do mid-scroll.
            let y = rng.next_f64() * VIEWPORT.height * 1.5 - VIEWPORT.height * 0.25;
            Trigger {
                rect: Rect::new(x, y, x + 12.0, y + 20.0),
                margin_left: 2.0,
            }
        })
        .collect()
}

fn bench_reposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    let overlay = Overlay {
        height: 240.0,
        margin: 8.0,
    };
    for &n in &[64usize, 1024] {
        let triggers = gen_triggers(n, 0x5eed);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("reposition_n{}", n), |b| {
            b.iter(|| {
                let mut position = Position::Above;
                let mut flips = 0_usize;
                for t in &triggers {
                    let p = reposition(t, &overlay, VIEWPORT, position);
                    flips += usize::from(p.flip.is_some());
                    position = p.position;
                }
                black_box(flips);
            });
        });
        group.bench_function(format!("left_in_pixels_n{}", n), |b| {
            b.iter(|| {
                let sum: f64 = triggers
                    .iter()
                    .map(|t| left_in_pixels(t, 320.0, VIEWPORT.width))
                    .sum();
                black_box(sum);
            });
        });
    }
    group.finish();
}

fn page(count: usize) -> (Document, Vec<Footnote>) {
    let mut doc = Document::new();
    doc.set_viewport(VIEWPORT);
    let body = doc.body();
    let mut rng = Rng::new(7);
    let footnotes = (0..count)
        .map(|i| {
            let nodes = FootnoteNodes::scaffold(&mut doc, body, &i.to_string()).unwrap();
            let y = rng.next_f64() * VIEWPORT.height;
            doc.set_layout(
                nodes.button,
                Layout::from_rect(Rect::new(200.0, y, 212.0, y + 20.0)),
            );
            doc.set_layout(
                nodes.popover,
                Layout::from_rect(Rect::new(0.0, 0.0, 320.0, 240.0)),
            );
            let mut footnote = Footnote::new(nodes);
            footnote.activate(&mut doc, None).unwrap();
            footnote
        })
        .collect();
    doc.observe();
    (doc, footnotes)
}

fn bench_footnote_reposition(c: &mut Criterion) {
    let mut group = c.benchmark_group("footnote");
    for &n in &[16usize, 256] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("reposition_all_n{}", n), |b| {
            b.iter_batched(
                || page(n),
                |(mut doc, mut footnotes)| {
                    for f in &mut footnotes {
                        f.reposition(&mut doc);
                    }
                    black_box(doc.take_records().len());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reposition, bench_footnote_reposition);
criterion_main!(benches);
