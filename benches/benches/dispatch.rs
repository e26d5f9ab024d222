// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Size};
use marginalia_dom::{Document, Layout, NodeId};
use marginalia_events::types::{Event, EventTarget, EventType};
use marginalia_popover::{Footnote, FootnoteNodes, Marginalia, Settings};

fn mounted(count: usize) -> (Document, Marginalia, Vec<NodeId>) {
    let mut doc = Document::new();
    doc.set_viewport(Size::new(1280.0, 800.0));
    let body = doc.body();
    let mut buttons = Vec::with_capacity(count);
    let footnotes = (0..count)
        .map(|i| {
            let nodes = FootnoteNodes::scaffold(&mut doc, body, &i.to_string()).unwrap();
            let y = 40.0 + (i % 30) as f64 * 25.0;
            doc.set_layout(
                nodes.button,
                Layout::from_rect(Rect::new(300.0, y, 312.0, y + 20.0)),
            );
            buttons.push(nodes.button);
            Footnote::new(nodes)
        })
        .collect();
    let settings = Settings::default().with_allow_multiple(true);
    let engine = Marginalia::mount(&doc, footnotes, settings);
    (doc, engine, buttons)
}

fn bench_scroll_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    for &n in &[16usize, 128] {
        group.throughput(Throughput::Elements(1000));
        group.bench_function(format!("scroll_burst_1000_footnotes{}", n), |b| {
            b.iter_batched(
                || {
                    let (mut doc, mut engine, buttons) = mounted(n);
                    for (i, button) in buttons.iter().enumerate().step_by(4) {
                        let at = Duration::from_millis(i as u64);
                        engine.dispatch(&mut doc, &mut Event::click(*button, at));
                    }
                    (doc, engine)
                },
                |(mut doc, mut engine)| {
                    for i in 0..1000_u64 {
                        let at = Duration::from_millis(1_000 + i * 2);
                        let mut e = Event::new(EventType::Scroll, EventTarget::Window, at);
                        engine.dispatch(&mut doc, &mut e);
                    }
                    black_box(engine.next_deadline());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.bench_function("click_toggle_n64", |b| {
        b.iter_batched(
            || mounted(64),
            |(mut doc, mut engine, buttons)| {
                for (i, button) in buttons.iter().enumerate() {
                    let at = Duration::from_millis(i as u64 * 50);
                    black_box(engine.dispatch(&mut doc, &mut Event::click(*button, at)));
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_scroll_burst, bench_toggle);
criterion_main!(benches);
