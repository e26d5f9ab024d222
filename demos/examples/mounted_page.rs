// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A mounted page.
//!
//! Mounts three footnotes, loads settings from JSON, then replays a short
//! session of clicks, hovers, scrolls, and an Escape press through the event
//! layer. Set `RUST_LOG=marginalia_popover=debug` to see lifecycle logs.
//!
//! Run:
//! - `cargo run -p marginalia_demos --example mounted_page`

use std::time::Duration;

use kurbo::{Rect, Size};
use marginalia_dom::{Document, Layout};
use marginalia_events::types::{Event, EventTarget, EventType};
use marginalia_popover::{Footnote, FootnoteNodes, Marginalia, Settings};
use tracing_subscriber::EnvFilter;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let settings: Settings =
        serde_json::from_str(r#"{ "activate_on_hover": true, "hover_delay": 150 }"#).unwrap();
    println!("settings: {settings:?}");

    let mut doc = Document::new();
    doc.set_viewport(Size::new(1024.0, 768.0));
    let body = doc.body();
    let paragraph = doc.create_element("p");
    doc.append_child(body, paragraph).unwrap();

    let mut all = Vec::new();
    for (i, id) in ["1", "2", "3"].into_iter().enumerate() {
        let nodes = FootnoteNodes::scaffold(&mut doc, paragraph, id).unwrap();
        let y = 120.0 + 260.0 * i as f64;
        doc.set_layout(nodes.button, Layout::from_rect(Rect::new(300.0, y, 312.0, y + 20.0)));
        doc.set_layout(nodes.popover, Layout::from_rect(Rect::new(0.0, 0.0, 360.0, 180.0)));
        all.push(nodes);
    }
    let footnotes = all.iter().cloned().map(Footnote::new).collect();
    let mut engine = Marginalia::mount(&doc, footnotes, settings);
    let active = |engine: &Marginalia, doc: &Document| -> Vec<&'static str> {
        ["1", "2", "3"]
            .into_iter()
            .filter(|id| engine.is_active(doc, id))
            .collect()
    };

    engine.dispatch(&mut doc, &mut Event::click(all[0].button, ms(0)));
    println!("click 1         -> active {:?}", active(&engine, &doc));
    assert_eq!(active(&engine, &doc), ["1"]);

    let mut over = Event::new(EventType::MouseOver, EventTarget::Node(all[2].button), ms(40));
    engine.dispatch(&mut doc, &mut over);
    println!("hover 3         -> active {:?}", active(&engine, &doc));
    assert_eq!(active(&engine, &doc), ["3"], "hover activation closes the others");

    // A scroll burst: one leading reposition, one trailing after the frame.
    for t in 0..8_u32 {
        let y = 640.0 - 40.0 * f64::from(t);
        doc.update_layout(all[2].button, |l| l.rect = l.rect.with_origin((300.0, y)));
        let mut scroll = Event::new(EventType::Scroll, EventTarget::Window, ms(60 + u64::from(t) * 2));
        engine.dispatch(&mut doc, &mut scroll);
    }
    if let Some(due) = engine.next_deadline() {
        engine.advance(&mut doc, due);
    }
    println!(
        "scroll burst    -> footnote 3 placed {:?}",
        engine.use_cases().footnote("3").map(Footnote::position)
    );

    engine.dispatch(&mut doc, &mut Event::key_up("Escape", 27, ms(300)));
    engine.advance(&mut doc, ms(500));
    println!("escape          -> active {:?}", active(&engine, &doc));
    assert!(active(&engine, &doc).is_empty());
    assert!(all.iter().all(|n| !doc.is_connected(n.popover)));

    engine.unmount(&mut doc);
    assert!(all.iter().all(|n| !doc.is_connected(n.host)));
    println!("unmounted");
}
