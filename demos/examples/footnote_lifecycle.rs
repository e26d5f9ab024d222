// Copyright 2025 the Marginalia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Footnote lifecycle.
//!
//! Drives a single footnote controller by hand through
//! activate → ready → dismiss → remove → activate, printing the button and
//! popover state after each step.
//!
//! Run:
//! - `cargo run -p marginalia_demos --example footnote_lifecycle`

use kurbo::{Rect, Size};
use marginalia_dom::{Document, Layout, NodeId};
use marginalia_popover::{Footnote, FootnoteNodes};

fn show(step: &str, doc: &Document, footnote: &Footnote) {
    let n = footnote.nodes();
    println!(
        "  {:<12} active={:<5} ready={:<5} attached={:<5} button={:?} popover={:?}",
        step,
        footnote.is_active(doc),
        footnote.is_ready(doc),
        doc.is_connected(n.popover),
        doc.classes(n.button),
        doc.classes(n.popover),
    );
}

fn main() {
    let mut doc = Document::new();
    doc.set_viewport(Size::new(800.0, 600.0));
    let body = doc.body();
    doc.update_layout(body, |l| l.client_width = 760.0);

    let nodes = FootnoteNodes::scaffold(&mut doc, body, "1").unwrap();
    doc.set_layout(nodes.button, Layout::from_rect(Rect::new(200.0, 420.0, 212.0, 440.0)));
    doc.set_layout(nodes.popover, Layout::from_rect(Rect::new(0.0, 0.0, 320.0, 200.0)));
    let mut footnote = Footnote::new(nodes.clone());

    println!("== Footnote {} ==", footnote.id());
    show("initial", &doc, &footnote);

    let mut on_activate = |_: &mut Document, popover: NodeId, button: NodeId| {
        println!("  (activated: popover {popover:?} after button {button:?})");
    };
    footnote.activate(&mut doc, Some(&mut on_activate)).unwrap();
    footnote.reposition(&mut doc);
    footnote.resize(&mut doc);
    show("activate", &doc, &footnote);
    println!("  placed {:?}", footnote.position());

    footnote.ready(&mut doc);
    show("ready", &doc, &footnote);

    footnote.dismiss(&mut doc, None);
    show("dismiss", &doc, &footnote);

    footnote.remove(&mut doc);
    show("remove", &doc, &footnote);
    assert!(footnote.is_ready(&doc) && !doc.is_connected(nodes.popover));

    footnote.activate(&mut doc, None).unwrap();
    show("reactivate", &doc, &footnote);
    assert_eq!(doc.next_sibling(nodes.button), Some(nodes.popover), "same popover reinserted");

    footnote.destroy(&mut doc);
    assert!(!doc.is_connected(nodes.host));
    println!("  destroyed");
}
