#![allow(non_snake_case)]

use super::*;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing_subscriber::prelude::*;

type Captured = Arc<Mutex<Vec<(LogLevel, String, String)>>>;

fn leaked_sink(level: LogLevel) -> (&'static DiagnosticSink, Captured) {
    let captured: Captured = Arc::new(Mutex::new(Vec::new()));
    let sink: &'static DiagnosticSink = Box::leak(Box::new(DiagnosticSink::new()));
    sink.set_level(level);
    let store = Arc::clone(&captured);
    sink.set_callback(Some(Arc::new(
        move |level: LogLevel, target: &str, message: &str| {
            store
                .lock()
                .push((level, target.to_string(), message.to_string()));
        },
    )));
    (sink, captured)
}

#[test]
fn DiagnosticLayer___convert_level___maps_all_levels() {
    assert_eq!(DiagnosticLayer::convert_level(&Level::TRACE), LogLevel::Trace);
    assert_eq!(DiagnosticLayer::convert_level(&Level::DEBUG), LogLevel::Debug);
    assert_eq!(DiagnosticLayer::convert_level(&Level::INFO), LogLevel::Info);
    assert_eq!(DiagnosticLayer::convert_level(&Level::WARN), LogLevel::Warn);
    assert_eq!(DiagnosticLayer::convert_level(&Level::ERROR), LogLevel::Error);
}

#[test]
fn DiagnosticLayer___on_event___forwards_message_and_target() {
    let (sink, captured) = leaked_sink(LogLevel::Debug);
    let subscriber = tracing_subscriber::registry().with(DiagnosticLayer::with_sink(sink));

    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(target: "yunpack::resources", "Found extra default icon: {}", "b.png");
    });

    let captured = captured.lock();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].0, LogLevel::Warn);
    assert_eq!(captured[0].1, "yunpack::resources");
    assert_eq!(captured[0].2, "Found extra default icon: b.png");
}

#[test]
fn DiagnosticLayer___on_event___skips_levels_below_sink_threshold() {
    let (sink, captured) = leaked_sink(LogLevel::Info);
    let subscriber = tracing_subscriber::registry().with(DiagnosticLayer::with_sink(sink));

    tracing::subscriber::with_default(subscriber, || {
        tracing::debug!("copying file");
        tracing::info!("prepared");
    });

    let captured = captured.lock();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].2, "prepared");
}

#[test]
fn DiagnosticLayer___on_event___uses_first_field_without_message() {
    let (sink, captured) = leaked_sink(LogLevel::Trace);
    let subscriber = tracing_subscriber::registry().with(DiagnosticLayer::with_sink(sink));

    tracing::subscriber::with_default(subscriber, || {
        tracing::error!(path = "www/index.html");
    });

    let captured = captured.lock();
    assert_eq!(captured.len(), 1);
    assert!(captured[0].2.contains("www/index.html"));
}
