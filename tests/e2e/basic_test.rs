use crate::utils::test_drain::TestDrain;
use k9::*;
use std::sync::Arc;
use tlog::{msg, Config, DataValue, Level, Logger, SharedValue, Style, StyleChain, TimestampFormat};

fn setup(level: Level) -> (Logger, TestDrain) {
    let test_drain = TestDrain::new();
    let l = Logger::with_config("payments", Config::default().level(level));
    l.set_drain(Arc::new(test_drain.clone()));
    (l, test_drain)
}

#[test]
fn one_line_per_allowed_call() {
    for threshold in Level::ALL.iter().copied() {
        let (l, test_drain) = setup(threshold);
        for level in Level::ALL.iter().copied() {
            test_drain.clear();
            l.at(level, "charged");
            let writes = test_drain.writes();
            if level.rank() > threshold.rank() {
                assert!(writes.is_empty());
            } else {
                assert_equal!(writes.len(), 1);
                let line = &writes[0];
                assert_matches_regex!(line.as_str(), r"^\[TIMESTAMP: .+\] \[PAYMENTS\] charged\n$");
                assert_equal!(line.matches('\n').count(), 1);
            }
        }
    }
}

#[test]
fn warn_threshold() {
    let (l, test_drain) = setup(Level::Warn);
    l.info("hello");
    assert!(test_drain.writes().is_empty());

    l.warn("hello");
    assert_equal!(test_drain.count_containing("hello"), 1);
}

#[test]
fn styles_are_applied_with_the_first_code_only() {
    let test_drain = TestDrain {
        strip_ansi: false,
        ..TestDrain::new()
    };
    let l = Logger::with_config(
        "payments",
        Config::default()
            .level(Level::Error)
            .timestamp_format(TimestampFormat::Redacted),
    );
    l.set_drain(Arc::new(test_drain.clone()));

    l.error("declined");
    let expected = StyleChain::new()
        .with(Style::Red)
        .apply("[TIMESTAMP: <REDACTED>] [PAYMENTS] declined\n");
    assert_equal!(test_drain.writes(), vec![expected]);
}

#[test]
fn chains_compose_first_wins() {
    let chained = StyleChain::from_path("green.bold.underline").apply("x");
    let only_green = StyleChain::new().with(Style::Green).apply("x");
    assert_equal!(chained, only_green);

    let cleared = StyleChain::new().clear();
    assert!(cleared.is_empty());
}

#[test]
fn timers_end_once() {
    let (l, test_drain) = setup(Level::Trace);
    l.time("t", "info", ());
    l.time_end("t", ());
    l.time_log("t", "ignored");
    l.time_end("t", "ignored");

    assert_equal!(test_drain.writes().len(), 2);
    assert_equal!(test_drain.count_containing("STARTED TRACKING"), 1);
    assert_equal!(test_drain.count_containing("ENDED AFTER"), 1);
    assert_equal!(test_drain.count_containing("ignored"), 0);
}

#[test]
fn self_referencing_parts() {
    let (l, test_drain) = setup(Level::Trace);
    let node = SharedValue::new(DataValue::object(vec![("id", 1)]));
    node.insert("parent", node.clone());
    l.log(msg!["graph", node.clone()]);
    node.set(DataValue::None);

    assert_equal!(test_drain.count_containing("{ id: 1, parent: [Circular] }"), 1);
}

#[test]
fn json_parts() {
    let (l, test_drain) = setup(Level::Trace);
    l.info(msg![
        "payload",
        DataValue::from(serde_json::json!({ "amount": 12.5, "currency": "EUR" }))
    ]);
    assert_equal!(
        test_drain.count_containing("\n{ amount: 12.5, currency: 'EUR' }\n"),
        1
    );
}
