use super::setup;
use crate::data::DataValue;
use crate::level::Level;
use crate::middleware::{completion, RequestParts, HEARTBEAT_MESSAGE};
use k9::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

async fn sleep(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn fixed_id() -> Arc<dyn crate::uniq_id::IdGenerator> {
    Arc::new(|| "req-1".to_string())
}

#[tokio::test(start_paused = true)]
async fn heartbeat_until_finished() {
    let (l, drain) = setup("api", Level::Trace);
    let tracker = l.track_request("api").id_generator(fixed_id());
    let request = RequestParts::new("GET", "/users");

    let (done, finished) = completion();
    let result = tracker.handle(&request, finished, || "next");
    assert_equal!(result, "next");

    sleep(3_100).await;
    done.finish();
    sleep(10_000).await;

    let output = drain.to_string();
    assert_equal!(output.matches("[ LABEL: req-1 STARTED TRACKING ]").count(), 1);
    assert_equal!(output.matches(HEARTBEAT_MESSAGE).count(), 1);
    assert_equal!(
        output
            .matches("[ LABEL: req-1 TIME FROM START: 00:02.0 ] request is still processing")
            .count(),
        1
    );
    assert_equal!(output.matches("[ LABEL: req-1 ENDED AFTER 00:03.100 ]").count(), 1);
    assert!(!l.is_timing("req-1"));

    // start and end lines carry the request context
    assert_equal!(
        output
            .matches("{ router: 'api', url: '/users', method: 'GET' }")
            .count(),
        2
    );
}

#[tokio::test(start_paused = true)]
async fn heartbeats_keep_coming_while_in_flight() {
    let (l, drain) = setup("api", Level::Trace);
    let tracker = l.track_request("slow").id_generator(fixed_id());
    let (done, finished) = completion();
    tracker.handle(&RequestParts::new("POST", "/upload"), finished, || ());

    sleep(7_000).await;
    assert_equal!(drain.to_string().matches(HEARTBEAT_MESSAGE).count(), 3);
    assert!(l.is_timing("req-1"));

    done.finish();
    sleep(10_000).await;
    let output = drain.to_string();
    assert_equal!(output.matches(HEARTBEAT_MESSAGE).count(), 3);
    assert_equal!(output.matches("ENDED AFTER 00:07.0").count(), 1);
}

#[tokio::test(start_paused = true)]
async fn dropped_response_still_ends_the_timer() {
    let (l, drain) = setup("api", Level::Trace);
    let tracker = l.track_request("api").id_generator(fixed_id());
    let (done, finished) = completion();
    tracker.handle(&RequestParts::new("GET", "/"), finished, || ());

    sleep(500).await;
    drop(done);
    sleep(10_000).await;

    let output = drain.to_string();
    assert_equal!(output.matches("ENDED AFTER 00:00.500").count(), 1);
    assert_equal!(output.matches(HEARTBEAT_MESSAGE).count(), 0);
    assert!(!l.is_timing("req-1"));
}

#[tokio::test(start_paused = true)]
async fn stalled_runtime_gets_one_late_heartbeat() {
    let (l, drain) = setup("api", Level::Trace);
    let tracker = l.track_request("api").id_generator(fixed_id());
    let (done, finished) = completion();
    tracker.handle(&RequestParts::new("GET", "/report"), finished, || ());

    // nothing gets polled while the clock jumps past three periods
    tokio::time::advance(Duration::from_millis(6_500)).await;
    sleep(50).await;
    let output = drain.to_string();
    assert_equal!(output.matches(HEARTBEAT_MESSAGE).count(), 1);
    assert_equal!(output.matches("TIME FROM START: 00:06.500 ]").count(), 1);

    // the regular cadence resumes from the late heartbeat
    sleep(2_000).await;
    let output = drain.to_string();
    assert_equal!(output.matches(HEARTBEAT_MESSAGE).count(), 2);
    assert_equal!(output.matches("TIME FROM START: 00:08.500 ]").count(), 1);

    done.finish();
    sleep(100).await;
    assert!(!l.is_timing("req-1"));
}

#[test]
fn runtime_shutdown_ends_the_timer() {
    let (l, drain) = setup("api", Level::Trace);
    let tracker = l.track_request("api").id_generator(fixed_id());
    let (done, finished) = completion();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    runtime.block_on(async {
        tracker.handle(&RequestParts::new("GET", "/"), finished, || ());
    });
    assert!(l.is_timing("req-1"));

    drop(runtime);
    assert!(!l.is_timing("req-1"));
    assert_equal!(drain.to_string().matches("[ LABEL: req-1 ENDED AFTER").count(), 1);
    drop(done);
}

#[tokio::test(start_paused = true)]
async fn next_runs_before_anything_is_awaited() {
    let (l, _drain) = setup("api", Level::Trace);
    let tracker = l.track_request("api");
    let calls = AtomicUsize::new(0);
    let (_done, finished) = completion();

    tracker.handle(&RequestParts::new("GET", "/"), finished, || {
        calls.fetch_add(1, Ordering::SeqCst);
    });
    assert_equal!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn tracked_headers_and_level() {
    let (l, drain) = setup("api", Level::Warn);
    let tracker = l
        .track_request("api")
        .headers(vec!["x-id"])
        .level(Level::Warn)
        .heartbeat_interval(Duration::from_millis(500))
        .id_generator(fixed_id());
    let request = RequestParts::new("GET", "/items")
        .with_header("x-id", "42")
        .with_header("other", "y");

    assert_equal!(
        tracker.context(&request).get("headers").cloned(),
        Some(DataValue::object(vec![("x-id", "42")]))
    );

    let (done, finished) = completion();
    tracker.handle(&request, finished, || ());
    sleep(1_200).await;
    done.finish();
    sleep(2_000).await;

    let output = drain.to_string();
    assert!(output.contains("headers: { 'x-id': '42' }"));
    assert!(!output.contains("other"));
    assert_equal!(output.matches(HEARTBEAT_MESSAGE).count(), 2);
    assert_equal!(output.matches("ENDED AFTER 00:01.200").count(), 1);
}

#[tokio::test(start_paused = true)]
async fn requests_below_the_threshold_are_timed_silently() {
    let (l, drain) = setup("api", Level::Warn);
    let tracker = l.track_request("api").id_generator(fixed_id());
    let (done, finished) = completion();
    tracker.handle(&RequestParts::new("GET", "/"), finished, || ());

    sleep(2_500).await;
    assert!(l.is_timing("req-1"));
    done.finish();
    sleep(100).await;

    assert!(!l.is_timing("req-1"));
    assert!(drain.is_empty());
}

#[tokio::test(start_paused = true)]
async fn concurrent_requests_get_their_own_timers() {
    let (l, drain) = setup("api", Level::Trace);
    let tracker = l.track_request("api");

    let (first_done, first) = completion();
    let (second_done, second) = completion();
    tracker.handle(&RequestParts::new("GET", "/a"), first, || ());
    tracker.handle(&RequestParts::new("GET", "/b"), second, || ());

    sleep(1_000).await;
    first_done.finish();
    sleep(1_000).await;
    second_done.finish();
    sleep(100).await;

    let output = drain.to_string();
    assert_equal!(output.matches("STARTED TRACKING").count(), 2);
    assert_equal!(output.matches("ENDED AFTER 00:01.0 ").count(), 1);
    assert_equal!(output.matches("ENDED AFTER 00:02.0 ").count(), 1);
}
