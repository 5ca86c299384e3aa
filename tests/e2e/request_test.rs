use crate::utils::test_drain::TestDrain;
use k9::*;
use std::sync::Arc;
use std::time::Duration;
use tlog::{completion, Config, Level, Logger, RequestParts};

fn setup() -> (Logger, TestDrain) {
    let test_drain = TestDrain::new();
    let l = Logger::with_config("gateway", Config::default().level(Level::Trace));
    l.set_drain(Arc::new(test_drain.clone()));
    (l, test_drain)
}

#[tokio::test(start_paused = true)]
async fn request_lifecycle() {
    let (l, test_drain) = setup();
    let track = l.track_request("api");
    let request = RequestParts::new("GET", "/orders");

    let (done, finished) = completion();
    let mut next_called = false;
    track.handle(&request, finished, || next_called = true);
    assert!(next_called);

    tokio::time::sleep(Duration::from_millis(3_100)).await;
    done.finish();
    tokio::time::sleep(Duration::from_millis(6_000)).await;

    let writes = test_drain.writes();
    assert_equal!(writes.len(), 3);
    assert!(writes[0].contains("STARTED TRACKING"));
    assert!(writes[1].contains("TIME FROM START: 00:02.0 ] request is still processing"));
    assert!(writes[2].contains("ENDED AFTER 00:03.100"));
}

#[tokio::test(start_paused = true)]
async fn tracked_headers_only() {
    let (l, test_drain) = setup();
    let track = l.track_request("api").headers(vec!["x-id"]);
    let request = RequestParts::new("GET", "/orders")
        .with_header("x-id", "42")
        .with_header("other", "y");

    let (done, finished) = completion();
    track.handle(&request, finished, || ());
    done.finish();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_equal!(test_drain.count_containing("headers: { 'x-id': '42' }"), 2);
    assert_equal!(test_drain.count_containing("'y'"), 0);
}
