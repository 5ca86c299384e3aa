use std::time::Duration;
use tlog::{completion, msg, DataValue, Logger, RequestParts};

#[tokio::main]
async fn main() {
    let l = Logger::new("demo");

    l.error("something broke");
    l.warn("disk is almost full");
    l.info(msg!["listening on", 8080]);
    l.log("a plain line");
    l.trace(msg![
        "config",
        DataValue::object(vec![("workers", 4), ("queue", 128)])
    ]);

    l.time("warmup", "info", "filling caches");
    tokio::time::sleep(Duration::from_millis(300)).await;
    l.time_log("warmup", "halfway there");
    tokio::time::sleep(Duration::from_millis(300)).await;
    l.time_end("warmup", ());

    let track = l.track_request("users").headers(vec!["x-request-id"]);
    let request = RequestParts::new("GET", "/users/7").with_header("x-request-id", "abc-123");
    let (done, finished) = completion();
    track.handle(&request, finished, || l.log("handler running"));

    tokio::time::sleep(Duration::from_millis(4500)).await;
    done.finish();
    tokio::time::sleep(Duration::from_millis(100)).await;
}
