use asl_stream::Pipeline;
use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use bytes::{Bytes, BytesMut};
use futures_util::stream;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

pub const BOUNDARY: &str = "frame";

// how often the stream checks for a new frame
const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// One multipart part carrying a JPEG.
pub fn part(jpeg: &[u8]) -> Bytes {
    let header = format!("--{BOUNDARY}\r\nContent-Type: image/jpeg\r\n\r\n");
    let mut part = BytesMut::with_capacity(header.len() + jpeg.len() + 2);
    part.extend_from_slice(header.as_bytes());
    part.extend_from_slice(jpeg);
    part.extend_from_slice(b"\r\n");
    part.freeze()
}

struct Cursor {
    pipeline: Arc<Pipeline>,
    last: Option<Bytes>,
}

/// Endless `multipart/x-mixed-replace` stream of published frames. Each
/// frame is sent once; the stream idles while nothing new is published.
pub fn stream_response(pipeline: Arc<Pipeline>) -> Response {
    let frames = stream::unfold(Cursor { pipeline, last: None }, |mut cursor| async move {
        loop {
            if let Some(frame) = cursor.pipeline.latest_frame() {
                let is_new = cursor
                    .last
                    .as_ref()
                    .is_none_or(|last| last.as_ptr() != frame.as_ptr());
                if is_new {
                    let chunk = part(&frame);
                    cursor.last = Some(frame);
                    return Some((Ok::<_, Infallible>(chunk), cursor));
                }
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    });

    (
        [(
            header::CONTENT_TYPE,
            format!("multipart/x-mixed-replace; boundary={BOUNDARY}"),
        )],
        Body::from_stream(frames),
    )
        .into_response()
}
