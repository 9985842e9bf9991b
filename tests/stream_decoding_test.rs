//! Decoder and classifier working together over chunked bodies.

use bytes::Bytes;
use chatline::sse::{event_stream, EventRecord};
use chatline::traits::{ByteStream, HttpError};
use futures::{stream, StreamExt};

const BODY: &str = concat!(
    "event: message\n",
    "data: {\"conversation_id\":\"c1\"}\n\n",
    ": keep-alive\n",
    "data: {\"type\":\"text_delta\",\"text\":\"Grüße, \"}\r\n\r\n",
    "data: {broken\n",
    "data: {\"type\":\"text_delta\",\"text\":\"世界\"}\n",
    "data: {\"type\":\"status\",\"state\":\"thinking\"}\n",
    "data: {\"message_count\":2}"
);

fn body_from(chunks: Vec<Vec<u8>>) -> ByteStream {
    Box::pin(stream::iter(chunks.into_iter().map(|c| Ok(Bytes::from(c)))))
}

async fn records(chunks: Vec<Vec<u8>>) -> Vec<EventRecord> {
    event_stream(body_from(chunks)).collect().await
}

#[tokio::test]
async fn test_whole_body_records() {
    let records = records(vec![BODY.as_bytes().to_vec()]).await;

    assert_eq!(records.len(), 5);
    assert_eq!(
        records[0],
        EventRecord::Lifecycle {
            conversation_id: "c1".to_string()
        }
    );
    assert_eq!(
        records[1],
        EventRecord::ContentDelta {
            text: "Grüße, ".to_string()
        }
    );
    assert_eq!(
        records[2],
        EventRecord::ContentDelta {
            text: "世界".to_string()
        }
    );
    assert_eq!(records[3].kind(), "unrecognized");
    assert_eq!(records[4], EventRecord::Summary { message_count: 2 });
}

#[tokio::test]
async fn test_every_two_way_split_yields_same_records() {
    let bytes = BODY.as_bytes();
    let expected = records(vec![bytes.to_vec()]).await;

    for split in 0..=bytes.len() {
        let chunks = vec![bytes[..split].to_vec(), bytes[split..].to_vec()];
        assert_eq!(records(chunks).await, expected, "split at byte {}", split);
    }
}

#[tokio::test]
async fn test_single_byte_chunks_yield_same_records() {
    let bytes = BODY.as_bytes();
    let expected = records(vec![bytes.to_vec()]).await;
    let chunks = bytes.iter().map(|b| vec![*b]).collect();
    assert_eq!(records(chunks).await, expected);
}

#[tokio::test]
async fn test_transport_failure_is_final_record() {
    let body: ByteStream = Box::pin(stream::iter(vec![
        Ok(Bytes::from_static(
            b"data: {\"type\":\"text_delta\",\"text\":\"a\"}\ndata: {\"type\":\"text_",
        )),
        Err(HttpError::Timeout("read timed out".to_string())),
    ]));

    let records: Vec<EventRecord> = event_stream(body).collect().await;

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0],
        EventRecord::ContentDelta {
            text: "a".to_string()
        }
    );
    assert!(records[1].is_error());
}
