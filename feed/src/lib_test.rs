use super::*;

fn message(n: usize) -> ChatMessage {
    ChatMessage {
        id: n.to_string(),
        author: format!("author-{n}"),
        content: format!("message {n}"),
        language: "en".to_owned(),
    }
}

// =============================================================
// decode_message
// =============================================================

#[test]
fn decode_message_parses_all_four_fields() {
    let msg = decode_message(r#"{"id":"1","author":"a","content":"hi","language":"en"}"#).expect("decode");
    assert_eq!(
        msg,
        ChatMessage { id: "1".to_owned(), author: "a".to_owned(), content: "hi".to_owned(), language: "en".to_owned() }
    );
}

#[test]
fn decode_message_ignores_unknown_fields() {
    let msg = decode_message(r#"{"id":"9","author":"b","content":"yo","language":"ru","ts":123}"#).expect("decode");
    assert_eq!(msg.id, "9");
    assert_eq!(msg.language, "ru");
}

#[test]
fn decode_message_rejects_invalid_json() {
    let err = decode_message("not json").expect_err("should fail");
    assert!(matches!(err, DecodeError::Json(_)));
}

#[test]
fn decode_message_rejects_missing_field() {
    let err = decode_message(r#"{"id":"1","author":"a","content":"hi"}"#).expect_err("should fail");
    assert!(err.to_string().contains("language"));
}

#[test]
fn decode_message_rejects_non_string_field() {
    assert!(decode_message(r#"{"id":1,"author":"a","content":"hi","language":"en"}"#).is_err());
}

#[test]
fn decode_message_rejects_non_object_json() {
    assert!(decode_message("[]").is_err());
    assert!(decode_message("\"hello\"").is_err());
    assert!(decode_message("null").is_err());
}

// =============================================================
// ConnectionState
// =============================================================

#[test]
fn connection_state_default_is_disconnected() {
    assert_eq!(ConnectionState::default(), ConnectionState::Disconnected);
    assert!(!ConnectionState::default().is_connected());
    assert!(ConnectionState::Connected.is_connected());
}

// =============================================================
// MessageBuffer
// =============================================================

#[test]
fn buffer_default_capacity_is_fifty() {
    let buffer = MessageBuffer::default();
    assert_eq!(buffer.capacity(), 50);
    assert!(buffer.is_empty());
}

#[test]
fn buffer_push_below_capacity_evicts_nothing() {
    let mut buffer = MessageBuffer::new();
    assert!(buffer.push(message(1)).is_none());
    assert!(buffer.push(message(2)).is_none());
    assert_eq!(buffer.len(), 2);
    assert_eq!(buffer.latest().map(|m| m.id.as_str()), Some("2"));
}

#[test]
fn buffer_fifty_first_message_evicts_the_first() {
    let mut buffer = MessageBuffer::new();
    for n in 1..=50 {
        assert!(buffer.push(message(n)).is_none());
    }
    let evicted = buffer.push(message(51)).expect("oldest should be evicted");
    assert_eq!(evicted.id, "1");
    assert_eq!(buffer.len(), 50);

    let ids: Vec<usize> = buffer.iter().map(|m| m.id.parse().expect("numeric id")).collect();
    assert_eq!(ids, (2..=51).collect::<Vec<_>>());
}

#[test]
fn buffer_retains_last_fifty_in_arrival_order_for_long_runs() {
    for total in [51, 75, 100, 237] {
        let mut buffer = MessageBuffer::new();
        for n in 0..total {
            buffer.push(message(n));
            assert!(buffer.len() <= BUFFER_CAPACITY);
        }
        let ids: Vec<usize> = buffer.iter().map(|m| m.id.parse().expect("numeric id")).collect();
        assert_eq!(ids, (total - 50..total).collect::<Vec<_>>(), "total={total}");
    }
}

#[test]
fn buffer_keeps_duplicate_ids() {
    let mut buffer = MessageBuffer::new();
    buffer.push(message(7));
    buffer.push(message(7));
    assert_eq!(buffer.len(), 2);
}

#[test]
fn buffer_zero_capacity_is_clamped_to_one() {
    let mut buffer = MessageBuffer::with_capacity(0);
    assert_eq!(buffer.capacity(), 1);
    buffer.push(message(1));
    let evicted = buffer.push(message(2));
    assert_eq!(evicted.map(|m| m.id), Some("1".to_owned()));
    assert_eq!(buffer.to_vec(), vec![message(2)]);
}

#[test]
fn buffer_ref_into_iter_matches_iter() {
    let mut buffer = MessageBuffer::with_capacity(3);
    for n in 0..5 {
        buffer.push(message(n));
    }
    let via_for: Vec<&str> = (&buffer).into_iter().map(|m| m.id.as_str()).collect();
    assert_eq!(via_for, vec!["2", "3", "4"]);
}
