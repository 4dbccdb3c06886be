use super::*;
use crate::test_helpers::signed_in_harness;
use serde_json::json;

#[tokio::test]
async fn chat_posts_message_and_decodes_source() {
    let h = signed_in_harness("t");
    h.backend.push_data(json!({ "answer": "Room 204.", "source": "knowledge" }));

    let reply = chat(&h.api, "where is the oscilloscope?").await.unwrap();

    assert_eq!(reply.answer, "Room 204.");
    assert_eq!(reply.source, AnswerSource::Knowledge);
    assert_eq!(h.backend.last_request().url, "http://lab.test/api/v1/ai/chat");
    assert_eq!(h.backend.last_body(), json!({ "message": "where is the oscilloscope?" }));
}

#[test]
fn unknown_sources_are_kept_verbatim() {
    let source: AnswerSource = serde_json::from_value(json!("cache")).unwrap();
    assert_eq!(source, AnswerSource::Other("cache".to_owned()));
    assert_eq!(serde_json::from_value::<AnswerSource>(json!("api")).unwrap(), AnswerSource::Api);
}
