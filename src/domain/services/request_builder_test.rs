use super::CompletionRequestBuilder;
use super::DEFAULT_MODEL;
use crate::domain::models::DecodingParams;
use crate::domain::models::Message;
use crate::domain::models::Session;

#[test]
fn it_maps_session_fields() {
    let params = DecodingParams {
        max_tokens: 512,
        temperature: 0.2,
        top_p: 0.9,
        stream: false,
    };
    let mut session = Session::new("gpt-4o", params, "You are helpful");
    session.conversation.append(Message::user("Hi"));

    let req = CompletionRequestBuilder::build(&session);

    assert_eq!(req.model, "gpt-4o");
    assert_eq!(
        req.messages,
        vec![Message::system("You are helpful"), Message::user("Hi")]
    );
    assert_eq!(req.max_tokens, 512);
    assert_eq!(req.temperature, 0.2);
    assert_eq!(req.top_p, 0.9);
    assert!(!req.stream);
}

#[test]
fn it_substitutes_defaults() {
    let params = DecodingParams {
        max_tokens: 0,
        ..DecodingParams::default()
    };
    let session = Session::new("  ", params, "sys");

    let req = CompletionRequestBuilder::build(&session);

    assert_eq!(req.model, DEFAULT_MODEL);
    assert_eq!(req.max_tokens, 4096);
    assert!(req.stream);
}

#[test]
fn it_serializes_the_wire_shape() -> anyhow::Result<()> {
    let params = DecodingParams {
        temperature: 0.5,
        ..DecodingParams::default()
    };
    let session = Session::new("gpt-4", params, "sys");
    let req = CompletionRequestBuilder::build(&session);

    let value = serde_json::to_value(&req)?;
    assert_eq!(
        value,
        serde_json::json!({
            "model": "gpt-4",
            "messages": [{"role": "system", "content": "sys"}],
            "temperature": 0.5,
            "max_tokens": 4096,
            "top_p": 1.0,
            "stream": true,
        })
    );

    return Ok(());
}
