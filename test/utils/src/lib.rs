use serde_json::json;

/// One chunk of a streamed chat completion, as OpenAI sends it.
pub fn completion_chunk(content: Option<&str>, finish_reason: Option<&str>) -> String {
    let mut delta = json!({});
    if let Some(content) = content {
        delta = json!({ "role": "assistant", "content": content });
    }

    return json!({
        "id": "chatcmpl-123",
        "object": "chat.completion.chunk",
        "created": 1694268190,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "delta": delta,
            "finish_reason": finish_reason,
        }],
    })
    .to_string();
}

/// Wraps chunks into a server-sent event body terminated by `[DONE]`.
pub fn sse_body(chunks: &[String]) -> String {
    let mut body = chunks
        .iter()
        .map(|chunk| {
            return format!("data: {chunk}\n\n");
        })
        .collect::<Vec<String>>()
        .join("");

    body += "data: [DONE]\n\n";
    return body;
}

/// A non-streamed chat completion.
pub fn completion_body(content: &str) -> String {
    return json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop",
        }],
    })
    .to_string();
}
