use super::FinishReason;
use super::StreamFragment;

impl StreamFragment {
    pub fn delta(text: &str) -> StreamFragment {
        return StreamFragment {
            delta_text: Some(text.to_string()),
            finish_reason: None,
        };
    }

    pub fn stop() -> StreamFragment {
        return StreamFragment {
            delta_text: None,
            finish_reason: Some(FinishReason::Stop),
        };
    }
}

#[test]
fn it_only_stops_on_stop() {
    assert!(StreamFragment::stop().is_stop());
    assert!(!StreamFragment::delta("Hi").is_stop());

    let length = StreamFragment {
        delta_text: None,
        finish_reason: Some(FinishReason::Length),
    };
    assert!(!length.is_stop());
}

#[test]
fn it_deserializes_unknown_finish_reasons() {
    let reason: FinishReason = serde_json::from_str(r#""something_new""#).unwrap();
    assert_eq!(reason, FinishReason::Other);
}
