use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::anyhow;
use anyhow::Result;
use futures::stream;
use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use super::StreamAccumulator;
use crate::domain::models::ChatError;
use crate::domain::models::FinishReason;
use crate::domain::models::StopReason;
use crate::domain::models::StreamFragment;

fn counted(
    fragments: Vec<Result<StreamFragment>>,
    pulls: Arc<AtomicUsize>,
) -> impl futures::Stream<Item = Result<StreamFragment>> + Unpin {
    return stream::iter(fragments).inspect(move |_| {
        pulls.fetch_add(1, Ordering::SeqCst);
    });
}

#[tokio::test]
async fn it_halts_on_stop_without_reading_further() -> Result<()> {
    let pulls = Arc::new(AtomicUsize::new(0));
    let fragments = vec![
        Ok(StreamFragment::delta("Hel")),
        Ok(StreamFragment::delta("lo")),
        Ok(StreamFragment::stop()),
        Ok(StreamFragment::delta(" never")),
        Err(anyhow!("never read")),
    ];

    let res = StreamAccumulator::accumulate(
        counted(fragments, pulls.clone()),
        &CancellationToken::new(),
        |_| {},
    )
    .await?;

    assert_eq!(res.text, "Hello");
    assert_eq!(res.stop_reason, StopReason::NaturalStop);
    assert_eq!(res.fragments_applied, 2);
    assert_eq!(pulls.load(Ordering::SeqCst), 3);

    return Ok(());
}

#[tokio::test]
async fn it_exposes_prefix_monotonic_partials() -> Result<()> {
    let fragments = vec![
        Ok(StreamFragment::delta("a")),
        Ok(StreamFragment::default()),
        Ok(StreamFragment::delta("bc")),
        Ok(StreamFragment::delta("d")),
    ];

    let mut partials: Vec<String> = vec![];
    let res = StreamAccumulator::accumulate(
        stream::iter(fragments),
        &CancellationToken::new(),
        |text| partials.push(text.to_string()),
    )
    .await?;

    assert_eq!(
        partials,
        vec![
            "a".to_string(),
            "a".to_string(),
            "abc".to_string(),
            "abcd".to_string()
        ]
    );
    assert_eq!(res.text, "abcd");
    assert_eq!(res.stop_reason, StopReason::NaturalStop);

    return Ok(());
}

#[tokio::test]
async fn it_applies_text_on_non_stop_finish_reasons() -> Result<()> {
    let fragments = vec![
        Ok(StreamFragment::delta("cut")),
        Ok(StreamFragment {
            delta_text: Some(" off".to_string()),
            finish_reason: Some(FinishReason::Length),
        }),
    ];

    let res =
        StreamAccumulator::accumulate(stream::iter(fragments), &CancellationToken::new(), |_| {})
            .await?;

    assert_eq!(res.text, "cut off");
    assert_eq!(res.fragments_applied, 2);

    return Ok(());
}

#[tokio::test]
async fn it_stops_before_the_fragment_after_cancellation() -> Result<()> {
    let cancel = CancellationToken::new();
    let pulls = Arc::new(AtomicUsize::new(0));
    let fragments = vec![
        Ok(StreamFragment::delta("one ")),
        Ok(StreamFragment::delta("two ")),
        Ok(StreamFragment::delta("three")),
    ];

    let res = StreamAccumulator::accumulate(counted(fragments, pulls.clone()), &cancel, |text| {
        if text == "one two " {
            cancel.cancel();
        }
    })
    .await?;

    assert_eq!(res.text, "one two ");
    assert_eq!(res.stop_reason, StopReason::Cancelled);
    assert_eq!(pulls.load(Ordering::SeqCst), 2);

    return Ok(());
}

#[tokio::test]
async fn it_drops_a_fragment_pulled_after_cancellation() -> Result<()> {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let fragments = stream::iter(vec![
        Ok(StreamFragment::delta("kept")),
        Ok(StreamFragment::delta(" dropped")),
    ])
    .enumerate()
    .map(move |(idx, fragment)| {
        if idx == 1 {
            trigger.cancel();
        }
        return fragment;
    });

    let res = StreamAccumulator::accumulate(fragments, &cancel, |_| {}).await?;

    assert_eq!(res.text, "kept");
    assert_eq!(res.stop_reason, StopReason::Cancelled);

    return Ok(());
}

#[tokio::test]
async fn it_never_pulls_when_cancelled_upfront() -> Result<()> {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let pulls = Arc::new(AtomicUsize::new(0));

    let res = StreamAccumulator::accumulate(
        counted(vec![Ok(StreamFragment::delta("x"))], pulls.clone()),
        &cancel,
        |_| {},
    )
    .await?;

    assert_eq!(res.text, "");
    assert_eq!(res.stop_reason, StopReason::Cancelled);
    assert_eq!(pulls.load(Ordering::SeqCst), 0);

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_transport_errors() {
    let fragments = vec![
        Ok(StreamFragment::delta("partial")),
        Err(anyhow!("connection reset by peer")),
        Ok(StreamFragment::delta("unreachable")),
    ];

    let res =
        StreamAccumulator::accumulate(stream::iter(fragments), &CancellationToken::new(), |_| {})
            .await;

    assert_eq!(
        res,
        Err(ChatError::StreamTransport(
            "connection reset by peer".to_string()
        ))
    );
}

#[tokio::test]
async fn it_treats_an_exhausted_stream_as_natural_stop() -> Result<()> {
    let res = StreamAccumulator::accumulate(
        stream::iter(Vec::<Result<StreamFragment>>::new()),
        &CancellationToken::new(),
        |_| {},
    )
    .await?;

    assert_eq!(res.text, "");
    assert_eq!(res.stop_reason, StopReason::NaturalStop);
    assert_eq!(res.fragments_applied, 0);

    return Ok(());
}
