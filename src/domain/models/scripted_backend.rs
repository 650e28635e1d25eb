use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream;
use futures::StreamExt;

use super::Backend;
use super::CompletionRequest;
use super::FragmentStream;
use super::GeneratedImage;
use super::ImageRequest;
use super::StreamFragment;
use super::TranscriptionRequest;

pub enum Reply {
    Text(String),
    Fragments(Vec<Result<StreamFragment, String>>),
    Fail(String),
}

/// In-memory backend replaying canned replies in order.
#[derive(Default)]
pub struct ScriptedBackend {
    pub models: Vec<String>,
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<CompletionRequest>>,
    image_requests: Mutex<Vec<ImageRequest>>,
    pulls: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Reply>) -> ScriptedBackend {
        return ScriptedBackend {
            models: vec!["gpt-4o-mini".to_string(), "gpt-4o".to_string()],
            replies: Mutex::new(replies.into()),
            ..ScriptedBackend::default()
        };
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        return self.requests.lock().unwrap().clone();
    }

    pub fn image_requests(&self) -> Vec<ImageRequest> {
        return self.image_requests.lock().unwrap().clone();
    }

    /// Number of fragments pulled from every stream handed out so far.
    pub fn pulls(&self) -> usize {
        return self.pulls.load(Ordering::SeqCst);
    }

    fn next_reply(&self, req: &CompletionRequest) -> Result<Reply> {
        self.requests.lock().unwrap().push(req.clone());
        return self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| return anyhow!("No scripted reply left"));
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>> {
        return Ok(self.models.clone());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, request: &CompletionRequest) -> Result<String> {
        match self.next_reply(request)? {
            Reply::Text(text) => return Ok(text),
            Reply::Fail(err) => bail!(err),
            Reply::Fragments(_) => bail!("Scripted a stream for a non-streaming request"),
        }
    }

    #[allow(clippy::implicit_return)]
    async fn stream_completion(&self, request: &CompletionRequest) -> Result<FragmentStream> {
        match self.next_reply(request)? {
            Reply::Fragments(fragments) => {
                let pulls = self.pulls.clone();
                let fragments = stream::iter(fragments).map(move |fragment| {
                    pulls.fetch_add(1, Ordering::SeqCst);
                    return fragment.map_err(|err| return anyhow!(err));
                });
                return Ok(Box::pin(fragments));
            }
            Reply::Fail(err) => bail!(err),
            Reply::Text(_) => bail!("Scripted a full reply for a streaming request"),
        }
    }

    #[allow(clippy::implicit_return)]
    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>> {
        self.image_requests.lock().unwrap().push(request.clone());
        return Ok((0..request.n)
            .map(|idx| {
                return GeneratedImage {
                    url: format!("https://images.test/{idx}.png"),
                    revised_prompt: Some(format!("A picture of {}", request.prompt)),
                };
            })
            .collect());
    }

    #[allow(clippy::implicit_return)]
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<String> {
        return Ok(format!(
            "{} bytes of {} in {}",
            request.bytes.len(),
            request.file_name,
            request.language
        ));
    }
}
