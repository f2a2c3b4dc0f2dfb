use std::{collections::VecDeque, sync::Mutex};

use futures::future::BoxFuture;

use crate::{ChatInput, ChatModel, GenieError, GenieResult};

/// Result for a mocked `complete` call.
/// It can either be the reply text or an error to return.
pub enum MockCompleteResult {
    Reply(String),
    Error(GenieError),
}

impl MockCompleteResult {
    /// Construct a result that yields the provided reply text.
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply(text.into())
    }

    /// Construct a result that yields the provided error.
    pub fn error(error: GenieError) -> Self {
        Self::Error(error)
    }
}

impl From<String> for MockCompleteResult {
    fn from(text: String) -> Self {
        Self::Reply(text)
    }
}

impl From<&str> for MockCompleteResult {
    fn from(text: &str) -> Self {
        Self::reply(text)
    }
}

impl From<GenieError> for MockCompleteResult {
    fn from(error: GenieError) -> Self {
        Self::Error(error)
    }
}

#[derive(Default)]
struct MockChatModelState {
    mocked_results: VecDeque<MockCompleteResult>,
    tracked_inputs: Vec<ChatInput>,
}

/// A mock chat model for testing that tracks inputs and yields predefined
/// replies in order.
pub struct MockChatModel {
    provider: &'static str,
    model_id: String,
    state: Mutex<MockChatModelState>,
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self {
            provider: "mock",
            model_id: "mock-model".to_string(),
            state: Mutex::new(MockChatModelState::default()),
        }
    }
}

impl MockChatModel {
    /// Construct a new mock chat model instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue one or more mocked results.
    pub fn enqueue_results<I>(&self, results: I) -> &Self
    where
        I: IntoIterator<Item = MockCompleteResult>,
    {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.mocked_results.extend(results);
        drop(state);
        self
    }

    /// Convenience to enqueue a single mocked result.
    pub fn enqueue<R>(&self, result: R) -> &Self
    where
        R: Into<MockCompleteResult>,
    {
        self.enqueue_results(std::iter::once(result.into()))
    }

    /// Retrieve the inputs received so far.
    pub fn tracked_inputs(&self) -> Vec<ChatInput> {
        let state = self.state.lock().expect("mock state poisoned");
        state.tracked_inputs.clone()
    }
}

impl ChatModel for MockChatModel {
    fn provider(&self) -> &'static str {
        self.provider
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    fn complete(&self, input: ChatInput) -> BoxFuture<'_, GenieResult<String>> {
        let result = {
            let mut state = self.state.lock().expect("mock state poisoned");
            state.tracked_inputs.push(input);
            state.mocked_results.pop_front()
        };

        Box::pin(async move {
            match result {
                Some(MockCompleteResult::Reply(text)) => Ok(text),
                Some(MockCompleteResult::Error(error)) => Err(error),
                None => Err(GenieError::InvalidInput(
                    "No mocked result available for complete".to_string(),
                )),
            }
        })
    }
}
