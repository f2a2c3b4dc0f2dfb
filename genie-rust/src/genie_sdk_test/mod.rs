mod model;

pub use model::{MockChatModel, MockCompleteResult};
