use crate::{
    generate_code, generate_idea, CategoryFilter, CodeBundle, GenerationMode, GenieError,
    GenieResult, Idea,
};

/// Caller-side state of one slot machine session.
///
/// Every operation either succeeds and updates the session or fails and
/// leaves it exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct Session {
    filter: CategoryFilter,
    history: Vec<String>,
    current_idea: Option<Idea>,
    code: Option<CodeBundle>,
}

impl Session {
    #[must_use]
    pub fn new(filter: CategoryFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    /// Titles shown so far under the current filter, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    #[must_use]
    pub fn current_idea(&self) -> Option<&Idea> {
        self.current_idea.as_ref()
    }

    #[must_use]
    pub fn code(&self) -> Option<&CodeBundle> {
        self.code.as_ref()
    }

    /// Switching to a different filter starts a fresh history.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.history.clear();
        }
    }

    pub async fn spin(&mut self, mode: &GenerationMode) -> GenieResult<&Idea> {
        let mut idea = generate_idea(mode, self.filter, &self.history).await?;
        if idea.category.is_none() {
            idea.category = self.filter.category();
        }

        self.history.push(idea.title.clone());
        self.code = None;
        Ok(&*self.current_idea.insert(idea))
    }

    /// Adopts an idea picked outside the slot machine, for example one saved
    /// from an earlier session, as the current idea.
    pub fn select(&mut self, idea: Idea) -> &Idea {
        if !self.history.contains(&idea.title) {
            self.history.push(idea.title.clone());
        }
        self.code = None;
        self.current_idea.insert(idea)
    }

    pub async fn build(&mut self, mode: &GenerationMode) -> GenieResult<&CodeBundle> {
        let idea = self.current_idea.as_ref().ok_or_else(|| {
            GenieError::InvalidInput("Spin for an idea before generating code".to_string())
        })?;
        let bundle = generate_code(mode, idea).await?;
        Ok(&*self.code.insert(bundle))
    }

    /// Back to the slot machine: forget the shown idea and its code but
    /// keep the history.
    pub fn reset(&mut self) {
        self.current_idea = None;
        self.code = None;
    }
}
