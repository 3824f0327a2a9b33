//! Caption entry for the final workflow step.

use super::WorkflowError;

/// Caption text being written, plus the caption of the post being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionDraft {
    original: Option<String>,
    text: String,
}

impl CaptionDraft {
    /// Draft for a new post.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft for editing a post that already has `caption`; the text starts
    /// out as the existing caption.
    pub fn editing(caption: impl Into<String>) -> Self {
        let caption = caption.into();
        Self {
            text: caption.clone(),
            original: Some(caption),
        }
    }

    /// Current text, exactly as typed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Check the draft can be submitted, returning the trimmed caption.
    pub fn validate(&self) -> Result<String, WorkflowError> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return Err(WorkflowError::EmptyCaption);
        }
        if self
            .original
            .as_deref()
            .is_some_and(|original| original.trim() == trimmed)
        {
            return Err(WorkflowError::NoChanges);
        }
        Ok(trimmed.to_string())
    }
}
