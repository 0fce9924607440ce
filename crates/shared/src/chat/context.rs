use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::conversation::Conversation;
use super::message::Message;

const PAPER_ANALYST_INSTRUCTIONS: &str = "You are an expert business analyst. Your task is to analyze the following academic document and answer exclusively about:
- Key metrics found in the study
- Insights relevant for decision making
- Business projections based on the data

Language:
- Explain everything in simple words
- Avoid technical jargon
- Use examples that management can easily understand

Base document:
";

const MODEL_EXPLAINER_INSTRUCTIONS: &str = "You are an expert data scientist explaining a trained regression model to a non-technical audience. Answer exclusively about:
- What kind of model this is and how it produces a prediction
- What each hyperparameter controls
- Which features weigh the most and in which direction
- How the feature scaler transforms the inputs before prediction

Language:
- Explain everything in simple words
- Avoid technical jargon
- Use concrete examples with the features listed below

Model description:
";

/// The two assistant front-ends. Each owns a fixed instruction block and its
/// own model catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssistantVariant {
    PaperAnalyst,
    ModelExplainer,
}

impl AssistantVariant {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PaperAnalyst => "paper_analyst",
            Self::ModelExplainer => "model_explainer",
        }
    }

    pub const fn instructions(self) -> &'static str {
        match self {
            Self::PaperAnalyst => PAPER_ANALYST_INSTRUCTIONS,
            Self::ModelExplainer => MODEL_EXPLAINER_INSTRUCTIONS,
        }
    }
}

impl FromStr for AssistantVariant {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "paper_analyst" | "paper" => Ok(Self::PaperAnalyst),
            "model_explainer" | "model" => Ok(Self::ModelExplainer),
            other => Err(format!("unknown assistant variant: {other}")),
        }
    }
}

/// Builds the single system message for a session. The summary is embedded
/// verbatim after the variant's instruction block.
pub fn build_system_message(variant: AssistantVariant, summary: &str) -> Message {
    let instructions = variant.instructions();
    let mut content = String::with_capacity(instructions.len() + summary.len());
    content.push_str(instructions);
    content.push_str(summary);
    Message::system(content)
}

/// Seeds `conversation` with the system message when summary text is
/// available and nothing has been seeded yet. Returns whether a message was
/// inserted.
pub fn seed_conversation(
    conversation: &mut Conversation,
    variant: AssistantVariant,
    summary: Option<&str>,
) -> bool {
    let Some(summary) = summary.filter(|summary| !summary.trim().is_empty()) else {
        return false;
    };

    if !conversation.is_empty() {
        return false;
    }

    conversation.seed_system(build_system_message(variant, summary))
}
