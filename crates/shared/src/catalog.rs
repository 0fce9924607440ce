use serde::Serialize;
use thiserror::Error;

use crate::chat::context::AssistantVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelOption {
    pub display_name: &'static str,
    pub provider_model: &'static str,
}

const PAPER_ANALYST_MODELS: [ModelOption; 3] = [
    ModelOption {
        display_name: "Qwen3",
        provider_model: "qwen/qwen3-235b-a22b-07-25:free",
    },
    ModelOption {
        display_name: "DeepSeek R1",
        provider_model: "deepseek/deepseek-r1-0528:free",
    },
    ModelOption {
        display_name: "Gemini 2.0",
        provider_model: "google/gemini-2.0-flash-exp:free",
    },
];

const MODEL_EXPLAINER_MODELS: [ModelOption; 3] = [
    ModelOption {
        display_name: "DeepSeek V3",
        provider_model: "deepseek/deepseek-chat-v3-0324:free",
    },
    ModelOption {
        display_name: "Llama 3.3 70B",
        provider_model: "meta-llama/llama-3.3-70b-instruct:free",
    },
    ModelOption {
        display_name: "Mistral 7B",
        provider_model: "mistralai/mistral-7b-instruct:free",
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("unknown model '{display_name}' for {variant}")]
    UnknownModel {
        variant: &'static str,
        display_name: String,
    },
}

pub fn model_options(variant: AssistantVariant) -> &'static [ModelOption] {
    match variant {
        AssistantVariant::PaperAnalyst => &PAPER_ANALYST_MODELS,
        AssistantVariant::ModelExplainer => &MODEL_EXPLAINER_MODELS,
    }
}

/// The preselected entry, i.e. the first one listed.
pub fn default_model(variant: AssistantVariant) -> ModelOption {
    model_options(variant)[0]
}

pub fn resolve_model(
    variant: AssistantVariant,
    display_name: &str,
) -> Result<ModelOption, CatalogError> {
    let wanted = display_name.trim();
    model_options(variant)
        .iter()
        .find(|option| option.display_name == wanted)
        .copied()
        .ok_or_else(|| CatalogError::UnknownModel {
            variant: variant.as_str(),
            display_name: wanted.to_string(),
        })
}
