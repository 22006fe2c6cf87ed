//! Model registry: the fixed table of selectable gateway models.

use std::fmt;

/// A model the user can chat with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSelection {
    /// Human-readable name.
    pub label: &'static str,
    /// Identifier sent to the gateway as `model`.
    pub provider_id: &'static str,
    /// Short characterization shown next to the label.
    pub blurb: &'static str,
}

impl fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.blurb)
    }
}

const MODELS: &[ModelSelection] = &[
    ModelSelection {
        label: "Llama 3.1 8B",
        provider_id: "meta-llama/llama-3.1-8b-instruct:free",
        blurb: "Free, Fast",
    },
    ModelSelection {
        label: "Mistral 7B",
        provider_id: "mistralai/mixtral-8x7b-instruct:free",
        blurb: "Free, Lightweight",
    },
    ModelSelection {
        label: "Llama 4 Scout",
        provider_id: "meta-llama/llama-4-scout:free",
        blurb: "Free, Long Context",
    },
    ModelSelection {
        label: "NVIDIA Nemotron Nano 8B",
        provider_id: "nvidia/llama-3.1-nemotron-nano-8b-v1:free",
        blurb: "Free, Efficient",
    },
    ModelSelection {
        label: "DeepSeek V3 Base",
        provider_id: "deepseek/deepseek-v3-base:free",
        blurb: "Free, Technical",
    },
    ModelSelection {
        label: "Mistral Small 3.1 24B",
        provider_id: "mistralai/mistral-small-3.1-24b-instruct:free",
        blurb: "Free, Instruct",
    },
];

/// Read-only lookup table of models, in display order.
#[derive(Debug, Clone, Copy)]
pub struct ModelRegistry {
    models: &'static [ModelSelection],
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ModelRegistry {
    /// The built-in table of free OpenRouter models.
    pub const fn builtin() -> Self {
        Self { models: MODELS }
    }

    pub fn all(&self) -> &'static [ModelSelection] {
        self.models
    }

    /// The selection used when nothing else is configured: the first entry.
    pub fn default_model(&self) -> ModelSelection {
        self.models[0]
    }

    /// Look a model up by 1-based index, label (case-insensitive) or provider id.
    pub fn find(&self, query: &str) -> Option<ModelSelection> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        if let Ok(index) = query.parse::<usize>() {
            return index
                .checked_sub(1)
                .and_then(|i| self.models.get(i))
                .copied();
        }

        self.models
            .iter()
            .find(|m| m.provider_id == query || m.label.eq_ignore_ascii_case(query))
            .copied()
    }
}
