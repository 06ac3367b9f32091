//! Per-field writing prompts and examples.
//!
//! A journaling template may override the prompt and example of any field.
//! [`TemplatePrompts::guide`] resolves the override or falls back to the
//! built-in default prompt. Lookups go through [`Field`], never through
//! string-built property names.

use serde::Deserialize;

use crate::field::Field;

/// What the form shows above a field's text box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldGuide {
    pub prompt: String,
    pub example: Option<String>,
}

/// Prompt and example overrides for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FieldOverride {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub example: Option<String>,
}

/// Overrides carried by a journaling template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TemplatePrompts {
    #[serde(default)]
    pub situation: FieldOverride,
    #[serde(default)]
    pub task: FieldOverride,
    #[serde(default)]
    pub action: FieldOverride,
    #[serde(default)]
    pub result: FieldOverride,
}

pub fn default_prompt(field: Field) -> &'static str {
    match field {
        Field::Situation => {
            "Describe the context and situation. What problem or challenge did you face?"
        }
        Field::Task => "What was your specific responsibility or task in this situation?",
        Field::Action => {
            "What actions did you take to address the situation? Be specific about your approach."
        }
        Field::Result => {
            "What was the outcome of your actions? Quantify the results when possible."
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl TemplatePrompts {
    pub fn get(&self, field: Field) -> &FieldOverride {
        match field {
            Field::Situation => &self.situation,
            Field::Task => &self.task,
            Field::Action => &self.action,
            Field::Result => &self.result,
        }
    }

    pub fn guide(&self, field: Field) -> FieldGuide {
        let over = self.get(field);
        FieldGuide {
            prompt: non_blank(&over.prompt)
                .unwrap_or_else(|| default_prompt(field))
                .to_string(),
            example: non_blank(&over.example).map(str::to_string),
        }
    }
}

/// Guide for a form opened without a template.
pub fn default_guide(field: Field) -> FieldGuide {
    TemplatePrompts::default().guide(field)
}
