use super::{verify_string, MAX_CUSTOM_ID, MAX_OPTION_TEXT, MAX_PLACEHOLDER};
use crate::{ChannelType, ModelError, ModelResult, PartialEmoji};
use accord_types::Snowflake;
use serde::{Deserialize, Serialize};

/// Upper bound on options per string select.
pub const MAX_SELECT_OPTIONS: usize = 25;

/// One choice in a string select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PartialEmoji>,
    #[serde(default)]
    pub default: bool,
}

impl SelectOption {
    /// A validated option. Label and value must be 1..=100 characters.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> ModelResult<Self> {
        Ok(Self {
            label: verify_string("option label", label, MAX_OPTION_TEXT, false)?,
            value: verify_string("option value", value, MAX_OPTION_TEXT, false)?,
            description: None,
            emoji: None,
            default: false,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> ModelResult<Self> {
        self.description = Some(verify_string(
            "option description",
            description,
            MAX_OPTION_TEXT,
            true,
        )?);
        Ok(self)
    }

    #[must_use]
    pub fn with_emoji(mut self, emoji: PartialEmoji) -> Self {
        self.emoji = Some(emoji);
        self
    }

    #[must_use]
    pub fn selected_by_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }
}

/// A pre-selected value for auto-populated selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectDefaultValue {
    pub id: Snowflake,
    /// `user`, `role` or `channel`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Any select menu. The variant of [`super::Component`] that wraps it decides
/// which kind it is; `options` only applies to string selects and
/// `channel_types` only to channel selects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectMenu {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
    pub required: bool,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub default_values: Vec<SelectDefaultValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub channel_types: Vec<ChannelType>,
}

impl Default for SelectMenu {
    fn default() -> Self {
        Self {
            id: None,
            custom_id: None,
            placeholder: None,
            min_values: None,
            max_values: None,
            required: true,
            disabled: false,
            options: Vec::new(),
            default_values: Vec::new(),
            channel_types: Vec::new(),
        }
    }
}

impl SelectMenu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_custom_id(&mut self, custom_id: impl Into<String>) -> ModelResult<&mut Self> {
        self.custom_id = Some(verify_string("custom_id", custom_id, MAX_CUSTOM_ID, false)?);
        Ok(self)
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) -> ModelResult<&mut Self> {
        self.placeholder = Some(verify_string(
            "placeholder",
            placeholder,
            MAX_PLACEHOLDER,
            false,
        )?);
        Ok(self)
    }

    /// Appends an option. Fails once the menu holds the maximum.
    pub fn add_option(&mut self, option: SelectOption) -> ModelResult<&mut Self> {
        if self.options.len() >= MAX_SELECT_OPTIONS {
            return Err(ModelError::validation(
                "options",
                format!("at most {MAX_SELECT_OPTIONS} options"),
            ));
        }
        self.options.push(option);
        Ok(self)
    }

    pub fn set_min_values(&mut self, min_values: u8) -> &mut Self {
        self.min_values = Some(min_values);
        self
    }

    pub fn set_max_values(&mut self, max_values: u8) -> &mut Self {
        self.max_values = Some(max_values);
        self
    }

    pub fn set_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) -> &mut Self {
        self.disabled = disabled;
        self
    }
}
