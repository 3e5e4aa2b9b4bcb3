//! Buttons and modal inputs.

use super::{verify_string, MAX_BUTTON_LABEL, MAX_CUSTOM_ID, MAX_OPTION_TEXT, MAX_PLACEHOLDER};
use crate::wire::wire_enum;
use crate::{ModelResult, PartialEmoji};
use accord_types::Snowflake;
use serde::{Deserialize, Serialize};

wire_enum! {
    pub enum ButtonStyle: u8 {
        #[default]
        Primary = 1,
        Secondary = 2,
        Success = 3,
        Danger = 4,
        Link = 5,
        Premium = 6,
    }
}

wire_enum! {
    pub enum TextInputStyle: u8 {
        #[default]
        Short = 1,
        Paragraph = 2,
    }
}

/// A clickable button.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Button {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<PartialEmoji>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_id: Option<Snowflake>,
    pub disabled: bool,
}

impl Button {
    #[must_use]
    pub fn new(style: ButtonStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> ModelResult<&mut Self> {
        self.label = Some(verify_string("label", label, MAX_BUTTON_LABEL, false)?);
        Ok(self)
    }

    pub fn set_custom_id(&mut self, custom_id: impl Into<String>) -> ModelResult<&mut Self> {
        self.custom_id = Some(verify_string("custom_id", custom_id, MAX_CUSTOM_ID, false)?);
        Ok(self)
    }

    pub fn set_url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) -> &mut Self {
        self.disabled = disabled;
        self
    }
}

/// A text field in a modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub custom_id: Option<String>,
    pub style: TextInputStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u16>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl Default for TextInput {
    fn default() -> Self {
        Self {
            id: None,
            custom_id: None,
            style: TextInputStyle::Short,
            label: None,
            min_length: None,
            max_length: None,
            required: true,
            value: None,
            placeholder: None,
        }
    }
}

impl TextInput {
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
}

/// A file picker in a modal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUpload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
    pub required: bool,
}

impl FileUpload {
    pub fn set_custom_id(&mut self, custom_id: impl Into<String>) -> ModelResult<&mut Self> {
        self.custom_id = Some(verify_string("custom_id", custom_id, MAX_CUSTOM_ID, false)?);
        Ok(self)
    }
}

/// A single checkbox in a modal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Checkbox {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub custom_id: Option<String>,
    /// Checked when the modal opens.
    #[serde(rename = "default")]
    pub checked: bool,
}

impl Checkbox {
    pub fn set_custom_id(&mut self, custom_id: impl Into<String>) -> ModelResult<&mut Self> {
        self.custom_id = Some(verify_string("custom_id", custom_id, MAX_CUSTOM_ID, false)?);
        Ok(self)
    }
}

/// One choice in a radio or checkbox group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub default: bool,
}

impl GroupOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> ModelResult<Self> {
        Ok(Self {
            label: verify_string("option label", label, MAX_OPTION_TEXT, false)?,
            value: verify_string("option value", value, MAX_OPTION_TEXT, false)?,
            description: None,
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
}

/// Pick exactly one option.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub custom_id: Option<String>,
    pub options: Vec<GroupOption>,
    pub required: bool,
}

impl RadioGroup {
    pub fn set_custom_id(&mut self, custom_id: impl Into<String>) -> ModelResult<&mut Self> {
        self.custom_id = Some(verify_string("custom_id", custom_id, MAX_CUSTOM_ID, false)?);
        Ok(self)
    }

    pub fn add_option(&mut self, option: GroupOption) -> &mut Self {
        self.options.push(option);
        self
    }
}

/// Pick any number of options within bounds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckboxGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub custom_id: Option<String>,
    pub options: Vec<GroupOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
    pub required: bool,
}

impl CheckboxGroup {
    pub fn set_custom_id(&mut self, custom_id: impl Into<String>) -> ModelResult<&mut Self> {
        self.custom_id = Some(verify_string("custom_id", custom_id, MAX_CUSTOM_ID, false)?);
        Ok(self)
    }

    pub fn add_option(&mut self, option: GroupOption) -> &mut Self {
        self.options.push(option);
        self
    }
}
