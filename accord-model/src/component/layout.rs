//! Layout components. Children are filled in by [`super::Component::decode`].

use super::Component;
use crate::wire::wire_enum;
use serde::{Deserialize, Serialize};

wire_enum! {
    pub enum SeparatorSpacing: u8 {
        #[default]
        Small = 1,
        Large = 2,
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_deserializing)]
    pub components: Vec<Component>,
}

/// Text components with an optional accessory beside them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_deserializing)]
    pub components: Vec<Component>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub accessory: Option<Box<Component>>,
}

/// A boxed group of components with an accent bar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Container {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_deserializing)]
    pub components: Vec<Component>,
    pub accent_color: Option<u32>,
    pub spoiler: bool,
}

impl Container {
    /// The accent colour as `#rrggbb`.
    #[must_use]
    pub fn hex_color(&self) -> Option<String> {
        self.accent_color.map(|color| format!("#{color:06x}"))
    }
}

/// Wraps one modal input with a label and description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub component: Option<Box<Component>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Separator {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub divider: bool,
    pub spacing: SeparatorSpacing,
}

impl Default for Separator {
    fn default() -> Self {
        Self {
            id: None,
            divider: true,
            spacing: SeparatorSpacing::Small,
        }
    }
}
