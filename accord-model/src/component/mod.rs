//! Message components.
//!
//! One tagged union over every component kind. Decoding is a closed match on
//! the `type` discriminant; layout components decode their children through
//! the same path with the same [`DecodeContext`].
//!
//! With diagnostics attached, an unknown kind is reported and dropped. Without
//! them (no owning client), it is an [`ModelError::InvalidType`] error.

mod interactive;
mod layout;
mod media;
mod select;

pub use interactive::{
    Button, ButtonStyle, Checkbox, CheckboxGroup, FileUpload, GroupOption, RadioGroup, TextInput,
    TextInputStyle,
};
pub use layout::{ActionRow, Container, Label, Section, Separator, SeparatorSpacing};
pub use media::{FileComponent, MediaGallery, MediaGalleryItem, TextDisplay, Thumbnail, UnfurledMedia};
pub use select::{SelectDefaultValue, SelectMenu, SelectOption, MAX_SELECT_OPTIONS};

use crate::{DecodeContext, ModelError, ModelResult};
use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use tracing::debug;

pub(crate) const MAX_CUSTOM_ID: usize = 100;
pub(crate) const MAX_PLACEHOLDER: usize = 150;
pub(crate) const MAX_OPTION_TEXT: usize = 100;
pub(crate) const MAX_BUTTON_LABEL: usize = 80;

macro_rules! component_kinds {
    ($( $variant:ident = $code:literal => $name:literal, )+) => {
        /// Component discriminant.
        ///
        /// Payloads name kinds by number; hand-built payloads sometimes use the
        /// SCREAMING_SNAKE name. Both decode to the same variant.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ComponentKind {
            $( $variant, )+
            Unknown(u8),
        }

        impl ComponentKind {
            #[must_use]
            pub const fn from_code(code: u8) -> Self {
                match code {
                    $( $code => Self::$variant, )+
                    other => Self::Unknown(other),
                }
            }

            #[must_use]
            pub const fn code(&self) -> u8 {
                match self {
                    $( Self::$variant => $code, )+
                    Self::Unknown(other) => *other,
                }
            }

            /// Looks a kind up by its SCREAMING_SNAKE name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $name => Some(Self::$variant), )+
                    _ => None,
                }
            }

            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $name, )+
                    Self::Unknown(_) => "UNKNOWN",
                }
            }
        }
    };
}

component_kinds! {
    ActionRow = 1 => "ACTION_ROW",
    Button = 2 => "BUTTON",
    StringSelect = 3 => "STRING_SELECT",
    TextInput = 4 => "TEXT_INPUT",
    UserSelect = 5 => "USER_SELECT",
    RoleSelect = 6 => "ROLE_SELECT",
    MentionableSelect = 7 => "MENTIONABLE_SELECT",
    ChannelSelect = 8 => "CHANNEL_SELECT",
    Section = 9 => "SECTION",
    TextDisplay = 10 => "TEXT_DISPLAY",
    Thumbnail = 11 => "THUMBNAIL",
    MediaGallery = 12 => "MEDIA_GALLERY",
    File = 13 => "FILE",
    Separator = 14 => "SEPARATOR",
    Container = 17 => "CONTAINER",
    Label = 18 => "LABEL",
    FileUpload = 19 => "FILE_UPLOAD",
    RadioGroup = 21 => "RADIO_GROUP",
    CheckboxGroup = 22 => "CHECKBOX_GROUP",
    Checkbox = 23 => "CHECKBOX",
}

impl ComponentKind {
    /// Normalizes a raw `type` value. `SELECT_MENU` is the legacy name of the
    /// string select. Returns `None` for values that are neither a code nor a
    /// known name.
    #[must_use]
    pub fn resolve(raw: &Value) -> Option<Self> {
        match raw {
            Value::Number(number) => number
                .as_u64()
                .and_then(|code| u8::try_from(code).ok())
                .map(Self::from_code),
            Value::String(name) if name == "SELECT_MENU" => Some(Self::StringSelect),
            Value::String(name) => Self::from_name(name),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "UNKNOWN({code})"),
            known => f.write_str(known.name()),
        }
    }
}

/// A message component of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    ActionRow(ActionRow),
    Button(Button),
    StringSelect(SelectMenu),
    TextInput(TextInput),
    UserSelect(SelectMenu),
    RoleSelect(SelectMenu),
    MentionableSelect(SelectMenu),
    ChannelSelect(SelectMenu),
    Section(Section),
    TextDisplay(TextDisplay),
    Thumbnail(Thumbnail),
    MediaGallery(MediaGallery),
    File(FileComponent),
    Separator(Separator),
    Container(Container),
    Label(Label),
    FileUpload(FileUpload),
    RadioGroup(RadioGroup),
    CheckboxGroup(CheckboxGroup),
    Checkbox(Checkbox),
}

impl Component {
    /// Decodes one component from its raw payload.
    ///
    /// Returns `Ok(None)` when the kind is unknown and `ctx` carries
    /// diagnostics; the unknown kind has then been reported.
    pub fn decode(raw: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Option<Self>> {
        let raw_kind = raw.get("type").unwrap_or(&Value::Null);
        let component = match ComponentKind::resolve(raw_kind) {
            Some(ComponentKind::ActionRow) => {
                let mut row: ActionRow = fields(raw)?;
                row.components = Self::decode_list(raw.get("components"), ctx)?;
                Self::ActionRow(row)
            }
            Some(ComponentKind::Button) => Self::Button(fields(raw)?),
            Some(ComponentKind::StringSelect) => Self::StringSelect(fields(raw)?),
            Some(ComponentKind::TextInput) => Self::TextInput(fields(raw)?),
            Some(ComponentKind::UserSelect) => Self::UserSelect(fields(raw)?),
            Some(ComponentKind::RoleSelect) => Self::RoleSelect(fields(raw)?),
            Some(ComponentKind::MentionableSelect) => Self::MentionableSelect(fields(raw)?),
            Some(ComponentKind::ChannelSelect) => Self::ChannelSelect(fields(raw)?),
            Some(ComponentKind::Section) => {
                let mut section: Section = fields(raw)?;
                section.components = Self::decode_list(raw.get("components"), ctx)?;
                section.accessory = Self::decode_boxed(raw.get("accessory"), ctx)?;
                Self::Section(section)
            }
            Some(ComponentKind::TextDisplay) => Self::TextDisplay(fields(raw)?),
            Some(ComponentKind::Thumbnail) => Self::Thumbnail(fields(raw)?),
            Some(ComponentKind::MediaGallery) => Self::MediaGallery(fields(raw)?),
            Some(ComponentKind::File) => Self::File(fields(raw)?),
            Some(ComponentKind::Separator) => Self::Separator(fields(raw)?),
            Some(ComponentKind::Container) => {
                let mut container: Container = fields(raw)?;
                container.components = Self::decode_list(raw.get("components"), ctx)?;
                Self::Container(container)
            }
            Some(ComponentKind::Label) => {
                let mut label: Label = fields(raw)?;
                label.component = Self::decode_boxed(raw.get("component"), ctx)?;
                Self::Label(label)
            }
            Some(ComponentKind::FileUpload) => Self::FileUpload(fields(raw)?),
            Some(ComponentKind::RadioGroup) => Self::RadioGroup(fields(raw)?),
            Some(ComponentKind::CheckboxGroup) => Self::CheckboxGroup(fields(raw)?),
            Some(ComponentKind::Checkbox) => Self::Checkbox(fields(raw)?),
            Some(ComponentKind::Unknown(_)) | None => return Self::unknown(raw_kind, ctx),
        };
        Ok(Some(component))
    }

    fn unknown(raw_kind: &Value, ctx: &DecodeContext<'_>) -> ModelResult<Option<Self>> {
        debug!(kind = %raw_kind, "unknown component kind");
        let reported = ctx.debug(&format!(
            "[Component] Received component with unknown type: {raw_kind}"
        ));
        if reported {
            Ok(None)
        } else {
            Err(ModelError::InvalidType {
                field: "type",
                expected: "a known component kind",
            })
        }
    }

    /// Decodes a component array, dropping entries reported as unknown.
    pub fn decode_list(raw: Option<&Value>, ctx: &DecodeContext<'_>) -> ModelResult<Vec<Self>> {
        let Some(Value::Array(items)) = raw else {
            return Ok(Vec::new());
        };
        let mut components = Vec::with_capacity(items.len());
        for item in items {
            if let Some(component) = Self::decode(item, ctx)? {
                components.push(component);
            }
        }
        Ok(components)
    }

    fn decode_boxed(raw: Option<&Value>, ctx: &DecodeContext<'_>) -> ModelResult<Option<Box<Self>>> {
        match raw {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Self::decode(value, ctx)?.map(Box::new)),
        }
    }

    /// The kind discriminant.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::ActionRow(_) => ComponentKind::ActionRow,
            Self::Button(_) => ComponentKind::Button,
            Self::StringSelect(_) => ComponentKind::StringSelect,
            Self::TextInput(_) => ComponentKind::TextInput,
            Self::UserSelect(_) => ComponentKind::UserSelect,
            Self::RoleSelect(_) => ComponentKind::RoleSelect,
            Self::MentionableSelect(_) => ComponentKind::MentionableSelect,
            Self::ChannelSelect(_) => ComponentKind::ChannelSelect,
            Self::Section(_) => ComponentKind::Section,
            Self::TextDisplay(_) => ComponentKind::TextDisplay,
            Self::Thumbnail(_) => ComponentKind::Thumbnail,
            Self::MediaGallery(_) => ComponentKind::MediaGallery,
            Self::File(_) => ComponentKind::File,
            Self::Separator(_) => ComponentKind::Separator,
            Self::Container(_) => ComponentKind::Container,
            Self::Label(_) => ComponentKind::Label,
            Self::FileUpload(_) => ComponentKind::FileUpload,
            Self::RadioGroup(_) => ComponentKind::RadioGroup,
            Self::CheckboxGroup(_) => ComponentKind::CheckboxGroup,
            Self::Checkbox(_) => ComponentKind::Checkbox,
        }
    }

    /// The developer-assigned custom id, for interactive kinds.
    #[must_use]
    pub fn custom_id(&self) -> Option<&str> {
        match self {
            Self::Button(button) => button.custom_id.as_deref(),
            Self::StringSelect(menu)
            | Self::UserSelect(menu)
            | Self::RoleSelect(menu)
            | Self::MentionableSelect(menu)
            | Self::ChannelSelect(menu) => menu.custom_id.as_deref(),
            Self::TextInput(input) => input.custom_id.as_deref(),
            Self::FileUpload(upload) => upload.custom_id.as_deref(),
            Self::RadioGroup(group) => group.custom_id.as_deref(),
            Self::CheckboxGroup(group) => group.custom_id.as_deref(),
            Self::Checkbox(checkbox) => checkbox.custom_id.as_deref(),
            _ => None,
        }
    }

    /// Direct children of layout components, in order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::ActionRow(row) => row.components.iter().collect(),
            Self::Container(container) => container.components.iter().collect(),
            Self::Section(section) => section
                .components
                .iter()
                .chain(section.accessory.as_deref())
                .collect(),
            Self::Label(label) => label.component.as_deref().into_iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Wire JSON, with the numeric `type`.
    pub fn to_json(&self) -> ModelResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = match self {
            Self::ActionRow(row) => serde_json::to_value(row),
            Self::Button(button) => serde_json::to_value(button),
            Self::StringSelect(menu)
            | Self::UserSelect(menu)
            | Self::RoleSelect(menu)
            | Self::MentionableSelect(menu)
            | Self::ChannelSelect(menu) => serde_json::to_value(menu),
            Self::TextInput(input) => serde_json::to_value(input),
            Self::Section(section) => serde_json::to_value(section),
            Self::TextDisplay(text) => serde_json::to_value(text),
            Self::Thumbnail(thumbnail) => serde_json::to_value(thumbnail),
            Self::MediaGallery(gallery) => serde_json::to_value(gallery),
            Self::File(file) => serde_json::to_value(file),
            Self::Separator(separator) => serde_json::to_value(separator),
            Self::Container(container) => serde_json::to_value(container),
            Self::Label(label) => serde_json::to_value(label),
            Self::FileUpload(upload) => serde_json::to_value(upload),
            Self::RadioGroup(group) => serde_json::to_value(group),
            Self::CheckboxGroup(group) => serde_json::to_value(group),
            Self::Checkbox(checkbox) => serde_json::to_value(checkbox),
        };
        let mut body = body.map_err(S::Error::custom)?;
        if let Value::Object(map) = &mut body {
            map.insert("type".into(), Value::from(self.kind().code()));
        }
        body.serialize(serializer)
    }
}

fn fields<T: DeserializeOwned>(raw: &Value) -> ModelResult<T> {
    Ok(T::deserialize(raw)?)
}

/// Checks a builder string: non-empty (unless `allow_empty`) and at most
/// `max` characters.
pub(crate) fn verify_string(
    field: &'static str,
    value: impl Into<String>,
    max: usize,
    allow_empty: bool,
) -> ModelResult<String> {
    let value = value.into();
    if value.is_empty() && !allow_empty {
        return Err(ModelError::validation(field, "must not be empty"));
    }
    let length = value.chars().count();
    if length > max {
        return Err(ModelError::validation(
            field,
            format!("must be at most {max} characters, got {length}"),
        ));
    }
    Ok(value)
}
