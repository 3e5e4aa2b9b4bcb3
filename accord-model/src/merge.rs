use crate::{ModelError, ModelResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a patch treats fields the payload leaves out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Every patch is a complete record: absent or null fields reset to
    /// their default.
    FullReplace,
    /// Patches are partial updates: absent fields keep their current value.
    Partial,
}

/// Reads fields out of a raw payload and merges them into entity slots.
///
/// [`FieldMerge::merge`] follows the entity kind's policy. The
/// `keep_if_absent` / `reset_if_absent` variants override it for a single
/// field, so every exception to the kind's policy is spelled out at the call
/// site. A JSON `null` always means "present, default value".
#[derive(Debug, Clone, Copy)]
pub struct FieldMerge<'a> {
    fields: &'a Map<String, Value>,
    policy: MergePolicy,
}

impl<'a> FieldMerge<'a> {
    /// Wraps `raw`, which must be a JSON object.
    pub fn new(raw: &'a Value, policy: MergePolicy, what: &'static str) -> ModelResult<Self> {
        let fields = raw.as_object().ok_or(ModelError::NotAnObject(what))?;
        Ok(Self { fields, policy })
    }

    /// The policy in effect.
    #[must_use]
    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Whether the payload carries `key` (null counts as present).
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// The raw value at `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    /// Decodes `key` if present and non-null.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> ModelResult<Option<T>> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(T::deserialize(value)?)),
        }
    }

    /// Merges `key` into `slot` according to the kind's policy.
    pub fn merge<T: DeserializeOwned + Default>(&self, key: &str, slot: &mut T) -> ModelResult<()> {
        match self.policy {
            MergePolicy::FullReplace => self.reset_if_absent(key, slot),
            MergePolicy::Partial => self.keep_if_absent(key, slot),
        }
    }

    /// Overwrites `slot` when `key` is present; leaves it alone otherwise.
    pub fn keep_if_absent<T: DeserializeOwned + Default>(
        &self,
        key: &str,
        slot: &mut T,
    ) -> ModelResult<()> {
        if let Some(value) = self.fields.get(key) {
            *slot = decode_or_default(value)?;
        }
        Ok(())
    }

    /// Overwrites `slot` when `key` is present; resets it to the default
    /// otherwise.
    pub fn reset_if_absent<T: DeserializeOwned + Default>(
        &self,
        key: &str,
        slot: &mut T,
    ) -> ModelResult<()> {
        *slot = match self.fields.get(key) {
            Some(value) => decode_or_default(value)?,
            None => T::default(),
        };
        Ok(())
    }

    /// Like [`FieldMerge::merge`], but the default on reset is `default`
    /// rather than `T::default()`.
    pub fn merge_or<T: DeserializeOwned>(&self, key: &str, slot: &mut T, default: T) -> ModelResult<()> {
        match self.fields.get(key) {
            Some(Value::Null) => *slot = default,
            Some(value) => *slot = T::deserialize(value)?,
            None if self.policy == MergePolicy::FullReplace => *slot = default,
            None => {}
        }
        Ok(())
    }

    /// A field with no sensible default. Full-replace payloads must carry it;
    /// partial payloads may omit it.
    pub fn required<T: DeserializeOwned>(&self, key: &'static str, slot: &mut T) -> ModelResult<()> {
        match self.fields.get(key) {
            Some(Value::Null) => Err(ModelError::MissingField(key)),
            Some(value) => {
                *slot = T::deserialize(value)?;
                Ok(())
            }
            None if self.policy == MergePolicy::FullReplace => Err(ModelError::MissingField(key)),
            None => Ok(()),
        }
    }

    /// Decodes a field every payload must carry, such as the id.
    pub fn expect<T: DeserializeOwned>(&self, key: &'static str) -> ModelResult<T> {
        self.get(key)?.ok_or(ModelError::MissingField(key))
    }
}

fn decode_or_default<T: DeserializeOwned + Default>(value: &Value) -> ModelResult<T> {
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(T::deserialize(value)?)
}
