//! PropertyBag: the ordered-precedence configuration store.
//!
//! Every generator node resolves exactly one [`PropertyBag`] and seals it
//! for the rest of its lifetime. Resolution merges four sources, earlier
//! ones winning:
//!
//! 1. explicit invocation options
//! 2. previously persisted configuration for this project path
//! 3. values parsed out of an existing build descriptor on disk
//! 4. hard-coded/computed defaults — only when the use-defaults flag is set
//!
//! Validation is a separate pass, not interleaved: malformed values are
//! discarded from the bag *before* interactive resolution ever sees them,
//! so the prompt layer re-asks instead of keeping an invalid value. The
//! resolver never mutates its inputs and always returns a fresh bag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Well-known property names.
///
/// Keys are camelCase because they travel into persisted stores and
/// template contexts unchanged.
pub mod keys {
    pub const GROUP_ID: &str = "groupId";
    pub const ARTIFACT_ID: &str = "artifactId";
    pub const VERSION: &str = "version";
    pub const AEM_VERSION: &str = "aemVersion";
    pub const APP_TITLE: &str = "appTitle";
    pub const PACKAGE: &str = "package";
    pub const PUBLISH: &str = "publish";
    pub const EXAMPLES: &str = "examples";

    // Write-phase context keys, never persisted.
    pub const MODULE_PATH: &str = "modulePath";
    pub const MODULE_LIST: &str = "moduleList";
    pub const PACKAGE_PATH: &str = "packagePath";
    pub const PARENT_ARTIFACT_ID: &str = "parentArtifactId";
    pub const PLATFORM_API_VERSION: &str = "platformApiVersion";
    pub const TESTING_CLIENT_VERSION: &str = "testingClientVersion";
}

// ── Value ─────────────────────────────────────────────────────────────────────

/// A single property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Str(String),
    Bag(PropertyBag),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// ── PropertyBag ───────────────────────────────────────────────────────────────

/// Resolved, precedence-ordered configuration for one node.
///
/// Backed by a `BTreeMap` so iteration order — and everything derived
/// from it, like emitted template context — is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyBag {
    entries: BTreeMap<String, Value>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Flag semantics: `true` for `Bool(true)` or `Str("true")`, `false`
    /// for anything else including an absent key.
    pub fn truthy(&self, name: &str) -> bool {
        match self.get(name) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Str(s)) => s == "true",
            _ => false,
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Builder-style `set`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert only if the key is not already present. This is the single
    /// primitive precedence is built from: earlier sources write first.
    pub fn set_if_absent(&mut self, name: &str, value: Value) {
        self.entries.entry(name.to_string()).or_insert(value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    /// Copy every entry of `other` that this bag does not yet define.
    pub fn merge_absent(&mut self, other: &PropertyBag) {
        for (name, value) in &other.entries {
            self.set_if_absent(name, value.clone());
        }
    }

    /// Non-destructive overlay: local entries win, the parent fills gaps.
    /// Used to build template contexts; neither input is touched.
    pub fn merged_with(&self, parent: &PropertyBag) -> PropertyBag {
        let mut merged = self.clone();
        merged.merge_absent(parent);
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

// ── Option schema ─────────────────────────────────────────────────────────────

/// Validates a candidate string value; `Err` carries the human reason.
pub type Validator = fn(&str) -> Result<(), String>;

/// How a property is obtained interactively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Free text, validated by `OptionSpec::validate`.
    Text,
    /// Boolean flag, answered yes/no.
    Flag,
}

/// One entry in a generator's option schema.
///
/// Schemas are composed statically — a common slice plus kind-specific
/// additions — rather than merged at runtime.
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    pub name: &'static str,
    pub kind: OptionKind,
    pub description: &'static str,
    pub validate: Option<Validator>,
}

impl OptionSpec {
    pub const fn text(name: &'static str, description: &'static str, validate: Validator) -> Self {
        Self {
            name,
            kind: OptionKind::Text,
            description,
            validate: Some(validate),
        }
    }

    pub const fn flag(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: OptionKind::Flag,
            description,
            validate: None,
        }
    }
}

// ── Resolution ────────────────────────────────────────────────────────────────

/// The four precedence-ordered inputs of one resolution.
#[derive(Debug, Clone, Copy)]
pub struct PropertySources<'a> {
    pub options: &'a PropertyBag,
    pub persisted: &'a PropertyBag,
    pub descriptor: &'a PropertyBag,
    pub use_defaults: bool,
}

/// A value removed by the validation pass. Kept so the prompting phase
/// can re-ask (interactive) or fail with the recorded reason (defaults
/// mode) — the value is never silently replaced by a fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct Discarded {
    pub name: String,
    pub value: String,
    pub reason: String,
}

/// Output of [`resolve`]: the fresh bag plus everything discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub bag: PropertyBag,
    pub discarded: Vec<Discarded>,
}

impl Resolution {
    pub fn discarded_for(&self, name: &str) -> Option<&Discarded> {
        self.discarded.iter().find(|d| d.name == name)
    }
}

/// Resolve one node's PropertyBag from its sources.
///
/// `defaults` is consulted only when the use-defaults flag is set, with
/// the partially-resolved bag as input (so computed fallbacks such as
/// `package` from `groupId` can be derived). A name whose supplied value
/// was discarded never receives a default.
pub fn resolve<F>(sources: &PropertySources<'_>, schema: &[OptionSpec], defaults: F) -> Resolution
where
    F: FnOnce(&PropertyBag) -> Vec<(&'static str, Value)>,
{
    let mut bag = PropertyBag::new();
    bag.merge_absent(sources.options);
    bag.merge_absent(sources.persisted);
    bag.merge_absent(sources.descriptor);

    // Separate validation pass: drop malformed values before the
    // interactive step can observe them.
    let mut discarded = Vec::new();
    for spec in schema {
        let Some(validate) = spec.validate else {
            continue;
        };
        let Some(value) = bag.get_str(spec.name).map(str::to_string) else {
            continue;
        };
        if let Err(reason) = validate(&value) {
            warn!(name = spec.name, %value, %reason, "discarding malformed property");
            bag.remove(spec.name);
            discarded.push(Discarded {
                name: spec.name.to_string(),
                value,
                reason,
            });
        }
    }

    if sources.use_defaults {
        for (name, value) in defaults(&bag) {
            if discarded.iter().any(|d| d.name == name) {
                continue;
            }
            bag.set_if_absent(name, value);
        }
    }

    Resolution { bag, discarded }
}
