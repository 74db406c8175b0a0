//! String-table lookup for player-facing text.
//!
//! The rule never hard-codes sentences: it asks a [`Localizer`] for a key
//! and a set of named arguments. [`StringTable`] is the built-in
//! implementation, backed by `minijinja` templates loaded from YAML.

use std::collections::BTreeMap;
use std::path::Path;

use minijinja::Environment;
use tracing::warn;

use crate::error::CatalogError;

/// The English string table shipped with the crate.
pub const BUILTIN_STRINGS: &str = include_str!("../data/en-US.yml");

/// Greeting line naming the sponsoring organization (`corporation`).
pub const GREETING: &str = "traitor-role-greeting";
/// Codeword line (`codewords`).
pub const CODEWORDS_SHORT: &str = "traitor-role-codewords-short";
/// Unlock code line (`code`).
pub const UPLINK_CODE_SHORT: &str = "traitor-role-uplink-code-short";
/// Placeholder used when no sponsor is configured.
pub const ISSUER_UNKNOWN: &str = "objective-issuer-unknown";
/// Round-end summary line (`codewords`).
pub const ROUND_END_CODEWORDS: &str = "traitor-round-end-codewords";
/// Round-end traitor count (`count`).
pub const ROUND_END_COUNT: &str = "traitor-round-end-count";
/// Owner notice when a role is attached.
pub const ROLE_CHANGED: &str = "traitor-role-changed";

/// Resolves a string key and named arguments to display text.
pub trait Localizer {
    /// Render `key` with `args`. Unknown keys render as the key itself.
    fn get_string(&self, key: &str, args: &[(&str, &str)]) -> String;
}

/// A string table of `minijinja` templates keyed by string ID.
pub struct StringTable {
    env: Environment<'static>,
}

impl core::fmt::Debug for StringTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StringTable")
            .field("entries", &self.env.templates().count())
            .finish()
    }
}

impl StringTable {
    /// Load the built-in English table.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the embedded table is malformed.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_STRINGS)
    }

    /// Parse a table from a YAML mapping of `key: template`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] if the document is not a string
    /// mapping, or [`CatalogError::Template`] if a value fails to compile.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, String> = serde_yml::from_str(yaml)?;
        let mut env = Environment::new();
        for (key, source) in entries {
            env.add_template_owned(key.clone(), source)
                .map_err(|e| CatalogError::Template {
                    key,
                    message: e.to_string(),
                })?;
        }
        Ok(Self { env })
    }

    /// Read a table from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`], [`CatalogError::Yaml`] or
    /// [`CatalogError::Template`].
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }
}

impl Localizer for StringTable {
    fn get_string(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Ok(template) = self.env.get_template(key) else {
            warn!(key, "missing string table entry");
            return key.to_owned();
        };
        let ctx: BTreeMap<&str, &str> = args.iter().copied().collect();
        template.render(ctx).unwrap_or_else(|e| {
            warn!(key, error = %e, "string table entry failed to render");
            key.to_owned()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_every_rule_key() {
        let table = StringTable::builtin().unwrap();
        for key in [
            GREETING,
            CODEWORDS_SHORT,
            UPLINK_CODE_SHORT,
            ISSUER_UNKNOWN,
            ROUND_END_CODEWORDS,
            ROUND_END_COUNT,
            ROLE_CHANGED,
        ] {
            assert_ne!(table.get_string(key, &[]), key, "missing {key}");
        }
    }

    #[test]
    fn arguments_are_substituted() {
        let table = StringTable::from_yaml("hello: \"Hi {{ name }}!\"").unwrap();
        assert_eq!(table.get_string("hello", &[("name", "Alice")]), "Hi Alice!");
    }

    #[test]
    fn unknown_key_renders_as_key() {
        let table = StringTable::from_yaml("{}").unwrap();
        assert_eq!(table.get_string("no-such-key", &[]), "no-such-key");
    }

    #[test]
    fn markup_is_not_escaped() {
        let table = StringTable::from_yaml("code: \"{{ code }}\"").unwrap();
        assert_eq!(table.get_string("code", &[("code", "A#-<B>")]), "A#-<B>");
    }

    #[test]
    fn broken_template_is_rejected() {
        assert!(matches!(
            StringTable::from_yaml("bad: \"{{ unclosed\""),
            Err(CatalogError::Template { .. })
        ));
    }
}
