//! Character-substitution transforms applied to whole files.
//!
//! The editor never calls a transform directly. It holds a boxed
//! [`CipherModule`] resolved once at session start through a
//! [`CipherRegistry`]; failing to resolve the configured module is fatal to
//! startup, never a per-call error.
//!
//! The registry ships one built-in module, the 26-letter rotation cipher
//! ([`RotationCipher`]). Additional modules can be registered under a name
//! before resolution, which is how tests and embedders swap implementations.

use thiserror::Error;
use tracing::{debug, info, warn};

mod rotation;
pub use rotation::RotationCipher;

/// Name under which [`RotationCipher`] is registered.
pub const DEFAULT_MODULE: &str = "rotation";

/// A named transform exposing an `encrypt`/`decrypt` pair keyed by an integer.
pub trait CipherModule: Send + Sync {
    /// Stable identifier for logs and diagnostics.
    fn name(&self) -> &'static str;
    fn encrypt(&self, text: &str, key: i64) -> String;
    fn decrypt(&self, text: &str, key: i64) -> String;

    /// Transform one raw file line. Files are not required to be UTF-8.
    ///
    /// The default routes valid UTF-8 through [`CipherModule::encrypt`] and
    /// decodes anything else lossily first. Modules that work on bytes
    /// override this to pass undecodable bytes through untouched.
    fn encrypt_bytes(&self, line: &[u8], key: i64) -> Vec<u8> {
        through_text(line, |text| self.encrypt(text, key))
    }

    fn decrypt_bytes(&self, line: &[u8], key: i64) -> Vec<u8> {
        through_text(line, |text| self.decrypt(text, key))
    }
}

fn through_text(line: &[u8], f: impl FnOnce(&str) -> String) -> Vec<u8> {
    match std::str::from_utf8(line) {
        Ok(text) => f(text).into_bytes(),
        Err(e) => {
            warn!(target: "cipher", valid_up_to = e.valid_up_to(), "lossy_line_decode");
            f(&String::from_utf8_lossy(line)).into_bytes()
        }
    }
}

/// Direction of a whole-file transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    pub fn apply(self, module: &dyn CipherModule, text: &str, key: i64) -> String {
        match self {
            Direction::Encrypt => module.encrypt(text, key),
            Direction::Decrypt => module.decrypt(text, key),
        }
    }

    pub fn apply_bytes(self, module: &dyn CipherModule, line: &[u8], key: i64) -> Vec<u8> {
        match self {
            Direction::Encrypt => module.encrypt_bytes(line, key),
            Direction::Decrypt => module.decrypt_bytes(line, key),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModuleLoadError {
    #[error("cipher module `{0}` not found")]
    UnknownModule(String),
    #[error("cipher module `{module}` does not provide `{symbol}`")]
    MissingSymbol { module: String, symbol: &'static str },
}

type Factory = fn() -> Box<dyn CipherModule>;

/// Name -> constructor table consulted once at session start.
pub struct CipherRegistry {
    entries: Vec<(String, Option<Factory>)>,
}

impl std::fmt::Debug for CipherRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherRegistry")
            .field(
                "modules",
                &self.entries.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for CipherRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl CipherRegistry {
    /// Registry with no modules at all.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry holding the rotation cipher under `rotation` and `caesar`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(DEFAULT_MODULE, || Box::new(RotationCipher));
        registry.register("caesar", || Box::new(RotationCipher));
        registry
    }

    /// Register (or replace) a module constructor under `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: Factory) {
        self.insert(name.into(), Some(factory));
    }

    /// Declare `name` without a constructor. Resolving it fails with
    /// [`ModuleLoadError::MissingSymbol`], mirroring a module that loads but
    /// lacks its entry points.
    pub fn declare(&mut self, name: impl Into<String>) {
        self.insert(name.into(), None);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Resolve `name` into a ready-to-use module.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn CipherModule>, ModuleLoadError> {
        let wanted = name.trim().to_ascii_lowercase();
        let Some((_, factory)) = self.entries.iter().find(|(n, _)| *n == wanted) else {
            debug!(target: "cipher", module = name, "module_not_found");
            return Err(ModuleLoadError::UnknownModule(name.to_string()));
        };
        let Some(factory) = factory else {
            return Err(ModuleLoadError::MissingSymbol {
                module: wanted,
                symbol: "encrypt",
            });
        };
        let module = factory();
        info!(target: "cipher", requested = name, module = module.name(), "module_resolved");
        Ok(module)
    }

    fn insert(&mut self, name: String, factory: Option<Factory>) {
        let name = name.to_ascii_lowercase();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = factory,
            None => self.entries.push((name, factory)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl CipherModule for Upper {
        fn name(&self) -> &'static str {
            "upper"
        }
        fn encrypt(&self, text: &str, _key: i64) -> String {
            text.to_uppercase()
        }
        fn decrypt(&self, text: &str, _key: i64) -> String {
            text.to_lowercase()
        }
    }

    #[test]
    fn builtins_resolve_case_insensitively() {
        let registry = CipherRegistry::with_builtins();
        assert_eq!(registry.resolve("rotation").unwrap().name(), "rotation");
        assert_eq!(registry.resolve(" Caesar ").unwrap().name(), "rotation");
    }

    #[test]
    fn unknown_module_fails_to_load() {
        let registry = CipherRegistry::with_builtins();
        let err = registry.resolve("lllllb4").err().unwrap();
        assert_eq!(err, ModuleLoadError::UnknownModule("lllllb4".into()));
    }

    #[test]
    fn declared_module_without_constructor_is_missing_symbol() {
        let mut registry = CipherRegistry::empty();
        registry.declare("broken");
        assert!(matches!(
            registry.resolve("broken"),
            Err(ModuleLoadError::MissingSymbol { .. })
        ));
    }

    #[test]
    fn registering_replaces_existing_entry() {
        let mut registry = CipherRegistry::with_builtins();
        registry.register("rotation", || Box::new(Upper));
        let module = registry.resolve("rotation").unwrap();
        assert_eq!(module.encrypt("abc", 1), "ABC");
        assert_eq!(registry.names().filter(|n| *n == "rotation").count(), 1);
    }

    #[test]
    fn default_byte_transform_decodes_lossily() {
        assert_eq!(Upper.encrypt_bytes(b"abc", 0), b"ABC".to_vec());
        assert_eq!(
            Upper.encrypt_bytes(b"caf\xe9", 0),
            "CAF\u{FFFD}".as_bytes().to_vec()
        );
    }

    #[test]
    fn direction_dispatches_to_module() {
        let module = RotationCipher;
        assert_eq!(Direction::Encrypt.apply(&module, "abc", 1), "bcd");
        assert_eq!(Direction::Decrypt.apply(&module, "bcd", 1), "abc");
        assert_eq!(Direction::Encrypt.apply_bytes(&module, b"a\xe9", 1), b"b\xe9".to_vec());
    }
}
