//! Configuration registry and lazy logger instantiation

use super::{
    error::{LoggerError, Result},
    logger::{Logger, LoggerFactory},
    options::{Fingerprint, LoggerOptions},
};
use indexmap::IndexMap;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// Stored logger options, the type-name table and the instantiated loggers
///
/// Loggers are only built when [`resolve`](ConfigurationRegistry::resolve)
/// first asks for their fingerprint, and are cached from then on.
pub struct ConfigurationRegistry {
    configurations: IndexMap<Fingerprint, LoggerOptions>,
    loggers: HashMap<Fingerprint, Box<dyn Logger>>,
    factories: HashMap<String, LoggerFactory>,
}

impl ConfigurationRegistry {
    /// Registry with the built-in logger types
    pub fn new() -> Self {
        let mut registry = Self::empty();
        crate::loggers::register_builtin(&mut registry);
        registry
    }

    /// Registry without any logger types
    pub fn empty() -> Self {
        Self {
            configurations: IndexMap::new(),
            loggers: HashMap::new(),
            factories: HashMap::new(),
        }
    }

    /// Add or replace the constructor for a logger type
    ///
    /// Type names are matched case-insensitively.
    pub fn register_type<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&LoggerOptions) -> Result<Box<dyn Logger>> + Send + Sync + 'static,
    {
        self.register_factory(name, Arc::new(factory));
    }

    pub fn register_factory(&mut self, name: &str, factory: LoggerFactory) {
        self.factories.insert(name.trim().to_lowercase(), factory);
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.factories.contains_key(&name.trim().to_lowercase())
    }

    /// Logger type names known to this registry, sorted
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Store options under their fingerprint, overwriting in place
    pub fn store(&mut self, fingerprint: Fingerprint, options: LoggerOptions) {
        self.configurations.insert(fingerprint, options);
    }

    pub fn options(&self, fingerprint: &Fingerprint) -> Option<&LoggerOptions> {
        self.configurations.get(fingerprint)
    }

    /// Stored configurations in registration order
    pub fn configurations(&self) -> impl Iterator<Item = (&Fingerprint, &LoggerOptions)> {
        self.configurations.iter()
    }

    pub fn is_instantiated(&self, fingerprint: &Fingerprint) -> bool {
        self.loggers.contains_key(fingerprint)
    }

    /// Fingerprints with a cached logger, in registration order
    pub fn instantiated(&self) -> Vec<Fingerprint> {
        self.configurations
            .keys()
            .filter(|fingerprint| self.loggers.contains_key(*fingerprint))
            .cloned()
            .collect()
    }

    /// Return the cached logger for `fingerprint`, building it on first use
    pub fn resolve(&mut self, fingerprint: &Fingerprint) -> Result<&mut Box<dyn Logger>> {
        match self.loggers.entry(fingerprint.clone()) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => {
                let logger =
                    Self::instantiate(&self.configurations, &self.factories, fingerprint)?;
                Ok(slot.insert(logger))
            }
        }
    }

    fn instantiate(
        configurations: &IndexMap<Fingerprint, LoggerOptions>,
        factories: &HashMap<String, LoggerFactory>,
        fingerprint: &Fingerprint,
    ) -> Result<Box<dyn Logger>> {
        let options = configurations.get(fingerprint).ok_or_else(|| {
            LoggerError::other(format!("No logger configuration for fingerprint {}", fingerprint))
        })?;

        let logger_type = options.logger_type();
        let factory = factories
            .get(&logger_type)
            .ok_or_else(|| LoggerError::unknown_logger_type(&logger_type))?;

        let logger = factory(options)?;
        tracing::debug!(%fingerprint, %logger_type, "instantiated logger");
        Ok(logger)
    }

    /// Flush every instantiated logger, stopping at the first failure
    pub fn flush_all(&mut self) -> Result<()> {
        for logger in self.loggers.values_mut() {
            logger.flush()?;
        }
        Ok(())
    }

    /// Drop all configurations and cached loggers; the type table is kept
    pub fn clear(&mut self) {
        self.configurations.clear();
        self.loggers.clear();
    }
}

impl Default for ConfigurationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogEntry, Priority};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NullLogger;

    impl Logger for NullLogger {
        fn process(&mut self, _entry: &LogEntry) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "null"
        }
    }

    #[test]
    fn test_builtin_types() {
        let registry = ConfigurationRegistry::new();
        for name in ["echo", "formattedtext", "w3c", "json"] {
            assert!(registry.has_type(name), "missing {}", name);
        }
        assert!(!registry.has_type("database"));
        assert!(ConfigurationRegistry::empty().type_names().is_empty());
    }

    #[test]
    fn test_resolve_is_lazy_and_cached() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);

        let mut registry = ConfigurationRegistry::empty();
        registry.register_type("Null", move |_options| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(NullLogger))
        });

        let options = LoggerOptions::new().with("logger", "null");
        let fingerprint = options.fingerprint();
        registry.store(fingerprint.clone(), options);

        assert_eq!(built.load(Ordering::SeqCst), 0);
        assert!(!registry.is_instantiated(&fingerprint));

        let entry = LogEntry::new("x", Priority::Info).unwrap();
        registry.resolve(&fingerprint).unwrap().process(&entry).unwrap();
        registry.resolve(&fingerprint).unwrap().process(&entry).unwrap();

        assert_eq!(built.load(Ordering::SeqCst), 1);
        assert_eq!(registry.instantiated(), vec![fingerprint]);
    }

    #[test]
    fn test_unknown_type() {
        let mut registry = ConfigurationRegistry::new();
        let options = LoggerOptions::new().with("logger", "foobar");
        let fingerprint = options.fingerprint();
        registry.store(fingerprint.clone(), options);

        let err = registry.resolve(&fingerprint).err().expect("unknown type must fail");
        match err {
            LoggerError::UnknownLoggerType { logger_type } => assert_eq!(logger_type, "foobar"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(!registry.is_instantiated(&fingerprint));
    }

    #[test]
    fn test_clear_keeps_types() {
        let mut registry = ConfigurationRegistry::new();
        let options = LoggerOptions::new().with("logger", "echo");
        registry.store(options.fingerprint(), options);
        registry.clear();

        assert_eq!(registry.configurations().count(), 0);
        assert!(registry.has_type("echo"));
    }
}
