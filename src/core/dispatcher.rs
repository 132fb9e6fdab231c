//! Dispatcher: logger registration and entry routing

use super::{
    error::Result,
    legacy::LegacyInput,
    log_entry::LogEntry,
    logger::Logger,
    lookup::{CategorySet, LookupRecord, LookupTable},
    metrics::DispatchMetrics,
    options::{Fingerprint, LoggerOptions},
    priority::{Priority, PriorityMask},
    registry::ConfigurationRegistry,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// One logger registration: options plus the filter it applies to
///
/// Deserializable so that a composition root can keep registrations in its
/// own configuration files.
///
/// ```
/// use log_dispatch::LoggerRegistration;
///
/// let reg: LoggerRegistration = serde_json::from_str(
///     r#"{ "options": { "text_file": "deprecated.log" }, "categories": "deprecated" }"#,
/// ).unwrap();
/// assert!(reg.categories.contains("deprecated"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerRegistration {
    pub options: LoggerOptions,
    #[serde(default)]
    pub priorities: PriorityMask,
    #[serde(default)]
    pub categories: CategorySet,
}

impl LoggerRegistration {
    pub fn new(options: LoggerOptions) -> Self {
        Self {
            options,
            priorities: PriorityMask::ALL,
            categories: CategorySet::new(),
        }
    }

    #[must_use]
    pub fn priorities(mut self, priorities: impl Into<PriorityMask>) -> Self {
        self.priorities = priorities.into();
        self
    }

    #[must_use]
    pub fn categories(mut self, categories: impl Into<CategorySet>) -> Self {
        self.categories = categories.into();
        self
    }
}

struct DispatcherState {
    registry: ConfigurationRegistry,
    lookup: LookupTable,
    /// Entries accepted through the legacy adapter, kept for introspection.
    /// Only grows; cleared by `reset`.
    queue: Vec<LogEntry>,
}

/// Routes entries to every registered logger whose filter matches
///
/// All registration, lookup and lazy instantiation happens under one mutex,
/// so a `Dispatcher` can be shared between threads behind an `Arc`. Loggers
/// run while that mutex is held and must not call back into the dispatcher
/// driving them.
///
/// # Example
///
/// ```
/// use log_dispatch::prelude::*;
///
/// let dispatcher = Dispatcher::new();
/// dispatcher.add_logger(
///     LoggerOptions::new().with("logger", "echo"),
///     PriorityMask::ALL & !Priority::Debug,
///     "deprecated",
/// );
///
/// let matched = dispatcher.find_loggers(Priority::Warning, Some("deprecated"));
/// assert_eq!(matched.len(), 1);
/// assert!(dispatcher.find_loggers(Priority::Debug, None).is_empty());
/// ```
pub struct Dispatcher {
    state: Mutex<DispatcherState>,
    metrics: DispatchMetrics,
}

impl Dispatcher {
    /// Empty dispatcher with the built-in logger types
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(ConfigurationRegistry::new())
    }

    /// Empty dispatcher using a prepared type table
    #[must_use]
    pub fn with_registry(mut registry: ConfigurationRegistry) -> Self {
        registry.clear();
        Self {
            state: Mutex::new(DispatcherState {
                registry,
                lookup: LookupTable::new(),
                queue: Vec::new(),
            }),
            metrics: DispatchMetrics::new(),
        }
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Add or replace the constructor used for a logger type
    pub fn register_logger_type<F>(&self, name: &str, factory: F)
    where
        F: Fn(&LoggerOptions) -> Result<Box<dyn Logger>> + Send + Sync + 'static,
    {
        self.state.lock().registry.register_type(name, factory);
    }

    /// Register a logger configuration
    ///
    /// Options are identified by their fingerprint: registering the same
    /// options again replaces the priorities and categories stored for them
    /// instead of adding a second logger. Never fails; the logger type is
    /// only checked once an entry needs the logger.
    pub fn add_logger(
        &self,
        options: LoggerOptions,
        priorities: impl Into<PriorityMask>,
        categories: impl Into<CategorySet>,
    ) -> Fingerprint {
        let fingerprint = options.fingerprint();
        let record = LookupRecord::new(priorities.into(), categories.into());

        tracing::debug!(
            %fingerprint,
            logger_type = %options.logger_type(),
            priorities = %record.priorities,
            "registered logger"
        );

        let mut state = self.state.lock();
        state.registry.store(fingerprint.clone(), options);
        state.lookup.insert(fingerprint.clone(), record);
        fingerprint
    }

    pub fn register(&self, registration: LoggerRegistration) -> Fingerprint {
        self.add_logger(
            registration.options,
            registration.priorities,
            registration.categories,
        )
    }

    /// Route an entry to every matching logger
    ///
    /// Loggers are handed the entry in registration order. The first failure,
    /// including an unknown logger type met during lazy instantiation, is
    /// returned and the remaining loggers are skipped for this entry.
    pub fn add(&self, entry: &LogEntry) -> Result<()> {
        self.add_log_entry(entry)
    }

    /// Build an entry from a bare message and route it
    pub fn add_message(
        &self,
        message: impl Into<String>,
        priority: Priority,
        category: impl AsRef<str>,
    ) -> Result<()> {
        let entry = LogEntry::new(message, priority)?.with_category(category);
        self.add_log_entry(&entry)
    }

    pub fn add_log_entry(&self, entry: &LogEntry) -> Result<()> {
        let mut state = self.state.lock();
        self.metrics.record_dispatched();

        let fingerprints = state
            .lookup
            .find(entry.priority(), Some(entry.category()));

        if fingerprints.is_empty() {
            self.metrics.record_unmatched();
            tracing::trace!(priority = %entry.priority(), category = entry.category(), "no logger matched");
            return Ok(());
        }

        for fingerprint in &fingerprints {
            if let Err(e) = self.deliver(&mut state.registry, fingerprint, entry) {
                self.metrics.record_failure();
                return Err(e);
            }
            self.metrics.record_delivery();
        }

        tracing::trace!(
            priority = %entry.priority(),
            category = entry.category(),
            loggers = fingerprints.len(),
            "dispatched entry"
        );
        Ok(())
    }

    fn deliver(
        &self,
        registry: &mut ConfigurationRegistry,
        fingerprint: &Fingerprint,
        entry: &LogEntry,
    ) -> Result<()> {
        let fresh = !registry.is_instantiated(fingerprint);
        let logger = registry.resolve(fingerprint)?;
        if fresh {
            self.metrics.record_instantiated();
        }
        logger.process(entry)
    }

    /// Accept an entry in the legacy loosely typed form
    ///
    /// Returns `Ok(false)` without queueing or dispatching anything when the
    /// input is neither a mapping nor an entry, or when the mapping carries no
    /// message. Accepted entries are queued and routed like [`add`](Self::add).
    #[deprecated(since = "0.1.0", note = "Build a LogEntry and use add() instead")]
    pub fn add_entry(&self, input: impl Into<LegacyInput>) -> Result<bool> {
        tracing::warn!("Dispatcher::add_entry() is deprecated, use Dispatcher::add() instead");

        let Some(entry) = input.into().into_entry() else {
            return Ok(false);
        };

        self.state.lock().queue.push(entry.clone());
        self.add_log_entry(&entry)?;
        Ok(true)
    }

    /// Fingerprints of the loggers that would receive an entry with this
    /// priority and category, in registration order
    pub fn find_loggers(&self, priority: Priority, category: Option<&str>) -> Vec<Fingerprint> {
        self.state.lock().lookup.find(priority, category)
    }

    /// Snapshot of the stored configurations, in registration order
    pub fn configurations(&self) -> Vec<(Fingerprint, LoggerOptions)> {
        self.state
            .lock()
            .registry
            .configurations()
            .map(|(fingerprint, options)| (fingerprint.clone(), options.clone()))
            .collect()
    }

    /// Snapshot of the lookup table, in registration order
    pub fn lookup(&self) -> Vec<(Fingerprint, LookupRecord)> {
        self.state
            .lock()
            .lookup
            .iter()
            .map(|(fingerprint, record)| (fingerprint.clone(), record.clone()))
            .collect()
    }

    /// Fingerprints whose logger has been built
    pub fn instantiated(&self) -> Vec<Fingerprint> {
        self.state.lock().registry.instantiated()
    }

    /// Entries accepted through [`add_entry`](Self::add_entry)
    ///
    /// Kept for introspection only. The queue grows with every accepted entry
    /// and is cleared only by [`reset`](Self::reset).
    pub fn queue(&self) -> Vec<LogEntry> {
        self.state.lock().queue.clone()
    }

    pub fn flush(&self) -> Result<()> {
        self.state.lock().registry.flush_all()
    }

    /// Discard every registration, cached logger and queued entry
    ///
    /// Logger types registered on this dispatcher are kept.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.registry.clear();
        state.lookup.clear();
        state.queue.clear();
        self.metrics.reset();
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a Dispatcher with a fluent API
///
/// # Example
/// ```
/// use log_dispatch::prelude::*;
///
/// let dispatcher = Dispatcher::builder()
///     .logger(LoggerOptions::new().with("logger", "echo"), PriorityMask::ALL, CategorySet::new())
///     .logger(
///         LoggerOptions::new().with("text_file", "errors.log"),
///         Priority::Error | Priority::Critical,
///         vec!["db", "auth"],
///     )
///     .build();
///
/// assert_eq!(dispatcher.find_loggers(Priority::Error, Some("db")).len(), 2);
/// ```
pub struct DispatcherBuilder {
    registry: ConfigurationRegistry,
    registrations: Vec<LoggerRegistration>,
}

impl DispatcherBuilder {
    /// Create a new builder with the built-in logger types
    pub fn new() -> Self {
        Self {
            registry: ConfigurationRegistry::new(),
            registrations: Vec::new(),
        }
    }

    /// Register a logger configuration
    #[must_use = "builder methods return a new value"]
    pub fn logger(
        mut self,
        options: LoggerOptions,
        priorities: impl Into<PriorityMask>,
        categories: impl Into<CategorySet>,
    ) -> Self {
        self.registrations.push(
            LoggerRegistration::new(options)
                .priorities(priorities)
                .categories(categories),
        );
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn registration(mut self, registration: LoggerRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn registrations(mut self, registrations: impl IntoIterator<Item = LoggerRegistration>) -> Self {
        self.registrations.extend(registrations);
        self
    }

    /// Add or replace the constructor used for a logger type
    #[must_use = "builder methods return a new value"]
    pub fn logger_type<F>(mut self, name: &str, factory: F) -> Self
    where
        F: Fn(&LoggerOptions) -> Result<Box<dyn Logger>> + Send + Sync + 'static,
    {
        self.registry.register_type(name, factory);
        self
    }

    /// Build the dispatcher, registering loggers in the order they were given
    pub fn build(self) -> Dispatcher {
        let dispatcher = Dispatcher::with_registry(self.registry);
        for registration in self.registrations {
            dispatcher.register(registration);
        }
        dispatcher
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}
