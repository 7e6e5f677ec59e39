use std::collections::BTreeMap;

use async_trait::async_trait;

use super::repository::{EstimateRepository, RepositoryError};
use crate::models::EstimateOwner;

/// Which store to open and whose estimates it holds.
///
/// | backend  | connection_string            |
/// |----------|------------------------------|
/// | `sqlite` | `estimates.db`, `:memory:`   |
/// | `memory` | ignored                      |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub backend: String,
    pub connection_string: String,
    pub owner: EstimateOwner,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
            owner: EstimateOwner::default(),
        }
    }
}

/// Opens one kind of store. Backends ship a unit struct implementing this
/// and are looked up by [`backend_name`](Self::backend_name).
#[async_trait]
pub trait RepositoryFactory: Send + Sync {
    fn backend_name(&self) -> &'static str;

    /// Returns a repository whose schema is ready for use.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn EstimateRepository>, RepositoryError>;
}

/// Storage backends known to the application.
#[derive(Default)]
pub struct RepositoryRegistry {
    factories: BTreeMap<&'static str, Box<dyn RepositoryFactory>>,
}

impl RepositoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `factory`; a later factory with the same name wins.
    pub fn register(
        &mut self,
        factory: Box<dyn RepositoryFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(
        mut self,
        factory: impl RepositoryFactory + 'static,
    ) -> Self {
        self.register(Box::new(factory));
        self
    }

    /// Backend names in alphabetical order.
    pub fn available_backends(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Opens the backend named by `config.backend`.
    ///
    /// # Errors
    ///
    /// [`RepositoryError::Configuration`] for an unregistered name, otherwise
    /// whatever the backend reports.
    pub async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn EstimateRepository>, RepositoryError> {
        let Some(factory) = self.factories.get(config.backend.as_str()) else {
            return Err(RepositoryError::Configuration(format!(
                "unknown backend '{}' (expected one of: {})",
                config.backend,
                self.available_backends().join(", ")
            )));
        };
        factory.create(config).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::{DbConfig, EstimateRepository, RepositoryError, RepositoryFactory, RepositoryRegistry};
    use crate::db::memory::MemoryRepository;

    /// Records whether `create` ran.
    struct RecordingFactory {
        name: &'static str,
        called: Arc<AtomicBool>,
    }

    #[async_trait]
    impl RepositoryFactory for RecordingFactory {
        fn backend_name(&self) -> &'static str {
            self.name
        }
        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn EstimateRepository>, RepositoryError> {
            self.called.store(true, Ordering::SeqCst);
            Ok(Box::new(MemoryRepository::new()))
        }
    }

    /// Always returns a `Connection` error.
    struct FailingFactory;

    #[async_trait]
    impl RepositoryFactory for FailingFactory {
        fn backend_name(&self) -> &'static str {
            "failing"
        }
        async fn create(
            &self,
            _config: &DbConfig,
        ) -> Result<Box<dyn EstimateRepository>, RepositoryError> {
            Err(RepositoryError::Connection("intentional failure".to_string()))
        }
    }

    fn recording_factory(name: &'static str) -> (Box<dyn RepositoryFactory>, Arc<AtomicBool>) {
        let flag = Arc::new(AtomicBool::new(false));
        (
            Box::new(RecordingFactory {
                name,
                called: flag.clone(),
            }),
            flag,
        )
    }

    fn config_for(backend: &str) -> DbConfig {
        DbConfig {
            backend: backend.to_string(),
            ..DbConfig::default()
        }
    }

    #[test]
    fn dbconfig_default_is_sqlite_memory_for_default_owner() {
        let cfg = DbConfig::default();
        assert_eq!(cfg.backend, "sqlite");
        assert_eq!(cfg.connection_string, ":memory:");
        assert_eq!(cfg.owner.app_id, "default_app_id");
        assert_eq!(cfg.owner.user_id, "default_user");
    }

    #[test]
    fn new_registry_has_no_backends() {
        assert!(RepositoryRegistry::new().available_backends().is_empty());
    }

    #[test]
    fn available_backends_is_sorted() {
        let mut reg = RepositoryRegistry::new();
        let (f1, _) = recording_factory("sqlite");
        let (f2, _) = recording_factory("memory");
        reg.register(f1);
        reg.register(f2);
        assert_eq!(reg.available_backends(), vec!["memory", "sqlite"]);
    }

    #[test]
    fn with_chains_registrations() {
        let reg = RepositoryRegistry::new()
            .with(FailingFactory)
            .with(crate::db::memory::MemoryRepositoryFactory);

        assert_eq!(reg.available_backends(), vec!["failing", "memory"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = RepositoryRegistry::new();
        let (old, _) = recording_factory("sqlite");
        let (new, _) = recording_factory("sqlite");
        reg.register(old);
        reg.register(new);
        assert_eq!(reg.available_backends(), vec!["sqlite"]);
    }

    #[tokio::test]
    async fn create_calls_only_matching_factory() {
        let mut reg = RepositoryRegistry::new();
        let (sqlite_factory, sqlite_called) = recording_factory("sqlite");
        let (memory_factory, memory_called) = recording_factory("memory");
        reg.register(sqlite_factory);
        reg.register(memory_factory);

        let result = reg.create(&config_for("sqlite")).await;

        assert!(result.is_ok(), "expected Ok, got {:#?}", result.err());
        assert!(sqlite_called.load(Ordering::SeqCst));
        assert!(!memory_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_backend_error_names_requested_and_available() {
        let mut reg = RepositoryRegistry::new();
        let (f, _) = recording_factory("sqlite");
        reg.register(f);

        match reg.create(&config_for("postgres")).await {
            Err(RepositoryError::Configuration(msg)) => {
                assert!(msg.contains("postgres"), "error should name the requested backend");
                assert!(msg.contains("sqlite"), "error should list available backends");
            }
            Err(other) => panic!("expected Configuration error, got {other:#?}"),
            Ok(_) => panic!("expected Configuration error, got a repository"),
        }
    }

    #[tokio::test]
    async fn create_propagates_factory_error() {
        let mut reg = RepositoryRegistry::new();
        reg.register(Box::new(FailingFactory));

        match reg.create(&config_for("failing")).await {
            Err(err) => assert_eq!(
                err,
                RepositoryError::Connection("intentional failure".to_string())
            ),
            Ok(_) => panic!("expected the factory error"),
        }
    }
}
