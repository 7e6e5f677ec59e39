//! Command handlers shared by the binary and the integration tests.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use estimator_core::db::{DbConfig, MemoryRepositoryFactory, RepositoryRegistry};
use estimator_core::{
    BudgetSession, EstimateError, EstimateRepository, MaterialRates, NewSavedEstimate,
    RepositoryError, SavedEstimate, WallSpec, compute_plaster,
};
use estimator_data::{budget_document, line_items, plaster_document};
use estimator_db_sqlite::SqliteRepositoryFactory;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::report;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("saved estimates are unavailable: no storage backend is open")]
    PersistenceUnavailable,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Estimate(#[from] EstimateError),
}

/// Registry with every backend this binary ships.
pub fn build_registry() -> RepositoryRegistry {
    RepositoryRegistry::new()
        .with(SqliteRepositoryFactory)
        .with(MemoryRepositoryFactory)
}

/// Where a command's output should go besides the terminal.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub save: bool,
    pub export: Option<PathBuf>,
}

pub struct App {
    repo: Option<Box<dyn EstimateRepository>>,
}

impl App {
    pub fn new(repo: Box<dyn EstimateRepository>) -> Self {
        Self { repo: Some(repo) }
    }

    /// An app that computes but cannot save or list estimates.
    pub fn without_persistence() -> Self {
        Self { repo: None }
    }

    /// Open the configured backend. If it cannot be opened the failure is
    /// logged and the app runs without persistence.
    pub async fn connect(
        registry: &RepositoryRegistry,
        config: &DbConfig,
    ) -> Self {
        debug!("connecting to {} backend", config.backend);
        match registry.create(config).await {
            Ok(repo) => Self::new(repo),
            Err(error) => {
                warn!(backend = %config.backend, %error, "storage unavailable; saving is disabled");
                Self::without_persistence()
            }
        }
    }

    pub fn has_persistence(&self) -> bool {
        self.repo.is_some()
    }

    fn repo(&self) -> Result<&dyn EstimateRepository, AppError> {
        self.repo.as_deref().ok_or(AppError::PersistenceUnavailable)
    }

    pub async fn save(
        &self,
        estimate: NewSavedEstimate,
    ) -> Result<SavedEstimate, AppError> {
        let saved = self.repo()?.save(estimate).await?;
        info!(id = saved.id, kind = saved.kind.as_str(), value = %saved.value, "estimate saved");
        Ok(saved)
    }

    /// Saved estimates, newest first.
    pub async fn history(&self) -> Result<Vec<SavedEstimate>, AppError> {
        Ok(self.repo()?.list_all().await?)
    }

    /// Print the plaster breakdown for `wall`, then export and save as
    /// requested. The breakdown is printed even when saving fails.
    pub async fn run_plaster(
        &self,
        wall: &WallSpec,
        rates: &MaterialRates,
        options: &OutputOptions,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let result = compute_plaster(wall, rates)?;
        let doc = plaster_document(wall, rates, &result);
        write!(out, "{}", report::document_text(&doc))?;

        if let Some(path) = &options.export {
            doc.write_to_file(path)
                .with_context(|| format!("Failed to export document to {}", path.display()))?;
            writeln!(out, "\nDocument written to {}", path.display())?;
        }

        if options.save {
            let saved = self.save(NewSavedEstimate::from_plaster(wall, &result)?).await?;
            writeln!(out, "\nSaved as estimate #{}", saved.id)?;
        }
        Ok(())
    }

    /// Print the budget for the session's items. Saving clears the session.
    pub async fn run_budget(
        &self,
        session: &mut BudgetSession,
        client: &str,
        options: &OutputOptions,
        export_csv: Option<&PathBuf>,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        if session.is_empty() {
            warn!("budget has no line items");
        }
        let budget = session.budget()?;
        let doc = budget_document(client, &budget, session.rates());
        write!(out, "{}", report::document_text(&doc))?;

        if let Some(path) = &options.export {
            doc.write_to_file(path)
                .with_context(|| format!("Failed to export document to {}", path.display()))?;
            writeln!(out, "\nDocument written to {}", path.display())?;
        }

        if let Some(path) = export_csv {
            line_items::export_to_file(path, session.items())
                .with_context(|| format!("Failed to export items to {}", path.display()))?;
            writeln!(out, "\nItems written to {}", path.display())?;
        }

        if options.save {
            let saved = self.save(session.to_saved_estimate(client)?).await?;
            session.clear();
            writeln!(out, "\nSaved as estimate #{}", saved.id)?;
        }
        Ok(())
    }

    pub async fn run_history(
        &self,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let entries = self.history().await?;
        write!(out, "{}", report::history_text(&entries))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use estimator_core::db::MemoryRepository;
    use estimator_core::{BudgetRates, LineItem};
    use pretty_assertions::assert_eq;

    use super::*;

    fn output(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn registry_has_sqlite_and_memory() {
        assert_eq!(build_registry().available_backends(), vec!["memory", "sqlite"]);
    }

    #[tokio::test]
    async fn unknown_backend_degrades_to_no_persistence() {
        let config = DbConfig {
            backend: "postgres".to_string(),
            ..DbConfig::default()
        };

        let app = App::connect(&build_registry(), &config).await;

        assert!(!app.has_persistence());
    }

    #[tokio::test]
    async fn plaster_prints_even_when_save_is_unavailable() {
        let app = App::without_persistence();
        let options = OutputOptions {
            save: true,
            export: None,
        };
        let mut out = Vec::new();

        let err = app
            .run_plaster(&WallSpec::default(), &MaterialRates::default(), &options, &mut out)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::PersistenceUnavailable)
        ));
        assert!(output(out).contains("Estimated total cost: 576.89"));
    }

    #[tokio::test]
    async fn huge_wall_still_prints_its_estimate() {
        let app = App::without_persistence();
        let wall = WallSpec {
            length: 1e15,
            height: 1e15,
            ..WallSpec::default()
        };
        let mut out = Vec::new();

        app.run_plaster(&wall, &MaterialRates::default(), &OutputOptions::default(), &mut out)
            .await
            .expect("finite estimate should print");

        assert!(output(out).contains("Labor cost: 2500000000000"));
    }

    #[tokio::test]
    async fn invalid_wall_is_reported_before_output() {
        let app = App::without_persistence();
        let wall = WallSpec {
            length: -1.0,
            ..WallSpec::default()
        };
        let mut out = Vec::new();

        let err = app
            .run_plaster(&wall, &MaterialRates::default(), &OutputOptions::default(), &mut out)
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<EstimateError>().is_some());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn saving_budget_clears_session() {
        let app = App::new(Box::new(MemoryRepository::new()));
        let mut session = BudgetSession::new(BudgetRates::default()).unwrap();
        session
            .add_item(LineItem::new("Wall", 1.0, "m²", 100.0, 2.0))
            .unwrap();
        let options = OutputOptions {
            save: true,
            export: None,
        };
        let mut out = Vec::new();

        app.run_budget(&mut session, "Casa Silva", &options, None, &mut out)
            .await
            .unwrap();

        assert!(session.is_empty());
        assert!(output(out).contains("Saved as estimate #1"));
        let history = app.history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].description, "Casa Silva");
    }

    #[tokio::test]
    async fn history_without_persistence_is_an_error() {
        let app = App::without_persistence();

        assert!(matches!(
            app.history().await,
            Err(AppError::PersistenceUnavailable)
        ));
    }
}
