//! Shared engine handle with atomic catalog reload.

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::engine::DiagnosisEngine;
use crate::error::Result;
use log::{info, warn};
use std::sync::{Arc, PoisonError, RwLock};

/// Cloneable handle to the engine currently in service.
///
/// Readers take a snapshot with [`EngineHandle::current`]; a reload never
/// affects requests already holding one.
///
/// # Example
///
/// ```
/// use symptom_dx::catalog::{Catalog, Condition};
/// use symptom_dx::engine::DiagnosisEngine;
/// use symptom_dx::registry::EngineHandle;
///
/// let handle = EngineHandle::new(DiagnosisEngine::with_reference_catalog().unwrap());
/// let before = handle.current();
///
/// let smaller = Catalog::new(vec![
///     Condition::new("Migraine", &["headache", "nausea"], 1.4),
///     Condition::new("Common Cold", &["cough", "sneezing"], 1.0),
/// ]).unwrap();
/// handle.reload(smaller).unwrap();
///
/// assert_eq!(before.catalog().len(), 15);
/// assert_eq!(handle.current().catalog().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EngineHandle {
    inner: Arc<RwLock<Arc<DiagnosisEngine>>>,
}

impl EngineHandle {
    /// Puts `engine` in service.
    pub fn new(engine: DiagnosisEngine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    /// Snapshot of the engine in service.
    pub fn current(&self) -> Arc<DiagnosisEngine> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Retrains on `catalog` with the current config and swaps it in.
    ///
    /// # Errors
    ///
    /// Whatever [`DiagnosisEngine::new`] reports for the new catalog.
    pub fn reload(&self, catalog: Catalog) -> Result<()> {
        let config = self.current().config().clone();
        self.reload_with(catalog, config)
    }

    /// Builds an engine from `catalog` and `config` and swaps it in.
    ///
    /// The new engine is built without holding the lock. On failure the
    /// previous engine stays in service.
    ///
    /// # Errors
    ///
    /// Whatever [`DiagnosisEngine::new`] reports.
    pub fn reload_with(&self, catalog: Catalog, config: EngineConfig) -> Result<()> {
        let engine = match DiagnosisEngine::new(catalog, config) {
            Ok(engine) => engine,
            Err(e) => {
                warn!("engine reload rejected, keeping current engine: {e}");
                return Err(e);
            }
        };
        let n_conditions = engine.catalog().len();
        let n_symptoms = engine.universe().len();

        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(engine);
        drop(guard);

        info!("engine reloaded: {n_conditions} conditions, {n_symptoms} symptoms");
        Ok(())
    }
}
