use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::config::RegistryConfig;
use crate::error::{Result, SelectableError};
use crate::namespace::{Candidate, Namespace};
use crate::selector::Selector;

/// A discovered candidate and the selectors it answers to, already folded.
#[derive(Debug, Clone)]
pub struct Selection {
    candidate: Arc<dyn Candidate>,
    selectors: Vec<Selector>,
}

impl Selection {
    pub fn candidate(&self) -> &Arc<dyn Candidate> {
        &self.candidate
    }

    pub fn selectors(&self) -> &[Selector] {
        self.selectors.as_slice()
    }

    pub fn matches(&self, query: &Selector) -> bool {
        self.selectors.contains(query)
    }
}

/// Qualified candidate name to selection, in namespace order.
pub type Index = IndexMap<String, Selection>;

/// Resolves selectors to the candidate in a namespace that declares them.
///
/// The index is built from the namespace on first use and kept for the
/// lifetime of the registry. When two candidates declare the same selector
/// the one defined first in the namespace wins.
#[derive(Debug)]
pub struct Registry {
    namespace: Arc<Namespace>,
    config: RegistryConfig,
    index: OnceLock<Index>,
    build_lock: Mutex<()>,
}

impl Registry {
    pub fn new(namespace: impl Into<Arc<Namespace>>) -> Self {
        Self::with_config(namespace, RegistryConfig::default())
    }

    pub fn with_config(namespace: impl Into<Arc<Namespace>>, config: RegistryConfig) -> Self {
        Self {
            namespace: namespace.into(),
            config,
            index: OnceLock::new(),
            build_lock: Mutex::new(()),
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn case_fold(&self) -> bool {
        self.config.case_fold
    }

    /// Every selectable candidate with its declared selectors.
    ///
    /// A failed build is not cached, so a misconfigured namespace reports the
    /// same error on every call.
    pub fn selectable(&self) -> Result<&Index> {
        if let Some(index) = self.index.get() {
            return Ok(index);
        }
        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(index) = self.index.get() {
            return Ok(index);
        }
        let index = self.build_index()?;
        Ok(self.index.get_or_init(|| index))
    }

    /// All declared selectors in candidate order. Duplicates are kept.
    pub fn selectors(&self) -> Result<Vec<&Selector>> {
        Ok(self
            .selectable()?
            .values()
            .flat_map(|selection| selection.selectors.iter())
            .collect())
    }

    pub fn is_selectable(&self, query: &Selector) -> Result<bool> {
        let query = query.folded(self.case_fold());
        Ok(self
            .selectors()?
            .into_iter()
            .any(|selector| selector == query.as_ref()))
    }

    pub fn select(&self, query: &Selector) -> Result<Arc<dyn Candidate>> {
        let folded = query.folded(self.case_fold());
        self.selectable()?
            .values()
            .find(|selection| selection.matches(&folded))
            .map(|selection| Arc::clone(&selection.candidate))
            .ok_or_else(|| SelectableError::Unselectable(query.to_string()))
    }

    fn build_index(&self) -> Result<Index> {
        let mut index = Index::new();
        for (name, member) in self.namespace.members() {
            let Some(candidate) = member.as_candidate() else {
                trace!(member = name, "skipping constant");
                continue;
            };
            let Some(declared) = candidate.selectable_for() else {
                trace!(member = name, "skipping type without selectable_for");
                continue;
            };
            let qualified = self.namespace.qualify(name);
            if declared.as_list().is_none() {
                warn!(candidate = %qualified, declared = %declared, "selectable_for is not an array");
                return Err(SelectableError::not_an_array(&qualified));
            }
            // Nested lists are spliced in, so every stored selector is a leaf.
            let mut leaves = Vec::new();
            declared.flatten_into(&mut leaves);
            let selectors = leaves
                .into_iter()
                .map(|selector| selector.into_folded(self.case_fold()))
                .collect();
            index.insert(
                qualified,
                Selection {
                    candidate: Arc::clone(candidate),
                    selectors,
                },
            );
        }
        debug!(
            namespace = self.namespace.name(),
            candidates = index.len(),
            selectors = index.values().map(|selection| selection.selectors.len()).sum::<usize>(),
            "built selectable index"
        );
        Ok(index)
    }
}
