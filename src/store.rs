//! In-memory record store and its filtered, sorted projection.
//!
//! The store is populated exactly once by the fetch lifecycle and afterwards
//! mutated only through the update protocol in [`crate::service`]. The
//! projection is a pure function of the records and the selected filter.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::Asociado;
use crate::pipeline::{PipelineStatus, StatusFilter};

/// Lifecycle of the single fetch that seeds the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Owns the associate list, the selected filter and the set of ids with an
/// update attempt in flight.
#[derive(Debug)]
pub struct Store {
    asociados: Vec<Asociado>,
    load: LoadState,
    filter: StatusFilter,
    en_curso: HashSet<u64>,
}

impl Store {
    /// A fresh store; the fetch is considered in flight from the start.
    pub fn new() -> Self {
        Self {
            asociados: Vec::new(),
            load: LoadState::Loading,
            filter: StatusFilter::Todos,
            en_curso: HashSet::new(),
        }
    }

    /// Seed the store after a successful fetch.
    pub fn populate(&mut self, asociados: Vec<Asociado>) {
        self.asociados = asociados;
        self.load = LoadState::Ready;
    }

    /// Record a fetch failure: the record set is replaced wholesale by an
    /// empty one and the user-facing message is kept.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.asociados.clear();
        self.load = LoadState::Failed(message.into());
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    pub fn status_of(&self, id: u64) -> Option<PipelineStatus> {
        self.asociados.iter().find(|a| a.id == id).map(|a| a.estado)
    }

    pub fn set_status(&mut self, id: u64, estado: PipelineStatus) {
        if let Some(asociado) = self.asociados.iter_mut().find(|a| a.id == id) {
            asociado.estado = estado;
        }
    }

    /// Stamp the last-update time after a confirmed change.
    pub fn stamp_update(&mut self, id: u64, at: DateTime<Utc>) {
        if let Some(asociado) = self.asociados.iter_mut().find(|a| a.id == id) {
            asociado.actualizado_en = Some(at);
        }
    }

    /// Mark an update attempt for `id` as in flight. Returns `false` when an
    /// attempt is already pending, in which case nothing changes.
    pub fn begin_update(&mut self, id: u64) -> bool {
        self.en_curso.insert(id)
    }

    /// Clear the in-flight marker. Called exactly once per attempt, after
    /// resolution.
    pub fn finish_update(&mut self, id: u64) {
        self.en_curso.remove(&id);
    }

    pub fn is_updating(&self, id: u64) -> bool {
        self.en_curso.contains(&id)
    }

    /// Owned view of the store for the consuming side: the projected list
    /// plus the loading flag, error message, filter and in-flight ids.
    pub fn snapshot(&self) -> Snapshot {
        let mut updating: Vec<u64> = self.en_curso.iter().copied().collect();
        updating.sort_unstable();
        Snapshot {
            asociados: project(&self.asociados, self.filter),
            is_loading: self.load == LoadState::Loading,
            error: match &self.load {
                LoadState::Failed(message) => Some(message.clone()),
                _ => None,
            },
            filter: self.filter,
            updating,
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter and sort the records for display.
///
/// Keeps every record for `Todos`, otherwise only exact status matches, then
/// sorts ascending by uppercase-normalized name. The sort is stable, so
/// records with equal names keep their original relative order. Never
/// mutates its input.
pub fn project(asociados: &[Asociado], filter: StatusFilter) -> Vec<Asociado> {
    let mut seleccion: Vec<Asociado> = asociados
        .iter()
        .filter(|a| filter.matches(a.estado))
        .cloned()
        .collect();
    seleccion.sort_by(|a, b| a.nombre.to_uppercase().cmp(&b.nombre.to_uppercase()));
    seleccion
}

/// What the view consumes on every render.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub asociados: Vec<Asociado>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub filter: StatusFilter,
    pub updating: Vec<u64>,
}
