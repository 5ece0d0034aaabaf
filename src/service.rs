//! The associate service: single-fetch lifecycle plus the guarded,
//! optimistic update protocol over the record store.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::api::AsociadosClient;
use crate::backend::ConfirmBackend;
use crate::error::UpdateError;
use crate::pipeline::{PipelineStatus, StatusFilter};
use crate::store::{Snapshot, Store};

/// Generic user-facing message for any fetch failure; the underlying cause
/// is only logged.
pub const FETCH_ERROR_MESSAGE: &str = "No se pudieron cargar los datos de asociados.";

/// Owns the record store and drives every mutation against it.
///
/// The store sits behind a mutex that is never held across an await, so an
/// in-flight confirmation leaves the optimistic write observable to any
/// number of snapshot readers.
pub struct AsociadosService<B> {
    store: Arc<Mutex<Store>>,
    backend: B,
}

impl<B: ConfirmBackend> AsociadosService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::new())),
            backend,
        }
    }

    /// Run the one fetch of the session. On success the store is populated;
    /// on any failure it is emptied and a generic message surfaced, with no
    /// automatic retry.
    pub async fn load(&self, client: &AsociadosClient) {
        match client.fetch_asociados().await {
            Ok(asociados) => self.lock().populate(asociados),
            Err(err) => {
                eprintln!("[fetch] {err}");
                self.lock().fail(FETCH_ERROR_MESSAGE);
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn set_filter(&self, filter: StatusFilter) {
        self.lock().set_filter(filter);
    }

    pub fn is_updating(&self, id: u64) -> bool {
        self.lock().is_updating(id)
    }

    pub fn status_of(&self, id: u64) -> Option<PipelineStatus> {
        self.lock().status_of(id)
    }

    /// Change one record's status with optimistic feedback.
    ///
    /// An unknown `id` is a silent no-op. A second request for an id whose
    /// attempt is still in flight is refused with
    /// [`UpdateError::AttemptInFlight`] before anything is written. Otherwise
    /// the new status is applied immediately, the backend confirms against
    /// the pre-write status, and a failed confirmation restores that status.
    /// The in-flight marker is cleared last in every outcome.
    pub async fn request_status_change(
        &self,
        id: u64,
        next: PipelineStatus,
    ) -> Result<(), UpdateError> {
        let previous = {
            let mut store = self.lock();
            let Some(previous) = store.status_of(id) else {
                return Ok(());
            };
            if !store.begin_update(id) {
                return Err(UpdateError::AttemptInFlight(id));
            }
            // Optimistic write: visible before the backend answers.
            store.set_status(id, next);
            previous
        };

        let attempt = Uuid::new_v4();
        let result = self.backend.confirm(id, previous, next).await;

        let mut store = self.lock();
        match &result {
            Ok(()) => store.stamp_update(id, Utc::now()),
            Err(err) => {
                match err {
                    UpdateError::TransitionRejected { .. } => {
                        eprintln!("[update {attempt}] rejected by policy: {err}");
                    }
                    _ => eprintln!("[update {attempt}] backend failure: {err}"),
                }
                store.set_status(id, previous);
            }
        }
        store.finish_update(id);
        result
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().expect("store lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Asociado;
    use crate::backend::SimulatedBackend;
    use crate::pipeline::PipelineStatus::*;

    use std::time::Duration;
    use tokio::sync::Notify;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn registros() -> Vec<Asociado> {
        vec![
            Asociado {
                id: 1,
                nombre: "Ana".into(),
                identificacion: 100,
                estado: Prospecto,
                actualizado_en: None,
            },
            Asociado {
                id: 2,
                nombre: "Beto".into(),
                identificacion: 200,
                estado: PendienteJuridico,
                actualizado_en: None,
            },
        ]
    }

    fn deterministic_service() -> AsociadosService<SimulatedBackend> {
        let service = AsociadosService::new(SimulatedBackend::new(Duration::ZERO, 0.0));
        service.lock().populate(registros());
        service
    }

    // --- Fetch lifecycle ---

    #[tokio::test]
    async fn load_populates_store_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": "1", "Nombre": "Ana", "Identificación": 100, "estado_pipeline": "Prospecto"},
            ])))
            .mount(&server)
            .await;

        let service = AsociadosService::new(SimulatedBackend::new(Duration::ZERO, 0.0));
        assert!(service.snapshot().is_loading);

        service.load(&AsociadosClient::with_source_url(server.uri())).await;

        let snap = service.snapshot();
        assert!(!snap.is_loading);
        assert!(snap.error.is_none());
        assert_eq!(snap.asociados.len(), 1);
        assert_eq!(snap.asociados[0].id, 1);
    }

    #[tokio::test]
    async fn load_failure_surfaces_error_and_empties_store() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = AsociadosService::new(SimulatedBackend::new(Duration::ZERO, 0.0));
        service.set_filter(StatusFilter::Solo(PendienteJuridico));
        service.load(&AsociadosClient::with_source_url(server.uri())).await;

        let snap = service.snapshot();
        assert!(!snap.is_loading);
        assert_eq!(snap.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
        assert!(snap.asociados.is_empty());

        // Projection stays empty regardless of filter.
        service.set_filter(StatusFilter::Todos);
        assert!(service.snapshot().asociados.is_empty());
    }

    // --- Update protocol ---

    #[tokio::test]
    async fn unknown_id_is_a_silent_noop() {
        let service = deterministic_service();
        let result = service.request_status_change(99, CarteraActiva).await;

        assert_eq!(result, Ok(()));
        assert!(!service.is_updating(99));
        assert_eq!(service.status_of(1), Some(Prospecto));
        assert_eq!(service.status_of(2), Some(PendienteJuridico));
    }

    #[tokio::test]
    async fn allowed_change_sticks_and_is_stamped() {
        let service = deterministic_service();
        let result = service
            .request_status_change(2, PendienteCierreCredito)
            .await;

        assert_eq!(result, Ok(()));
        assert_eq!(service.status_of(2), Some(PendienteCierreCredito));
        assert!(!service.is_updating(2));

        let snap = service.snapshot();
        let beto = snap.asociados.iter().find(|a| a.id == 2).unwrap();
        assert!(beto.actualizado_en.is_some());
    }

    #[tokio::test]
    async fn rejected_change_rolls_back() {
        let service = deterministic_service();
        let err = service
            .request_status_change(1, CarteraActiva)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            UpdateError::TransitionRejected {
                from: Prospecto,
                to: CarteraActiva,
            }
        );
        assert_eq!(service.status_of(1), Some(Prospecto));
        assert!(!service.is_updating(1));

        let snap = service.snapshot();
        let ana = snap.asociados.iter().find(|a| a.id == 1).unwrap();
        assert!(ana.actualizado_en.is_none());
    }

    #[tokio::test]
    async fn backend_failure_rolls_back() {
        let service = AsociadosService::new(SimulatedBackend::new(Duration::ZERO, 1.0));
        service.lock().populate(registros());

        let err = service
            .request_status_change(2, PendienteCierreCredito)
            .await
            .unwrap_err();

        assert_eq!(err, UpdateError::BackendUnavailable);
        assert_eq!(service.status_of(2), Some(PendienteJuridico));
        assert!(!service.is_updating(2));
    }

    #[tokio::test]
    async fn self_transition_is_never_rejected() {
        let service = deterministic_service();
        let result = service.request_status_change(1, Prospecto).await;
        assert_eq!(result, Ok(()));
        assert_eq!(service.status_of(1), Some(Prospecto));
    }

    // Backend that holds the confirmation open until released, so the test
    // can observe the store mid-attempt.
    struct GatedBackend {
        gate: Arc<Notify>,
    }

    impl ConfirmBackend for GatedBackend {
        async fn confirm(
            &self,
            _id: u64,
            _previous: PipelineStatus,
            _next: PipelineStatus,
        ) -> Result<(), UpdateError> {
            self.gate.notified().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn optimistic_write_is_visible_while_pending() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(AsociadosService::new(GatedBackend { gate: gate.clone() }));
        service.lock().populate(registros());

        let task = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .request_status_change(2, PendienteCierreCredito)
                    .await
            })
        };
        tokio::task::yield_now().await;

        // Before the confirmation resolves: new status projected, id marked.
        let snap = service.snapshot();
        let beto = snap.asociados.iter().find(|a| a.id == 2).unwrap();
        assert_eq!(beto.estado, PendienteCierreCredito);
        assert_eq!(snap.updating, vec![2]);
        assert!(service.is_updating(2));

        // A second request for the same id is refused without touching state.
        let err = service
            .request_status_change(2, PendienteRevisionAbogado)
            .await
            .unwrap_err();
        assert_eq!(err, UpdateError::AttemptInFlight(2));
        assert_eq!(service.status_of(2), Some(PendienteCierreCredito));

        gate.notify_one();
        task.await.unwrap().unwrap();

        assert_eq!(service.status_of(2), Some(PendienteCierreCredito));
        assert!(!service.is_updating(2));
        assert!(service.snapshot().updating.is_empty());
    }

    #[tokio::test]
    async fn other_records_can_update_while_one_is_pending() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(AsociadosService::new(GatedBackend { gate: gate.clone() }));
        service.lock().populate(registros());

        let task = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .request_status_change(2, PendienteCierreCredito)
                    .await
            })
        };
        tokio::task::yield_now().await;

        let second = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .request_status_change(1, ExpedienteEnConstruccion)
                    .await
            })
        };
        tokio::task::yield_now().await;
        assert_eq!(service.snapshot().updating, vec![1, 2]);

        gate.notify_one();
        gate.notify_one();
        task.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        assert_eq!(service.status_of(1), Some(ExpedienteEnConstruccion));
        assert_eq!(service.status_of(2), Some(PendienteCierreCredito));
        assert!(service.snapshot().updating.is_empty());
    }
}
