//! Static transition policy for the credit pipeline.
//!
//! The table below is the single source of truth for which status changes
//! the backend will confirm. It is pure data; no state lives here.

use super::status::PipelineStatus;
use super::status::PipelineStatus::*;

/// The statuses a record may legally move to from `estado`.
///
/// `DesembolsadoFinalizado` has no outgoing edges; see [`transition_allowed`]
/// for how an empty set is interpreted.
pub fn allowed_next(estado: PipelineStatus) -> &'static [PipelineStatus] {
    match estado {
        Prospecto => &[ExpedienteEnConstruccion, PendienteJuridico],
        ExpedienteEnConstruccion => &[PendienteJuridico, Prospecto],
        PendienteJuridico => &[PendienteCierreCredito, PendienteRevisionAbogado],
        PendienteCierreCredito => &[PendienteFirmaLitivo],
        PendienteFirmaLitivo => &[CarteraActiva],
        PendienteRevisionAbogado => &[PendienteCierreCredito, DesembolsadoFinalizado],
        CarteraActiva => &[DesembolsadoFinalizado],
        DesembolsadoFinalizado => &[],
    }
}

/// Whether a change from `current` to `next` passes the policy.
///
/// A self-transition is always allowed and skips validation entirely. An
/// empty allowed-set places no restriction on `next` — this mirrors the
/// upstream policy exactly, so the terminal status currently accepts any
/// outgoing transition.
pub fn transition_allowed(current: PipelineStatus, next: PipelineStatus) -> bool {
    if next == current {
        return true;
    }
    let allowed = allowed_next(current);
    allowed.is_empty() || allowed.contains(&next)
}
