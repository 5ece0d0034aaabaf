use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The eight stages an associate moves through in the credit pipeline.
///
/// Serialized with the exact wire strings the upstream endpoint uses
/// (Spanish, including accents), so the enum doubles as the wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineStatus {
    #[serde(rename = "Prospecto")]
    Prospecto,
    #[serde(rename = "Expediente en Construcción")]
    ExpedienteEnConstruccion,
    #[serde(rename = "Pendiente Jurídico")]
    PendienteJuridico,
    #[serde(rename = "Pendiente Cierre de Crédito")]
    PendienteCierreCredito,
    #[serde(rename = "Pendiente Firma y Litivo")]
    PendienteFirmaLitivo,
    #[serde(rename = "Pendiente Revisión Abogado")]
    PendienteRevisionAbogado,
    #[serde(rename = "Cartera Activa")]
    CarteraActiva,
    #[serde(rename = "Desembolsado/Finalizado")]
    DesembolsadoFinalizado,
}

/// Every pipeline status, in pipeline order. Shown per record so the user can
/// pick any target status.
pub const TODOS_LOS_ESTADOS: [PipelineStatus; 8] = [
    PipelineStatus::Prospecto,
    PipelineStatus::ExpedienteEnConstruccion,
    PipelineStatus::PendienteJuridico,
    PipelineStatus::PendienteCierreCredito,
    PipelineStatus::PendienteFirmaLitivo,
    PipelineStatus::PendienteRevisionAbogado,
    PipelineStatus::CarteraActiva,
    PipelineStatus::DesembolsadoFinalizado,
];

/// Curated subset offered by the global filter control (plus the `Todos`
/// sentinel, which lives on [`StatusFilter`]).
pub const OPCIONES_FILTRO: [PipelineStatus; 4] = [
    PipelineStatus::Prospecto,
    PipelineStatus::ExpedienteEnConstruccion,
    PipelineStatus::PendienteJuridico,
    PipelineStatus::PendienteCierreCredito,
];

impl PipelineStatus {
    /// The wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Prospecto => "Prospecto",
            PipelineStatus::ExpedienteEnConstruccion => "Expediente en Construcción",
            PipelineStatus::PendienteJuridico => "Pendiente Jurídico",
            PipelineStatus::PendienteCierreCredito => "Pendiente Cierre de Crédito",
            PipelineStatus::PendienteFirmaLitivo => "Pendiente Firma y Litivo",
            PipelineStatus::PendienteRevisionAbogado => "Pendiente Revisión Abogado",
            PipelineStatus::CarteraActiva => "Cartera Activa",
            PipelineStatus::DesembolsadoFinalizado => "Desembolsado/Finalizado",
        }
    }
}

impl fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the known pipeline statuses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown pipeline status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for PipelineStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        TODOS_LOS_ESTADOS
            .into_iter()
            .find(|estado| estado.as_str() == trimmed)
            .ok_or_else(|| ParseStatusError(trimmed.to_string()))
    }
}

/// Filter selection for the projected list: everything, or one exact status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    Todos,
    Solo(PipelineStatus),
}

impl StatusFilter {
    /// Whether a record with the given status survives this filter.
    /// Matching is exact and case-sensitive.
    pub fn matches(&self, estado: PipelineStatus) -> bool {
        match self {
            StatusFilter::Todos => true,
            StatusFilter::Solo(wanted) => *wanted == estado,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::Todos => f.write_str("Todos"),
            StatusFilter::Solo(estado) => estado.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("todos") {
            return Ok(StatusFilter::Todos);
        }
        PipelineStatus::from_str(s).map(StatusFilter::Solo)
    }
}
