use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::pipeline::PipelineStatus;

/// One associate record as served by the upstream index endpoint.
///
/// Field names follow the upstream JSON exactly (`Nombre`, `Identificación`,
/// `estado_pipeline`). `id` arrives as either a JSON number or a numeric
/// string and is coerced to `u64` so later lookups compare correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asociado {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: u64,
    #[serde(rename = "Nombre")]
    pub nombre: String,
    #[serde(rename = "Identificación")]
    pub identificacion: u64,
    #[serde(rename = "estado_pipeline")]
    pub estado: PipelineStatus,
    /// Stamped by the confirmation step on a successful status change.
    #[serde(
        rename = "ultima_actualizacion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub actualizado_en: Option<DateTime<Utc>>,
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
