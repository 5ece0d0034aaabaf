//! Configuración de `cartera` cargada a partir de `cartera.toml`.
//!
//! La struct [`CarteraConfig`] contiene todos los parámetros configurables.
//! Valores no presentes en el archivo usan defaults sensatos. La variable de
//! entorno `CARTERA_SOURCE_URL` tiene precedencia sobre el archivo.

use std::path::Path;

use serde::Deserialize;

use crate::error::CarteraError;

/// Configuración de nivel superior cargada de `cartera.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CarteraConfig {
    /// URL del índice remoto de asociados.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Latencia fija simulada de la confirmación, en milisegundos.
    #[serde(default = "default_confirm_delay_ms")]
    pub confirm_delay_ms: u64,

    /// Probabilidad de fallo simulado del backend, entre 0 y 1.
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

// URL por defecto: el índice publicado de asociados.
fn default_source_url() -> String {
    crate::api::client::SOURCE_URL.to_string()
}

// Latencia por defecto: 800ms.
fn default_confirm_delay_ms() -> u64 {
    800
}

// Tasa de fallo por defecto: 5%.
fn default_failure_rate() -> f64 {
    0.05
}

impl Default for CarteraConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            confirm_delay_ms: default_confirm_delay_ms(),
            failure_rate: default_failure_rate(),
        }
    }
}

impl CarteraConfig {
    /// Carga la configuración de `cartera.toml` en el directorio actual.
    /// Usa valores por defecto si el archivo no existe.
    pub fn load() -> Result<Self, CarteraError> {
        Self::load_from(Path::new("cartera.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self, CarteraError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<CarteraConfig>(&contents)?
        } else {
            Self::default()
        };

        // La variable de entorno tiene precedencia sobre el archivo para la URL.
        if let Ok(url) = std::env::var("CARTERA_SOURCE_URL")
            && !url.is_empty()
        {
            config.source_url = url;
        }

        if !(0.0..=1.0).contains(&config.failure_rate) {
            return Err(CarteraError::Config(format!(
                "failure_rate debe estar entre 0 y 1, se recibió {}",
                config.failure_rate
            )));
        }

        Ok(config)
    }
}
