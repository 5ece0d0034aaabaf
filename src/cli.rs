//! Interface de línea de comandos de `cartera` basada en clap.
//!
//! Define la struct [`Cli`] con los subcomandos [`Command`] (list, set,
//! states) y la flag global `--fuente`.

use clap::{Parser, Subcommand};

/// cartera — seguimiento del pipeline de crédito de asociados.
#[derive(Debug, Parser)]
#[command(name = "cartera", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// URL del índice de asociados (tiene precedencia sobre cartera.toml).
    #[arg(long, global = true)]
    pub fuente: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lista los asociados, filtrados y ordenados por nombre.
    List {
        /// Estado por el cual filtrar: "Todos" o un estado del pipeline.
        #[arg(long, default_value = "Todos")]
        estado: String,
    },

    /// Cambia el estado de un asociado con confirmación simulada.
    Set {
        /// Id del asociado.
        id: u64,

        /// Estado destino (nombre exacto del estado).
        estado: String,
    },

    /// Muestra la tabla de transiciones permitidas.
    States,
}
