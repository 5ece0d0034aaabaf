//! Salida de terminal de `cartera` — tarjetas de asociados y spinner de
//! confirmación.
//!
//! Usa la crate `indicatif` para el spinner de progreso y `console` para la
//! estilización con colores. [`UpdateProgress`] acompaña visualmente un
//! intento de cambio de estado mientras la confirmación está en vuelo.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::pipeline::{self, OPCIONES_FILTRO, PipelineStatus, TODOS_LOS_ESTADOS};
use crate::store::Snapshot;

/// Indicador visual del intento de actualización de un asociado.
pub struct UpdateProgress {
    // Spinner de indicatif.
    pb: ProgressBar,
    // Estilo verde para confirmaciones.
    green: Style,
    // Estilo rojo para reversiones.
    red: Style,
}

impl UpdateProgress {
    /// Inicia el spinner para el intento `id`: `from` → `to`.
    pub fn start(id: u64, from: PipelineStatus, to: PipelineStatus) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message(format!("Confirmando asociado {id}: {from} → {to}"));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
        }
    }

    /// Cierra el spinner con el estado confirmado.
    pub fn success(self, estado: PipelineStatus) {
        self.pb.finish_with_message(format!(
            "{} Estado confirmado: {estado}",
            self.green.apply_to("✔")
        ));
    }

    /// Cierra el spinner con el aviso de reversión al estado anterior.
    pub fn rolled_back(self, estado: PipelineStatus) {
        self.pb.finish_with_message(format!(
            "{} Fallo al actualizar; cambio revertido a {estado}",
            self.red.apply_to("✖")
        ));
    }
}

/// Imprime la lista proyectada de asociados como tarjetas.
pub fn print_lista(snapshot: &Snapshot) {
    if let Some(error) = &snapshot.error {
        println!("{}", Style::new().red().bold().apply_to(error));
        return;
    }

    let bold = Style::new().bold();
    let cyan = Style::new().cyan();
    let dim = Style::new().dim();

    println!(
        "{} (filtro: {})",
        bold.apply_to("Lista de Asociados"),
        snapshot.filter
    );
    let opciones: Vec<&str> = OPCIONES_FILTRO.iter().map(|e| e.as_str()).collect();
    println!(
        "  {}",
        dim.apply_to(format!("filtros disponibles: Todos, {}", opciones.join(", ")))
    );

    if snapshot.asociados.is_empty() {
        println!(
            "No se encontraron asociados en el estado: {}",
            snapshot.filter
        );
        return;
    }

    for asociado in &snapshot.asociados {
        println!(
            "  {} (id {}, identificación {}) — {}",
            bold.apply_to(&asociado.nombre),
            asociado.id,
            asociado.identificacion,
            cyan.apply_to(asociado.estado),
        );
        if let Some(fecha) = asociado.actualizado_en {
            println!("    {}", dim.apply_to(format!("actualizado: {fecha}")));
        }
    }
}

/// Imprime la tabla de transiciones permitidas del pipeline.
pub fn print_estados() {
    let bold = Style::new().bold();
    println!("{}", bold.apply_to("Transiciones permitidas"));
    for estado in TODOS_LOS_ESTADOS {
        let permitidas = pipeline::allowed_next(estado);
        if permitidas.is_empty() {
            println!("  {estado} → (sin transiciones listadas)");
        } else {
            let destinos: Vec<&str> = permitidas.iter().map(|e| e.as_str()).collect();
            println!("  {estado} → {}", destinos.join(", "));
        }
    }
}
