pub mod policy;
pub mod status;

pub use policy::{allowed_next, transition_allowed};
pub use status::{OPCIONES_FILTRO, PipelineStatus, StatusFilter, TODOS_LOS_ESTADOS};
