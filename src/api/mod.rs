pub mod client;
pub mod error;
pub mod types;

pub use client::AsociadosClient;
pub use error::FetchError;
pub use types::Asociado;
