pub mod tgi_client;

pub use tgi_client::{TgiClient, TgiClientConfig, generate_text, generated_text};
