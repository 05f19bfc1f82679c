pub mod contracts;
pub mod split_frame;
pub mod wandb_client;

pub use split_frame::SplitFrame;
pub use wandb_client::{RunPath, WandbClient, WandbClientConfig, fetch_run_history};
