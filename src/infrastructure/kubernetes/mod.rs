pub mod client;

pub use client::{EverestKubeClient, EverestKubeClientImpl};
