pub mod assessment;
pub mod client;

pub use assessment::{NewAssessment, ReadinessAssessment};
pub use client::Client;
