pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{catalog::TrackCatalog, ApiConfig};
pub use core::{CheckoutWizard, ProfileField, Step, SubmissionClient};
pub use domain::model::{ApplicationPayload, CurrentStatus, PaymentStatus, Registration, Track};
pub use domain::ports::Submitter;
pub use utils::error::{CheckoutError, Result};
