pub mod client;
pub mod wizard;

pub use crate::domain::model::{
    ApplicationPayload, CurrentStatus, PaymentStatus, Registration, Track,
};
pub use crate::domain::ports::Submitter;
pub use crate::utils::error::Result;
pub use client::SubmissionClient;
pub use wizard::{CheckoutWizard, ProfileField, Step};
