use serde::{Deserialize, Serialize};
use std::fmt;

/// Applicant profile as entered in the wizard. Lives only in transient
/// session state; never persisted locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: Option<String>,
    pub current_status: CurrentStatus,
    pub work_experience: Option<String>,
    pub career_goals: String,
}

impl Registration {
    /// First name, used in the UPI transaction note.
    pub fn first_name(&self) -> &str {
        self.full_name
            .split_whitespace()
            .next()
            .unwrap_or(self.full_name.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrentStatus {
    #[default]
    Student,
    Fresher,
    Professional,
    Entrepreneur,
}

impl CurrentStatus {
    pub const ALL: [CurrentStatus; 4] = [
        CurrentStatus::Student,
        CurrentStatus::Fresher,
        CurrentStatus::Professional,
        CurrentStatus::Entrepreneur,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Some(CurrentStatus::Student),
            "fresher" => Some(CurrentStatus::Fresher),
            "professional" => Some(CurrentStatus::Professional),
            "entrepreneur" => Some(CurrentStatus::Entrepreneur),
            _ => None,
        }
    }
}

impl fmt::Display for CurrentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CurrentStatus::Student => "Student",
            CurrentStatus::Fresher => "Fresher",
            CurrentStatus::Professional => "Professional",
            CurrentStatus::Entrepreneur => "Entrepreneur",
        };
        f.write_str(label)
    }
}

/// Tag pushed alongside the application. The flow is trust-based manual UPI,
/// so this records what the user claims, not a gateway confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Pending,
}

/// Static catalog entry for a purchasable program track. Price in whole INR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub key: String,
    pub title: String,
    pub duration: String,
    pub price: u32,
}

/// Outbound wire form of a registration, keyed the way the applications
/// table expects. Field names here are the external contract; do not rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: Option<String>,
    pub current_status: CurrentStatus,
    pub work_experience: Option<String>,
    pub career_goals: String,
    pub track_key: String,
    pub payment_status: PaymentStatus,
}

impl ApplicationPayload {
    pub fn new(registration: &Registration, track_key: &str, payment_status: PaymentStatus) -> Self {
        Self {
            full_name: registration.full_name.clone(),
            email: registration.email.clone(),
            phone: registration.phone.clone(),
            linkedin: registration.linkedin.clone(),
            current_status: registration.current_status,
            work_experience: registration.work_experience.clone(),
            career_goals: registration.career_goals.clone(),
            track_key: track_key.to_string(),
            payment_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_maps_internal_names_to_external_keys() {
        let registration = Registration {
            full_name: "A".to_string(),
            career_goals: "B".to_string(),
            ..Registration::default()
        };
        let payload = ApplicationPayload::new(&registration, "x1", PaymentStatus::Completed);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["full_name"], "A");
        assert_eq!(json["career_goals"], "B");
        assert_eq!(json["track_key"], "x1");
        assert_eq!(json["payment_status"], "completed");
        assert_eq!(json["linkedin"], serde_json::Value::Null);
    }

    #[test]
    fn first_name_takes_leading_token() {
        let mut registration = Registration::default();
        registration.full_name = "John Doe".to_string();
        assert_eq!(registration.first_name(), "John");

        registration.full_name = "Mononym".to_string();
        assert_eq!(registration.first_name(), "Mononym");
    }

    #[test]
    fn current_status_parses_case_insensitively() {
        assert_eq!(CurrentStatus::parse("fresher"), Some(CurrentStatus::Fresher));
        assert_eq!(
            CurrentStatus::parse(" Professional "),
            Some(CurrentStatus::Professional)
        );
        assert_eq!(CurrentStatus::parse("retired"), None);
    }
}
