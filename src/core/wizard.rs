use crate::domain::model::{ApplicationPayload, CurrentStatus, PaymentStatus, Registration, Track};
use crate::domain::ports::Submitter;
use crate::utils::error::CheckoutError;
use url::form_urlencoded;

/// Payment-step session length in seconds.
pub const SESSION_SECONDS: u32 = 300;

const UPI_VPA: &str = "industrialimmersion@upi";
const UPI_PAYEE: &str = "Industrial Immersion";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Profile,
    Review,
    Payment,
    Success,
}

impl Step {
    pub fn title(&self) -> &'static str {
        match self {
            Step::Profile => "Personal Profile",
            Step::Review => "Final Review",
            Step::Payment => "Complete Payment",
            Step::Success => "Application Secured",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    FullName,
    Email,
    Phone,
    Linkedin,
    CurrentStatus,
    WorkExperience,
    CareerGoals,
}

/// Four-step checkout state machine. Single-session, single-threaded: the
/// caller owns it mutably and drives every transition.
pub struct CheckoutWizard {
    track: Track,
    registration: Registration,
    step: Step,
    submitting: bool,
    error: Option<String>,
    time_left: u32,
    payment_status: PaymentStatus,
}

impl CheckoutWizard {
    pub fn new(track: Track) -> Self {
        Self {
            track,
            registration: Registration::default(),
            step: Step::Profile,
            submitting: false,
            error: None,
            time_left: SESSION_SECONDS,
            payment_status: PaymentStatus::Completed,
        }
    }

    pub fn with_payment_status(mut self, payment_status: PaymentStatus) -> Self {
        self.payment_status = payment_status;
        self
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn registration(&self) -> &Registration {
        &self.registration
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    /// Merges one field into the registration. Any visible error is stale
    /// once the user starts typing again, so it is cleared here.
    pub fn set_field(&mut self, field: ProfileField, value: &str) {
        self.error = None;
        let value = value.trim();
        match field {
            ProfileField::FullName => self.registration.full_name = value.to_string(),
            ProfileField::Email => self.registration.email = value.to_string(),
            ProfileField::Phone => self.registration.phone = value.to_string(),
            ProfileField::Linkedin => {
                self.registration.linkedin = non_empty(value);
            }
            ProfileField::CurrentStatus => match CurrentStatus::parse(value) {
                Some(status) => self.registration.current_status = status,
                None => tracing::debug!("ignoring unknown current_status value: {}", value),
            },
            ProfileField::WorkExperience => {
                self.registration.work_experience = non_empty(value);
            }
            ProfileField::CareerGoals => self.registration.career_goals = value.to_string(),
        }
    }

    fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.registration.full_name.trim().is_empty() {
            missing.push("fullName");
        }
        if self.registration.email.trim().is_empty() {
            missing.push("email");
        }
        if self.registration.phone.trim().is_empty() {
            missing.push("phone");
        }
        if self.registration.career_goals.trim().is_empty() {
            missing.push("careerGoals");
        }
        missing
    }

    /// Profile → Review, gated on the required-field invariant.
    pub fn validate_and_advance(&mut self) -> bool {
        let missing = self.missing_required_fields();
        if !missing.is_empty() {
            tracing::debug!("validation failed, missing: {:?}", missing);
            let err = CheckoutError::Validation {
                message: "Please complete all required fields (*)".to_string(),
            };
            self.error = Some(err.user_message());
            return false;
        }
        self.error = None;
        self.step = Step::Review;
        true
    }

    /// Unguarded transition backing the Modify/Cancel navigation.
    pub fn go_to_step(&mut self, step: Step) {
        self.step = step;
    }

    /// Fires the one outbound submission. Re-entrant calls while a
    /// submission is outstanding are dropped without touching the network.
    pub async fn submit(&mut self, submitter: &dyn Submitter) -> bool {
        if self.submitting {
            tracing::debug!("submission already in flight, ignoring");
            return false;
        }
        self.submitting = true;
        self.error = None;

        let payload =
            ApplicationPayload::new(&self.registration, &self.track.key, self.payment_status);
        let outcome = submitter.submit(&payload).await;
        self.submitting = false;

        match outcome {
            Ok(()) => {
                tracing::info!(track = %self.track.key, "application submitted");
                self.step = Step::Success;
                true
            }
            Err(e) => {
                tracing::warn!("submission failed: {}", e);
                self.error = Some(e.user_message());
                false
            }
        }
    }

    /// One-second countdown tick. Only runs on the payment step and
    /// saturates at zero; expiry is advisory, the form stays open.
    pub fn tick(&mut self) {
        if self.step != Step::Payment || self.time_left == 0 {
            return;
        }
        self.time_left -= 1;
        if self.time_left == 0 {
            tracing::warn!("payment session timer expired; submission stays open");
        }
    }

    /// Countdown as `m:ss` for display.
    pub fn time_left_display(&self) -> String {
        format!("{}:{:02}", self.time_left / 60, self.time_left % 60)
    }

    /// Deep link for paying the track price from a UPI app. Display-only;
    /// nothing verifies the payment happened.
    pub fn upi_link(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("pa", UPI_VPA)
            .append_pair("pn", UPI_PAYEE)
            .append_pair("am", &self.track.price.to_string())
            .append_pair("cu", "INR")
            .append_pair("tn", &format!("Enroll_{}", self.registration.first_name()))
            .finish();
        format!("upi://pay?{}", query)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Submitter;
    use crate::utils::error::{CheckoutError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSubmitter {
        calls: AtomicUsize,
        fail_with: Option<String>,
    }

    impl CountingSubmitter {
        fn succeeding() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: None,
            }
        }

        fn failing(body: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_with: Some(body.to_string()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Submitter for CountingSubmitter {
        async fn submit(&self, _payload: &ApplicationPayload) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                None => Ok(()),
                Some(body) => Err(CheckoutError::Rejected {
                    status: 500,
                    body: body.clone(),
                }),
            }
        }
    }

    fn track() -> Track {
        Track {
            key: "x1".to_string(),
            title: "Pilot Track".to_string(),
            duration: "4 Weeks".to_string(),
            price: 1999,
        }
    }

    fn filled_wizard() -> CheckoutWizard {
        let mut wizard = CheckoutWizard::new(track());
        wizard.set_field(ProfileField::FullName, "John Doe");
        wizard.set_field(ProfileField::Email, "john@example.com");
        wizard.set_field(ProfileField::Phone, "+911234567890");
        wizard.set_field(ProfileField::CareerGoals, "Practical brand experience");
        wizard
    }

    #[test]
    fn advance_requires_all_required_fields() {
        let mut wizard = CheckoutWizard::new(track());
        wizard.set_field(ProfileField::FullName, "John Doe");
        assert!(!wizard.validate_and_advance());
        assert_eq!(wizard.step(), Step::Profile);
        assert!(wizard.error().is_some_and(|e| !e.is_empty()));

        let mut wizard = filled_wizard();
        assert!(wizard.validate_and_advance());
        assert_eq!(wizard.step(), Step::Review);
        assert!(wizard.error().is_none());
    }

    #[test]
    fn whitespace_only_field_fails_validation() {
        let mut wizard = filled_wizard();
        wizard.set_field(ProfileField::Email, "   ");
        assert!(!wizard.validate_and_advance());
        assert_eq!(wizard.step(), Step::Profile);
    }

    #[test]
    fn typing_clears_previous_error() {
        let mut wizard = CheckoutWizard::new(track());
        assert!(!wizard.validate_and_advance());
        assert!(wizard.error().is_some());
        wizard.set_field(ProfileField::FullName, "John");
        assert!(wizard.error().is_none());
    }

    #[test]
    fn go_to_step_is_unguarded() {
        let mut wizard = filled_wizard();
        wizard.validate_and_advance();
        wizard.go_to_step(Step::Payment);
        assert_eq!(wizard.step(), Step::Payment);
        wizard.go_to_step(Step::Profile);
        assert_eq!(wizard.step(), Step::Profile);
    }

    #[tokio::test]
    async fn successful_submit_reaches_terminal_step() {
        let mut wizard = filled_wizard();
        wizard.validate_and_advance();
        wizard.go_to_step(Step::Payment);

        let submitter = CountingSubmitter::succeeding();
        assert!(wizard.submit(&submitter).await);
        assert_eq!(wizard.step(), Step::Success);
        assert!(wizard.error().is_none());
        assert_eq!(submitter.calls(), 1);
    }

    #[tokio::test]
    async fn failed_submit_stays_on_payment_and_is_retryable() {
        let mut wizard = filled_wizard();
        wizard.validate_and_advance();
        wizard.go_to_step(Step::Payment);

        let submitter = CountingSubmitter::failing("boom");
        assert!(!wizard.submit(&submitter).await);
        assert_eq!(wizard.step(), Step::Payment);
        assert!(wizard.error().unwrap().contains("boom"));

        // Retry after a failure goes out again.
        let retry = CountingSubmitter::succeeding();
        assert!(wizard.submit(&retry).await);
        assert_eq!(wizard.step(), Step::Success);
    }

    #[tokio::test]
    async fn submit_is_guarded_while_one_is_in_flight() {
        let mut wizard = filled_wizard();
        wizard.go_to_step(Step::Payment);
        wizard.submitting = true;

        let submitter = CountingSubmitter::succeeding();
        assert!(!wizard.submit(&submitter).await);
        assert_eq!(submitter.calls(), 0);
        assert_eq!(wizard.step(), Step::Payment);
    }

    #[test]
    fn countdown_saturates_at_zero() {
        let mut wizard = filled_wizard();
        wizard.go_to_step(Step::Payment);
        assert_eq!(wizard.time_left(), SESSION_SECONDS);

        for _ in 0..SESSION_SECONDS {
            wizard.tick();
        }
        assert_eq!(wizard.time_left(), 0);

        wizard.tick();
        assert_eq!(wizard.time_left(), 0);
    }

    #[test]
    fn countdown_only_runs_on_payment_step() {
        let mut wizard = filled_wizard();
        wizard.tick();
        assert_eq!(wizard.time_left(), SESSION_SECONDS);

        wizard.go_to_step(Step::Payment);
        wizard.tick();
        assert_eq!(wizard.time_left(), SESSION_SECONDS - 1);
    }

    #[test]
    fn time_display_is_minutes_and_padded_seconds() {
        let mut wizard = filled_wizard();
        assert_eq!(wizard.time_left_display(), "5:00");
        wizard.go_to_step(Step::Payment);
        wizard.tick();
        assert_eq!(wizard.time_left_display(), "4:59");
    }

    #[test]
    fn upi_link_carries_price_currency_and_note() {
        let wizard = filled_wizard();
        let link = wizard.upi_link();
        assert!(link.starts_with("upi://pay?"));
        assert!(link.contains("pa=industrialimmersion%40upi"));
        assert!(link.contains("am=1999"));
        assert!(link.contains("cu=INR"));
        assert!(link.contains("tn=Enroll_John"));
    }
}
