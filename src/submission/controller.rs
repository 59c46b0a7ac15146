use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::model::{
    Check, CheckItemKey, CheckReceipt, CheckStatus, Checklist, ValidationErrorDetail,
    normalize_note, parse_odometer_lenient, validate_odometer, validate_vehicle_id,
};

/// Shown when a submission fails without usable field details.
pub const GENERIC_FAILURE: &str = "Could not submit the check. Please try again.";
/// Shown when a submission is accepted.
pub const SUCCESS_MESSAGE: &str = "Check submitted";

/// Identifies one dispatched submission so its result can be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Whether a request is in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Submitting { request: RequestId, check: Check },
}

/// The editable text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Odometer,
    Note,
}

/// The failure currently shown in the inline banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// One `field: reason` line per rejected field.
    Validation(Vec<String>),
    Generic(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message for the toast surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// How a settled submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { check: Check, receipt: CheckReceipt },
    ValidationFailed(Vec<String>),
    GenericFailed(String),
}

/// The applied result of a submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub outcome: Outcome,
    pub notification: Notification,
}

impl Completion {
    /// Returns `true` if the check was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }
}

/// A check ready to be sent, tagged with its request id.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub request: RequestId,
    pub check: Check,
}

/// Result of asking the controller to submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStart {
    /// A request should be sent.
    Dispatched(PendingSubmission),
    /// Local validation failed; nothing is sent.
    Rejected(Notification),
    /// A request is already in flight.
    Busy,
}

/// Classifies a submission error: structured details are a validation
/// failure, everything else is generic.
pub fn classify(error: &ApiError) -> Outcome {
    let details = error.details();
    if details.is_empty() {
        Outcome::GenericFailed(GENERIC_FAILURE.to_string())
    } else {
        Outcome::ValidationFailed(details.iter().map(ToString::to_string).collect())
    }
}

/// Form state and the submit state machine for one inspection form.
#[derive(Debug, Clone)]
pub struct SubmissionController {
    vehicle_id: String,
    odometer: String,
    note: String,
    checklist: Checklist,
    phase: Phase,
    failure: Option<Failure>,
    next_request: u64,
    client_validation: bool,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SubmissionController {
    /// Creates an idle controller with empty fields and a fresh checklist.
    ///
    /// With `client_validation` off, checks are sent exactly as entered.
    pub fn new(client_validation: bool) -> Self {
        Self {
            vehicle_id: String::new(),
            odometer: String::new(),
            note: String::new(),
            checklist: Checklist::new(),
            phase: Phase::Idle,
            failure: None,
            next_request: 0,
            client_validation,
        }
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn odometer(&self) -> &str {
        &self.odometer
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn checklist(&self) -> &Checklist {
        &self.checklist
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Returns `true` while a request is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    /// The failure from the last attempt, if any.
    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    /// Selects a vehicle by id; `None` returns to the placeholder.
    pub fn select_vehicle(&mut self, id: Option<&str>) {
        self.vehicle_id = id.unwrap_or_default().to_string();
    }

    /// Mutable access to a text field's contents.
    pub fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Odometer => &mut self.odometer,
            TextField::Note => &mut self.note,
        }
    }

    pub fn set_status(&mut self, key: CheckItemKey, status: CheckStatus) {
        self.checklist.set_status(key, status);
    }

    pub fn toggle(&mut self, key: CheckItemKey) {
        self.checklist.toggle(key);
    }

    /// Starts a submission.
    ///
    /// Returns [`SubmitStart::Busy`] while another request is in flight.
    /// Otherwise clears the previous failure and either rejects locally or
    /// enters [`Phase::Submitting`].
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.is_submitting() {
            debug!("submit ignored: request already in flight");
            return SubmitStart::Busy;
        }
        self.failure = None;

        let check = match self.build_check() {
            Ok(check) => check,
            Err(details) => {
                debug!(count = details.len(), "check rejected locally");
                let lines = details.iter().map(ToString::to_string).collect();
                let notification = self.record(&Outcome::ValidationFailed(lines));
                return SubmitStart::Rejected(notification);
            }
        };

        let request = RequestId(self.next_request);
        self.next_request += 1;
        self.phase = Phase::Submitting {
            request,
            check: check.clone(),
        };
        debug!(?request, "submitting");
        SubmitStart::Dispatched(PendingSubmission { request, check })
    }

    /// Applies the result of a dispatched request.
    ///
    /// Results for anything but the in-flight request are stale and return
    /// `None` without touching state.
    pub fn complete(
        &mut self,
        request: RequestId,
        result: Result<CheckReceipt, ApiError>,
    ) -> Option<Completion> {
        let check = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Submitting {
                request: current,
                check,
            } if current == request => check,
            other => {
                self.phase = other;
                debug!(?request, "discarding stale submission result");
                return None;
            }
        };

        let outcome = match result {
            Ok(receipt) => {
                info!(vehicle_id = %check.vehicle_id, receipt = ?receipt.id, "check accepted");
                self.reset();
                Outcome::Success { check, receipt }
            }
            Err(err) => {
                warn!(error = %err, "check submission failed");
                classify(&err)
            }
        };
        let notification = self.record(&outcome);
        Some(Completion {
            outcome,
            notification,
        })
    }

    /// Forgets the in-flight request, if any, so its result is discarded.
    pub fn abandon(&mut self) {
        if let Phase::Submitting { request, .. } = &self.phase {
            debug!(?request, "abandoning in-flight submission");
        }
        self.phase = Phase::Idle;
    }

    /// Restores every field to its initial value.
    pub fn reset(&mut self) {
        self.vehicle_id.clear();
        self.odometer.clear();
        self.note.clear();
        self.checklist = Checklist::new();
        self.failure = None;
    }

    /// Stores the banner for a failed outcome and returns its notification.
    fn record(&mut self, outcome: &Outcome) -> Notification {
        match outcome {
            Outcome::Success { .. } => Notification::success(SUCCESS_MESSAGE),
            Outcome::ValidationFailed(lines) => {
                let message = lines
                    .first()
                    .cloned()
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string());
                self.failure = Some(Failure::Validation(lines.clone()));
                Notification::error(message)
            }
            Outcome::GenericFailed(message) => {
                self.failure = Some(Failure::Generic(message.clone()));
                Notification::error(message.clone())
            }
        }
    }

    fn build_check(&self) -> Result<Check, Vec<ValidationErrorDetail>> {
        let odometer_km = if self.client_validation {
            let mut details: Vec<ValidationErrorDetail> = Vec::new();
            if let Err(e) = validate_vehicle_id(&self.vehicle_id) {
                details.push(e.into());
            }
            let odometer = validate_odometer(&self.odometer)
                .map_err(|e| details.push(e.into()))
                .ok();
            match odometer {
                Some(km) if details.is_empty() => km,
                _ => return Err(details),
            }
        } else {
            parse_odometer_lenient(&self.odometer)
        };

        Ok(Check {
            vehicle_id: self.vehicle_id.clone(),
            odometer_km,
            items: self.checklist.items().to_vec(),
            note: normalize_note(&self.note),
        })
    }
}
