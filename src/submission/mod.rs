//! The inspection form's submit workflow.
//!
//! [`SubmissionController`] holds the editable fields and moves between
//! [`Phase::Idle`] and [`Phase::Submitting`]. Every settled request ends in
//! exactly one [`Outcome`]: success (fields reset), validation failure, or
//! generic failure (fields kept in both failure cases).

mod controller;

pub use controller::{
    Completion, Failure, GENERIC_FAILURE, Notification, NotificationKind, Outcome,
    PendingSubmission, Phase, RequestId, SUCCESS_MESSAGE, SubmissionController, SubmitStart,
    TextField, classify,
};
