//! Background requests for the UI loop.
//!
//! Each request runs as a tokio task that reports back over an unbounded
//! channel. All tasks share one cancellation token; cancelling it on exit
//! stops them without delivering a result.

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::{ApiError, InspectionApi};
use crate::model::{CheckReceipt, Vehicle, VehicleDirectory};
use crate::submission::{PendingSubmission, RequestId};

/// A settled background request.
#[derive(Debug)]
pub enum TaskMessage {
    VehiclesLoaded(Result<Vec<Vehicle>, ApiError>),
    SubmissionSettled {
        request: RequestId,
        result: Result<CheckReceipt, ApiError>,
    },
}

/// Converts a vehicle load result into selector state, logging failures.
pub fn directory_from(result: Result<Vec<Vehicle>, ApiError>) -> VehicleDirectory {
    match result {
        Ok(vehicles) => VehicleDirectory::Loaded(vehicles),
        Err(err) => {
            warn!(error = %err, "could not load vehicles");
            VehicleDirectory::Unavailable(err.to_string())
        }
    }
}

/// Spawns requests against an [`InspectionApi`].
#[derive(Debug, Clone)]
pub struct TaskSpawner<A> {
    api: A,
    outbox: UnboundedSender<TaskMessage>,
    shutdown: CancellationToken,
}

impl<A: InspectionApi> TaskSpawner<A> {
    pub fn new(api: A, outbox: UnboundedSender<TaskMessage>) -> Self {
        Self {
            api,
            outbox,
            shutdown: CancellationToken::new(),
        }
    }

    /// Loads the vehicle list.
    pub fn load_vehicles(&self) -> JoinHandle<()> {
        let api = self.api.clone();
        self.spawn("load vehicles", async move {
            TaskMessage::VehiclesLoaded(api.list_vehicles().await)
        })
    }

    /// Sends a check.
    pub fn submit(&self, pending: PendingSubmission) -> JoinHandle<()> {
        let api = self.api.clone();
        self.spawn("submit check", async move {
            let result = api.submit_check(&pending.check).await;
            TaskMessage::SubmissionSettled {
                request: pending.request,
                result,
            }
        })
    }

    /// Cancels every running task. Results not yet delivered are dropped.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    fn spawn<F>(&self, name: &'static str, work: F) -> JoinHandle<()>
    where
        F: Future<Output = TaskMessage> + Send + 'static,
    {
        let token = self.shutdown.child_token();
        let outbox = self.outbox.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => debug!(task = name, "cancelled"),
                message = work => {
                    if outbox.send(message).is_err() {
                        debug!(task = name, "receiver gone; result dropped");
                    }
                }
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted [`InspectionApi`] for tests.

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use tokio::sync::Notify;

    use super::*;
    use crate::model::{Check, ValidationErrorDetail};

    #[derive(Debug, Default)]
    struct Script {
        vehicles: Option<Result<Vec<Vehicle>, ApiError>>,
        submissions: VecDeque<Result<CheckReceipt, ApiError>>,
        sent: Vec<Check>,
        vehicle_calls: usize,
    }

    /// Answers from a queue; `hold()` makes submissions wait for `release()`.
    #[derive(Debug, Clone, Default)]
    pub struct FakeApi {
        script: Arc<Mutex<Script>>,
        gate: Option<Arc<Notify>>,
    }

    impl FakeApi {
        pub fn with_vehicles(vehicles: Vec<Vehicle>) -> Self {
            let api = Self::default();
            api.script.lock().unwrap().vehicles = Some(Ok(vehicles));
            api
        }

        pub fn failing_vehicles(status: u16) -> Self {
            let api = Self::default();
            api.script.lock().unwrap().vehicles = Some(Err(ApiError::Rejected {
                status,
                details: vec![],
            }));
            api
        }

        pub fn hold(mut self) -> Self {
            self.gate = Some(Arc::new(Notify::new()));
            self
        }

        pub fn release(&self) {
            if let Some(gate) = &self.gate {
                gate.notify_one();
            }
        }

        pub fn respond(&self, result: Result<CheckReceipt, ApiError>) {
            self.script.lock().unwrap().submissions.push_back(result);
        }

        pub fn respond_details(&self, details: &[(&str, &str)]) {
            self.respond(Err(ApiError::Rejected {
                status: 422,
                details: details
                    .iter()
                    .map(|(f, r)| ValidationErrorDetail::new(*f, *r))
                    .collect(),
            }));
        }

        pub fn sent(&self) -> Vec<Check> {
            self.script.lock().unwrap().sent.clone()
        }

        pub fn vehicle_calls(&self) -> usize {
            self.script.lock().unwrap().vehicle_calls
        }
    }

    impl InspectionApi for FakeApi {
        async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ApiError> {
            let mut script = self.script.lock().unwrap();
            script.vehicle_calls += 1;
            script.vehicles.take().unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn submit_check(&self, check: &Check) -> Result<CheckReceipt, ApiError> {
            self.script.lock().unwrap().sent.push(check.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.script
                .lock()
                .unwrap()
                .submissions
                .pop_front()
                .unwrap_or_else(|| Ok(CheckReceipt::default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::fake::FakeApi;
    use super::*;
    use crate::submission::{SubmissionController, SubmitStart, TextField};

    fn vehicle(id: &str) -> Vehicle {
        Vehicle {
            id: id.into(),
            registration: "AB12 CDE".into(),
            make: "Ford".into(),
            model: "Transit".into(),
            year: 2019,
        }
    }

    fn pending() -> PendingSubmission {
        let mut controller = SubmissionController::default();
        controller.select_vehicle(Some("v1"));
        controller.text_mut(TextField::Odometer).push_str("1000");
        match controller.begin_submit() {
            SubmitStart::Dispatched(p) => p,
            other => panic!("expected Dispatched, got {other:?}"),
        }
    }

    mod directory_from {
        use super::*;

        #[test]
        fn ok_is_loaded() {
            let dir = directory_from(Ok(vec![vehicle("v1")]));
            assert_eq!(dir, VehicleDirectory::Loaded(vec![vehicle("v1")]));
        }

        #[test]
        fn err_is_unavailable_with_reason() {
            let dir = directory_from(Err(ApiError::Rejected {
                status: 503,
                details: vec![],
            }));
            assert_eq!(
                dir,
                VehicleDirectory::Unavailable("server rejected the request (503)".into())
            );
        }
    }

    #[tokio::test]
    async fn load_vehicles_delivers_result() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let api = FakeApi::with_vehicles(vec![vehicle("v1"), vehicle("v2")]);
        let spawner = TaskSpawner::new(api.clone(), tx);
        spawner.load_vehicles().await.unwrap();

        match rx.recv().await {
            Some(TaskMessage::VehiclesLoaded(Ok(vehicles))) => assert_eq!(vehicles.len(), 2),
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(api.vehicle_calls(), 1);
    }

    #[tokio::test]
    async fn submit_delivers_result_tagged_with_request() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let api = FakeApi::default();
        api.respond_details(&[("odometerKm", "must be positive")]);
        let spawner = TaskSpawner::new(api.clone(), tx);
        let pending = pending();
        let request = pending.request;
        spawner.submit(pending).await.unwrap();

        match rx.recv().await {
            Some(TaskMessage::SubmissionSettled {
                request: got,
                result: Err(err),
            }) => {
                assert_eq!(got, request);
                assert_eq!(err.details().len(), 1);
            }
            other => panic!("unexpected message: {other:?}"),
        }
        assert_eq!(api.sent().len(), 1);
        assert_eq!(api.sent()[0].vehicle_id, "v1");
    }

    #[tokio::test]
    async fn shutdown_cancels_in_flight_request() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let api = FakeApi::default().hold();
        let spawner = TaskSpawner::new(api.clone(), tx);
        let handle = spawner.submit(pending());
        tokio::task::yield_now().await;

        spawner.shutdown();
        handle.await.unwrap();
        assert!(spawner.is_shut_down());

        drop(spawner);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn closed_receiver_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let spawner = TaskSpawner::new(FakeApi::default(), tx);
        spawner.load_vehicles().await.unwrap();
    }
}
