use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use log::debug;
use reqwest::Client;
use tokio::runtime::Runtime;

use super::TaskResult;
use crate::{
    config::Settings,
    core::{
        errors::ProjectionFailure,
        http::http_client,
        models::ParameterSet,
        sync::{
            ProjectionRequest,
            ProjectionRequester,
        },
        MyoSimError,
    },
    service::api,
};

/// Runs service calls off the UI thread and queues their results.
///
/// Results are only observed through [`TaskManager::poll_results`], so they
/// are applied on the UI thread in the order they finished.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    client: Client,
    service_url: String,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new(settings: &Settings) -> Result<Self, MyoSimError> {
        let runtime = Arc::new(Runtime::new()?);
        let client = http_client(settings.request_timeout())?;

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, client, service_url: settings.service_url.clone(), receiver, sender })
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>, Client, String) {
        (self.sender.clone(), self.runtime.clone(), self.client.clone(), self.service_url.clone())
    }

    pub fn request_projection(&self, request: ProjectionRequest) {
        let (sender, runtime, client, service_url) = self.task_context();

        thread::spawn(move || {
            let ProjectionRequest { generation, parameters } = request;

            let result = runtime.block_on(async {
                api::simulate(&client, &service_url, &parameters)
                    .await
                    .map_err(ProjectionFailure::from)
            });

            debug!("event=projection_task_done generation={} ok={}", generation, result.is_ok());
            let _ = sender.send(TaskResult::Projection { generation, result });
        });
    }

    pub fn check_service(&self, parameters: ParameterSet) {
        let (sender, runtime, client, service_url) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                api::predict(&client, &service_url, &parameters)
                    .await
                    .map_err(ProjectionFailure::from)
            });

            let _ = sender.send(TaskResult::ServiceStatus(result));
        });
    }
}

impl ProjectionRequester for TaskManager {
    fn dispatch(&self, request: ProjectionRequest) {
        self.request_projection(request);
    }
}

#[cfg(test)]
mod tests {
    use std::time::{
        Duration,
        Instant,
    };

    use super::*;
    use crate::core::{
        errors::FailureKind,
        models::Generation,
        sync::{
            ResponseOutcome,
            SyncCore,
        },
    };

    fn unreachable_settings() -> Settings {
        Settings {
            service_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..Settings::default()
        }
    }

    fn wait_for_results(manager: &mut TaskManager, count: usize) -> Vec<TaskResult> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut results = Vec::new();
        while results.len() < count && Instant::now() < deadline {
            results.extend(manager.poll_results());
            thread::sleep(Duration::from_millis(20));
        }
        results
    }

    #[test]
    fn test_failed_projection_is_reported_with_its_generation() {
        let mut manager = TaskManager::new(&unreachable_settings()).unwrap();
        manager.request_projection(ProjectionRequest {
            generation: Generation(7),
            parameters: ParameterSet::default(),
        });

        let results = wait_for_results(&mut manager, 1);
        assert_eq!(results.len(), 1);
        match &results[0] {
            TaskResult::Projection { generation, result } => {
                assert_eq!(*generation, Generation(7));
                let failure = result.as_ref().unwrap_err();
                assert!(matches!(failure.kind, FailureKind::Connection | FailureKind::Timeout));
            }
            other => panic!("Expected projection result, got {}", other.task_type()),
        }
    }

    #[test]
    fn test_core_goes_offline_through_task_manager() {
        let mut manager = TaskManager::new(&unreachable_settings()).unwrap();
        let mut core = SyncCore::default();
        let t0 = Instant::now();

        core.request_refresh(t0);
        let generation = core.tick(t0 + Duration::from_millis(500), &manager).unwrap();

        for result in wait_for_results(&mut manager, 1) {
            if let TaskResult::Projection { generation: g, result } = result {
                assert_eq!(g, generation);
                assert_eq!(core.apply_response(g, result), ResponseOutcome::Failed);
            }
        }
        assert!(core.is_stale());
        assert!(core.projection().is_none());
    }
}
