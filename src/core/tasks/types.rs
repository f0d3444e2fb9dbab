use crate::{
    core::{
        errors::ProjectionFailure,
        models::{
            Generation,
            Projection,
        },
    },
    service::PointPrediction,
};

pub type ProjectionResult = Result<Projection, ProjectionFailure>;

#[derive(Debug, Clone)]
pub enum TaskResult {
    Projection { generation: Generation, result: ProjectionResult },
    ServiceStatus(Result<PointPrediction, ProjectionFailure>),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::Projection { .. } => "projection",
            TaskResult::ServiceStatus(_) => "service_status",
        }
    }
}
