pub mod cache;
pub mod errors;
pub mod http;
pub mod models;
pub mod parameters;
pub mod scrub;
pub mod sync;
pub mod tasks;

pub use errors::{
    FailureKind,
    MyoSimError,
    ProjectionFailure,
};
pub use models::{
    Field,
    Generation,
    ParameterSet,
    Projection,
    ProjectionPoint,
};
pub use sync::{
    SyncCore,
    SyncState,
};
