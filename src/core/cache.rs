use super::models::{
    Generation,
    ParameterSet,
    Projection,
};

#[derive(Debug, Clone)]
struct CachedProjection {
    generation: Generation,
    parameters: ParameterSet,
    projection: Projection,
}

/// Last successfully fetched projection, replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct ProjectionCache {
    entry: Option<CachedProjection>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, generation: Generation, parameters: ParameterSet, projection: Projection) {
        self.entry = Some(CachedProjection { generation, parameters, projection });
    }

    pub fn current(&self) -> Option<&Projection> {
        self.entry.as_ref().map(|e| &e.projection)
    }

    pub fn generation(&self) -> Option<Generation> {
        self.entry.as_ref().map(|e| e.generation)
    }

    /// Inputs that produced the cached projection.
    pub fn parameters(&self) -> Option<&ParameterSet> {
        self.entry.as_ref().map(|e| &e.parameters)
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}
