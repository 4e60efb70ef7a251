use uuid::Uuid;

/// Per-request context installed by the request logging middleware.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: Uuid,
}

impl RequestContext {
    pub fn new(request_id: Uuid) -> Self {
        Self { request_id }
    }

    /// Fresh context with a time-ordered id.
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7())
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}
