//! Operation Hook: per-operation dispatch to decision functions.

use std::sync::Arc;

use crate::decision::Decision;
use crate::error::{AdmitError, Result};
use crate::request::{AdmissionRequest, Operation};

/// A unit of admission policy.
///
/// `Err` signals a fault while evaluating (not a denial); the handler renders
/// it as a denial carrying the error text.
pub trait AdmitFn: Send + Sync {
    fn admit(&self, req: &AdmissionRequest) -> Result<Decision>;
}

impl<F> AdmitFn for F
where
    F: Fn(&AdmissionRequest) -> Result<Decision> + Send + Sync,
{
    fn admit(&self, req: &AdmissionRequest) -> Result<Decision> {
        self(req)
    }
}

/// One optional decision function per operation kind.
///
/// An empty slot means "unsupported", which is distinct from a registered
/// function that always allows. Built once, read-only afterward.
#[derive(Clone, Default)]
pub struct Hook {
    create: Option<Arc<dyn AdmitFn>>,
    update: Option<Arc<dyn AdmitFn>>,
    delete: Option<Arc<dyn AdmitFn>>,
    connect: Option<Arc<dyn AdmitFn>>,
}

impl Hook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_create(mut self, f: impl AdmitFn + 'static) -> Self {
        self.create = Some(Arc::new(f));
        self
    }

    pub fn on_update(mut self, f: impl AdmitFn + 'static) -> Self {
        self.update = Some(Arc::new(f));
        self
    }

    pub fn on_delete(mut self, f: impl AdmitFn + 'static) -> Self {
        self.delete = Some(Arc::new(f));
        self
    }

    pub fn on_connect(mut self, f: impl AdmitFn + 'static) -> Self {
        self.connect = Some(Arc::new(f));
        self
    }

    /// Operations that have a decision function, in wire order.
    pub fn registered(&self) -> Vec<Operation> {
        [
            (Operation::Create, &self.create),
            (Operation::Update, &self.update),
            (Operation::Delete, &self.delete),
            (Operation::Connect, &self.connect),
        ]
        .into_iter()
        .filter(|(_, slot)| slot.is_some())
        .map(|(op, _)| op)
        .collect()
    }

    /// Route `req` to the decision function for its operation.
    ///
    /// The function's result (decision or error) is returned unchanged.
    pub fn execute(&self, req: &AdmissionRequest) -> Result<Decision> {
        let slot = match &req.operation {
            Operation::Create => &self.create,
            Operation::Update => &self.update,
            Operation::Delete => &self.delete,
            Operation::Connect => &self.connect,
            Operation::Other(op) => {
                return Ok(Decision::deny(format!("invalid operation: {op}")));
            }
        };

        match slot {
            Some(f) => f.admit(req),
            None => Err(AdmitError::UnsupportedOperation(req.operation.clone())),
        }
    }
}

impl std::fmt::Debug for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hook")
            .field("registered", &self.registered())
            .finish()
    }
}
