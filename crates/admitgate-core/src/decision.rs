//! Decision Result produced by a decision function for one request.

use crate::patch::PatchOperation;

/// Outcome of evaluating one admission request.
///
/// Fields are private so a denial can never carry patches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Decision {
    allowed: bool,
    message: String,
    patches: Vec<PatchOperation>,
}

impl Decision {
    /// Allow without explanation or mutation.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            ..Self::default()
        }
    }

    /// Deny with a human-readable explanation.
    pub fn deny(message: impl Into<String>) -> Self {
        Self {
            allowed: false,
            message: message.into(),
            patches: Vec::new(),
        }
    }

    /// Allow and apply `patches` in order.
    pub fn mutate(patches: Vec<PatchOperation>) -> Self {
        Self {
            allowed: true,
            message: String::new(),
            patches,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Append a patch. No-op on a denial.
    pub fn with_patch(mut self, op: PatchOperation) -> Self {
        if self.allowed {
            self.patches.push(op);
        }
        self
    }

    pub fn allowed(&self) -> bool {
        self.allowed
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn patches(&self) -> &[PatchOperation] {
        &self.patches
    }

    pub fn into_parts(self) -> (bool, String, Vec<PatchOperation>) {
        (self.allowed, self.message, self.patches)
    }
}
