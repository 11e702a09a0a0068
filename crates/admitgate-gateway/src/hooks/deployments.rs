use admitgate_core::{AdmissionRequest, Decision, Hook, Result};

use super::resource::Deployment;

pub const CREATE_DENIED_MESSAGE: &str = "You cannot create a deployment in `special` namespace.";
pub const DELETE_DENIED_MESSAGE: &str =
    "You cannot remove a deployment from `special-system` namespace.";

pub fn validation_hook() -> Hook {
    Hook::new()
        .on_create(validate_create)
        .on_delete(validate_delete)
}

fn validate_create(req: &AdmissionRequest) -> Result<Decision> {
    let dp: Deployment = match req.object() {
        Ok(d) => d,
        Err(e) => return Ok(Decision::deny(e.to_string())),
    };

    if dp.metadata.namespace == "special" {
        return Ok(Decision::deny(CREATE_DENIED_MESSAGE));
    }

    Ok(Decision::allow())
}

/// Deletion in `special-system` is denied only when the `skip` annotation is
/// the literal string "false". An absent annotation allows the delete.
fn validate_delete(req: &AdmissionRequest) -> Result<Decision> {
    let dp: Deployment = match req.old_object() {
        Ok(d) => d,
        Err(e) => return Ok(Decision::deny(e.to_string())),
    };

    let skip = dp.metadata.annotations.get("skip").map(String::as_str);
    if dp.metadata.namespace == "special-system" && skip == Some("false") {
        return Ok(Decision::deny(DELETE_DENIED_MESSAGE));
    }

    Ok(Decision::allow())
}
