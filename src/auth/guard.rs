use crate::error::AppError;
use crate::models::{Principal, Task};

/// Decides whether `principal` may read or mutate `task`.
///
/// Allowed iff the task's owner is the principal. This runs before any
/// disclosure or mutation of task content; existence of the task has already
/// been established by the caller, so the only failure here is `Forbidden`.
pub fn authorize(principal: &Principal, task: &Task) -> Result<(), AppError> {
    if task.owner_id == principal.id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Not authorized to access this task".into(),
        ))
    }
}
