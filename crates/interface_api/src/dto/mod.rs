//! Request and response bodies

pub mod balance;
pub mod wallet;
pub mod savings;
pub mod credits;
pub mod projects;

use serde::Serialize;
use uuid::Uuid;

/// Id of a newly created record
///
/// Carries the bare UUID, the same form record bodies serialize and the
/// `/:id` routes accept.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}

impl CreatedResponse {
    pub fn new(id: impl Into<Uuid>) -> Self {
        Self { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::GoalId;

    #[test]
    fn test_created_id_is_bare_uuid() {
        let id = GoalId::new();
        let body = serde_json::to_value(CreatedResponse::new(id)).unwrap();
        assert_eq!(body["id"], id.as_uuid().to_string());
    }
}
