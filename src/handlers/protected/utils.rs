use crate::error::ApiError;

/// Parse a positive numeric path id, naming the resource in the error
pub fn parse_id(raw: &str, resource: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request(format!("invalid {} ID", resource)))
}
