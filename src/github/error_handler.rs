//! GitHub API error detection and classification
//!
//! Maps octocrab errors onto the application's error taxonomy using the
//! HTTP status code and the message GitHub attaches to the response.

use crate::error::StreamgitError;

/// Classifies an octocrab error into a specific StreamgitError
pub fn classify_github_error(err: octocrab::Error) -> StreamgitError {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            let mut message = source.message.clone();

            // 422 responses carry the useful part in `errors[].message`
            if let Some(details) = source.errors.as_ref() {
                let extra: Vec<String> = details
                    .iter()
                    .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
                    .map(str::to_string)
                    .collect();
                if !extra.is_empty() {
                    message = format!("{} ({})", message, extra.join("; "));
                }
            }

            let classified = classify_status(source.status_code.as_u16(), &message);
            if let StreamgitError::RateLimit(_) = classified {
                tracing::warn!(status = source.status_code.as_u16(), "GitHub rate limit reached");
            }
            classified
        }
        octocrab::Error::Serde { .. } | octocrab::Error::Json { .. } => StreamgitError::Api {
            status: 200,
            message: format!("Failed to parse response: {:?}", err),
        },
        other => StreamgitError::Network(other.to_string()),
    }
}

/// Map an HTTP status and GitHub message onto an error variant
pub fn classify_status(status: u16, message: &str) -> StreamgitError {
    match status {
        401 => StreamgitError::Auth(message.to_string()),
        403 if is_rate_limit_error(message) => StreamgitError::RateLimit(message.to_string()),
        403 => StreamgitError::Permission(message.to_string()),
        404 => StreamgitError::NotFound(message.to_string()),
        409 => StreamgitError::Conflict(message.to_string()),
        422 if is_already_exists_error(message) => StreamgitError::Conflict(message.to_string()),
        422 => StreamgitError::Validation(message.to_string()),
        429 => StreamgitError::RateLimit(message.to_string()),
        _ => StreamgitError::Api {
            status,
            message: message.to_string(),
        },
    }
}

/// Check if error is a rate limit error
fn is_rate_limit_error(error_message: &str) -> bool {
    let lower = error_message.to_lowercase();
    lower.contains("rate limit") || lower.contains("limit exceeded")
}

/// Check if a validation failure is GitHub's "name already exists"
fn is_already_exists_error(error_message: &str) -> bool {
    error_message.to_lowercase().contains("already exists")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_maps_to_auth() {
        assert!(matches!(
            classify_status(401, "Bad credentials"),
            StreamgitError::Auth(_)
        ));
    }

    #[test]
    fn test_forbidden_splits_rate_limit_and_permission() {
        assert!(matches!(
            classify_status(403, "API rate limit exceeded for user ID 1."),
            StreamgitError::RateLimit(_)
        ));
        assert!(matches!(
            classify_status(403, "Must have admin rights to Repository."),
            StreamgitError::Permission(_)
        ));
        assert!(matches!(
            classify_status(429, "Too Many Requests"),
            StreamgitError::RateLimit(_)
        ));
    }

    #[test]
    fn test_unprocessable_splits_conflict_and_validation() {
        assert!(matches!(
            classify_status(
                422,
                "Repository creation failed. (name already exists on this account)"
            ),
            StreamgitError::Conflict(_)
        ));
        assert!(matches!(
            classify_status(422, "Repository creation failed. (name is too long)"),
            StreamgitError::Validation(_)
        ));
    }

    #[test]
    fn test_other_statuses() {
        assert!(matches!(
            classify_status(404, "Not Found"),
            StreamgitError::NotFound(_)
        ));
        assert!(matches!(
            classify_status(409, "Git Repository is empty."),
            StreamgitError::Conflict(_)
        ));
        match classify_status(502, "Bad Gateway") {
            StreamgitError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
