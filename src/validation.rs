use crate::constants::{MAX_DISPLAY_NAME_LEN, MAX_WINDOW_SECS};
use crate::error::UsageError;
use crate::models::TrackedApp;
use std::collections::HashSet;

/// Validate the trailing window length in seconds.
pub fn validate_window_secs(window_secs: i64) -> Result<(), UsageError> {
    if window_secs <= 0 {
        return Err(UsageError::InvalidInput {
            field: "window_secs",
            reason: "must be positive".into(),
        });
    }
    if window_secs > MAX_WINDOW_SECS {
        return Err(UsageError::InvalidInput {
            field: "window_secs",
            reason: format!("cannot exceed {MAX_WINDOW_SECS} seconds"),
        });
    }
    Ok(())
}

/// Validate a tracked-app registry.
/// Identifiers and display names must be non-empty and unique, since display
/// names become report keys.
pub fn validate_registry(registry: &[TrackedApp]) -> Result<(), UsageError> {
    let mut identifiers = HashSet::new();
    let mut names = HashSet::new();

    for app in registry {
        if app.identifier.trim().is_empty() {
            return Err(UsageError::InvalidInput {
                field: "identifier",
                reason: "cannot be empty".into(),
            });
        }
        let name = app.display_name.trim();
        if name.is_empty() {
            return Err(UsageError::InvalidInput {
                field: "display_name",
                reason: format!("cannot be empty for '{}'", app.identifier),
            });
        }
        if name.len() > MAX_DISPLAY_NAME_LEN {
            return Err(UsageError::InvalidInput {
                field: "display_name",
                reason: format!("cannot exceed {MAX_DISPLAY_NAME_LEN} characters"),
            });
        }
        if !identifiers.insert(app.identifier) {
            return Err(UsageError::InvalidInput {
                field: "identifier",
                reason: format!("'{}' listed twice", app.identifier),
            });
        }
        if !names.insert(app.display_name) {
            return Err(UsageError::InvalidInput {
                field: "display_name",
                reason: format!("'{}' listed twice", app.display_name),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SOCIAL_MEDIA_APPS;

    #[test]
    fn test_validate_window_secs() {
        assert!(validate_window_secs(86400).is_ok());
        assert!(validate_window_secs(1).is_ok());
        assert!(validate_window_secs(MAX_WINDOW_SECS).is_ok());
        assert!(validate_window_secs(0).is_err());
        assert!(validate_window_secs(-60).is_err());
        assert!(validate_window_secs(MAX_WINDOW_SECS + 1).is_err());
    }

    #[test]
    fn test_builtin_registry_is_valid() {
        assert!(validate_registry(SOCIAL_MEDIA_APPS).is_ok());
    }

    #[test]
    fn test_empty_registry_is_valid() {
        assert!(validate_registry(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let registry = [
            TrackedApp::new("com.example.a", "A"),
            TrackedApp::new("com.example.a", "B"),
        ];
        let err = validate_registry(&registry).unwrap_err();
        assert!(matches!(err, UsageError::InvalidInput { field: "identifier", .. }));
    }

    #[test]
    fn test_duplicate_display_name_rejected() {
        let registry = [
            TrackedApp::new("com.example.a", "Same"),
            TrackedApp::new("com.example.b", "Same"),
        ];
        let err = validate_registry(&registry).unwrap_err();
        assert!(matches!(err, UsageError::InvalidInput { field: "display_name", .. }));
    }

    #[test]
    fn test_blank_fields_rejected() {
        assert!(validate_registry(&[TrackedApp::new("  ", "A")]).is_err());
        assert!(validate_registry(&[TrackedApp::new("com.example.a", "")]).is_err());
    }
}
