use bakecake::errors::{BakeCakeError, Result};
use std::error::Error;

#[cfg(test)]
mod error_creation_tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = BakeCakeError::validation("discount out of range");

        assert!(matches!(error, BakeCakeError::Validation(_)));
        assert!(error.to_string().contains("Validation Error"));
        assert!(error.to_string().contains("discount out of range"));
    }

    #[test]
    fn test_conflict_error() {
        let error = BakeCakeError::conflict("promo code already exists");

        assert!(matches!(error, BakeCakeError::Conflict(_)));
        assert!(error.to_string().contains("Conflict Error"));
        assert!(error.to_string().contains("promo code already exists"));
    }

    #[test]
    fn test_data_integrity_error() {
        let error = BakeCakeError::data_integrity("cake references missing level");

        assert!(matches!(error, BakeCakeError::DataIntegrity(_)));
        assert!(error.to_string().contains("Data Integrity Error"));
    }

    #[test]
    fn test_missing_order_data_error() {
        let error = BakeCakeError::missing_order_data("no delivery time");

        assert!(matches!(error, BakeCakeError::MissingOrderData(_)));
        assert!(error.to_string().contains("Missing Order Data"));
        assert!(error.to_string().contains("no delivery time"));
    }

    #[test]
    fn test_service_unavailable_error() {
        let error = BakeCakeError::service_unavailable("shortener timed out");

        assert!(matches!(error, BakeCakeError::ServiceUnavailable(_)));
        assert!(error.to_string().contains("Service Unavailable"));
    }

    #[test]
    fn test_not_found_error() {
        let error = BakeCakeError::not_found("order not found");

        assert!(matches!(error, BakeCakeError::NotFound(_)));
        assert!(error.to_string().contains("Resource Not Found"));
    }

    #[test]
    fn test_database_errors() {
        let config = BakeCakeError::database_config("DATABASE_URL is not set");
        let connection = BakeCakeError::database_connection("refused");
        let operation = BakeCakeError::database_operation("insert failed");

        assert!(config.to_string().contains("Database Configuration Error"));
        assert!(connection.to_string().contains("Database Connection Error"));
        assert!(operation.to_string().contains("Database Operation Error"));
    }
}

#[cfg(test)]
mod error_metadata_tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(BakeCakeError::validation("x").code(), "E001");
        assert_eq!(BakeCakeError::conflict("x").code(), "E002");
        assert_eq!(BakeCakeError::data_integrity("x").code(), "E003");
        assert_eq!(BakeCakeError::missing_order_data("x").code(), "E004");
        assert_eq!(BakeCakeError::not_found("x").code(), "E005");
        assert_eq!(BakeCakeError::service_unavailable("x").code(), "E006");
    }

    #[test]
    fn test_message_accessor() {
        let error = BakeCakeError::validation("price must be non-negative");
        assert_eq!(error.message(), "price must be non-negative");
    }
}

#[cfg(test)]
mod error_conversion_tests {
    use super::*;

    #[test]
    fn test_serde_json_error_conversion() {
        let invalid_json = "{invalid json";
        let json_error = serde_json::from_str::<serde_json::Value>(invalid_json).unwrap_err();
        let error: BakeCakeError = json_error.into();

        assert!(matches!(error, BakeCakeError::Serialization(_)));
        assert!(error.to_string().contains("Serialization Error"));
    }

    #[test]
    fn test_chrono_parse_error_conversion() {
        let parse_error = chrono::DateTime::parse_from_rfc3339("not a date").unwrap_err();
        let error: BakeCakeError = parse_error.into();

        assert!(matches!(error, BakeCakeError::DateParse(_)));
        assert!(error.to_string().contains("Date Parse Error"));
    }
}

#[cfg(test)]
mod error_trait_tests {
    use super::*;

    #[test]
    fn test_error_trait_implementation() {
        let error = BakeCakeError::validation("bad input");
        let dyn_error: &dyn Error = &error;

        assert!(dyn_error.source().is_none());
        assert!(!dyn_error.to_string().is_empty());
    }

    #[test]
    fn test_result_alias() {
        fn failing() -> Result<()> {
            Err(BakeCakeError::not_found("nothing here"))
        }

        assert!(failing().is_err());
    }

    #[test]
    fn test_error_is_cloneable() {
        let error = BakeCakeError::conflict("duplicate");
        let cloned = error.clone();

        assert_eq!(error.to_string(), cloned.to_string());
    }
}
