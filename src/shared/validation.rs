//! Validation Utilities

use validator::ValidationErrors;

/// Human-readable first validation message, for re-rendering a form
/// with an error banner instead of failing the request.
pub fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Invalid input".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
        name: String,
    }

    #[test]
    fn test_first_message_picks_a_human_message() {
        let sample = Sample { name: String::new() };
        let errors = sample.validate().unwrap_err();

        assert_eq!(first_message(&errors), "Name must be at least 3 characters");
    }

    #[test]
    fn test_first_message_falls_back_without_a_custom_message() {
        #[derive(Validate)]
        struct Bare {
            #[validate(length(min = 3))]
            name: String,
        }

        let errors = Bare { name: String::new() }.validate().unwrap_err();

        assert_eq!(first_message(&errors), "Invalid input");
    }
}
