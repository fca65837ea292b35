use super::common::*;
use crate::workflows::applications::messages::Locale;
use crate::workflows::applications::validation::{
    validate, validate_field, FormField, ResumeMeta, ValidationError, MAX_RESUME_BYTES,
};

#[test]
fn name_needs_two_characters_after_trimming() {
    assert_eq!(
        validate_field(FormField::Name, "   ", None),
        Err(ValidationError::Required(FormField::Name))
    );
    assert_eq!(
        validate_field(FormField::Name, " a ", None),
        Err(ValidationError::TooShort {
            field: FormField::Name,
            min: 2
        })
    );
    assert_eq!(validate_field(FormField::Name, "  ab  ", None), Ok(()));
    assert_eq!(validate_field(FormField::Name, "ნი", None), Ok(()));
}

#[test]
fn email_requires_at_sign_and_dot_after_it() {
    assert_eq!(validate_field(FormField::Email, "a@b.c", None), Ok(()));
    for invalid in ["ab.c", "a@bc", "a@@b.c", "a b@c.d"] {
        assert_eq!(
            validate_field(FormField::Email, invalid, None),
            Err(ValidationError::InvalidFormat(FormField::Email)),
            "{invalid} should be rejected"
        );
    }
    assert_eq!(
        validate_field(FormField::Email, "", None),
        Err(ValidationError::Required(FormField::Email))
    );
}

#[test]
fn email_pattern_checks_the_value_as_typed() {
    assert_eq!(
        validate_field(FormField::Email, " a@b.c", None),
        Err(ValidationError::InvalidFormat(FormField::Email))
    );
}

#[test]
fn phone_checks_length_before_characters() {
    assert_eq!(
        validate_field(FormField::Phone, "12345678", None),
        Err(ValidationError::TooShort {
            field: FormField::Phone,
            min: 9
        })
    );
    assert_eq!(validate_field(FormField::Phone, "+995 (555) 12-34-56", None), Ok(()));
    assert_eq!(
        validate_field(FormField::Phone, "555-123-abc", None),
        Err(ValidationError::InvalidFormat(FormField::Phone))
    );
}

#[test]
fn resume_must_be_a_pdf_within_the_size_limit() {
    assert_eq!(
        validate_field(FormField::Resume, "", None),
        Err(ValidationError::Required(FormField::Resume))
    );
    assert_eq!(
        validate_field(FormField::Resume, "", Some(&pdf_meta(MAX_RESUME_BYTES))),
        Ok(())
    );
    assert_eq!(
        validate_field(FormField::Resume, "", Some(&pdf_meta(MAX_RESUME_BYTES + 1))),
        Err(ValidationError::ResumeTooLarge)
    );

    let png = ResumeMeta {
        content_type: "image/png".to_string(),
        size: 10,
    };
    assert_eq!(
        validate_field(FormField::Resume, "", Some(&png)),
        Err(ValidationError::ResumeNotPdf)
    );

    let oversized_doc = ResumeMeta {
        content_type: "application/msword".to_string(),
        size: MAX_RESUME_BYTES * 2,
    };
    assert_eq!(
        validate_field(FormField::Resume, "", Some(&oversized_doc)),
        Err(ValidationError::ResumeNotPdf)
    );
}

#[test]
fn unknown_field_names_always_pass() {
    assert_eq!(validate("vacancyId", "", None), Ok(()));
    assert_eq!(
        validate("email", "nope", None),
        Err(ValidationError::InvalidFormat(FormField::Email))
    );
}

#[test]
fn messages_follow_the_locale() {
    let error = ValidationError::Required(FormField::Name);
    assert_eq!(error.message(Locale::English), "Full name is required");
    assert_eq!(error.message(Locale::Georgian), "სახელი და გვარი სავალდებულოა");
    assert_eq!(
        ValidationError::TooShort {
            field: FormField::Phone,
            min: 9
        }
        .message(Locale::English),
        "Phone number must be at least 9 characters long"
    );
    assert_eq!(ValidationError::ResumeTooLarge.field(), FormField::Resume);
}
