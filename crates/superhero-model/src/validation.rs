//! Field constraints for superhero drafts.
//!
//! Rules run in a fixed order: nickname, real name, superpowers, origin
//! description, catch phrase, images. Lengths count Unicode scalar values.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::SuperheroDraft;

/// Minimum trimmed nickname length.
pub const NICKNAME_MIN: usize = 2;
/// Maximum trimmed nickname length.
pub const NICKNAME_MAX: usize = 50;
/// Minimum trimmed real name length.
pub const REAL_NAME_MIN: usize = 2;
/// Maximum trimmed real name length.
pub const REAL_NAME_MAX: usize = 100;
/// Maximum origin description length.
pub const ORIGIN_DESCRIPTION_MAX: usize = 1000;
/// Maximum catch phrase length.
pub const CATCH_PHRASE_MAX: usize = 200;

/// Draft fields that carry constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `nickname`
    Nickname,
    /// `real_name`
    RealName,
    /// `origin_description`
    OriginDescription,
    /// `superpowers`
    Superpowers,
    /// `catch_phrase`
    CatchPhrase,
    /// `images`
    Images,
}

impl Field {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nickname => "nickname",
            Self::RealName => "real_name",
            Self::OriginDescription => "origin_description",
            Self::Superpowers => "superpowers",
            Self::CatchPhrase => "catch_phrase",
            Self::Images => "images",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure.
///
/// `field` is a wire name. Besides the draft fields it may name a form-only
/// input such as `submit`, so it is kept as a string. `index` points into
/// list fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Wire name of the offending field.
    pub field: String,
    /// Position within a list field, if the failure concerns one element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Human-readable explanation.
    pub message: String,
}

impl Violation {
    /// Violation against a whole field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            index: None,
            message: message.into(),
        }
    }

    /// Violation against one element of a list field.
    pub fn at_index(field: impl Into<String>, index: usize, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            index: Some(index),
            message: message.into(),
        }
    }

    /// Whether this violation concerns `field`.
    #[must_use]
    pub fn is_for(&self, field: &str) -> bool {
        self.field == field
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{index}]: {}", self.field, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Check `draft` against every rule and collect all violations.
///
/// An empty vector means the draft is valid.
///
/// ```
/// use superhero_model::{SuperheroDraft, validate_draft};
///
/// let draft = SuperheroDraft::new("Superman", "Clark Kent", ["flying", "super strength"]);
/// assert!(validate_draft(&draft).is_empty());
/// ```
#[must_use]
pub fn validate_draft(draft: &SuperheroDraft) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_name(
        &mut violations,
        Field::Nickname,
        "Nickname",
        &draft.nickname,
        NICKNAME_MIN,
        NICKNAME_MAX,
    );
    check_name(
        &mut violations,
        Field::RealName,
        "Real name",
        &draft.real_name,
        REAL_NAME_MIN,
        REAL_NAME_MAX,
    );
    check_superpowers(&mut violations, &draft.superpowers);
    check_max_length(
        &mut violations,
        Field::OriginDescription,
        "Origin description",
        draft.origin_description.as_deref(),
        ORIGIN_DESCRIPTION_MAX,
    );
    check_max_length(
        &mut violations,
        Field::CatchPhrase,
        "Catch phrase",
        draft.catch_phrase.as_deref(),
        CATCH_PHRASE_MAX,
    );
    check_images(&mut violations, &draft.images);
    violations
}

/// Return the first violation in rule order, if any.
///
/// ```
/// use superhero_model::{SuperheroDraft, first_violation};
///
/// let draft = SuperheroDraft::new("A", "", Vec::<String>::new());
/// let violation = first_violation(&draft).expect("invalid draft");
/// assert_eq!(violation.field, "nickname");
/// ```
#[must_use]
pub fn first_violation(draft: &SuperheroDraft) -> Option<Violation> {
    validate_draft(draft).into_iter().next()
}

fn check_name(
    violations: &mut Vec<Violation>,
    field: Field,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        violations.push(Violation::new(field.as_str(), format!("{label} is required")));
        return;
    }
    let length = trimmed.chars().count();
    if length < min {
        violations.push(Violation::new(
            field.as_str(),
            format!("{label} must be at least {min} characters"),
        ));
    } else if length > max {
        violations.push(Violation::new(
            field.as_str(),
            format!("{label} must be at most {max} characters"),
        ));
    }
}

fn check_superpowers(violations: &mut Vec<Violation>, superpowers: &[String]) {
    if superpowers.is_empty() {
        violations.push(Violation::new(
            Field::Superpowers.as_str(),
            "At least one superpower required",
        ));
        return;
    }
    for (index, power) in superpowers.iter().enumerate() {
        if power.trim().is_empty() {
            violations.push(Violation::at_index(
                Field::Superpowers.as_str(),
                index,
                format!("Superpower {} must not be blank", index + 1),
            ));
        }
    }
}

fn check_max_length(
    violations: &mut Vec<Violation>,
    field: Field,
    label: &str,
    value: Option<&str>,
    max: usize,
) {
    if value.is_some_and(|text| text.chars().count() > max) {
        violations.push(Violation::new(
            field.as_str(),
            format!("{label} must be at most {max} characters"),
        ));
    }
}

fn check_images(violations: &mut Vec<Violation>, images: &[String]) {
    for (index, image) in images.iter().enumerate() {
        // The URL parser strips surrounding whitespace, so padded input would pass.
        if image.trim() != image || Url::parse(image).is_err() {
            violations.push(Violation::at_index(
                Field::Images.as_str(),
                index,
                format!("Image {} must be a valid URL", index + 1),
            ));
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Rule coverage for draft validation.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn superman() -> SuperheroDraft {
        SuperheroDraft::new("Superman", "Clark Kent", ["flying", "super strength"])
    }

    fn fields(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[rstest]
    fn well_formed_draft_passes(superman: SuperheroDraft) {
        let draft = superman
            .with_origin_description("From Krypton")
            .with_catch_phrase("I'm Superman!")
            .with_image("https://example.com/superman.jpg");
        assert!(validate_draft(&draft).is_empty());
        assert!(first_violation(&draft).is_none());
    }

    #[rstest]
    #[case("A")]
    #[case(" B ")]
    #[case("é")]
    fn short_nickname_is_rejected(superman: SuperheroDraft, #[case] nickname: &str) {
        let draft = SuperheroDraft {
            nickname: nickname.to_owned(),
            ..superman
        };
        let violations = validate_draft(&draft);
        assert_eq!(
            violations,
            vec![Violation::new(
                "nickname",
                "Nickname must be at least 2 characters"
            )]
        );
    }

    #[rstest]
    fn blank_nickname_is_required(superman: SuperheroDraft) {
        let draft = SuperheroDraft {
            nickname: "   ".to_owned(),
            ..superman
        };
        let violation = first_violation(&draft).expect("violation");
        assert_eq!(violation.message, "Nickname is required");
    }

    #[rstest]
    fn long_names_are_rejected(superman: SuperheroDraft) {
        let draft = SuperheroDraft {
            nickname: "n".repeat(NICKNAME_MAX + 1),
            real_name: "r".repeat(REAL_NAME_MAX + 1),
            ..superman
        };
        assert_eq!(fields(&validate_draft(&draft)), vec!["nickname", "real_name"]);
    }

    #[rstest]
    fn names_at_the_bounds_pass(superman: SuperheroDraft) {
        let draft = SuperheroDraft {
            nickname: "n".repeat(NICKNAME_MAX),
            real_name: "rk".to_owned(),
            ..superman
        };
        assert!(validate_draft(&draft).is_empty());
    }

    #[rstest]
    fn empty_superpowers_are_rejected(superman: SuperheroDraft) {
        let draft = SuperheroDraft {
            superpowers: Vec::new(),
            ..superman
        };
        let violations = validate_draft(&draft);
        assert_eq!(
            violations,
            vec![Violation::new(
                "superpowers",
                "At least one superpower required"
            )]
        );
    }

    #[rstest]
    fn blank_superpower_is_reported_by_index(superman: SuperheroDraft) {
        let draft = SuperheroDraft {
            superpowers: vec!["flying".to_owned(), " ".to_owned()],
            ..superman
        };
        let violations = validate_draft(&draft);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].index, Some(1));
    }

    #[rstest]
    fn optional_text_limits_apply(superman: SuperheroDraft) {
        let draft = superman
            .with_origin_description("o".repeat(ORIGIN_DESCRIPTION_MAX + 1))
            .with_catch_phrase("c".repeat(CATCH_PHRASE_MAX + 1));
        assert_eq!(
            fields(&validate_draft(&draft)),
            vec!["origin_description", "catch_phrase"]
        );
    }

    #[rstest]
    fn invalid_image_cites_its_index(superman: SuperheroDraft) {
        let draft = superman
            .with_image("https://example.com/ok.png")
            .with_image("not-a-url");
        let violations = validate_draft(&draft);
        assert_eq!(
            violations,
            vec![Violation::at_index(
                "images",
                1,
                "Image 2 must be a valid URL"
            )]
        );
    }

    #[rstest]
    #[case("  https://example.com/x.png ")]
    #[case("https://example.com/x.png\n")]
    #[case("\thttps://example.com/x.png")]
    fn padded_image_url_is_rejected(superman: SuperheroDraft, #[case] image: &str) {
        let draft = superman.with_image(image);
        assert_eq!(
            validate_draft(&draft),
            vec![Violation::at_index(
                "images",
                0,
                "Image 1 must be a valid URL"
            )]
        );
    }

    #[rstest]
    fn all_violations_are_collected_in_rule_order() {
        let draft = SuperheroDraft {
            nickname: "A".to_owned(),
            real_name: String::new(),
            images: vec!["nope".to_owned()],
            ..SuperheroDraft::default()
        };
        let violations = validate_draft(&draft);
        assert_eq!(
            fields(&violations),
            vec!["nickname", "real_name", "superpowers", "images"]
        );
        let first = first_violation(&draft).expect("violation");
        assert_eq!(first, violations[0]);
    }

    #[rstest]
    fn violation_serialises_index_only_when_present() {
        let whole = serde_json::to_value(Violation::new("nickname", "bad")).expect("json");
        assert_eq!(whole, serde_json::json!({ "field": "nickname", "message": "bad" }));
        let element = serde_json::to_value(Violation::at_index("images", 0, "bad")).expect("json");
        assert_eq!(
            element,
            serde_json::json!({ "field": "images", "index": 0, "message": "bad" })
        );
    }
}
