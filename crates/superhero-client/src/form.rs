//! Raw form input for creating and editing records.

use std::collections::BTreeMap;

use superhero_model::{Superhero, SuperheroDraft, Violation, validate_draft};
use url::Url;

use crate::ClientError;

/// Pseudo-field for failures that belong to no single input.
pub const SUBMIT_FIELD: &str = "submit";
/// Pseudo-field for the pending image URL input.
pub const NEW_IMAGE_FIELD: &str = "new_image_url";

const INVALID_IMAGE_MESSAGE: &str = "Please enter a valid URL";
const SUBMIT_FALLBACK_MESSAGE: &str = "Error saving hero";

/// Form state as typed, before trimming.
///
/// `superpowers` is a comma-separated list. Images are added one at a time
/// through `new_image_url`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroForm {
    /// Nickname input.
    pub nickname: String,
    /// Real name input.
    pub real_name: String,
    /// Origin input.
    pub origin_description: String,
    /// Comma-separated powers.
    pub superpowers: String,
    /// Catch phrase input.
    pub catch_phrase: String,
    /// Accepted image URLs.
    pub images: Vec<String>,
    /// Pending image URL.
    pub new_image_url: String,
    errors: BTreeMap<String, Vec<String>>,
}

fn optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

impl HeroForm {
    /// Empty form for a new record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Form prefilled from an existing record.
    #[must_use]
    pub fn from_hero(hero: &Superhero) -> Self {
        Self {
            nickname: hero.nickname.clone(),
            real_name: hero.real_name.clone(),
            origin_description: hero.origin_description.clone().unwrap_or_default(),
            superpowers: hero.superpowers.join(", "),
            catch_phrase: hero.catch_phrase.clone().unwrap_or_default(),
            images: hero.images.clone(),
            ..Self::default()
        }
    }

    /// Accept the pending image URL.
    ///
    /// Blank input is ignored. An unparsable URL is kept in the input and
    /// reported against [`NEW_IMAGE_FIELD`].
    pub fn add_image(&mut self) -> bool {
        let candidate = self.new_image_url.trim().to_owned();
        if candidate.is_empty() {
            return false;
        }
        self.errors.remove(NEW_IMAGE_FIELD);
        self.errors.remove("images");
        if Url::parse(&candidate).is_err() {
            self.push_error(NEW_IMAGE_FIELD, INVALID_IMAGE_MESSAGE);
            return false;
        }
        self.images.push(candidate);
        self.new_image_url.clear();
        true
    }

    /// Drop the image at `index`, if present.
    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Trimmed draft with blank powers and images dropped.
    #[must_use]
    pub fn to_draft(&self) -> SuperheroDraft {
        SuperheroDraft {
            nickname: self.nickname.trim().to_owned(),
            real_name: self.real_name.trim().to_owned(),
            origin_description: optional(&self.origin_description),
            superpowers: self
                .superpowers
                .split(',')
                .filter_map(optional)
                .collect(),
            catch_phrase: optional(&self.catch_phrase),
            images: self.images.iter().map(String::as_str).filter_map(optional).collect(),
        }
    }

    /// Validate the draft, replacing any previous errors.
    ///
    /// Returns the draft when it is ready to submit.
    pub fn submit(&mut self) -> Option<SuperheroDraft> {
        let draft = self.to_draft();
        self.errors.clear();
        let violations = validate_draft(&draft);
        if violations.is_empty() {
            return Some(draft);
        }
        self.apply_violations(&violations);
        None
    }

    /// Attach a failed save to the form.
    ///
    /// Field violations land on their inputs; anything else becomes a
    /// [`SUBMIT_FIELD`] error.
    pub fn apply_failure(&mut self, err: &ClientError) {
        self.errors.clear();
        let violations = err.violations();
        if violations.is_empty() {
            let message = err.to_string();
            let text = if message.trim().is_empty() {
                SUBMIT_FALLBACK_MESSAGE.to_owned()
            } else {
                message
            };
            self.push_error(SUBMIT_FIELD, text);
        } else {
            self.apply_violations(violations);
        }
    }

    fn apply_violations(&mut self, violations: &[Violation]) {
        for violation in violations {
            self.push_error(&violation.field, violation.message.clone());
        }
    }

    fn push_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Errors keyed by field, in field order.
    #[must_use]
    pub const fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Messages for one field, for inline highlighting.
    #[must_use]
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map_or(&[], Vec::as_slice)
    }

    /// Whether any input is flagged.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
