//! Catalogue record types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when a string is not a valid [`SuperheroId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("superhero id must be a valid UUID")]
pub struct SuperheroIdError;

/// Server-assigned identifier of a catalogue record.
///
/// Serialised as the hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuperheroId(Uuid);

impl SuperheroId {
    /// Mint a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SuperheroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SuperheroId {
    type Err = SuperheroIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| SuperheroIdError)
    }
}

/// Every mutable field of a catalogue record.
///
/// This is the body of create and update requests. Absent JSON fields
/// deserialise to empty values so validation can report them by name.
///
/// ```
/// use superhero_model::SuperheroDraft;
///
/// let draft: SuperheroDraft = serde_json::from_str(r#"{"nickname":"Batman"}"#)
///     .expect("partial drafts deserialise");
/// assert!(draft.real_name.is_empty());
/// assert!(draft.superpowers.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuperheroDraft {
    /// Public alias, 2 to 50 characters once trimmed.
    pub nickname: String,
    /// Civilian name, 2 to 100 characters once trimmed.
    pub real_name: String,
    /// Optional origin story.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_description: Option<String>,
    /// Ordered list of powers; never empty.
    pub superpowers: Vec<String>,
    /// Optional signature line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catch_phrase: Option<String>,
    /// Ordered list of absolute image URLs.
    pub images: Vec<String>,
}

impl SuperheroDraft {
    /// Start a draft from the required fields.
    #[must_use]
    pub fn new<S>(nickname: impl Into<String>, real_name: impl Into<String>, superpowers: S) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            nickname: nickname.into(),
            real_name: real_name.into(),
            superpowers: superpowers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Attach an origin story.
    #[must_use]
    pub fn with_origin_description(mut self, origin: impl Into<String>) -> Self {
        self.origin_description = Some(origin.into());
        self
    }

    /// Attach a catch phrase.
    #[must_use]
    pub fn with_catch_phrase(mut self, phrase: impl Into<String>) -> Self {
        self.catch_phrase = Some(phrase.into());
        self
    }

    /// Append an image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }
}

/// A stored catalogue record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Superhero {
    /// Identifier assigned on creation.
    pub id: SuperheroId,
    /// Public alias.
    pub nickname: String,
    /// Civilian name.
    pub real_name: String,
    /// Optional origin story.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_description: Option<String>,
    /// Ordered list of powers.
    #[serde(default)]
    pub superpowers: Vec<String>,
    /// Optional signature line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catch_phrase: Option<String>,
    /// Ordered list of image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Superhero {
    /// Build a record from an identifier and the mutable fields.
    #[must_use]
    pub fn from_draft(id: SuperheroId, draft: SuperheroDraft) -> Self {
        let SuperheroDraft {
            nickname,
            real_name,
            origin_description,
            superpowers,
            catch_phrase,
            images,
        } = draft;
        Self {
            id,
            nickname,
            real_name,
            origin_description,
            superpowers,
            catch_phrase,
            images,
        }
    }

    /// Copy the mutable fields back into a draft, e.g. to prefill an edit form.
    #[must_use]
    pub fn to_draft(&self) -> SuperheroDraft {
        SuperheroDraft {
            nickname: self.nickname.clone(),
            real_name: self.real_name.clone(),
            origin_description: self.origin_description.clone(),
            superpowers: self.superpowers.clone(),
            catch_phrase: self.catch_phrase.clone(),
            images: self.images.clone(),
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]
mod tests {
    //! Serialisation and identifier parsing coverage.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn id_round_trips_through_display() {
        let id = SuperheroId::random();
        let parsed: SuperheroId = id.to_string().parse().expect("valid id");
        assert_eq!(parsed, id);
    }

    #[rstest]
    #[case("")]
    #[case("not-an-id")]
    #[case("64b7f0c2e4b0a1b2c3d4e5f6")]
    fn id_rejects_non_uuids(#[case] raw: &str) {
        assert_eq!(raw.parse::<SuperheroId>(), Err(SuperheroIdError));
    }

    #[rstest]
    fn record_serialises_with_snake_case_fields() {
        let id = SuperheroId::from_uuid(Uuid::nil());
        let hero = Superhero::from_draft(
            id,
            SuperheroDraft::new("Superman", "Clark Kent", ["flying"]).with_catch_phrase("Up!"),
        );
        let value = serde_json::to_value(&hero).expect("serialise record");
        assert_eq!(
            value,
            json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "nickname": "Superman",
                "real_name": "Clark Kent",
                "superpowers": ["flying"],
                "catch_phrase": "Up!",
                "images": [],
            })
        );
    }

    #[rstest]
    fn to_draft_keeps_every_mutable_field() {
        let draft = SuperheroDraft::new("Batman", "Bruce Wayne", ["stealth", "gadgets"])
            .with_origin_description("Gotham")
            .with_image("https://example.com/batman.png");
        let hero = Superhero::from_draft(SuperheroId::random(), draft.clone());
        assert_eq!(hero.to_draft(), draft);
    }
}
