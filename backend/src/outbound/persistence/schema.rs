//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Superhero records.
    ///
    /// `created_at` orders listings; `updated_at` is refreshed on every update.
    superheroes (id) {
        /// Primary key assigned by the catalogue service (UUID v4).
        id -> Uuid,
        nickname -> Text,
        real_name -> Text,
        origin_description -> Nullable<Text>,
        /// Never empty; enforced by a check constraint.
        superpowers -> Array<Text>,
        catch_phrase -> Nullable<Text>,
        images -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
