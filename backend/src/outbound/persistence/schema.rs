//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations under
//! `backend/migrations` exactly. `diesel print-schema` regenerates them from
//! a live database.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique, trimmed login name.
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog posts. `author_id` has no foreign key so posts survive account
    /// removal.
    posts (id) {
        id -> Uuid,
        title -> Varchar,
        content -> Text,
        author_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Festival reference calendar.
    festivals (id) {
        id -> Int4,
        name -> Varchar,
        /// English month name, e.g. `March`.
        month -> Varchar,
        date -> Date,
        region -> Varchar,
        year -> Int4,
    }
}

diesel::table! {
    /// State heritage profiles keyed by reference id (e.g. `INMH`).
    states (state_id) {
        state_id -> Varchar,
        name -> Varchar,
        capital -> Varchar,
        summary -> Text,
        highlights -> Array<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, posts);
