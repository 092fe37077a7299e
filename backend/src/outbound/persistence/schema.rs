//! Diesel table definitions.
//!
//! These must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered profiles keyed by the identity provider's subject.
    users (id) {
        id -> Text,
        /// Unique lowercase handle; null until registration completes.
        username -> Nullable<Text>,
        email -> Text,
        display_name -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Showcase entries submitted by registered users.
    projects (id) {
        id -> Uuid,
        user_id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        slug -> Text,
        template_type -> Text,
        repo_url -> Nullable<Text>,
        link -> Nullable<Text>,
        metadata -> Nullable<Jsonb>,
        owner_username -> Nullable<Text>,
        owner_email -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published starter templates.
    templates (id) {
        id -> Uuid,
        slug -> Text,
        title -> Text,
        description -> Nullable<Text>,
        template_type -> Text,
        code -> Jsonb,
        user_id -> Text,
        views -> Int4,
        likes -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Code snapshots staged by the external IDE for publishing.
    publish_shares (id) {
        id -> Uuid,
        share_id -> Text,
        code -> Jsonb,
        template_type -> Text,
        created_at -> Timestamptz,
        expires_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(projects -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(projects, publish_shares, templates, users);
