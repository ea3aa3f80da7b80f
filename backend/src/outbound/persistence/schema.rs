//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` (configured in `diesel.toml`) after a migration
//! changes a table.

diesel::table! {
    /// One enrollment per user; `user_id` is unique and is the upsert key.
    enrollments (id) {
        id -> Int4,
        /// Identifier issued by the identity service.
        user_id -> Int4,
        name -> Text,
        cpf -> Text,
        birthday -> Timestamptz,
        phone -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// At most one address per enrollment; `enrollment_id` is unique and is
    /// the upsert key.
    addresses (id) {
        id -> Int4,
        enrollment_id -> Int4,
        cep -> Text,
        street -> Text,
        city -> Text,
        number -> Text,
        state -> Text,
        neighborhood -> Text,
        /// Optional complement; NULL when never supplied.
        address_detail -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(addresses -> enrollments (enrollment_id));
diesel::allow_tables_to_appear_in_same_query!(enrollments, addresses);
