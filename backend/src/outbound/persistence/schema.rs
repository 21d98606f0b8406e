//! Diesel table definitions for the campus schema.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Accounts. `password_hash` never leaves the persistence layer except
    /// through credential lookups.
    users (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        password_hash -> Text,
        role -> Varchar,
        npm -> Nullable<Varchar>,
        class_id -> Nullable<Int8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    class (id) {
        id -> Int8,
        name -> Varchar,
        join_code -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per lecturer; `user_id` is unique.
    lecture (id) {
        id -> Int8,
        name -> Varchar,
        user_id -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    room (id) {
        id -> Int8,
        name -> Varchar,
        url -> Text,
        lecture_id -> Int8,
        start_room -> Timestamp,
        end_room -> Timestamp,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    matakuliah (id) {
        id -> Int8,
        name -> Varchar,
        kode_matkul -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(users -> class (class_id));
diesel::joinable!(lecture -> users (user_id));
diesel::joinable!(room -> lecture (lecture_id));

diesel::allow_tables_to_appear_in_same_query!(users, class, lecture, room, matakuliah);
