//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. `diesel
//! print-schema` can regenerate them from a migrated database.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Primary key generated by the database.
        id -> Int8,
        /// Display name; never blank.
        name -> Text,
        /// Age in years; never negative.
        age -> Int4,
    }
}

diesel::table! {
    /// Posts authored by users.
    posts (id) {
        /// Primary key generated by the database.
        id -> Int8,
        /// Post body; never blank.
        post_text -> Text,
        /// Assigned by the database when the row is inserted.
        created_at -> Timestamptz,
        /// Owning user; cascades on delete.
        user_id -> Int8,
    }
}

diesel::table! {
    /// Directed follow edges; unique per (follower_id, user_id).
    followers (id) {
        /// Primary key generated by the database.
        id -> Int8,
        /// The followed user.
        user_id -> Int8,
        /// The user doing the following.
        follower_id -> Int8,
    }
}

diesel::joinable!(posts -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(followers, posts, users);
