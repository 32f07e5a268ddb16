//! Diesel schema for user directory persistence.

diesel::table! {
    /// User records owned by the authentication service.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Notification address.
        #[max_length = 255]
        email -> Varchar,
        /// Authorization role.
        #[max_length = 50]
        role -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
