//! Diesel schema for client persistence.

diesel::table! {
    /// Client records tasks are performed for.
    clients (id) {
        /// Client identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
