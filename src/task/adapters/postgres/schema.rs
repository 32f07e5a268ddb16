//! Diesel schema for task persistence.

diesel::table! {
    /// Task records with embedded work-state and note payloads.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Client the work is performed for.
        client_id -> Uuid,
        /// Urgency level.
        #[max_length = 50]
        priority -> Varchar,
        /// Observable lifecycle status, denormalized for filtering.
        #[max_length = 50]
        status -> Varchar,
        /// Work-state machine payload; authoritative for status and timing.
        work -> Jsonb,
        /// Optional deadline.
        deadline -> Nullable<Timestamptz>,
        /// Progress notes in append order.
        notes -> Jsonb,
        /// Assignee reference.
        assigned_to -> Uuid,
        /// Assigner reference.
        assigned_by -> Uuid,
        /// Approver reference, if approved.
        approved_by -> Nullable<Uuid>,
        /// Approval timestamp, if approved.
        approved_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
