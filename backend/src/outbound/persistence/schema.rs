//! Diesel table definitions for the volunteer store.
//!
//! Kept in sync by hand with `backend/migrations`.

diesel::table! {
    /// Registered volunteers. `phone` carries a unique constraint.
    volunteers (id) {
        id -> Int8,
        name -> Varchar,
        phone -> Varchar,
        email -> Nullable<Varchar>,
        ward -> Varchar,
        interest -> Nullable<Varchar>,
        /// One of `ACTIVE`, `INACTIVE`, `SUSPENDED`.
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
