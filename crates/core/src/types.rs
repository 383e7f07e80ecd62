/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Zero-based column position of a ticket status within its project.
pub type StatusOrder = i32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
