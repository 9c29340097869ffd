pub mod reaction;
pub mod recurrence;
pub mod signup;
