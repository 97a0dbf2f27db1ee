pub mod job_posting;
pub mod profile;
pub mod resume;
pub mod tailored;
