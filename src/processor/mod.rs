//! Bulk processing jobs feeding the submission store

pub mod csv_processor;

pub use csv_processor::SubmissionImporter;
