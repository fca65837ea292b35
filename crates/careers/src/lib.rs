//! Core pipelines for the careers portal: applicant intake and admin review.

pub mod config;
pub mod error;
pub mod supabase;
pub mod telemetry;
pub mod workflows;
