//! SpeakWell - Spoken-English practice backend
//!
//! This crate turns a learner's history of per-session speaking assessments
//! into longitudinal progress analytics, optionally narrated by a generative
//! model and always backed by a deterministic calculation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
