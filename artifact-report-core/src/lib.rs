#![doc = "artifact-report-core: core logic library for artifact-report."]

//! This crate contains the data model and pipeline for reporting GitHub Actions
//! artifact usage per repository of an organization.
//!
//! # Usage
//! Build a [`github::GitHubClient`] (or any [`contract::SourceControl`]), a
//! [`config::ReportConfig`], and hand both to [`report::ReportAggregator`].

pub mod config;
pub mod contract;
pub mod enumerate;
pub mod error;
pub mod github;
pub mod paginate;
pub mod report;
pub mod size;
