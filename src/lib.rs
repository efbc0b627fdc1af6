// Copyright 2026 Slate Contributors
// SPDX-License-Identifier: Apache-2.0

//! Slate runtime library — widget data-resolution and rendering pipeline
//! for low-refresh e-paper displays.
//!
//! A widget is described by a declarative [`config::WidgetConfig`]: where to
//! fetch raw data (a JSON API or an RSS feed), a table of path expressions
//! mapping response fields to template fields, and the identifier of the
//! display template that formats the result. [`pipeline::run`] turns one
//! configuration into one HTML fragment and never fails past its own
//! boundary — every error degrades to a displayable error fragment.

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod error;
pub mod mapping;
pub mod path;
pub mod pipeline;
pub mod render;
