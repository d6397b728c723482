// SPDX-License-Identifier: MPL-2.0
//! Retained-mode widget framework.
//!
//! The framework owns everything between raw input and a list of draw
//! commands; the backend in [`crate::app`] only forwards events and replays
//! frames.
//!
//! # Building blocks
//!
//! - [`tree`] - Widget arena, dirty tracking, input routing
//! - [`layout`] - Size declarations and the measure/allocate passes
//! - [`widgets`] - Widget kinds and the [`widgets::Element`] builder
//! - [`paint`] - Backend-neutral draw commands
//! - [`context`] - Typed application-wide state shared between components
//! - [`notifications`] - Single-slot notification manager
//! - [`scale`] - Logical to physical pixel conversion
//! - [`text`] - Text metrics used while measuring
//! - [`design_tokens`] - Colors, spacing and sizing constants

pub mod context;
pub mod design_tokens;
pub mod layout;
pub mod notifications;
pub mod paint;
pub mod scale;
pub mod text;
pub mod tree;
pub mod widgets;
