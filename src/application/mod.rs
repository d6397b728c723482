// SPDX-License-Identifier: MPL-2.0
//! Application layer - ports to the collaborators the editor does not own.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - The editor depends on these traits, never on the concrete adapters
//! - Infrastructure implements the ports (`image` crate, native dialogs)
//! - Tests substitute scripted implementations

pub mod port;
