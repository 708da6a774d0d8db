// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Deterministic cinematic timeline engine.
//!
//! Cutscene plays a scripted 3D narrative once, start to finish: camera moves,
//! walk cycles, joint poses and a physics-driven shot, sequenced so that each
//! beat starts only after the tweens gating the previous one have completed.
//!
//! # Key entry points
//!
//! - [`engine::CutsceneEngine`] - owns everything and advances it per frame
//! - [`timeline::Timeline`] - ordered beats with a single cursor
//! - [`animation::TweenSet`] - field interpolation with completion reporting
//! - [`character::CharacterMotor`] and [`camera::CameraDirector`] - tween
//!   producers for characters and the camera
//! - [`physics::PhysicsStepper`] - rigid-body stepping and read-back
//! - [`options::Options`] - TOML configuration
//!
//! # Architecture
//!
//! All mutable scene state lives in one [`scene::Stage`]. Within a tick the
//! engine steps physics, advances tweens, lets the timeline consume the
//! completed tweens and hands the frame to a [`render::FrameSink`]. Asset
//! resolution runs on a background thread and is polled at the top of each
//! tick; nothing in the timeline waits for it.

pub mod animation;
pub mod audio;
pub mod camera;
pub mod character;
pub mod engine;
pub mod error;
pub mod options;
pub mod physics;
pub mod render;
pub mod scene;
pub mod script;
pub mod timeline;
pub mod util;
