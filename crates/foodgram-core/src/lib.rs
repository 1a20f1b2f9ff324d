// ABOUTME: Core types and constants for the Foodgram recipe sharing API
// ABOUTME: Foundation crate with error handling, domain models, pagination, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Foodgram Core
//!
//! Foundation crate providing shared types and constants for the Foodgram
//! API. It is designed to change infrequently so the server crate benefits
//! from incremental compilation.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **pagination**: Page-number pagination envelope
//! - **models**: Users, tags, ingredients, recipes and the cart snapshot

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants and configuration defaults organized by domain
pub mod constants;

/// Page-number pagination for list endpoints
pub mod pagination;

/// Core data models (User, Tag, Ingredient, Recipe, `CartSnapshot`)
pub mod models;
