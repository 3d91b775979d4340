// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod product;
pub mod user;

pub use product::{NewProduct, Product, ProductPage, ProductPatch};
pub use user::{AuthResponse, PublicUser, User};
