//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing and verification (bcrypt)
//! - Bearer token signing and verification (JWT, HS256)
//! - Upload policy and blob storage seam

pub mod password;
pub mod token;
pub mod upload;
