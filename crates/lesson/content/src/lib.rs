//! Data-driven lesson content and loaders.
//!
//! This crate reads static lesson data from RON/TOML files:
//! - Card catalogs (data-driven via RON)
//! - Producer item catalogs (data-driven via RON)
//! - Drink catalogs (data-driven via RON)
//! - Idol catalogs (data-driven via RON)
//! - Lesson setups (data-driven via RON)
//! - Rule configuration (data-driven via TOML)
//!
//! Content is consumed through the lesson-core oracles and never appears in
//! lesson state except by id.
//!
//! All loaders use lesson-core types directly with serde for deserialization.

pub mod loaders;

pub use loaders::{
    CardLoader, ConfigLoader, ContentFactory, DrinkLoader, IdolLoader, LessonLoader, LoadResult,
    ProducerItemLoader,
};
