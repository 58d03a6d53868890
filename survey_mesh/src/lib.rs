//! Core library turning LandXML survey surfaces into aligned, texture mapped
//! triangle meshes.
//!
//! The pipeline is `extract -> filter -> transform -> center/align -> uv`.
//! [`surface::parse_surface`] runs it for one document and
//! [`catalog::SurfaceCatalog`] runs it for a batch sharing one offset.

pub mod catalog;
pub mod centering;
pub mod config;
pub mod error;
pub mod filter;
pub mod geometry;
pub mod io;
pub mod surface;
pub mod transform;
pub mod uv;

pub use catalog::{CatalogState, LoadFailure, SurfaceCatalog};
pub use error::{SurfaceError, SurfaceResult};
pub use surface::{parse_surface, LoadPolicy, Surface, SurfaceMetadata};
