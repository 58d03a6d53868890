//! Ordered collection of surfaces loaded as one aligned batch.

use crate::centering::{align_batch, center_single, CenteringMode};
use crate::error::SurfaceResult;
use crate::geometry::Point3;
use crate::io::ByteSource;
use crate::surface::{nickname_for, LoadPolicy, PreparedSurface, Surface};

/// Load state of a [`SurfaceCatalog`].
///
/// A batch is assembled off to the side and committed at once, so the
/// intermediate loading state is never observable through `&self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogState {
    #[default]
    Empty,
    Loaded,
}

/// A source that was left out of the last batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub source_id: String,
    pub message: String,
}

/// Loads named documents from a [`ByteSource`] into aligned surfaces.
#[derive(Debug)]
pub struct SurfaceCatalog<S> {
    source: S,
    objects: Vec<Surface>,
    offset: Option<Point3>,
    failures: Vec<LoadFailure>,
    state: CatalogState,
}

impl<S: ByteSource> SurfaceCatalog<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            objects: Vec::new(),
            offset: None,
            failures: Vec::new(),
            state: CatalogState::Empty,
        }
    }

    /// Replaces the whole collection with the surfaces built from `sources`.
    ///
    /// Sources that cannot be read or parsed are logged, recorded in
    /// [`failures`](Self::failures) and skipped. The rest of the batch still
    /// loads.
    pub fn load_all<I, T>(&mut self, sources: I, policy: &LoadPolicy) -> SurfaceResult<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        policy.validate()?;

        let mut pending: Vec<(String, PreparedSurface)> = Vec::new();
        let mut failures = Vec::new();
        for id in sources {
            let id = id.as_ref();
            match self.prepare(id, policy) {
                Ok(prepared) => pending.push((id.to_string(), prepared)),
                Err(err) => {
                    log::error!("failed to load {id}: {err}");
                    failures.push(LoadFailure {
                        source_id: id.to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        let (offsets, batch_offset) = match policy.centering {
            CenteringMode::Shared => {
                if let Some((id, first)) = pending.first() {
                    if first.positions.is_empty() {
                        log::warn!("first surface {id} has no triangles, batch offset is the origin");
                    }
                }
                let offset = align_batch(pending.iter_mut().map(|(_, p)| &mut p.positions));
                (vec![offset.unwrap_or(Point3::ORIGIN); pending.len()], offset)
            }
            CenteringMode::PerSurface => {
                let offsets: Vec<Point3> = pending
                    .iter_mut()
                    .map(|(_, p)| center_single(&mut p.positions))
                    .collect();
                let first = offsets.first().copied();
                (offsets, first)
            }
            CenteringMode::None => (
                vec![Point3::ORIGIN; pending.len()],
                (!pending.is_empty()).then_some(Point3::ORIGIN),
            ),
        };
        if let Some(o) = batch_offset {
            log::info!("batch offset {:.3}, {:.3}, {:.3}", o.x, o.y, o.z);
        }

        let objects: Vec<Surface> = pending
            .into_iter()
            .zip(offsets)
            .map(|((id, prepared), offset)| {
                let nickname = nickname_for(&id);
                let mut surface = prepared.finish(nickname.clone(), offset, policy);
                surface.metadata.nickname = Some(nickname);
                surface.metadata.source_name = Some(id);
                log::info!(
                    "loaded {} ({} triangles)",
                    surface.name,
                    surface.triangle_count()
                );
                surface
            })
            .collect();

        self.objects = objects;
        self.offset = batch_offset;
        self.failures = failures;
        self.state = CatalogState::Loaded;
        Ok(())
    }

    fn prepare(&self, id: &str, policy: &LoadPolicy) -> SurfaceResult<PreparedSurface> {
        let bytes = self.source.read(id)?;
        PreparedSurface::from_bytes(&bytes, policy)
    }

    /// Surfaces of the last batch, in source order.
    pub fn objects(&self) -> &[Surface] {
        &self.objects
    }

    /// Looks up a surface by nickname.
    pub fn get(&self, nickname: &str) -> Option<&Surface> {
        self.objects
            .iter()
            .find(|s| s.metadata.nickname.as_deref() == Some(nickname))
    }

    /// Offset subtracted from the last batch. `None` before the first load
    /// or when no source of the batch could be loaded.
    pub fn alignment_offset(&self) -> Option<Point3> {
        self.offset
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    pub fn state(&self) -> CatalogState {
        self.state
    }
}
