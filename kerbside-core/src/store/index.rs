use geo::Rect;
use rstar::{AABB, RTree, RTreeObject};

use crate::{VendorCandidate, VendorStore, wrap_longitudes};

/// Entry stored inside the R\*-tree: a position into the candidate list.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IndexedVendor {
    position: usize,
    point: [f64; 2],
}

impl RTreeObject for IndexedVendor {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

/// In-memory vendor store backed by an R\*-tree over vendor coordinates.
///
/// Candidates keep the order they were supplied in, which callers use as the
/// recency ordering for "newest" sorts.
#[derive(Debug)]
pub struct VendorIndex {
    candidates: Vec<VendorCandidate>,
    tree: RTree<IndexedVendor>,
}

impl VendorIndex {
    /// Index `candidates`; vendors without coordinates are kept but never
    /// match a bounding-box query.
    #[must_use]
    pub fn new(candidates: Vec<VendorCandidate>) -> Self {
        let entries = candidates
            .iter()
            .enumerate()
            .filter_map(|(position, candidate)| {
                candidate.listing.location().map(|location| IndexedVendor {
                    position,
                    point: [location.x, location.y],
                })
            })
            .collect();
        Self {
            candidates,
            tree: RTree::bulk_load(entries),
        }
    }

    /// Number of indexed candidates, including those without coordinates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the index holds no candidates.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Borrow the candidates in storage order.
    #[must_use]
    pub const fn candidates(&self) -> &[VendorCandidate] {
        self.candidates.as_slice()
    }

    /// Find a candidate by slug.
    #[must_use]
    pub fn by_slug(&self, slug: &str) -> Option<&VendorCandidate> {
        self.candidates
            .iter()
            .find(|candidate| candidate.listing.slug == slug)
    }
}

impl VendorStore for VendorIndex {
    fn all_vendors(&self) -> Box<dyn Iterator<Item = VendorCandidate> + Send + '_> {
        Box::new(self.candidates.iter().cloned())
    }

    fn vendors_in_bbox(
        &self,
        bbox: &Rect<f64>,
    ) -> Box<dyn Iterator<Item = VendorCandidate> + Send + '_> {
        let mut positions: Vec<usize> = wrap_longitudes(*bbox)
            .iter()
            .flat_map(|part| {
                let envelope = AABB::from_corners(
                    [part.min().x, part.min().y],
                    [part.max().x, part.max().y],
                );
                self.tree
                    .locate_in_envelope_intersecting(&envelope)
                    .map(|entry| entry.position)
                    .collect::<Vec<_>>()
            })
            .collect();
        // Tree traversal order is arbitrary; restore storage order. Points on
        // the ±180 seam can match both halves.
        positions.sort_unstable();
        positions.dedup();

        Box::new(
            positions
                .into_iter()
                .filter_map(|position| self.candidates.get(position).cloned()),
        )
    }
}

/// Build a [`VendorIndex`] from any collection of candidates.
#[must_use]
pub fn build_vendor_index<I>(candidates: I) -> VendorIndex
where
    I: IntoIterator<Item = VendorCandidate>,
{
    VendorIndex::new(candidates.into_iter().collect())
}
