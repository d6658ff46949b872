//! Read access to vendor candidates.
//!
//! The `VendorStore` trait stands in for whatever storage layer holds vendor
//! rows. The search pipeline only needs two things from it: every candidate,
//! and the candidates whose coordinates fall inside a bounding box.

use geo::Rect;

use crate::VendorCandidate;

mod index;

pub use index::{VendorIndex, build_vendor_index};

/// Read-only access to vendor candidates.
///
/// The bounding box uses WGS84 coordinates (`x = longitude`,
/// `y = latitude`). Its longitudes may run past ±180 near the antimeridian
/// and must wrap, as [`bbox_contains`](crate::bbox_contains) does.
/// Containment includes boundary points, and vendors without coordinates are
/// never returned by [`VendorStore::vendors_in_bbox`].
///
/// # Examples
///
/// ```rust
/// use geo::{Coord, Rect};
/// use kerbside_core::{VendorCandidate, VendorStore, bbox_contains};
///
/// struct MemoryStore {
///     vendors: Vec<VendorCandidate>,
/// }
///
/// impl VendorStore for MemoryStore {
///     fn all_vendors(&self) -> Box<dyn Iterator<Item = VendorCandidate> + Send + '_> {
///         Box::new(self.vendors.iter().cloned())
///     }
///
///     fn vendors_in_bbox(
///         &self,
///         bbox: &Rect<f64>,
///     ) -> Box<dyn Iterator<Item = VendorCandidate> + Send + '_> {
///         let bbox = *bbox;
///         Box::new(
///             self.vendors
///                 .iter()
///                 .filter(move |c| c.listing.location().is_some_and(|p| bbox_contains(&bbox, p)))
///                 .cloned(),
///         )
///     }
/// }
///
/// let store = MemoryStore { vendors: Vec::new() };
/// let bbox = Rect::new(Coord { x: -1.0, y: -1.0 }, Coord { x: 1.0, y: 1.0 });
/// assert_eq!(store.vendors_in_bbox(&bbox).count(), 0);
/// ```
pub trait VendorStore {
    /// Every candidate in storage order.
    fn all_vendors(&self) -> Box<dyn Iterator<Item = VendorCandidate> + Send + '_>;

    /// Candidates located inside `bbox`, in storage order, wrapping
    /// longitudes at ±180.
    fn vendors_in_bbox(
        &self,
        bbox: &Rect<f64>,
    ) -> Box<dyn Iterator<Item = VendorCandidate> + Send + '_>;
}
