//! Junction-table id pairs.

use aripari_core::types::DbId;

/// One `(left, right)` row of a junction table, e.g. `(dance_id, region_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Link {
    pub left: DbId,
    pub right: DbId,
}

impl Link {
    pub fn new(left: DbId, right: DbId) -> Self {
        Self { left, right }
    }
}

/// Split pairs into the two parallel arrays bound to an `UNNEST` insert.
pub fn unzip_links(links: &[Link]) -> (Vec<DbId>, Vec<DbId>) {
    links.iter().map(|l| (l.left, l.right)).unzip()
}
