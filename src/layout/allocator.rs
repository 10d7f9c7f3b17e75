//! Slot allocation: one book per slot, blocked by subcategory, slack filled
//! from donor floors
//!
//! A floor's slot sequence is its named subcategories in selected order,
//! then `Other`, each block shuffled with seed `"{floor}:{sub}"`. Slots left
//! over once the floor's own books run out are filled by cycling through
//! the donor chain, drawing from each donor's shuffled pool with a cursor
//! that wraps, so small pools repeat. Borrowed slots carry the sub-id
//! `RELATED:<donor>`.

use std::collections::HashMap;

use crate::catalog::{BookId, ClassifiedCatalog, FloorCatalog};

use super::error::LayoutError;
use super::shuffle::stable_shuffle;
use super::subcategory::resolve_sub_id;
use super::types::{related_sub_id, FloorSlots, Subcategory, OTHER};

/// Every floor's books in donor order (seed `"donor:{floor}"`)
#[derive(Debug, Clone, Default)]
pub struct DonorPools {
    pools: HashMap<String, Vec<BookId>>,
}

impl DonorPools {
    pub fn build(catalog: &ClassifiedCatalog) -> Self {
        let pools = catalog
            .floors
            .iter()
            .map(|floor| {
                let seed = format!("donor:{}", floor.floor_id);
                (floor.floor_id.clone(), stable_shuffle(&floor.book_ids(), &seed))
            })
            .collect();
        Self { pools }
    }

    /// A donor's pool; unknown floors lend nothing
    pub fn pool(&self, floor_id: &str) -> &[BookId] {
        self.pools.get(floor_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Per-donor draw positions for one allocation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DonorCursors {
    next: HashMap<String, usize>,
}

impl DonorCursors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of draws made from `donor` so far
    pub fn draws(&self, donor: &str) -> usize {
        self.next.get(donor).copied().unwrap_or(0)
    }

    /// Next book from a non-empty pool, wrapping at its end
    fn take(&mut self, donor: &str, pool: &[BookId]) -> BookId {
        let cursor = self.next.entry(donor.to_string()).or_default();
        let book = pool[*cursor % pool.len()];
        *cursor += 1;
        book
    }
}

/// Lay out one floor into exactly `capacity` slots.
///
/// Fails only when slots remain to fill and every floor in `donor_chain`
/// has an empty pool.
pub fn allocate_floor(
    floor: &FloorCatalog,
    subcategories: &[Subcategory],
    capacity: usize,
    donor_chain: &[String],
    pools: &DonorPools,
    cursors: &mut DonorCursors,
) -> Result<FloorSlots, LayoutError> {
    let mut buckets: HashMap<&str, Vec<BookId>> = HashMap::new();
    for entry in &floor.books {
        let sub = resolve_sub_id(&entry.subcategory, subcategories);
        buckets.entry(sub).or_default().push(entry.id);
    }

    let mut book_ids = Vec::with_capacity(capacity);
    let mut sub_ids = Vec::with_capacity(capacity);

    let order = subcategories
        .iter()
        .map(|s| s.id.as_str())
        .chain(std::iter::once(OTHER));
    for sub in order {
        let Some(ids) = buckets.get(sub) else {
            continue;
        };
        let seed = format!("{}:{}", floor.floor_id, sub);
        for id in stable_shuffle(ids, &seed) {
            book_ids.push(id);
            sub_ids.push(sub.to_string());
        }
    }

    if book_ids.len() < capacity {
        if !donor_chain.iter().any(|d| !pools.pool(d).is_empty()) {
            return Err(LayoutError::donors_exhausted(&floor.floor_id, donor_chain));
        }

        let slack = capacity - book_ids.len();
        let mut turn = 0usize;
        while book_ids.len() < capacity {
            let donor = &donor_chain[turn % donor_chain.len()];
            turn += 1;
            let pool = pools.pool(donor);
            if pool.is_empty() {
                continue;
            }
            book_ids.push(cursors.take(donor, pool));
            sub_ids.push(related_sub_id(donor));
        }
        log::debug!(
            "floor {}: filled {} slack slots from {}",
            floor.floor_id,
            slack,
            donor_chain.join(", ")
        );
    }

    if book_ids.len() > capacity {
        log::warn!(
            "floor {}: {} books exceed capacity {}, truncating",
            floor.floor_id,
            book_ids.len(),
            capacity
        );
        book_ids.truncate(capacity);
        sub_ids.truncate(capacity);
    }

    Ok(FloorSlots {
        floor_id: floor.floor_id.clone(),
        capacity,
        book_id_by_slot: book_ids,
        sub_id_by_slot: sub_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use pretty_assertions::assert_eq;

    fn floor(id: &str, books: &[(BookId, &str)]) -> FloorCatalog {
        FloorCatalog {
            floor_id: id.to_string(),
            books: books
                .iter()
                .map(|&(id, sub)| CatalogEntry {
                    id,
                    subcategory: sub.to_string(),
                })
                .collect(),
        }
    }

    fn catalog(floors: Vec<FloorCatalog>) -> ClassifiedCatalog {
        ClassifiedCatalog {
            floors,
            duplicates: 0,
        }
    }

    fn chain(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_blocks_follow_subcategory_order() {
        let home = floor("home", &[(1, "B"), (2, "A"), (3, "zzz"), (4, "B"), (5, "A")]);
        let subs = vec![Subcategory::new("B", 2), Subcategory::new("A", 2)];
        let pools = DonorPools::build(&catalog(vec![home.clone()]));

        let mut cursors = DonorCursors::new();
        let slots = allocate_floor(&home, &subs, 5, &chain(&["home"]), &pools, &mut cursors).unwrap();
        assert_eq!(slots.sub_id_by_slot, vec!["B", "B", "A", "A", "Other"]);
        assert_eq!(slots.book_id_by_slot[4], 3);

        let mut b_block = slots.book_id_by_slot[..2].to_vec();
        b_block.sort();
        assert_eq!(b_block, vec![1, 4]);
        assert_eq!(&slots.book_id_by_slot[..2], stable_shuffle(&[1, 4], "home:B").as_slice());
    }

    #[test]
    fn test_slack_round_robins_donors() {
        let home = floor("home", &[(1, "Other")]);
        let left = floor("left", &[(10, "x"), (11, "x")]);
        let right = floor("right", &[(20, "y")]);
        let pools = DonorPools::build(&catalog(vec![home.clone(), left, right]));

        let slots = allocate_floor(
            &home,
            &[],
            6,
            &chain(&["left", "right"]),
            &pools,
            &mut DonorCursors::new(),
        )
        .unwrap();

        assert_eq!(
            slots.sub_id_by_slot,
            vec![
                "Other",
                "RELATED:left",
                "RELATED:right",
                "RELATED:left",
                "RELATED:right",
                "RELATED:left",
            ]
        );
        let left_pool = pools.pool("left");
        assert_eq!(slots.book_id_by_slot[1], left_pool[0]);
        assert_eq!(slots.book_id_by_slot[3], left_pool[1]);
        // small pools wrap
        assert_eq!(slots.book_id_by_slot[5], left_pool[0]);
        assert_eq!(slots.book_id_by_slot[2], 20);
        assert_eq!(slots.book_id_by_slot[4], 20);
    }

    #[test]
    fn test_empty_donor_skipped() {
        let home = floor("home", &[]);
        let empty = floor("empty", &[]);
        let full = floor("full", &[(7, "z")]);
        let pools = DonorPools::build(&catalog(vec![home.clone(), empty, full]));
        let mut cursors = DonorCursors::new();

        let slots =
            allocate_floor(&home, &[], 3, &chain(&["empty", "full"]), &pools, &mut cursors).unwrap();
        assert_eq!(slots.book_id_by_slot, vec![7, 7, 7]);
        assert!(slots.sub_id_by_slot.iter().all(|s| s == "RELATED:full"));
        assert_eq!(cursors.draws("full"), 3);
        assert_eq!(cursors.draws("empty"), 0);
    }

    #[test]
    fn test_exhausted_chain_is_error() {
        let home = floor("home", &[(1, "a")]);
        let empty = floor("empty", &[]);
        let pools = DonorPools::build(&catalog(vec![home.clone(), empty]));

        let err = allocate_floor(&home, &[], 4, &chain(&["empty"]), &pools, &mut DonorCursors::new())
            .unwrap_err();
        assert!(matches!(err, LayoutError::DonorsExhausted { ref floor, .. } if floor == "home"));
    }

    #[test]
    fn test_full_floor_needs_no_donor() {
        let home = floor("home", &[(1, "a"), (2, "a")]);
        let pools = DonorPools::build(&catalog(vec![home.clone()]));
        let slots = allocate_floor(&home, &[], 2, &[], &pools, &mut DonorCursors::new()).unwrap();
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_overfull_floor_truncated() {
        let home = floor("home", &[(1, "a"), (2, "a"), (3, "a")]);
        let pools = DonorPools::build(&catalog(vec![home.clone()]));
        let slots = allocate_floor(&home, &[], 2, &[], &pools, &mut DonorCursors::new()).unwrap();
        assert_eq!(slots.book_id_by_slot.len(), 2);
        assert_eq!(slots.sub_id_by_slot.len(), 2);
        assert_eq!(slots.capacity, 2);
    }

    #[test]
    fn test_donor_pool_order_is_seeded() {
        let lit = floor("lit", &[(3, "a"), (1, "a"), (2, "a")]);
        let pools = DonorPools::build(&catalog(vec![lit]));
        assert_eq!(pools.pool("lit"), stable_shuffle(&[1, 2, 3], "donor:lit").as_slice());
        assert!(pools.pool("missing").is_empty());
    }
}
