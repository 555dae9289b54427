// Blocking contacts per side

use std::collections::HashSet;

/// Identity of one sphere/collider overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(pub u64);

/// Side a blocking contact was reported on.
///
/// Front and back are relative to facing; left (-Z) and right (+Z) are world
/// sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockingSide {
    Front,
    Back,
    Left,
    Right,
    Up,
}

impl BlockingSide {
    pub const ALL: [BlockingSide; 5] = [
        BlockingSide::Front,
        BlockingSide::Back,
        BlockingSide::Left,
        BlockingSide::Right,
        BlockingSide::Up,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Currently overlapping blocking contacts, per side.
///
/// Counts are set sizes, so they can't go negative: an exit for a contact
/// that never entered is ignored and a repeated enter is counted once.
#[derive(Debug, Clone, Default)]
pub struct BlockingData {
    contacts: [HashSet<ContactId>; BlockingSide::ALL.len()],
}

impl BlockingData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a contact entering on `side`
    pub fn enter(&mut self, side: BlockingSide, contact: ContactId) {
        self.contacts[side.index()].insert(contact);
    }

    /// Record a contact leaving `side`
    pub fn exit(&mut self, side: BlockingSide, contact: ContactId) {
        if !self.contacts[side.index()].remove(&contact) {
            log::trace!("Ignoring unmatched exit on {:?}", side);
        }
    }

    pub fn count(&self, side: BlockingSide) -> usize {
        self.contacts[side.index()].len()
    }

    pub fn is_blocked(&self, side: BlockingSide) -> bool {
        self.count(side) != 0
    }

    pub fn right_side_blocked(&self) -> bool {
        self.is_blocked(BlockingSide::Right)
    }

    pub fn left_side_blocked(&self) -> bool {
        self.is_blocked(BlockingSide::Left)
    }

    pub fn front_blocked_count(&self) -> usize {
        self.count(BlockingSide::Front)
    }

    pub fn up_blocked_count(&self) -> usize {
        self.count(BlockingSide::Up)
    }

    /// Drop every contact (e.g. on respawn)
    pub fn clear(&mut self) {
        for side in &mut self.contacts {
            side.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_exit_pairing() {
        let mut data = BlockingData::new();
        data.enter(BlockingSide::Right, ContactId(1));
        data.enter(BlockingSide::Right, ContactId(2));
        assert!(data.right_side_blocked());
        assert!(!data.left_side_blocked());

        data.exit(BlockingSide::Right, ContactId(1));
        assert!(data.right_side_blocked());
        data.exit(BlockingSide::Right, ContactId(2));
        assert!(!data.right_side_blocked());
    }

    #[test]
    fn test_unmatched_exit_never_goes_negative() {
        let mut data = BlockingData::new();
        data.exit(BlockingSide::Front, ContactId(7));
        assert_eq!(data.front_blocked_count(), 0);

        data.enter(BlockingSide::Front, ContactId(7));
        assert_eq!(data.front_blocked_count(), 1);
    }

    #[test]
    fn test_duplicate_enter_counted_once() {
        let mut data = BlockingData::new();
        data.enter(BlockingSide::Front, ContactId(3));
        data.enter(BlockingSide::Front, ContactId(3));
        assert_eq!(data.front_blocked_count(), 1);

        data.exit(BlockingSide::Front, ContactId(3));
        assert_eq!(data.front_blocked_count(), 0);
    }

    #[test]
    fn test_sides_are_independent() {
        let mut data = BlockingData::new();
        data.enter(BlockingSide::Front, ContactId(1));
        data.exit(BlockingSide::Back, ContactId(1));
        assert_eq!(data.front_blocked_count(), 1);
    }

    #[test]
    fn test_right_blocked_tracks_count_under_interleaving() {
        // Deterministic pseudo-random enter/exit interleaving over a few contacts
        let mut data = BlockingData::new();
        let mut live = HashSet::new();
        let mut seed: u32 = 12345;

        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let contact = ContactId(((seed >> 16) % 6) as u64);
            if (seed >> 8) & 1 == 0 {
                data.enter(BlockingSide::Right, contact);
                live.insert(contact);
            } else {
                data.exit(BlockingSide::Right, contact);
                live.remove(&contact);
            }

            assert_eq!(data.count(BlockingSide::Right), live.len());
            assert_eq!(data.right_side_blocked(), !live.is_empty());
        }
    }

    #[test]
    fn test_clear() {
        let mut data = BlockingData::new();
        for side in BlockingSide::ALL {
            data.enter(side, ContactId(1));
        }
        data.clear();
        for side in BlockingSide::ALL {
            assert_eq!(data.count(side), 0);
        }
    }
}
