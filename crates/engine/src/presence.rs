//! Collaborator presence overlay.
//!
//! Presence is presentation metadata only: a snapshot of who is looking at
//! which cell, refreshed from a replaceable `PresenceFeed`. Nothing here
//! reads or writes rows, selection or history.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use taskgrid_core::{CellRef, Field, RowId};

/// One remote user as reported by a feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub user_id: String,
    pub display_name: String,
    /// CSS-style hex color, e.g. `#3B82F6`
    pub color: String,
    pub current_cell: Option<CellRef>,
    /// Milliseconds since the Unix epoch
    pub last_activity_ms: u64,
}

/// Source of presence snapshots (polling or push-backed).
pub trait PresenceFeed {
    fn poll(&mut self, now_ms: u64) -> Vec<Collaborator>;
}

/// Probability that a simulated user moves on a poll.
const MOVE_PROBABILITY: f64 = 0.3;
/// Columns simulated users wander between.
const SIMULATED_FIELDS: [Field; 3] = [Field::JobRequest, Field::Status, Field::Priority];
/// Row ids simulated users land on.
const SIMULATED_ROWS: std::ops::RangeInclusive<u32> = 1..=5;

/// Random-walk feed with two fixed users.
pub struct SimulatedPresence {
    users: Vec<Collaborator>,
    rng: StdRng,
}

impl SimulatedPresence {
    pub fn new(seed: u64, now_ms: u64) -> Self {
        let users = vec![
            Collaborator {
                user_id: "user1".to_string(),
                display_name: "John Doe".to_string(),
                color: "#3B82F6".to_string(),
                current_cell: Some(CellRef::new(RowId(2), Field::JobRequest)),
                last_activity_ms: now_ms,
            },
            Collaborator {
                user_id: "user2".to_string(),
                display_name: "Sarah Wilson".to_string(),
                color: "#10B981".to_string(),
                current_cell: Some(CellRef::new(RowId(4), Field::Status)),
                last_activity_ms: now_ms.saturating_sub(30_000),
            },
        ];
        Self {
            users,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PresenceFeed for SimulatedPresence {
    fn poll(&mut self, now_ms: u64) -> Vec<Collaborator> {
        for user in &mut self.users {
            if self.rng.gen_bool(MOVE_PROBABILITY) {
                let row = RowId(self.rng.gen_range(SIMULATED_ROWS));
                let field = SIMULATED_FIELDS[self.rng.gen_range(0..SIMULATED_FIELDS.len())];
                user.current_cell = Some(CellRef::new(row, field));
                user.last_activity_ms = now_ms;
            }
        }
        self.users.clone()
    }
}

/// Latest presence snapshot for rendering.
#[derive(Debug, Default, Clone)]
pub struct PresenceOverlay {
    users: Vec<Collaborator>,
    last_refresh_ms: Option<u64>,
}

impl PresenceOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with whatever the feed reports now.
    pub fn refresh(&mut self, feed: &mut dyn PresenceFeed, now_ms: u64) {
        self.users = feed.poll(now_ms);
        self.last_refresh_ms = Some(now_ms);
        log::debug!("presence refreshed: {} user(s)", self.users.len());
    }

    /// True when no refresh happened yet or `interval_ms` has elapsed.
    pub fn is_due(&self, now_ms: u64, interval_ms: u64) -> bool {
        match self.last_refresh_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= interval_ms,
        }
    }

    pub fn active_users(&self) -> &[Collaborator] {
        &self.users
    }

    pub fn users_in_cell(&self, cell: CellRef) -> Vec<&Collaborator> {
        self.users
            .iter()
            .filter(|u| u.current_cell == Some(cell))
            .collect()
    }

    pub fn clear(&mut self) {
        self.users.clear();
        self.last_refresh_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedFeed(Vec<Collaborator>);

    impl PresenceFeed for FixedFeed {
        fn poll(&mut self, _now_ms: u64) -> Vec<Collaborator> {
            self.0.clone()
        }
    }

    #[test]
    fn test_simulated_users_stay_in_range() {
        let mut feed = SimulatedPresence::new(42, 1_000_000);
        for tick in 0..200 {
            for user in feed.poll(1_000_000 + tick * 5_000) {
                let cell = user.current_cell.expect("simulated users always have a cell");
                assert!(SIMULATED_ROWS.contains(&cell.row.raw()));
                assert!(SIMULATED_FIELDS.contains(&cell.field));
            }
        }
    }

    #[test]
    fn test_simulated_feed_is_deterministic_per_seed() {
        let mut a = SimulatedPresence::new(7, 0);
        let mut b = SimulatedPresence::new(7, 0);
        for tick in 0..20 {
            assert_eq!(a.poll(tick), b.poll(tick));
        }
    }

    #[test]
    fn test_overlay_users_in_cell() {
        let cell = CellRef::new(RowId(2), Field::JobRequest);
        let feed = SimulatedPresence::new(1, 50_000);
        let seeded = feed.users.clone();
        let mut fixed = FixedFeed(seeded);

        let mut overlay = PresenceOverlay::new();
        assert!(overlay.is_due(0, 5_000));
        overlay.refresh(&mut fixed, 50_000);

        let here = overlay.users_in_cell(cell);
        assert_eq!(here.len(), 1);
        assert_eq!(here[0].display_name, "John Doe");
        assert_eq!(overlay.active_users().len(), 2);
        assert_eq!(overlay.active_users()[1].last_activity_ms, 20_000);

        assert!(!overlay.is_due(54_999, 5_000));
        assert!(overlay.is_due(55_000, 5_000));
    }
}
