//! Heads-up pot arithmetic.
//!
//! With two seats there is at most one side pot: the unmatched excess of the
//! larger contributor, which is always returned to that seat.

/// Main and side pot derived from the two seats' total contributions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotManager {
    contrib: [u32; 2],
    main: u32,
    side: Vec<u32>,
}

impl PotManager {
    pub fn from_contributions(contrib: [u32; 2]) -> Self {
        let matched = contrib[0].min(contrib[1]);
        let excess = contrib[0].abs_diff(contrib[1]);
        Self {
            contrib,
            main: 2 * matched,
            side: if excess > 0 { vec![excess] } else { Vec::new() },
        }
    }

    pub fn main_pot(&self) -> u32 {
        self.main
    }

    pub fn side_pots(&self) -> &[u32] {
        &self.side
    }

    pub fn side_pot(&self) -> u32 {
        self.side.iter().sum()
    }

    pub fn total(&self) -> u32 {
        self.main + self.side_pot()
    }

    /// Seat that put in more, and so owns the side pot.
    pub fn side_pot_owner(&self) -> Option<usize> {
        match self.contrib[0].cmp(&self.contrib[1]) {
            std::cmp::Ordering::Greater => Some(0),
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Chips paid to each seat at showdown.
    ///
    /// `winner == None` splits the main pot; an odd chip goes to
    /// `odd_chip_seat` so no chip is lost.
    ///
    /// ```
    /// use hucfr_engine::pot::PotManager;
    ///
    /// let pm = PotManager::from_contributions([100, 300]);
    /// // seat 0 wins the main pot, seat 1 gets its unmatched 200 back
    /// assert_eq!(pm.distribute(Some(0), 1), [200, 200]);
    /// ```
    pub fn distribute(&self, winner: Option<usize>, odd_chip_seat: usize) -> [u32; 2] {
        let mut payouts = [0u32; 2];
        match winner {
            Some(w) => payouts[w & 1] += self.main,
            None => {
                let half = self.main / 2;
                payouts = [half, half];
                payouts[odd_chip_seat & 1] += self.main % 2;
            }
        }
        if let Some(owner) = self.side_pot_owner() {
            payouts[owner] += self.side_pot();
        }
        payouts
    }
}
