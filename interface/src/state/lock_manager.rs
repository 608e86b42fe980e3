use borsh::{
    BorshDeserialize,
    BorshSerialize,
};
use solana_sdk::pubkey::Pubkey;

use super::AnchorAccount;

/// The program-wide lock book. A single PDA (`lock_manager` seed) holds every user's locks.
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct LockManager {
    pub bump: u8,
    pub controller: Pubkey,
    pub total_locked_amount: u64,
    pub locks: Vec<Lock>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Lock {
    pub amount: u64,
    /// Unix timestamp of the lock, reset on every release.
    pub lock_time: i64,
    /// Seconds.
    pub lock_period: i64,
}

pub const SECONDS_PER_DAY: i64 = 86_400;

impl Lock {
    /// What a release at `now` pays out: `min(amount, days * amount / lock_period)`, where
    /// `days` counts whole days since `lock_time` and `lock_period` stays in seconds.
    pub fn vested_amount(&self, now: i64) -> u64 {
        let days = (now.saturating_sub(self.lock_time).max(0) / SECONDS_PER_DAY) as u128;
        let amount = self.amount as u128;
        match u128::try_from(self.lock_period) {
            Ok(period) if period > 0 => (days * amount / period).min(amount) as u64,
            _ => 0,
        }
    }
}

impl AnchorAccount for LockManager {
    const NAME: &'static str = "LockManager";
    const DISCRIMINATOR: [u8; 8] = [122, 159, 144, 237, 182, 38, 229, 68];
}

impl LockManager {
    /// The lock `release_xxusd` acts on: the first one with a non-zero amount, whoever locked it.
    pub fn next_release(&self) -> Option<(usize, &Lock)> {
        self.locks.iter().enumerate().find(|(_, lock)| lock.amount > 0)
    }

    /// The amount a `release_xxusd` call at `now` would transfer.
    pub fn releasable_amount(&self, now: i64) -> u64 {
        self.next_release()
            .map_or(0, |(_, lock)| lock.vested_amount(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(locks: Vec<Lock>) -> LockManager {
        LockManager {
            bump: 255,
            controller: Pubkey::new_unique(),
            total_locked_amount: locks.iter().map(|lock| lock.amount).sum(),
            locks,
        }
    }

    #[test]
    fn vests_per_whole_day_over_the_period_in_seconds() {
        let lock = Lock {
            amount: 1_000_000_000,
            lock_time: 1_000,
            lock_period: 10 * SECONDS_PER_DAY,
        };
        assert_eq!(lock.vested_amount(1_000 + SECONDS_PER_DAY - 1), 0);
        assert_eq!(
            lock.vested_amount(1_000 + 3 * SECONDS_PER_DAY + 5),
            3 * 1_000_000_000 / 864_000
        );
        assert_eq!(lock.vested_amount(0), 0);

        let short = Lock {
            amount: 500,
            lock_time: 0,
            lock_period: 1,
        };
        assert_eq!(short.vested_amount(2 * SECONDS_PER_DAY), 500);
        assert_eq!(Lock { lock_period: 0, ..short }.vested_amount(SECONDS_PER_DAY), 0);
    }

    #[test]
    fn release_targets_the_first_open_lock() {
        let manager = manager(vec![
            Lock {
                amount: 0,
                lock_time: 0,
                lock_period: 1,
            },
            Lock {
                amount: 100,
                lock_time: 0,
                lock_period: 2,
            },
            Lock {
                amount: 900,
                lock_time: 0,
                lock_period: 1,
            },
        ]);
        assert_eq!(manager.next_release().map(|(i, _)| i), Some(1));
        assert_eq!(manager.releasable_amount(SECONDS_PER_DAY), 50);
        assert_eq!(manager.releasable_amount(5 * SECONDS_PER_DAY), 100);
    }

    #[test]
    fn decodes_account_data() {
        let lock_manager = manager(vec![Lock {
            amount: 100,
            lock_time: 1_000,
            lock_period: 60,
        }]);
        let mut data = LockManager::DISCRIMINATOR.to_vec();
        data.extend(borsh::to_vec(&lock_manager).unwrap());
        assert_eq!(LockManager::try_from_account_data(&data).unwrap(), lock_manager);
        assert_eq!(manager(vec![]).releasable_amount(i64::MAX), 0);
    }
}
