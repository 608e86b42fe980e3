//! Multi-line renderings of fetched program accounts, used by the CLI's `show` command.

use std::fmt::{
    Display,
    Formatter,
    Result,
};

use units::UiAmount;
use xxusd_interface::state::{
    Controller,
    HedgingStrategy,
    LockManager,
};

use crate::{
    fmt_kv,
    LogColor,
};

pub struct PrettyController<'a> {
    pub controller: &'a Controller,
    pub decimals: u8,
}

impl Display for PrettyController<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let c = self.controller;
        let amount = |native| UiAmount::new(native, self.decimals);
        writeln!(f, "{}", fmt_kv!("Controller", "", LogColor::Header))?;
        writeln!(f, "  {}", fmt_kv!("authority", c.authority))?;
        writeln!(f, "  {}", fmt_kv!("redeemable_mint", c.redeemable_mint))?;
        writeln!(f, "  {}", fmt_kv!("xxusd_mint", c.xxusd_mint))?;
        writeln!(
            f,
            "  {}",
            fmt_kv!("circulating", amount(c.redeemable_circulating_supply))
        )?;
        writeln!(f, "  {}", fmt_kv!("locked", amount(c.locked_xxusd_supply)))?;
        writeln!(f, "  {}", fmt_kv!("frozen", c.is_frozen))?;
        writeln!(
            f,
            "  {}",
            fmt_kv!(
                "kamino_depository",
                format!("{} ({} bps)", c.kamino_depository, c.kamino_depository_weight_bps)
            )
        )?;
        for entry in &c.product_prices {
            writeln!(
                f,
                "  {}",
                fmt_kv!(format!("price[{}]", entry.product_id), entry.price)
            )?;
        }
        Ok(())
    }
}

pub struct PrettyLockManager<'a> {
    pub lock_manager: &'a LockManager,
    pub decimals: u8,
    pub now: i64,
}

impl Display for PrettyLockManager<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let m = self.lock_manager;
        writeln!(f, "{}", fmt_kv!("LockManager", "", LogColor::Header))?;
        writeln!(
            f,
            "  {}",
            fmt_kv!("total_locked", UiAmount::new(m.total_locked_amount, self.decimals))
        )?;
        writeln!(
            f,
            "  {}",
            fmt_kv!(
                "next_release",
                UiAmount::new(m.releasable_amount(self.now), self.decimals)
            )
        )?;
        let next = m.next_release().map(|(i, _)| i);
        for (i, lock) in m.locks.iter().enumerate() {
            let marker = match next == Some(i) {
                true => ", next",
                false => "",
            };
            writeln!(
                f,
                "  {}",
                fmt_kv!(
                    format!("lock[{i}]"),
                    format!(
                        "{} (since {}, period {}s{marker})",
                        UiAmount::new(lock.amount, self.decimals),
                        lock.lock_time,
                        lock.lock_period
                    )
                )
            )?;
        }
        Ok(())
    }
}

pub struct PrettyHedgingStrategy<'a> {
    pub hedging_strategy: &'a HedgingStrategy,
    pub decimals: u8,
}

impl Display for PrettyHedgingStrategy<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "{}", fmt_kv!("HedgingStrategy", "", LogColor::Header))?;
        writeln!(
            f,
            "  {}",
            fmt_kv!(
                "deposited",
                UiAmount::new(self.hedging_strategy.deposited_amount, self.decimals)
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use solana_sdk::pubkey::Pubkey;
    use xxusd_interface::state::{
        Lock,
        SECONDS_PER_DAY,
    };

    use super::*;

    #[test]
    fn lock_manager_shows_the_next_release() {
        colored::control::set_override(false);
        let lock_manager = LockManager {
            bump: 255,
            controller: Pubkey::new_unique(),
            total_locked_amount: 3_000_000,
            locks: vec![
                Lock {
                    amount: 0,
                    lock_time: 0,
                    lock_period: 1,
                },
                Lock {
                    amount: 3_000_000,
                    lock_time: 0,
                    lock_period: 3,
                },
            ],
        };
        let shown = PrettyLockManager {
            lock_manager: &lock_manager,
            decimals: 6,
            now: SECONDS_PER_DAY,
        }
        .to_string();

        assert!(shown.contains("next_release: 1\n"), "{shown}");
        assert!(shown.contains("lock[1]: 3 (since 0, period 3s, next)"), "{shown}");
        assert!(shown.contains("lock[0]: 0 (since 0, period 1s)"), "{shown}");
    }
}
