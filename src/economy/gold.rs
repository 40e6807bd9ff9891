use bevy::prelude::*;
use crate::shared::*;

/// Running totals of every coin that moved through the ledger.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct EconomyStats {
    pub total_gold_earned: u64,
    pub total_gold_spent: u64,
    pub total_transactions: u64,
}

impl EconomyStats {
    pub fn record(&mut self, amount: i64) {
        if amount >= 0 {
            self.total_gold_earned = self.total_gold_earned.saturating_add(amount as u64);
        } else {
            self.total_gold_spent = self.total_gold_spent.saturating_add(amount.unsigned_abs());
        }
        self.total_transactions += 1;
    }

    /// Earned minus spent. Negative while the farm is still paying for seed.
    pub fn net(&self) -> i64 {
        self.total_gold_earned as i64 - self.total_gold_spent as i64
    }
}

/// Reads GoldChangeEvents. The ledger itself has already been updated by
/// the action that sent the event; this only keeps the books.
pub fn track_gold_changes(
    mut gold_events: EventReader<GoldChangeEvent>,
    ledger: Res<Ledger>,
    mut stats: ResMut<EconomyStats>,
) {
    for ev in gold_events.read() {
        stats.record(ev.amount);
        if ev.amount >= 0 {
            info!(
                "[Economy] Gold +{}: {}. New balance: {}",
                ev.amount,
                ev.reason,
                format_gold(ledger.money)
            );
        } else {
            info!(
                "[Economy] Gold -{}: {}. New balance: {}",
                ev.amount.unsigned_abs(),
                ev.reason,
                format_gold(ledger.money)
            );
        }
    }
}

/// Format a gold amount as a display string (e.g. "1,234g").
pub fn format_gold(amount: u32) -> String {
    let s = amount.to_string();
    let mut result = String::new();
    let digits: Vec<char> = s.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }
    result.push('g');
    result
}
