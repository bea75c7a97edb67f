use crate::domain::UserId;
use crate::ledger::Totals;

/// Ranked top-`n` slice of the cumulative totals.
///
/// Descending by total; ties broken by ascending user id so the ordering is
/// deterministic. `n == 0` yields nothing, `n` beyond the number of users
/// yields everyone.
pub fn top(totals: &Totals, n: usize) -> Vec<(UserId, u64)> {
    let mut entries: Vec<(UserId, u64)> = totals
        .iter()
        .map(|(user, total)| (user.clone(), *total))
        .collect();

    // BTreeMap iteration is ascending by user id; the stable sort keeps
    // that order inside equal totals.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries
}
