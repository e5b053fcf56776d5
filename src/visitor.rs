use chrono::{DateTime, Local};
use rand::Rng;

use crate::{constants::VISITOR_SETTINGS, storage::KeyValueStore};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitorRecord {
    pub last_visit_date: String,
    pub count: u64,
}

pub fn today_key(now: &DateTime<Local>) -> String {
    now.format(VISITOR_SETTINGS.date_format).to_string()
}

pub fn seed<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen_range(VISITOR_SETTINGS.seed_min..=VISITOR_SETTINGS.seed_max)
}

/// Cosmetic "visitor #" counter: bumps at most once per calendar day, seeded
/// with a random placeholder when nothing usable is stored.
///
/// Storage failures are logged and treated as an empty store.
pub fn resolve_visitor_count<S, R>(store: &S, today: &str, rng: &mut R) -> VisitorRecord
where
    S: KeyValueStore + ?Sized,
    R: Rng + ?Sized,
{
    let stored_date = read_key(store, VISITOR_SETTINGS.date_key);
    let stored_count = read_key(store, VISITOR_SETTINGS.count_key).and_then(|raw| {
        let parsed = raw.trim().parse::<u64>().ok();
        if parsed.is_none() {
            tracing::warn!(value = %raw, "ignoring unparsable visitor count");
        }
        parsed
    });

    let same_day = stored_date.as_deref() == Some(today);
    let count = match (same_day, stored_count) {
        (true, Some(count)) => count,
        (true, None) => seed(rng),
        (false, Some(count)) => count.saturating_add(1).max(seed(rng)),
        (false, None) => seed(rng),
    };

    if !same_day {
        write_key(store, VISITOR_SETTINGS.date_key, today);
    }
    write_key(store, VISITOR_SETTINGS.count_key, &count.to_string());

    tracing::info!(count, same_day, "resolved visitor count");
    VisitorRecord {
        last_visit_date: today.to_string(),
        count,
    }
}

pub fn format_visitor_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn read_key<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "visitor store read failed");
            None
        }
    }
}

fn write_key<S: KeyValueStore + ?Sized>(store: &S, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!(key, error = %e, "visitor store write failed");
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{error::StorageError, storage::MemoryStore};

    const TODAY: &str = "Mon Oct 19 2026";
    const YESTERDAY: &str = "Sun Oct 18 2026";

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_same_day_count_is_stable() {
        let store = MemoryStore::with_entries(&[("visitorDate", TODAY), ("visitorCount", "742")]);
        let mut rng = rng();

        let first = resolve_visitor_count(&store, TODAY, &mut rng);
        let second = resolve_visitor_count(&store, TODAY, &mut rng);

        assert_eq!(first.count, 742);
        assert_eq!(second.count, 742);
        assert_eq!(store.get("visitorCount").unwrap().as_deref(), Some("742"));
        assert_eq!(store.get("visitorDate").unwrap().as_deref(), Some(TODAY));
    }

    #[test]
    fn test_rollover_never_goes_below_previous_plus_one() {
        for seed_value in 0..50 {
            let store =
                MemoryStore::with_entries(&[("visitorDate", YESTERDAY), ("visitorCount", "900")]);
            let mut rng = StdRng::seed_from_u64(seed_value);

            let record = resolve_visitor_count(&store, TODAY, &mut rng);

            assert!(record.count >= 901);
            assert!(record.count <= 1499);
            assert_eq!(store.get("visitorDate").unwrap().as_deref(), Some(TODAY));
            assert_eq!(
                store.get("visitorCount").unwrap(),
                Some(record.count.to_string())
            );
        }
    }

    #[test]
    fn test_rollover_above_seed_range_increments_by_one() {
        let store =
            MemoryStore::with_entries(&[("visitorDate", YESTERDAY), ("visitorCount", "5000")]);
        let record = resolve_visitor_count(&store, TODAY, &mut rng());
        assert_eq!(record.count, 5001);
    }

    #[test]
    fn test_first_run_seeds_in_range() {
        let store = MemoryStore::new();
        let record = resolve_visitor_count(&store, TODAY, &mut rng());

        assert!((500..=1499).contains(&record.count));
        assert_eq!(store.get("visitorDate").unwrap().as_deref(), Some(TODAY));
        assert_eq!(
            store.get("visitorCount").unwrap(),
            Some(record.count.to_string())
        );
    }

    #[test]
    fn test_same_day_without_count_seeds() {
        let store = MemoryStore::with_entries(&[("visitorDate", TODAY)]);
        let record = resolve_visitor_count(&store, TODAY, &mut rng());
        assert!((500..=1499).contains(&record.count));
    }

    #[test]
    fn test_garbage_count_is_treated_as_missing() {
        let store = MemoryStore::with_entries(&[("visitorDate", TODAY), ("visitorCount", "abc")]);
        let record = resolve_visitor_count(&store, TODAY, &mut rng());
        assert!((500..=1499).contains(&record.count));
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::io(std::path::Path::new(key), "unavailable"))
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::io(std::path::Path::new(key), "unavailable"))
        }
    }

    #[test]
    fn test_broken_store_degrades_to_seed() {
        let record = resolve_visitor_count(&BrokenStore, TODAY, &mut rng());
        assert!((500..=1499).contains(&record.count));
        assert_eq!(record.last_visit_date, TODAY);
    }

    #[test]
    fn test_format_visitor_count_groups_thousands() {
        assert_eq!(format_visitor_count(742), "742");
        assert_eq!(format_visitor_count(1499), "1,499");
        assert_eq!(format_visitor_count(1234567), "1,234,567");
        assert_eq!(format_visitor_count(0), "0");
    }

    #[test]
    fn test_today_key_format() {
        use chrono::TimeZone;
        let now = Local.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        assert_eq!(today_key(&now), "Mon Oct 19 2026");
    }
}
