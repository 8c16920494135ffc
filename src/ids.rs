use std::collections::HashSet;

/// A fresh record id: the current Unix time in milliseconds, bumped past
/// any id already taken.
pub(crate) fn next_id<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
    next_id_from(chrono::Utc::now().timestamp_millis(), existing)
}

fn next_id_from<'a>(start: i64, existing: impl IntoIterator<Item = &'a str>) -> String {
    let taken: HashSet<&str> = existing.into_iter().collect();
    let mut candidate = start;
    loop {
        let id = candidate.to_string();
        if !taken.contains(id.as_str()) {
            return id;
        }
        candidate += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_start_when_free() {
        assert_eq!(next_id_from(1000, ["1", "2"]), "1000");
    }

    #[test]
    fn test_skips_taken_ids() {
        assert_eq!(next_id_from(1000, ["1000", "1001", "1003"]), "1002");
    }

    #[test]
    fn test_never_returns_existing() {
        let existing = ["1", "2", "3"];
        let id = next_id(existing);
        assert!(!existing.contains(&id.as_str()));
        assert!(id.parse::<i64>().is_ok());
    }
}
