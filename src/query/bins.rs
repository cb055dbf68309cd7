//! Bucket range of one individual's matches, for scoping a time control.

use crate::model::{BinRange, MatchResult, age_label};

/// Min and max bucket present in `joined`, with a label per present
/// bucket. `None` when there are no matches.
pub fn resolve(joined: &[MatchResult]) -> Option<BinRange> {
    let labels: std::collections::BTreeMap<i64, String> = joined
        .iter()
        .map(|m| (m.age_bucket, age_label(m.age_bucket)))
        .collect();
    let (&min, _) = labels.first_key_value()?;
    let (&max, _) = labels.last_key_value()?;
    Some(BinRange { min, max, labels })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnnotationRecord;

    fn hit(id: &str, raw_year: i64) -> MatchResult {
        let anno = AnnotationRecord::new(id, raw_year, "P", None, None, 1950, 1000);
        MatchResult::from_annotation(&anno, 0.1)
    }

    #[test]
    fn test_only_present_buckets() {
        let joined = [hit("a", 5400), hit("b", 1500), hit("c", 5100)];
        let range = resolve(&joined).unwrap();
        assert_eq!(range.min, -1000);
        assert_eq!(range.max, 3000);
        assert_eq!(range.labels.len(), 2);
        assert_eq!(range.labels[&-1000], "1000 CE");
        assert_eq!(range.labels[&3000], "3000 BCE");
        assert!(!range.labels.contains_key(&0));
    }

    #[test]
    fn test_empty() {
        assert!(resolve(&[]).is_none());
    }
}
