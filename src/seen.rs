//! Field-presence bookkeeping for record decoding.
//!
//! Both decoders track, per record, how often each declared field has been
//! seen. Once the object is exhausted the tracker decides, field by field,
//! whether the decoded value is used, the default is filled in, or the decode
//! fails with [`Error::MissingField`].

use crate::{DuplicateFieldPolicy, Error, Result};

/// What to do with the value of a field occurrence just read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occurrence {
    /// Decode the value into the field slot.
    Store,
    /// Decode the value and drop it.
    Discard,
}

/// Per-record occurrence counts, indexed by declared field position.
#[derive(Clone, Debug)]
pub struct SeenFields {
    counts: Vec<u8>,
}

impl SeenFields {
    #[must_use]
    pub fn new(field_count: usize) -> Self {
        SeenFields {
            counts: vec![0; field_count],
        }
    }

    /// Records one occurrence of the field at `index` and decides whether its
    /// value is kept under `policy`.
    pub fn mark(
        &mut self,
        index: usize,
        name: &str,
        policy: DuplicateFieldPolicy,
    ) -> Result<Occurrence> {
        let count = &mut self.counts[index];
        *count = count.saturating_add(1);
        if *count == 1 {
            return Ok(Occurrence::Store);
        }
        match policy {
            DuplicateFieldPolicy::Error => Err(Error::duplicate_field(name)),
            DuplicateFieldPolicy::UseFirst => {
                log::debug!("discarding repeated field `{}`", name);
                Ok(Occurrence::Discard)
            }
            DuplicateFieldPolicy::UseLast => {
                log::debug!("overwriting repeated field `{}`", name);
                Ok(Occurrence::Store)
            }
        }
    }

    /// Number of times the field at `index` was seen.
    #[must_use]
    pub fn count(&self, index: usize) -> u8 {
        self.counts[index]
    }

    #[must_use]
    pub fn is_seen(&self, index: usize) -> bool {
        self.counts[index] > 0
    }

    /// Checks that every unseen field can be defaulted; `has_default[i]`
    /// tells whether field `i` has one. Returns the first missing field as an
    /// error.
    pub fn finish(&self, names: &[&str], has_default: &[bool]) -> Result<()> {
        for (index, &count) in self.counts.iter().enumerate() {
            if count == 0 && !has_default[index] {
                return Err(Error::missing_field(names[index]));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_is_stored() {
        let mut seen = SeenFields::new(2);
        assert_eq!(
            seen.mark(1, "b", DuplicateFieldPolicy::Error).unwrap(),
            Occurrence::Store
        );
        assert!(seen.is_seen(1));
        assert!(!seen.is_seen(0));
    }

    #[test]
    fn test_duplicate_policies() {
        let mut seen = SeenFields::new(1);
        seen.mark(0, "a", DuplicateFieldPolicy::UseLast).unwrap();
        assert_eq!(
            seen.mark(0, "a", DuplicateFieldPolicy::UseLast).unwrap(),
            Occurrence::Store
        );
        assert_eq!(
            seen.mark(0, "a", DuplicateFieldPolicy::UseFirst).unwrap(),
            Occurrence::Discard
        );
        assert_eq!(
            seen.mark(0, "a", DuplicateFieldPolicy::Error).unwrap_err(),
            Error::duplicate_field("a")
        );
        assert_eq!(seen.count(0), 4);
    }

    #[test]
    fn test_finish_reports_first_missing() {
        let mut seen = SeenFields::new(3);
        seen.mark(0, "a", DuplicateFieldPolicy::UseLast).unwrap();
        let names = ["a", "b", "c"];
        assert_eq!(
            seen.finish(&names, &[false, false, false]).unwrap_err(),
            Error::missing_field("b")
        );
        assert!(seen.finish(&names, &[false, true, true]).is_ok());
    }

    #[test]
    fn test_count_saturates() {
        let mut seen = SeenFields::new(1);
        for _ in 0..300 {
            seen.mark(0, "a", DuplicateFieldPolicy::UseLast).unwrap();
        }
        assert_eq!(seen.count(0), u8::MAX);
    }
}
