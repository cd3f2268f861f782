/// First title of the form `"{title} N"` (N = 1, 2, ...) that no existing
/// title matches exactly.
///
/// The search has no upper bound. It ends after at most `existing.len() + 1`
/// candidates because each existing title can block only one suffix.
pub fn next_copy_title<'a, I>(title: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<&str> = existing.into_iter().collect();

    let mut n: u64 = 1;
    loop {
        let candidate = format!("{} {}", title, n);
        if !taken.iter().any(|t| *t == candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_copy() {
        assert_eq!(next_copy_title("db1", ["db1"]), "db1 1");
    }

    #[test]
    fn test_skips_taken_suffix() {
        assert_eq!(next_copy_title("db1", ["db1", "db1 1"]), "db1 2");
    }

    #[test]
    fn test_fills_gap() {
        assert_eq!(next_copy_title("web", ["web", "web 1", "web 3"]), "web 2");
    }

    #[test]
    fn test_exact_match_only() {
        assert_eq!(next_copy_title("a", ["a", "A 1", "a 1 "]), "a 1");
    }

    proptest! {
        #[test]
        fn prop_result_is_free(title in "[a-z]{1,6}", taken in proptest::collection::vec(1u64..20, 0..20)) {
            let existing: Vec<String> = taken.iter().map(|n| format!("{} {}", title, n)).collect();
            let result = next_copy_title(&title, existing.iter().map(String::as_str));

            let prefix = format!("{} ", title);
            prop_assert!(!existing.contains(&result));
            prop_assert!(result.starts_with(&prefix));
        }

        #[test]
        fn prop_result_is_smallest_free(title in "[a-z]{1,6}", taken in proptest::collection::btree_set(1u64..20, 0..20)) {
            let existing: Vec<String> = taken.iter().map(|n| format!("{} {}", title, n)).collect();
            let result = next_copy_title(&title, existing.iter().map(String::as_str));

            let expected = (1u64..).find(|n| !taken.contains(n)).unwrap();
            prop_assert_eq!(result, format!("{} {}", title, expected));
        }
    }
}
