//! Numeric-aware string comparison for category and subcategory codes.
//!
//! Plain lexicographic ordering puts `V10` before `V2`; taxonomy codes need
//! `V2 < V10` and `V3.2 < V3.10`, so digit runs are compared by value.

use std::cmp::Ordering;

/// Compare two strings, treating every maximal run of ASCII digits as a
/// number. Non-digit segments compare case-insensitively byte-by-byte;
/// numerically equal runs (`"01"` vs `"1"`) compare equal.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ia = a.as_bytes().iter().peekable();
    let mut ib = b.as_bytes().iter().peekable();

    loop {
        match (ia.peek().copied(), ib.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(&ca), Some(&cb)) => {
                if ca.is_ascii_digit() && cb.is_ascii_digit() {
                    let va = take_number(&mut ia);
                    let vb = take_number(&mut ib);
                    match va.cmp(&vb) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                } else {
                    let la = ca.to_ascii_lowercase();
                    let lb = cb.to_ascii_lowercase();
                    match la.cmp(&lb) {
                        Ordering::Equal => {
                            ia.next();
                            ib.next();
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

fn take_number<'a, I>(iter: &mut std::iter::Peekable<I>) -> u64
where
    I: Iterator<Item = &'a u8>,
{
    let mut value: u64 = 0;
    while let Some(&&c) = iter.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        value = value.saturating_mul(10).saturating_add(u64::from(c - b'0'));
        iter.next();
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(natural_cmp("V2", "V10"), Ordering::Less);
        assert_eq!(natural_cmp("V10", "V2"), Ordering::Greater);
        assert_eq!(natural_cmp("V3.2", "V3.10"), Ordering::Less);
        assert_eq!(natural_cmp("V4.1.9", "V4.1.10"), Ordering::Less);
    }

    #[test]
    fn text_compares_case_insensitively() {
        assert_eq!(natural_cmp("v2", "V2"), Ordering::Equal);
        assert_eq!(natural_cmp("abc", "abd"), Ordering::Less);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(natural_cmp("V3", "V3.1"), Ordering::Less);
        assert_eq!(natural_cmp("", "V1"), Ordering::Less);
    }

    #[test]
    fn sorting_a_code_list_is_canonical() {
        let mut codes = vec!["V10", "V1", "V2.10", "V2.2", "V2"];
        codes.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(codes, vec!["V1", "V2", "V2.2", "V2.10", "V10"]);
    }
}
