//! Ordering of documents for a logical reading flow.
//!
//! Discovered files are sorted "naturally", so `chapter2.txt` comes before
//! `chapter10.txt`, which is almost always the order an author numbered
//! them in. After that the user owns the order and moves documents around
//! with [`array_move`].

use anyhow::{anyhow, Result};
use std::cmp::Ordering;
use std::path::PathBuf;

/// Move the element at `from` so that it ends up at index `to`, shifting the
/// elements in between by one.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(anyhow!(
            "Can't move position {} to {}: there are only {} document(s)",
            from + 1,
            to + 1,
            len
        ));
    }

    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

/// Compare two strings case-insensitively, treating runs of ASCII digits as
/// numbers.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();

    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let na = take_number(&mut a);
                let nb = take_number(&mut b);
                // compare by magnitude first, ignoring leading zeros
                let (ta, tb) = (na.trim_start_matches('0'), nb.trim_start_matches('0'));
                match ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb)) {
                    Ordering::Equal => {}
                    o => return o,
                }
            }
            (Some(ca), Some(cb)) => {
                match ca.to_lowercase().cmp(cb.to_lowercase()) {
                    Ordering::Equal => {
                        a.next();
                        b.next();
                    }
                    o => return o,
                }
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut digits = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        digits.push(c);
        chars.next();
    }
    digits
}

/// Sort document paths naturally by their full path.
pub fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_move_forward_and_back() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        array_move(&mut items, 0, 3).expect("valid move");
        assert_eq!(items, vec!['b', 'c', 'd', 'a']);
        array_move(&mut items, 2, 1).expect("valid move");
        assert_eq!(items, vec!['b', 'd', 'c', 'a']);
        array_move(&mut items, 1, 1).expect("valid move");
        assert_eq!(items, vec!['b', 'd', 'c', 'a']);
    }

    #[test]
    fn cannot_move_out_of_bounds() {
        let mut items = vec![1, 2];
        assert!(array_move(&mut items, 2, 0).is_err());
        assert!(array_move(&mut items, 0, 2).is_err());
        assert!(array_move(&mut Vec::<u8>::new(), 0, 0).is_err());
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn can_compare_naturally() {
        assert_eq!(natural_cmp("chapter2", "chapter10"), Ordering::Less);
        assert_eq!(natural_cmp("chapter10", "chapter2"), Ordering::Greater);
        assert_eq!(natural_cmp("a", "B"), Ordering::Less);
        assert_eq!(natural_cmp("ch01", "ch1"), Ordering::Equal);
        assert_eq!(natural_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn can_sort_paths() {
        let mut paths = vec![
            PathBuf::from("part10.txt"),
            PathBuf::from("part2.txt"),
            PathBuf::from("Part1.txt"),
        ];
        sort_paths(&mut paths);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("Part1.txt"),
                PathBuf::from("part2.txt"),
                PathBuf::from("part10.txt"),
            ]
        );
    }
}
