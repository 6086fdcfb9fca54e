//! Window and batch splitting over materialised elements.

/// Windows of `size` elements whose starts are `increment` apart.
///
/// The last window reaching the end of `elements` is the final one, so a
/// shorter tail only appears when `increment` overshoots it. Input shorter
/// than `size` yields a single short window. Zero sizes count as one.
pub(crate) fn sliding<A: Clone>(elements: &[A], size: usize, increment: usize) -> Vec<Vec<A>> {
    let size = size.max(1);
    let increment = increment.max(1);
    let mut windows = Vec::new();
    let mut start = 0;
    while start < elements.len() {
        let end = (start + size).min(elements.len());
        windows.push(elements[start..end].to_vec());
        if start + size >= elements.len() {
            break;
        }
        start += increment;
    }
    windows
}

/// Consecutive batches of `size` elements; the last may be shorter.
pub(crate) fn grouped<A: Clone>(elements: &[A], size: usize) -> Vec<Vec<A>> {
    elements.chunks(size.max(1)).map(<[A]>::to_vec).collect()
}

/// Batches closed by the first element satisfying `predicate`, which is kept
/// as the batch's last element.
pub(crate) fn grouped_until<A, Predicate>(elements: Vec<A>, mut predicate: Predicate) -> Vec<Vec<A>>
where
    Predicate: FnMut(&A) -> bool,
{
    grouped_statefully_until(elements, |_, element| predicate(element))
}

/// Batches closed once `predicate` holds for the batch so far and the
/// element just added to it.
pub(crate) fn grouped_statefully_until<A, Predicate>(
    elements: Vec<A>,
    mut predicate: Predicate,
) -> Vec<Vec<A>>
where
    Predicate: FnMut(&[A], &A) -> bool,
{
    let mut batches = Vec::new();
    let mut current: Vec<A> = Vec::new();
    for element in elements {
        current.push(element);
        let closes = match current.split_last() {
            Some((last, _)) => predicate(&current, last),
            None => false,
        };
        if closes {
            batches.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[1, 2, 3, 4, 5], 2, 1, vec![vec![1, 2], vec![2, 3], vec![3, 4], vec![4, 5]])]
    #[case(&[1, 2, 3, 4, 5], 3, 2, vec![vec![1, 2, 3], vec![3, 4, 5]])]
    #[case(&[1, 2, 3, 4, 5], 2, 2, vec![vec![1, 2], vec![3, 4], vec![5]])]
    #[case(&[1], 3, 1, vec![vec![1]])]
    #[case(&[], 2, 1, vec![])]
    fn sliding_windows(
        #[case] input: &[i32],
        #[case] size: usize,
        #[case] increment: usize,
        #[case] expected: Vec<Vec<i32>>,
    ) {
        assert_eq!(sliding(input, size, increment), expected);
    }

    #[rstest]
    fn grouped_keeps_short_tail() {
        assert_eq!(grouped(&[1, 2, 3, 4, 5], 2), vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[rstest]
    fn grouped_until_closes_on_match() {
        let batches = grouped_until((1..=7).collect(), |n: &i32| n % 3 == 0);
        assert_eq!(batches, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    }

    #[rstest]
    fn grouped_statefully_until_sees_the_batch() {
        let batches =
            grouped_statefully_until((1..=6).collect(), |batch: &[i32], _| batch.contains(&4));
        assert_eq!(batches, vec![vec![1, 2, 3, 4], vec![5, 6]]);
    }
}
