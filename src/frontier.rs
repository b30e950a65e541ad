use std::cmp::Reverse;
use std::marker::PhantomData;

/// 取り出し時にソートする優先度付きキュー。
///
/// `key` が最小の要素から取り出す。同じ `key` の要素が複数あれば最後に追加したものを取り出す。
/// 件数が少ない前提なので、ヒープを使わず毎回全体を安定ソートする。
#[derive(Debug)]
pub struct PriorityQueue<T, K, F> {
    key: F,
    items: Vec<T>,
    _key: PhantomData<fn() -> K>,
}

impl<T, K, F> PriorityQueue<T, K, F>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    /// 初期要素 `items` を持つキューを作る。
    pub fn new(key: F, items: Vec<T>) -> Self {
        Self {
            key,
            items,
            _key: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn enqueue(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        let key = &self.key;
        // 降順に並べて末尾を取る。
        self.items.sort_by_key(|item| Reverse(key(item)));
        self.items.pop()
    }
}

impl<T, K, F> Extend<T> for PriorityQueue<T, K, F> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use itertools::assert_equal;

    use super::*;

    fn drain<T, K: Ord, F: Fn(&T) -> K>(queue: &mut PriorityQueue<T, K, F>) -> Vec<T> {
        std::iter::from_fn(|| queue.dequeue()).collect()
    }

    #[test]
    fn test_ascending() {
        let mut queue = PriorityQueue::new(|&x: &i64| x, vec![5, -2, 9]);
        assert_eq!(queue.len(), 3);

        queue.enqueue(0);
        queue.extend([7, 3]);
        assert_eq!(queue.len(), 6);

        assert_equal(drain(&mut queue), [-2, 0, 3, 5, 7, 9]);
        assert!(queue.is_empty());
        assert_eq!(queue.dequeue(), None);
    }

    #[test]
    fn test_ties_prefer_latest() {
        let mut queue = PriorityQueue::new(|&(k, _): &(u32, char)| k, vec![(1, 'a'), (0, 'b')]);
        queue.enqueue((1, 'c'));
        queue.enqueue((0, 'd'));

        assert_eq!(queue.dequeue(), Some((0, 'd')));
        queue.enqueue((0, 'e'));
        assert_eq!(queue.dequeue(), Some((0, 'e')));
        assert_eq!(queue.dequeue(), Some((0, 'b')));
        assert_eq!(queue.dequeue(), Some((1, 'c')));
        assert_eq!(queue.dequeue(), Some((1, 'a')));
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = PriorityQueue::new(|&x: &u8| x, vec![]);
        let b = PriorityQueue::new(|&x: &u8| x, vec![]);

        a.enqueue(1);
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }
}
