// src/models/history.rs

use std::collections::VecDeque;

/// 履歴として保持できる点数の上限
pub const MAX_HISTORY_LEN: usize = 100_000;

/// 第2関節の軌跡を描画するための有界履歴（先頭が最新）
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryBuffer {
    points: VecDeque<[f64; 2]>,
    capacity: usize,
}

impl HistoryBuffer {
    /// 容量 `capacity` の空の履歴を作る（領域は点の追加に合わせて確保する）
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::new(),
            capacity,
        }
    }

    /// 先頭に追加し、容量を超えた古い点を末尾から捨てる
    pub fn push_front(&mut self, point: [f64; 2]) {
        self.points.push_front(point);
        self.points.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64; 2]> {
        self.points.iter()
    }

    /// 描画側に渡すためのコピー
    pub fn to_vec(&self) -> Vec<[f64; 2]> {
        self.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 後から追加した点が先頭に来る
    #[test]
    fn test_push_front_keeps_most_recent_first() {
        let mut history = HistoryBuffer::new(3);
        history.push_front([1.0, 0.0]);
        history.push_front([2.0, 0.0]);
        assert_eq!(history.to_vec(), vec![[2.0, 0.0], [1.0, 0.0]]);
    }

    /// 容量を超えると最も古い点から捨てられる
    #[test]
    fn test_oldest_entries_are_evicted() {
        let mut history = HistoryBuffer::new(3);
        for i in 0..5 {
            history.push_front([i as f64, 0.0]);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.to_vec(), vec![[4.0, 0.0], [3.0, 0.0], [2.0, 0.0]]);
    }

    /// 消去しても容量は変わらない
    #[test]
    fn test_clear() {
        let mut history = HistoryBuffer::new(2);
        history.push_front([1.0, 1.0]);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), 2);
    }

    /// 巨大な容量を指定しても生成時に領域を確保しない
    #[test]
    fn test_huge_capacity_does_not_allocate_up_front() {
        let mut history = HistoryBuffer::new(usize::MAX);
        history.push_front([1.0, 2.0]);
        assert_eq!(history.iter().collect::<Vec<_>>(), vec![&[1.0, 2.0]]);
        assert_eq!(history.capacity(), usize::MAX);
    }
}
