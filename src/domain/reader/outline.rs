//! 章节目录（仅排序键）

/// 小说的章节排序键集合，升序且去重，允许有间隔
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterOutline {
    indices: Vec<u32>,
}

impl ChapterOutline {
    pub fn new(mut indices: Vec<u32>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self { indices }
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn first(&self) -> Option<u32> {
        self.indices.first().copied()
    }

    pub fn last(&self) -> Option<u32> {
        self.indices.last().copied()
    }

    pub fn contains(&self, index: u32) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// 严格大于 `index` 的第一个章节
    pub fn next_after(&self, index: u32) -> Option<u32> {
        let pos = self.indices.partition_point(|&i| i <= index);
        self.indices.get(pos).copied()
    }

    /// 严格小于 `index` 的最后一个章节
    pub fn prev_before(&self, index: u32) -> Option<u32> {
        let pos = self.indices.partition_point(|&i| i < index);
        pos.checked_sub(1).and_then(|p| self.indices.get(p)).copied()
    }

    /// 最接近 `index` 的有效章节，距离相同时取较小者
    pub fn nearest(&self, index: u32) -> Option<u32> {
        if self.contains(index) {
            return Some(index);
        }
        match (self.prev_before(index), self.next_after(index)) {
            (Some(lo), Some(hi)) => {
                if index - lo <= hi - index {
                    Some(lo)
                } else {
                    Some(hi)
                }
            }
            (lo, hi) => lo.or(hi),
        }
    }
}
