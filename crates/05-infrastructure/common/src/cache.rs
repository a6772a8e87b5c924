//! 记忆化查找缓存
//!
//! 每个键只加载一次，结果在缓存的整个生命周期内有效。
//! 缓存不是线程安全的，并发使用需要外部同步。

use std::collections::HashMap;
use std::hash::Hash;

/// 缓存未命中时的加载逻辑
pub trait CacheLoader<K, V> {
    /// 计算键对应的值
    fn load(&self, key: &K) -> V;
}

impl<K, V, F> CacheLoader<K, V> for F
where
    F: Fn(&K) -> V,
{
    fn load(&self, key: &K) -> V {
        self(key)
    }
}

/// 记忆化缓存
///
/// 键是否存在决定是否已经计算过，与值本身是否为空无关；
/// 因此 `None` 或空集合同样会被缓存。没有淘汰和过期。
#[derive(Debug)]
pub struct MemoCache<K, V, L> {
    loader: L,
    entries: HashMap<K, V>,
}

impl<K, V, L> MemoCache<K, V, L>
where
    K: Eq + Hash + Clone,
    V: Clone,
    L: CacheLoader<K, V>,
{
    /// 创建缓存
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            entries: HashMap::new(),
        }
    }

    /// 获取值，未命中时加载并记住结果
    pub fn get(&mut self, key: &K) -> V {
        if let Some(value) = self.entries.get(key) {
            return value.clone();
        }
        let value = self.loader.load(key);
        self.entries.insert(key.clone(), value.clone());
        value
    }

    /// 是否已经计算过该键
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// 已缓存的键数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
