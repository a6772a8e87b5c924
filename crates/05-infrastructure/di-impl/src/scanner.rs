//! 命名空间扫描器实现
//!
//! - [`CatalogScanner`] 基于类型目录，结果按命名空间记忆化
//! - [`ManifestScanner`] 基于 TOML 类型清单文件

use di_abstractions::{validate_namespace, NamespaceScanner};
use serde::Deserialize;
use std::cell::RefCell;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};
use wiring_common::{CacheLoader, MemoCache, ScanError, ScanResult, TypeCatalog, TypeKey};

/// 从类型目录加载命名空间下的顶层类型
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    catalog: Arc<TypeCatalog>,
}

impl CacheLoader<String, Vec<TypeKey>> for CatalogLoader {
    fn load(&self, namespace: &String) -> Vec<TypeKey> {
        self.catalog
            .entries_within(namespace)
            .filter(|entry| entry.is_top_level())
            .map(|entry| entry.key().clone())
            .collect()
    }
}

/// 基于类型目录的扫描器
///
/// 同一命名空间只扫描一次。内部缓存不是线程安全的。
#[derive(Debug)]
pub struct CatalogScanner {
    cache: RefCell<MemoCache<String, Vec<TypeKey>, CatalogLoader>>,
}

impl CatalogScanner {
    /// 创建扫描器
    pub fn new(catalog: Arc<TypeCatalog>) -> Self {
        Self {
            cache: RefCell::new(MemoCache::new(CatalogLoader { catalog })),
        }
    }

    /// 已缓存的命名空间数量
    pub fn cached_namespaces(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl NamespaceScanner for CatalogScanner {
    fn top_level_types(&self, namespace: &str) -> ScanResult<Vec<TypeKey>> {
        validate_namespace(namespace)?;
        let types = self.cache.borrow_mut().get(&namespace.to_string());
        if types.is_empty() {
            debug!("命名空间 '{}' 中没有类型", namespace);
        }
        Ok(types)
    }

    fn name(&self) -> &str {
        "catalog"
    }
}

/// 类型清单文件结构
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeManifest {
    /// 顶层类型的全限定名
    #[serde(default)]
    pub types: Vec<String>,
}

/// 基于类型清单的扫描器
///
/// 清单列出所有顶层类型：
///
/// ```toml
/// types = ["com.example.dao.UserDao", "com.example.service.UserService"]
/// ```
#[derive(Debug, Clone)]
pub struct ManifestScanner {
    types: Vec<TypeKey>,
}

impl ManifestScanner {
    /// 从 TOML 文本创建
    pub fn from_toml(content: &str) -> ScanResult<Self> {
        let manifest: TypeManifest = toml::from_str(content).map_err(|e| ScanError::Manifest {
            message: e.to_string(),
        })?;
        let mut types: Vec<TypeKey> = manifest.types.into_iter().map(TypeKey::from).collect();
        types.sort();
        types.dedup();
        Ok(Self { types })
    }

    /// 从清单文件创建
    pub fn from_path(path: impl AsRef<Path>) -> ScanResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let scanner = Self::from_toml(&content)?;
        info!("加载类型清单: {} ({} 个类型)", path.display(), scanner.types.len());
        Ok(scanner)
    }

    /// 清单中的所有类型
    pub fn types(&self) -> &[TypeKey] {
        &self.types
    }
}

impl NamespaceScanner for ManifestScanner {
    fn top_level_types(&self, namespace: &str) -> ScanResult<Vec<TypeKey>> {
        validate_namespace(namespace)?;
        let types: Vec<TypeKey> = self
            .types
            .iter()
            .filter(|key| key.is_within(namespace))
            .cloned()
            .collect();
        if types.is_empty() {
            debug!("类型清单中命名空间 '{}' 没有类型", namespace);
        }
        Ok(types)
    }

    fn name(&self) -> &str {
        "manifest"
    }
}
