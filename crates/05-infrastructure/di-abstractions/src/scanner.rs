//! 命名空间扫描器抽象接口
//!
//! 把命名空间名称映射为其中（递归包含子命名空间）的所有顶层类型

use wiring_common::{ScanError, ScanResult, TypeKey};

/// 命名空间扫描器 trait
pub trait NamespaceScanner {
    /// 获取命名空间及其子命名空间中的所有顶层类型
    fn top_level_types(&self, namespace: &str) -> ScanResult<Vec<TypeKey>>;

    /// 扫描器名称
    fn name(&self) -> &str;
}

/// 校验命名空间格式
///
/// 命名空间由非空的点分段组成，每段只包含字母、数字和下划线。
pub fn validate_namespace(namespace: &str) -> ScanResult<()> {
    let malformed = |reason: &str| ScanError::MalformedNamespace {
        namespace: namespace.to_string(),
        reason: reason.to_string(),
    };

    if namespace.is_empty() {
        return Err(malformed("命名空间为空"));
    }
    for segment in namespace.split('.') {
        if segment.is_empty() {
            return Err(malformed("存在空的命名段"));
        }
        if !segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(malformed("命名段包含非法字符"));
        }
    }
    Ok(())
}
