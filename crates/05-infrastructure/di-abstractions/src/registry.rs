//! 组件注册表抽象接口

use std::fmt;
use std::sync::Arc;
use wiring_common::{ComponentInstance, ComponentKind, ComponentRef, TypeKey};

/// 组件注册表 trait
///
/// 每个键只对应一个实例；同一实例可以出现在多个键下（具体类型及其能力接口），
/// 这些键都是同一实例的别名。
pub trait ComponentRegistry {
    /// 注册表保存的组件种类
    fn kind(&self) -> ComponentKind;

    /// 注册实例
    ///
    /// 具体类型已注册时不替换原实例，只记录冲突；
    /// 能力接口键已被其他实例占用时，仅跳过该键。
    fn register(
        &mut self,
        instance: ComponentInstance,
        capabilities: &[TypeKey],
    ) -> RegistrationOutcome;

    /// 按键查找组件
    fn get(&self, key: &str) -> Option<ComponentRef>;

    /// 是否存在指定键
    fn contains(&self, key: &str) -> bool;

    /// 所有键
    fn keys(&self) -> Vec<TypeKey>;

    /// 所有实例（去重，按注册顺序）
    fn instances(&self) -> Vec<Arc<ComponentInstance>>;

    /// 记录的注册冲突
    fn conflicts(&self) -> &[RegistrationConflict];

    /// 键数量
    fn len(&self) -> usize;

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 注册结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// 已注册，包含实际写入的键
    Registered { keys: Vec<TypeKey> },
    /// 具体类型已经注册过，原实例保持不变
    Duplicate,
}

impl RegistrationOutcome {
    /// 是否写入了新实例
    pub fn is_registered(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }
}

/// 注册冲突
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationConflict {
    /// 发生冲突的键
    pub key: TypeKey,
    /// 已占用该键的具体类型
    pub existing: TypeKey,
    /// 被拒绝的具体类型
    pub rejected: TypeKey,
}

impl RegistrationConflict {
    /// 是否为同一具体类型的重复声明
    pub fn is_duplicate_type(&self) -> bool {
        self.existing == self.rejected
    }
}

impl fmt::Display for RegistrationConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_duplicate_type() {
            write!(f, "重复声明 '{}'", self.rejected)
        } else {
            write!(
                f,
                "键 '{}' 已由 '{}' 占用，'{}' 未写入该键",
                self.key, self.existing, self.rejected
            )
        }
    }
}
