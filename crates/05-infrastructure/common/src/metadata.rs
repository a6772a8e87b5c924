//! 类型元数据定义
//!
//! 提供类型标识、组件种类和类型形态

use std::borrow::{Borrow, Cow};
use std::fmt;

/// 数据访问组件的根标记接口
pub const DATA_ACCESS_MARKER: &str = "wiring.dao.DataAccess";

/// 服务组件的根标记接口
pub const SERVICE_MARKER: &str = "wiring.service.Service";

/// 稳定的类型标识
///
/// 使用点分隔的全限定名，例如 `com.example.dao.UserDao`。
/// 具体类型和能力接口使用同一种标识。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeKey(Cow<'static, str>);

impl TypeKey {
    /// 从静态字符串创建类型标识
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// 创建类型标识
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// 全限定名
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 简短名称（不包含命名空间）
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// 所在命名空间
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(namespace, _)| namespace)
    }

    /// 是否位于指定命名空间或其任意子命名空间中
    pub fn is_within(&self, namespace: &str) -> bool {
        self.0
            .strip_prefix(namespace)
            .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TypeKey {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl Borrow<str> for TypeKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for TypeKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// 组件种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// 数据访问组件，构造时接收一个管理器句柄
    DataAccess,
    /// 服务组件，无参构造，构造后进行字段注入
    Service,
}

impl ComponentKind {
    /// 该种类的根标记接口
    pub fn marker(&self) -> TypeKey {
        match self {
            Self::DataAccess => TypeKey::from_static(DATA_ACCESS_MARKER),
            Self::Service => TypeKey::from_static(SERVICE_MARKER),
        }
    }

    /// 描述文件中的元素名称
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::DataAccess => "dao",
            Self::Service => "service",
        }
    }

    /// 构造器形态描述
    pub fn constructor_shape(&self) -> &'static str {
        match self {
            Self::DataAccess => "单管理器参数",
            Self::Service => "无参",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataAccess => f.write_str("DataAccess"),
            Self::Service => f.write_str("Service"),
        }
    }
}

/// 类型形态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// 接口（能力契约），不能实例化
    Interface,
    /// 能力的基础实现类型，本身不作为组件注册
    BaseImplementation,
    /// 可实例化的具体类型
    Concrete,
}
