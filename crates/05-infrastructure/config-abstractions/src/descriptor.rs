//! 描述文件语法定义
//!
//! ```xml
//! <wiring>
//!     <properties>
//!         <property name="timeout" value="30"/>
//!     </properties>
//!     <dao class="com.example.dao.UserDao"/>
//!     <dao package="com.example.dao.legacy"/>
//!     <service>com.example.service.UserService</service>
//! </wiring>
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use wiring_common::ComponentKind;

/// 属性块元素
pub const ELEMENT_PROPERTIES: &str = "properties";
/// 属性元素
pub const ELEMENT_PROPERTY: &str = "property";
/// 数据访问组件声明元素
pub const ELEMENT_DAO: &str = "dao";
/// 服务组件声明元素
pub const ELEMENT_SERVICE: &str = "service";

/// 类型引用属性
pub const ATTR_CLASS: &str = "class";
/// 命名空间引用属性
pub const ATTR_PACKAGE: &str = "package";
/// 属性名称
pub const ATTR_NAME: &str = "name";
/// 属性值
pub const ATTR_VALUE: &str = "value";

/// 根据元素名称获取声明的组件种类
pub fn declaration_kind(element: &str) -> Option<ComponentKind> {
    match element {
        ELEMENT_DAO => Some(ComponentKind::DataAccess),
        ELEMENT_SERVICE => Some(ComponentKind::Service),
        _ => None,
    }
}

/// 声明目标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationTarget {
    /// 全限定类型名
    Class(String),
    /// 递归扫描的命名空间
    Namespace(String),
}

impl fmt::Display for DeclarationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, "class '{name}'"),
            Self::Namespace(name) => write!(f, "package '{name}'"),
        }
    }
}

/// 组件声明
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// 组件种类
    pub kind: ComponentKind,
    /// 声明目标
    pub target: DeclarationTarget,
}

impl Declaration {
    /// 类型声明
    pub fn class(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            target: DeclarationTarget::Class(name.into()),
        }
    }

    /// 命名空间声明
    pub fn namespace(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            target: DeclarationTarget::Namespace(name.into()),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> {}", self.kind.element_name(), self.target)
    }
}

/// 属性表
///
/// 名称唯一，重复写入时后写入者生效。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyTable {
    values: BTreeMap<String, String>,
}

impl PropertyTable {
    /// 创建空属性表
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入属性，返回被覆盖的旧值
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// 读取属性
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// 是否存在属性
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// 按名称排序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 属性数量
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
