//! 组件工厂定义
//!
//! 以显式的工厂函数表代替运行时的构造器查找

use crate::component::ManagerHandle;
use crate::errors::ConstructionError;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 类型擦除后的实例
pub type ErasedInstance = Arc<dyn Any + Send + Sync>;

/// 接收管理器句柄的工厂函数
pub type ManagedFactoryFn =
    Arc<dyn Fn(ManagerHandle) -> Result<ErasedInstance, ConstructionError> + Send + Sync>;

/// 无参工厂函数
pub type PlainFactoryFn = Arc<dyn Fn() -> Result<ErasedInstance, ConstructionError> + Send + Sync>;

/// 组件工厂
///
/// 每个类型只接受一种构造形态：数据访问组件为单管理器参数，服务为无参。
#[derive(Clone)]
pub enum Factory {
    /// 单管理器参数构造
    WithManager(ManagedFactoryFn),
    /// 无参构造
    NoArgs(PlainFactoryFn),
}

impl Factory {
    /// 创建单管理器参数工厂
    pub fn with_manager<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(ManagerHandle) -> Result<T, ConstructionError> + Send + Sync + 'static,
    {
        Self::WithManager(Arc::new(move |manager| {
            factory(manager).map(|instance| Arc::new(instance) as ErasedInstance)
        }))
    }

    /// 创建无参工厂
    pub fn no_args<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn() -> Result<T, ConstructionError> + Send + Sync + 'static,
    {
        Self::NoArgs(Arc::new(move || {
            factory().map(|instance| Arc::new(instance) as ErasedInstance)
        }))
    }

    /// 构造形态名称
    pub fn shape(&self) -> &'static str {
        match self {
            Self::WithManager(_) => "with-manager",
            Self::NoArgs(_) => "no-args",
        }
    }
}

impl fmt::Debug for Factory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Factory").field(&self.shape()).finish()
    }
}
