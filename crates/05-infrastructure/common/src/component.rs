//! 组件基础接口定义
//!
//! 提供数据访问组件、服务组件以及显式注入契约

use crate::errors::{DependencyError, DependencyResult};
use crate::metadata::{ComponentKind, TypeKey};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 数据访问能力标记
///
/// 所有数据访问组件都必须实现此 trait
pub trait DataAccess: Send + Sync + 'static {}

/// 服务能力标记及注入契约
///
/// 服务通过 [`Service::injection_points`] 显式声明可注入的字段，
/// 注入器通过 [`Service::inject`] 写入解析到的数据访问组件。
pub trait Service: Send + Sync + 'static {
    /// 声明的注入点
    fn injection_points(&self) -> Vec<InjectionPoint> {
        Vec::new()
    }

    /// 将组件写入指定注入点
    fn inject(&self, point: &InjectionPoint, component: &ComponentRef) -> DependencyResult<()> {
        let _ = component;
        Err(DependencyError::InjectionRejected {
            service: std::any::type_name::<Self>().to_string(),
            field: point.field().to_string(),
            capability: point.capability().to_string(),
            message: "服务没有声明该注入点".to_string(),
        })
    }
}

/// 注入点：服务字段名称及其数据访问能力类型
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InjectionPoint {
    field: &'static str,
    capability: TypeKey,
}

impl InjectionPoint {
    /// 创建注入点
    pub fn new(field: &'static str, capability: impl Into<TypeKey>) -> Self {
        Self {
            field,
            capability: capability.into(),
        }
    }

    /// 字段名称
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// 字段的能力类型
    pub fn capability(&self) -> &TypeKey {
        &self.capability
    }
}

/// 管理器句柄
///
/// 每个数据访问组件构造时接收的外部依赖，装配过程本身从不使用它。
#[derive(Clone)]
pub struct ManagerHandle {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ManagerHandle {
    /// 包装管理器
    pub fn new<M: Any + Send + Sync>(manager: M) -> Self {
        Self::from_arc(Arc::new(manager))
    }

    /// 包装共享的管理器
    pub fn from_arc<M: Any + Send + Sync>(manager: Arc<M>) -> Self {
        Self {
            inner: manager,
            type_name: std::any::type_name::<M>(),
        }
    }

    /// 不携带任何管理器的句柄
    pub fn detached() -> Self {
        Self::new(())
    }

    /// 获取指定类型的管理器
    pub fn downcast<M: Any + Send + Sync>(&self) -> Option<Arc<M>> {
        self.inner.clone().downcast::<M>().ok()
    }

    /// 管理器类型名称
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for ManagerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerHandle")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// 已构造的组件实例
///
/// 实例由注册表独占持有，各个注册键只是指向同一实例的别名。
pub struct ComponentInstance {
    type_key: TypeKey,
    kind: ComponentKind,
    object: Arc<dyn Any + Send + Sync>,
    views: HashMap<TypeKey, Arc<dyn Any + Send + Sync>>,
    contract: Option<Arc<dyn Service>>,
}

impl ComponentInstance {
    /// 组装实例
    ///
    /// `views` 中每个值都是 `Arc<T>` 被再次擦除后的结果，`T` 为对应键的类型。
    pub fn new(
        type_key: TypeKey,
        kind: ComponentKind,
        object: Arc<dyn Any + Send + Sync>,
        views: HashMap<TypeKey, Arc<dyn Any + Send + Sync>>,
        contract: Option<Arc<dyn Service>>,
    ) -> Self {
        Self {
            type_key,
            kind,
            object,
            views,
            contract,
        }
    }

    /// 具体类型
    pub fn type_key(&self) -> &TypeKey {
        &self.type_key
    }

    /// 组件种类
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// 实例以各个键呈现的类型
    pub fn view_keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.views.keys()
    }

    /// 服务的注入契约
    pub fn contract(&self) -> Option<&Arc<dyn Service>> {
        self.contract.as_ref()
    }

    /// 以具体类型获取实例
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.object.clone().downcast::<T>().ok()
    }

    fn view<T: ?Sized + 'static>(&self, key: &TypeKey) -> Option<Arc<T>> {
        self.views.get(key)?.downcast_ref::<Arc<T>>().cloned()
    }
}

impl fmt::Debug for ComponentInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentInstance")
            .field("type_key", &self.type_key)
            .field("kind", &self.kind)
            .field("views", &self.views.keys().collect::<Vec<_>>())
            .field("has_contract", &self.contract.is_some())
            .finish()
    }
}

/// 注册表中的组件引用
///
/// 记录被查找的键，以便按该键的类型取得实例。
#[derive(Clone)]
pub struct ComponentRef {
    key: TypeKey,
    instance: Arc<ComponentInstance>,
}

impl ComponentRef {
    /// 创建引用
    pub fn new(key: TypeKey, instance: Arc<ComponentInstance>) -> Self {
        Self { key, instance }
    }

    /// 查找所用的键
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// 实例的具体类型
    pub fn type_key(&self) -> &TypeKey {
        self.instance.type_key()
    }

    /// 底层实例
    pub fn instance(&self) -> &Arc<ComponentInstance> {
        &self.instance
    }

    /// 以键对应的类型获取实例，例如 `get::<dyn UserRepository>()`
    pub fn get<T: ?Sized + 'static>(&self) -> Option<Arc<T>> {
        self.instance.view::<T>(&self.key)
    }

    /// 是否与另一个引用指向同一实例
    pub fn same_instance(&self, other: &ComponentRef) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRef")
            .field("key", &self.key)
            .field("type_key", self.instance.type_key())
            .finish()
    }
}

/// 服务字段上的注入槽
///
/// 注入器可以反复强制写入，最后一次写入生效。
pub struct Injected<T: ?Sized> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized + 'static> Injected<T> {
    /// 创建空的注入槽
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// 当前注入的组件
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    /// 是否已经注入
    pub fn is_wired(&self) -> bool {
        self.slot.read().is_some()
    }

    /// 写入组件
    pub fn set(&self, value: Arc<T>) {
        *self.slot.write() = Some(value);
    }

    /// 从组件引用写入，类型不匹配时返回错误
    pub fn fill(
        &self,
        service: &str,
        point: &InjectionPoint,
        component: &ComponentRef,
    ) -> DependencyResult<()> {
        let value = component
            .get::<T>()
            .ok_or_else(|| DependencyError::InjectionRejected {
                service: service.to_string(),
                field: point.field().to_string(),
                capability: point.capability().to_string(),
                message: format!(
                    "'{}' 无法以 {} 类型呈现",
                    component.type_key(),
                    std::any::type_name::<T>()
                ),
            })?;
        self.set(value);
        Ok(())
    }
}

impl<T: ?Sized + 'static> Default for Injected<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Injected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Injected")
            .field("wired", &self.slot.read().is_some())
            .finish()
    }
}
