//! 类型目录
//!
//! 记录每个可被描述文件引用的类型：形态、实现的能力接口以及工厂函数。
//! 目录取代运行时的类加载与类型层次遍历。

use crate::component::{ComponentInstance, DataAccess, ManagerHandle, Service};
use crate::errors::{ConstructionError, DependencyError, DependencyResult};
use crate::factory::{ErasedInstance, Factory};
use crate::metadata::{ComponentKind, TypeKey, TypeShape};
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// 视图转换函数：把擦除的实例转换成 `Arc<I>` 并再次擦除
pub type ViewCast = Arc<dyn Fn(&ErasedInstance) -> Option<ErasedInstance> + Send + Sync>;

/// 服务契约转换函数
pub type ContractCast = Arc<dyn Fn(&ErasedInstance) -> Option<Arc<dyn Service>> + Send + Sync>;

/// 能力接口绑定
#[derive(Clone)]
pub struct CapabilityBinding {
    key: TypeKey,
    cast: ViewCast,
}

impl CapabilityBinding {
    /// 能力接口
    pub fn key(&self) -> &TypeKey {
        &self.key
    }
}

impl fmt::Debug for CapabilityBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilityBinding").field(&self.key).finish()
    }
}

/// 类型目录条目
#[derive(Clone)]
pub struct TypeEntry {
    key: TypeKey,
    shape: TypeShape,
    capability: Option<ComponentKind>,
    capabilities: Vec<CapabilityBinding>,
    own_view: Option<ViewCast>,
    contract: Option<ContractCast>,
    factory: Option<Factory>,
    enclosing: Option<TypeKey>,
}

impl TypeEntry {
    fn bare(key: TypeKey, shape: TypeShape, capability: Option<ComponentKind>) -> Self {
        Self {
            key,
            shape,
            capability,
            capabilities: Vec::new(),
            own_view: None,
            contract: None,
            factory: None,
            enclosing: None,
        }
    }

    /// 具体的数据访问类型，使用单管理器参数工厂
    pub fn data_access<T, F>(name: impl Into<TypeKey>, factory: F) -> Self
    where
        T: DataAccess,
        F: Fn(ManagerHandle) -> Result<T, ConstructionError> + Send + Sync + 'static,
    {
        let mut entry = Self::bare(
            name.into(),
            TypeShape::Concrete,
            Some(ComponentKind::DataAccess),
        );
        entry.own_view = Some(own_view::<T>());
        entry.factory = Some(Factory::with_manager(factory));
        entry
    }

    /// 具体的服务类型，使用无参工厂
    pub fn service<T, F>(name: impl Into<TypeKey>, factory: F) -> Self
    where
        T: Service,
        F: Fn() -> Result<T, ConstructionError> + Send + Sync + 'static,
    {
        let mut entry = Self::bare(name.into(), TypeShape::Concrete, Some(ComponentKind::Service));
        entry.own_view = Some(own_view::<T>());
        entry.contract = Some(Arc::new(|object: &ErasedInstance| {
            object
                .clone()
                .downcast::<T>()
                .ok()
                .map(|service| service as Arc<dyn Service>)
        }));
        entry.factory = Some(Factory::no_args(factory));
        entry
    }

    /// 能力接口
    pub fn interface(name: impl Into<TypeKey>, kind: ComponentKind) -> Self {
        Self::bare(name.into(), TypeShape::Interface, Some(kind))
    }

    /// 能力的基础实现类型
    pub fn base(name: impl Into<TypeKey>, kind: ComponentKind) -> Self {
        Self::bare(name.into(), TypeShape::BaseImplementation, Some(kind))
    }

    /// 不具备任何组件能力的类型
    pub fn plain(name: impl Into<TypeKey>) -> Self {
        Self::bare(name.into(), TypeShape::Concrete, None)
    }

    /// 声明实现的能力接口及其转换方式
    pub fn implements<T, I, F>(mut self, capability: impl Into<TypeKey>, cast: F) -> Self
    where
        T: Any + Send + Sync,
        I: ?Sized + Send + Sync + 'static,
        F: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
    {
        let view_cast: ViewCast = Arc::new(move |object: &ErasedInstance| {
            let concrete = object.clone().downcast::<T>().ok()?;
            Some(Arc::new(cast(concrete)) as ErasedInstance)
        });
        self.capabilities.push(CapabilityBinding {
            key: capability.into(),
            cast: view_cast,
        });
        self
    }

    /// 标记为嵌套类型（不属于顶层类型）
    pub fn nested_in(mut self, outer: impl Into<TypeKey>) -> Self {
        self.enclosing = Some(outer.into());
        self
    }

    /// 替换工厂函数
    pub fn with_factory(mut self, factory: Factory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// 移除工厂函数
    pub fn without_factory(mut self) -> Self {
        self.factory = None;
        self
    }

    /// 类型标识
    pub fn key(&self) -> &TypeKey {
        &self.key
    }

    /// 类型形态
    pub fn shape(&self) -> TypeShape {
        self.shape
    }

    /// 是否为接口
    pub fn is_interface(&self) -> bool {
        self.shape == TypeShape::Interface
    }

    /// 是否为能力的基础实现类型
    pub fn is_base_implementation(&self) -> bool {
        self.shape == TypeShape::BaseImplementation
    }

    /// 是否实现指定种类的能力
    pub fn implements_capability(&self, kind: ComponentKind) -> bool {
        self.capability == Some(kind)
    }

    /// 实现的能力接口（不含根标记接口）
    pub fn capability_keys(&self) -> impl Iterator<Item = &TypeKey> {
        let marker = self.capability.map(|kind| kind.marker());
        self.capabilities
            .iter()
            .map(CapabilityBinding::key)
            .filter(move |key| Some(*key) != marker.as_ref())
    }

    /// 是否为顶层类型
    pub fn is_top_level(&self) -> bool {
        self.enclosing.is_none()
    }

    /// 工厂函数
    pub fn factory(&self) -> Option<&Factory> {
        self.factory.as_ref()
    }

    /// 把工厂产出的对象组装为组件实例
    pub fn assemble(&self, kind: ComponentKind, object: ErasedInstance) -> ComponentInstance {
        let marker = kind.marker();
        let mut views = HashMap::new();
        if let Some(view) = self.own_view.as_ref().and_then(|cast| cast(&object)) {
            views.insert(self.key.clone(), view);
        }
        for binding in self.capabilities.iter().filter(|b| b.key != marker) {
            if let Some(view) = (binding.cast)(&object) {
                views.insert(binding.key.clone(), view);
            }
        }
        let contract = self.contract.as_ref().and_then(|cast| cast(&object));
        ComponentInstance::new(self.key.clone(), kind, object, views, contract)
    }
}

impl fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeEntry")
            .field("key", &self.key)
            .field("shape", &self.shape)
            .field("capability", &self.capability)
            .field("capabilities", &self.capabilities)
            .field("factory", &self.factory)
            .field("enclosing", &self.enclosing)
            .finish()
    }
}

fn own_view<T: Any + Send + Sync>() -> ViewCast {
    Arc::new(|object: &ErasedInstance| {
        object
            .clone()
            .downcast::<T>()
            .ok()
            .map(|concrete| Arc::new(concrete) as ErasedInstance)
    })
}

/// 类型目录
///
/// 名称到类型条目的不可变映射，相当于组件的类路径。
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    entries: BTreeMap<TypeKey, Arc<TypeEntry>>,
}

impl TypeCatalog {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册类型条目，同名类型只能注册一次
    pub fn register(&mut self, entry: TypeEntry) -> DependencyResult<()> {
        if self.entries.contains_key(entry.key()) {
            return Err(DependencyError::RegistrationError {
                type_name: entry.key().to_string(),
                message: "类型已存在于目录中".to_string(),
            });
        }
        self.entries.insert(entry.key().clone(), Arc::new(entry));
        Ok(())
    }

    /// 链式注册
    pub fn with(mut self, entry: TypeEntry) -> DependencyResult<Self> {
        self.register(entry)?;
        Ok(self)
    }

    /// 按全限定名查找类型
    pub fn lookup(&self, name: &str) -> Option<Arc<TypeEntry>> {
        self.entries.get(name).cloned()
    }

    /// 是否包含指定类型
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// 位于命名空间（含子命名空间）中的所有条目，按名称排序
    pub fn entries_within<'a>(
        &'a self,
        namespace: &'a str,
    ) -> impl Iterator<Item = &'a Arc<TypeEntry>> + 'a {
        self.entries
            .values()
            .filter(move |entry| entry.key().is_within(namespace))
    }

    /// 所有类型标识
    pub fn keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.entries.keys()
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
