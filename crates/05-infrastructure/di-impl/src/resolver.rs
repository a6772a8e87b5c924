//! 组件解析器实现
//!
//! 把描述文件中的类型引用或命名空间引用转换为已注册的组件实例

use crate::registry::ComponentRegistryImpl;
use di_abstractions::{ComponentRegistry, ComponentResolver, NamespaceScanner};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info};
use wiring_common::{
    ComponentKind, DependencyError, DependencyResult, ErasedInstance, Factory, ManagerHandle,
    TypeCatalog, TypeEntry, WiringError, WiringResult,
};

/// 组件解析器实现
///
/// 持有数据访问和服务两个注册表，装配结束后通过 [`Self::into_registries`] 交出。
pub struct ComponentResolverImpl {
    /// 类型目录
    catalog: Arc<TypeCatalog>,
    /// 命名空间扫描器
    scanner: Rc<dyn NamespaceScanner>,
    /// 传给数据访问组件构造函数的管理器句柄
    manager: ManagerHandle,
    /// 数据访问组件注册表
    data_access: ComponentRegistryImpl,
    /// 服务组件注册表
    services: ComponentRegistryImpl,
}

impl ComponentResolverImpl {
    /// 创建解析器，注册表为空
    pub fn new(
        catalog: Arc<TypeCatalog>,
        scanner: Rc<dyn NamespaceScanner>,
        manager: ManagerHandle,
    ) -> Self {
        Self {
            catalog,
            scanner,
            manager,
            data_access: ComponentRegistryImpl::new(ComponentKind::DataAccess),
            services: ComponentRegistryImpl::new(ComponentKind::Service),
        }
    }

    /// 数据访问组件注册表
    pub fn data_access(&self) -> &ComponentRegistryImpl {
        &self.data_access
    }

    /// 服务组件注册表
    pub fn services(&self) -> &ComponentRegistryImpl {
        &self.services
    }

    /// 交出两个注册表：(数据访问, 服务)
    pub fn into_registries(self) -> (ComponentRegistryImpl, ComponentRegistryImpl) {
        (self.data_access, self.services)
    }

    fn registry_mut(&mut self, kind: ComponentKind) -> &mut ComponentRegistryImpl {
        match kind {
            ComponentKind::DataAccess => &mut self.data_access,
            ComponentKind::Service => &mut self.services,
        }
    }

    fn resolve_entry(&mut self, kind: ComponentKind, entry: &TypeEntry) -> DependencyResult<()> {
        if entry.is_interface()
            || entry.is_base_implementation()
            || !entry.implements_capability(kind)
        {
            debug!("跳过 '{}': 不是可实例化的 {} 类型", entry.key(), kind);
            return Ok(());
        }

        let object = self.construct(kind, entry)?;
        let instance = entry.assemble(kind, object);
        let capabilities: Vec<_> = entry.capability_keys().cloned().collect();
        if self.registry_mut(kind).register(instance, &capabilities).is_registered() {
            info!("已注册 {} 组件: {}", kind, entry.key());
        }
        Ok(())
    }

    fn construct(&self, kind: ComponentKind, entry: &TypeEntry) -> DependencyResult<ErasedInstance> {
        let result = match (kind, entry.factory()) {
            (ComponentKind::DataAccess, Some(Factory::WithManager(factory))) => {
                factory(self.manager.clone())
            }
            (ComponentKind::Service, Some(Factory::NoArgs(factory))) => factory(),
            _ => {
                return Err(DependencyError::missing_constructor(
                    entry.key().as_str(),
                    kind.constructor_shape(),
                ))
            }
        };
        result.map_err(|e| DependencyError::construction(entry.key().as_str(), e))
    }
}

impl ComponentResolver for ComponentResolverImpl {
    fn resolve_by_class(&mut self, kind: ComponentKind, type_name: &str) -> WiringResult<()> {
        let entry = self
            .catalog
            .lookup(type_name)
            .ok_or_else(|| DependencyError::TypeNotFound {
                type_name: type_name.to_string(),
            })?;
        self.resolve_entry(kind, &entry)?;
        Ok(())
    }

    fn resolve_by_namespace(&mut self, kind: ComponentKind, namespace: &str) -> WiringResult<()> {
        let types = self
            .scanner
            .top_level_types(namespace)
            .map_err(|e| WiringError::scan(namespace, e))?;
        debug!(
            "扫描器 '{}' 在 '{}' 中发现 {} 个类型",
            self.scanner.name(),
            namespace,
            types.len()
        );

        for type_key in types {
            if kind == ComponentKind::Service {
                let Some(entry) = self.catalog.lookup(type_key.as_str()) else {
                    return Err(DependencyError::TypeNotFound {
                        type_name: type_key.to_string(),
                    }
                    .into());
                };
                if entry.implements_capability(kind) {
                    self.resolve_entry(kind, &entry)?;
                }
            } else {
                self.resolve_by_class(kind, type_key.as_str())?;
            }
        }
        Ok(())
    }
}
