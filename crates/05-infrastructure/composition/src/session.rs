//! 装配会话
//!
//! 一次装配过程的全部可变状态：解析器产生的声明交给解析器注册，
//! 文档结束时运行一次字段注入。

use crate::context::WiringContext;
use config_abstractions::{Declaration, DeclarationTarget, DescriptorHandler, PropertyTable};
use di_abstractions::{
    ComponentRegistry, ComponentResolver, DependencyInjector, InjectionReport, NamespaceScanner,
};
use di_impl::{ComponentResolverImpl, FieldInjector};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, info};
use wiring_common::{DescriptorError, ManagerHandle, TypeCatalog, WiringResult};

/// 装配会话
pub struct WiringSession {
    resolver: ComponentResolverImpl,
    injector: Box<dyn DependencyInjector>,
    properties: PropertyTable,
    report: Option<InjectionReport>,
}

impl WiringSession {
    /// 创建会话，注册表为空
    pub fn new(
        catalog: Arc<TypeCatalog>,
        scanner: Rc<dyn NamespaceScanner>,
        manager: ManagerHandle,
    ) -> Self {
        Self {
            resolver: ComponentResolverImpl::new(catalog, scanner, manager),
            injector: Box::new(FieldInjector::new()),
            properties: PropertyTable::new(),
            report: None,
        }
    }

    /// 替换注入器
    pub fn with_injector(mut self, injector: Box<dyn DependencyInjector>) -> Self {
        self.injector = injector;
        self
    }

    /// 文档是否已经处理完成
    pub fn is_finished(&self) -> bool {
        self.report.is_some()
    }

    /// 组件解析器
    pub fn resolver(&self) -> &ComponentResolverImpl {
        &self.resolver
    }

    /// 转换为只读的装配结果
    pub fn into_context(self) -> WiringResult<WiringContext> {
        let Some(report) = self.report else {
            return Err(DescriptorError::Malformed {
                position: 0,
                message: "描述文件尚未处理完成".to_string(),
            }
            .into());
        };
        let (data_access, services) = self.resolver.into_registries();
        Ok(WiringContext::new(data_access, services, self.properties, report))
    }
}

impl DescriptorHandler for WiringSession {
    fn declare(&mut self, declaration: Declaration) -> WiringResult<()> {
        if self.is_finished() {
            return Err(DescriptorError::AlreadyFinished.into());
        }
        debug!("处理声明: {}", declaration);
        match &declaration.target {
            DeclarationTarget::Class(name) => {
                self.resolver.resolve_by_class(declaration.kind, name)
            }
            DeclarationTarget::Namespace(namespace) => {
                self.resolver.resolve_by_namespace(declaration.kind, namespace)
            }
        }
    }

    fn finish(&mut self, properties: PropertyTable) -> WiringResult<()> {
        if self.is_finished() {
            return Err(DescriptorError::AlreadyFinished.into());
        }
        let report = self
            .injector
            .inject_all(self.resolver.services(), self.resolver.data_access())?;
        info!(
            "装配完成: {} 个数据访问键, {} 个服务键, {} 个属性",
            self.resolver.data_access().len(),
            self.resolver.services().len(),
            properties.len()
        );
        self.properties = properties;
        self.report = Some(report);
        Ok(())
    }
}
