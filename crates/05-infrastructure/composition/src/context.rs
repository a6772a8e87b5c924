//! 装配结果

use config_abstractions::PropertyTable;
use di_abstractions::{ComponentRegistry, InjectionReport};
use di_impl::ComponentRegistryImpl;
use serde::Serialize;
use std::sync::Arc;

/// 装配结果
///
/// 装配成功后的数据访问注册表、服务注册表和属性表，只提供只读访问。
#[derive(Debug)]
pub struct WiringContext {
    data_access: ComponentRegistryImpl,
    services: ComponentRegistryImpl,
    properties: PropertyTable,
    report: InjectionReport,
}

impl WiringContext {
    pub(crate) fn new(
        data_access: ComponentRegistryImpl,
        services: ComponentRegistryImpl,
        properties: PropertyTable,
        report: InjectionReport,
    ) -> Self {
        Self {
            data_access,
            services,
            properties,
            report,
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

    /// 属性表
    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    /// 读取属性
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name)
    }

    /// 注入统计
    pub fn report(&self) -> InjectionReport {
        self.report
    }

    /// 按键获取服务的类型化视图
    pub fn service<T: ?Sized + 'static>(&self, key: &str) -> Option<Arc<T>> {
        self.services.resolve::<T>(key)
    }

    /// 按键获取数据访问组件的类型化视图
    pub fn data_access_component<T: ?Sized + 'static>(&self, key: &str) -> Option<Arc<T>> {
        self.data_access.resolve::<T>(key)
    }

    /// 生成可序列化的摘要
    pub fn summary(&self) -> WiringSummary {
        let conflicts = self
            .data_access
            .conflicts()
            .iter()
            .chain(self.services.conflicts())
            .map(ToString::to_string)
            .collect();
        WiringSummary {
            data_access: self.data_access.keys().iter().map(ToString::to_string).collect(),
            services: self.services.keys().iter().map(ToString::to_string).collect(),
            properties: self.properties.clone(),
            conflicts,
            services_visited: self.report.services_visited,
            fields_injected: self.report.fields_injected,
        }
    }
}

/// 装配结果摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WiringSummary {
    /// 数据访问注册表的键
    pub data_access: Vec<String>,
    /// 服务注册表的键
    pub services: Vec<String>,
    /// 属性表
    pub properties: PropertyTable,
    /// 注册冲突描述
    pub conflicts: Vec<String>,
    /// 访问的服务实例数量
    pub services_visited: usize,
    /// 写入的字段数量
    pub fields_injected: usize,
}
