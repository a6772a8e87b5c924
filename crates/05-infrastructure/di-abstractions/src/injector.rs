//! 依赖注入器抽象接口

use crate::registry::ComponentRegistry;
use wiring_common::DependencyResult;

/// 依赖注入器 trait
///
/// 在整个描述文件处理完成后运行一次，把数据访问组件写入服务的注入点。
pub trait DependencyInjector {
    /// 为所有服务注入数据访问组件
    fn inject_all(
        &self,
        services: &dyn ComponentRegistry,
        data_access: &dyn ComponentRegistry,
    ) -> DependencyResult<InjectionReport>;
}

/// 注入结果统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InjectionReport {
    /// 访问的服务实例数量
    pub services_visited: usize,
    /// 写入的字段数量
    pub fields_injected: usize,
}
