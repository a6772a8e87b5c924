//! 字段注入器实现

use di_abstractions::{ComponentRegistry, DependencyInjector, InjectionReport};
use tracing::{debug, info};
use wiring_common::{DependencyError, DependencyResult};

/// 字段注入器
///
/// 遍历每个服务实例（按实例去重），按服务声明的注入点在数据访问注册表中查找组件并写入。
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldInjector;

impl FieldInjector {
    /// 创建注入器
    pub fn new() -> Self {
        Self
    }
}

impl DependencyInjector for FieldInjector {
    fn inject_all(
        &self,
        services: &dyn ComponentRegistry,
        data_access: &dyn ComponentRegistry,
    ) -> DependencyResult<InjectionReport> {
        let mut report = InjectionReport::default();

        for instance in services.instances() {
            report.services_visited += 1;
            let Some(contract) = instance.contract() else {
                continue;
            };

            for point in contract.injection_points() {
                let component = data_access.get(point.capability().as_str()).ok_or_else(|| {
                    DependencyError::UnresolvedInjection {
                        service: instance.type_key().to_string(),
                        capability: point.capability().to_string(),
                    }
                })?;
                contract.inject(&point, &component)?;
                debug!(
                    "注入 {}.{} <- {}",
                    instance.type_key(),
                    point.field(),
                    component.type_key()
                );
                report.fields_injected += 1;
            }
        }

        info!(
            "字段注入完成: {} 个服务, {} 个字段",
            report.services_visited, report.fields_injected
        );
        Ok(report)
    }
}
