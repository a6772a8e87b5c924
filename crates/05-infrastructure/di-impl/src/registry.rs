//! 多键组件注册表

use di_abstractions::{ComponentRegistry, RegistrationConflict, RegistrationOutcome};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};
use wiring_common::{ComponentInstance, ComponentKind, ComponentRef, TypeKey};

/// 组件注册表实现
///
/// 以具体类型和能力接口为键保存实例，每个键先写入者生效。
#[derive(Debug)]
pub struct ComponentRegistryImpl {
    /// 组件种类
    kind: ComponentKind,
    /// 键到实例的映射
    entries: BTreeMap<TypeKey, Arc<ComponentInstance>>,
    /// 去重后的实例，按注册顺序
    instances: Vec<Arc<ComponentInstance>>,
    /// 注册冲突
    conflicts: Vec<RegistrationConflict>,
}

impl ComponentRegistryImpl {
    /// 创建指定种类的空注册表
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
            instances: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    /// 按键获取类型化视图
    ///
    /// 数据访问组件在能力接口键下以 `dyn Trait` 呈现，在具体类型键下以具体类型呈现。
    pub fn resolve<T: ?Sized + 'static>(&self, key: &str) -> Option<Arc<T>> {
        self.get(key)?.get::<T>()
    }

    fn record_conflict(&mut self, key: TypeKey, existing: TypeKey, rejected: TypeKey) {
        let conflict = RegistrationConflict {
            key,
            existing,
            rejected,
        };
        warn!("{} 注册冲突: {}", self.kind, conflict);
        self.conflicts.push(conflict);
    }
}

impl ComponentRegistry for ComponentRegistryImpl {
    fn kind(&self) -> ComponentKind {
        self.kind
    }

    fn register(
        &mut self,
        instance: ComponentInstance,
        capabilities: &[TypeKey],
    ) -> RegistrationOutcome {
        let concrete = instance.type_key().clone();
        if let Some(owner) = self.entries.get(&concrete) {
            let existing = owner.type_key().clone();
            self.record_conflict(concrete.clone(), existing, concrete);
            return RegistrationOutcome::Duplicate;
        }

        let instance = Arc::new(instance);
        let marker = self.kind.marker();
        let mut keys = vec![concrete.clone()];
        self.entries.insert(concrete.clone(), instance.clone());

        for capability in capabilities.iter().filter(|key| **key != marker) {
            if let Some(owner) = self.entries.get(capability) {
                if Arc::ptr_eq(owner, &instance) {
                    continue;
                }
                let existing = owner.type_key().clone();
                self.record_conflict(capability.clone(), existing, concrete.clone());
                continue;
            }
            self.entries.insert(capability.clone(), instance.clone());
            keys.push(capability.clone());
        }

        debug!("注册 {} 组件: {} -> {:?}", self.kind, concrete, keys);
        self.instances.push(instance);
        RegistrationOutcome::Registered { keys }
    }

    fn get(&self, key: &str) -> Option<ComponentRef> {
        self.entries
            .get_key_value(key)
            .map(|(key, instance)| ComponentRef::new(key.clone(), instance.clone()))
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn keys(&self) -> Vec<TypeKey> {
        self.entries.keys().cloned().collect()
    }

    fn instances(&self) -> Vec<Arc<ComponentInstance>> {
        self.instances.clone()
    }

    fn conflicts(&self) -> &[RegistrationConflict] {
        &self.conflicts
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
