//! 演示用类型目录

use component_macros::{DataAccess, Service};
use std::collections::BTreeMap;
use std::sync::Arc;
use wiring_common::{
    ComponentKind, ConstructionError, DependencyResult, Injected, ManagerHandle, TypeCatalog,
    TypeEntry,
};

/// 数据源管理器，数据访问组件构造时获得它的句柄
#[derive(Debug)]
pub struct DataSourceManager {
    pub url: String,
}

/// 客户查询
pub trait CustomerDao: Send + Sync {
    fn customer_name(&self, id: u32) -> Option<String>;
}

/// 订单查询
pub trait OrderDao: Send + Sync {
    fn orders_of(&self, customer: u32) -> Vec<u64>;
}

#[derive(DataAccess)]
pub struct CustomerDaoImpl {
    source: String,
    names: BTreeMap<u32, String>,
}

impl CustomerDao for CustomerDaoImpl {
    fn customer_name(&self, id: u32) -> Option<String> {
        self.names
            .get(&id)
            .map(|name| format!("{} ({})", name, self.source))
    }
}

#[derive(DataAccess)]
pub struct OrderDaoImpl;

impl OrderDao for OrderDaoImpl {
    fn orders_of(&self, customer: u32) -> Vec<u64> {
        (1..=u64::from(customer % 4)).map(|n| n * 1000 + u64::from(customer)).collect()
    }
}

#[derive(Default, Service)]
#[service(name = "demo.service.OrderService")]
pub struct OrderService {
    #[inject("demo.dao.CustomerDao")]
    customers: Injected<dyn CustomerDao>,
    #[inject("demo.dao.OrderDao")]
    orders: Injected<dyn OrderDao>,
}

impl OrderService {
    /// 客户订单摘要
    pub fn describe(&self, customer: u32) -> Option<String> {
        let name = self.customers.get()?.customer_name(customer)?;
        let orders = self.orders.get()?.orders_of(customer);
        Some(format!("{}: {} 个订单 {:?}", name, orders.len(), orders))
    }
}

#[derive(Default, Service)]
#[service(name = "demo.service.ReportService")]
pub struct ReportService {
    #[inject("demo.dao.OrderDao")]
    orders: Injected<dyn OrderDao>,
}

impl ReportService {
    /// 订单总数
    pub fn total_orders(&self, customers: &[u32]) -> usize {
        self.orders
            .get()
            .map(|dao| customers.iter().map(|c| dao.orders_of(*c).len()).sum())
            .unwrap_or(0)
    }
}

fn customer_dao(manager: ManagerHandle) -> Result<CustomerDaoImpl, ConstructionError> {
    let source = manager
        .downcast::<DataSourceManager>()
        .ok_or_else(|| ConstructionError::illegal_argument("需要 DataSourceManager 句柄"))?;
    let names = [(1, "Ada"), (2, "Grace"), (3, "Linus")]
        .into_iter()
        .map(|(id, name)| (id, name.to_string()))
        .collect();
    Ok(CustomerDaoImpl {
        source: source.url.clone(),
        names,
    })
}

/// 构建演示类型目录
pub fn catalog() -> DependencyResult<TypeCatalog> {
    TypeCatalog::new()
        .with(TypeEntry::interface("demo.dao.CustomerDao", ComponentKind::DataAccess))?
        .with(TypeEntry::interface("demo.dao.OrderDao", ComponentKind::DataAccess))?
        .with(
            TypeEntry::data_access("demo.dao.CustomerDaoImpl", customer_dao).implements(
                "demo.dao.CustomerDao",
                |dao: Arc<CustomerDaoImpl>| dao as Arc<dyn CustomerDao>,
            ),
        )?
        .with(
            TypeEntry::data_access("demo.dao.OrderDaoImpl", |_| Ok(OrderDaoImpl)).implements(
                "demo.dao.OrderDao",
                |dao: Arc<OrderDaoImpl>| dao as Arc<dyn OrderDao>,
            ),
        )?
        .with(TypeEntry::plain("demo.dao.Schema"))?
        .with(TypeEntry::service("demo.service.OrderService", || {
            Ok(OrderService::default())
        }))?
        .with(TypeEntry::service("demo.service.ReportService", || {
            Ok(ReportService::default())
        }))
}
