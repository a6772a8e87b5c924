//! 派生宏与装配流程的集成测试

use component_macros::{DataAccess, Service};
use std::sync::Arc;
use tempfile::NamedTempFile;
use wiring_common::{ComponentKind, Injected, ManagerHandle, TypeCatalog, TypeEntry};
use wiring_composition::WiringBuilder;

/// 仓储能力
pub trait Warehouse: Send + Sync {
    fn stock(&self, sku: &str) -> u32;
}

/// 报表能力
pub trait Reporting: Send + Sync {
    fn title(&self) -> String;
}

#[derive(DataAccess)]
pub struct WarehouseDao {
    site: String,
}

impl Warehouse for WarehouseDao {
    fn stock(&self, sku: &str) -> u32 {
        if sku == "apple" {
            12
        } else {
            0
        }
    }
}

impl Reporting for WarehouseDao {
    fn title(&self) -> String {
        format!("仓库 {}", self.site)
    }
}

#[derive(Default, Service)]
#[service(name = "shop.service.Restock")]
pub struct RestockService {
    #[inject("shop.dao.Warehouse")]
    warehouse: Injected<dyn Warehouse>,
    #[inject(capability = "shop.dao.Reporting")]
    reporting: Injected<dyn Reporting>,
}

impl RestockService {
    fn describe(&self, sku: &str) -> Option<String> {
        let warehouse = self.warehouse.get()?;
        let reporting = self.reporting.get()?;
        Some(format!("{}: {} = {}", reporting.title(), sku, warehouse.stock(sku)))
    }
}

fn catalog() -> Arc<TypeCatalog> {
    let catalog = TypeCatalog::new()
        .with(
            TypeEntry::data_access("shop.dao.WarehouseDao", |manager: ManagerHandle| {
                let site = manager
                    .downcast::<String>()
                    .map(|site| site.to_string())
                    .unwrap_or_default();
                Ok(WarehouseDao { site })
            })
            .implements("shop.dao.Warehouse", |dao: Arc<WarehouseDao>| {
                dao as Arc<dyn Warehouse>
            })
            .implements("shop.dao.Reporting", |dao: Arc<WarehouseDao>| {
                dao as Arc<dyn Reporting>
            }),
        )
        .and_then(|c| c.with(TypeEntry::interface("shop.dao.Warehouse", ComponentKind::DataAccess)))
        .and_then(|c| c.with(TypeEntry::interface("shop.dao.Reporting", ComponentKind::DataAccess)))
        .and_then(|c| {
            c.with(TypeEntry::service("shop.service.Restock", || {
                Ok(RestockService::default())
            }))
        })
        .unwrap();
    Arc::new(catalog)
}

const DESCRIPTOR: &str = r#"<?xml version="1.0"?>
<wiring>
    <dao package="shop.dao"/>
    <service class="shop.service.Restock"/>
</wiring>"#;

#[test]
fn test_derived_service_is_wired_by_descriptor() {
    let context = WiringBuilder::new()
        .with_catalog(catalog())
        .with_manager(ManagerHandle::new(String::from("north")))
        .wire_str(DESCRIPTOR)
        .unwrap();

    let restock = context
        .service::<RestockService>("shop.service.Restock")
        .unwrap();
    assert_eq!(
        restock.describe("apple").as_deref(),
        Some("仓库 north: apple = 12")
    );
    assert_eq!(context.report().fields_injected, 2);
}

#[test]
fn test_both_fields_share_one_dao_instance() {
    let context = WiringBuilder::new()
        .with_catalog(catalog())
        .wire_str(DESCRIPTOR)
        .unwrap();

    let restock = context
        .service::<RestockService>("shop.service.Restock")
        .unwrap();
    let warehouse = context
        .data_access_component::<dyn Warehouse>("shop.dao.Warehouse")
        .unwrap();
    let reporting = context
        .data_access_component::<dyn Reporting>("shop.dao.Reporting")
        .unwrap();
    assert_eq!(
        Arc::as_ptr(&warehouse) as *const (),
        Arc::as_ptr(&reporting) as *const ()
    );
    assert!(Arc::ptr_eq(&restock.warehouse.get().unwrap(), &warehouse));
}

#[tokio::test]
async fn test_derived_service_from_descriptor_file() {
    let file = NamedTempFile::new().unwrap();
    tokio::fs::write(file.path(), DESCRIPTOR).await.unwrap();

    let context = WiringBuilder::new()
        .with_catalog(catalog())
        .wire_file(file.path())
        .await
        .unwrap();

    assert_eq!(context.report().services_visited, 1);
}
