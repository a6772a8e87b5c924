//! 装配过程的端到端性质

mod common;

use common::{
    catalog, init_test_logger, manager, Auditable, OrderDao, ReportService, UserDao, UserDaoImpl,
    UserService,
};
use di_abstractions::ComponentRegistry;
use std::sync::Arc;
use wiring_composition::{WiringBuilder, WiringContext};

fn wire(descriptor: &str) -> WiringContext {
    init_test_logger();
    WiringBuilder::new()
        .with_catalog(catalog())
        .with_manager(manager())
        .wire_str(descriptor)
        .unwrap()
}

fn keys(context: &WiringContext) -> Vec<String> {
    context
        .data_access()
        .keys()
        .iter()
        .map(|key| key.to_string())
        .collect()
}

/// 数据访问组件以具体类型和每个能力接口为键，指向同一实例
#[test]
fn test_capability_keys_alias_one_instance() {
    let context = wire(r#"<wiring><dao class="com.example.dao.UserDaoImpl"/></wiring>"#);
    let registry = context.data_access();

    assert_eq!(
        keys(&context),
        vec![
            "com.example.api.Auditable",
            "com.example.api.UserDao",
            "com.example.dao.UserDaoImpl",
        ]
    );
    let concrete = registry.get("com.example.dao.UserDaoImpl").unwrap();
    let by_user = registry.get("com.example.api.UserDao").unwrap();
    let by_audit = registry.get("com.example.api.Auditable").unwrap();
    assert!(concrete.same_instance(&by_user));
    assert!(concrete.same_instance(&by_audit));
    assert_eq!(registry.instances().len(), 1);
    assert!(!registry.contains("wiring.dao.DataAccess"));
}

/// 重复声明同一类型只保留第一个实例并记录冲突
#[test]
fn test_duplicate_declaration_keeps_first_instance() {
    let context = wire(
        r#"<wiring>
            <dao class="com.example.dao.UserDaoImpl"/>
            <dao>com.example.dao.UserDaoImpl</dao>
        </wiring>"#,
    );
    let registry = context.data_access();

    assert_eq!(registry.instances().len(), 1);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.conflicts().len(), 1);
    assert!(registry.conflicts()[0].is_duplicate_type());
    assert_eq!(context.summary().conflicts.len(), 1);
}

/// 不相关的类型共享能力接口时，接口键归先注册者
#[test]
fn test_shared_capability_is_first_write_wins() {
    let context = wire(
        r#"<wiring>
            <dao class="com.example.dao.UserDaoImpl"/>
            <dao class="com.example.legacy.LegacyUserDao"/>
        </wiring>"#,
    );
    let registry = context.data_access();

    assert_eq!(registry.instances().len(), 2);
    assert!(registry.contains("com.example.legacy.LegacyUserDao"));
    let users = context
        .data_access_component::<dyn UserDao>("com.example.api.UserDao")
        .unwrap();
    assert_eq!(users.find(5), "main#5");

    let conflict = &registry.conflicts()[0];
    assert_eq!(conflict.key.as_str(), "com.example.api.UserDao");
    assert_eq!(conflict.existing.as_str(), "com.example.dao.UserDaoImpl");
    assert_eq!(conflict.rejected.as_str(), "com.example.legacy.LegacyUserDao");
    assert!(!conflict.is_duplicate_type());
}

/// 注入的字段持有注册表中的同一实例
#[test]
fn test_injected_field_holds_registered_instance() {
    let context = wire(
        r#"<wiring>
            <service class="com.example.service.UserService"/>
            <dao class="com.example.dao.UserDaoImpl"/>
        </wiring>"#,
    );

    let service = context
        .service::<UserService>("com.example.service.UserService")
        .unwrap();
    let registered = context
        .data_access_component::<dyn UserDao>("com.example.api.UserDao")
        .unwrap();
    assert!(Arc::ptr_eq(&service.users.get().unwrap(), &registered));
    assert_eq!(service.audit.get().unwrap().audit_source(), "users@main");

    let concrete = context
        .data_access_component::<UserDaoImpl>("com.example.dao.UserDaoImpl")
        .unwrap();
    assert_eq!(
        Arc::as_ptr(&concrete) as *const (),
        Arc::as_ptr(&registered) as *const ()
    );
    assert_eq!(context.report().fields_injected, 2);
}

/// 包扫描只注册具备数据访问能力的顶层类型
#[test]
fn test_package_scan_registers_qualifying_types_only() {
    let context = wire(r#"<wiring><dao package="com.example.dao"/></wiring>"#);
    let registry = context.data_access();

    let registered: Vec<String> = registry
        .instances()
        .iter()
        .map(|instance| instance.type_key().to_string())
        .collect();
    assert_eq!(
        registered,
        vec![
            "com.example.dao.OrderDaoImpl",
            "com.example.dao.UserDaoImpl",
            "com.example.dao.sub.ProductDaoImpl",
        ]
    );
    assert!(!registry.contains("com.example.dao.SqlHelper"));
    assert!(!registry.contains("com.example.dao.UserDaoImpl.Row"));
}

/// 服务包扫描跳过不具备服务能力的类型
#[test]
fn test_service_package_scan() {
    let context = wire(
        r#"<wiring>
            <dao package="com.example.dao"/>
            <service package="com.example.service"/>
        </wiring>"#,
    );

    assert_eq!(context.services().instances().len(), 2);
    assert!(!context.services().contains("com.example.service.Formatter"));
    let report = context
        .service::<ReportService>("com.example.service.ReportService")
        .unwrap();
    assert_eq!(report.orders.get().unwrap().count(), 7);
    assert_eq!(context.report().services_visited, 2);
    assert_eq!(context.report().fields_injected, 3);
}

/// 属性表记录属性，重复的属性以最后一次为准
#[test]
fn test_properties_are_recorded() {
    let context = wire(
        r#"<wiring>
            <properties>
                <property name="timeout" value="30"/>
                <property name="owner">  ops team  </property>
                <property name="owner" value=""/>
            </properties>
        </wiring>"#,
    );

    assert_eq!(context.property("timeout"), Some("30"));
    assert_eq!(context.property("owner"), Some(""));
    assert_eq!(context.properties().len(), 2);
}

/// 重复装配使用新的注册表
#[test]
fn test_rewiring_is_idempotent() {
    let descriptor = r#"<wiring>
        <properties><property name="timeout" value="30"/></properties>
        <dao package="com.example.dao"/>
        <service class="com.example.service.ReportService"/>
    </wiring>"#;

    let first = wire(descriptor);
    let second = wire(descriptor);

    assert_eq!(keys(&first), keys(&second));
    assert_eq!(first.data_access().instances().len(), 3);
    assert_eq!(second.data_access().instances().len(), 3);
    assert!(second.data_access().conflicts().is_empty());

    let first_dao = first
        .data_access_component::<UserDaoImpl>("com.example.dao.UserDaoImpl")
        .unwrap();
    let second_dao = second
        .data_access_component::<UserDaoImpl>("com.example.dao.UserDaoImpl")
        .unwrap();
    assert_ne!(first_dao.serial, second_dao.serial);

    let first_orders = first
        .data_access_component::<dyn OrderDao>("com.example.api.OrderDao")
        .unwrap();
    let second_orders = second
        .data_access_component::<dyn OrderDao>("com.example.api.OrderDao")
        .unwrap();
    assert!(!Arc::ptr_eq(&first_orders, &second_orders));
}

/// 异步读取描述文件
#[tokio::test]
async fn test_wire_file_end_to_end() {
    init_test_logger();
    let file = tempfile::NamedTempFile::new().unwrap();
    tokio::fs::write(
        file.path(),
        r#"<?xml version="1.0" encoding="UTF-8"?>
<wiring>
    <properties><property name="timeout">30</property></properties>
    <dao package="com.example.dao"/>
    <service class="com.example.service.UserService"/>
</wiring>"#,
    )
    .await
    .unwrap();

    let context = WiringBuilder::new()
        .with_catalog(catalog())
        .with_manager(manager())
        .wire_file(file.path())
        .await
        .unwrap();

    assert_eq!(context.property("timeout"), Some("30"));
    let service = context
        .service::<UserService>("com.example.service.UserService")
        .unwrap();
    let audit: Arc<dyn Auditable> = service.audit.get().unwrap();
    assert_eq!(audit.audit_source(), "users@main");
}
