//! 集成测试共用的类型目录

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use wiring_common::{
    ComponentKind, ComponentRef, ConstructionError, DataAccess, DependencyResult, Factory,
    InjectionPoint, Injected, ManagerHandle, Service, TypeCatalog, TypeEntry,
};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
pub fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// 数据访问组件持有的数据库句柄
#[derive(Debug)]
pub struct Database {
    pub name: String,
}

pub trait UserDao: Send + Sync {
    fn find(&self, id: u32) -> String;
}

pub trait Auditable: Send + Sync {
    fn audit_source(&self) -> String;
}

pub trait OrderDao: Send + Sync {
    fn count(&self) -> usize;
}

pub trait ProductDao: Send + Sync {
    fn sku(&self) -> &'static str;
}

pub trait InvoiceDao: Send + Sync {
    fn total(&self) -> u64;
}

/// 每次构造都会递增，用于区分不同装配中的实例
static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

pub struct UserDaoImpl {
    pub database: String,
    pub serial: usize,
}

impl DataAccess for UserDaoImpl {}

impl UserDao for UserDaoImpl {
    fn find(&self, id: u32) -> String {
        format!("{}#{}", self.database, id)
    }
}

impl Auditable for UserDaoImpl {
    fn audit_source(&self) -> String {
        format!("users@{}", self.database)
    }
}

pub struct LegacyUserDao;

impl DataAccess for LegacyUserDao {}

impl UserDao for LegacyUserDao {
    fn find(&self, id: u32) -> String {
        format!("legacy#{}", id)
    }
}

pub struct OrderDaoImpl;

impl DataAccess for OrderDaoImpl {}

impl OrderDao for OrderDaoImpl {
    fn count(&self) -> usize {
        7
    }
}

pub struct ProductDaoImpl;

impl DataAccess for ProductDaoImpl {}

impl ProductDao for ProductDaoImpl {
    fn sku(&self) -> &'static str {
        "P-100"
    }
}

pub struct BrokenDao;

impl DataAccess for BrokenDao {}

#[derive(Default)]
pub struct UserService {
    pub users: Injected<dyn UserDao>,
    pub audit: Injected<dyn Auditable>,
}

impl Service for UserService {
    fn injection_points(&self) -> Vec<InjectionPoint> {
        vec![
            InjectionPoint::new("users", "com.example.api.UserDao"),
            InjectionPoint::new("audit", "com.example.api.Auditable"),
        ]
    }

    fn inject(&self, point: &InjectionPoint, component: &ComponentRef) -> DependencyResult<()> {
        match point.field() {
            "users" => self.users.fill("com.example.service.UserService", point, component),
            _ => self.audit.fill("com.example.service.UserService", point, component),
        }
    }
}

#[derive(Default)]
pub struct ReportService {
    pub orders: Injected<dyn OrderDao>,
}

impl Service for ReportService {
    fn injection_points(&self) -> Vec<InjectionPoint> {
        vec![InjectionPoint::new("orders", "com.example.api.OrderDao")]
    }

    fn inject(&self, point: &InjectionPoint, component: &ComponentRef) -> DependencyResult<()> {
        self.orders
            .fill("com.example.service.ReportService", point, component)
    }
}

#[derive(Default)]
pub struct InvoiceService {
    pub invoices: Injected<dyn InvoiceDao>,
}

impl Service for InvoiceService {
    fn injection_points(&self) -> Vec<InjectionPoint> {
        vec![InjectionPoint::new("invoices", "com.example.api.InvoiceDao")]
    }

    fn inject(&self, point: &InjectionPoint, component: &ComponentRef) -> DependencyResult<()> {
        self.invoices
            .fill("com.example.billing.InvoiceService", point, component)
    }
}

fn user_dao(manager: ManagerHandle) -> Result<UserDaoImpl, ConstructionError> {
    let database = manager
        .downcast::<Database>()
        .map(|db| db.name.clone())
        .ok_or_else(|| ConstructionError::illegal_argument("需要 Database 句柄"))?;
    Ok(UserDaoImpl {
        database,
        serial: CONSTRUCTED.fetch_add(1, Ordering::SeqCst),
    })
}

/// 装配使用的数据库句柄
pub fn manager() -> ManagerHandle {
    ManagerHandle::new(Database {
        name: "main".to_string(),
    })
}

/// 构建测试类型目录
///
/// `com.example.dao` 包含三个数据访问类型、一个普通类型和一个嵌套类型。
pub fn catalog() -> Arc<TypeCatalog> {
    let api = [
        ("com.example.api.UserDao", ComponentKind::DataAccess),
        ("com.example.api.Auditable", ComponentKind::DataAccess),
        ("com.example.api.OrderDao", ComponentKind::DataAccess),
        ("com.example.api.ProductDao", ComponentKind::DataAccess),
        ("com.example.api.InvoiceDao", ComponentKind::DataAccess),
    ];

    let mut catalog = TypeCatalog::new();
    for (name, kind) in api {
        catalog.register(TypeEntry::interface(name, kind)).unwrap();
    }

    let entries = vec![
        TypeEntry::data_access("com.example.dao.UserDaoImpl", user_dao)
            .implements("com.example.api.UserDao", |dao: Arc<UserDaoImpl>| {
                dao as Arc<dyn UserDao>
            })
            .implements("com.example.api.Auditable", |dao: Arc<UserDaoImpl>| {
                dao as Arc<dyn Auditable>
            }),
        TypeEntry::data_access("com.example.dao.OrderDaoImpl", |_| Ok(OrderDaoImpl)).implements(
            "com.example.api.OrderDao",
            |dao: Arc<OrderDaoImpl>| dao as Arc<dyn OrderDao>,
        ),
        TypeEntry::data_access("com.example.dao.sub.ProductDaoImpl", |_| Ok(ProductDaoImpl))
            .implements("com.example.api.ProductDao", |dao: Arc<ProductDaoImpl>| {
                dao as Arc<dyn ProductDao>
            }),
        TypeEntry::plain("com.example.dao.SqlHelper"),
        TypeEntry::plain("com.example.dao.UserDaoImpl.Row").nested_in("com.example.dao.UserDaoImpl"),
        TypeEntry::base("com.example.support.BaseDao", ComponentKind::DataAccess),
        TypeEntry::data_access("com.example.legacy.LegacyUserDao", |_| Ok(LegacyUserDao))
            .implements("com.example.api.UserDao", |dao: Arc<LegacyUserDao>| {
                dao as Arc<dyn UserDao>
            }),
        TypeEntry::data_access("com.example.broken.FailingDao", |_| {
            Err::<BrokenDao, _>(ConstructionError::instantiation("连接池已耗尽"))
        }),
        TypeEntry::data_access("com.example.broken.SealedDao", |_| {
            Err::<BrokenDao, _>(ConstructionError::access_denied("构造器不可访问"))
        }),
        TypeEntry::data_access("com.example.broken.PanickyDao", |_| {
            Err::<BrokenDao, _>(ConstructionError::exception(std::io::Error::other("磁盘已满")))
        }),
        TypeEntry::data_access("com.example.broken.NoConstructorDao", |_| Ok(BrokenDao))
            .without_factory(),
        TypeEntry::data_access("com.example.broken.WrongShapeDao", |_| Ok(BrokenDao))
            .with_factory(Factory::no_args(|| Ok(BrokenDao))),
        TypeEntry::service("com.example.service.UserService", || Ok(UserService::default())),
        TypeEntry::service("com.example.service.ReportService", || {
            Ok(ReportService::default())
        }),
        TypeEntry::plain("com.example.service.Formatter"),
        TypeEntry::service("com.example.billing.InvoiceService", || {
            Ok(InvoiceService::default())
        }),
    ];
    for entry in entries {
        catalog.register(entry).unwrap();
    }
    Arc::new(catalog)
}
