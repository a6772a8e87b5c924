//! # 依赖注入具体实现
//!
//! 提供组件注册表、命名空间扫描器、组件解析器和字段注入器的具体实现

pub mod injector;
pub mod registry;
pub mod resolver;
pub mod scanner;

pub use injector::FieldInjector;
pub use registry::ComponentRegistryImpl;
pub use resolver::ComponentResolverImpl;
pub use scanner::{CatalogScanner, ManifestScanner};
