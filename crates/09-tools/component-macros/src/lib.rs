//! # 组件派生宏
//!
//! 为数据访问组件和服务生成装配所需的 trait 实现。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::{DataAccess, Service};
//! use wiring_common::Injected;
//!
//! #[derive(DataAccess)]
//! pub struct UserDao;
//!
//! #[derive(Default, Service)]
//! #[service(name = "app.service.UserService")]
//! pub struct UserService {
//!     #[inject("app.dao.UserRepository")]
//!     users: Injected<dyn UserRepository>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod service;
mod utils;

/// 派生服务注入契约
///
/// 标记 `#[inject("能力接口")]` 的字段成为注入点，字段类型必须是 `Injected<dyn Trait>`。
/// 可选的 `#[service(name = "...")]` 指定错误信息中使用的服务名称，默认为 Rust 类型名。
#[proc_macro_derive(Service, attributes(service, inject))]
pub fn derive_service(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    service::derive_service_impl(input)
}

/// 派生数据访问能力标记
#[proc_macro_derive(DataAccess)]
pub fn derive_data_access(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    service::derive_data_access_impl(input)
}
