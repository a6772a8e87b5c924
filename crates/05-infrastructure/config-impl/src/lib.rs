//! # Configuration Implementation
//!
//! 描述文件解析与装配设置的具体实现。
//!
//! ## 主要组件
//!
//! - [`MarkupTokenizer`] - 把 XML 文本切分为标记事件
//! - [`DescriptorMachine`] - 描述文件状态机
//! - [`DescriptorParser`] - 解析入口
//! - [`WiringSettings`] - 装配设置（配置文件 + 环境变量）

pub mod machine;
pub mod parser;
pub mod settings;
pub mod tokenizer;

pub use machine::*;
pub use parser::*;
pub use settings::*;
pub use tokenizer::*;
