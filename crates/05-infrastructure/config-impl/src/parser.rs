//! 描述文件解析入口

use crate::machine::DescriptorMachine;
use crate::tokenizer::MarkupTokenizer;
use config_abstractions::DescriptorHandler;
use std::path::Path;
use tracing::{debug, info};
use wiring_common::{DescriptorError, WiringResult};

/// 描述文件解析器
///
/// 把文本交给切分器和状态机，处理完成后交回声明处理者。
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorParser;

impl DescriptorParser {
    /// 解析描述文件文本
    pub fn parse_str<H: DescriptorHandler>(content: &str, handler: H) -> WiringResult<H> {
        debug!("解析描述文件 ({} 字节)", content.len());
        DescriptorMachine::new(handler).run(MarkupTokenizer::new(content))
    }

    /// 读取并解析描述文件
    pub fn parse_file<H: DescriptorHandler>(
        path: impl AsRef<Path>,
        handler: H,
    ) -> WiringResult<H> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(DescriptorError::from)?;
        info!("加载描述文件: {}", path.display());
        Self::parse_str(&content, handler)
    }
}
