//! 标记事件定义
//!
//! 描述文件被切分为按文档顺序到达的事件流

use std::collections::BTreeMap;
use std::fmt;

/// 元素属性，键为本地名称
pub type Attributes = BTreeMap<String, String>;

/// 标记事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    /// 元素开始
    Start {
        /// 元素本地名称
        name: String,
        /// 已反转义的属性
        attributes: Attributes,
    },
    /// 元素文本，同一元素可能收到多段
    Text(String),
    /// 元素结束
    End {
        /// 元素本地名称
        name: String,
    },
    /// 标记问题
    Issue(MarkupIssue),
    /// 文档结束
    Eof,
}

impl MarkupEvent {
    /// 元素开始事件
    pub fn start(name: impl Into<String>, attributes: &[(&str, &str)]) -> Self {
        Self::Start {
            name: name.into(),
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }

    /// 文本事件
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// 元素结束事件
    pub fn end(name: impl Into<String>) -> Self {
        Self::End { name: name.into() }
    }
}

/// 标记问题的严重级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// 可恢复，记录后继续解析
    Warning,
    /// 错误，中止解析
    Error,
    /// 致命错误，中止解析
    Fatal,
}

impl Severity {
    /// 是否中止解析
    pub fn aborts(&self) -> bool {
        !matches!(self, Self::Warning)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
            Self::Fatal => f.write_str("fatal"),
        }
    }
}

/// 标记问题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupIssue {
    /// 严重级别
    pub severity: Severity,
    /// 问题所在的字节位置
    pub position: u64,
    /// 问题描述
    pub message: String,
}

impl MarkupIssue {
    /// 创建问题
    pub fn new(severity: Severity, position: u64, message: impl Into<String>) -> Self {
        Self {
            severity,
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for MarkupIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] 位置 {}: {}", self.severity, self.position, self.message)
    }
}
