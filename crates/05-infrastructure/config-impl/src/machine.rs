//! 描述文件状态机
//!
//! 按文档顺序消费 [`MarkupEvent`]，在元素关闭时产生声明和属性。
//! 当前打开的元素以显式的 [`ParseNode`] 保存，元素关闭后丢弃。

use config_abstractions::{
    declaration_kind, Attributes, Declaration, DeclarationTarget, DescriptorHandler, MarkupEvent,
    MarkupIssue, PropertyTable, ATTR_CLASS, ATTR_NAME, ATTR_PACKAGE, ATTR_VALUE,
    ELEMENT_PROPERTIES, ELEMENT_PROPERTY,
};
use tracing::{debug, warn};
use wiring_common::{ComponentKind, DescriptorError, DescriptorResult, WiringResult};

/// 状态机状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    /// 不在任何块中
    Idle,
    /// 在属性块中
    InProperties,
    /// 在属性块内的属性元素中
    InProperty,
    /// 在组件声明元素中
    InDeclaration(ComponentKind),
    /// 已结束（文档结束或失败）
    Finished,
}

/// 当前打开的元素
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseNode {
    /// 元素本地名称
    pub name: String,
    /// 元素属性
    pub attributes: Attributes,
    /// 累积的文本
    pub text: String,
}

impl ParseNode {
    /// 创建节点
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
            text: String::new(),
        }
    }

    /// 读取属性
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn trimmed_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(name).map(str::trim).filter(|v| !v.is_empty())
    }

    fn trimmed_text(&self) -> Option<&str> {
        Some(self.text.trim()).filter(|t| !t.is_empty())
    }
}

/// 描述文件状态机
pub struct DescriptorMachine<H> {
    handler: H,
    state: MachineState,
    current: Option<ParseNode>,
    properties: PropertyTable,
}

impl<H: DescriptorHandler> DescriptorMachine<H> {
    /// 创建状态机
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            state: MachineState::Idle,
            current: None,
            properties: PropertyTable::new(),
        }
    }

    /// 当前状态
    pub fn state(&self) -> MachineState {
        self.state
    }

    /// 当前打开的元素
    pub fn current(&self) -> Option<&ParseNode> {
        self.current.as_ref()
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        self.state == MachineState::Finished
    }

    /// 声明处理者
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// 取回声明处理者
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// 处理一个事件
    ///
    /// 任何错误都会使状态机进入结束状态，之后的事件返回 [`DescriptorError::AlreadyFinished`]。
    pub fn feed(&mut self, event: MarkupEvent) -> WiringResult<()> {
        if self.is_finished() {
            return Err(DescriptorError::AlreadyFinished.into());
        }
        let result = self.dispatch(event);
        if result.is_err() {
            self.state = MachineState::Finished;
            self.current = None;
        }
        result
    }

    /// 依次处理事件直到文档结束
    pub fn run(mut self, events: impl IntoIterator<Item = MarkupEvent>) -> WiringResult<H> {
        for event in events {
            self.feed(event)?;
            if self.is_finished() {
                break;
            }
        }
        if !self.is_finished() {
            return Err(DescriptorError::Malformed {
                position: 0,
                message: "事件流在文档结束前中断".to_string(),
            }
            .into());
        }
        Ok(self.handler)
    }

    fn dispatch(&mut self, event: MarkupEvent) -> WiringResult<()> {
        match event {
            MarkupEvent::Start { name, attributes } => {
                self.start_element(name, attributes);
                Ok(())
            }
            MarkupEvent::Text(text) => {
                if let Some(node) = self.current.as_mut() {
                    node.text.push_str(&text);
                }
                Ok(())
            }
            MarkupEvent::End { name } => self.end_element(name),
            MarkupEvent::Issue(issue) => self.markup_issue(issue),
            MarkupEvent::Eof => {
                self.state = MachineState::Finished;
                self.current = None;
                let properties = std::mem::take(&mut self.properties);
                debug!("描述文件结束，共 {} 个属性", properties.len());
                self.handler.finish(properties)
            }
        }
    }

    fn start_element(&mut self, name: String, attributes: Attributes) {
        match (self.state, name.as_str()) {
            (_, ELEMENT_PROPERTIES) => {
                self.properties = PropertyTable::new();
                self.state = MachineState::InProperties;
            }
            (MachineState::InProperties, ELEMENT_PROPERTY) => {
                self.state = MachineState::InProperty;
            }
            (MachineState::Idle, element) => {
                if let Some(kind) = declaration_kind(element) {
                    self.state = MachineState::InDeclaration(kind);
                }
            }
            _ => {}
        }
        self.current = Some(ParseNode::new(name, attributes));
    }

    fn end_element(&mut self, name: String) -> WiringResult<()> {
        let node = match self.current.take() {
            Some(node) if node.name == name => node,
            _ => ParseNode::new(name, Attributes::new()),
        };

        if node.name == ELEMENT_PROPERTY {
            return self.end_property(&node).map_err(Into::into);
        }
        if node.name == ELEMENT_PROPERTIES {
            if self.state == MachineState::InProperties {
                self.state = MachineState::Idle;
            }
            return Ok(());
        }
        if let Some(kind) = declaration_kind(&node.name) {
            if self.state == MachineState::InDeclaration(kind) {
                self.state = MachineState::Idle;
            }
            let target = declaration_target(&node)?;
            let declaration = Declaration { kind, target };
            debug!("声明: {}", declaration);
            return self.handler.declare(declaration);
        }
        Ok(())
    }

    fn end_property(&mut self, node: &ParseNode) -> DescriptorResult<()> {
        if self.state != MachineState::InProperty {
            return Err(DescriptorError::PropertyOutsideBlock);
        }
        self.state = MachineState::InProperties;

        let name = node
            .trimmed_attribute(ATTR_NAME)
            .ok_or_else(|| DescriptorError::MissingAttribute {
                element: ELEMENT_PROPERTY.to_string(),
                attribute: ATTR_NAME.to_string(),
            })?;
        let value = node
            .attribute(ATTR_VALUE)
            .unwrap_or_else(|| node.text.trim());
        if let Some(previous) = self.properties.insert(name, value) {
            debug!("属性 '{}' 覆盖旧值 '{}'", name, previous);
        }
        Ok(())
    }

    fn markup_issue(&mut self, issue: MarkupIssue) -> WiringResult<()> {
        if issue.severity.aborts() {
            return Err(DescriptorError::Malformed {
                position: issue.position,
                message: issue.message,
            }
            .into());
        }
        warn!("描述文件警告: {}", issue);
        Ok(())
    }
}

/// 计算声明目标
///
/// 类型引用取 `class` 属性，否则取元素文本；命名空间引用取 `package` 属性。
/// 两者恰好有一个非空。
pub fn declaration_target(node: &ParseNode) -> DescriptorResult<DeclarationTarget> {
    let class = node
        .trimmed_attribute(ATTR_CLASS)
        .or_else(|| node.trimmed_text());
    let package = node.trimmed_attribute(ATTR_PACKAGE);

    match (class, package) {
        (Some(class), Some(package)) => Err(DescriptorError::AmbiguousTarget {
            element: node.name.clone(),
            class: class.to_string(),
            package: package.to_string(),
        }),
        (Some(class), None) => Ok(DeclarationTarget::Class(class.to_string())),
        (None, Some(package)) => Ok(DeclarationTarget::Namespace(package.to_string())),
        (None, None) => Err(DescriptorError::MissingTarget {
            element: node.name.clone(),
        }),
    }
}
