//! XML 标记切分器
//!
//! 基于 quick-xml 把描述文件切分为 [`MarkupEvent`] 流。
//! 自闭合元素产生 `Start` + `End` 两个事件；名称一律使用本地名称。

use config_abstractions::{Attributes, MarkupEvent, MarkupIssue, Severity};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::VecDeque;

/// 标记切分器
///
/// 产生 `Eof` 或中止级别的 `Issue` 之后不再产生事件。
pub struct MarkupTokenizer<'a> {
    reader: Reader<&'a [u8]>,
    pending: VecDeque<MarkupEvent>,
    depth: usize,
    seen_root: bool,
    root_closed: bool,
    done: bool,
}

impl<'a> MarkupTokenizer<'a> {
    /// 创建切分器
    pub fn new(content: &'a str) -> Self {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            pending: VecDeque::new(),
            depth: 0,
            seen_root: false,
            root_closed: false,
            done: false,
        }
    }

    fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn issue(&self, severity: Severity, message: impl Into<String>) -> MarkupEvent {
        MarkupEvent::Issue(MarkupIssue::new(severity, self.position(), message))
    }

    fn start_event(&self, element: &BytesStart<'_>) -> Result<MarkupEvent, MarkupEvent> {
        let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
        let mut attributes = Attributes::new();
        for attribute in element.attributes() {
            let attribute = attribute.map_err(|e| {
                self.issue(Severity::Error, format!("元素 '{name}' 的属性无效: {e}"))
            })?;
            let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
            let value = attribute.unescape_value().map_err(|e| {
                self.issue(
                    Severity::Error,
                    format!("元素 '{name}' 的属性 '{key}' 无法反转义: {e}"),
                )
            })?;
            attributes.insert(key, value.into_owned());
        }
        Ok(MarkupEvent::Start { name, attributes })
    }

    fn next_from_reader(&mut self) -> MarkupEvent {
        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => return self.issue(Severity::Fatal, e.to_string()),
            };

            match event {
                Event::Start(_) | Event::Empty(_) if self.root_closed => {
                    return self.issue(Severity::Fatal, "根元素之后不能再出现元素");
                }
                Event::Start(element) => {
                    let start = match self.start_event(&element) {
                        Ok(start) => start,
                        Err(issue) => return issue,
                    };
                    self.depth += 1;
                    self.seen_root = true;
                    return start;
                }
                Event::Empty(element) => {
                    let start = match self.start_event(&element) {
                        Ok(start) => start,
                        Err(issue) => return issue,
                    };
                    self.seen_root = true;
                    if self.depth == 0 {
                        self.root_closed = true;
                    }
                    if let MarkupEvent::Start { name, .. } = &start {
                        self.pending.push_back(MarkupEvent::end(name.clone()));
                    }
                    return start;
                }
                Event::End(element) => {
                    self.depth = self.depth.saturating_sub(1);
                    if self.depth == 0 {
                        self.root_closed = true;
                    }
                    let name = String::from_utf8_lossy(element.local_name().as_ref()).into_owned();
                    return MarkupEvent::End { name };
                }
                Event::Text(text) => match text.unescape() {
                    Ok(text) if self.depth > 0 => return MarkupEvent::Text(text.into_owned()),
                    Ok(text) if text.trim().is_empty() => {}
                    Ok(_) => return self.issue(Severity::Fatal, "根元素之外不能出现文本"),
                    Err(e) => return self.issue(Severity::Error, format!("文本无法反转义: {e}")),
                },
                Event::CData(data) => {
                    if self.depth == 0 {
                        return self.issue(Severity::Fatal, "根元素之外不能出现 CDATA");
                    }
                    let text = String::from_utf8_lossy(&data).into_owned();
                    return MarkupEvent::Text(text);
                }
                Event::DocType(_) => {
                    return self.issue(Severity::Warning, "忽略 DOCTYPE 声明");
                }
                Event::Eof => {
                    if self.depth > 0 {
                        return self.issue(
                            Severity::Fatal,
                            format!("文档结束时仍有 {} 个元素未关闭", self.depth),
                        );
                    }
                    if !self.seen_root {
                        return self.issue(Severity::Fatal, "文档没有根元素");
                    }
                    return MarkupEvent::Eof;
                }
                Event::Decl(_) | Event::PI(_) | Event::Comment(_) => {}
            }
        }
    }
}

impl Iterator for MarkupTokenizer<'_> {
    type Item = MarkupEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        if self.done {
            return None;
        }

        let event = self.next_from_reader();
        match &event {
            MarkupEvent::Eof => self.done = true,
            MarkupEvent::Issue(issue) if issue.severity.aborts() => self.done = true,
            _ => {}
        }
        Some(event)
    }
}
