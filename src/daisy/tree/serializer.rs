//! 节点树序列化模块
//!
//! 把节点树写回XML文本。转义和事件写出委托给quick-xml的Writer。

use crate::daisy::error::Result;
use crate::daisy::tree::node::{Element, Node};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use std::io::Cursor;

impl Node {
    /// 把节点树序列化为XML字符串
    ///
    /// 元素结构、属性顺序和文本内容与树中保持一致。未修改过的结构
    /// 可以无损往返；空元素以自闭合形式（`<tag/>`）写出。
    ///
    /// # 返回值
    /// * `Result<String, DaisyError>` - 序列化后的XML文本
    ///
    /// # 示例
    ///
    /// ```rust
    /// use daisyforge::daisy::tree::Node;
    ///
    /// let tree = Node::parse_xml("<book><p>正文</p></book>")?;
    /// assert_eq!(tree.to_xml()?, "<book><p>正文</p></book>");
    /// # Ok::<(), daisyforge::daisy::DaisyError>(())
    /// ```
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        write_node(&mut writer, self)?;

        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }
}

impl Element {
    /// 把单个元素及其子树序列化为XML字符串
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        write_element(&mut writer, self)?;

        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }
}

fn write_node(writer: &mut Writer<Cursor<Vec<u8>>>, node: &Node) -> Result<()> {
    match node {
        Node::Root { children } => {
            for child in children {
                write_node(writer, child)?;
            }
        }
        Node::Element(element) => {
            write_element(writer, element)?;
        }
        Node::Text(text) => {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        Node::Comment(comment) => {
            writer.write_event(Event::Comment(BytesText::new(comment)))?;
        }
    }
    Ok(())
}

fn write_element(writer: &mut Writer<Cursor<Vec<u8>>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        for child in &element.children {
            write_node(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    }
    Ok(())
}
