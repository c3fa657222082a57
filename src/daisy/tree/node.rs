//! XML节点树模块
//!
//! 定义通用的XML节点树结构，并提供从XML文本构建节点树的功能。
//! 底层的XML事件解析委托给quick-xml。

use crate::daisy::error::{DaisyError, Result};
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::reader::Reader;

/// XML节点
///
/// 树是无环的，每个节点最多有一个父节点（父节点独占拥有子节点）。
#[derive(Debug, Clone)]
pub enum Node {
    /// 文档根节点，持有所有顶层节点
    Root {
        /// 顶层子节点列表
        children: Vec<Node>,
    },
    /// 元素节点
    Element(Element),
    /// 文本节点
    Text(String),
    /// 注释节点
    Comment(String),
}

/// XML元素
#[derive(Debug, Clone)]
pub struct Element {
    /// 标签名（包含命名空间前缀，如 `dc:Title`）
    pub name: String,
    /// 属性列表，保持文档中的出现顺序
    pub attributes: Vec<(String, String)>,
    /// 子节点列表，保持文档顺序
    pub children: Vec<Node>,
}

impl Element {
    /// 创建新的空元素
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// 获取去掉命名空间前缀的本地标签名
    ///
    /// 例如 `dc:Title` 返回 `Title`，`meta` 返回 `meta`。
    pub fn local_name(&self) -> &str {
        match self.name.split_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// 获取属性值
    ///
    /// # 参数
    /// * `name` - 属性名
    ///
    /// # 返回值
    /// * `Option<&str>` - 属性值，不存在时为None
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// 设置属性值
    ///
    /// 已存在的属性被覆盖，新属性追加在属性列表末尾。
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let Some((_, existing)) = self.attributes.iter_mut().find(|(key, _)| key == name) {
            *existing = value.to_string();
        } else {
            self.attributes.push((name.to_string(), value.to_string()));
        }
    }

    /// 用单个文本节点替换全部子节点
    pub fn set_text(&mut self, text: &str) {
        self.children = vec![Node::Text(text.to_string())];
    }

    /// 追加子节点
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }
}

impl Node {
    /// 解析XML文本为节点树
    ///
    /// 返回的根节点为 `Node::Root`，文档的根元素是它的子节点。
    /// 无法解析的XML返回错误；未闭合的元素同样视为格式错误。
    ///
    /// # 参数
    /// * `xml_content` - XML文本内容
    ///
    /// # 返回值
    /// * `Result<Node, DaisyError>` - 解析后的节点树
    ///
    /// # 示例
    ///
    /// ```rust
    /// use daisyforge::daisy::tree::Node;
    ///
    /// let tree = Node::parse_xml("<book><p>正文</p></book>")?;
    /// assert!(tree.find_element("p").is_some());
    /// # Ok::<(), daisyforge::daisy::DaisyError>(())
    /// ```
    pub fn parse_xml(xml_content: &str) -> Result<Node> {
        let mut reader = Reader::from_str(xml_content);
        reader.config_mut().trim_text(true);
        reader.config_mut().expand_empty_elements = true;

        let mut root_children: Vec<Node> = Vec::new();
        let mut stack: Vec<Element> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(ref e) => {
                    stack.push(Self::element_from_start(e)?);
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        DaisyError::MalformedXml("多余的结束标签".to_string())
                    })?;
                    Self::attach(Node::Element(element), &mut stack, &mut root_children);
                }
                Event::Empty(ref e) => {
                    let element = Self::element_from_start(e)?;
                    Self::attach(Node::Element(element), &mut stack, &mut root_children);
                }
                Event::Text(e) => {
                    Self::attach_text(
                        &e.decode().map_err(quick_xml::Error::from)?,
                        &mut stack,
                        &mut root_children,
                    );
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                    Self::attach_text(&text, &mut stack, &mut root_children);
                }
                Event::GeneralRef(e) => {
                    let text = Self::resolve_general_ref(&e);
                    Self::attach_text(&text, &mut stack, &mut root_children);
                }
                Event::Comment(e) => {
                    let comment =
                        Node::Comment(e.decode().map_err(quick_xml::Error::from)?.to_string());
                    Self::attach(comment, &mut stack, &mut root_children);
                }
                Event::Eof => break,
                // XML声明、DOCTYPE和处理指令不进入节点树
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(DaisyError::MalformedXml("存在未闭合的元素".to_string()));
        }

        Ok(Node::Root {
            children: root_children,
        })
    }

    /// 获取节点的直接子节点
    ///
    /// 文本和注释节点返回空切片。
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root { children } => children,
            Node::Element(element) => &element.children,
            _ => &[],
        }
    }

    /// 获取元素节点的标签名
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Element(element) => Some(element.name.as_str()),
            _ => None,
        }
    }

    /// 判断是否为元素节点
    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element(_))
    }

    /// 以元素形式访问节点
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// 以可变元素形式访问节点
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    /// 从开始标签事件构建元素
    fn element_from_start(e: &BytesStart) -> Result<Element> {
        let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
        let mut element = Element::new(name);

        for attr_result in e.attributes() {
            let attr = attr_result
                .map_err(|err| DaisyError::XmlError(quick_xml::Error::InvalidAttr(err)))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let value = attr.unescape_value()?.to_string();
            element.attributes.push((key, value));
        }

        Ok(element)
    }

    /// 将节点挂到当前打开的元素下，没有打开的元素时挂到根
    fn attach(node: Node, stack: &mut Vec<Element>, root_children: &mut Vec<Node>) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => root_children.push(node),
        }
    }

    /// 追加文本内容，与前一个文本节点相邻时合并
    fn attach_text(text: &str, stack: &mut Vec<Element>, root_children: &mut Vec<Node>) {
        if text.is_empty() {
            return;
        }
        let siblings = match stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => root_children,
        };
        if let Some(Node::Text(previous)) = siblings.last_mut() {
            previous.push_str(text);
        } else {
            siblings.push(Node::Text(text.to_string()));
        }
    }

    /// 解析实体引用为文本
    fn resolve_general_ref(e: &BytesRef) -> String {
        let name = String::from_utf8_lossy(e.as_ref()).to_string();
        match name.as_str() {
            "amp" => "&".to_string(),
            "lt" => "<".to_string(),
            "gt" => ">".to_string(),
            "quot" => "\"".to_string(),
            "apos" => "'".to_string(),
            _ => {
                if let Some(code) = Self::parse_char_ref(&name) {
                    code.to_string()
                } else {
                    // 未知实体按原样保留
                    format!("&{};", name)
                }
            }
        }
    }

    /// 解析数字字符引用（`#1234` 或 `#x1F4A9`）
    fn parse_char_ref(name: &str) -> Option<char> {
        let digits = name.strip_prefix('#')?;
        let code = if let Some(hex) = digits.strip_prefix('x').or_else(|| digits.strip_prefix('X')) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            digits.parse().ok()?
        };
        char::from_u32(code)
    }
}
