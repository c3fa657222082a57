//! 节点树查询模块
//!
//! 提供按标签名查找元素、读取属性和提取文本内容的通用查询功能。
//! 所有查询未命中时返回空结果，从不报错；是否把缺失当作错误由调用方决定。

use crate::daisy::tree::node::{Element, Node};

impl Node {
    /// 深度优先查找第一个匹配标签名的元素
    ///
    /// 遍历顺序为先序深度优先：先访问节点自身的子节点，再访问兄弟节点的
    /// 子节点。找到第一个匹配后立即返回，不继续扫描。
    ///
    /// # 参数
    /// * `tag` - 目标标签名（含命名空间前缀的完整名称）
    ///
    /// # 返回值
    /// * `Option<&Element>` - 第一个匹配的元素，没有匹配时为None
    pub fn find_element(&self, tag: &str) -> Option<&Element> {
        match self {
            Node::Element(element) => {
                if element.name == tag {
                    Some(element)
                } else {
                    element
                        .children
                        .iter()
                        .find_map(|child| child.find_element(tag))
                }
            }
            Node::Root { children } => children.iter().find_map(|child| child.find_element(tag)),
            _ => None,
        }
    }

    /// 深度优先查找所有匹配标签名的元素
    ///
    /// 结果按文档顺序排列。
    pub fn find_elements(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_elements(tag, &mut found);
        found
    }

    /// 查找匹配标签名的直接子元素
    ///
    /// 不递归进入子元素内部，因此不会重复统计嵌套的同名元素
    /// （例如嵌套的navPoint）。
    pub fn find_direct_children(&self, tag: &str) -> Vec<&Element> {
        self.children()
            .iter()
            .filter_map(|child| match child {
                Node::Element(element) if element.name == tag => Some(element),
                _ => None,
            })
            .collect()
    }

    /// 深度优先查找第一个匹配标签名的元素（可变引用）
    pub fn find_element_mut(&mut self, tag: &str) -> Option<&mut Element> {
        match self {
            Node::Element(element) => {
                if element.name == tag {
                    Some(element)
                } else {
                    element
                        .children
                        .iter_mut()
                        .find_map(|child| child.find_element_mut(tag))
                }
            }
            Node::Root { children } => children
                .iter_mut()
                .find_map(|child| child.find_element_mut(tag)),
            _ => None,
        }
    }

    /// 获取属性值
    ///
    /// 非元素节点或属性不存在时返回None。
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element(element) => element.attribute(name),
            _ => None,
        }
    }

    /// 提取节点的文本内容
    ///
    /// 按文档顺序深度优先拼接所有后代文本节点的值，文本段之间不插入
    /// 分隔符，最终结果去掉首尾空白。
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text.trim().to_string()
    }

    fn collect_elements<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        match self {
            Node::Element(element) => {
                if element.name == tag {
                    found.push(element);
                }
                for child in &element.children {
                    child.collect_elements(tag, found);
                }
            }
            Node::Root { children } => {
                for child in children {
                    child.collect_elements(tag, found);
                }
            }
            _ => {}
        }
    }

    fn collect_text(&self, text: &mut String) {
        match self {
            Node::Text(value) => text.push_str(value),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(text);
                }
            }
            Node::Root { children } => {
                for child in children {
                    child.collect_text(text);
                }
            }
            Node::Comment(_) => {}
        }
    }
}

impl Element {
    /// 深度优先查找第一个匹配标签名的后代元素（含自身）
    pub fn find_element(&self, tag: &str) -> Option<&Element> {
        if self.name == tag {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_element(tag))
    }

    /// 深度优先查找所有匹配标签名的后代元素（含自身）
    pub fn find_elements(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        if self.name == tag {
            found.push(self);
        }
        for child in &self.children {
            child.collect_elements(tag, &mut found);
        }
        found
    }

    /// 查找匹配标签名的直接子元素
    pub fn find_direct_children(&self, tag: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Element(element) if element.name == tag => Some(element),
                _ => None,
            })
            .collect()
    }

    /// 深度优先查找第一个匹配标签名的后代元素（可变引用，含自身）
    pub fn find_element_mut(&mut self, tag: &str) -> Option<&mut Element> {
        if self.name == tag {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_element_mut(tag))
    }

    /// 提取元素的文本内容
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            child.collect_text(&mut text);
        }
        text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Node {
        let xml = r#"<ncx>
    <navMap>
        <navPoint id="np-1">
            <navLabel><text>第一章</text></navLabel>
            <navPoint id="np-1-1">
                <navLabel><text>第一节</text></navLabel>
            </navPoint>
        </navPoint>
        <navPoint id="np-2">
            <navLabel><text>第二章</text></navLabel>
        </navPoint>
    </navMap>
</ncx>"#;
        Node::parse_xml(xml).expect("解析示例树失败")
    }

    #[test]
    fn test_find_element_first_match() {
        let tree = sample_tree();
        let first = tree.find_element("navPoint").expect("缺少navPoint");
        assert_eq!(first.attribute("id"), Some("np-1"));
    }

    #[test]
    fn test_find_element_no_match() {
        let tree = sample_tree();
        assert!(tree.find_element("pageList").is_none());
    }

    #[test]
    fn test_find_elements_document_order() {
        let tree = sample_tree();
        let all = tree.find_elements("navPoint");
        let ids: Vec<Option<&str>> = all.iter().map(|e| e.attribute("id")).collect();
        assert_eq!(ids, vec![Some("np-1"), Some("np-1-1"), Some("np-2")]);
    }

    #[test]
    fn test_find_direct_children_skips_nested() {
        let tree = sample_tree();
        let nav_map = tree.find_element("navMap").expect("缺少navMap");

        // 嵌套的np-1-1不应被统计为navMap的直接子节点
        let direct = nav_map.find_direct_children("navPoint");
        assert_eq!(direct.len(), 2);
        assert_eq!(direct[0].attribute("id"), Some("np-1"));
        assert_eq!(direct[1].attribute("id"), Some("np-2"));
    }

    #[test]
    fn test_text_content_concatenation() {
        let xml = "<p>  你好<b>世界</b>！ <!-- 忽略注释 --> </p>";
        let tree = Node::parse_xml(xml).expect("解析失败");
        assert_eq!(tree.text_content(), "你好世界！");
    }

    #[test]
    fn test_attribute_on_non_element() {
        let node = Node::Text("文本".to_string());
        assert!(node.attribute("id").is_none());
    }

    #[test]
    fn test_find_element_mut_rewrites() {
        let mut tree = sample_tree();
        {
            let nav_point = tree.find_element_mut("navPoint").expect("缺少navPoint");
            nav_point.set_attribute("id", "renamed");
        }
        let first = tree.find_element("navPoint").expect("缺少navPoint");
        assert_eq!(first.attribute("id"), Some("renamed"));
    }
}
