//! DTBook解析器模块
//!
//! 提供DTBook（Digital Talking Book）文本内容文件的解析功能。
//! DTBook解析接受任意根元素，解析结果保留完整的节点树，供调用方
//! 用切分/分页算法处理正文内容。

use crate::daisy::error::{DaisyError, Result};
use crate::daisy::metadata::{extract_metadata, MetadataMap};
use crate::daisy::tree::{Element, Node, Page, PaginateOptions};

/// DTBook文件解析结果
#[derive(Debug, Clone)]
pub struct Dtbook {
    /// head内的元数据（dc:Title、dtb:uid等）
    pub metadata: MetadataMap,
    /// 文档标题（doctitle元素）
    pub doc_title: Option<String>,
    /// 文档作者（docauthor元素）
    pub doc_author: Option<String>,
    tree: Node,
}

impl Dtbook {
    /// 解析DTBook文件内容
    ///
    /// 接受任意根元素，但文档必须至少包含一个元素。
    ///
    /// # 参数
    /// * `xml_content` - DTBook文件的XML内容
    ///
    /// # 返回值
    /// * `Result<Dtbook, DaisyError>` - 解析后的DTBook信息
    pub fn parse_xml(xml_content: &str) -> Result<Dtbook> {
        let tree = Node::parse_xml(xml_content)?;

        let has_root_element = tree.children().iter().any(Node::is_element);
        if !has_root_element {
            return Err(DaisyError::MissingRootElement("dtbook".to_string()));
        }

        let metadata = match tree.find_element("head") {
            Some(head) => extract_metadata(&head.find_direct_children("meta")),
            None => MetadataMap::new(),
        };

        let doc_title = tree
            .find_element("doctitle")
            .map(|element| element.text_content())
            .filter(|text| !text.is_empty());
        let doc_author = tree
            .find_element("docauthor")
            .map(|element| element.text_content())
            .filter(|text| !text.is_empty());

        Ok(Dtbook {
            metadata,
            doc_title,
            doc_author,
            tree,
        })
    }

    /// 访问完整的节点树
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    /// 取出节点树的所有权
    ///
    /// 用于在解析结果之上继续做就地元数据更新。
    pub fn into_tree(self) -> Node {
        self.tree
    }

    /// 查找正文容器
    ///
    /// 优先返回 `bodymatter` 元素，缺失时回退到 `book` 元素。
    pub fn find_body(&self) -> Option<&Element> {
        self.tree
            .find_element("bodymatter")
            .or_else(|| self.tree.find_element("book"))
    }

    /// 对正文容器的直接子节点做切分分页
    ///
    /// 正文容器缺失时返回零个页面。
    ///
    /// # 参数
    /// * `options` - 分页选项
    ///
    /// # 返回值
    /// * `Vec<Page>` - 页面序列
    pub fn paginate(&self, options: &PaginateOptions) -> Vec<Page<'_>> {
        self.find_body()
            .map(|body| body.paginate(options))
            .unwrap_or_default()
    }

    /// 获取书籍标题
    ///
    /// 优先使用doctitle元素，缺失时回退到 `dc:Title` 元数据。
    pub fn title(&self) -> Option<&str> {
        self.doc_title
            .as_deref()
            .or_else(|| self.metadata.get_scalar("dc:Title"))
    }

    /// 获取任意元数据键的第一个值
    pub fn get_meta(&self, key: &str) -> Option<&str> {
        self.metadata.get_scalar(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DTBOOK: &str = r#"<?xml version="1.0"?>
<dtbook xmlns="http://www.daisy.org/z3986/2005/dtbook/" version="2005-2">
<head>
<meta name="dtb:uid" content="AUTO-UID-1"/>
<meta name="dc:Title" content="春江花月夜"/>
</head>
<book>
<frontmatter>
<doctitle>春江花月夜</doctitle>
<docauthor>张若虚</docauthor>
</frontmatter>
<bodymatter>
<level1>
<h1>第一章</h1>
<p>春江潮水连海平</p>
<p>海上明月共潮生</p>
</level1>
<p>滟滟随波千万里</p>
</bodymatter>
</book>
</dtbook>"#;

    #[test]
    fn test_parse_sample_dtbook() {
        let dtbook = Dtbook::parse_xml(SAMPLE_DTBOOK).expect("解析DTBook失败");

        assert_eq!(dtbook.title(), Some("春江花月夜"));
        assert_eq!(dtbook.doc_author.as_deref(), Some("张若虚"));
        assert_eq!(dtbook.get_meta("dtb:uid"), Some("AUTO-UID-1"));
    }

    #[test]
    fn test_accepts_any_root() {
        let dtbook = Dtbook::parse_xml("<book><p>正文</p></book>").expect("解析失败");
        assert!(dtbook.title().is_none());
        assert!(dtbook.find_body().is_some());
    }

    #[test]
    fn test_empty_document_is_error() {
        assert!(matches!(
            Dtbook::parse_xml("<!-- 只有注释 -->"),
            Err(DaisyError::MissingRootElement(_))
        ));
    }

    #[test]
    fn test_find_body_prefers_bodymatter() {
        let dtbook = Dtbook::parse_xml(SAMPLE_DTBOOK).expect("解析失败");
        let body = dtbook.find_body().expect("缺少正文容器");
        assert_eq!(body.name, "bodymatter");
    }

    #[test]
    fn test_paginate_body_content() {
        let dtbook = Dtbook::parse_xml(SAMPLE_DTBOOK).expect("解析失败");

        // bodymatter的直接子节点为[level1, p]：嵌套在level1内的p不参与切分
        let pages = dtbook.paginate(&PaginateOptions::new(1));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].data.len(), 1);
        assert_eq!(pages[0].data[0].len(), 2);
    }

    #[test]
    fn test_title_fallback_to_metadata() {
        let xml = r#"<dtbook>
<head><meta name="dc:Title" content="只有元数据标题"/></head>
<book/>
</dtbook>"#;
        let dtbook = Dtbook::parse_xml(xml).expect("解析失败");
        assert_eq!(dtbook.title(), Some("只有元数据标题"));
    }

    #[test]
    fn test_into_tree_for_updates() {
        let dtbook = Dtbook::parse_xml(SAMPLE_DTBOOK).expect("解析失败");
        let tree = dtbook.into_tree();
        assert!(tree.find_element("bodymatter").is_some());
    }
}
