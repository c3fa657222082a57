//! NCX解析器模块
//!
//! 提供NCX（Navigation Control file for XML）文件的解析功能。
//! 导航点通过对navMap的递归深度优先遍历展平为带层级的记录列表。

use crate::daisy::error::{DaisyError, Result};
use crate::daisy::metadata::{extract_metadata, MetadataMap};
use crate::daisy::ncx::navigation::{NavPoint, PageTarget};
use crate::daisy::tree::{Element, Node};

/// NCX文件解析结果
#[derive(Debug, Clone)]
pub struct Ncx {
    /// head内的元数据（dtb:uid、dtb:depth等）
    pub metadata: MetadataMap,
    /// 文档标题
    pub doc_title: Option<String>,
    /// 文档作者
    pub doc_author: Option<String>,
    /// 导航点列表，深度优先文档顺序
    pub nav_points: Vec<NavPoint>,
    /// 页面目标列表
    pub page_targets: Vec<PageTarget>,
}

impl Ncx {
    /// 解析NCX文件内容
    ///
    /// # 参数
    /// * `xml_content` - NCX文件的XML内容
    ///
    /// # 返回值
    /// * `Result<Ncx, DaisyError>` - 解析后的NCX信息
    pub fn parse_xml(xml_content: &str) -> Result<Ncx> {
        let tree = Node::parse_xml(xml_content)?;
        let ncx_root = tree
            .find_element("ncx")
            .ok_or_else(|| DaisyError::MissingRootElement("ncx".to_string()))?;

        let metadata = match ncx_root.find_element("head") {
            Some(head) => extract_metadata(&head.find_direct_children("meta")),
            None => MetadataMap::new(),
        };

        let doc_title = ncx_root
            .find_element("docTitle")
            .map(|element| element.text_content())
            .filter(|text| !text.is_empty());
        let doc_author = ncx_root
            .find_element("docAuthor")
            .map(|element| element.text_content())
            .filter(|text| !text.is_empty());

        let mut nav_points = Vec::new();
        if let Some(nav_map) = ncx_root.find_element("navMap") {
            Self::collect_nav_points(nav_map, 1, &mut nav_points);
        }

        let mut page_targets = Vec::new();
        if let Some(page_list) = ncx_root.find_element("pageList") {
            for target in page_list.find_direct_children("pageTarget") {
                page_targets.push(Self::parse_page_target(target));
            }
        }

        Ok(Ncx {
            metadata,
            doc_title,
            doc_author,
            nav_points,
            page_targets,
        })
    }

    /// 递归收集导航点
    ///
    /// 每层只处理直接的navPoint子元素：当前元素产生一条当前层级的
    /// 记录，然后对其直接navPoint子元素递归下一层级。每个节点只
    /// 访问一次，没有嵌套navPoint时递归终止。
    fn collect_nav_points(parent: &Element, level: u32, nav_points: &mut Vec<NavPoint>) {
        for nav_point in parent.find_direct_children("navPoint") {
            let id = nav_point.attribute("id").unwrap_or_default().to_string();
            let play_order = nav_point
                .attribute("playOrder")
                .and_then(|value| value.parse().ok())
                .unwrap_or(0);
            let label = nav_point
                .find_direct_children("navLabel")
                .first()
                .map(|element| element.text_content())
                .unwrap_or_default();
            let src = nav_point
                .find_direct_children("content")
                .first()
                .and_then(|element| element.attribute("src"))
                .unwrap_or_default()
                .to_string();

            nav_points.push(NavPoint::new(id, level, label, src, play_order));
            Self::collect_nav_points(nav_point, level + 1, nav_points);
        }
    }

    /// 解析单个pageTarget元素
    fn parse_page_target(target: &Element) -> PageTarget {
        let id = target.attribute("id").unwrap_or_default().to_string();
        let page_type = target.attribute("type").unwrap_or("normal").to_string();
        let value = target.attribute("value").unwrap_or_default().to_string();
        let play_order = target
            .attribute("playOrder")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let label = target
            .find_direct_children("navLabel")
            .first()
            .map(|element| element.text_content())
            .unwrap_or_default();
        let src = target
            .find_direct_children("content")
            .first()
            .and_then(|element| element.attribute("src"))
            .unwrap_or_default()
            .to_string();

        PageTarget::new(id, page_type, value, label, src, play_order)
    }

    /// 获取NCX文件的唯一标识符（dtb:uid）
    pub fn get_uid(&self) -> Option<&str> {
        self.metadata.get_scalar("dtb:uid")
    }

    /// 获取导航深度
    ///
    /// 优先使用 `dtb:depth` 元数据，缺失或无法解析时用导航点的
    /// 实际最大层级。
    pub fn get_depth(&self) -> u32 {
        self.metadata
            .get_scalar("dtb:depth")
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| {
                self.nav_points
                    .iter()
                    .map(|point| point.level)
                    .max()
                    .unwrap_or(0)
            })
    }

    /// 获取文档标题文本
    pub fn get_title(&self) -> Option<&str> {
        self.doc_title.as_deref()
    }

    /// 根据ID查找导航点
    pub fn find_nav_point_by_id(&self, id: &str) -> Option<&NavPoint> {
        self.nav_points.iter().find(|point| point.id == id)
    }

    /// 获取导航点指向的内容路径列表（按文档顺序）
    pub fn get_reading_paths(&self) -> Vec<String> {
        self.nav_points
            .iter()
            .map(|point| point.src.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_NCX: &str = r#"<?xml version="1.0"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
<head>
<meta name="dtb:uid" content="AUTO-UID-1"/>
<meta name="dtb:depth" content="2"/>
<meta name="dtb:totalPageCount" content="0"/>
</head>
<docTitle><text>春江花月夜</text></docTitle>
<docAuthor><text>张若虚</text></docAuthor>
<navMap>
<navPoint id="np-1" playOrder="1">
<navLabel><text>第一章</text></navLabel>
<content src="part1.smil#tcp1"/>
<navPoint id="np-1-1" playOrder="2">
<navLabel><text>第一节</text></navLabel>
<content src="part1.smil#tcp2"/>
</navPoint>
</navPoint>
<navPoint id="np-2" playOrder="3">
<navLabel><text>第二章</text></navLabel>
<content src="part2.smil#tcp1"/>
</navPoint>
</navMap>
<pageList>
<pageTarget id="page-1" type="normal" value="1" playOrder="4">
<navLabel><text>1</text></navLabel>
<content src="part1.smil#page1"/>
</pageTarget>
</pageList>
</ncx>"#;

    #[test]
    fn test_parse_sample_ncx() {
        let ncx = Ncx::parse_xml(SAMPLE_NCX).expect("解析NCX失败");

        assert_eq!(ncx.get_uid(), Some("AUTO-UID-1"));
        assert_eq!(ncx.get_title(), Some("春江花月夜"));
        assert_eq!(ncx.doc_author.as_deref(), Some("张若虚"));
        assert_eq!(ncx.get_depth(), 2);
    }

    #[test]
    fn test_nav_points_flattened_in_document_order() {
        let ncx = Ncx::parse_xml(SAMPLE_NCX).expect("解析NCX失败");

        let ids: Vec<&str> = ncx.nav_points.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["np-1", "np-1-1", "np-2"]);

        let levels: Vec<u32> = ncx.nav_points.iter().map(|p| p.level).collect();
        assert_eq!(levels, vec![1, 2, 1]);

        let first = &ncx.nav_points[0];
        assert_eq!(first.label, "第一章");
        assert_eq!(first.src, "part1.smil#tcp1");
        assert_eq!(first.play_order, 1);
        assert!(first.is_top_level());
    }

    #[test]
    fn test_nested_nav_points_not_double_counted() {
        // np-1-1只出现一次，虽然它同时是navMap的后代和np-1的子节点
        let ncx = Ncx::parse_xml(SAMPLE_NCX).expect("解析NCX失败");
        assert_eq!(ncx.nav_points.len(), 3);

        let nested = ncx.find_nav_point_by_id("np-1-1").expect("缺少np-1-1");
        assert_eq!(nested.level, 2);
        assert_eq!(nested.label, "第一节");
    }

    #[test]
    fn test_nested_label_not_taken_from_child() {
        // 缺少navLabel的父导航点不应借用子导航点的标签
        let xml = r#"<ncx>
<navMap>
<navPoint id="outer">
<content src="a.smil#1"/>
<navPoint id="inner">
<navLabel><text>内层标签</text></navLabel>
<content src="a.smil#2"/>
</navPoint>
</navPoint>
</navMap>
</ncx>"#;
        let ncx = Ncx::parse_xml(xml).expect("解析NCX失败");

        let outer = ncx.find_nav_point_by_id("outer").expect("缺少outer");
        assert_eq!(outer.label, "");
        let inner = ncx.find_nav_point_by_id("inner").expect("缺少inner");
        assert_eq!(inner.label, "内层标签");
    }

    #[test]
    fn test_page_targets() {
        let ncx = Ncx::parse_xml(SAMPLE_NCX).expect("解析NCX失败");

        assert_eq!(ncx.page_targets.len(), 1);
        let page = &ncx.page_targets[0];
        assert_eq!(page.id, "page-1");
        assert_eq!(page.page_type, "normal");
        assert_eq!(page.value, "1");
        assert_eq!(page.label, "1");
        assert_eq!(page.src, "part1.smil#page1");
    }

    #[test]
    fn test_reading_paths() {
        let ncx = Ncx::parse_xml(SAMPLE_NCX).expect("解析NCX失败");
        assert_eq!(
            ncx.get_reading_paths(),
            vec!["part1.smil#tcp1", "part1.smil#tcp2", "part2.smil#tcp1"]
        );
    }

    #[test]
    fn test_depth_computed_when_meta_missing() {
        let xml = r#"<ncx>
<navMap>
<navPoint id="a"><navLabel><text>甲</text></navLabel><content src="a.smil#1"/></navPoint>
</navMap>
</ncx>"#;
        let ncx = Ncx::parse_xml(xml).expect("解析NCX失败");
        assert_eq!(ncx.get_depth(), 1);
    }

    #[test]
    fn test_missing_ncx_root() {
        let result = Ncx::parse_xml("<navMap/>");
        assert!(matches!(
            result,
            Err(DaisyError::MissingRootElement(ref tag)) if tag == "ncx"
        ));
    }
}
