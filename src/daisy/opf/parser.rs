//! OPF解析器模块
//!
//! 提供DAISY v3包文件（OPF，Open Packaging Format）的解析功能。
//! 解析建立在通用节点树查询层之上。

use crate::daisy::config::DcTagConfigs;
use crate::daisy::error::{DaisyError, Result};
use crate::daisy::metadata::{extract_metadata, MetadataMap};
use crate::daisy::opf::{manifest::ManifestItem, spine::SpineItem};
use crate::daisy::time::parse_time;
use crate::daisy::tree::{Element, Node};
use std::collections::HashMap;

/// OPF文件解析结果
#[derive(Debug, Clone)]
pub struct Opf {
    /// 合并后的元数据（Dublin Core元素与meta键值对）
    pub metadata: MetadataMap,
    /// 清单项(文件列表)，按项目ID索引
    pub manifest: HashMap<String, ManifestItem>,
    /// 播放顺序
    pub spine: Vec<SpineItem>,
}

impl Opf {
    /// 解析OPF文件内容
    ///
    /// # 参数
    /// * `xml_content` - OPF文件的XML内容
    ///
    /// # 返回值
    /// * `Result<Opf, DaisyError>` - 解析后的OPF信息
    pub fn parse_xml(xml_content: &str) -> Result<Opf> {
        Self::parse_xml_with_config(xml_content, &DcTagConfigs::default_config())
    }

    /// 使用指定的标签映射配置解析OPF文件内容
    ///
    /// # 参数
    /// * `xml_content` - OPF文件的XML内容
    /// * `tag_configs` - Dublin Core标签映射配置
    ///
    /// # 返回值
    /// * `Result<Opf, DaisyError>` - 解析后的OPF信息
    pub fn parse_xml_with_config(xml_content: &str, tag_configs: &DcTagConfigs) -> Result<Opf> {
        let tree = Node::parse_xml(xml_content)?;
        let package = tree
            .find_element("package")
            .ok_or_else(|| DaisyError::MissingRootElement("package".to_string()))?;

        let metadata = Self::extract_package_metadata(package, tag_configs);
        let manifest = Self::extract_manifest(package);
        let spine = Self::extract_spine(package);

        Ok(Opf {
            metadata,
            manifest,
            spine,
        })
    }

    /// 提取并合并包元数据
    ///
    /// Dublin Core元素先被映射为输出键；随后meta键值对整体覆盖同名
    /// 键。两种形式同时出现时以meta的值为准。
    fn extract_package_metadata(package: &Element, tag_configs: &DcTagConfigs) -> MetadataMap {
        let mut metadata = MetadataMap::new();

        let container = match package.find_element("metadata") {
            Some(container) => container,
            // 元数据容器缺失不是解析错误，返回空映射
            None => return metadata,
        };

        // Dublin Core元素：dc-metadata存在时限定在其内部，否则在容器本身
        let dc_scope = container.find_element("dc-metadata").unwrap_or(container);
        for child in dc_scope.children.iter() {
            if let Node::Element(element) = child {
                if let Some(key) = tag_configs.key_for_tag(element.local_name()) {
                    let value = element.text_content();
                    if !value.is_empty() {
                        metadata.insert(key.to_string(), value);
                    }
                }
            }
        }

        // meta键值对：x-metadata存在时限定在其内部，否则在容器本身
        let x_scope = container.find_element("x-metadata").unwrap_or(container);
        let meta_map = extract_metadata(&x_scope.find_direct_children("meta"));
        for (name, value) in meta_map.iter() {
            metadata.set(tag_configs.normalize_key(name), value.clone());
        }

        metadata
    }

    /// 提取清单项
    fn extract_manifest(package: &Element) -> HashMap<String, ManifestItem> {
        let mut manifest = HashMap::new();

        if let Some(manifest_element) = package.find_element("manifest") {
            for item in manifest_element.find_direct_children("item") {
                let id = item.attribute("id").unwrap_or_default();
                let href = item.attribute("href").unwrap_or_default();
                let media_type = item.attribute("media-type").unwrap_or_default();

                if !id.is_empty() && !href.is_empty() && !media_type.is_empty() {
                    manifest.insert(
                        id.to_string(),
                        ManifestItem::new(id.to_string(), href.to_string(), media_type.to_string()),
                    );
                }
            }
        }

        manifest
    }

    /// 提取播放顺序
    fn extract_spine(package: &Element) -> Vec<SpineItem> {
        let mut spine = Vec::new();

        if let Some(spine_element) = package.find_element("spine") {
            for itemref in spine_element.find_direct_children("itemref") {
                let idref = itemref.attribute("idref").unwrap_or_default();
                if idref.is_empty() {
                    continue;
                }
                let linear = SpineItem::linear_from_attr(itemref.attribute("linear"));
                spine.push(SpineItem::with_linear(idref.to_string(), linear));
            }
        }

        spine
    }

    /// 获取书籍标题
    pub fn title(&self) -> Option<&str> {
        self.metadata.get_scalar("title")
    }

    /// 获取创建者（第一个）
    pub fn creator(&self) -> Option<&str> {
        self.metadata.get_scalar("creator")
    }

    /// 获取书籍语言
    pub fn language(&self) -> Option<&str> {
        self.metadata.get_scalar("language")
    }

    /// 获取书籍标识符
    pub fn identifier(&self) -> Option<&str> {
        self.metadata.get_scalar("identifier")
    }

    /// 获取任意元数据键的第一个值
    pub fn get_meta(&self, key: &str) -> Option<&str> {
        self.metadata.get_scalar(key)
    }

    /// 获取全书总播放时长（毫秒）
    ///
    /// 读取 `dtb:totalTime` 元数据并通过时间编解码器解析；
    /// 缺失或无法解析时为0。
    pub fn total_time(&self) -> u64 {
        self.metadata
            .get_scalar("dtb:totalTime")
            .map(parse_time)
            .unwrap_or(0)
    }

    /// 根据ID获取清单项
    ///
    /// # 参数
    /// * `id` - 清单项ID
    ///
    /// # 返回值
    /// * `Option<&ManifestItem>` - 清单项引用
    pub fn get_manifest_item(&self, id: &str) -> Option<&ManifestItem> {
        self.manifest.get(id)
    }

    /// 获取所有SMIL文件路径
    ///
    /// # 返回值
    /// * `Vec<String>` - SMIL文件路径列表
    pub fn get_smil_paths(&self) -> Vec<String> {
        self.manifest
            .values()
            .filter(|item| item.is_smil())
            .map(|item| item.href.clone())
            .collect()
    }

    /// 获取所有音频文件路径
    ///
    /// # 返回值
    /// * `Vec<String>` - 音频文件路径列表
    pub fn get_audio_paths(&self) -> Vec<String> {
        self.manifest
            .values()
            .filter(|item| item.is_audio())
            .map(|item| item.href.clone())
            .collect()
    }

    /// 获取线性播放顺序对应的文件路径
    ///
    /// # 返回值
    /// * `Vec<String>` - 按播放顺序排列的文件路径列表
    pub fn get_reading_order(&self) -> Vec<String> {
        self.spine
            .iter()
            .filter(|spine_item| spine_item.is_linear())
            .filter_map(|spine_item| self.manifest.get(&spine_item.idref))
            .map(|manifest_item| manifest_item.href.clone())
            .collect()
    }
}
