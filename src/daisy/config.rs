//! 元数据标签配置模块
//!
//! 提供Dublin Core元数据标签到输出键的映射配置，支持从YAML加载。

use crate::daisy::error::{DaisyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// 默认配置文件路径
const DEFAULT_CONFIG_PATH: &str = "daisy_tags.yaml";

/// 单个元数据类型的标签配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataTagConfig {
    /// 标签列表，第一个标签是写出时使用的规范形式
    pub tags: Vec<String>,
    /// 可选的描述
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MetadataTagConfig {
    /// 创建新的标签配置
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            tags,
            description: None,
        }
    }

    /// 创建带描述的标签配置
    pub fn with_description(tags: Vec<String>, description: String) -> Self {
        Self {
            tags,
            description: Some(description),
        }
    }

    /// 检查本地标签名是否属于此配置
    ///
    /// 匹配不区分ASCII大小写，以同时覆盖 `dc:Title`（DAISY惯用）和
    /// `dc:title` 两种写法。
    pub fn matches(&self, local_name: &str) -> bool {
        self.tags
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(local_name))
    }
}

/// Dublin Core元数据标签配置
///
/// 定义DAISY v3 OPF中每个Dublin Core元素对应的输出键。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcTagConfigs {
    /// 标题标签配置（dc:Title）
    pub title: MetadataTagConfig,
    /// 创建者标签配置（dc:Creator）
    pub creator: MetadataTagConfig,
    /// 主题标签配置（dc:Subject）
    pub subject: MetadataTagConfig,
    /// 描述标签配置（dc:Description）
    pub description: MetadataTagConfig,
    /// 出版社标签配置（dc:Publisher）
    pub publisher: MetadataTagConfig,
    /// 贡献者标签配置（dc:Contributor）
    pub contributor: MetadataTagConfig,
    /// 日期标签配置（dc:Date）
    pub date: MetadataTagConfig,
    /// 类型标签配置（dc:Type）
    #[serde(rename = "type")]
    pub doc_type: MetadataTagConfig,
    /// 格式标签配置（dc:Format）
    pub format: MetadataTagConfig,
    /// 标识符标签配置（dc:Identifier）
    pub identifier: MetadataTagConfig,
    /// 来源标签配置（dc:Source）
    pub source: MetadataTagConfig,
    /// 语言标签配置（dc:Language）
    pub language: MetadataTagConfig,
    /// 关联标签配置（dc:Relation）
    pub relation: MetadataTagConfig,
    /// 覆盖范围标签配置（dc:Coverage）
    pub coverage: MetadataTagConfig,
    /// 版权标签配置（dc:Rights）
    pub rights: MetadataTagConfig,
}

impl DcTagConfigs {
    /// 从默认配置文件中加载标签配置
    ///
    /// 配置文件默认为当前目录下的 `daisy_tags.yaml`
    ///
    /// # 返回值
    ///
    /// * `Result<Self>` - 加载成功返回配置实例，失败返回错误
    pub fn from_file() -> Result<Self> {
        let content = fs::read_to_string(DEFAULT_CONFIG_PATH)
            .map_err(|e| DaisyError::ConfigError(format!("无法读取配置文件: {}", e)))?;

        Self::from_yaml_str(&content)
    }

    /// 从YAML文本解析标签配置
    ///
    /// # 参数
    /// * `content` - YAML格式的配置内容
    ///
    /// # 返回值
    /// * `Result<Self>` - 解析后的配置实例
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yml::from_str(content)
            .map_err(|e| DaisyError::ConfigError(format!("配置文件格式错误: {}", e)))
    }

    /// 生成默认配置文件到当前目录
    ///
    /// 配置文件将生成为当前目录下的 `daisy_tags.yaml`
    ///
    /// # 返回值
    ///
    /// * `Result<()>` - 生成成功返回Ok，失败返回错误
    pub fn generate_default_config() -> Result<()> {
        let default_config = Self::default_config();
        let yaml_content = serde_yml::to_string(&default_config)
            .map_err(|e| DaisyError::ConfigError(format!("序列化配置失败: {}", e)))?;

        // 在YAML内容前添加注释说明
        let content_with_header = format!(
            "# Dublin Core标签配置文件\n# 定义 DAISY OPF 元数据解析时使用的标签映射\n# 每个配置项的第一个标签是写出时使用的规范形式\n\n{}",
            yaml_content
        );

        fs::write(DEFAULT_CONFIG_PATH, content_with_header)
            .map_err(|e| DaisyError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }

    /// 获取默认配置
    ///
    /// # 返回值
    ///
    /// * `Self` - 默认配置实例
    pub fn default_config() -> Self {
        Self {
            title: MetadataTagConfig::with_description(
                vec!["Title".to_string()],
                "书籍标题".to_string(),
            ),
            creator: MetadataTagConfig::with_description(
                vec!["Creator".to_string(), "Author".to_string()],
                "作者/创建者信息".to_string(),
            ),
            subject: MetadataTagConfig::with_description(
                vec!["Subject".to_string()],
                "书籍主题/分类".to_string(),
            ),
            description: MetadataTagConfig::with_description(
                vec!["Description".to_string()],
                "书籍描述/简介".to_string(),
            ),
            publisher: MetadataTagConfig::with_description(
                vec!["Publisher".to_string()],
                "出版社信息".to_string(),
            ),
            contributor: MetadataTagConfig::with_description(
                vec!["Contributor".to_string()],
                "贡献者信息（旁白、编辑等）".to_string(),
            ),
            date: MetadataTagConfig::with_description(
                vec!["Date".to_string()],
                "出版日期".to_string(),
            ),
            doc_type: MetadataTagConfig::with_description(
                vec!["Type".to_string()],
                "资源类型".to_string(),
            ),
            format: MetadataTagConfig::with_description(
                vec!["Format".to_string()],
                "资源格式（如ANSI/NISO Z39.86-2005）".to_string(),
            ),
            identifier: MetadataTagConfig::with_description(
                vec!["Identifier".to_string()],
                "书籍标识符（ISBN、UID等）".to_string(),
            ),
            source: MetadataTagConfig::with_description(
                vec!["Source".to_string()],
                "来源出版物".to_string(),
            ),
            language: MetadataTagConfig::with_description(
                vec!["Language".to_string()],
                "书籍语言".to_string(),
            ),
            relation: MetadataTagConfig::with_description(
                vec!["Relation".to_string()],
                "关联资源".to_string(),
            ),
            coverage: MetadataTagConfig::with_description(
                vec!["Coverage".to_string()],
                "覆盖范围".to_string(),
            ),
            rights: MetadataTagConfig::with_description(
                vec!["Rights".to_string()],
                "版权信息".to_string(),
            ),
        }
    }

    /// 尝试从默认配置文件加载，文件不存在时回退到默认配置
    ///
    /// # 返回值
    ///
    /// * `Self` - 配置实例
    pub fn new() -> Self {
        Self::from_file().unwrap_or_else(|_| Self::default_config())
    }

    /// 按规范键顺序列出全部配置项
    fn entries(&self) -> [(&'static str, &MetadataTagConfig); 15] {
        [
            ("title", &self.title),
            ("creator", &self.creator),
            ("subject", &self.subject),
            ("description", &self.description),
            ("publisher", &self.publisher),
            ("contributor", &self.contributor),
            ("date", &self.date),
            ("type", &self.doc_type),
            ("format", &self.format),
            ("identifier", &self.identifier),
            ("source", &self.source),
            ("language", &self.language),
            ("relation", &self.relation),
            ("coverage", &self.coverage),
            ("rights", &self.rights),
        ]
    }

    /// 查找本地标签名对应的输出键
    ///
    /// # 参数
    /// * `local_name` - 去掉命名空间前缀的标签名（如 `Title`）
    ///
    /// # 返回值
    /// * `Option<&'static str>` - 输出键（如 `title`），无映射时为None
    pub fn key_for_tag(&self, local_name: &str) -> Option<&'static str> {
        self.entries()
            .into_iter()
            .find(|(_, config)| config.matches(local_name))
            .map(|(key, _)| key)
    }

    /// 把元数据名称规范化为输出键
    ///
    /// `dc:` 前缀的名称经标签映射归并到对应的Dublin Core键（如
    /// `dc:Title` 归并为 `title`），其余名称按原样使用。
    pub fn normalize_key(&self, name: &str) -> String {
        if let Some(local) = name.strip_prefix("dc:") {
            if let Some(key) = self.key_for_tag(local) {
                return key.to_string();
            }
        }
        name.to_string()
    }

    /// 查找输出键对应的规范标签名
    ///
    /// # 参数
    /// * `key` - 输出键（如 `title`）
    ///
    /// # 返回值
    /// * `Option<&str>` - 规范标签名（如 `Title`），非DC键时为None
    pub fn tag_for_key(&self, key: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find(|(canonical, _)| *canonical == key)
            .and_then(|(_, config)| config.tags.first().map(String::as_str))
    }
}

impl Default for DcTagConfigs {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_for_tag() {
        let configs = DcTagConfigs::default_config();
        assert_eq!(configs.key_for_tag("Title"), Some("title"));
        assert_eq!(configs.key_for_tag("title"), Some("title"));
        assert_eq!(configs.key_for_tag("Creator"), Some("creator"));
        assert_eq!(configs.key_for_tag("Rights"), Some("rights"));
        assert_eq!(configs.key_for_tag("meta"), None);
    }

    #[test]
    fn test_tag_for_key() {
        let configs = DcTagConfigs::default_config();
        assert_eq!(configs.tag_for_key("title"), Some("Title"));
        assert_eq!(configs.tag_for_key("identifier"), Some("Identifier"));
        assert_eq!(configs.tag_for_key("dtb:totalTime"), None);
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
title:
  tags: ["Title", "BookTitle"]
creator:
  tags: ["Creator"]
subject:
  tags: ["Subject"]
description:
  tags: ["Description"]
publisher:
  tags: ["Publisher"]
contributor:
  tags: ["Contributor"]
date:
  tags: ["Date"]
type:
  tags: ["Type"]
format:
  tags: ["Format"]
identifier:
  tags: ["Identifier"]
source:
  tags: ["Source"]
language:
  tags: ["Language"]
relation:
  tags: ["Relation"]
coverage:
  tags: ["Coverage"]
rights:
  tags: ["Rights"]
"#;
        let configs = DcTagConfigs::from_yaml_str(yaml).expect("解析YAML配置失败");
        assert_eq!(configs.key_for_tag("BookTitle"), Some("title"));
        assert!(configs.title.description.is_none());
    }

    #[test]
    fn test_config_round_trip_through_file() {
        // 在临时目录中生成并读取配置文件
        let temp_dir = tempfile::tempdir().expect("创建临时目录失败");
        let original_dir = std::env::current_dir().expect("获取当前目录失败");
        std::env::set_current_dir(temp_dir.path()).expect("切换目录失败");

        DcTagConfigs::generate_default_config().expect("生成默认配置失败");
        let loaded = DcTagConfigs::from_file().expect("读取配置失败");

        std::env::set_current_dir(original_dir).expect("恢复目录失败");

        assert_eq!(loaded.key_for_tag("Title"), Some("title"));
        assert_eq!(loaded.tag_for_key("language"), Some("Language"));
    }
}
