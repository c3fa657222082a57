pub mod daisy;

// === 核心API重新导出 ===

/// 错误处理
pub use daisy::{DaisyError, Result};

// === 数据结构 ===

/// 节点树与切分分页
pub use daisy::{Element, Node, Page, PageUrls, PaginateOptions, Part};

/// 元数据映射
pub use daisy::{MetaValue, MetadataMap};

// === 格式解析器 ===

/// OPF包文件
pub use daisy::{ManifestItem, Opf, SpineItem};

/// NCX导航文件
pub use daisy::{NavPoint, Ncx, PageTarget};

/// SMIL时间同步文件
pub use daisy::{AudioClip, Smil};

/// DTBook文本内容文件
pub use daisy::Dtbook;

// === 格式更新器 ===

pub use daisy::{
    update_dtbook_metadata, update_ncx_metadata, update_opf_metadata, update_smil_metadata,
};

// === 底层组件（高级用法） ===

/// 标签映射配置
pub use daisy::{DcTagConfigs, MetadataTagConfig};

/// 时间编解码
pub use daisy::{calculate_duration, format_time, parse_time};

/// 通用切分与分页
pub use daisy::{paginate, split_by, split_by_tags};

// === 库信息 ===

/// DaisyForge库的版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// DaisyForge库的描述
pub const DESCRIPTION: &str = "一个现代化的DAISY v3有声书XML文件处理库";

/// 库的主页
pub const HOMEPAGE: &str = "https://github.com/FWW321/daisyforge";

// === 便捷函数 ===

/// 快速解析OPF包文件
///
/// 这是 `Opf::parse_xml` 的便捷包装函数。
///
/// # 参数
/// * `xml_content` - OPF文件的XML内容
///
/// # 返回值
/// * `Result<Opf>` - 解析后的OPF信息
///
/// # 示例
///
/// ```rust
/// let xml = r#"<package><metadata><dc-metadata>
/// <dc:Title>示例</dc:Title>
/// </dc-metadata></metadata></package>"#;
/// let opf = daisyforge::parse_opf(xml)?;
/// assert_eq!(opf.title(), Some("示例"));
/// # Ok::<(), daisyforge::DaisyError>(())
/// ```
pub fn parse_opf(xml_content: &str) -> Result<Opf> {
    Opf::parse_xml(xml_content)
}

/// 快速解析NCX导航文件
///
/// 这是 `Ncx::parse_xml` 的便捷包装函数。
pub fn parse_ncx(xml_content: &str) -> Result<Ncx> {
    Ncx::parse_xml(xml_content)
}

/// 快速解析SMIL时间同步文件
///
/// 这是 `Smil::parse_xml` 的便捷包装函数。
///
/// # 参数
/// * `xml_content` - SMIL文件的XML内容
/// * `filename` - SMIL文件名，用于构造片段键
pub fn parse_smil(xml_content: &str, filename: &str) -> Result<Smil> {
    Smil::parse_xml(xml_content, filename)
}

/// 快速解析DTBook文本内容文件
///
/// 这是 `Dtbook::parse_xml` 的便捷包装函数。
pub fn parse_dtbook(xml_content: &str) -> Result<Dtbook> {
    Dtbook::parse_xml(xml_content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        println!("DaisyForge version: {}", VERSION);
    }

    #[test]
    fn test_description() {
        assert!(!DESCRIPTION.is_empty());
        println!("Description: {}", DESCRIPTION);
    }

    #[test]
    fn test_parse_helpers() {
        let opf = parse_opf("<package/>").expect("解析OPF失败");
        assert!(opf.metadata.is_empty());

        let ncx = parse_ncx("<ncx/>").expect("解析NCX失败");
        assert!(ncx.nav_points.is_empty());

        let smil = parse_smil("<smil/>", "a.smil").expect("解析SMIL失败");
        assert_eq!(smil.clip_count(), 0);

        let dtbook = parse_dtbook("<dtbook/>").expect("解析DTBook失败");
        assert!(dtbook.title().is_none());
    }
}
