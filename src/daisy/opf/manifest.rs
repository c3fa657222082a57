//! 清单模块
//!
//! 提供DAISY包中文件清单的结构定义。

/// 清单项信息
#[derive(Debug, Clone)]
pub struct ManifestItem {
    /// 项目ID
    pub id: String,
    /// 文件路径(相对于OPF文件)
    pub href: String,
    /// 媒体类型
    pub media_type: String,
}

impl ManifestItem {
    /// 创建新的清单项
    pub fn new(id: String, href: String, media_type: String) -> Self {
        Self {
            id,
            href,
            media_type,
        }
    }

    /// 检查是否为SMIL时间同步文件
    pub fn is_smil(&self) -> bool {
        self.media_type == "application/smil"
    }

    /// 检查是否为音频文件
    pub fn is_audio(&self) -> bool {
        self.media_type.starts_with("audio/")
    }

    /// 检查是否为图片文件
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    /// 检查是否为DTBook文本内容
    pub fn is_dtbook(&self) -> bool {
        self.media_type == "application/x-dtbook+xml"
    }

    /// 检查是否为NCX导航文件
    pub fn is_ncx(&self) -> bool {
        self.media_type == "application/x-dtbncx+xml"
    }
}
