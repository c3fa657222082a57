//! 播放顺序模块
//!
//! 提供DAISY包中SMIL文件播放顺序（spine）的结构定义。

/// 播放顺序项
#[derive(Debug, Clone)]
pub struct SpineItem {
    /// 引用的清单项ID
    pub idref: String,
    /// 是否参与线性播放
    pub linear: bool,
}

impl SpineItem {
    /// 创建新的播放顺序项，默认参与线性播放
    pub fn new(idref: String) -> Self {
        Self {
            idref,
            linear: true,
        }
    }

    /// 创建指定线性属性的播放顺序项
    pub fn with_linear(idref: String, linear: bool) -> Self {
        Self { idref, linear }
    }

    /// 从linear属性值推导线性标志
    ///
    /// 只有显式的 `"no"` 关闭线性播放，属性缺失时默认为线性。
    pub fn linear_from_attr(value: Option<&str>) -> bool {
        value != Some("no")
    }

    /// 检查是否参与线性播放
    pub fn is_linear(&self) -> bool {
        self.linear
    }
}
