//! NCX导航元素数据结构定义
//!
//! 定义NCX文件中的导航点和页面目标记录。

/// 导航点
///
/// 由navMap的递归深度优先遍历产生的扁平记录，`level` 随嵌套深度
/// 递增。
#[derive(Debug, Clone, PartialEq)]
pub struct NavPoint {
    /// 唯一标识符
    pub id: String,
    /// 嵌套层级（从1开始）
    pub level: u32,
    /// 导航标签文本
    pub label: String,
    /// 内容源文件路径
    pub src: String,
    /// 播放顺序
    pub play_order: u32,
}

impl NavPoint {
    /// 创建新的导航点
    pub fn new(id: String, level: u32, label: String, src: String, play_order: u32) -> Self {
        Self {
            id,
            level,
            label,
            src,
            play_order,
        }
    }

    /// 检查是否为顶层导航点
    pub fn is_top_level(&self) -> bool {
        self.level == 1
    }
}

/// 页面目标
///
/// NCX中pageList的页面导航记录，对应印刷版页码。
#[derive(Debug, Clone, PartialEq)]
pub struct PageTarget {
    /// 唯一标识符
    pub id: String,
    /// 页面类型（normal、front、special）
    pub page_type: String,
    /// 页面值
    pub value: String,
    /// 导航标签文本
    pub label: String,
    /// 内容源文件路径
    pub src: String,
    /// 播放顺序
    pub play_order: u32,
}

impl PageTarget {
    /// 创建新的页面目标
    pub fn new(
        id: String,
        page_type: String,
        value: String,
        label: String,
        src: String,
        play_order: u32,
    ) -> Self {
        Self {
            id,
            page_type,
            value,
            label,
            src,
            play_order,
        }
    }
}
