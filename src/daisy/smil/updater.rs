//! SMIL元数据更新模块
//!
//! 在SMIL节点树的head容器内就地改写或追加meta元素。

use crate::daisy::error::{DaisyError, Result};
use crate::daisy::metadata::update_meta_children;
use crate::daisy::tree::Node;

/// 在SMIL节点树上就地更新元数据
///
/// 在 `head` 容器内改写 `name` 匹配的meta元素的 `content` 属性；
/// `create_if_missing` 为真时把未命中的键追加为新的meta元素。
/// 重复调用不会产生重复元素。
///
/// # 参数
/// * `tree` - SMIL节点树（被就地修改）
/// * `new_values` - 键值对列表（如 `dtb:totalElapsedTime`）
/// * `create_if_missing` - 缺失的键是否追加为新元素
///
/// # 返回值
/// * `Result<()>` - `head` 容器缺失时返回 `MissingContainer`
pub fn update_metadata(
    tree: &mut Node,
    new_values: &[(String, String)],
    create_if_missing: bool,
) -> Result<()> {
    let head = tree
        .find_element_mut("head")
        .ok_or_else(|| DaisyError::MissingContainer("head".to_string()))?;
    update_meta_children(head, new_values, create_if_missing);
    Ok(())
}
