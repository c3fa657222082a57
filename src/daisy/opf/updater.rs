//! OPF元数据更新模块
//!
//! 在OPF节点树上就地改写或追加元数据。Dublin Core键写入
//! `dc-metadata` 内的 `dc:*` 元素，其余键写入 `x-metadata`
//! 内的meta元素。

use crate::daisy::config::DcTagConfigs;
use crate::daisy::error::{DaisyError, Result};
use crate::daisy::tree::{Element, Node};
use std::collections::HashSet;

/// 在OPF节点树上就地更新元数据
///
/// 在 `metadata` 容器内，已存在且键匹配的 `dc:*` 元素被改写文本，
/// 已存在且 `name` 匹配的meta元素被改写 `content` 属性。
/// `create_if_missing` 为真（默认语义）时，未命中的键被追加为新
/// 元素：Dublin Core键进入 `dc-metadata`（不存在时进入容器本身），
/// 其余键进入 `x-metadata`。重复调用不会产生重复元素。
///
/// # 参数
/// * `tree` - OPF节点树（被就地修改）
/// * `new_values` - 键值对列表，键为输出键（如 `title`）或meta名称
/// * `create_if_missing` - 缺失的键是否追加为新元素
///
/// # 返回值
/// * `Result<()>` - `metadata` 容器缺失时返回 `MissingContainer`
pub fn update_metadata(
    tree: &mut Node,
    new_values: &[(String, String)],
    create_if_missing: bool,
) -> Result<()> {
    update_metadata_with_config(
        tree,
        new_values,
        create_if_missing,
        &DcTagConfigs::default_config(),
    )
}

/// 使用指定的标签映射配置更新OPF元数据
pub fn update_metadata_with_config(
    tree: &mut Node,
    new_values: &[(String, String)],
    create_if_missing: bool,
    tag_configs: &DcTagConfigs,
) -> Result<()> {
    let container = tree
        .find_element_mut("metadata")
        .ok_or_else(|| DaisyError::MissingContainer("metadata".to_string()))?;

    let mut updated: HashSet<String> = HashSet::new();
    rewrite_existing(container, new_values, tag_configs, &mut updated);

    if create_if_missing {
        for (key, value) in new_values {
            if updated.contains(key) {
                continue;
            }
            if let Some(tag) = tag_configs.tag_for_key(key) {
                let mut element = Element::new(format!("dc:{}", tag));
                element.set_text(value);
                append_into(container, "dc-metadata", Node::Element(element));
            } else {
                let mut meta = Element::new("meta");
                meta.set_attribute("name", key);
                meta.set_attribute("content", value);
                append_into(container, "x-metadata", Node::Element(meta));
            }
        }
    }

    Ok(())
}

/// 改写容器内已存在的元数据元素，记录命中的键
fn rewrite_existing(
    element: &mut Element,
    new_values: &[(String, String)],
    tag_configs: &DcTagConfigs,
    updated: &mut HashSet<String>,
) {
    for child in element.children.iter_mut() {
        let Node::Element(child_element) = child else {
            continue;
        };

        if child_element.local_name() == "meta" {
            let name = match child_element.attribute("name") {
                Some(name) => name.to_string(),
                None => continue,
            };
            let key = tag_configs.normalize_key(&name);
            if let Some((matched, value)) = new_values.iter().find(|(k, _)| *k == key) {
                child_element.set_attribute("content", value);
                updated.insert(matched.clone());
            }
        } else if child_element.name.starts_with("dc:") {
            if let Some(key) = tag_configs.key_for_tag(child_element.local_name()) {
                if let Some((matched, value)) = new_values.iter().find(|(k, _)| k == key) {
                    child_element.set_text(value);
                    updated.insert(matched.clone());
                }
            }
        } else {
            // dc-metadata、x-metadata等包装容器
            rewrite_existing(child_element, new_values, tag_configs, updated);
        }
    }
}

/// 追加节点到指定的包装容器，不存在时追加到容器本身
fn append_into(container: &mut Element, wrapper: &str, node: Node) {
    if let Some(target) = container.find_element_mut(wrapper) {
        target.add_child(node);
    } else {
        container.add_child(node);
    }
}
