//! 元数据提取模块
//!
//! 把 `<meta name=".." content=".."/>` 形式的元素集合转换为扁平的
//! 键值映射，并提供在容器内就地改写meta元素的共享功能。

use crate::daisy::tree::{Element, Node};
use std::collections::HashSet;

/// 元数据值
///
/// 同一个键第一次出现时存为标量，再次出现时提升为有序列表，
/// 原有的第一个值保持在列表开头。
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    /// 单个值
    Scalar(String),
    /// 同名键重复出现时的有序值列表
    List(Vec<String>),
}

impl MetaValue {
    /// 获取第一个值
    pub fn first(&self) -> &str {
        match self {
            MetaValue::Scalar(value) => value,
            MetaValue::List(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// 获取全部值
    pub fn values(&self) -> Vec<&str> {
        match self {
            MetaValue::Scalar(value) => vec![value.as_str()],
            MetaValue::List(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

/// 元数据映射
///
/// 键的顺序跟随输入序列中的首次出现顺序。
#[derive(Debug, Clone, Default)]
pub struct MetadataMap {
    entries: Vec<(String, MetaValue)>,
}

impl MetadataMap {
    /// 创建空的元数据映射
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 插入一个值
    ///
    /// 键已存在时把标量提升为列表（或向已有列表追加），保持首次
    /// 出现的值在最前。
    pub fn insert(&mut self, key: String, value: String) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            match existing {
                MetaValue::Scalar(first) => {
                    let first = std::mem::take(first);
                    *existing = MetaValue::List(vec![first, value]);
                }
                MetaValue::List(values) => values.push(value),
            }
        } else {
            self.entries.push((key, MetaValue::Scalar(value)));
        }
    }

    /// 直接设置一个键的值
    ///
    /// 与 [`MetadataMap::insert`] 不同，已存在的值被整体替换而不是
    /// 提升为列表；键保持原有位置，新键追加在末尾。
    pub fn set(&mut self, key: String, value: MetaValue) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *existing = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// 获取键对应的值
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// 获取键对应的第一个标量值
    pub fn get_scalar(&self, key: &str) -> Option<&str> {
        self.get(key).map(MetaValue::first)
    }

    /// 按首次出现顺序迭代全部条目
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// 按首次出现顺序迭代全部键
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 从meta元素集合提取元数据映射
///
/// 输入应当已经过滤为相关的meta元素。读取每个元素的 `name` 和
/// `content` 属性；缺少任一属性的条目被静默跳过。
///
/// # 参数
/// * `meta_elements` - meta元素列表
///
/// # 返回值
/// * `MetadataMap` - 提取出的元数据映射
pub fn extract_metadata(meta_elements: &[&Element]) -> MetadataMap {
    let mut metadata = MetadataMap::new();

    for element in meta_elements {
        let name = element.attribute("name");
        let content = element.attribute("content");
        if let (Some(name), Some(content)) = (name, content) {
            metadata.insert(name.to_string(), content.to_string());
        }
    }

    metadata
}

/// 在容器内就地改写meta子元素
///
/// 容器的每个 `meta` 直接子元素，若其 `name` 属性命中 `new_values`
/// 中的某个键，则其 `content` 属性被改写并把该键记为"已更新"。
/// `create_if_missing` 为真时，所有未被更新的键在容器末尾追加为新的
/// meta元素。重复调用不会产生重复元素：第二次调用会更新上一次
/// 追加的元素。
///
/// # 参数
/// * `container` - 元数据容器元素（如 `head`）
/// * `new_values` - 键值对列表，追加按给定顺序进行
/// * `create_if_missing` - 缺失的键是否追加为新元素
pub fn update_meta_children(
    container: &mut Element,
    new_values: &[(String, String)],
    create_if_missing: bool,
) {
    let mut updated: HashSet<&str> = HashSet::new();

    for child in container.children.iter_mut() {
        if let Node::Element(element) = child {
            if element.local_name() != "meta" {
                continue;
            }
            let name = match element.attribute("name") {
                Some(name) => name.to_string(),
                None => continue,
            };
            if let Some((key, value)) = new_values.iter().find(|(key, _)| *key == name) {
                element.set_attribute("content", value);
                updated.insert(key.as_str());
            }
        }
    }

    if create_if_missing {
        for (key, value) in new_values {
            if updated.contains(key.as_str()) {
                continue;
            }
            let mut meta = Element::new("meta");
            meta.set_attribute("name", key);
            meta.set_attribute("content", value);
            container.add_child(Node::Element(meta));
        }
    }
}
