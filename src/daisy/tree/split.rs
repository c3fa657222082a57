//! 树切分与分页模块
//!
//! 提供按标签边界切分节点直接子节点的通用算法，以及把切分结果
//! 组合成固定大小页面（带导航链接）的分页功能。

use crate::daisy::tree::node::{Element, Node};

/// 切分产生的部分：一段连续的兄弟节点
///
/// 只借用原始子节点，不做拷贝，生命周期限定在一次切分调用的结果内。
#[derive(Debug, Default)]
pub struct Part<'a> {
    /// 本部分包含的节点，保持文档顺序
    pub nodes: Vec<&'a Node>,
}

impl<'a> Part<'a> {
    /// 创建空的部分
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// 本部分包含的节点数量
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// 页面导航链接
///
/// 路径形如 `{base_path}{页码}`。第一页省略 `prev` 和 `first`，
/// 最后一页省略 `next` 和 `last`。
#[derive(Debug, Clone, PartialEq)]
pub struct PageUrls {
    /// 当前页路径
    pub current: String,
    /// 上一页路径
    pub prev: Option<String>,
    /// 下一页路径
    pub next: Option<String>,
    /// 第一页路径
    pub first: Option<String>,
    /// 最后一页路径
    pub last: Option<String>,
}

impl PageUrls {
    fn for_page(current_page: usize, last_page: usize, base_path: &str) -> Self {
        let link = |page: usize| format!("{}{}", base_path, page);
        Self {
            current: link(current_page),
            prev: (current_page > 1).then(|| link(current_page - 1)),
            first: (current_page > 1).then(|| link(1)),
            next: (current_page < last_page).then(|| link(current_page + 1)),
            last: (current_page < last_page).then(|| link(last_page)),
        }
    }
}

/// 分页结果中的单个页面
///
/// 仅由部分数量和页面大小推导，不在调用之外保持任何持久状态。
#[derive(Debug)]
pub struct Page<'a> {
    /// 本页包含的部分
    pub data: Vec<Part<'a>>,
    /// 本页第一个部分在全部部分中的索引（从0开始）
    pub start: usize,
    /// 本页结束位置的排他索引
    pub end: usize,
    /// 全部部分的总数
    pub total: usize,
    /// 当前页码（从1开始）
    pub current_page: usize,
    /// 每页的部分数量
    pub size: usize,
    /// 最后一页的页码
    pub last_page: usize,
    /// 导航链接
    pub url: PageUrls,
}

/// 分页选项
#[derive(Debug, Clone)]
pub struct PaginateOptions {
    /// 每页包含的部分数量
    pub items_per_page: usize,
    /// 作为切分边界的标签名集合
    pub tags: Vec<String>,
    /// 导航链接的路径前缀
    pub base_path: String,
}

impl PaginateOptions {
    /// 创建分页选项，切分标签默认为 `p`，路径前缀默认为 `/`
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items_per_page,
            tags: vec!["p".to_string()],
            base_path: "/".to_string(),
        }
    }
}

/// 按谓词切分节点的直接子节点
///
/// 只扫描直接子节点：一个部分不断累积子节点，遇到匹配 `test` 的
/// 子节点时连同该节点一起封闭当前部分，下一个子节点开始新部分。
/// 最后一个匹配之后的剩余子节点构成末尾部分。没有任何匹配时整个
/// 子节点序列构成单一部分；没有子节点时产生零个部分。
///
/// 算法不会递归进入子节点内部：切分表达的是"在这些结构边界处
/// 切断内容流"，递归会连带切开低一层的子文档容器。
///
/// # 参数
/// * `parent` - 被切分的父节点
/// * `test` - 边界判定谓词，作用于直接子节点
///
/// # 返回值
/// * `Vec<Part>` - 切分出的部分序列
pub fn split_by<'a, F>(parent: &'a Node, test: F) -> Vec<Part<'a>>
where
    F: Fn(&Node) -> bool,
{
    split_children(parent.children(), &test)
}

/// 按标签名集合切分节点的直接子节点
///
/// 标签名匹配任意一个集合成员的直接子节点视为切分边界。
pub fn split_by_tags<'a>(parent: &'a Node, tags: &[&str]) -> Vec<Part<'a>> {
    split_children(parent.children(), &|node: &Node| {
        node.tag_name().is_some_and(|name| tags.contains(&name))
    })
}

/// 切分并把结果分组为固定大小的页面
///
/// 先按 `options.tags` 调用切分算法，再把部分按 `items_per_page`
/// 分组（最后一页可以不满）。总页数为部分数除以页面大小向上取整；
/// 零个部分产生零个页面（而不是一个空页面）。
///
/// # 参数
/// * `tree` - 被切分的父节点
/// * `options` - 分页选项
///
/// # 返回值
/// * `Vec<Page>` - 页面序列
///
/// # 示例
///
/// ```rust
/// use daisyforge::daisy::tree::{Node, PaginateOptions};
///
/// let tree = Node::parse_xml("<body><p>一</p><p>二</p><p>三</p></body>")?;
/// let body = tree.find_element("body").unwrap();
/// let pages = body.paginate(&PaginateOptions::new(2));
/// assert_eq!(pages.len(), 2);
/// # Ok::<(), daisyforge::daisy::DaisyError>(())
/// ```
pub fn paginate<'a>(tree: &'a Node, options: &PaginateOptions) -> Vec<Page<'a>> {
    let tags: Vec<&str> = options.tags.iter().map(|tag| tag.as_str()).collect();
    let parts = split_by_tags(tree, &tags);
    build_pages(parts, options)
}

impl Element {
    /// 按谓词切分元素的直接子节点
    pub fn split_by<'a, F>(&'a self, test: F) -> Vec<Part<'a>>
    where
        F: Fn(&Node) -> bool,
    {
        split_children(&self.children, &test)
    }

    /// 按标签名集合切分元素的直接子节点
    pub fn split_by_tags<'a>(&'a self, tags: &[&str]) -> Vec<Part<'a>> {
        split_children(&self.children, &|node: &Node| {
            node.tag_name().is_some_and(|name| tags.contains(&name))
        })
    }

    /// 切分元素的直接子节点并分页
    pub fn paginate(&self, options: &PaginateOptions) -> Vec<Page<'_>> {
        let tags: Vec<&str> = options.tags.iter().map(|tag| tag.as_str()).collect();
        let parts = self.split_by_tags(&tags);
        build_pages(parts, options)
    }
}

fn split_children<'a>(children: &'a [Node], test: &dyn Fn(&Node) -> bool) -> Vec<Part<'a>> {
    let mut parts = Vec::new();
    let mut current = Part::new();

    for child in children {
        current.nodes.push(child);
        if test(child) {
            parts.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

fn build_pages<'a>(parts: Vec<Part<'a>>, options: &PaginateOptions) -> Vec<Page<'a>> {
    if options.items_per_page == 0 {
        return Vec::new();
    }

    let total = parts.len();
    if total == 0 {
        return Vec::new();
    }

    let last_page = total.div_ceil(options.items_per_page);
    let mut pages = Vec::with_capacity(last_page);
    let mut parts_iter = parts.into_iter();

    for current_page in 1..=last_page {
        let start = (current_page - 1) * options.items_per_page;
        let data: Vec<Part<'a>> = parts_iter.by_ref().take(options.items_per_page).collect();
        let end = start + data.len();

        pages.push(Page {
            data,
            start,
            end,
            total,
            current_page,
            size: options.items_per_page,
            last_page,
            url: PageUrls::for_page(current_page, last_page, &options.base_path),
        });
    }

    pages
}
