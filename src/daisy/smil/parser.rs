//! SMIL解析器模块
//!
//! 提供SMIL（Synchronized Multimedia Integration Language）时间
//! 同步文件的解析功能，提取音频片段映射和head元数据。

use crate::daisy::error::{DaisyError, Result};
use crate::daisy::metadata::{extract_metadata, MetadataMap};
use crate::daisy::smil::clip::AudioClip;
use crate::daisy::time::parse_time;
use crate::daisy::tree::Node;
use std::collections::HashMap;

/// SMIL文件解析结果
#[derive(Debug, Clone)]
pub struct Smil {
    /// head内的元数据（dtb:totalElapsedTime等）
    pub metadata: MetadataMap,
    /// 音频片段映射，键为 `{文件名}#{par的id}`
    pub clips: HashMap<String, AudioClip>,
}

impl Smil {
    /// 解析SMIL文件内容
    ///
    /// 只收集同时满足以下条件的par元素（直接位于body下或嵌套在
    /// seq内）：带 `id` 属性，且内部有携带 `src`、`clipBegin`、
    /// `clipEnd` 属性的audio元素。缺少任一项的par被静默跳过。
    /// 片段键格式为 `{filename}#{id}`，用于区分共享同一id命名空间
    /// 的多个SMIL文件。
    ///
    /// # 参数
    /// * `xml_content` - SMIL文件的XML内容
    /// * `filename` - SMIL文件名，用于构造片段键
    ///
    /// # 返回值
    /// * `Result<Smil, DaisyError>` - 解析后的SMIL信息
    pub fn parse_xml(xml_content: &str, filename: &str) -> Result<Smil> {
        let tree = Node::parse_xml(xml_content)?;
        let smil_root = tree
            .find_element("smil")
            .ok_or_else(|| DaisyError::MissingRootElement("smil".to_string()))?;

        let metadata = match smil_root.find_element("head") {
            Some(head) => extract_metadata(&head.find_direct_children("meta")),
            None => MetadataMap::new(),
        };

        let mut clips = HashMap::new();
        for par in smil_root.find_elements("par") {
            let id = match par.attribute("id") {
                Some(id) => id,
                None => continue,
            };
            let audio = match par.find_element("audio") {
                Some(audio) => audio,
                None => continue,
            };
            let (src, clip_begin, clip_end) = match (
                audio.attribute("src"),
                audio.attribute("clipBegin"),
                audio.attribute("clipEnd"),
            ) {
                (Some(src), Some(begin), Some(end)) => (src, begin, end),
                _ => continue,
            };

            clips.insert(
                format!("{}#{}", filename, id),
                AudioClip::new(src.to_string(), parse_time(clip_begin), parse_time(clip_end)),
            );
        }

        Ok(Smil { metadata, clips })
    }

    /// 根据键获取音频片段
    ///
    /// # 参数
    /// * `key` - 片段键（`{filename}#{id}` 格式）
    pub fn get_clip(&self, key: &str) -> Option<&AudioClip> {
        self.clips.get(key)
    }

    /// 获取片段数量
    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    /// 计算全部片段的总时长（毫秒）
    pub fn total_duration(&self) -> u64 {
        self.clips.values().map(|clip| clip.duration).sum()
    }

    /// 获取播放前已经过的时间（毫秒）
    ///
    /// 读取 `dtb:totalElapsedTime` 元数据；缺失或无法解析时为0。
    pub fn total_elapsed_time(&self) -> u64 {
        self.metadata
            .get_scalar("dtb:totalElapsedTime")
            .map(parse_time)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SMIL: &str = r#"<?xml version="1.0"?>
<smil xmlns="http://www.w3.org/2001/SMIL20/">
<head>
<meta name="dtb:uid" content="AUTO-UID-1"/>
<meta name="dtb:totalElapsedTime" content="0:10:00"/>
</head>
<body>
<seq id="mseq">
<par id="tcp1">
<text src="book.xml#dtb1"/>
<audio src="part1.mp3" clipBegin="0:00:00.000" clipEnd="0:00:10.500"/>
</par>
<par id="tcp2">
<text src="book.xml#dtb2"/>
<audio src="part1.mp3" clipBegin="0:00:10.500" clipEnd="0:00:15.750"/>
</par>
<par id="no-audio">
<text src="book.xml#dtb3"/>
</par>
<par>
<audio src="part1.mp3" clipBegin="0:00:15.750" clipEnd="0:00:20.000"/>
</par>
<par id="incomplete">
<audio src="part1.mp3" clipBegin="0:00:20.000"/>
</par>
</seq>
</body>
</smil>"#;

    #[test]
    fn test_parse_clips_with_filename_keys() {
        let smil = Smil::parse_xml(SAMPLE_SMIL, "part1.smil").expect("解析SMIL失败");

        // 缺少id、audio或时间属性的par被跳过
        assert_eq!(smil.clip_count(), 2);

        let first = smil.get_clip("part1.smil#tcp1").expect("缺少tcp1");
        assert_eq!(first.src, "part1.mp3");
        assert_eq!(first.clip_begin, 0);
        assert_eq!(first.clip_end, 10_500);
        assert_eq!(first.duration, 10_500);

        let second = smil.get_clip("part1.smil#tcp2").expect("缺少tcp2");
        assert_eq!(second.duration, 5250);
    }

    #[test]
    fn test_head_metadata() {
        let smil = Smil::parse_xml(SAMPLE_SMIL, "part1.smil").expect("解析SMIL失败");

        assert_eq!(smil.metadata.get_scalar("dtb:uid"), Some("AUTO-UID-1"));
        assert_eq!(smil.total_elapsed_time(), 600_000);
    }

    #[test]
    fn test_total_duration() {
        let smil = Smil::parse_xml(SAMPLE_SMIL, "part1.smil").expect("解析SMIL失败");
        assert_eq!(smil.total_duration(), 10_500 + 5250);
    }

    #[test]
    fn test_same_id_in_different_files() {
        let xml = r#"<smil><body>
<par id="tcp1"><audio src="a.mp3" clipBegin="0:00:00" clipEnd="0:00:01"/></par>
</body></smil>"#;

        let first = Smil::parse_xml(xml, "a.smil").expect("解析失败");
        let second = Smil::parse_xml(xml, "b.smil").expect("解析失败");

        assert!(first.get_clip("a.smil#tcp1").is_some());
        assert!(second.get_clip("b.smil#tcp1").is_some());
        assert!(second.get_clip("a.smil#tcp1").is_none());
    }

    #[test]
    fn test_par_outside_seq() {
        // body直接子节点中的par同样被收集
        let xml = r#"<smil><body>
<par id="p1"><audio src="a.mp3" clipBegin="0:00:00" clipEnd="0:00:02"/></par>
</body></smil>"#;
        let smil = Smil::parse_xml(xml, "a.smil").expect("解析失败");
        assert_eq!(smil.clip_count(), 1);
    }

    #[test]
    fn test_missing_smil_root() {
        let result = Smil::parse_xml("<body/>", "a.smil");
        assert!(matches!(
            result,
            Err(DaisyError::MissingRootElement(ref tag)) if tag == "smil"
        ));
    }
}
